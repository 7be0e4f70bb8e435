//! Illust items, the payload of most illust endpoints.

use pxv_check::{
  CheckSet, Checker,
  json::{each_with, field_with, is_number, is_one_of, is_string, nullable_field_with},
};
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::common::{ImageUrls, ImageUrlsCheck, Series, SeriesCheck, Tag, TagCheck, User, user_field};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum IllustType {
  Illust,
  Manga,
  Ugoira,
}

/// The commonly used subset of an illust item.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Illust {
  pub id:              u64,
  pub title:           String,
  #[serde(rename = "type")]
  pub kind:            IllustType,
  pub image_urls:      ImageUrls,
  pub user:            User,
  pub tags:            Vec<Tag>,
  /// ISO 8601 with the server's offset, kept verbatim.
  pub create_date:     String,
  pub page_count:      u32,
  pub total_view:      u64,
  pub total_bookmarks: u64,
  pub series:          Option<Series>,
}

pub struct IllustCheck;

impl Checker for IllustCheck {
  type Value = Value;

  fn checks(&self) -> CheckSet<Value> {
    CheckSet::new()
      .check("id", |v| is_number(v, "id"))
      .check("title", |v| is_string(v, "title"))
      .check("type", |v| is_one_of(v, "type", &["illust", "manga", "ugoira"]))
      .try_check("image_urls", |v| field_with(v, "image_urls", &ImageUrlsCheck))
      .try_check("user", |v| user_field(v, "user"))
      .try_check("tags", |v| each_with(v, "tags", &TagCheck))
      .check("create_date", |v| is_string(v, "create_date"))
      .check("page_count", |v| is_number(v, "page_count"))
      .check("total_view", |v| is_number(v, "total_view"))
      .check("total_bookmarks", |v| is_number(v, "total_bookmarks"))
      .try_check("series", |v| {
        if v.get("series").is_none() {
          return Ok(false);
        }
        nullable_field_with(v, "series", &SeriesCheck)
      })
  }
}

#[cfg(test)]
pub(crate) mod tests {
  use serde_json::json;

  use super::*;

  pub(crate) fn illust_json() -> Value {
    json!({
      "id": 59580629,
      "title": "夏",
      "type": "illust",
      "image_urls": {
        "square_medium": "https://i.example/sq.jpg",
        "medium": "https://i.example/m.jpg",
        "large": "https://i.example/l.jpg"
      },
      "user": {
        "id": 11,
        "name": "pixiv事務局",
        "account": "pixiv",
        "profile_image_urls": { "medium": "https://i.example/11_170.jpg" }
      },
      "tags": [
        { "name": "夏", "translated_name": "summer" },
        { "name": "風景", "translated_name": null }
      ],
      "create_date": "2016-10-22T01:00:00+09:00",
      "page_count": 1,
      "total_view": 1200,
      "total_bookmarks": 300,
      "series": null
    })
  }

  #[test]
  fn valid_illust_passes_and_deserialises() {
    let value = illust_json();
    assert!(IllustCheck.assert_valid(&value).unwrap());

    let illust: Illust = serde_json::from_value(value).unwrap();
    assert_eq!(illust.kind, IllustType::Illust);
    assert_eq!(illust.tags.len(), 2);
    assert!(illust.series.is_none());
  }

  #[test]
  fn broken_nested_objects_fail_their_own_labels() {
    let mut value = illust_json();
    value["user"]["account"] = json!(null);
    value["tags"][1]["name"] = json!(3);
    value["type"] = json!("novel");

    assert_eq!(IllustCheck.failures(&value), ["type", "user", "tags"]);
  }

  #[test]
  fn series_must_be_present_even_if_null() {
    let mut value = illust_json();
    value.as_object_mut().unwrap().remove("series");
    assert_eq!(IllustCheck.failures(&value), ["series"]);

    value["series"] = json!({ "id": 5, "title": "四季" });
    assert!(IllustCheck.is_valid(&value));
  }
}
