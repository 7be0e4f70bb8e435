//! `GET /v1/user/detail`

use pxv_check::{
  CheckSet, DualChecker,
  json::{field_with, is_number, is_object_field, is_one_of},
};
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::common::{UserItem, UserItemCheck};

/// Client platform filter accepted by most list endpoints.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Filter {
  #[default]
  ForIos,
  ForAndroid,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserDetailRequest {
  pub user_id: u64,
  #[serde(default, skip_serializing_if = "Option::is_none")]
  pub filter:  Option<Filter>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UserDetailResponse {
  pub user:    UserItem,
  /// Profile details; left untyped because most fields are user-optional.
  pub profile: Value,
}

pub struct UserDetailCheck;

impl DualChecker for UserDetailCheck {
  type Request = Value;
  type Response = Value;

  fn request_checks(&self) -> CheckSet<Value> {
    CheckSet::new()
      .check("user_id", |v| is_number(v, "user_id"))
      .check("filter", |v| {
        v.get("filter").is_none() || is_one_of(v, "filter", &["for_ios", "for_android"])
      })
  }

  fn response_checks(&self) -> CheckSet<Value> {
    CheckSet::new()
      .try_check("user", |v| field_with(v, "user", &UserItemCheck))
      .check("profile", |v| is_object_field(v, "profile"))
  }
}

#[cfg(test)]
mod tests {
  use serde_json::json;

  use super::*;

  fn response_json() -> Value {
    json!({
      "user": {
        "id": 11,
        "name": "pixiv事務局",
        "account": "pixiv",
        "profile_image_urls": { "medium": "https://i.example/11_170.jpg" },
        "is_followed": true,
        "comment": "pixiv公式アカウントです。"
      },
      "profile": { "webpage": null, "gender": "unknown", "total_illusts": 120 }
    })
  }

  #[test]
  fn filter_is_optional_but_constrained() {
    assert!(UserDetailCheck.is_request_valid(&json!({ "user_id": 11 })));
    assert!(UserDetailCheck.is_request_valid(&json!({ "user_id": 11, "filter": "for_android" })));
    assert_eq!(
      UserDetailCheck.request_failures(&json!({ "user_id": 11, "filter": "for_web" })),
      ["filter"],
    );

    let typed: UserDetailRequest =
      serde_json::from_value(json!({ "user_id": 11, "filter": "for_android" })).unwrap();
    assert_eq!(typed.filter, Some(Filter::ForAndroid));
  }

  #[test]
  fn response_validates_nested_user_item() {
    let value = response_json();
    assert!(UserDetailCheck.assert_response_valid(&value).unwrap());

    let typed: UserDetailResponse = serde_json::from_value(value).unwrap();
    assert_eq!(typed.user.user.account, "pixiv");
    assert_eq!(typed.user.user.is_followed, Some(true));
  }

  #[test]
  fn missing_comment_fails_user_label() {
    let mut value = response_json();
    value["user"].as_object_mut().unwrap().remove("comment");
    value["profile"] = json!([]);

    assert_eq!(UserDetailCheck.response_failures(&value), ["user", "profile"]);
    assert!(UserDetailCheck.request_failures(&json!({ "user_id": 1 })).is_empty());
  }
}
