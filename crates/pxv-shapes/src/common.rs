//! Building blocks shared by many endpoints: image URLs, users, tags, series.

use pxv_check::{
  CheckSet, Checker,
  json::{field_with, is_number, is_object_field, is_string, nullable_string, opt_bool, opt_string},
};
use serde::{Deserialize, Serialize};
use serde_json::Value;

// ─── Image URLs ──────────────────────────────────────────────────────────────

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ImageUrls {
  pub square_medium: String,
  pub medium:        String,
  pub large:         String,
  /// Only present on single-page works.
  #[serde(default, skip_serializing_if = "Option::is_none")]
  pub original:      Option<String>,
}

pub struct ImageUrlsCheck;

impl Checker for ImageUrlsCheck {
  type Value = Value;

  fn checks(&self) -> CheckSet<Value> {
    CheckSet::new()
      .check("square_medium", |v| is_string(v, "square_medium"))
      .check("medium", |v| is_string(v, "medium"))
      .check("large", |v| is_string(v, "large"))
      .check("original", |v| opt_string(v, "original"))
  }
}

// ─── Users ───────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProfileImageUrls {
  pub medium: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct User {
  pub id:                      u64,
  pub name:                    String,
  pub account:                 String,
  pub profile_image_urls:      ProfileImageUrls,
  #[serde(default, skip_serializing_if = "Option::is_none")]
  pub is_followed:             Option<bool>,
  #[serde(default, skip_serializing_if = "Option::is_none")]
  pub is_access_blocking_user: Option<bool>,
}

pub struct UserCheck;

impl Checker for UserCheck {
  type Value = Value;

  fn checks(&self) -> CheckSet<Value> {
    CheckSet::new()
      .check("id", |v| is_number(v, "id"))
      .check("name", |v| is_string(v, "name"))
      .check("account", |v| is_string(v, "account"))
      .check("profile_image_urls", |v| {
        is_object_field(v, "profile_image_urls")
          && v["profile_image_urls"].get("medium").is_some()
      })
      .check("is_followed", |v| opt_bool(v, "is_followed"))
      .check("is_access_blocking_user", |v| opt_bool(v, "is_access_blocking_user"))
  }
}

/// A user as returned by the user detail endpoint: the common user fields plus
/// the self-introduction.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserItem {
  #[serde(flatten)]
  pub user:    User,
  /// Line breaks are `\r\n`.
  pub comment: String,
}

pub struct UserItemCheck;

impl Checker for UserItemCheck {
  type Value = Value;

  fn checks(&self) -> CheckSet<Value> {
    CheckSet::new()
      .try_check("user", |v| UserCheck.assert_valid(v))
      .check("comment", |v| is_string(v, "comment"))
  }
}

// ─── Tags & series ───────────────────────────────────────────────────────────

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Tag {
  pub name:                   String,
  pub translated_name:        Option<String>,
  #[serde(default, skip_serializing_if = "Option::is_none")]
  pub added_by_uploaded_user: Option<bool>,
}

pub struct TagCheck;

impl Checker for TagCheck {
  type Value = Value;

  fn checks(&self) -> CheckSet<Value> {
    CheckSet::new()
      .check("name", |v| is_string(v, "name"))
      .check("translated_name", |v| nullable_string(v, "translated_name"))
      .check("added_by_uploaded_user", |v| opt_bool(v, "added_by_uploaded_user"))
  }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Series {
  pub id:    u64,
  pub title: String,
}

pub struct SeriesCheck;

impl Checker for SeriesCheck {
  type Value = Value;

  fn checks(&self) -> CheckSet<Value> {
    CheckSet::new()
      .check("id", |v| is_number(v, "id"))
      .check("title", |v| is_string(v, "title"))
  }
}

// ─── Privacy policy ──────────────────────────────────────────────────────────

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PrivacyPolicy {
  #[serde(default, skip_serializing_if = "Option::is_none")]
  pub version: Option<String>,
  #[serde(default, skip_serializing_if = "Option::is_none")]
  pub message: Option<String>,
  #[serde(default, skip_serializing_if = "Option::is_none")]
  pub url:     Option<String>,
}

pub struct PrivacyPolicyCheck;

impl Checker for PrivacyPolicyCheck {
  type Value = Value;

  fn checks(&self) -> CheckSet<Value> {
    CheckSet::new()
      .check("version", |v| opt_string(v, "version"))
      .check("message", |v| opt_string(v, "message"))
      .check("url", |v| opt_string(v, "url"))
  }
}

/// Validate `value[key]` as a user. Shared by every shape that embeds one.
pub(crate) fn user_field(value: &Value, key: &str) -> pxv_check::Result<bool> {
  field_with(value, key, &UserCheck)
}
