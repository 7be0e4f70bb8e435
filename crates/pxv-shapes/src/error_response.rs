//! The error body the API returns alongside 4xx responses.

use pxv_check::{
  CheckSet, Checker,
  json::{has_field, is_object_field, is_string},
};
use serde::{Deserialize, Serialize};
use serde_json::Value;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ApiErrorDetail {
  /// Message intended for end users; often empty.
  pub user_message:         String,
  pub message:              String,
  pub reason:               String,
  /// Shape varies between endpoints.
  #[serde(default)]
  pub user_message_details: Value,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ApiError {
  pub error: ApiErrorDetail,
}

pub struct ApiErrorCheck;

impl Checker for ApiErrorCheck {
  type Value = Value;

  fn checks(&self) -> CheckSet<Value> {
    CheckSet::new()
      .check("error", |v| is_object_field(v, "error"))
      .check("user_message", |v| is_string(&v["error"], "user_message"))
      .check("message", |v| is_string(&v["error"], "message"))
      .check("reason", |v| is_string(&v["error"], "reason"))
      .check("user_message_details", |v| has_field(&v["error"], "user_message_details"))
  }
}

#[cfg(test)]
mod tests {
  use serde_json::json;

  use super::*;

  #[test]
  fn recognises_error_bodies() {
    let body = json!({
      "error": {
        "user_message": "",
        "message": "Error occurred at the OAuth process.",
        "reason": "",
        "user_message_details": {}
      }
    });
    assert!(ApiErrorCheck.is_valid(&body));

    let parsed: ApiError = serde_json::from_value(body).unwrap();
    assert_eq!(parsed.error.message, "Error occurred at the OAuth process.");
  }

  #[test]
  fn ordinary_payload_is_not_an_error() {
    let failed = ApiErrorCheck.failures(&json!({ "illust": {} }));
    assert_eq!(
      failed,
      ["error", "user_message", "message", "reason", "user_message_details"],
    );
  }
}
