//! `GET /v1/illust/detail`

use pxv_check::{
  CheckSet, DualChecker,
  json::{field_with, is_number},
};
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::illust::{Illust, IllustCheck};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct IllustDetailRequest {
  pub illust_id: u64,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct IllustDetailResponse {
  pub illust: Illust,
}

pub struct IllustDetailCheck;

impl DualChecker for IllustDetailCheck {
  type Request = Value;
  type Response = Value;

  fn request_checks(&self) -> CheckSet<Value> {
    CheckSet::new().check("illust_id", |v| is_number(v, "illust_id"))
  }

  fn response_checks(&self) -> CheckSet<Value> {
    CheckSet::new().try_check("illust", |v| field_with(v, "illust", &IllustCheck))
  }
}

#[cfg(test)]
mod tests {
  use pxv_check::FaultPolicy;
  use serde_json::json;

  use super::*;
  use crate::illust::tests::illust_json;

  #[test]
  fn request_and_response_validate_independently() {
    let request = json!({ "illust_id": 59580629 });
    let response = json!({ "illust": illust_json() });

    assert!(IllustDetailCheck.assert_request_valid(&request).unwrap());
    assert!(IllustDetailCheck.assert_response_valid(&response).unwrap());

    let typed: IllustDetailResponse = serde_json::from_value(response).unwrap();
    assert_eq!(typed.illust.id, 59580629);
  }

  #[test]
  fn string_id_fails_request_only() {
    let request = json!({ "illust_id": "59580629" });
    assert_eq!(IllustDetailCheck.request_failures(&request), ["illust_id"]);
    assert!(!IllustDetailCheck.is_request_valid(&request));
    assert_eq!(
      IllustDetailCheck
        .list_request_failures(&request, FaultPolicy::Propagate)
        .unwrap(),
      ["illust_id"],
    );
  }

  #[test]
  fn missing_illust_is_recorded_or_propagated() {
    let response = json!({});
    assert_eq!(IllustDetailCheck.response_failures(&response), ["illust"]);

    let err = IllustDetailCheck.assert_response_valid(&response).unwrap_err();
    assert!(err.to_string().contains("missing field: illust"));
  }
}
