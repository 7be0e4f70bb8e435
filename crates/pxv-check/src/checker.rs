//! The [`Checker`] and [`DualChecker`] traits.
//!
//! Implementors only declare their check sets; every evaluation helper is a
//! provided method. Checkers are expected to be stateless unit structs that
//! are constructed wherever they are needed.

use crate::{CheckSet, FaultPolicy, Result};

/// Validates a single data shape.
pub trait Checker {
  type Value;

  fn checks(&self) -> CheckSet<Self::Value>;

  /// Failed labels in declaration order. See [`CheckSet::evaluate`].
  fn list_failures(
    &self,
    value: &Self::Value,
    policy: FaultPolicy,
  ) -> Result<Vec<String>> {
    self.checks().evaluate(value, policy)
  }

  /// Failed labels, with faulting units recorded as failures.
  fn failures(&self, value: &Self::Value) -> Vec<String> {
    self.checks().failures(value)
  }

  fn is_valid(&self, value: &Self::Value) -> bool {
    self.failures(value).is_empty()
  }

  /// `Ok(true)` if every check passes. A faulting unit surfaces its own
  /// error rather than being folded into the failure list.
  fn assert_valid(&self, value: &Self::Value) -> Result<bool> {
    self.checks().assert(value)
  }
}

/// Validates the request and response shapes of one API exchange.
///
/// The two sides are evaluated independently; a response failure never
/// shows up in a request failure list and vice versa.
pub trait DualChecker {
  type Request;
  type Response;

  fn request_checks(&self) -> CheckSet<Self::Request>;

  fn response_checks(&self) -> CheckSet<Self::Response>;

  // ── Request side ──────────────────────────────────────────────────────

  fn list_request_failures(
    &self,
    value: &Self::Request,
    policy: FaultPolicy,
  ) -> Result<Vec<String>> {
    self.request_checks().evaluate(value, policy)
  }

  fn request_failures(&self, value: &Self::Request) -> Vec<String> {
    self.request_checks().failures(value)
  }

  fn is_request_valid(&self, value: &Self::Request) -> bool {
    self.request_failures(value).is_empty()
  }

  fn assert_request_valid(&self, value: &Self::Request) -> Result<bool> {
    self.request_checks().assert(value)
  }

  // ── Response side ─────────────────────────────────────────────────────

  fn list_response_failures(
    &self,
    value: &Self::Response,
    policy: FaultPolicy,
  ) -> Result<Vec<String>> {
    self.response_checks().evaluate(value, policy)
  }

  fn response_failures(&self, value: &Self::Response) -> Vec<String> {
    self.response_checks().failures(value)
  }

  fn is_response_valid(&self, value: &Self::Response) -> bool {
    self.response_failures(value).is_empty()
  }

  fn assert_response_valid(&self, value: &Self::Response) -> Result<bool> {
    self.response_checks().assert(value)
  }
}

#[cfg(test)]
mod tests {
  use serde_json::{Value, json};

  use super::*;
  use crate::{CheckError, json::field_with};

  struct PointCheck;

  impl Checker for PointCheck {
    type Value = Value;

    fn checks(&self) -> CheckSet<Value> {
      CheckSet::<Value>::new()
        .check("x", |v| v["x"].is_number())
        .check("y", |v| v["y"].is_number())
    }
  }

  struct SegmentCheck;

  impl Checker for SegmentCheck {
    type Value = Value;

    fn checks(&self) -> CheckSet<Value> {
      CheckSet::new()
        .try_check("from", |v| field_with(v, "from", &PointCheck))
        .try_check("to", |v| field_with(v, "to", &PointCheck))
    }
  }

  struct LookupCheck;

  impl DualChecker for LookupCheck {
    type Request = Value;
    type Response = Value;

    fn request_checks(&self) -> CheckSet<Value> {
      CheckSet::<Value>::new().check("id", |v| v["id"].is_number())
    }

    fn response_checks(&self) -> CheckSet<Value> {
      CheckSet::<Value>::new()
        .check("name", |v| v["name"].is_string())
        .try_check("point", |v| field_with(v, "point", &PointCheck))
    }
  }

  #[test]
  fn is_valid_agrees_with_failures() {
    for value in [json!({ "x": 1, "y": 2 }), json!({ "x": "1" }), json!([])] {
      assert_eq!(PointCheck.is_valid(&value), PointCheck.failures(&value).is_empty());
    }
  }

  #[test]
  fn assert_valid_returns_true_as_guard() {
    let value = json!({ "x": 0.5, "y": -1 });
    assert!(PointCheck.assert_valid(&value).unwrap());
  }

  #[test]
  fn nested_failure_becomes_outer_label() {
    let value = json!({ "from": { "x": 1, "y": 2 }, "to": { "x": 1 } });
    assert_eq!(SegmentCheck.failures(&value), ["to"]);
    assert!(!SegmentCheck.is_valid(&value));
  }

  #[test]
  fn nested_failure_surfaces_under_assert() {
    let value = json!({ "from": { "x": 1, "y": 2 }, "to": { "x": 1 } });
    let err = SegmentCheck.assert_valid(&value).unwrap_err();

    assert_eq!(err.faulted_label(), Some("to"));
    let CheckError::Fault { source, .. } = err else {
      panic!("expected a fault");
    };
    assert_eq!(source.to_string(), "Failed checks: y");
  }

  #[test]
  fn missing_nested_field_is_a_failure() {
    let value = json!({ "from": { "x": 1, "y": 2 } });
    assert_eq!(SegmentCheck.failures(&value), ["to"]);

    let err = SegmentCheck
      .list_failures(&value, FaultPolicy::Propagate)
      .unwrap_err();
    assert!(err.to_string().contains("missing field: to"));
  }

  #[test]
  fn dual_sides_are_independent() {
    let request = json!({ "id": 7 });
    let response = json!({ "name": 3, "point": { "x": 1, "y": 1 } });

    assert!(LookupCheck.request_failures(&request).is_empty());
    assert!(LookupCheck.is_request_valid(&request));
    assert!(LookupCheck.assert_request_valid(&request).unwrap());

    assert_eq!(LookupCheck.response_failures(&response), ["name"]);
    assert!(!LookupCheck.is_response_valid(&response));
    assert_eq!(
      LookupCheck.assert_response_valid(&response).unwrap_err().to_string(),
      "Failed checks: name",
    );

    // Shapes swapped: each side only reports its own labels.
    assert_eq!(LookupCheck.request_failures(&response), ["id"]);
    assert_eq!(LookupCheck.response_failures(&request), ["name", "point"]);
  }

  #[test]
  fn dual_record_policy_never_errors() {
    let response = json!({ "name": "n" });
    let failed = LookupCheck
      .list_response_failures(&response, FaultPolicy::Record)
      .unwrap();
    assert_eq!(failed, ["point"]);

    let err = LookupCheck
      .list_response_failures(&response, FaultPolicy::Propagate)
      .unwrap_err();
    assert_eq!(err.faulted_label(), Some("point"));
    assert!(LookupCheck.list_request_failures(&response, FaultPolicy::Propagate).is_ok());
  }
}
