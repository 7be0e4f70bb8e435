//! WHERE-clause construction for archive reads.
//!
//! Every read is restricted to the retention window; the endpoint filter is
//! ANDed onto that as an OR of `(method, endpoint, status_code)` triples.

use chrono::{DateTime, Duration, Utc};
use rusqlite::types::Value;

use crate::{
  encode::encode_dt,
  model::{EndpointDescriptor, EndpointFilter},
};

/// Reads only see records created within this many days of the call.
pub const RETENTION_WINDOW_DAYS: i64 = 90;

/// Oldest `created_at` a read issued at `now` still returns.
pub fn retention_cutoff(now: DateTime<Utc>) -> DateTime<Utc> {
  now - Duration::days(RETENTION_WINDOW_DAYS)
}

/// A SQL condition and its positional parameters.
#[derive(Debug, Clone, PartialEq)]
pub(crate) struct Condition {
  pub sql:    String,
  pub params: Vec<Value>,
}

impl Condition {
  /// Records inside the retention window that match `filter`.
  pub fn for_filter(filter: &EndpointFilter, cutoff: DateTime<Utc>) -> Self {
    let mut sql = String::from("created_at >= ?");
    let mut params = vec![Value::Text(encode_dt(cutoff))];

    match filter {
      EndpointFilter::All => {}
      EndpointFilter::Any(descriptors) if descriptors.is_empty() => {
        sql.push_str(" AND 1 = 0");
      }
      EndpointFilter::Any(descriptors) => {
        let alternatives: Vec<&str> = descriptors
          .iter()
          .map(|_| "(method = ? AND endpoint = ? AND status_code = ?)")
          .collect();
        sql.push_str(&format!(" AND ({})", alternatives.join(" OR ")));
        params.extend(descriptors.iter().flat_map(descriptor_params));
      }
    }

    Self { sql, params }
  }

  /// JSON records inside the retention window; the population
  /// `get_endpoints` aggregates over.
  pub fn json_endpoints(cutoff: DateTime<Utc>) -> Self {
    Self {
      sql:    "response_type = 'JSON' AND created_at >= ?".to_owned(),
      params: vec![Value::Text(encode_dt(cutoff))],
    }
  }
}

fn descriptor_params(descriptor: &EndpointDescriptor) -> [Value; 3] {
  [
    Value::Text(descriptor.method.as_str().to_owned()),
    Value::Text(descriptor.endpoint.clone()),
    Value::Integer(i64::from(descriptor.status_code)),
  ]
}
