//! Conversions between archive domain types and their SQLite column text.
//!
//! Timestamps are stored as fixed-width RFC 3339 UTC strings with microsecond
//! precision, so lexicographic comparison in SQL matches chronological order.

use chrono::{DateTime, SecondsFormat, SubsecRound as _, Utc};
use sha2::{Digest, Sha256};

use crate::{
  Error, Result,
  model::{HttpMethod, ResponseRecord, ResponseType},
};

// ─── Url hash ────────────────────────────────────────────────────────────────

/// Hex-encoded SHA-256 of `url`; a missing url hashes like the empty string.
pub fn url_hash(url: Option<&str>) -> String {
  hex::encode(Sha256::digest(url.unwrap_or_default().as_bytes()))
}

// ─── DateTime<Utc> ───────────────────────────────────────────────────────────

/// Drop precision below what [`encode_dt`] stores, so a record returned from
/// an insert compares equal to the same record read back.
pub fn truncate_dt(dt: DateTime<Utc>) -> DateTime<Utc> { dt.trunc_subsecs(6) }

pub fn encode_dt(dt: DateTime<Utc>) -> String {
  dt.to_rfc3339_opts(SecondsFormat::Micros, true)
}

pub fn decode_dt(s: &str) -> Result<DateTime<Utc>> {
  DateTime::parse_from_rfc3339(s)
    .map(|dt| dt.with_timezone(&Utc))
    .map_err(|e| Error::DateParse(e.to_string()))
}

// ─── Status code ─────────────────────────────────────────────────────────────

pub fn decode_status(code: i64) -> Result<u16> {
  u16::try_from(code).map_err(|_| Error::InvalidStatus(code))
}

// ─── Row types ───────────────────────────────────────────────────────────────

/// Column list shared by every query that returns full records.
pub const RECORD_COLUMNS: &str = "id, method, endpoint, url, url_hash, \
  request_headers, request_body, response_type, status_code, \
  response_headers, response_body, created_at";

/// Raw values read directly from a `responses` row.
pub struct RawResponse {
  pub id:               i64,
  pub method:           String,
  pub endpoint:         String,
  pub url:              Option<String>,
  pub url_hash:         String,
  pub request_headers:  Option<String>,
  pub request_body:     Option<String>,
  pub response_type:    String,
  pub status_code:      i64,
  pub response_headers: Option<String>,
  pub response_body:    String,
  pub created_at:       String,
}

impl RawResponse {
  /// Read a row selected with [`RECORD_COLUMNS`].
  pub fn from_row(row: &rusqlite::Row<'_>) -> rusqlite::Result<Self> {
    Ok(Self {
      id:               row.get(0)?,
      method:           row.get(1)?,
      endpoint:         row.get(2)?,
      url:              row.get(3)?,
      url_hash:         row.get(4)?,
      request_headers:  row.get(5)?,
      request_body:     row.get(6)?,
      response_type:    row.get(7)?,
      status_code:      row.get(8)?,
      response_headers: row.get(9)?,
      response_body:    row.get(10)?,
      created_at:       row.get(11)?,
    })
  }

  pub fn into_record(self) -> Result<ResponseRecord> {
    Ok(ResponseRecord {
      id:               self.id,
      method:           self.method.parse::<HttpMethod>()?,
      endpoint:         self.endpoint,
      url:              self.url,
      url_hash:         self.url_hash,
      request_headers:  self.request_headers,
      request_body:     self.request_body,
      response_type:    self.response_type.parse::<ResponseType>()?,
      status_code:      decode_status(self.status_code)?,
      response_headers: self.response_headers,
      response_body:    self.response_body,
      created_at:       decode_dt(&self.created_at)?,
    })
  }
}

/// Raw values from the endpoint aggregation query.
pub struct RawEndpointCount {
  pub method:      String,
  pub endpoint:    String,
  pub status_code: i64,
  pub count:       i64,
}

#[cfg(test)]
mod tests {
  use chrono::TimeZone;

  use super::*;

  #[test]
  fn url_hash_is_sha256_hex() {
    assert_eq!(
      url_hash(None),
      "e3b0c44298fc1c149afbf4c8996fb92427ae41e4649b934ca495991b7852b855",
    );
    assert_eq!(url_hash(Some("")), url_hash(None));
    assert_eq!(
      url_hash(Some("https://app-api.example/v1/illust/detail?illust_id=1")),
      url_hash(Some("https://app-api.example/v1/illust/detail?illust_id=1")),
    );
    assert_ne!(url_hash(Some("a")), url_hash(Some("b")));
    assert_eq!(url_hash(Some("x")).len(), 64);
  }

  #[test]
  fn timestamps_are_fixed_width_and_sortable() {
    let early = Utc.with_ymd_and_hms(2026, 1, 2, 3, 4, 5).unwrap();
    let later = early + chrono::Duration::milliseconds(1500);

    let a = encode_dt(early);
    let b = encode_dt(later);
    assert_eq!(a, "2026-01-02T03:04:05.000000Z");
    assert_eq!(a.len(), b.len());
    assert!(a < b);
    assert_eq!(decode_dt(&b).unwrap(), later);
  }

  #[test]
  fn truncation_matches_stored_precision() {
    let dt = Utc.timestamp_opt(1_700_000_000, 123_456_789).unwrap();
    let stored = decode_dt(&encode_dt(dt)).unwrap();
    assert_eq!(stored, truncate_dt(dt));
  }

  #[test]
  fn bad_columns_are_reported() {
    assert!(matches!(decode_status(70_000), Err(Error::InvalidStatus(70_000))));
    assert!(matches!(decode_dt("yesterday"), Err(Error::DateParse(_))));
  }
}
