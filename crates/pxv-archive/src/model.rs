//! Archive domain types: records, endpoint descriptors, filters and paging.

use std::{fmt, str::FromStr};

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::Error;

// ─── Enumerations ────────────────────────────────────────────────────────────

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum HttpMethod {
  Get,
  Post,
}

impl HttpMethod {
  pub fn as_str(self) -> &'static str {
    match self {
      Self::Get => "GET",
      Self::Post => "POST",
    }
  }
}

impl fmt::Display for HttpMethod {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result { f.write_str(self.as_str()) }
}

impl FromStr for HttpMethod {
  type Err = Error;

  fn from_str(s: &str) -> Result<Self, Self::Err> {
    match s.to_ascii_uppercase().as_str() {
      "GET" => Ok(Self::Get),
      "POST" => Ok(Self::Post),
      _ => Err(Error::UnknownMethod(s.to_owned())),
    }
  }
}

/// How the response body was interpreted when it was archived.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum ResponseType {
  Json,
  Text,
}

impl ResponseType {
  pub fn as_str(self) -> &'static str {
    match self {
      Self::Json => "JSON",
      Self::Text => "TEXT",
    }
  }
}

impl fmt::Display for ResponseType {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result { f.write_str(self.as_str()) }
}

impl FromStr for ResponseType {
  type Err = Error;

  fn from_str(s: &str) -> Result<Self, Self::Err> {
    match s.to_ascii_uppercase().as_str() {
      "JSON" => Ok(Self::Json),
      "TEXT" => Ok(Self::Text),
      _ => Err(Error::UnknownResponseType(s.to_owned())),
    }
  }
}

// ─── Records ─────────────────────────────────────────────────────────────────

/// One completed exchange as handed over by the HTTP client. Headers and
/// bodies are already serialised.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewResponse {
  pub method:           HttpMethod,
  pub endpoint:         String,
  pub url:              Option<String>,
  pub request_headers:  Option<String>,
  pub request_body:     Option<String>,
  pub response_type:    ResponseType,
  pub status_code:      u16,
  pub response_headers: Option<String>,
  pub response_body:    String,
}

impl NewResponse {
  /// A JSON `GET` exchange with no headers or request body recorded.
  pub fn get_json(
    endpoint: impl Into<String>,
    url: impl Into<String>,
    status_code: u16,
    body: impl Into<String>,
  ) -> Self {
    Self {
      method: HttpMethod::Get,
      endpoint: endpoint.into(),
      url: Some(url.into()),
      request_headers: None,
      request_body: None,
      response_type: ResponseType::Json,
      status_code,
      response_headers: None,
      response_body: body.into(),
    }
  }

  pub fn descriptor(&self) -> EndpointDescriptor {
    EndpointDescriptor::new(self.method, self.endpoint.clone(), self.status_code)
  }
}

/// An archived exchange. Never updated once stored.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ResponseRecord {
  pub id:               i64,
  pub method:           HttpMethod,
  pub endpoint:         String,
  pub url:              Option<String>,
  /// Hex SHA-256 of `url`, or of `""` when there is no url.
  pub url_hash:         String,
  pub request_headers:  Option<String>,
  pub request_body:     Option<String>,
  pub response_type:    ResponseType,
  pub status_code:      u16,
  pub response_headers: Option<String>,
  pub response_body:    String,
  pub created_at:       DateTime<Utc>,
}

impl ResponseRecord {
  pub fn descriptor(&self) -> EndpointDescriptor {
    EndpointDescriptor::new(self.method, self.endpoint.clone(), self.status_code)
  }
}

// ─── Endpoints ───────────────────────────────────────────────────────────────

#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct EndpointDescriptor {
  pub method:      HttpMethod,
  pub endpoint:    String,
  pub status_code: u16,
}

impl EndpointDescriptor {
  pub fn new(method: HttpMethod, endpoint: impl Into<String>, status_code: u16) -> Self {
    Self { method, endpoint: endpoint.into(), status_code }
  }
}

/// A descriptor annotated with how many JSON responses were observed for it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EndpointCount {
  #[serde(flatten)]
  pub descriptor: EndpointDescriptor,
  pub count:      u64,
}

impl From<EndpointCount> for EndpointDescriptor {
  fn from(value: EndpointCount) -> Self { value.descriptor }
}

impl From<&EndpointCount> for EndpointDescriptor {
  fn from(value: &EndpointCount) -> Self { value.descriptor.clone() }
}

/// Which endpoints a query covers.
///
/// `Any` is a logical OR over its descriptors; an empty `Any` matches nothing.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum EndpointFilter {
  #[default]
  All,
  Any(Vec<EndpointDescriptor>),
}

impl From<()> for EndpointFilter {
  fn from((): ()) -> Self { Self::All }
}

impl From<EndpointDescriptor> for EndpointFilter {
  fn from(value: EndpointDescriptor) -> Self { Self::Any(vec![value]) }
}

impl From<EndpointCount> for EndpointFilter {
  fn from(value: EndpointCount) -> Self { Self::Any(vec![value.descriptor]) }
}

impl From<Option<EndpointDescriptor>> for EndpointFilter {
  fn from(value: Option<EndpointDescriptor>) -> Self {
    value.map_or(Self::All, Self::from)
  }
}

impl From<Vec<EndpointDescriptor>> for EndpointFilter {
  fn from(value: Vec<EndpointDescriptor>) -> Self { Self::Any(value) }
}

impl From<Vec<EndpointCount>> for EndpointFilter {
  fn from(value: Vec<EndpointCount>) -> Self {
    Self::Any(value.into_iter().map(EndpointDescriptor::from).collect())
  }
}

impl From<&[EndpointCount]> for EndpointFilter {
  fn from(value: &[EndpointCount]) -> Self {
    Self::Any(value.iter().map(EndpointDescriptor::from).collect())
  }
}

impl FromIterator<EndpointDescriptor> for EndpointFilter {
  fn from_iter<I: IntoIterator<Item = EndpointDescriptor>>(iter: I) -> Self {
    Self::Any(iter.into_iter().collect())
  }
}

// ─── Paging ──────────────────────────────────────────────────────────────────

/// Optional 1-indexed page number and page size.
///
/// Both or neither must be set. Values are signed so a bad range can be
/// reported back exactly as given.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PageRange {
  pub page:  Option<i64>,
  pub limit: Option<i64>,
}

/// A validated range as SQL `LIMIT`/`OFFSET` values.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) struct Window {
  pub limit:  i64,
  pub offset: i64,
}

impl PageRange {
  /// No paging: the whole result set.
  pub fn all() -> Self { Self::default() }

  pub fn page(page: i64, limit: i64) -> Self {
    Self { page: Some(page), limit: Some(limit) }
  }

  pub(crate) fn window(self) -> crate::Result<Option<Window>> {
    let invalid = || Error::InvalidRange { page: self.page, limit: self.limit };
    match (self.page, self.limit) {
      (None, None) => Ok(None),
      (Some(page), Some(limit)) if page >= 1 && limit >= 1 => {
        let offset = (page - 1).checked_mul(limit).ok_or_else(invalid)?;
        Ok(Some(Window { limit, offset }))
      }
      _ => Err(invalid()),
    }
  }
}
