//! The `ResponseArchive` trait: the data operations of an archive backend.
//!
//! Lifecycle management (connect, migrate, close) is backend specific and
//! lives on the implementing type; this trait only covers reads and the
//! single append-only write.

use std::future::Future;

use crate::model::{EndpointCount, EndpointFilter, NewResponse, PageRange, ResponseRecord};

/// Abstraction over an archive of API exchanges.
///
/// Records are append-only: there is no update or delete. Every read is
/// limited to the trailing [`RETENTION_WINDOW_DAYS`](crate::RETENTION_WINDOW_DAYS).
pub trait ResponseArchive: Send + Sync {
  type Error: std::error::Error + Send + Sync + 'static;

  /// Store one exchange. `url_hash` and `created_at` are assigned here.
  fn add_response(
    &self,
    input: NewResponse,
  ) -> impl Future<Output = Result<ResponseRecord, Self::Error>> + Send + '_;

  /// Matching records, newest first.
  ///
  /// With no page and no limit the whole window is returned. Otherwise both
  /// must be at least 1; the result is the `page`-th slice of `limit`
  /// records.
  fn get_responses(
    &self,
    filter: EndpointFilter,
    range: PageRange,
  ) -> impl Future<Output = Result<Vec<ResponseRecord>, Self::Error>> + Send + '_;

  /// Number of records [`get_responses`](Self::get_responses) would return
  /// without paging.
  fn get_response_count(
    &self,
    filter: EndpointFilter,
  ) -> impl Future<Output = Result<u64, Self::Error>> + Send + '_;

  /// Every `(method, endpoint, status_code)` seen with a JSON response, with
  /// how often it was seen.
  fn get_endpoints(
    &self,
  ) -> impl Future<Output = Result<Vec<EndpointCount>, Self::Error>> + Send + '_;
}
