//! [`ExchangeRecorder`]: optional archival that never blocks the caller.
//!
//! The HTTP client calls [`ExchangeRecorder::record`] after every exchange
//! whether or not archival is configured. Missing configuration, a failed
//! connection or a failed insert are logged and otherwise ignored.

use std::sync::Arc;

use crate::{
  ArchiveOptions, ResponseArchive, ResponseDatabase,
  model::{NewResponse, ResponseRecord},
};

#[derive(Clone, Default)]
pub struct ExchangeRecorder {
  archive: Option<Arc<ResponseDatabase>>,
}

impl ExchangeRecorder {
  /// A recorder that drops every exchange.
  pub fn disabled() -> Self { Self::default() }

  pub fn new(archive: Arc<ResponseDatabase>) -> Self { Self { archive: Some(archive) } }

  /// Build and initialise an archive from `options`, falling back to a
  /// disabled recorder when that fails.
  pub async fn connect(options: ArchiveOptions) -> Self {
    let db = match ResponseDatabase::new(options) {
      Ok(db) => db,
      Err(err) => {
        tracing::warn!(error = %err, "response archive disabled: bad configuration");
        return Self::disabled();
      }
    };
    if !db.init().await {
      tracing::warn!(database = %db.config().database, "response archive disabled: could not connect");
      return Self::disabled();
    }
    Self::new(Arc::new(db))
  }

  pub fn archive(&self) -> Option<&Arc<ResponseDatabase>> { self.archive.as_ref() }

  /// Whether an exchange recorded now would actually be stored.
  pub fn is_enabled(&self) -> bool {
    self.archive.as_ref().is_some_and(|db| db.is_initialized())
  }

  /// Archive one exchange. Returns the stored record, or `None` when
  /// archival is off or the insert failed.
  pub async fn record(&self, input: NewResponse) -> Option<ResponseRecord> {
    let db = self.archive.as_ref().filter(|db| db.is_initialized())?;
    match db.add_response(input).await {
      Ok(record) => Some(record),
      Err(err) => {
        tracing::warn!(error = %err, "failed to archive response");
        None
      }
    }
  }
}
