//! Error type for `pxv-archive`.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum Error {
  /// Any read or write attempted before `init` succeeded or after `close`.
  #[error("responses database is not initialized")]
  NotInitialized,

  #[error("responses database port is invalid: {0:?}")]
  InvalidPort(String),

  #[error(
    "responses database range is invalid (page: {}, limit: {})",
    describe(.page),
    describe(.limit)
  )]
  InvalidRange { page: Option<i64>, limit: Option<i64> },

  #[error("configuration error: {0}")]
  Config(#[from] config::ConfigError),

  #[error("database error: {0}")]
  Database(#[from] tokio_rusqlite::Error),

  #[error("date/time parse error: {0}")]
  DateParse(String),

  #[error("unknown http method: {0:?}")]
  UnknownMethod(String),

  #[error("unknown response type: {0:?}")]
  UnknownResponseType(String),

  #[error("status code out of range: {0}")]
  InvalidStatus(i64),
}

fn describe(value: &Option<i64>) -> String {
  value.map_or_else(|| "unset".to_owned(), |v| v.to_string())
}

pub type Result<T, E = Error> = std::result::Result<T, E>;
