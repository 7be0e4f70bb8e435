//! Response archive for API exchanges.
//!
//! Every request/response pair handed to a [`ResponseDatabase`] is stored as
//! an immutable [`ResponseRecord`] in SQLite. Reads only ever see the trailing
//! [`RETENTION_WINDOW_DAYS`]; older rows stay on disk but drop out of every
//! query. Database access runs on the [`tokio_rusqlite`] connection thread so
//! callers never block the async runtime.

mod encode;
mod query;
mod schema;
mod store;

pub mod archive;
pub mod config;
pub mod error;
pub mod model;
pub mod recorder;

pub use archive::ResponseArchive;
pub use config::{ArchiveConfig, ArchiveOptions};
pub use encode::url_hash;
pub use error::{Error, Result};
pub use model::{
  EndpointCount, EndpointDescriptor, EndpointFilter, HttpMethod, NewResponse,
  PageRange, ResponseRecord, ResponseType,
};
pub use query::{RETENTION_WINDOW_DAYS, retention_cutoff};
pub use recorder::ExchangeRecorder;
pub use store::ResponseDatabase;
