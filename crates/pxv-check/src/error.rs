//! Error types for `pxv-check`.

use thiserror::Error;

/// An error raised by a check unit itself, as opposed to a unit returning
/// `false`.
pub type Fault = Box<dyn std::error::Error + Send + Sync + 'static>;

#[derive(Debug, Error)]
pub enum CheckError {
  /// One or more units failed. Labels are in declaration order.
  #[error("Failed checks: {}", .labels.join(", "))]
  Failed { labels: Vec<String> },

  /// A unit faulted while being evaluated with [`FaultPolicy::Propagate`].
  ///
  /// [`FaultPolicy::Propagate`]: crate::FaultPolicy::Propagate
  #[error("check {label:?} faulted: {source}")]
  Fault {
    label:  String,
    #[source]
    source: Fault,
  },

  #[error("missing field: {0}")]
  MissingField(String),
}

impl CheckError {
  /// The failed labels, if this is a [`CheckError::Failed`].
  pub fn failed_labels(&self) -> Option<&[String]> {
    match self {
      Self::Failed { labels } => Some(labels),
      _ => None,
    }
  }

  /// The label of the unit that faulted, if this is a [`CheckError::Fault`].
  pub fn faulted_label(&self) -> Option<&str> {
    match self {
      Self::Fault { label, .. } => Some(label),
      _ => None,
    }
  }
}

pub type Result<T, E = CheckError> = std::result::Result<T, E>;
