//! [`CheckSet`]: an ordered, labelled collection of check units.
//!
//! A unit evaluates to `Ok(true)` (passed), `Ok(false)` (failed) or
//! `Err(fault)` (the predicate itself broke). Both `Ok(false)` and `Err(_)`
//! count as failures; the [`FaultPolicy`] only decides whether a fault is
//! allowed to escape the evaluation loop.

use std::fmt;

use crate::{CheckError, Fault, Result};

type Unit<T> = Box<dyn Fn(&T) -> Result<bool, Fault> + Send + Sync>;

/// What to do when a unit faults during evaluation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum FaultPolicy {
  /// Record the unit's label as failed and keep evaluating.
  #[default]
  Record,
  /// Stop immediately and return the fault.
  Propagate,
}

/// Ordered mapping from label to check unit for one data shape.
///
/// Labels are unique. Adding a unit under an existing label replaces the
/// earlier unit in place, so declaration order is stable.
pub struct CheckSet<T> {
  units: Vec<(String, Unit<T>)>,
}

impl<T> Default for CheckSet<T> {
  fn default() -> Self { Self { units: Vec::new() } }
}

impl<T> fmt::Debug for CheckSet<T> {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    f.debug_struct("CheckSet")
      .field("labels", &self.labels().collect::<Vec<_>>())
      .finish()
  }
}

impl<T> CheckSet<T> {
  pub fn new() -> Self { Self::default() }

  /// Add an infallible predicate.
  pub fn check<F>(mut self, label: impl Into<String>, predicate: F) -> Self
  where
    T: 'static,
    F: Fn(&T) -> bool + Send + Sync + 'static,
  {
    self.insert(label.into(), Box::new(move |value: &T| Ok(predicate(value))));
    self
  }

  /// Add a predicate that may fault, typically because it delegates to a
  /// nested checker's `assert_valid`.
  pub fn try_check<F, E>(mut self, label: impl Into<String>, predicate: F) -> Self
  where
    T: 'static,
    F: Fn(&T) -> Result<bool, E> + Send + Sync + 'static,
    E: Into<Fault>,
  {
    self.insert(
      label.into(),
      Box::new(move |value: &T| predicate(value).map_err(Into::into)),
    );
    self
  }

  fn insert(&mut self, label: String, unit: Unit<T>) {
    match self.units.iter_mut().find(|(existing, _)| *existing == label) {
      Some(slot) => slot.1 = unit,
      None => self.units.push((label, unit)),
    }
  }

  /// Labels in declaration order.
  pub fn labels(&self) -> impl Iterator<Item = &str> {
    self.units.iter().map(|(label, _)| label.as_str())
  }

  pub fn len(&self) -> usize { self.units.len() }

  pub fn is_empty(&self) -> bool { self.units.is_empty() }

  /// Evaluate every unit in declaration order and return the failed labels.
  ///
  /// Under [`FaultPolicy::Record`] this never returns `Err`. Under
  /// [`FaultPolicy::Propagate`] the first fault stops evaluation and is
  /// returned as [`CheckError::Fault`].
  pub fn evaluate(&self, value: &T, policy: FaultPolicy) -> Result<Vec<String>> {
    let mut failed = Vec::new();
    for (label, unit) in &self.units {
      match unit(value) {
        Ok(true) => {}
        Ok(false) => failed.push(label.clone()),
        Err(source) => match policy {
          FaultPolicy::Record => failed.push(label.clone()),
          FaultPolicy::Propagate => {
            return Err(CheckError::Fault { label: label.clone(), source });
          }
        },
      }
    }
    Ok(failed)
  }

  /// Failed labels with faults recorded as failures.
  pub fn failures(&self, value: &T) -> Vec<String> {
    self
      .units
      .iter()
      .filter(|(_, unit)| !matches!(unit(value), Ok(true)))
      .map(|(label, _)| label.clone())
      .collect()
  }

  /// `Ok(true)` when every unit passes; otherwise the fault or the list of
  /// failed labels.
  pub fn assert(&self, value: &T) -> Result<bool> {
    let labels = self.evaluate(value, FaultPolicy::Propagate)?;
    if labels.is_empty() {
      Ok(true)
    } else {
      Err(CheckError::Failed { labels })
    }
  }
}
