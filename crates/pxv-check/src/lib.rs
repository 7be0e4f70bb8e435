//! Runtime shape checks for payloads of an undocumented API.
//!
//! Static serde types describe what a payload *should* look like; the check
//! sets in this crate verify what it *actually* looks like at the boundary.
//! A [`CheckSet`] is an ordered collection of labelled predicates, and the
//! [`Checker`] / [`DualChecker`] traits layer the evaluation helpers on top.
//!
//! This crate has no storage or HTTP dependencies.

pub mod check;
pub mod checker;
pub mod error;
pub mod json;

pub use check::{CheckSet, FaultPolicy};
pub use checker::{Checker, DualChecker};
pub use error::{CheckError, Fault, Result};
