//! Predicates over [`serde_json::Value`] for building check sets.
//!
//! The API distinguishes an absent key from an explicit `null`, so the
//! helpers do too:
//!
//! - `is_*`: key present with that JSON type.
//! - `opt_*`: key absent, or present with that type. `null` fails.
//! - `nullable_*`: key present with that type or `null`.

use serde_json::Value;

use crate::{CheckError, Checker, Result};

pub fn is_object(value: &Value) -> bool { value.is_object() }

pub fn has_field(value: &Value, key: &str) -> bool { value.get(key).is_some() }

/// `value[key]`, or `None` when `value` is not an object or lacks the key.
pub fn field<'a>(value: &'a Value, key: &str) -> Option<&'a Value> { value.get(key) }

pub fn is_string(value: &Value, key: &str) -> bool {
  value.get(key).is_some_and(Value::is_string)
}

pub fn is_number(value: &Value, key: &str) -> bool {
  value.get(key).is_some_and(Value::is_number)
}

pub fn is_bool(value: &Value, key: &str) -> bool {
  value.get(key).is_some_and(Value::is_boolean)
}

pub fn is_array(value: &Value, key: &str) -> bool {
  value.get(key).is_some_and(Value::is_array)
}

pub fn is_object_field(value: &Value, key: &str) -> bool {
  value.get(key).is_some_and(Value::is_object)
}

/// Key present with an explicit `null`.
pub fn is_null(value: &Value, key: &str) -> bool {
  value.get(key).is_some_and(Value::is_null)
}

pub fn opt_string(value: &Value, key: &str) -> bool {
  value.get(key).is_none_or(Value::is_string)
}

pub fn opt_number(value: &Value, key: &str) -> bool {
  value.get(key).is_none_or(Value::is_number)
}

pub fn opt_bool(value: &Value, key: &str) -> bool {
  value.get(key).is_none_or(Value::is_boolean)
}

pub fn nullable_string(value: &Value, key: &str) -> bool {
  value.get(key).is_some_and(|v| v.is_string() || v.is_null())
}

pub fn nullable_number(value: &Value, key: &str) -> bool {
  value.get(key).is_some_and(|v| v.is_number() || v.is_null())
}

/// Key present as a string equal to one of `allowed`.
pub fn is_one_of(value: &Value, key: &str, allowed: &[&str]) -> bool {
  value
    .get(key)
    .and_then(Value::as_str)
    .is_some_and(|s| allowed.contains(&s))
}

/// Run `checker.assert_valid` on `value[key]`.
///
/// Fails with [`CheckError::MissingField`] when the key is absent, so the
/// enclosing unit is recorded as failed.
pub fn field_with<C>(value: &Value, key: &str, checker: &C) -> Result<bool>
where
  C: Checker<Value = Value>,
{
  match value.get(key) {
    Some(inner) => checker.assert_valid(inner),
    None => Err(CheckError::MissingField(key.to_owned())),
  }
}

/// Like [`field_with`], but the field may be absent or `null`.
pub fn nullable_field_with<C>(value: &Value, key: &str, checker: &C) -> Result<bool>
where
  C: Checker<Value = Value>,
{
  match value.get(key) {
    None | Some(Value::Null) => Ok(true),
    Some(inner) => checker.assert_valid(inner),
  }
}

/// Run `checker.assert_valid` on every element of the array at `value[key]`.
///
/// Returns `Ok(false)` when the field is present but not an array.
pub fn each_with<C>(value: &Value, key: &str, checker: &C) -> Result<bool>
where
  C: Checker<Value = Value>,
{
  let items = match value.get(key) {
    Some(Value::Array(items)) => items,
    Some(_) => return Ok(false),
    None => return Err(CheckError::MissingField(key.to_owned())),
  };
  for item in items {
    checker.assert_valid(item)?;
  }
  Ok(true)
}
