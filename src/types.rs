//! Helpers for loosely-typed JSON fields.
//!
//! Optional fields throughout the models are plain `Option<T>` skipped when
//! `None`, so an absent field is never confused with a zero value. Fields
//! whose schema depends on a third-party provider (alert conditions and
//! actions, integration config, plugin settings) are kept as a [`DynamicMap`],
//! an insertion-ordered map of JSON values whose numbers keep their literal
//! text.

use serde_json::{Map, Number, Value};
use std::str::FromStr;

/// An ordered mapping from string keys to arbitrary JSON values.
pub type DynamicMap = Map<String, Value>;

/// Builds a JSON string value.
pub fn string(value: impl Into<String>) -> Value {
    Value::String(value.into())
}

/// Builds a JSON number from its literal text, keeping every digit.
///
/// Returns `None` if `literal` is not a valid JSON number.
///
/// # Examples
///
/// ```
/// use sentry_api::types::number;
///
/// let id = number("123456789012345678901234567890").unwrap();
/// assert_eq!(id.to_string(), "123456789012345678901234567890");
/// assert!(number("12abc").is_none());
/// ```
pub fn number(literal: &str) -> Option<Value> {
    Number::from_str(literal).ok().map(Value::Number)
}

/// Returns the string at `key`, if present and a string.
pub fn get_str<'a>(map: &'a DynamicMap, key: &str) -> Option<&'a str> {
    map.get(key)?.as_str()
}
