//! Common types used throughout the client
//!
//! This module contains shared type definitions, type aliases,
//! and utility types used across multiple modules.

use crate::error::{Error, Result};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

// ============================================================================
// Type Aliases
// ============================================================================

/// JSON value type (re-exported from serde_json)
pub type JsonValue = serde_json::Value;

/// JSON object type
pub type JsonObject = serde_json::Map<String, JsonValue>;

// ============================================================================
// HTTP Types
// ============================================================================

/// HTTP method
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum Method {
    #[default]
    GET,
    POST,
    PUT,
    PATCH,
    DELETE,
}

impl Method {
    /// Lower-case verb, as recorded on pending requests
    pub fn as_str(&self) -> &'static str {
        match self {
            Method::GET => "get",
            Method::POST => "post",
            Method::PUT => "put",
            Method::PATCH => "patch",
            Method::DELETE => "delete",
        }
    }

    /// Verbs that conventionally carry a JSON body
    pub fn carries_body(&self) -> bool {
        matches!(
            self,
            Method::POST | Method::PUT | Method::PATCH | Method::DELETE
        )
    }
}

impl fmt::Display for Method {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Method {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "get" => Ok(Method::GET),
            "post" => Ok(Method::POST),
            "put" => Ok(Method::PUT),
            "patch" => Ok(Method::PATCH),
            "delete" => Ok(Method::DELETE),
            _ => Err(Error::InvalidMethod {
                method: s.to_string(),
            }),
        }
    }
}

impl From<Method> for reqwest::Method {
    fn from(method: Method) -> Self {
        match method {
            Method::GET => reqwest::Method::GET,
            Method::POST => reqwest::Method::POST,
            Method::PUT => reqwest::Method::PUT,
            Method::PATCH => reqwest::Method::PATCH,
            Method::DELETE => reqwest::Method::DELETE,
        }
    }
}

// ============================================================================
// Parameter Values
// ============================================================================

/// A query or form parameter value
///
/// `Null` and empty strings are never rendered; booleans render as the
/// literal strings `true` / `false`.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum ParamValue {
    #[default]
    Null,
    Str(String),
    Int(i64),
    Bool(bool),
}

impl ParamValue {
    /// Wire representation, or `None` when the parameter must be left out
    pub fn render(&self) -> Option<String> {
        match self {
            ParamValue::Null => None,
            ParamValue::Str(s) if s.is_empty() => None,
            ParamValue::Str(s) => Some(s.clone()),
            ParamValue::Int(n) => Some(n.to_string()),
            ParamValue::Bool(b) => Some(if *b { "true" } else { "false" }.to_string()),
        }
    }

    /// Check if this value is null
    pub fn is_null(&self) -> bool {
        matches!(self, ParamValue::Null)
    }
}

impl From<&str> for ParamValue {
    fn from(value: &str) -> Self {
        ParamValue::Str(value.to_string())
    }
}

impl From<String> for ParamValue {
    fn from(value: String) -> Self {
        ParamValue::Str(value)
    }
}

impl From<&String> for ParamValue {
    fn from(value: &String) -> Self {
        ParamValue::Str(value.clone())
    }
}

impl From<bool> for ParamValue {
    fn from(value: bool) -> Self {
        ParamValue::Bool(value)
    }
}

macro_rules! impl_int_param {
    ($($ty:ty),*) => {
        $(
            impl From<$ty> for ParamValue {
                fn from(value: $ty) -> Self {
                    ParamValue::Int(value as i64)
                }
            }
        )*
    };
}

impl_int_param!(i32, i64, u32, u64, usize);

impl<T: Into<ParamValue>> From<Option<T>> for ParamValue {
    fn from(value: Option<T>) -> Self {
        value.map_or(ParamValue::Null, Into::into)
    }
}

impl From<&JsonValue> for ParamValue {
    fn from(value: &JsonValue) -> Self {
        match value {
            JsonValue::Null => ParamValue::Null,
            JsonValue::Bool(b) => ParamValue::Bool(*b),
            JsonValue::Number(n) => n
                .as_i64()
                .map_or_else(|| ParamValue::Str(n.to_string()), ParamValue::Int),
            JsonValue::String(s) => ParamValue::Str(s.clone()),
            other => ParamValue::Str(other.to_string()),
        }
    }
}

/// Ordered name/value pairs with replace-on-insert semantics
///
/// Keeps the first-insertion position of each key so that rendered query
/// strings are stable.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct OrderedParams<V> {
    entries: Vec<(String, V)>,
}

impl<V> OrderedParams<V> {
    /// Create an empty set of parameters
    pub fn new() -> Self {
        Self {
            entries: Vec::new(),
        }
    }

    /// Insert or replace a value
    pub fn set(&mut self, key: impl Into<String>, value: V) {
        let key = key.into();
        if let Some(slot) = self.entries.iter_mut().find(|(k, _)| *k == key) {
            slot.1 = value;
        } else {
            self.entries.push((key, value));
        }
    }

    /// Look up a value by key
    pub fn get(&self, key: &str) -> Option<&V> {
        self.entries.iter().find(|(k, _)| k == key).map(|(_, v)| v)
    }

    /// Remove a key entirely
    pub fn remove(&mut self, key: &str) -> Option<V> {
        let idx = self.entries.iter().position(|(k, _)| k == key)?;
        Some(self.entries.remove(idx).1)
    }

    /// Iterate in insertion order
    pub fn iter(&self) -> impl Iterator<Item = (&str, &V)> {
        self.entries.iter().map(|(k, v)| (k.as_str(), v))
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_method_parse_is_case_insensitive() {
        assert_eq!("GET".parse::<Method>().unwrap(), Method::GET);
        assert_eq!("Patch".parse::<Method>().unwrap(), Method::PATCH);
        assert_eq!(" delete ".parse::<Method>().unwrap(), Method::DELETE);
        assert!("TRACE".parse::<Method>().is_err());
    }

    #[test]
    fn test_method_as_str_is_lower_case() {
        assert_eq!(Method::POST.as_str(), "post");
        assert_eq!(Method::GET.to_string(), "get");
    }

    #[test]
    fn test_method_carries_body() {
        assert!(!Method::GET.carries_body());
        assert!(Method::POST.carries_body());
        assert!(Method::PUT.carries_body());
        assert!(Method::PATCH.carries_body());
        assert!(Method::DELETE.carries_body());
    }

    #[test]
    fn test_param_value_render() {
        assert_eq!(ParamValue::Null.render(), None);
        assert_eq!(ParamValue::from("").render(), None);
        assert_eq!(ParamValue::from("abc").render(), Some("abc".to_string()));
        assert_eq!(ParamValue::from(42).render(), Some("42".to_string()));
        assert_eq!(ParamValue::from(true).render(), Some("true".to_string()));
        assert_eq!(ParamValue::from(false).render(), Some("false".to_string()));
        assert_eq!(ParamValue::from(None::<&str>).render(), None);
        assert_eq!(
            ParamValue::from(Some(0u32)).render(),
            Some("0".to_string())
        );
    }

    #[test]
    fn test_param_value_from_json() {
        assert_eq!(ParamValue::from(&json!(null)), ParamValue::Null);
        assert_eq!(ParamValue::from(&json!(true)), ParamValue::Bool(true));
        assert_eq!(ParamValue::from(&json!(7)), ParamValue::Int(7));
        assert_eq!(
            ParamValue::from(&json!(1.5)),
            ParamValue::Str("1.5".to_string())
        );
        assert_eq!(
            ParamValue::from(&json!("x")),
            ParamValue::Str("x".to_string())
        );
    }

    #[test]
    fn test_ordered_params_replace_keeps_position() {
        let mut params = OrderedParams::new();
        params.set("a", 1);
        params.set("b", 2);
        params.set("a", 3);

        let collected: Vec<_> = params.iter().collect();
        assert_eq!(collected, vec![("a", &3), ("b", &2)]);
        assert_eq!(params.len(), 2);

        assert_eq!(params.remove("a"), Some(3));
        assert_eq!(params.get("a"), None);
        assert!(!params.is_empty());
    }
}
