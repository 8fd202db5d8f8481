//! Error types for data processing operations.

use serde_json::{Map, Value};
use thiserror::Error;

/// Errors that can occur in the fallible helpers of this crate.
///
/// The mapping operations in [`crate::dict`] have no failure mode; errors only
/// arise at the text boundaries (JSON, CSV) and when a caller lifts a parsed
/// document into a mapping.
#[derive(Error, Debug)]
pub enum DataError {
    /// The input text was not valid JSON, or serialization failed.
    #[error("JSON error: {0}")]
    JsonParse(#[from] serde_json::Error),

    /// Serialized output could not be turned into text.
    #[error("Encoding error: {0}")]
    Encode(String),

    /// A CSV line cannot be split on an empty delimiter.
    #[error("CSV delimiter must not be empty")]
    EmptyDelimiter,

    /// A document expected to be a mapping (or `null`) was some other value.
    #[error("expected a JSON object at position {position}, found {found}")]
    NotAnObject { position: usize, found: &'static str },
}

/// Convenience alias used throughout dataproc-core.
pub type Result<T> = std::result::Result<T, DataError>;

/// View a JSON document as an optional mapping.
///
/// `null` is treated as an absent mapping (`None`), an object is borrowed as-is,
/// and any other value is rejected. `position` is reported in the error so
/// callers handling several documents can point at the offending one.
///
/// # Examples
///
/// ```
/// use dataproc_core::as_object;
/// use serde_json::json;
///
/// assert!(as_object(&json!(null), 0).unwrap().is_none());
/// assert!(as_object(&json!({"a": 1}), 0).unwrap().is_some());
/// assert!(as_object(&json!([1, 2]), 3).is_err());
/// ```
pub fn as_object(value: &Value, position: usize) -> Result<Option<&Map<String, Value>>> {
    match value {
        Value::Null => Ok(None),
        Value::Object(map) => Ok(Some(map)),
        other => Err(DataError::NotAnObject {
            position,
            found: kind_name(other),
        }),
    }
}

fn kind_name(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}
