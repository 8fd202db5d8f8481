//! JSON text boundary -- thin wrappers over `serde_json`.
//!
//! Parsing comes in two flavours: [`parse_json`] swallows the error and
//! returns `None`, [`try_parse_json`] keeps it. Serialization via [`to_json`]
//! uses `", "` / `": "` separators in compact mode and a two-space indent in
//! pretty mode. Non-ASCII text is always written as-is.

use std::io;

use serde::Serialize;
use serde_json::ser::{Formatter, Serializer};
use serde_json::Value;
use tracing::debug;

use crate::error::{DataError, Result};

/// Parse JSON text, returning `None` if it is not valid JSON.
///
/// Any JSON value is accepted at the top level, not just objects.
///
/// # Examples
///
/// ```
/// use dataproc_core::parse_json;
/// use serde_json::json;
///
/// assert_eq!(parse_json(r#"{"name": "Alice", "age": 30}"#), Some(json!({"name": "Alice", "age": 30})));
/// assert_eq!(parse_json("{not json"), None);
/// ```
pub fn parse_json(text: &str) -> Option<Value> {
    match try_parse_json(text) {
        Ok(value) => Some(value),
        Err(err) => {
            debug!(error = %err, "parse_json: rejecting input");
            None
        }
    }
}

/// Parse JSON text, keeping the parse error.
///
/// # Errors
///
/// Returns [`DataError::JsonParse`] if the input is not valid JSON.
pub fn try_parse_json(text: &str) -> Result<Value> {
    Ok(serde_json::from_str(text)?)
}

/// Serialize `data` to JSON text.
///
/// # Examples
///
/// ```
/// use dataproc_core::to_json;
/// use serde_json::json;
///
/// assert_eq!(to_json(&json!({"name": "Bob", "tags": [1, 2]}), false).unwrap(),
///            r#"{"name": "Bob", "tags": [1, 2]}"#);
/// assert_eq!(to_json(&json!({"a": 1}), true).unwrap(), "{\n  \"a\": 1\n}");
/// ```
///
/// # Errors
///
/// Returns an error if `data`'s `Serialize` implementation fails (for example
/// a map with non-string keys).
pub fn to_json<T: Serialize + ?Sized>(data: &T, pretty: bool) -> Result<String> {
    if pretty {
        return Ok(serde_json::to_string_pretty(data)?);
    }

    let mut buf = Vec::with_capacity(128);
    let mut ser = Serializer::with_formatter(&mut buf, SpacedFormatter);
    data.serialize(&mut ser)?;
    String::from_utf8(buf).map_err(|e| DataError::Encode(e.to_string()))
}

/// Compact single-line output with a space after every `,` and `:`.
struct SpacedFormatter;

impl Formatter for SpacedFormatter {
    fn begin_array_value<W>(&mut self, writer: &mut W, first: bool) -> io::Result<()>
    where
        W: ?Sized + io::Write,
    {
        if first {
            Ok(())
        } else {
            writer.write_all(b", ")
        }
    }

    fn begin_object_key<W>(&mut self, writer: &mut W, first: bool) -> io::Result<()>
    where
        W: ?Sized + io::Write,
    {
        if first {
            Ok(())
        } else {
            writer.write_all(b", ")
        }
    }

    fn begin_object_value<W>(&mut self, writer: &mut W) -> io::Result<()>
    where
        W: ?Sized + io::Write,
    {
        writer.write_all(b": ")
    }
}
