//! Single-line delimited field splitting.
//!
//! No quoting or escaping is recognised, and input is one line at a time.

use crate::error::{DataError, Result};

/// Field delimiter used when the caller has no preference.
pub const DEFAULT_DELIMITER: &str = ",";

/// Split one line on `delimiter` and trim whitespace around every field.
///
/// An empty line has no fields. A line without the delimiter is a single
/// field. Empty fields between adjacent delimiters are kept as `""`.
///
/// # Examples
///
/// ```
/// use dataproc_core::parse_csv_line;
///
/// assert_eq!(parse_csv_line("apple, banana ,cherry", ",").unwrap(), ["apple", "banana", "cherry"]);
/// assert_eq!(parse_csv_line("a||b", "|").unwrap(), ["a", "", "b"]);
/// assert!(parse_csv_line("", ",").unwrap().is_empty());
/// ```
///
/// # Errors
///
/// Returns [`DataError::EmptyDelimiter`] if `delimiter` is empty and the line
/// is not.
pub fn parse_csv_line(line: &str, delimiter: &str) -> Result<Vec<String>> {
    if line.is_empty() {
        return Ok(Vec::new());
    }
    if delimiter.is_empty() {
        return Err(DataError::EmptyDelimiter);
    }
    Ok(line
        .split(delimiter)
        .map(|field| field.trim().to_string())
        .collect())
}
