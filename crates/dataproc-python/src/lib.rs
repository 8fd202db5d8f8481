//! # dataproc-python
//!
//! Python bindings for dataproc-core, built with PyO3.
//!
//! Exposes the following functions to Python as the `dataprocessor` module.
//! Mappings cross the boundary as JSON text:
//!
//! - `parse_json(text)` -- normalized JSON string, or `None` if invalid
//! - `to_json(json, pretty=False)` -- re-serialize JSON text
//! - `parse_csv_line(line, delimiter=",")` -- list of trimmed fields
//! - `validate_email(email)` / `validate_phone(phone, country_code="CN")`
//! - `flatten_dict(json, separator=".")` -- flattened JSON object
//! - `merge_dicts(*jsons)` -- right-biased merge of JSON objects (`None` skipped)
//! - `filter_dict_keys(json, keys, include=True)` -- key subset / complement

use dataproc_core::{Country, FilterMode, DEFAULT_DELIMITER, DEFAULT_SEPARATOR};
use pyo3::exceptions::PyValueError;
use pyo3::prelude::*;
use pyo3::types::PyTuple;
use serde_json::{Map, Value};

fn value_error(e: impl std::fmt::Display) -> PyErr {
    PyValueError::new_err(e.to_string())
}

/// Parse JSON text into an object, rejecting anything else.
fn parse_object(json: &str) -> PyResult<Map<String, Value>> {
    match dataproc_core::try_parse_json(json).map_err(value_error)? {
        Value::Object(map) => Ok(map),
        _ => Err(PyValueError::new_err("expected a JSON object")),
    }
}

fn dump(value: &impl serde::Serialize) -> PyResult<String> {
    dataproc_core::to_json(value, false).map_err(value_error)
}

/// Parse a JSON string and return it in normalized form.
///
/// Args:
///     text: Any JSON text.
///
/// Returns:
///     The normalized JSON string, or None if the text is not valid JSON.
#[pyfunction]
fn parse_json(text: &str) -> Option<String> {
    dataproc_core::parse_json(text).and_then(|v| dataproc_core::to_json(&v, false).ok())
}

/// Re-serialize a JSON string.
///
/// Args:
///     json: A valid JSON string.
///     pretty: Indent with two spaces when True.
///
/// Returns:
///     The JSON string. Non-ASCII characters are kept as-is.
///
/// Raises:
///     ValueError: If the input is not valid JSON.
#[pyfunction]
#[pyo3(signature = (json, pretty=false))]
fn to_json(json: &str, pretty: bool) -> PyResult<String> {
    let value = dataproc_core::try_parse_json(json).map_err(value_error)?;
    dataproc_core::to_json(&value, pretty).map_err(value_error)
}

/// Split a single delimited line into trimmed fields.
///
/// Raises:
///     ValueError: If the delimiter is empty.
#[pyfunction]
#[pyo3(signature = (line, delimiter=DEFAULT_DELIMITER))]
fn parse_csv_line(line: &str, delimiter: &str) -> PyResult<Vec<String>> {
    dataproc_core::parse_csv_line(line, delimiter).map_err(value_error)
}

/// Return True if the string looks like an email address.
#[pyfunction]
fn validate_email(email: &str) -> bool {
    dataproc_core::validate_email(email)
}

/// Return True if the string is a valid phone number for the country.
///
/// Args:
///     phone: Phone number; spaces, hyphens and parentheses are ignored.
///     country_code: "CN" or "US". Other codes are treated as "CN".
#[pyfunction]
#[pyo3(signature = (phone, country_code="CN"))]
fn validate_phone(phone: &str, country_code: &str) -> bool {
    dataproc_core::validate_phone(phone, Country::from_code(country_code))
}

/// Flatten a nested JSON object into composite keys.
///
/// Raises:
///     ValueError: If the input is not valid JSON.
#[pyfunction]
#[pyo3(signature = (json, separator=DEFAULT_SEPARATOR))]
fn flatten_dict(json: &str, separator: &str) -> PyResult<String> {
    let value = dataproc_core::try_parse_json(json).map_err(value_error)?;
    dump(&dataproc_core::flatten(&value, separator))
}

/// Merge JSON objects; later arguments override earlier ones.
///
/// Arguments that are None, empty strings or the JSON literal null are skipped.
///
/// Raises:
///     ValueError: If an argument is not a JSON object.
#[pyfunction]
#[pyo3(signature = (*jsons))]
fn merge_dicts(jsons: &Bound<'_, PyTuple>) -> PyResult<String> {
    let mut documents = Vec::with_capacity(jsons.len());
    for item in jsons.iter() {
        let text: Option<String> = item.extract()?;
        let document = match text.as_deref() {
            None | Some("") => Value::Null,
            Some(text) => dataproc_core::try_parse_json(text).map_err(value_error)?,
        };
        documents.push(document);
    }

    let maps = documents
        .iter()
        .enumerate()
        .map(|(i, doc)| dataproc_core::as_object(doc, i).map_err(value_error))
        .collect::<PyResult<Vec<_>>>()?;
    dump(&dataproc_core::merge(maps))
}

/// Keep (include=True) or drop (include=False) the given top-level keys.
///
/// Raises:
///     ValueError: If the input is not a JSON object.
#[pyfunction]
#[pyo3(signature = (json, keys, include=true))]
fn filter_dict_keys(json: &str, keys: Vec<String>, include: bool) -> PyResult<String> {
    let map = parse_object(json)?;
    let filtered = dataproc_core::filter_keys(&map, &keys, FilterMode::from_include(include));
    dump(&filtered)
}

/// The `dataprocessor` Python module, implemented in Rust via PyO3.
#[pymodule]
fn dataprocessor(m: &Bound<'_, PyModule>) -> PyResult<()> {
    m.add("__version__", env!("CARGO_PKG_VERSION"))?;
    m.add_function(wrap_pyfunction!(parse_json, m)?)?;
    m.add_function(wrap_pyfunction!(to_json, m)?)?;
    m.add_function(wrap_pyfunction!(parse_csv_line, m)?)?;
    m.add_function(wrap_pyfunction!(validate_email, m)?)?;
    m.add_function(wrap_pyfunction!(validate_phone, m)?)?;
    m.add_function(wrap_pyfunction!(flatten_dict, m)?)?;
    m.add_function(wrap_pyfunction!(merge_dicts, m)?)?;
    m.add_function(wrap_pyfunction!(filter_dict_keys, m)?)?;
    Ok(())
}
