//! WASM bindings for dataproc-core.
//!
//! Exposes the mapping operations and validators as `#[wasm_bindgen]`
//! functions callable from JavaScript/TypeScript. Objects cross the boundary
//! as JSON strings; failures are thrown as JS errors carrying the message.
//!
//! ## Build process
//!
//! ```sh
//! cargo build -p dataproc-wasm --target wasm32-unknown-unknown --release
//! wasm-bindgen --target nodejs --out-dir pkg/ \
//!   target/wasm32-unknown-unknown/release/dataproc_wasm.wasm
//! ```

use dataproc_core::{Country, FilterMode};
use serde_json::{Map, Value};
use wasm_bindgen::prelude::*;

fn js_error(e: impl std::fmt::Display) -> JsValue {
    JsValue::from_str(&e.to_string())
}

fn parse(json: &str) -> Result<Value, JsValue> {
    dataproc_core::try_parse_json(json).map_err(js_error)
}

fn dump(map: &Map<String, Value>) -> Result<String, JsValue> {
    dataproc_core::to_json(map, false).map_err(js_error)
}

/// Flatten a nested JSON object into a single-level object with joined keys.
#[wasm_bindgen]
pub fn flatten(json: &str, separator: &str) -> Result<String, JsValue> {
    dump(&dataproc_core::flatten(&parse(json)?, separator))
}

/// Merge a JSON array of objects (or nulls); later entries win.
#[wasm_bindgen]
pub fn merge(json_array: &str) -> Result<String, JsValue> {
    let documents = match parse(json_array)? {
        Value::Array(items) => items,
        _ => return Err(JsValue::from_str("expected a JSON array of objects")),
    };
    let maps = documents
        .iter()
        .enumerate()
        .map(|(i, doc)| dataproc_core::as_object(doc, i).map_err(js_error))
        .collect::<Result<Vec<_>, JsValue>>()?;
    dump(&dataproc_core::merge(maps))
}

/// Keep (`include = true`) or drop the given top-level keys of a JSON object.
#[wasm_bindgen(js_name = filterKeys)]
pub fn filter_keys(json: &str, keys: Vec<String>, include: bool) -> Result<String, JsValue> {
    let value = parse(json)?;
    let map = value
        .as_object()
        .ok_or_else(|| JsValue::from_str("expected a JSON object"))?;
    dump(&dataproc_core::filter_keys(
        map,
        &keys,
        FilterMode::from_include(include),
    ))
}

/// Split one delimited line; returns the trimmed fields as a JSON array string.
#[wasm_bindgen(js_name = parseCsvLine)]
pub fn parse_csv_line(line: &str, delimiter: &str) -> Result<String, JsValue> {
    let fields = dataproc_core::parse_csv_line(line, delimiter).map_err(js_error)?;
    dataproc_core::to_json(&fields, false).map_err(js_error)
}

#[wasm_bindgen(js_name = validateEmail)]
pub fn validate_email(email: &str) -> bool {
    dataproc_core::validate_email(email)
}

/// `country_code` is "CN" or "US"; other codes are treated as "CN".
#[wasm_bindgen(js_name = validatePhone)]
pub fn validate_phone(phone: &str, country_code: &str) -> bool {
    dataproc_core::validate_phone(phone, Country::from_code(country_code))
}
