//! # dataproc-core
//!
//! Small, stateless data-transformation and validation utilities built on
//! `serde_json::Value`.
//!
//! Every operation is a pure function of its arguments: nothing is mutated,
//! nothing is cached between calls, and results are owned by the caller.
//!
//! ## Quick start
//!
//! ```rust
//! use dataproc_core::{filter_keys, flatten, merge, FilterMode, DEFAULT_SEPARATOR};
//! use serde_json::json;
//!
//! let nested = json!({"user": {"name": "Alice", "age": 30}});
//! let flat = flatten(&nested, DEFAULT_SEPARATOR);
//! assert_eq!(serde_json::Value::Object(flat.clone()), json!({"user.name": "Alice", "user.age": 30}));
//!
//! let extra = json!({"user.age": 31}).as_object().cloned().unwrap();
//! let merged = merge([Some(&flat), Some(&extra)]);
//! assert_eq!(merged["user.age"], json!(31));
//!
//! let only_name = filter_keys(&merged, &["user.name"], FilterMode::Include);
//! assert_eq!(serde_json::Value::Object(only_name), json!({"user.name": "Alice"}));
//! ```
//!
//! ## Modules
//!
//! - [`dict`] — flatten nested mappings, right-biased merge, key filtering
//! - [`json`] — JSON text parse / serialize wrappers
//! - [`csv`] — single-line delimited field splitting
//! - [`validate`] — email and phone number format checks
//! - [`error`] — Error types

pub mod csv;
pub mod dict;
pub mod error;
pub mod json;
pub mod validate;

pub use csv::{parse_csv_line, DEFAULT_DELIMITER};
pub use dict::{filter_keys, flatten, merge, FilterMode, DEFAULT_SEPARATOR};
pub use error::{as_object, DataError};
pub use json::{parse_json, to_json, try_parse_json};
pub use validate::{validate_email, validate_phone, Country};
