//! Mapping transformations -- flatten, merge, and key filtering.
//!
//! All three operations work on `serde_json` objects and return newly built
//! maps; the inputs are only ever borrowed. Objects keep insertion order
//! (`preserve_order`), so "input order" below means the order keys were
//! inserted into the source map.
//!
//! # Composite keys
//!
//! [`flatten`] joins the path of keys from the root to each leaf with a
//! separator. A key that itself contains the separator can collide with a
//! genuinely nested path:
//!
//! ```
//! use dataproc_core::{flatten, DEFAULT_SEPARATOR};
//! use serde_json::json;
//!
//! let value = json!({"a.b": 1, "a": {"b": 2}});
//! let flat = flatten(&value, DEFAULT_SEPARATOR);
//! assert_eq!(flat.len(), 1);
//! assert_eq!(flat["a.b"], json!(2));
//! ```
//!
//! The later-visited path wins and keeps the position of the first one.

use std::collections::HashSet;

use serde_json::{Map, Value};
use tracing::trace;

/// Separator used to join nested keys when the caller has no preference.
pub const DEFAULT_SEPARATOR: &str = ".";

/// Which side of the key set [`filter_keys`] keeps.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum FilterMode {
    /// Keep only entries whose key is in the key set.
    #[default]
    Include,
    /// Keep only entries whose key is not in the key set.
    Exclude,
}

impl FilterMode {
    /// `true` maps to [`FilterMode::Include`], `false` to [`FilterMode::Exclude`].
    pub fn from_include(include: bool) -> Self {
        if include {
            Self::Include
        } else {
            Self::Exclude
        }
    }

    fn keeps(self, is_member: bool) -> bool {
        match self {
            Self::Include => is_member,
            Self::Exclude => !is_member,
        }
    }
}

/// Flatten a nested JSON value into a single-level map of composite keys.
///
/// Objects are descended into; every other value (including arrays) is a
/// leaf and is recorded under the path of keys leading to it, joined with
/// `separator`. Traversal is depth-first pre-order in input key order.
///
/// - An empty object contributes no entry at all.
/// - A key is prefixed only when the path above it is non-empty, so top-level
///   keys appear bare and a child of an empty-string key appears bare too.
/// - A non-object input is a single leaf under the empty key `""`.
/// - When two paths produce the same composite key, the later one wins.
///
/// # Examples
///
/// ```
/// use dataproc_core::flatten;
/// use serde_json::json;
///
/// let value = json!({"user": {"name": "Alice", "age": 30}, "tags": ["x"]});
/// let flat = flatten(&value, "_");
/// assert_eq!(
///     serde_json::Value::Object(flat),
///     json!({"user_name": "Alice", "user_age": 30, "tags": ["x"]})
/// );
///
/// assert_eq!(serde_json::Value::Object(flatten(&json!(42), ".")), json!({"": 42}));
/// ```
pub fn flatten(value: &Value, separator: &str) -> Map<String, Value> {
    let mut result = Map::new();

    // Worklist of (node, accumulated prefix). Children are pushed in reverse
    // so that popping yields them in input order.
    let mut stack: Vec<(&Value, String)> = vec![(value, String::new())];

    while let Some((node, prefix)) = stack.pop() {
        match node {
            Value::Object(map) => {
                let start = stack.len();
                for (key, child) in map {
                    stack.push((child, join_key(&prefix, separator, key)));
                }
                stack[start..].reverse();
            }
            leaf => {
                trace!(key = %prefix, "flatten: leaf");
                result.insert(prefix, leaf.clone());
            }
        }
    }

    result
}

fn join_key(prefix: &str, separator: &str, key: &str) -> String {
    if prefix.is_empty() {
        return key.to_string();
    }
    let mut joined = String::with_capacity(prefix.len() + separator.len() + key.len());
    joined.push_str(prefix);
    joined.push_str(separator);
    joined.push_str(key);
    joined
}

/// Merge a sequence of maps into one, later maps overriding earlier ones.
///
/// `None` entries and empty maps are skipped. The merge is shallow: a nested
/// object value replaces the previous value for that key wholesale. A key
/// keeps the position where it was first seen and the value from the last
/// map that defines it.
///
/// # Examples
///
/// ```
/// use dataproc_core::merge;
/// use serde_json::json;
///
/// let a = json!({"a": 1}).as_object().cloned().unwrap();
/// let b = json!({"b": 2}).as_object().cloned().unwrap();
/// let c = json!({"a": 3}).as_object().cloned().unwrap();
///
/// let merged = merge([Some(&a), Some(&b), None, Some(&c)]);
/// assert_eq!(serde_json::Value::Object(merged), json!({"a": 3, "b": 2}));
/// ```
pub fn merge<'a, I>(maps: I) -> Map<String, Value>
where
    I: IntoIterator<Item = Option<&'a Map<String, Value>>>,
{
    let mut result = Map::new();
    for map in maps.into_iter().flatten() {
        for (key, value) in map {
            result.insert(key.clone(), value.clone());
        }
    }
    result
}

/// Keep or drop entries of `map` according to membership of their key in `keys`.
///
/// Keys in `keys` that are absent from `map` are ignored, and the result keeps
/// the order of `map`. With an empty key set, [`FilterMode::Include`] yields an
/// empty map and [`FilterMode::Exclude`] a full copy.
///
/// # Examples
///
/// ```
/// use dataproc_core::{filter_keys, FilterMode};
/// use serde_json::json;
///
/// let data = json!({"a": 1, "b": 2, "c": 3}).as_object().cloned().unwrap();
///
/// let kept = filter_keys(&data, &["a", "b", "z"], FilterMode::Include);
/// assert_eq!(serde_json::Value::Object(kept), json!({"a": 1, "b": 2}));
///
/// let rest = filter_keys(&data, &["c"], FilterMode::Exclude);
/// assert_eq!(serde_json::Value::Object(rest), json!({"a": 1, "b": 2}));
/// ```
pub fn filter_keys<S: AsRef<str>>(
    map: &Map<String, Value>,
    keys: &[S],
    mode: FilterMode,
) -> Map<String, Value> {
    let key_set: HashSet<&str> = keys.iter().map(AsRef::as_ref).collect();

    map.iter()
        .filter(|(key, _)| mode.keeps(key_set.contains(key.as_str())))
        .map(|(key, value)| (key.clone(), value.clone()))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn join_key_skips_separator_for_empty_prefix() {
        assert_eq!(join_key("", ".", "a"), "a");
        assert_eq!(join_key("a", ".", "b"), "a.b");
        assert_eq!(join_key("a", "::", ""), "a::");
    }

    #[test]
    fn filter_mode_from_include() {
        assert_eq!(FilterMode::from_include(true), FilterMode::Include);
        assert_eq!(FilterMode::from_include(false), FilterMode::Exclude);
        assert_eq!(FilterMode::default(), FilterMode::Include);
    }

    #[test]
    fn flatten_survives_deep_nesting() {
        let mut value = json!(1);
        for _ in 0..10_000 {
            value = json!({ "k": value });
        }
        let flat = flatten(&value, "");
        assert_eq!(flat.len(), 1);
        assert_eq!(flat["k".repeat(10_000).as_str()], json!(1));
        // Dropping a value this deep recurses once per level.
        std::mem::forget(value);
    }
}
