//! Property bags carried by nodes.
//!
//! Props are plain JSON objects. Key order is insertion order, so a settings
//! panel and the persisted form list properties the way the block declared them.

use serde_json::{Map, Value};

/// Ordered mapping from property name to value
pub type Props = Map<String, Value>;

/// Shallow merge: every key in `overrides` replaces the same key in `base`.
///
/// Nested values (lists of services, gallery images) are replaced whole, never
/// merged element by element.
pub fn merge_props(base: &Props, overrides: &Props) -> Props {
    let mut merged = base.clone();
    for (key, value) in overrides {
        merged.insert(key.clone(), value.clone());
    }
    merged
}

pub fn prop_str<'a>(props: &'a Props, key: &str) -> Option<&'a str> {
    props.get(key).and_then(Value::as_str)
}

/// Numeric prop. Numeric strings ("24") are accepted since settings inputs
/// often store what the user typed.
pub fn prop_f64(props: &Props, key: &str) -> Option<f64> {
    match props.get(key)? {
        Value::Number(n) => n.as_f64(),
        Value::String(s) => s.trim().parse().ok(),
        _ => None,
    }
}

pub fn prop_bool(props: &Props, key: &str) -> Option<bool> {
    props.get(key).and_then(Value::as_bool)
}

pub fn prop_list<'a>(props: &'a Props, key: &str) -> &'a [Value] {
    props
        .get(key)
        .and_then(Value::as_array)
        .map(Vec::as_slice)
        .unwrap_or(&[])
}
