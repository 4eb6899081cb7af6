//! Finds the array field that blows the budget.

use serde_json::{Map, Value};
use tracing::debug;

use super::MAX_TRAVERSAL_DEPTH;
use crate::types::{FieldLocation, ROOT_PATH};

/// Locate the first array with more than `threshold` items.
///
/// A root array is checked first. For objects, every direct field is checked
/// (in key order) before any nested object is searched, so an oversized
/// top-level field always wins over a deeper one. Nested objects are then
/// searched in key order with the same rule. Arrays are never searched into.
pub fn find_large_array_field(value: &Value, threshold: usize) -> Option<FieldLocation<'_>> {
    let found = match value {
        Value::Array(items) if items.len() > threshold => Some(FieldLocation {
            path: ROOT_PATH.to_string(),
            segments: Vec::new(),
            array: items,
            parent: None,
            key: "",
        }),
        Value::Object(map) => search_object(map, threshold, &mut Vec::new(), 1),
        _ => None,
    };

    if let Some(location) = &found {
        debug!(path = %location.path, count = location.len(), threshold, "Found oversized array field");
    }
    found
}

fn search_object<'a>(
    map: &'a Map<String, Value>,
    threshold: usize,
    ancestors: &mut Vec<&'a str>,
    depth: usize,
) -> Option<FieldLocation<'a>> {
    for (key, child) in map {
        if let Value::Array(items) = child {
            if items.len() > threshold {
                let mut segments = ancestors.clone();
                segments.push(key.as_str());
                return Some(FieldLocation {
                    path: segments.join("."),
                    segments,
                    array: items,
                    parent: Some(map),
                    key: key.as_str(),
                });
            }
        }
    }

    if depth >= MAX_TRAVERSAL_DEPTH {
        return None;
    }

    for (key, child) in map {
        if let Value::Object(nested) = child {
            ancestors.push(key.as_str());
            let found = search_object(nested, threshold, ancestors, depth + 1);
            ancestors.pop();
            if found.is_some() {
                return found;
            }
        }
    }

    None
}
