//! Shape outline of a JSON value.
//!
//! ```text
//! Object
//! ├── totalCount: number
//! └── edges: Array[10]
//!     └── [0]: Object
//!         ├── id: string
//!         └── votes: number
//! ```
//!
//! Only element 0 of an array is expanded, so the outline stays small no
//! matter how many items the data holds.

use serde_json::Value;

use super::MAX_TRAVERSAL_DEPTH;

const BRANCH: &str = "├── ";
const LAST_BRANCH: &str = "└── ";
const PIPE: &str = "│   ";
const SPACE: &str = "    ";

/// Render the outline of `value`. Leaves show their type, never their content.
pub fn summarize_structure(value: &Value) -> String {
    let mut out = String::new();
    write_node(&mut out, value, "", 0);
    out
}

fn write_node(out: &mut String, value: &Value, prefix: &str, depth: usize) {
    if depth > MAX_TRAVERSAL_DEPTH {
        out.push_str("...");
        return;
    }

    match value {
        Value::Null => out.push_str("null"),
        Value::Bool(_) => out.push_str("boolean"),
        Value::Number(_) => out.push_str("number"),
        Value::String(_) => out.push_str("string"),
        Value::Array(items) => match items.first() {
            None => out.push_str("[]"),
            Some(first) => {
                out.push_str(&format!("Array[{}]", items.len()));
                write_child(out, "[0]", first, prefix, true, depth);
            }
        },
        Value::Object(map) if map.is_empty() => out.push_str("{}"),
        Value::Object(map) => {
            out.push_str("Object");
            let last = map.len() - 1;
            for (i, (key, child)) in map.iter().enumerate() {
                write_child(out, key, child, prefix, i == last, depth);
            }
        }
    }
}

fn write_child(
    out: &mut String,
    label: &str,
    value: &Value,
    prefix: &str,
    is_last: bool,
    depth: usize,
) {
    let (connector, indent) = if is_last {
        (LAST_BRANCH, SPACE)
    } else {
        (BRANCH, PIPE)
    };

    out.push('\n');
    out.push_str(prefix);
    out.push_str(connector);
    out.push_str(label);
    out.push_str(": ");

    let child_prefix = format!("{prefix}{indent}");
    write_node(out, value, &child_prefix, depth + 1);
}
