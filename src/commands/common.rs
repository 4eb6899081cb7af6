//! Common utilities shared across command modules.

use anyhow::{bail, Context, Result};
use serde_json::{Map, Value};
use std::io::Read;
use std::path::Path;

/// Read the response to process from `file`, or stdin when no file is given.
pub fn read_input(file: Option<&Path>) -> Result<Value> {
    let contents = match file {
        Some(path) => std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read {}", path.display()))?,
        None => {
            let mut buf = String::new();
            std::io::stdin()
                .read_to_string(&mut buf)
                .context("Failed to read stdin")?;
            buf
        }
    };

    serde_json::from_str(&contents).context("Input is not valid JSON")
}

/// Parse `key=value` pairs into a parameter map, keeping their order.
///
/// Values that parse as JSON keep their type (`first=10` is a number,
/// `featured=true` a boolean); anything else is taken as a string.
pub fn parse_params(pairs: &[String]) -> Result<Map<String, Value>> {
    let mut params = Map::new();
    for pair in pairs {
        let Some((key, raw)) = pair.split_once('=') else {
            bail!("Invalid parameter '{}': expected key=value", pair);
        };
        let key = key.trim();
        if key.is_empty() {
            bail!("Invalid parameter '{}': empty key", pair);
        }
        let value = serde_json::from_str::<Value>(raw).unwrap_or_else(|_| Value::String(raw.to_string()));
        params.insert(key.to_string(), value);
    }
    Ok(params)
}
