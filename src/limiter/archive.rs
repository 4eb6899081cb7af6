//! Writes the full, unlimited response to disk so the agent can read it later.
//!
//! Files land at `{dir}/{tool}{params}_{timestamp}.json`. Concurrent writers to
//! the same directory are not coordinated; the millisecond timestamp keeps
//! collisions unlikely.

use chrono::{DateTime, SecondsFormat, Utc};
use regex::Regex;
use serde_json::{Map, Value};
use std::fs;
use std::path::Path;
use std::sync::LazyLock;
use tracing::info;

use crate::error::ArchiveError;
use crate::types::{ArchiveResult, SAVE_DIR_PARAM};

static UNSAFE_FILENAME_CHARS: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"[^A-Za-z0-9_=-]").unwrap());

/// Longest parameter value (in chars) carried into a filename.
const MAX_PARAM_VALUE_CHARS: usize = 30;

/// Archive `value` under `dir`, stamped with the current time.
pub fn archive_raw_data(
    value: &Value,
    dir: &Path,
    tool_name: &str,
    parameters: Option<&Map<String, Value>>,
) -> Result<ArchiveResult, ArchiveError> {
    archive_raw_data_at(value, dir, tool_name, parameters, Utc::now())
}

/// Archive `value` under `dir` using `now` for the filename timestamp.
pub fn archive_raw_data_at(
    value: &Value,
    dir: &Path,
    tool_name: &str,
    parameters: Option<&Map<String, Value>>,
    now: DateTime<Utc>,
) -> Result<ArchiveResult, ArchiveError> {
    fs::create_dir_all(dir).map_err(|source| ArchiveError::CreateDir {
        path: dir.to_path_buf(),
        source,
    })?;
    let dir = std::path::absolute(dir).map_err(|source| ArchiveError::Resolve {
        path: dir.to_path_buf(),
        source,
    })?;

    let file_name = format!(
        "{}{}_{}.json",
        tool_name,
        sanitize_parameters(parameters),
        archive_timestamp(now)
    );
    let path = dir.join(file_name);

    let contents = serde_json::to_string_pretty(value)?;
    fs::write(&path, contents).map_err(|source| ArchiveError::Write {
        path: path.clone(),
        source,
    })?;

    let byte_size = fs::metadata(&path)
        .map_err(|source| ArchiveError::Metadata {
            path: path.clone(),
            source,
        })?
        .len();

    info!(path = %path.display(), byte_size, tool = tool_name, "Archived raw response");
    Ok(ArchiveResult {
        file_path: path,
        byte_size,
    })
}

/// Filename fragment describing the call parameters, e.g. `_featured=true_first=10`.
///
/// `raw_data_save_dir` and null values are skipped, values are cut to 30
/// chars, and anything outside `[A-Za-z0-9_=-]` becomes `-`. Empty when no
/// parameter qualifies.
pub fn sanitize_parameters(parameters: Option<&Map<String, Value>>) -> String {
    let Some(parameters) = parameters else {
        return String::new();
    };

    let entries: Vec<String> = parameters
        .iter()
        .filter(|(key, value)| key.as_str() != SAVE_DIR_PARAM && !value.is_null())
        .map(|(key, value)| {
            let text = match value {
                Value::String(s) => s.clone(),
                other => other.to_string(),
            };
            let text: String = text.chars().take(MAX_PARAM_VALUE_CHARS).collect();
            format!("{key}={text}")
        })
        .collect();

    if entries.is_empty() {
        return String::new();
    }

    let joined = format!("_{}", entries.join("_"));
    UNSAFE_FILENAME_CHARS.replace_all(&joined, "-").into_owned()
}

/// ISO-8601 instant with `:` and `.` swapped for `-`: `2025-01-31T12-34-56-789Z`.
pub fn archive_timestamp(now: DateTime<Utc>) -> String {
    now.to_rfc3339_opts(SecondsFormat::Millis, true)
        .replace([':', '.'], "-")
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;
    use serde_json::json;
    use tempfile::TempDir;

    fn params(value: Value) -> Map<String, Value> {
        value.as_object().unwrap().clone()
    }

    fn fixed_time() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2025, 1, 31, 12, 34, 56).unwrap()
            + chrono::Duration::milliseconds(789)
    }

    #[test]
    fn test_timestamp_format() {
        assert_eq!(archive_timestamp(fixed_time()), "2025-01-31T12-34-56-789Z");
    }

    #[test]
    fn test_sanitize_basic() {
        let p = params(json!({ "featured": true, "first": 10 }));
        assert_eq!(sanitize_parameters(Some(&p)), "_featured=true_first=10");
    }

    #[test]
    fn test_sanitize_skips_save_dir_and_nulls() {
        let p = params(json!({
            "raw_data_save_dir": "/tmp/out",
            "after": null,
            "topic": "ai"
        }));
        assert_eq!(sanitize_parameters(Some(&p)), "_topic=ai");
    }

    #[test]
    fn test_sanitize_empty() {
        assert_eq!(sanitize_parameters(None), "");
        let only_dir = params(json!({ "raw_data_save_dir": "/tmp/out" }));
        assert_eq!(sanitize_parameters(Some(&only_dir)), "");
    }

    #[test]
    fn test_sanitize_replaces_unsafe_chars() {
        let p = params(json!({ "query": "rust lang/🦀", "postedAfter": "2025-01-01T00:00:00Z" }));
        assert_eq!(
            sanitize_parameters(Some(&p)),
            "_query=rust-lang--_postedAfter=2025-01-01T00-00-00Z"
        );
    }

    #[test]
    fn test_sanitize_truncates_long_values() {
        let long = "a".repeat(50);
        let p = params(json!({ "slug": long }));
        assert_eq!(sanitize_parameters(Some(&p)), format!("_slug={}", "a".repeat(30)));
    }

    #[test]
    fn test_archive_writes_file() {
        let tmp = TempDir::new().unwrap();
        let dir = tmp.path().join("nested").join("dumps");
        let value = json!({ "posts": [1, 2, 3] });
        let p = params(json!({ "first": 3, "raw_data_save_dir": dir.to_string_lossy() }));

        let result = archive_raw_data_at(&value, &dir, "get_posts", Some(&p), fixed_time()).unwrap();

        assert!(result.file_path.is_absolute());
        assert_eq!(
            result.file_path.file_name().unwrap().to_string_lossy(),
            "get_posts_first=3_2025-01-31T12-34-56-789Z.json"
        );
        let written = fs::read_to_string(&result.file_path).unwrap();
        assert_eq!(result.byte_size, written.len() as u64);
        assert_eq!(serde_json::from_str::<Value>(&written).unwrap(), value);
    }

    #[test]
    fn test_archive_reports_write_failure() {
        let tmp = TempDir::new().unwrap();
        let target = tmp.path().join("get_posts_2025-01-31T12-34-56-789Z.json");
        fs::create_dir(&target).unwrap();

        let err = archive_raw_data_at(&json!([1]), tmp.path(), "get_posts", None, fixed_time())
            .unwrap_err();
        match err {
            ArchiveError::Write { path, .. } => assert_eq!(path, target),
            other => panic!("expected write error, got {other:?}"),
        }
    }

    #[test]
    fn test_archive_reports_create_dir_failure() {
        let tmp = TempDir::new().unwrap();
        let blocker = tmp.path().join("not-a-dir");
        fs::write(&blocker, "x").unwrap();

        let err = archive_raw_data(&json!([]), &blocker.join("sub"), "t", None).unwrap_err();
        assert!(matches!(err, ArchiveError::CreateDir { .. }));
    }
}
