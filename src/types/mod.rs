use garde::Validate;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use std::borrow::Cow;
use std::path::PathBuf;

use crate::error::ConfigError;

/// Threshold used when nothing else is configured.
pub const DEFAULT_MAX_ITEMS_FOR_CONTEXT: usize = 10;

/// Path reported when the oversized collection is the response itself.
pub const ROOT_PATH: &str = "root";

/// Tool-call argument that names the archive directory. Never part of archive filenames.
pub const SAVE_DIR_PARAM: &str = "raw_data_save_dir";

/// Tool name used in headers and filenames when the caller gives none.
pub const DEFAULT_TOOL_NAME: &str = "response";

/// Budget applied to every response: an array longer than
/// `max_items_for_context` is oversized and gets cut down to that many items.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Validate)]
pub struct BudgetConfig {
    #[garde(range(min = 1))]
    pub max_items_for_context: usize,
}

impl BudgetConfig {
    /// Build a validated config. Zero is rejected.
    pub fn new(max_items_for_context: usize) -> Result<Self, ConfigError> {
        let config = Self {
            max_items_for_context,
        };
        config
            .validate()
            .map_err(|e| ConfigError::Invalid(e.to_string()))?;
        Ok(config)
    }

    pub fn max_items(&self) -> usize {
        self.max_items_for_context
    }
}

impl Default for BudgetConfig {
    fn default() -> Self {
        Self {
            max_items_for_context: DEFAULT_MAX_ITEMS_FOR_CONTEXT,
        }
    }
}

/// On-disk config (`.jsonbudget/config.json` or the global one).
/// Every field is optional so partial files layer cleanly.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct FileConfig {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub max_items_for_context: Option<usize>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub raw_data_save_dir: Option<PathBuf>,
}

/// Where an oversized array sits inside a response.
#[derive(Debug, Clone, PartialEq)]
pub struct FieldLocation<'a> {
    /// Dotted key path (`data.posts.edges`), or [`ROOT_PATH`] for a root array.
    pub path: String,
    /// The keys making up `path`, kept separately so keys containing `.` stay unambiguous.
    pub segments: Vec<&'a str>,
    pub array: &'a [Value],
    /// Object owning the field; `None` when the array is the root value.
    pub parent: Option<&'a Map<String, Value>>,
    /// Field name inside `parent`; empty for the root.
    pub key: &'a str,
}

impl FieldLocation<'_> {
    pub fn is_root(&self) -> bool {
        self.parent.is_none()
    }

    pub fn len(&self) -> usize {
        self.array.len()
    }

    pub fn is_empty(&self) -> bool {
        self.array.is_empty()
    }
}

/// Outcome of limiting one response.
#[derive(Debug, Clone, PartialEq)]
pub struct LimitResult<'a> {
    /// Borrowed when nothing was limited, owned copy otherwise.
    pub limited_value: Cow<'a, Value>,
    /// Length of the limited array before truncation, 0 when nothing was limited.
    pub original_count: usize,
    pub was_limited: bool,
    pub limited_field_path: Option<String>,
}

impl<'a> LimitResult<'a> {
    pub(crate) fn unlimited(value: &'a Value) -> Self {
        Self {
            limited_value: Cow::Borrowed(value),
            original_count: 0,
            was_limited: false,
            limited_field_path: None,
        }
    }
}

/// A response written to disk in full.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ArchiveResult {
    /// Absolute path of the written file.
    pub file_path: PathBuf,
    /// Size reported by the filesystem after the write.
    pub byte_size: u64,
}

/// Per-call options for [`crate::limiter::ResponseRenderer::render`].
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RenderOptions {
    /// Archive the full response here before limiting. No archive when `None`.
    pub archive_dir: Option<PathBuf>,
    pub tool_name: Option<String>,
    /// Call parameters, folded into the archive filename.
    pub parameters: Option<Map<String, Value>>,
}

impl RenderOptions {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_tool_name(mut self, tool_name: impl Into<String>) -> Self {
        self.tool_name = Some(tool_name.into());
        self
    }

    pub fn with_archive_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.archive_dir = Some(dir.into());
        self
    }

    pub fn with_parameters(mut self, parameters: Map<String, Value>) -> Self {
        self.parameters = Some(parameters);
        self
    }

    /// Build options from the arguments of a tool call.
    ///
    /// A string `raw_data_save_dir` argument becomes the archive directory;
    /// all arguments are kept as filename parameters (the archiver skips
    /// `raw_data_save_dir` itself). Non-object arguments are ignored.
    pub fn from_tool_arguments(tool_name: &str, arguments: &Value) -> Self {
        let mut options = Self::new().with_tool_name(tool_name);

        if let Some(args) = arguments.as_object() {
            options.archive_dir = args
                .get(SAVE_DIR_PARAM)
                .and_then(|v| v.as_str())
                .filter(|s| !s.trim().is_empty())
                .map(PathBuf::from);
            options.parameters = Some(args.clone());
        }

        options
    }

    pub fn tool_name_or_default(&self) -> &str {
        self.tool_name
            .as_deref()
            .filter(|name| !name.is_empty())
            .unwrap_or(DEFAULT_TOOL_NAME)
    }
}
