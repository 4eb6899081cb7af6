use chrono::{DateTime, Utc};
use serde_json::Value;
use tracing::warn;

use super::archive::archive_raw_data_at;
use super::limit::ResponseLimiter;
use super::structure::summarize_structure;
use crate::error::{ArchiveError, RenderError};
use crate::types::{ArchiveResult, BudgetConfig, LimitResult, RenderOptions};

const KIB: u64 = 1024;
const MIB: u64 = 1024 * 1024;

/// Turns a raw response into the text block handed to the agent.
///
/// Layout:
///
/// ```text
/// ## {tool}
///
/// Raw data saved to: {path} ({size})
///
/// Note: ...
///
/// ### Structure
/// ...
///
/// ### Data ({field}: {max}/{count} items)
/// ...
/// ```
#[derive(Debug, Clone, Copy, Default)]
pub struct ResponseRenderer {
    limiter: ResponseLimiter,
}

impl ResponseRenderer {
    pub fn new(config: BudgetConfig) -> Self {
        Self {
            limiter: ResponseLimiter::new(config),
        }
    }

    pub fn config(&self) -> BudgetConfig {
        self.limiter.config()
    }

    /// Archive (if asked), limit, outline and format `value`.
    ///
    /// A failed archive does not abort the render; it shows up as a line in
    /// the output and the structure and data sections follow as usual.
    pub fn render(&self, value: &Value, options: &RenderOptions) -> Result<String, RenderError> {
        self.render_at(value, options, Utc::now())
    }

    /// [`render`](Self::render) with `now` stamped on the archive filename.
    pub fn render_at(
        &self,
        value: &Value,
        options: &RenderOptions,
        now: DateTime<Utc>,
    ) -> Result<String, RenderError> {
        let tool_name = options.tool_name_or_default();

        let archive = options.archive_dir.as_deref().map(|dir| {
            archive_raw_data_at(value, dir, tool_name, options.parameters.as_ref(), now)
        });
        if let Some(Err(e)) = &archive {
            warn!(error = %e, tool = tool_name, "Failed to archive raw response");
        }

        let limited = self.limiter.limit(value);
        let outline = summarize_structure(&limited.limited_value);
        let data = serde_json::to_string_pretty(limited.limited_value.as_ref())?;

        let mut out = format!("## {tool_name}\n\n");

        let archived = match &archive {
            Some(Ok(result)) => {
                out.push_str(&archive_notice(result));
                true
            }
            Some(Err(e)) => {
                out.push_str(&archive_failure_notice(e));
                false
            }
            None => false,
        };

        if let Some(notice) = self.limit_notice(&limited, archived) {
            out.push_str(&notice);
        }

        out.push_str("### Structure\n```\n");
        out.push_str(&outline);
        out.push_str("\n```\n\n");

        out.push_str(&self.data_header(&limited));
        out.push_str("\n```json\n");
        out.push_str(&data);
        out.push_str("\n```\n");

        Ok(out)
    }

    fn limit_notice(&self, limited: &LimitResult<'_>, archived: bool) -> Option<String> {
        if !limited.was_limited {
            return None;
        }
        let path = limited.limited_field_path.as_deref().unwrap_or_default();
        let follow_up = if archived {
            "Full data saved to file."
        } else {
            "To get the full data, provide a raw_data_save_dir parameter."
        };
        Some(format!(
            "Note: Field \"{}\" had {} items and was limited to the first {}. {}\n\n",
            path,
            limited.original_count,
            self.config().max_items(),
            follow_up
        ))
    }

    fn data_header(&self, limited: &LimitResult<'_>) -> String {
        match (&limited.limited_field_path, limited.was_limited) {
            (Some(path), true) => format!(
                "### Data ({}: {}/{} items)",
                path,
                self.config().max_items(),
                limited.original_count
            ),
            _ => "### Data".to_string(),
        }
    }
}

fn archive_notice(result: &ArchiveResult) -> String {
    format!(
        "Raw data saved to: {} ({})\n\n",
        result.file_path.display(),
        format_file_size(result.byte_size)
    )
}

fn archive_failure_notice(error: &ArchiveError) -> String {
    format!("Failed to save raw data: {}\n\n", error)
}

/// Human-readable size using binary multiples: `500 B`, `2.5 KB`, `1.0 MB`.
pub fn format_file_size(bytes: u64) -> String {
    if bytes < KIB {
        format!("{} B", bytes)
    } else if bytes < MIB {
        format!("{:.1} KB", bytes as f64 / KIB as f64)
    } else {
        format!("{:.1} MB", bytes as f64 / MIB as f64)
    }
}
