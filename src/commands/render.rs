use anyhow::Result;
use std::path::PathBuf;
use tracing::debug;

use super::common::{parse_params, read_input};
use crate::config;
use crate::limiter::ResponseRenderer;
use crate::types::{RenderOptions, DEFAULT_TOOL_NAME};

/// Render a JSON response (file or stdin) the way an agent would receive it.
pub fn run(
    file: Option<PathBuf>,
    tool: Option<String>,
    save_dir: Option<PathBuf>,
    params: Vec<String>,
    max_items: Option<usize>,
) -> Result<()> {
    let value = read_input(file.as_deref())?;
    let budget = config::get_budget(max_items)?;
    let parameters = parse_params(&params)?;

    let tool_name = tool.unwrap_or_else(|| DEFAULT_TOOL_NAME.to_string());
    let mut options = RenderOptions::from_tool_arguments(&tool_name, &serde_json::Value::Object(parameters));

    // Explicit flag > raw_data_save_dir parameter > configured default
    if let Some(dir) = save_dir {
        options.archive_dir = Some(dir);
    } else if options.archive_dir.is_none() {
        options.archive_dir = config::get_save_dir();
    }

    debug!(
        tool = %tool_name,
        max_items = budget.max_items(),
        archive_dir = ?options.archive_dir,
        "Rendering response"
    );

    let text = ResponseRenderer::new(budget).render(&value, &options)?;
    print!("{}", text);
    Ok(())
}
