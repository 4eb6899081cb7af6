use crate::types::{BudgetConfig, FileConfig, DEFAULT_MAX_ITEMS_FOR_CONTEXT};
use anyhow::{Context, Result};
use std::path::{Path, PathBuf};
use tracing::warn;

pub const MAX_ITEMS_ENV: &str = "JSONBUDGET_MAX_ITEMS";
pub const SAVE_DIR_ENV: &str = "JSONBUDGET_SAVE_DIR";

/// Get the budget with priority: flag > ENV > local > global > default
pub fn get_budget(flag: Option<usize>) -> Result<BudgetConfig> {
    let env_value = std::env::var(MAX_ITEMS_ENV).ok();
    let local = config_layer(load_local_config(), "local");
    let global = config_layer(load_global_config(), "global");

    let max_items = pick_max_items(flag, env_value.as_deref(), local.as_ref(), global.as_ref())?;
    Ok(BudgetConfig::new(max_items)?)
}

/// Get the default archive directory with priority: ENV > local > global.
/// `None` means responses are not archived unless a caller asks for it.
pub fn get_save_dir() -> Option<PathBuf> {
    // 1. Check environment variable
    if let Ok(env_dir) = std::env::var(SAVE_DIR_ENV) {
        if !env_dir.trim().is_empty() {
            return Some(PathBuf::from(env_dir));
        }
    }

    // 2. Check local config
    if let Some(local_config) = config_layer(load_local_config(), "local") {
        if let Some(dir) = local_config.raw_data_save_dir {
            return Some(dir);
        }
    }

    // 3. Check global config
    if let Some(global_config) = config_layer(load_global_config(), "global") {
        if let Some(dir) = global_config.raw_data_save_dir {
            return Some(dir);
        }
    }

    None
}

/// Pick the threshold from the available layers, first hit wins.
pub fn pick_max_items(
    flag: Option<usize>,
    env_value: Option<&str>,
    local: Option<&FileConfig>,
    global: Option<&FileConfig>,
) -> Result<usize> {
    if let Some(max_items) = flag {
        return Ok(max_items);
    }

    if let Some(raw) = env_value {
        return raw
            .trim()
            .parse::<usize>()
            .with_context(|| format!("Invalid {} value: {:?}", MAX_ITEMS_ENV, raw));
    }

    if let Some(max_items) = local.and_then(|c| c.max_items_for_context) {
        return Ok(max_items);
    }

    if let Some(max_items) = global.and_then(|c| c.max_items_for_context) {
        return Ok(max_items);
    }

    Ok(DEFAULT_MAX_ITEMS_FOR_CONTEXT)
}

/// Keep a loaded config layer. A missing file is skipped quietly; an
/// unreadable or malformed one is skipped with a warning.
pub fn config_layer(loaded: Result<FileConfig>, scope: &str) -> Option<FileConfig> {
    match loaded {
        Ok(config) => Some(config),
        Err(e) if is_missing_file(&e) => None,
        Err(e) => {
            warn!(scope, error = %format!("{:#}", e), "Ignoring unusable config file");
            None
        }
    }
}

fn is_missing_file(err: &anyhow::Error) -> bool {
    err.chain().any(|cause| {
        cause
            .downcast_ref::<std::io::Error>()
            .is_some_and(|io| io.kind() == std::io::ErrorKind::NotFound)
    })
}

/// Load local config from .jsonbudget/config.json
pub fn load_local_config() -> Result<FileConfig> {
    let config_path = PathBuf::from(".jsonbudget").join("config.json");
    load_config_file(&config_path, "local")
}

/// Load global config from ~/.config/jsonbudget/config.json
pub fn load_global_config() -> Result<FileConfig> {
    let config_dir = dirs::config_dir()
        .context("Failed to get config directory")?
        .join("jsonbudget");
    load_config_file(&config_dir.join("config.json"), "global")
}

fn load_config_file(config_path: &Path, scope: &str) -> Result<FileConfig> {
    let contents = std::fs::read_to_string(config_path)
        .with_context(|| format!("Failed to read {} config {}", scope, config_path.display()))?;
    let config: FileConfig = serde_json::from_str(&contents)
        .with_context(|| format!("Failed to parse {} config {}", scope, config_path.display()))?;
    Ok(config)
}
