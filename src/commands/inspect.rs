//! Read-only views of a response: its outline, or where it blows the budget.

use anyhow::Result;
use std::path::PathBuf;

use super::common::read_input;
use crate::config;
use crate::limiter::{find_large_array_field, summarize_structure};

/// Print the structure outline of a JSON response.
pub fn structure(file: Option<PathBuf>) -> Result<()> {
    let value = read_input(file.as_deref())?;
    println!("{}", summarize_structure(&value));
    Ok(())
}

/// Print which field would be limited, and how large it is.
pub fn locate(file: Option<PathBuf>, max_items: Option<usize>) -> Result<()> {
    let value = read_input(file.as_deref())?;
    let budget = config::get_budget(max_items)?;

    match find_large_array_field(&value, budget.max_items()) {
        Some(location) => println!(
            "{}: {} items (limit {})",
            location.path,
            location.len(),
            budget.max_items()
        ),
        None => println!("No oversized field found (limit {})", budget.max_items()),
    }
    Ok(())
}
