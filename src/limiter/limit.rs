use serde_json::Value;
use std::borrow::Cow;
use tracing::{debug, warn};

use super::locate::find_large_array_field;
use crate::types::{BudgetConfig, LimitResult};

/// Cuts the first oversized array in a response down to the budget.
#[derive(Debug, Clone, Copy, Default)]
pub struct ResponseLimiter {
    config: BudgetConfig,
}

impl ResponseLimiter {
    pub fn new(config: BudgetConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> BudgetConfig {
        self.config
    }

    /// Limit at most one array field of `value`.
    ///
    /// The input is never modified. When nothing is oversized the result
    /// borrows `value`; otherwise it owns a copy in which only the located
    /// field differs.
    pub fn limit<'a>(&self, value: &'a Value) -> LimitResult<'a> {
        let max_items = self.config.max_items();
        let Some(location) = find_large_array_field(value, max_items) else {
            return LimitResult::unlimited(value);
        };

        let original_count = location.len();
        let truncated = Value::Array(location.array[..max_items].to_vec());

        if location.is_root() {
            debug!(original_count, max_items, "Limited root array");
            return LimitResult {
                limited_value: Cow::Owned(truncated),
                original_count,
                was_limited: true,
                limited_field_path: Some(location.path),
            };
        }

        let mut copy = value.clone();
        let Some(slot) = field_mut(&mut copy, &location.segments) else {
            // The copy has the same shape as the input, so this only fires on a locator bug.
            warn!(path = %location.path, "Located field missing from copy, returning response unlimited");
            return LimitResult::unlimited(value);
        };
        *slot = truncated;

        debug!(path = %location.path, original_count, max_items, "Limited array field");
        LimitResult {
            limited_value: Cow::Owned(copy),
            original_count,
            was_limited: true,
            limited_field_path: Some(location.path),
        }
    }
}

/// Walk `segments` through nested objects and return the final field.
fn field_mut<'v>(value: &'v mut Value, segments: &[&str]) -> Option<&'v mut Value> {
    segments
        .iter()
        .try_fold(value, |current, key| current.as_object_mut()?.get_mut(*key))
}
