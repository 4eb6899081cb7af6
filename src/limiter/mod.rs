//! Oversized-response mitigation: keeps JSON tool responses inside the agent's context budget.
//!
//! Applied after the upstream call, before the response is handed to the agent.
//! Finds the first array field longer than the budget, cuts it down on a copy,
//! optionally archives the untouched response to disk, and renders a text block
//! with a shape outline and the limited data.

mod archive;
mod limit;
mod locate;
mod render;
mod structure;

pub use archive::{archive_raw_data, archive_raw_data_at, archive_timestamp, sanitize_parameters};
pub use limit::ResponseLimiter;
pub use locate::find_large_array_field;
pub use render::{format_file_size, ResponseRenderer};
pub use structure::summarize_structure;

/// Deepest nesting the locator and summarizer walk into.
/// Matches serde_json's parse limit, so anything parsed from text is walked in
/// full; only values built in code can go deeper.
pub const MAX_TRAVERSAL_DEPTH: usize = 128;
