/// The current version of jsonbudget, sourced from Cargo.toml
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

pub mod commands;
pub mod config;
pub mod error;
pub mod limiter;
pub mod types;
