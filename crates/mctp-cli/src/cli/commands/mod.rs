//! CLI command handlers, one per file.

mod config;
mod open;
mod raw;
mod welcome;

pub use config::run_config;
pub use open::run_open;
pub use raw::run_raw;
pub use welcome::run_welcome;
