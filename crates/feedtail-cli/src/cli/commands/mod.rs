//! CLI command handlers, one per file.

mod config;
mod extract;
mod inspect;

pub use config::run_config;
pub use extract::run_extract;
pub use inspect::run_inspect;
