//! CLI subcommand implementations.

pub mod devices;
pub mod export;
pub mod report;
pub mod util;
