//! Attendance report CLI library.
//!
//! This crate provides the CLI interface for the attendance engine.

mod cli;
pub mod commands;
mod config;
mod source;

pub use cli::{Cli, Commands, ExportFormat, ViewArgs};
pub use config::{Config, dirs_config_path};
pub use source::AnySource;
