//! CLI module for courselist
//!
//! Provides command-line interface for:
//! - serve: run the REST API
//! - console: interactive lecturer console
//! - init-db: create the SQLite course table

mod args;
mod commands;
mod errors;

pub use args::{Cli, Command};
pub use commands::{console, init_db, open_store, run, run_command, serve};
pub use errors::{CliError, CliErrorCode, CliResult};
