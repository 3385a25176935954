//! CLI argument definitions using clap
//!
//! Commands:
//! - courselist serve --config <path> [--store memory|sqlite]
//! - courselist console --config <path>
//! - courselist init-db --config <path>

use clap::{Parser, Subcommand};
use std::path::PathBuf;

use crate::config::StoreBackend;

/// Course listing service and lecturer console
#[derive(Parser, Debug)]
#[command(name = "courselist")]
#[command(version, about, long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Run the course REST API
    Serve {
        /// Path to configuration file
        #[arg(long, default_value = "./courselist.json")]
        config: PathBuf,

        /// Override the configured datastore backend
        #[arg(long, value_enum)]
        store: Option<StoreBackend>,
    },

    /// Open the interactive lecturer console
    Console {
        /// Path to configuration file
        #[arg(long, default_value = "./courselist.json")]
        config: PathBuf,
    },

    /// Create the course table in the configured SQLite file
    InitDb {
        /// Path to configuration file
        #[arg(long, default_value = "./courselist.json")]
        config: PathBuf,
    },
}

impl Cli {
    /// Parse command line arguments
    pub fn parse_args() -> Self {
        Cli::parse()
    }
}
