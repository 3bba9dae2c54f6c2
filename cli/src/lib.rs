//! Shelf CLI - drive a local collection from the command line.
//!
//! Each invocation opens the collection file for one entity key, runs a
//! single command and prints the outcome as JSON on stdout. Logs go to
//! stderr.

pub mod commands;
pub mod config;
pub mod error;

use clap::Parser;
use std::path::PathBuf;

pub use commands::{execute, open_store, CliStore, Command};
pub use config::{Config, ConfigError};
pub use error::CliError;

#[derive(Parser, Debug)]
#[command(author, version, about)]
pub struct Cli {
    /// Directory holding collection files (overrides SHELF_DATA_DIR)
    #[arg(long, global = true)]
    pub data_dir: Option<PathBuf>,

    /// Collection key such as dogs, books or restaurants (overrides SHELF_ENTITY)
    #[arg(long, global = true)]
    pub entity: Option<String>,

    #[command(subcommand)]
    pub command: Command,
}

impl Cli {
    /// Merge the parsed flags into environment configuration.
    pub fn config(&self, base: Config) -> Result<Config, ConfigError> {
        base.with_overrides(self.data_dir.clone(), self.entity.clone())
    }
}
