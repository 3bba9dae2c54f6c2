//! Unified error handling for the CLI.

use crate::config::ConfigError;
use shelf_engine::{JsonFields, Response};

/// Exit code when the store refused the request.
pub const EXIT_REFUSED: i32 = 1;

/// Exit code when configuration, input or storage failed.
pub const EXIT_FATAL: i32 = 2;

/// Application error type.
#[derive(Debug, thiserror::Error)]
pub enum CliError {
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error("Engine error: {0}")]
    Engine(#[from] shelf_engine::Error),

    #[error("Invalid record JSON: {0}")]
    InvalidJson(String),
}

impl CliError {
    /// Process exit code for this error.
    pub fn exit_code(&self) -> i32 {
        match self {
            CliError::Engine(e) if !e.is_fatal() => EXIT_REFUSED,
            _ => EXIT_FATAL,
        }
    }

    /// Render as the JSON error shape printed to stdout.
    pub fn to_json(&self) -> String {
        Response::<JsonFields>::error(self.to_string()).to_json()
    }
}

/// Result type alias for commands.
pub type Result<T> = std::result::Result<T, CliError>;
