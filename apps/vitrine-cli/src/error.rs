//! # CLI Error Types
//!
//! Everything that can stop the driver before or while it runs a script.
//! Cart refusals are not in here: they are printed as notices.

use thiserror::Error;
use vitrine_core::CoreError;

/// Result type alias for CLI operations.
pub type CliResult<T> = Result<T, CliError>;

#[derive(Debug, Error)]
pub enum CliError {
    // =========================================================================
    // Configuration Errors
    // =========================================================================
    /// Config values that parse but make no sense.
    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    /// Config file is not valid TOML for `CliConfig`.
    #[error("Failed to parse config file: {0}")]
    ConfigParse(#[from] toml::de::Error),

    /// Command-line usage error.
    #[error("Invalid argument: {0}")]
    InvalidArgument(String),

    // =========================================================================
    // Domain / Output Errors
    // =========================================================================
    #[error(transparent)]
    Core(#[from] CoreError),

    #[error("Failed to encode JSON output: {0}")]
    Json(#[from] serde_json::Error),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}
