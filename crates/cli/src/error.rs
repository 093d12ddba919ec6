//! Error types for CLI operations.

use thiserror::Error;

/// Main error type for CLI operations.
#[derive(Error, Debug)]
pub enum CliError {
    /// Configuration error.
    #[error("Configuration error: {0}")]
    Config(String),

    /// Analysis error.
    #[error("Analysis error: {0}")]
    Analysis(#[from] chatlens_analysis::AnalysisError),

    /// Invalid argument error.
    #[error("Invalid argument: {0}")]
    Argument(String),

    /// Output serialization error.
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

/// Result alias for CLI operations.
pub type Result<T> = std::result::Result<T, CliError>;
