use thiserror::Error;

/// Errors that can occur during analysis operations.
#[derive(Error, Debug)]
pub enum AnalysisError {
    /// Transcript bytes are not valid UTF-8.
    #[error("Decode error: {0}")]
    Decode(#[from] std::str::Utf8Error),
    /// I/O operation error.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
    /// Result serialization error.
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
    /// Configuration error.
    #[error("Configuration error: {0}")]
    Config(String),
    /// Error raised by the core crate.
    #[error(transparent)]
    Core(#[from] chatlens_core::Error),
}

/// Result type alias for analysis operations.
pub type AnalysisResult<T> = Result<T, AnalysisError>;
