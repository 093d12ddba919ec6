//! Core types, errors, and configuration for chatlens.
//!
//! This crate holds the message record produced by the transcript parser,
//! the filter vocabulary shared by every analysis, and the configuration
//! file model.

pub mod config;
pub mod constants;
pub mod error;
pub mod types;

// Re-exports for convenience
pub use config::ChatlensConfig;
pub use error::{Error, Result};
pub use types::*;
