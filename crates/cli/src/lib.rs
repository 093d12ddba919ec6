//! Command-line interface for chatlens.
//!
//! Reads a transcript export, applies the author/date selection given on
//! the command line, and prints one analysis view or the full report.

#![deny(missing_docs, unsafe_code)]

/// CLI command definitions and parsing.
pub mod commands;

/// CLI application entry point and configuration.
pub mod app;

/// Error types for CLI operations.
pub mod error;
