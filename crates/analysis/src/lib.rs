//! Transcript parsing and chat analytics for chatlens.
//!
//! The parser turns an exported transcript into normalized [`Message`]
//! records, the filter layer narrows them by author and date, and the
//! engine aggregates the filtered view into statistics, timelines,
//! activity maps, word and emoji rankings, and sentiment scores.
//!
//! [`Message`]: chatlens_core::Message

#![deny(missing_docs, unsafe_code)]

/// Transcript parsing.
pub mod parsers;

/// Derived-field computation for parsed entries.
pub mod normalizer;

/// Author and date filtering.
pub mod filter;

/// Tokenization, stopwords, and emoji detection.
pub mod nlp;

/// Lexicon-based sentiment scoring.
pub mod sentiment;

/// Aggregations over filtered messages.
pub mod engine;

/// Error types for analysis operations.
pub mod error;

/// Configuration for analysis modules.
pub mod config;

pub use config::AnalysisConfig;
pub use engine::{AnalysisReport, ChatAnalyzer};
pub use error::{AnalysisError, AnalysisResult};
pub use filter::filter;
pub use parsers::{parse, TranscriptParser};
