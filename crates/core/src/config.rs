use crate::constants::{
    CONFIG_FILE_NAME, DEFAULT_EXTREME_MESSAGES, DEFAULT_MEDIA_PLACEHOLDER, DEFAULT_TOP_USERS,
    DEFAULT_TOP_WORDS, DEFAULT_WORDCLOUD_MAX_WORDS,
};
use crate::Error;
use crate::Result;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use tracing::debug;

/// Main configuration for chatlens.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ChatlensConfig {
    /// Analysis tuning.
    pub analysis: AnalysisSettings,

    /// Logging configuration.
    pub logging: LoggingConfig,
}

/// Knobs consumed by the parser and the analytics engine.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AnalysisSettings {
    /// Body the exporter writes in place of attachments.
    pub media_placeholder: String,

    /// Entries in the busiest-users ranking.
    pub top_users: usize,

    /// Entries in the most-common-words ranking.
    pub top_words: usize,

    /// Entries in the emoji ranking; `None` keeps every emoji.
    pub top_emoji: Option<usize>,

    /// Terms handed to the word cloud.
    pub wordcloud_max_words: usize,

    /// Messages listed on each side of the sentiment extremes.
    pub extreme_messages: usize,

    /// Words dropped from word statistics in addition to the built-in list.
    pub extra_stopwords: Vec<String>,
}

/// Logging configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    /// Log level used when no verbosity flag is given.
    pub level: LogLevel,
}

/// Log level.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LogLevel {
    /// Error level.
    Error,

    /// Warning level.
    Warn,

    /// Info level.
    Info,

    /// Debug level.
    Debug,

    /// Trace level.
    Trace,
}

impl ChatlensConfig {
    /// Default location: `<config dir>/chatlens/config.toml`.
    pub fn default_path() -> Result<PathBuf> {
        let config_dir = dirs::config_dir()
            .ok_or_else(|| Error::Config("Cannot find config directory".to_string()))?;
        Ok(config_dir.join("chatlens").join(CONFIG_FILE_NAME))
    }

    /// Load configuration from a TOML file. An empty file yields the defaults.
    pub fn load(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;
        if content.trim().is_empty() {
            debug!("config file {} is empty, using defaults", path.display());
            return Ok(Self::default());
        }

        let config: Self = toml::from_str(&content)
            .map_err(|e| Error::Parse(format!("Failed to parse config: {}", e)))?;
        config.validate()?;
        debug!("loaded config from {}", path.display());
        Ok(config)
    }

    /// Reject settings that would make every ranking or the media check meaningless.
    pub fn validate(&self) -> Result<()> {
        let analysis = &self.analysis;
        if analysis.media_placeholder.trim().is_empty() {
            return Err(Error::validation("media_placeholder must not be empty"));
        }
        let cutoffs = [
            ("top_users", analysis.top_users),
            ("top_words", analysis.top_words),
            ("wordcloud_max_words", analysis.wordcloud_max_words),
            ("extreme_messages", analysis.extreme_messages),
        ];
        for (name, value) in cutoffs {
            if value == 0 {
                return Err(Error::validation(format!("{} must be greater than zero", name)));
            }
        }
        if analysis.top_emoji == Some(0) {
            return Err(Error::validation("top_emoji must be greater than zero"));
        }
        Ok(())
    }
}

impl Default for AnalysisSettings {
    fn default() -> Self {
        Self {
            media_placeholder: DEFAULT_MEDIA_PLACEHOLDER.to_string(),
            top_users: DEFAULT_TOP_USERS,
            top_words: DEFAULT_TOP_WORDS,
            top_emoji: None,
            wordcloud_max_words: DEFAULT_WORDCLOUD_MAX_WORDS,
            extreme_messages: DEFAULT_EXTREME_MESSAGES,
            extra_stopwords: Vec::new(),
        }
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: LogLevel::Warn,
        }
    }
}
