use chatlens_core::config::AnalysisSettings;
use chatlens_core::constants::{
    DEFAULT_EXTREME_MESSAGES, DEFAULT_MEDIA_PLACEHOLDER, DEFAULT_TOP_USERS, DEFAULT_TOP_WORDS,
    DEFAULT_WORDCLOUD_MAX_WORDS,
};
use serde::{Deserialize, Serialize};

use crate::error::{AnalysisError, AnalysisResult};

/// Configuration for analysis features
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AnalysisConfig {
    /// Body the exporter writes in place of attachments.
    pub media_placeholder: String,

    /// Ranking cutoffs
    pub rankings: RankingConfig,

    /// NLP processing configuration
    pub nlp: NlpConfig,

    /// Sentiment analysis configuration
    pub sentiment: SentimentConfig,
}

/// Cutoffs for the top-N views.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RankingConfig {
    /// Authors in the busiest-users ranking.
    pub top_users: usize,

    /// Words in the most-common-words ranking.
    pub top_words: usize,

    /// Emoji in the emoji ranking; `None` keeps all of them.
    pub top_emoji: Option<usize>,

    /// Terms handed to the word cloud.
    pub wordcloud_max_words: usize,

    /// Messages on each side of the sentiment extremes.
    pub extreme_messages: usize,
}

/// NLP processing configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NlpConfig {
    /// Enable stopword filtering
    pub stopword_filtering: bool,

    /// Words treated as stopwords on top of the built-in list
    pub extra_stopwords: Vec<String>,

    /// Minimum word length (in chars) for word statistics
    pub min_word_length: usize,
}

/// Sentiment analysis configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SentimentConfig {
    /// Normalization constant mapping raw valence sums into [-1, 1].
    pub normalization_alpha: f64,

    /// Words inspected before a lexicon hit when looking for negations.
    pub negation_window: usize,
}

impl AnalysisConfig {
    /// Check cutoffs and constants before running any analysis.
    pub fn validate(&self) -> AnalysisResult<()> {
        if self.media_placeholder.trim().is_empty() {
            return Err(AnalysisError::Config(
                "media placeholder must not be empty".to_string(),
            ));
        }
        if self.rankings.top_users == 0
            || self.rankings.top_words == 0
            || self.rankings.wordcloud_max_words == 0
            || self.rankings.extreme_messages == 0
            || self.rankings.top_emoji == Some(0)
        {
            return Err(AnalysisError::Config(
                "ranking cutoffs must be greater than zero".to_string(),
            ));
        }
        let alpha = self.sentiment.normalization_alpha;
        if alpha.is_nan() || alpha <= 0.0 {
            return Err(AnalysisError::Config(
                "sentiment normalization alpha must be positive".to_string(),
            ));
        }
        Ok(())
    }
}

impl Default for AnalysisConfig {
    fn default() -> Self {
        Self {
            media_placeholder: DEFAULT_MEDIA_PLACEHOLDER.to_string(),
            rankings: RankingConfig::default(),
            nlp: NlpConfig::default(),
            sentiment: SentimentConfig::default(),
        }
    }
}

impl Default for RankingConfig {
    fn default() -> Self {
        Self {
            top_users: DEFAULT_TOP_USERS,
            top_words: DEFAULT_TOP_WORDS,
            top_emoji: None,
            wordcloud_max_words: DEFAULT_WORDCLOUD_MAX_WORDS,
            extreme_messages: DEFAULT_EXTREME_MESSAGES,
        }
    }
}

impl Default for NlpConfig {
    fn default() -> Self {
        Self {
            stopword_filtering: true,
            extra_stopwords: Vec::new(),
            min_word_length: 1,
        }
    }
}

impl Default for SentimentConfig {
    fn default() -> Self {
        Self {
            normalization_alpha: 15.0,
            negation_window: 3,
        }
    }
}

impl From<&AnalysisSettings> for AnalysisConfig {
    fn from(settings: &AnalysisSettings) -> Self {
        Self {
            media_placeholder: settings.media_placeholder.clone(),
            rankings: RankingConfig {
                top_users: settings.top_users,
                top_words: settings.top_words,
                top_emoji: settings.top_emoji,
                wordcloud_max_words: settings.wordcloud_max_words,
                extreme_messages: settings.extreme_messages,
            },
            nlp: NlpConfig {
                extra_stopwords: settings.extra_stopwords.clone(),
                ..NlpConfig::default()
            },
            sentiment: SentimentConfig::default(),
        }
    }
}
