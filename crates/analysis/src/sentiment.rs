//! Lexicon-based sentiment scoring.
//!
//! Valences follow the usual -4..=4 scale. A booster right before a hit
//! scales it up or down, a negation within the window flips and damps it,
//! and exclamation marks push the total further in its own direction. The
//! raw sum `s` is squashed into `[-1, 1]` with `s / sqrt(s² + alpha)`.

use once_cell::sync::Lazy;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fmt;

use crate::config::SentimentConfig;
use crate::nlp::tokenize;

const NEGATION_SCALAR: f64 = -0.74;
const BOOSTER_INCREMENT: f64 = 0.293;
const EXCLAMATION_INCREMENT: f64 = 0.292;
const MAX_EXCLAMATIONS: usize = 4;

static LEXICON: Lazy<HashMap<&'static str, f64>> = Lazy::new(|| {
    [
        ("good", 1.9),
        ("great", 3.1),
        ("awesome", 3.1),
        ("amazing", 2.8),
        ("excellent", 2.7),
        ("fantastic", 2.6),
        ("wonderful", 2.7),
        ("nice", 1.8),
        ("cool", 1.3),
        ("love", 3.2),
        ("loved", 2.9),
        ("lovely", 2.8),
        ("like", 1.5),
        ("happy", 2.7),
        ("glad", 2.0),
        ("fun", 2.3),
        ("funny", 1.9),
        ("best", 3.2),
        ("better", 1.9),
        ("beautiful", 2.9),
        ("perfect", 2.7),
        ("thanks", 1.9),
        ("thank", 1.5),
        ("congrats", 2.4),
        ("congratulations", 2.9),
        ("welcome", 2.0),
        ("yay", 2.4),
        ("haha", 2.0),
        ("hahaha", 2.2),
        ("lol", 1.8),
        ("lmao", 2.0),
        ("enjoy", 2.2),
        ("enjoyed", 2.3),
        ("excited", 1.4),
        ("proud", 2.1),
        ("sweet", 2.0),
        ("brilliant", 2.8),
        ("super", 2.9),
        ("win", 2.8),
        ("won", 2.7),
        ("success", 2.7),
        ("kind", 2.4),
        ("helpful", 1.8),
        ("care", 2.2),
        ("smile", 1.5),
        ("hope", 1.9),
        ("safe", 1.9),
        ("wow", 2.8),
        ("bad", -2.5),
        ("worse", -2.1),
        ("worst", -3.1),
        ("terrible", -2.1),
        ("horrible", -2.5),
        ("awful", -2.0),
        ("hate", -2.7),
        ("hated", -3.2),
        ("sad", -2.1),
        ("angry", -2.3),
        ("annoying", -1.7),
        ("annoyed", -1.6),
        ("boring", -1.3),
        ("bored", -1.1),
        ("sorry", -0.3),
        ("sick", -2.3),
        ("tired", -1.9),
        ("upset", -1.6),
        ("hurt", -2.4),
        ("pain", -2.3),
        ("cry", -2.1),
        ("crying", -2.1),
        ("fail", -2.5),
        ("failed", -2.3),
        ("problem", -1.7),
        ("wrong", -2.1),
        ("stupid", -2.4),
        ("idiot", -2.3),
        ("ugly", -2.3),
        ("miss", -0.6),
        ("lost", -1.3),
        ("lonely", -1.8),
        ("scared", -1.9),
        ("worried", -1.2),
        ("stress", -1.8),
        ("stressed", -1.4),
        ("disappointed", -1.9),
        ("fight", -1.6),
        ("kill", -3.7),
        ("dead", -3.3),
        ("damn", -1.7),
        ("ugh", -1.8),
        ("no", -1.2),
        ("😀", 2.2),
        ("😃", 2.2),
        ("😄", 2.2),
        ("😁", 2.1),
        ("😂", 1.8),
        ("🤣", 1.9),
        ("😊", 2.3),
        ("🙂", 1.4),
        ("😍", 2.9),
        ("🥰", 2.9),
        ("😘", 2.3),
        ("❤", 3.0),
        ("👍", 1.7),
        ("🎉", 2.3),
        ("🔥", 1.5),
        ("😢", -2.0),
        ("😭", -2.2),
        ("😞", -2.1),
        ("😔", -1.8),
        ("😡", -2.9),
        ("😠", -2.6),
        ("💔", -2.6),
        ("👎", -1.9),
    ]
    .into_iter()
    .collect()
});

static BOOSTERS: Lazy<HashMap<&'static str, f64>> = Lazy::new(|| {
    [
        ("very", BOOSTER_INCREMENT),
        ("really", BOOSTER_INCREMENT),
        ("so", BOOSTER_INCREMENT),
        ("extremely", BOOSTER_INCREMENT),
        ("totally", BOOSTER_INCREMENT),
        ("absolutely", BOOSTER_INCREMENT),
        ("incredibly", BOOSTER_INCREMENT),
        ("most", BOOSTER_INCREMENT),
        ("too", BOOSTER_INCREMENT),
        ("bahut", BOOSTER_INCREMENT),
        ("barely", -BOOSTER_INCREMENT),
        ("slightly", -BOOSTER_INCREMENT),
        ("somewhat", -BOOSTER_INCREMENT),
        ("kinda", -BOOSTER_INCREMENT),
        ("sorta", -BOOSTER_INCREMENT),
        ("little", -BOOSTER_INCREMENT),
    ]
    .into_iter()
    .collect()
});

static NEGATIONS: Lazy<std::collections::HashSet<&'static str>> = Lazy::new(|| {
    [
        "not", "never", "nothing", "nobody", "none", "neither", "nor", "nowhere", "cannot",
        "cant", "dont", "doesnt", "didnt", "isnt", "wasnt", "arent", "werent", "wont",
        "wouldnt", "shouldnt", "couldnt", "aint", "without", "nahi", "nhi",
    ]
    .into_iter()
    .collect()
});

/// Polarity bucket for a score.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum SentimentLabel {
    /// Score above zero.
    Positive,
    /// Score below zero.
    Negative,
    /// Score exactly zero.
    Neutral,
}

impl SentimentLabel {
    /// All labels, in display order.
    pub const ALL: [SentimentLabel; 3] = [
        SentimentLabel::Positive,
        SentimentLabel::Negative,
        SentimentLabel::Neutral,
    ];

    /// Label for a score: `> 0` positive, `< 0` negative, otherwise neutral.
    pub fn from_score(score: f64) -> Self {
        if score > 0.0 {
            SentimentLabel::Positive
        } else if score < 0.0 {
            SentimentLabel::Negative
        } else {
            SentimentLabel::Neutral
        }
    }
}

impl fmt::Display for SentimentLabel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            SentimentLabel::Positive => "Positive",
            SentimentLabel::Negative => "Negative",
            SentimentLabel::Neutral => "Neutral",
        };
        f.write_str(label)
    }
}

/// Trait for sentiment scoring backends.
pub trait SentimentScorer: Send + Sync {
    /// Backend name.
    fn name(&self) -> &str;

    /// Polarity of `text` in `[-1, 1]`.
    fn score(&self, text: &str) -> f64;
}

/// Scores text against the built-in valence lexicon.
#[derive(Debug, Clone)]
pub struct LexiconScorer {
    alpha: f64,
    negation_window: usize,
}

impl LexiconScorer {
    /// Scorer with default tuning.
    pub fn new() -> Self {
        Self::from_config(&SentimentConfig::default())
    }

    /// Scorer tuned by `config`.
    pub fn from_config(config: &SentimentConfig) -> Self {
        Self {
            alpha: config.normalization_alpha,
            negation_window: config.negation_window,
        }
    }

    fn raw_valence(&self, text: &str) -> f64 {
        let tokens: Vec<String> = tokenize(text).collect();
        let mut sum = 0.0;

        for (idx, token) in tokens.iter().enumerate() {
            let Some(&base) = LEXICON.get(token.as_str()) else {
                continue;
            };
            let mut valence = base;

            if idx > 0 {
                if let Some(&boost) = BOOSTERS.get(tokens[idx - 1].as_str()) {
                    valence += if valence > 0.0 { boost } else { -boost };
                }
            }

            let window_start = idx.saturating_sub(self.negation_window);
            if tokens[window_start..idx].iter().any(|t| is_negation(t)) {
                valence *= NEGATION_SCALAR;
            }

            sum += valence;
        }

        for emoji in crate::nlp::extract_emoji(text) {
            if let Some(&valence) = LEXICON.get(emoji) {
                sum += valence;
            }
        }

        if sum != 0.0 {
            let bangs = text.matches('!').count().min(MAX_EXCLAMATIONS) as f64;
            sum += sum.signum() * bangs * EXCLAMATION_INCREMENT;
        }

        sum
    }
}

impl Default for LexiconScorer {
    fn default() -> Self {
        Self::new()
    }
}

impl SentimentScorer for LexiconScorer {
    fn name(&self) -> &str {
        "lexicon"
    }

    fn score(&self, text: &str) -> f64 {
        let sum = self.raw_valence(text);
        if sum == 0.0 {
            return 0.0;
        }
        (sum / (sum * sum + self.alpha).sqrt()).clamp(-1.0, 1.0)
    }
}

fn is_negation(token: &str) -> bool {
    NEGATIONS.contains(token) || token.ends_with("n't")
}
