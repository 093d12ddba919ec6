use chatlens_core::Message;
use serde::Serialize;

use super::{user_messages, Tally};
use crate::nlp::{tokenize, Stopwords};

/// A word and how often it appears.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct WordCount {
    /// Case-folded word.
    pub word: String,
    /// Occurrences.
    pub count: usize,
}

/// A word cloud term with its relative weight.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct WeightedTerm {
    /// Case-folded word.
    pub word: String,
    /// Occurrences.
    pub count: usize,
    /// `count` divided by the highest count, in `(0, 1]`.
    pub weight: f64,
}

/// Frequency-weighted terms for a word cloud renderer.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct WordCloud {
    /// Terms, heaviest first.
    pub terms: Vec<WeightedTerm>,
}

/// Ranked word frequencies over participant, non-media messages.
fn word_frequencies(
    messages: &[&Message],
    stopwords: &Stopwords,
    min_word_length: usize,
) -> Vec<(String, usize)> {
    user_messages(messages)
        .filter(|m| !m.is_media)
        .flat_map(|m| tokenize(&m.text))
        .filter(|word| word.chars().count() >= min_word_length && !stopwords.is_stopword(word))
        .collect::<Tally<_>>()
        .ranked()
}

/// The `top_n` most frequent words, stopwords and media messages excluded.
pub fn most_common_words(
    messages: &[&Message],
    stopwords: &Stopwords,
    min_word_length: usize,
    top_n: usize,
) -> Vec<WordCount> {
    word_frequencies(messages, stopwords, min_word_length)
        .into_iter()
        .take(top_n)
        .map(|(word, count)| WordCount { word, count })
        .collect()
}

/// Word cloud input: up to `max_words` terms weighted by relative frequency.
pub fn create_wordcloud(
    messages: &[&Message],
    stopwords: &Stopwords,
    min_word_length: usize,
    max_words: usize,
) -> WordCloud {
    let ranked = word_frequencies(messages, stopwords, min_word_length);
    let Some(&(_, max_count)) = ranked.first() else {
        return WordCloud::default();
    };

    let terms = ranked
        .into_iter()
        .take(max_words)
        .map(|(word, count)| WeightedTerm {
            weight: count as f64 / max_count as f64,
            word,
            count,
        })
        .collect();
    WordCloud { terms }
}
