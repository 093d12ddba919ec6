//! Aggregations over a filtered message view.
//!
//! Every function takes the view returned by [`crate::filter::filter`],
//! is pure, and returns an empty or zero-valued result for empty input.
//! Rankings are by count descending with ties kept in first-seen order.

use chatlens_core::Message;
use std::collections::HashMap;
use std::hash::Hash;

/// Volume statistics.
pub mod stats;

/// Monthly and daily message counts.
pub mod timeline;

/// Weekday, month, and hour-of-week activity.
pub mod activity;

/// Busiest participants.
pub mod users;

/// Word frequencies and word cloud input.
pub mod words;

/// Emoji frequencies.
pub mod emoji;

/// Per-message sentiment and its summaries.
pub mod sentiment;

/// All views for one request.
pub mod report;

pub use activity::{
    activity_heatmap, month_activity_map, week_activity_map, DayCount, Heatmap, MonthCount,
};
pub use emoji::{emoji_helper, EmojiCount};
pub use report::{AnalysisReport, ChatAnalyzer, SentimentSummary};
pub use sentiment::{
    extreme_messages, sentiment_analysis, sentiment_distribution, sentiment_trend, Extremes,
    LabelCount, ScoredMessage, TrendPoint,
};
pub use stats::{fetch_stats, Stats};
pub use timeline::{daily_timeline, monthly_timeline, DailyPoint, MonthlyPoint};
pub use users::{most_busy_users, BusyUsers, UserShare};
pub use words::{create_wordcloud, most_common_words, WeightedTerm, WordCloud, WordCount};

/// Participant messages only; notifications never reach user-scoped views.
pub(crate) fn user_messages<'a>(
    messages: &'a [&'a Message],
) -> impl Iterator<Item = &'a Message> + 'a {
    messages.iter().copied().filter(|m| m.is_user_message())
}

/// Insertion-ordered counter.
#[derive(Debug)]
pub(crate) struct Tally<K> {
    index: HashMap<K, usize>,
    entries: Vec<(K, usize)>,
}

impl<K: Eq + Hash + Clone> Tally<K> {
    pub(crate) fn new() -> Self {
        Self {
            index: HashMap::new(),
            entries: Vec::new(),
        }
    }

    pub(crate) fn add(&mut self, key: K) {
        match self.index.get(&key) {
            Some(&slot) => self.entries[slot].1 += 1,
            None => {
                self.index.insert(key.clone(), self.entries.len());
                self.entries.push((key, 1));
            }
        }
    }

    /// Entries by count descending; equal counts stay in first-seen order.
    pub(crate) fn ranked(self) -> Vec<(K, usize)> {
        let mut entries = self.entries;
        entries.sort_by(|a, b| b.1.cmp(&a.1));
        entries
    }
}

impl<K: Eq + Hash + Clone> FromIterator<K> for Tally<K> {
    fn from_iter<I: IntoIterator<Item = K>>(iter: I) -> Self {
        let mut tally = Self::new();
        for key in iter {
            tally.add(key);
        }
        tally
    }
}

/// `count / total * 100`, truncated to two decimals so shares never sum past 100.
pub(crate) fn percent_of(count: usize, total: usize) -> f64 {
    if total == 0 {
        return 0.0;
    }
    (count * 10_000 / total) as f64 / 100.0
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn tally_ranks_with_stable_ties() {
        let tally: Tally<&str> = ["b", "a", "c", "a", "c", "d"].into_iter().collect();
        assert_eq!(tally.ranked(), vec![("a", 2), ("c", 2), ("b", 1), ("d", 1)]);
    }

    #[test]
    fn percent_of_truncates_to_two_decimals() {
        assert_eq!(percent_of(2, 3), 66.66);
        assert_eq!(percent_of(1, 3), 33.33);
        assert_eq!(percent_of(29, 100), 29.0);
        assert_eq!(percent_of(4, 4), 100.0);
        assert_eq!(percent_of(0, 0), 0.0);
    }
}
