use chatlens_core::Message;
use chrono::{NaiveDate, NaiveDateTime};
use serde::Serialize;
use std::collections::BTreeMap;

use super::user_messages;
use crate::sentiment::{SentimentLabel, SentimentScorer};

/// A participant message with its sentiment.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ScoredMessage {
    /// When the message was sent.
    pub timestamp: NaiveDateTime,
    /// Calendar date of the message.
    pub date: NaiveDate,
    /// Participant name.
    pub author: String,
    /// Message body.
    pub text: String,
    /// Polarity in `[-1, 1]`.
    pub score: f64,
    /// Bucket for `score`.
    pub label: SentimentLabel,
}

/// Number of messages with one label.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct LabelCount {
    /// Sentiment label.
    pub label: SentimentLabel,
    /// Messages with that label.
    pub count: usize,
}

/// Mean sentiment for one day.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct TrendPoint {
    /// Calendar date.
    pub date: NaiveDate,
    /// Mean score of that day's messages.
    pub mean_score: f64,
}

/// Highest and lowest scoring messages.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct Extremes {
    /// Highest scores first.
    pub most_positive: Vec<ScoredMessage>,
    /// Lowest scores first.
    pub most_negative: Vec<ScoredMessage>,
}

/// Score every participant message in the view, in transcript order.
pub fn sentiment_analysis(
    messages: &[&Message],
    scorer: &dyn SentimentScorer,
) -> Vec<ScoredMessage> {
    user_messages(messages)
        .map(|message| {
            let score = scorer.score(&message.text);
            ScoredMessage {
                timestamp: message.timestamp,
                date: message.date,
                author: message.author.to_string(),
                text: message.text.clone(),
                score,
                label: SentimentLabel::from_score(score),
            }
        })
        .collect()
}

/// Messages per label, most common first. Labels with no messages are left out.
pub fn sentiment_distribution(scored: &[ScoredMessage]) -> Vec<LabelCount> {
    let mut counts: Vec<LabelCount> = SentimentLabel::ALL
        .iter()
        .map(|&label| LabelCount {
            label,
            count: scored.iter().filter(|s| s.label == label).count(),
        })
        .filter(|c| c.count > 0)
        .collect();
    counts.sort_by(|a, b| b.count.cmp(&a.count));
    counts
}

/// Mean score per day, oldest first.
pub fn sentiment_trend(scored: &[ScoredMessage]) -> Vec<TrendPoint> {
    let mut days: BTreeMap<NaiveDate, (f64, usize)> = BTreeMap::new();
    for message in scored {
        let entry = days.entry(message.date).or_insert((0.0, 0));
        entry.0 += message.score;
        entry.1 += 1;
    }
    days.into_iter()
        .map(|(date, (sum, count))| TrendPoint {
            date,
            mean_score: sum / count as f64,
        })
        .collect()
}

/// The `n` highest and `n` lowest scoring messages; ties keep transcript order.
pub fn extreme_messages(scored: &[ScoredMessage], n: usize) -> Extremes {
    let mut by_score: Vec<&ScoredMessage> = scored.iter().collect();

    by_score.sort_by(|a, b| b.score.total_cmp(&a.score));
    let most_positive = by_score.iter().take(n).map(|&s| s.clone()).collect();

    by_score.sort_by(|a, b| a.score.total_cmp(&b.score));
    let most_negative = by_score.iter().take(n).map(|&s| s.clone()).collect();

    Extremes {
        most_positive,
        most_negative,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::parsers::parse;
    use crate::sentiment::LexiconScorer;

    const RAW: &str = "01/01/23, 10:00 - Alice: I love this, it is great\n\
                       01/01/23, 10:01 - Bob: this is terrible and sad\n\
                       01/01/23, 10:02 - Carol joined\n\
                       02/01/23, 09:00 - Alice: see you at five\n\
                       02/01/23, 09:05 - Bob: happy new year!";

    fn scored() -> Vec<ScoredMessage> {
        let transcript = parse(RAW);
        let view: Vec<&Message> = transcript.messages().iter().collect();
        sentiment_analysis(&view, &LexiconScorer::new())
    }

    #[test]
    fn scores_every_participant_message() {
        let scored = scored();
        assert_eq!(scored.len(), 4);
        assert_eq!(scored[0].label, SentimentLabel::Positive);
        assert_eq!(scored[1].label, SentimentLabel::Negative);
        assert_eq!(scored[2].label, SentimentLabel::Neutral);
        assert_eq!(scored[2].score, 0.0);
        assert!(scored.iter().all(|s| (-1.0..=1.0).contains(&s.score)));
    }

    #[test]
    fn distribution_counts_present_labels() {
        let distribution = sentiment_distribution(&scored());
        assert_eq!(
            distribution,
            vec![
                LabelCount {
                    label: SentimentLabel::Positive,
                    count: 2
                },
                LabelCount {
                    label: SentimentLabel::Negative,
                    count: 1
                },
                LabelCount {
                    label: SentimentLabel::Neutral,
                    count: 1
                },
            ]
        );
    }

    #[test]
    fn trend_averages_per_day() {
        let scored = scored();
        let trend = sentiment_trend(&scored);
        assert_eq!(trend.len(), 2);
        let expected = (scored[0].score + scored[1].score) / 2.0;
        assert!((trend[0].mean_score - expected).abs() < 1e-12);
        assert!(trend[0].date < trend[1].date);
    }

    #[test]
    fn extremes_pick_both_ends() {
        let extremes = extreme_messages(&scored(), 1);
        assert_eq!(extremes.most_positive.len(), 1);
        assert_eq!(extremes.most_negative[0].author, "Bob");
        assert_eq!(extremes.most_negative[0].label, SentimentLabel::Negative);
        assert!(extremes.most_positive[0].score > 0.0);
    }

    #[test]
    fn empty_inputs_are_empty() {
        assert!(sentiment_analysis(&[], &LexiconScorer::new()).is_empty());
        assert!(sentiment_distribution(&[]).is_empty());
        assert!(sentiment_trend(&[]).is_empty());
        assert_eq!(extreme_messages(&[], 3), Extremes::default());
    }
}
