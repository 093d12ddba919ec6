//! Derived-field computation.
//!
//! Every field here is computed exactly once per entry, right after the
//! transcript is split. Normalization cannot fail.

use chatlens_core::constants::DEFAULT_MEDIA_PLACEHOLDER;
use chatlens_core::{DayOfWeek, Message, MonthPeriod};
use chrono::{Datelike, Timelike};
use serde::{Deserialize, Serialize};

use crate::parsers::RawEntry;

const LINK_PREFIXES: [&str; 2] = ["http://", "https://"];

/// Knobs for derived-field computation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NormalizeOptions {
    /// Body the exporter writes in place of attachments.
    pub media_placeholder: String,
}

impl Default for NormalizeOptions {
    fn default() -> Self {
        Self {
            media_placeholder: DEFAULT_MEDIA_PLACEHOLDER.to_string(),
        }
    }
}

/// Turn a raw entry into a [`Message`] with all derived fields filled in.
pub fn normalize(entry: RawEntry, options: &NormalizeOptions) -> Message {
    let date = entry.timestamp.date();
    let is_media = is_media_body(&entry.text, &options.media_placeholder);
    let word_count = count_words(&entry.text, &options.media_placeholder);
    let contains_link = LINK_PREFIXES
        .iter()
        .any(|prefix| entry.text.contains(prefix));

    Message {
        timestamp: entry.timestamp,
        author: entry.author,
        date,
        hour: entry.timestamp.hour(),
        day_of_week: DayOfWeek::from(date.weekday()),
        month_period: MonthPeriod::of(date),
        word_count,
        is_media,
        contains_link,
        text: entry.text,
    }
}

fn is_media_body(text: &str, placeholder: &str) -> bool {
    !placeholder.is_empty() && text.contains(placeholder)
}

/// Whitespace-separated words, with the media placeholder removed first.
fn count_words(text: &str, placeholder: &str) -> usize {
    if placeholder.is_empty() || !text.contains(placeholder) {
        return text.split_whitespace().count();
    }
    text.split(placeholder)
        .map(|part| part.split_whitespace().count())
        .sum()
}

#[cfg(test)]
mod tests {
    use super::*;
    use chatlens_core::Author;
    use chrono::NaiveDate;

    fn entry(text: &str) -> RawEntry {
        RawEntry {
            timestamp: NaiveDate::from_ymd_opt(2023, 1, 1)
                .and_then(|d| d.and_hms_opt(13, 30, 0))
                .expect("valid timestamp"),
            author: Author::User("Alice".to_string()),
            text: text.to_string(),
        }
    }

    #[test]
    fn derives_calendar_fields() {
        let message = normalize(entry("hello there"), &NormalizeOptions::default());
        assert_eq!(message.date, NaiveDate::from_ymd_opt(2023, 1, 1).expect("date"));
        assert_eq!(message.hour, 13);
        assert_eq!(message.day_of_week, DayOfWeek::Sunday);
        assert_eq!(message.month_period.to_string(), "Jan 2023");
        assert_eq!(message.word_count, 2);
        assert!(!message.is_media);
        assert!(!message.contains_link);
    }

    #[test]
    fn media_placeholder_is_flagged_and_not_counted_as_words() {
        let options = NormalizeOptions::default();
        let pure = normalize(entry("<Media omitted>"), &options);
        assert!(pure.is_media);
        assert_eq!(pure.word_count, 0);

        let mixed = normalize(entry("Hi <Media omitted>"), &options);
        assert!(mixed.is_media);
        assert_eq!(mixed.word_count, 1);
    }

    #[test]
    fn custom_placeholder_is_honoured() {
        let options = NormalizeOptions {
            media_placeholder: "<Medien ausgeschlossen>".to_string(),
        };
        let message = normalize(entry("<Medien ausgeschlossen>"), &options);
        assert!(message.is_media);
        assert!(!normalize(entry("<Media omitted>"), &options).is_media);
    }

    #[test]
    fn links_need_a_scheme() {
        let options = NormalizeOptions::default();
        assert!(normalize(entry("see https://example.com"), &options).contains_link);
        assert!(normalize(entry("http://a.b"), &options).contains_link);
        assert!(!normalize(entry("www.example.com"), &options).contains_link);
    }

    #[test]
    fn empty_body_has_zero_words() {
        let message = normalize(entry(""), &NormalizeOptions::default());
        assert_eq!(message.word_count, 0);
        assert!(!message.is_media);
    }
}
