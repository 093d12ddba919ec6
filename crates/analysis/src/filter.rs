//! Author and date filtering.
//!
//! Filtering never mutates the transcript; it returns a borrowed view in
//! transcript order.

use chatlens_core::constants::OVERALL_USER;
use chatlens_core::{DateRange, Message, MessageFilter, Transcript};
use std::collections::BTreeSet;
use tracing::debug;

/// Messages that pass `filter`, in transcript order.
///
/// Unknown authors and inverted date ranges produce an empty view.
pub fn filter<'a>(messages: &'a [Message], filter: &MessageFilter) -> Vec<&'a Message> {
    if filter.date_range.is_some_and(|range| range.is_inverted()) {
        debug!("inverted date range, nothing to keep");
        return Vec::new();
    }

    let view: Vec<&Message> = messages.iter().filter(|m| filter.matches(m)).collect();
    debug!(
        "filter {} kept {} of {} messages",
        filter.user,
        view.len(),
        messages.len()
    );
    view
}

/// Distinct participant names, sorted. Notifications are not listed.
pub fn user_list(transcript: &Transcript) -> Vec<String> {
    transcript
        .messages()
        .iter()
        .filter_map(|m| m.author.name())
        .collect::<BTreeSet<_>>()
        .into_iter()
        .map(str::to_string)
        .collect()
}

/// Choices for a user selector: the wildcard first, then every participant.
pub fn selectable_users(transcript: &Transcript) -> Vec<String> {
    let mut users = vec![OVERALL_USER.to_string()];
    users.extend(user_list(transcript));
    users
}

/// Earliest and latest message dates, or `None` for an empty transcript.
pub fn date_bounds(messages: &[Message]) -> Option<DateRange> {
    let start = messages.iter().map(|m| m.date).min()?;
    let end = messages.iter().map(|m| m.date).max()?;
    Some(DateRange::new(start, end))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::parsers::parse;
    use chatlens_core::UserScope;
    use chrono::NaiveDate;

    const RAW: &str = "01/01/23, 10:00 - Alice: Hello\n\
                       01/01/23, 10:01 - Carol joined\n\
                       03/01/23, 10:05 - Bob: Hi\n\
                       05/01/23, 09:00 - Alice: Later";

    fn day(d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(2023, 1, d).expect("valid date")
    }

    #[test]
    fn overall_keeps_everything_including_notifications() {
        let transcript = parse(RAW);
        let view = filter(transcript.messages(), &MessageFilter::overall());
        assert_eq!(view.len(), 4);
    }

    #[test]
    fn author_scope_is_exact() {
        let transcript = parse(RAW);
        let alice = MessageFilter::overall().with_user(UserScope::parse("Alice"));
        assert_eq!(filter(transcript.messages(), &alice).len(), 2);

        let nobody = MessageFilter::overall().with_user(UserScope::parse("Mallory"));
        assert!(filter(transcript.messages(), &nobody).is_empty());
    }

    #[test]
    fn date_range_is_inclusive() {
        let transcript = parse(RAW);
        let range = MessageFilter::overall().with_date_range(DateRange::new(day(1), day(3)));
        assert_eq!(filter(transcript.messages(), &range).len(), 3);

        let single = MessageFilter::overall().with_date_range(DateRange::new(day(5), day(5)));
        assert_eq!(filter(transcript.messages(), &single).len(), 1);
    }

    #[test]
    fn inverted_range_is_empty() {
        let transcript = parse(RAW);
        let inverted = MessageFilter::overall().with_date_range(DateRange::new(day(5), day(1)));
        assert!(filter(transcript.messages(), &inverted).is_empty());
    }

    #[test]
    fn user_lists_and_bounds() {
        let transcript = parse(RAW);
        assert_eq!(user_list(&transcript), vec!["Alice", "Bob"]);
        assert_eq!(selectable_users(&transcript), vec!["Overall", "Alice", "Bob"]);
        assert_eq!(
            date_bounds(transcript.messages()),
            Some(DateRange::new(day(1), day(5)))
        );
        assert_eq!(date_bounds(&[]), None);
    }
}
