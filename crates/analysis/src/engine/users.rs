use chatlens_core::Message;
use serde::Serialize;

use super::{percent_of, user_messages, Tally};

/// One participant's share of the conversation.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct UserShare {
    /// Participant name.
    pub author: String,
    /// Messages sent.
    pub messages: usize,
    /// `messages / total * 100`, truncated to two decimals.
    pub percent: f64,
}

/// Busiest participants.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct BusyUsers {
    /// Participant messages in the view.
    pub total_messages: usize,
    /// Top participants, busiest first.
    pub top: Vec<UserShare>,
}

/// The `top_n` most active participants with their share of all messages.
pub fn most_busy_users(messages: &[&Message], top_n: usize) -> BusyUsers {
    let ranked = user_messages(messages)
        .filter_map(|m| m.author.name())
        .collect::<Tally<_>>()
        .ranked();
    let total_messages: usize = ranked.iter().map(|(_, count)| count).sum();

    let top = ranked
        .into_iter()
        .take(top_n)
        .map(|(author, messages)| UserShare {
            author: author.to_string(),
            messages,
            percent: percent_of(messages, total_messages),
        })
        .collect();

    BusyUsers {
        total_messages,
        top,
    }
}
