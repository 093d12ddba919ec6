use chatlens_core::Message;
use serde::Serialize;

use super::user_messages;

/// Headline counts for a filtered view.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct Stats {
    /// Participant messages.
    pub messages: usize,
    /// Words across those messages, media placeholders excluded.
    pub words: usize,
    /// Messages carrying the media placeholder.
    pub media: usize,
    /// Messages containing an http(s) link.
    pub links: usize,
}

/// Message, word, media, and link counts. Notifications are skipped.
pub fn fetch_stats(messages: &[&Message]) -> Stats {
    user_messages(messages).fold(Stats::default(), |mut stats, message| {
        stats.messages += 1;
        stats.words += message.word_count;
        stats.media += usize::from(message.is_media);
        stats.links += usize::from(message.contains_link);
        stats
    })
}
