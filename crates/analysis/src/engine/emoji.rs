use chatlens_core::Message;
use serde::Serialize;

use super::{user_messages, Tally};
use crate::nlp::extract_emoji;

/// An emoji and how often it appears.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct EmojiCount {
    /// The emoji character.
    pub emoji: String,
    /// Occurrences.
    pub count: usize,
}

/// Emoji used in participant messages, most frequent first.
pub fn emoji_helper(messages: &[&Message]) -> Vec<EmojiCount> {
    user_messages(messages)
        .flat_map(|m| extract_emoji(&m.text))
        .collect::<Tally<_>>()
        .ranked()
        .into_iter()
        .map(|(emoji, count)| EmojiCount {
            emoji: emoji.to_string(),
            count,
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::parsers::parse;

    #[test]
    fn repeated_emoji_rank_first() {
        let transcript = parse("01/01/23, 10:00 - Alice: Great! 😀😀👍");
        let view: Vec<&Message> = transcript.messages().iter().collect();
        assert_eq!(
            emoji_helper(&view),
            vec![
                EmojiCount {
                    emoji: "😀".to_string(),
                    count: 2
                },
                EmojiCount {
                    emoji: "👍".to_string(),
                    count: 1
                },
            ]
        );
    }

    #[test]
    fn flags_and_skin_tone_modifiers_are_ranked() {
        let transcript = parse("01/01/23, 10:00 - Alice: 🇮🇳 👍🏽 ❤️ 🇮🇳");
        let view: Vec<&Message> = transcript.messages().iter().collect();
        let ranked: Vec<(String, usize)> = emoji_helper(&view)
            .into_iter()
            .map(|e| (e.emoji, e.count))
            .collect();
        assert_eq!(
            ranked,
            vec![
                ("🇮🇳".to_string(), 2),
                ("👍".to_string(), 1),
                ("🏽".to_string(), 1),
                ("❤".to_string(), 1),
            ]
        );
    }

    #[test]
    fn notifications_and_plain_text_contribute_nothing() {
        let transcript = parse(
            "01/01/23, 10:00 - Alice changed the group icon 🎉\n\
             01/01/23, 10:01 - Bob: no emoji here",
        );
        let view: Vec<&Message> = transcript.messages().iter().collect();
        assert!(emoji_helper(&view).is_empty());
    }
}
