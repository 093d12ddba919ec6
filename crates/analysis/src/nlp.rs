use once_cell::sync::Lazy;
use regex::Regex;
use std::collections::HashSet;

/// One emoji: a regional-indicator pair (a flag), or a single pictographic
/// or skin-tone modifier code point.
static EMOJI: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"\p{Regional_Indicator}{1,2}|[\p{Extended_Pictographic}\p{Emoji_Modifier}]")
        .expect("valid emoji regex")
});

/// Built-in stopwords: English function words plus the romanized Hindi
/// filler common in mixed-language chats.
static DEFAULT_STOPWORDS: Lazy<HashSet<&'static str>> = Lazy::new(|| {
    [
        // English
        "a", "about", "above", "after", "again", "all", "am", "an", "and", "any", "are", "as",
        "at", "be", "because", "been", "before", "being", "below", "between", "both", "but",
        "by", "can", "could", "did", "do", "does", "doing", "down", "during", "each", "few",
        "for", "from", "further", "had", "has", "have", "having", "he", "her", "here", "hers",
        "herself", "him", "himself", "his", "how", "i", "i'm", "if", "in", "into", "is", "it",
        "it's", "its", "itself", "just", "me", "more", "most", "my", "myself", "no", "nor",
        "not", "now", "of", "off", "on", "once", "only", "or", "other", "our", "ours",
        "ourselves", "out", "over", "own", "same", "she", "should", "so", "some", "such",
        "than", "that", "the", "their", "theirs", "them", "themselves", "then", "there",
        "these", "they", "this", "those", "through", "to", "too", "under", "until", "up",
        "very", "was", "we", "were", "what", "when", "where", "which", "while", "who", "whom",
        "why", "will", "with", "would", "you", "your", "yours", "yourself", "yourselves",
        "ok", "okay", "u", "ur", "im", "dont", "don't", "yes", "yeah",
        // Hinglish
        "hai", "hain", "ha", "haan", "nahi", "nhi", "na", "ki", "ka", "ke", "ko", "se", "me",
        "mai", "main", "mein", "tu", "tum", "tera", "teri", "mera", "meri", "mere", "kya",
        "kyu", "kyun", "bhi", "toh", "to", "ho", "hu", "hoon", "tha", "thi", "the", "aur",
        "ye", "yeh", "wo", "woh", "vo", "ab", "koi", "kuch", "sab", "par", "pe", "bas", "hi",
        "abhi", "kar", "karo", "raha", "rahi", "rahe", "gaya", "gayi", "diya", "liya", "apna",
        "apni", "uska", "uski", "unka", "hum", "humne", "maine", "tune", "wala", "wali",
        "waale", "jo", "jab", "tab", "kab", "kaise", "kahan", "yaar", "bhai", "acha", "accha",
        "achha",
    ]
    .into_iter()
    .collect()
});

/// Case-fold a body into word tokens.
///
/// Splits on whitespace, strips punctuation at either end of each token,
/// and drops tokens that end up empty.
pub fn tokenize(text: &str) -> impl Iterator<Item = String> + '_ {
    text.split_whitespace().filter_map(|raw| {
        let token = raw
            .trim_matches(|c: char| !c.is_alphanumeric() && c != '\'')
            .trim_matches('\'')
            .to_lowercase();
        if token.is_empty() {
            None
        } else {
            Some(token)
        }
    })
}

/// Emoji characters in `text`, in order of appearance.
pub fn extract_emoji(text: &str) -> impl Iterator<Item = &str> + '_ {
    EMOJI.find_iter(text).map(|m| m.as_str())
}

/// Stopwords filter for word statistics.
#[derive(Debug, Clone, Default)]
pub struct Stopwords {
    extra: HashSet<String>,
    disabled: bool,
}

impl Stopwords {
    /// Built-in stopword list only.
    pub fn new() -> Self {
        Self::default()
    }

    /// Built-in list plus `words` (case-folded).
    pub fn with_extra<I, S>(words: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        Self {
            extra: words
                .into_iter()
                .map(|w| w.as_ref().trim().to_lowercase())
                .filter(|w| !w.is_empty())
                .collect(),
            disabled: false,
        }
    }

    /// A filter that keeps every word.
    pub fn disabled() -> Self {
        Self {
            extra: HashSet::new(),
            disabled: true,
        }
    }

    /// Check if a case-folded word is a stopword.
    pub fn is_stopword(&self, word: &str) -> bool {
        !self.disabled && (DEFAULT_STOPWORDS.contains(word) || self.extra.contains(word))
    }
}
