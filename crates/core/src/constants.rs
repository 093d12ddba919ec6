//! Application constants and configuration defaults.

/// Placeholder body written by the exporter when media was left out.
pub const DEFAULT_MEDIA_PLACEHOLDER: &str = "<Media omitted>";

/// Wildcard user selection matching every author.
pub const OVERALL_USER: &str = "Overall";

/// Default number of authors in the busiest-users ranking.
pub const DEFAULT_TOP_USERS: usize = 5;

/// Default number of words in the most-common-words ranking.
pub const DEFAULT_TOP_WORDS: usize = 20;

/// Default cap on terms handed to the word cloud.
pub const DEFAULT_WORDCLOUD_MAX_WORDS: usize = 200;

/// Default number of messages on each side of the sentiment extremes table.
pub const DEFAULT_EXTREME_MESSAGES: usize = 5;

/// Configuration file name looked up under the user config directory.
pub const CONFIG_FILE_NAME: &str = "config.toml";
