use chatlens_core::{Author, Transcript};
use chrono::NaiveDateTime;
use once_cell::sync::Lazy;
use regex::Regex;
use serde::Serialize;
use std::path::Path;
use tracing::{debug, warn};

use crate::error::AnalysisResult;
use crate::normalizer::{normalize, NormalizeOptions};

/// Ordered timestamp layouts and their parser.
pub mod timestamp;

pub use timestamp::{parse_timestamp, parse_timestamp_in, DateOrder};

/// Start of a new transcript entry: `<date>, <time>[ AM|PM] - <rest>`,
/// or the bracketed `[<date>, <time>] <rest>` layout.
static BOUNDARY: Lazy<Regex> = Lazy::new(|| {
    Regex::new(
        r"^\[?(?P<date>\d{1,2}/\d{1,2}/\d{2,4}),?\s+(?P<time>\d{1,2}:\d{2}(?::\d{2})?)(?:\s*(?P<meridiem>[AaPp]\.?\s?[Mm]\.?))?(?:\]\s*|\s+-(?:\s+|$))(?P<rest>.*)$",
    )
    .expect("valid transcript boundary regex")
});

/// Separator between author and body on a boundary line.
const AUTHOR_DELIMITER: &str = ": ";

/// An entry split out of the transcript, before derived fields are computed.
#[derive(Debug, Clone, PartialEq)]
pub struct RawEntry {
    /// Timestamp from the boundary line.
    pub timestamp: NaiveDateTime,
    /// Participant or system notification.
    pub author: Author,
    /// Body including continuation lines.
    pub text: String,
}

/// Line accounting for one parse.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct ParseStats {
    /// Lines that matched the boundary pattern.
    pub boundaries: usize,
    /// Entries emitted.
    pub messages: usize,
    /// Lines appended to the preceding entry.
    pub continuation_lines: usize,
    /// Boundary lines whose timestamp no layout accepted.
    pub bad_timestamps: usize,
    /// Non-boundary lines with no open entry to attach to.
    pub orphan_lines: usize,
    /// Day/month order used for every timestamp in the transcript.
    pub date_order: DateOrder,
}

/// Parser for line-oriented chat transcript exports.
#[derive(Debug, Clone, Default)]
pub struct TranscriptParser {
    options: NormalizeOptions,
}

impl TranscriptParser {
    /// Creates a parser with the default media placeholder.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a parser with custom normalization options.
    pub fn with_options(options: NormalizeOptions) -> Self {
        Self { options }
    }

    /// Parse transcript text into normalized messages.
    ///
    /// Never fails: unparsable lines are merged or dropped.
    pub fn parse(&self, raw: &str) -> Transcript {
        self.parse_with_stats(raw).0
    }

    /// Parse transcript text and report how each line was handled.
    pub fn parse_with_stats(&self, raw: &str) -> (Transcript, ParseStats) {
        let (entries, stats) = split_entries(raw);
        let messages = entries
            .into_iter()
            .map(|entry| normalize(entry, &self.options))
            .collect();
        (Transcript::new(messages), stats)
    }

    /// Decode bytes as UTF-8 and parse them.
    ///
    /// Undecodable input is the only error.
    pub fn parse_bytes(&self, bytes: &[u8]) -> AnalysisResult<Transcript> {
        let raw = std::str::from_utf8(bytes)?;
        Ok(self.parse(raw))
    }

    /// Read and parse a transcript file.
    pub fn parse_file(&self, path: &Path) -> AnalysisResult<Transcript> {
        let bytes = std::fs::read(path)?;
        let transcript = self.parse_bytes(&bytes)?;
        debug!(
            "parsed {} messages from {}",
            transcript.len(),
            path.display()
        );
        Ok(transcript)
    }
}

/// Parse with default options.
pub fn parse(raw: &str) -> Transcript {
    TranscriptParser::new().parse(raw)
}

/// Split raw text into entries at boundary lines.
pub fn split_entries(raw: &str) -> (Vec<RawEntry>, ParseStats) {
    let raw = raw.strip_prefix('\u{feff}').unwrap_or(raw);
    let lines: Vec<&str> = raw
        .lines()
        .map(|line| line.trim_start_matches(['\u{200e}', '\u{200f}']))
        .collect();

    let mut stats = ParseStats {
        date_order: DateOrder::detect(
            lines
                .iter()
                .filter_map(|line| BOUNDARY.captures(line))
                .filter_map(|caps| caps.name("date").map(|m| m.as_str())),
        ),
        ..ParseStats::default()
    };
    let mut entries = Vec::new();
    let mut current: Option<RawEntry> = None;

    for line in lines {
        if let Some(caps) = BOUNDARY.captures(line) {
            stats.boundaries += 1;
            if let Some(done) = current.take() {
                entries.push(finish(done));
            }

            let date = &caps["date"];
            let time = &caps["time"];
            let meridiem = caps.name("meridiem").map(|m| m.as_str());
            match parse_timestamp_in(stats.date_order, date, time, meridiem) {
                Some(timestamp) => {
                    let (author, text) = split_author(&caps["rest"]);
                    current = Some(RawEntry {
                        timestamp,
                        author,
                        text,
                    });
                }
                None => {
                    stats.bad_timestamps += 1;
                    warn!("dropping entry with unparsable timestamp: {} {}", date, time);
                }
            }
            continue;
        }

        match current.as_mut() {
            Some(entry) => {
                // An `Author:` line with nothing after the colon starts its body here.
                if !entry.text.is_empty() {
                    entry.text.push('\n');
                }
                entry.text.push_str(line);
                stats.continuation_lines += 1;
            }
            None => stats.orphan_lines += 1,
        }
    }

    if let Some(done) = current.take() {
        entries.push(finish(done));
    }
    stats.messages = entries.len();

    debug!(
        "transcript split ({:?}): {} boundaries, {} messages, {} continuation lines, {} dropped",
        stats.date_order,
        stats.boundaries,
        stats.messages,
        stats.continuation_lines,
        stats.bad_timestamps + stats.orphan_lines
    );

    (entries, stats)
}

/// Author/body split on the first `": "`, or a trailing `:` with the body on
/// the following lines. Anything else is a notification.
fn split_author(rest: &str) -> (Author, String) {
    if let Some((author, body)) = rest.split_once(AUTHOR_DELIMITER) {
        let author = author.trim();
        if !author.is_empty() {
            return (Author::User(author.to_string()), body.to_string());
        }
    }
    if let Some(author) = rest.trim_end().strip_suffix(':') {
        let author = author.trim();
        if !author.is_empty() {
            return (Author::User(author.to_string()), String::new());
        }
    }
    (Author::SystemNotification, rest.trim().to_string())
}

/// Drop trailing blank continuation lines; the body text itself is kept as written.
fn finish(mut entry: RawEntry) -> RawEntry {
    let trimmed = entry.text.trim_end_matches(['\n', '\r']).len();
    entry.text.truncate(trimmed);
    entry
}
