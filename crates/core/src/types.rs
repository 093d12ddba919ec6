use chrono::{Datelike, NaiveDate, NaiveDateTime};
use serde::{Deserialize, Serialize, Serializer};
use std::fmt;

use crate::constants::OVERALL_USER;

/// Who produced a transcript entry.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(tag = "kind", content = "name", rename_all = "snake_case")]
pub enum Author {
    /// A chat participant, identified by the display name in the export.
    User(String),

    /// Group notification (joins, leaves, title changes).
    SystemNotification,
}

impl Author {
    /// Returns the participant name, or `None` for notifications.
    pub fn name(&self) -> Option<&str> {
        match self {
            Author::User(name) => Some(name),
            Author::SystemNotification => None,
        }
    }

    /// Whether this entry was written by a participant.
    pub fn is_user(&self) -> bool {
        matches!(self, Author::User(_))
    }
}

impl fmt::Display for Author {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Author::User(name) => write!(f, "{}", name),
            Author::SystemNotification => write!(f, "group_notification"),
        }
    }
}

/// Day of the week, rendered by its English name.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Deserialize)]
pub enum DayOfWeek {
    Monday,
    Tuesday,
    Wednesday,
    Thursday,
    Friday,
    Saturday,
    Sunday,
}

impl DayOfWeek {
    /// All days, Monday first.
    pub const ALL: [DayOfWeek; 7] = [
        DayOfWeek::Monday,
        DayOfWeek::Tuesday,
        DayOfWeek::Wednesday,
        DayOfWeek::Thursday,
        DayOfWeek::Friday,
        DayOfWeek::Saturday,
        DayOfWeek::Sunday,
    ];

    /// English day name.
    pub fn name(self) -> &'static str {
        match self {
            DayOfWeek::Monday => "Monday",
            DayOfWeek::Tuesday => "Tuesday",
            DayOfWeek::Wednesday => "Wednesday",
            DayOfWeek::Thursday => "Thursday",
            DayOfWeek::Friday => "Friday",
            DayOfWeek::Saturday => "Saturday",
            DayOfWeek::Sunday => "Sunday",
        }
    }
}

impl From<chrono::Weekday> for DayOfWeek {
    fn from(day: chrono::Weekday) -> Self {
        match day {
            chrono::Weekday::Mon => DayOfWeek::Monday,
            chrono::Weekday::Tue => DayOfWeek::Tuesday,
            chrono::Weekday::Wed => DayOfWeek::Wednesday,
            chrono::Weekday::Thu => DayOfWeek::Thursday,
            chrono::Weekday::Fri => DayOfWeek::Friday,
            chrono::Weekday::Sat => DayOfWeek::Saturday,
            chrono::Weekday::Sun => DayOfWeek::Sunday,
        }
    }
}

impl fmt::Display for DayOfWeek {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl Serialize for DayOfWeek {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        serializer.serialize_str(self.name())
    }
}

const MONTH_NAMES: [&str; 12] = [
    "January",
    "February",
    "March",
    "April",
    "May",
    "June",
    "July",
    "August",
    "September",
    "October",
    "November",
    "December",
];

/// Full English month name for a 1-based month number.
///
/// Out-of-range months map to an empty string.
pub fn month_name(month: u32) -> &'static str {
    month
        .checked_sub(1)
        .and_then(|idx| MONTH_NAMES.get(idx as usize))
        .copied()
        .unwrap_or("")
}

/// Year and month grouping key.
///
/// Ordering is chronological (year first); display is `"Mon YYYY"`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct MonthPeriod {
    /// Calendar year.
    pub year: i32,
    /// Month, 1 through 12.
    pub month: u32,
}

impl MonthPeriod {
    /// Month period containing `date`.
    pub fn of(date: NaiveDate) -> Self {
        Self {
            year: date.year(),
            month: date.month(),
        }
    }
}

impl fmt::Display for MonthPeriod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = month_name(self.month);
        let short = name.get(..3).unwrap_or(name);
        write!(f, "{} {}", short, self.year)
    }
}

impl Serialize for MonthPeriod {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

/// One-hour band of the day, labelled as a range such as `"13-14"`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct HourBand(pub u32);

impl HourBand {
    /// All 24 bands starting at midnight.
    pub fn all() -> impl Iterator<Item = HourBand> {
        (0..24).map(HourBand)
    }
}

impl fmt::Display for HourBand {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:02}-{:02}", self.0 % 24, (self.0 + 1) % 24)
    }
}

impl Serialize for HourBand {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

/// A normalized transcript entry.
///
/// Derived fields are computed once by the normalizer and never change.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Message {
    /// Timestamp parsed from the boundary line.
    pub timestamp: NaiveDateTime,

    /// Sender of the entry.
    pub author: Author,

    /// Message body, possibly spanning several lines.
    pub text: String,

    /// Calendar date of `timestamp`.
    pub date: NaiveDate,

    /// Hour of day, 0 through 23.
    pub hour: u32,

    /// Weekday of `date`.
    pub day_of_week: DayOfWeek,

    /// Year and month of `date`.
    pub month_period: MonthPeriod,

    /// Number of whitespace separated words, media placeholder excluded.
    pub word_count: usize,

    /// Body carries the media-omitted placeholder.
    pub is_media: bool,

    /// Body contains an http(s) URL.
    pub contains_link: bool,
}

impl Message {
    /// Whether this entry was written by a participant.
    pub fn is_user_message(&self) -> bool {
        self.author.is_user()
    }

    /// Hour band this message falls into.
    pub fn hour_band(&self) -> HourBand {
        HourBand(self.hour)
    }
}

/// Ordered, immutable result of parsing one transcript.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct Transcript {
    messages: Vec<Message>,
}

impl Transcript {
    /// Wraps messages already in transcript order.
    pub fn new(messages: Vec<Message>) -> Self {
        Self { messages }
    }

    /// All messages in transcript order.
    pub fn messages(&self) -> &[Message] {
        &self.messages
    }

    /// Number of messages, notifications included.
    pub fn len(&self) -> usize {
        self.messages.len()
    }

    /// Whether the transcript produced no messages.
    pub fn is_empty(&self) -> bool {
        self.messages.is_empty()
    }
}

/// Which authors a request looks at.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(tag = "scope", content = "name", rename_all = "snake_case")]
pub enum UserScope {
    /// Every author, notifications included.
    #[default]
    Overall,

    /// A single participant, matched by exact name.
    Author(String),
}

impl UserScope {
    /// Maps a selection string, treating `"Overall"` as the wildcard.
    pub fn parse(selection: &str) -> Self {
        if selection == OVERALL_USER {
            UserScope::Overall
        } else {
            UserScope::Author(selection.to_string())
        }
    }

    /// Whether this is the wildcard scope.
    pub fn is_overall(&self) -> bool {
        matches!(self, UserScope::Overall)
    }

    /// Whether `author` falls inside this scope.
    pub fn matches(&self, author: &Author) -> bool {
        match (self, author) {
            (UserScope::Overall, _) => true,
            (UserScope::Author(wanted), Author::User(name)) => wanted == name,
            (UserScope::Author(_), Author::SystemNotification) => false,
        }
    }
}

impl fmt::Display for UserScope {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            UserScope::Overall => f.write_str(OVERALL_USER),
            UserScope::Author(name) => f.write_str(name),
        }
    }
}

/// Inclusive calendar date range.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct DateRange {
    /// First date included.
    pub start: NaiveDate,
    /// Last date included.
    pub end: NaiveDate,
}

impl DateRange {
    /// Creates a range; `start > end` is allowed and matches nothing.
    pub fn new(start: NaiveDate, end: NaiveDate) -> Self {
        Self { start, end }
    }

    /// Whether `date` lies inside the range.
    pub fn contains(&self, date: NaiveDate) -> bool {
        self.start <= date && date <= self.end
    }

    /// Whether the range cannot match any date.
    pub fn is_inverted(&self) -> bool {
        self.start > self.end
    }
}

/// Author and date restriction applied before every analysis.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct MessageFilter {
    /// Author scope.
    pub user: UserScope,
    /// Optional inclusive date range; `None` keeps every date.
    pub date_range: Option<DateRange>,
}

impl MessageFilter {
    /// Filter that keeps everything.
    pub fn overall() -> Self {
        Self::default()
    }

    /// Restrict to a single author.
    pub fn with_user(mut self, user: UserScope) -> Self {
        self.user = user;
        self
    }

    /// Restrict to an inclusive date range.
    pub fn with_date_range(mut self, range: DateRange) -> Self {
        self.date_range = Some(range);
        self
    }

    /// Whether `message` passes both restrictions.
    pub fn matches(&self, message: &Message) -> bool {
        self.user.matches(&message.author)
            && self
                .date_range
                .map_or(true, |range| range.contains(message.date))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn month_period_orders_chronologically_not_lexically() {
        let dec = MonthPeriod {
            year: 2023,
            month: 12,
        };
        let jan = MonthPeriod {
            year: 2024,
            month: 1,
        };
        assert!(dec < jan);
        assert_eq!(dec.to_string(), "Dec 2023");
        assert_eq!(jan.to_string(), "Jan 2024");
    }

    #[test]
    fn hour_band_labels_wrap_at_midnight() {
        assert_eq!(HourBand(13).to_string(), "13-14");
        assert_eq!(HourBand(23).to_string(), "23-00");
        assert_eq!(HourBand(0).to_string(), "00-01");
    }

    #[test]
    fn author_scope_never_matches_notifications() {
        let scope = UserScope::parse("Alice");
        assert!(scope.matches(&Author::User("Alice".to_string())));
        assert!(!scope.matches(&Author::User("alice".to_string())));
        assert!(!scope.matches(&Author::SystemNotification));
        assert!(UserScope::parse("Overall").matches(&Author::SystemNotification));
    }

    #[test]
    fn inverted_date_range_contains_nothing() {
        let a = NaiveDate::from_ymd_opt(2023, 1, 5).expect("valid date");
        let b = NaiveDate::from_ymd_opt(2023, 1, 1).expect("valid date");
        let range = DateRange::new(a, b);
        assert!(range.is_inverted());
        assert!(!range.contains(a));
        assert!(!range.contains(b));
    }

    #[test]
    fn month_name_rejects_out_of_range() {
        assert_eq!(month_name(1), "January");
        assert_eq!(month_name(12), "December");
        assert_eq!(month_name(0), "");
        assert_eq!(month_name(13), "");
    }
}
