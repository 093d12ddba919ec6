//! Boundary-line timestamp parsing.
//!
//! Exports differ in year width, clock style, whether seconds are written,
//! and whether the day or the month comes first. The date order is decided
//! once per transcript with [`DateOrder::detect`]; within that order the
//! layouts are tried in sequence and the first one that parses wins.

use chrono::NaiveDateTime;
use serde::Serialize;

/// Day-first layouts tried against `"<date> <time>[ AM|PM]"`.
///
/// Two-digit years come before four-digit ones: `%y` rejects `2023`,
/// while `%Y` would happily read `23` as the year 23.
pub const DAY_FIRST_FORMATS: &[&str] = &[
    "%d/%m/%y %H:%M",
    "%d/%m/%y %H:%M:%S",
    "%d/%m/%y %I:%M %p",
    "%d/%m/%y %I:%M:%S %p",
    "%d/%m/%Y %H:%M",
    "%d/%m/%Y %H:%M:%S",
    "%d/%m/%Y %I:%M %p",
    "%d/%m/%Y %I:%M:%S %p",
];

/// Month-first counterparts of [`DAY_FIRST_FORMATS`].
pub const MONTH_FIRST_FORMATS: &[&str] = &[
    "%m/%d/%y %H:%M",
    "%m/%d/%y %H:%M:%S",
    "%m/%d/%y %I:%M %p",
    "%m/%d/%y %I:%M:%S %p",
    "%m/%d/%Y %H:%M",
    "%m/%d/%Y %H:%M:%S",
    "%m/%d/%Y %I:%M %p",
    "%m/%d/%Y %I:%M:%S %p",
];

/// Order of the day and month fields in a transcript's dates.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum DateOrder {
    /// `dd/mm/yy`.
    #[default]
    DayFirst,
    /// `mm/dd/yy`.
    MonthFirst,
}

impl DateOrder {
    /// Decide the order from a transcript's boundary dates.
    ///
    /// A leading field above 12 votes day-first, a middle field above 12
    /// votes month-first. Month-first needs strictly more votes; otherwise,
    /// including when no date is decisive, day-first is used.
    pub fn detect<'a, I>(dates: I) -> Self
    where
        I: IntoIterator<Item = &'a str>,
    {
        let (mut day_votes, mut month_votes) = (0usize, 0usize);
        for date in dates {
            let mut fields = date.split('/').map(|f| f.parse::<u32>().unwrap_or(0));
            let first = fields.next().unwrap_or(0);
            let second = fields.next().unwrap_or(0);
            if first > 12 {
                day_votes += 1;
            }
            if second > 12 {
                month_votes += 1;
            }
        }
        if month_votes > day_votes {
            DateOrder::MonthFirst
        } else {
            DateOrder::DayFirst
        }
    }

    /// Layouts for this order, followed by the other order as a fallback.
    fn formats(self) -> impl Iterator<Item = &'static &'static str> {
        let (preferred, fallback) = match self {
            DateOrder::DayFirst => (DAY_FIRST_FORMATS, MONTH_FIRST_FORMATS),
            DateOrder::MonthFirst => (MONTH_FIRST_FORMATS, DAY_FIRST_FORMATS),
        };
        preferred.iter().chain(fallback.iter())
    }
}

/// Parse a boundary timestamp assuming day-first dates.
///
/// Returns `None` when no layout accepts the input.
pub fn parse_timestamp(date: &str, time: &str, meridiem: Option<&str>) -> Option<NaiveDateTime> {
    parse_timestamp_in(DateOrder::DayFirst, date, time, meridiem)
}

/// Parse the date, time, and optional meridiem captured from a boundary line,
/// trying `order` first.
pub fn parse_timestamp_in(
    order: DateOrder,
    date: &str,
    time: &str,
    meridiem: Option<&str>,
) -> Option<NaiveDateTime> {
    let candidate = match meridiem.map(normalize_meridiem) {
        Some(marker) => format!("{} {} {}", date, time, marker),
        None => format!("{} {}", date, time),
    };

    order
        .formats()
        .find_map(|format| NaiveDateTime::parse_from_str(&candidate, format).ok())
}

/// `a.m.`, `Am`, `pm` and friends become `AM` / `PM`.
fn normalize_meridiem(raw: &str) -> &'static str {
    let first = raw.trim_start().chars().next().map(|c| c.to_ascii_lowercase());
    if first == Some('p') {
        "PM"
    } else {
        "AM"
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Datelike, Timelike};

    #[test]
    fn two_digit_year_24h() {
        let ts = parse_timestamp("01/01/23", "10:05", None).expect("should parse");
        assert_eq!((ts.year(), ts.month(), ts.day()), (2023, 1, 1));
        assert_eq!((ts.hour(), ts.minute()), (10, 5));
    }

    #[test]
    fn four_digit_year_is_not_read_as_two_digit() {
        let ts = parse_timestamp("15/08/2021", "23:59:30", None).expect("should parse");
        assert_eq!((ts.year(), ts.month(), ts.day()), (2021, 8, 15));
        assert_eq!(ts.second(), 30);
    }

    #[test]
    fn twelve_hour_clock_with_meridiem_variants() {
        let pm = parse_timestamp("3/4/22", "1:15", Some("p.m.")).expect("should parse");
        assert_eq!(pm.hour(), 13);
        let midnight = parse_timestamp("3/4/22", "12:00", Some("am")).expect("should parse");
        assert_eq!(midnight.hour(), 0);
    }

    #[test]
    fn month_first_is_the_fallback() {
        let ts = parse_timestamp("12/25/23", "08:00", None).expect("should parse");
        assert_eq!((ts.month(), ts.day()), (12, 25));
    }

    #[test]
    fn month_first_order_reads_ambiguous_dates_as_month_first() {
        let ts = parse_timestamp_in(DateOrder::MonthFirst, "1/12/23", "10:00", None)
            .expect("should parse");
        assert_eq!((ts.month(), ts.day()), (1, 12));
        let ts = parse_timestamp("1/12/23", "10:00", None).expect("should parse");
        assert_eq!((ts.month(), ts.day()), (12, 1));
    }

    #[test]
    fn detect_date_order_from_decisive_dates() {
        assert_eq!(
            DateOrder::detect(["1/12/23", "1/13/23", "2/28/23"]),
            DateOrder::MonthFirst
        );
        assert_eq!(
            DateOrder::detect(["13/1/23", "1/2/23"]),
            DateOrder::DayFirst
        );
        assert_eq!(DateOrder::detect(["1/2/23", "3/4/23"]), DateOrder::DayFirst);
        assert_eq!(DateOrder::detect(Vec::<&str>::new()), DateOrder::DayFirst);
    }

    #[test]
    fn impossible_dates_fail() {
        assert!(parse_timestamp("31/31/23", "10:00", None).is_none());
        assert!(parse_timestamp("01/01/23", "25:00", None).is_none());
    }
}
