use chatlens_core::{Message, MonthPeriod};
use chrono::NaiveDate;
use serde::Serialize;
use std::collections::BTreeMap;

use super::user_messages;

/// Message count for one month.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct MonthlyPoint {
    /// Year and month, displayed as `"Mon YYYY"`.
    pub period: MonthPeriod,
    /// Participant messages in that month.
    pub messages: usize,
}

/// Message count for one calendar day.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct DailyPoint {
    /// Calendar date.
    pub date: NaiveDate,
    /// Participant messages on that day.
    pub messages: usize,
}

/// Messages per month, oldest first. Months without messages are omitted.
pub fn monthly_timeline(messages: &[&Message]) -> Vec<MonthlyPoint> {
    let mut months: BTreeMap<MonthPeriod, usize> = BTreeMap::new();
    for message in user_messages(messages) {
        *months.entry(message.month_period).or_insert(0) += 1;
    }
    months
        .into_iter()
        .map(|(period, messages)| MonthlyPoint { period, messages })
        .collect()
}

/// Messages per day, oldest first. Days without messages are omitted.
pub fn daily_timeline(messages: &[&Message]) -> Vec<DailyPoint> {
    let mut days: BTreeMap<NaiveDate, usize> = BTreeMap::new();
    for message in user_messages(messages) {
        *days.entry(message.date).or_insert(0) += 1;
    }
    days.into_iter()
        .map(|(date, messages)| DailyPoint { date, messages })
        .collect()
}
