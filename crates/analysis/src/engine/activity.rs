use chatlens_core::{month_name, DayOfWeek, HourBand, Message};
use chrono::Datelike;
use serde::Serialize;

use super::{user_messages, Tally};

/// Messages on one weekday.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct DayCount {
    /// Weekday.
    pub day: DayOfWeek,
    /// Participant messages.
    pub messages: usize,
}

/// Messages in one calendar month, summed over all years.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct MonthCount {
    /// Full month name.
    pub month: String,
    /// Participant messages.
    pub messages: usize,
}

/// Weekday by hour-band message counts.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Heatmap {
    /// Row labels, Monday first.
    pub days: Vec<DayOfWeek>,
    /// Column labels, `"00-01"` through `"23-00"`.
    pub bands: Vec<HourBand>,
    /// `cells[row][column]`; empty cells are zero.
    pub cells: Vec<Vec<usize>>,
}

impl Heatmap {
    fn empty() -> Self {
        Self {
            days: DayOfWeek::ALL.to_vec(),
            bands: HourBand::all().collect(),
            cells: vec![vec![0; 24]; DayOfWeek::ALL.len()],
        }
    }

    /// Count for one weekday and hour.
    pub fn get(&self, day: DayOfWeek, hour: u32) -> usize {
        self.cells
            .get(day_row(day))
            .and_then(|row| row.get(hour as usize))
            .copied()
            .unwrap_or(0)
    }

    /// Sum of every cell.
    pub fn total(&self) -> usize {
        self.cells.iter().flatten().sum()
    }
}

fn day_row(day: DayOfWeek) -> usize {
    DayOfWeek::ALL
        .iter()
        .position(|d| *d == day)
        .unwrap_or_default()
}

/// Messages per weekday, busiest first.
pub fn week_activity_map(messages: &[&Message]) -> Vec<DayCount> {
    user_messages(messages)
        .map(|m| m.day_of_week)
        .collect::<Tally<_>>()
        .ranked()
        .into_iter()
        .map(|(day, messages)| DayCount { day, messages })
        .collect()
}

/// Messages per calendar month name across all years, busiest first.
pub fn month_activity_map(messages: &[&Message]) -> Vec<MonthCount> {
    user_messages(messages)
        .map(|m| m.date.month())
        .collect::<Tally<_>>()
        .ranked()
        .into_iter()
        .map(|(month, messages)| MonthCount {
            month: month_name(month).to_string(),
            messages,
        })
        .collect()
}

/// Weekday by one-hour band matrix with every cell present.
pub fn activity_heatmap(messages: &[&Message]) -> Heatmap {
    let mut heatmap = Heatmap::empty();
    for message in user_messages(messages) {
        let row = day_row(message.day_of_week);
        if let Some(cell) = heatmap
            .cells
            .get_mut(row)
            .and_then(|cells| cells.get_mut(message.hour_band().0 as usize))
        {
            *cell += 1;
        }
    }
    heatmap
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::parsers::parse;

    const RAW: &str = "01/01/23, 10:00 - Alice: sunday one\n\
                       01/01/23, 10:30 - Bob: sunday two\n\
                       01/01/23, 10:45 - Dave joined\n\
                       02/01/23, 13:15 - Alice: monday\n\
                       06/02/23, 23:59 - Bob: february monday";

    #[test]
    fn weekday_counts_rank_busiest_first() {
        let transcript = parse(RAW);
        let view: Vec<&Message> = transcript.messages().iter().collect();
        assert_eq!(
            week_activity_map(&view),
            vec![
                DayCount {
                    day: DayOfWeek::Sunday,
                    messages: 2
                },
                DayCount {
                    day: DayOfWeek::Monday,
                    messages: 2
                },
            ]
        );
    }

    #[test]
    fn month_counts_use_full_names() {
        let transcript = parse(RAW);
        let view: Vec<&Message> = transcript.messages().iter().collect();
        let months = month_activity_map(&view);
        assert_eq!(months[0].month, "January");
        assert_eq!(months[0].messages, 3);
        assert_eq!(months[1].month, "February");
        assert_eq!(months[1].messages, 1);
    }

    #[test]
    fn heatmap_fills_missing_cells_with_zero() {
        let transcript = parse(RAW);
        let view: Vec<&Message> = transcript.messages().iter().collect();
        let heatmap = activity_heatmap(&view);
        assert_eq!(heatmap.days.len(), 7);
        assert_eq!(heatmap.bands.len(), 24);
        assert_eq!(heatmap.bands[13].to_string(), "13-14");
        assert_eq!(heatmap.get(DayOfWeek::Sunday, 10), 2);
        assert_eq!(heatmap.get(DayOfWeek::Monday, 13), 1);
        assert_eq!(heatmap.get(DayOfWeek::Monday, 23), 1);
        assert_eq!(heatmap.get(DayOfWeek::Friday, 10), 0);
        assert_eq!(heatmap.total(), 4);
    }

    #[test]
    fn empty_view_gives_empty_maps() {
        assert!(week_activity_map(&[]).is_empty());
        assert!(month_activity_map(&[]).is_empty());
        assert_eq!(activity_heatmap(&[]).total(), 0);
    }
}
