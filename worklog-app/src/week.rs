//! Week-window derivation and the weekly totals grid.

use std::collections::BTreeMap;

use chrono::{Datelike, Days, NaiveDate};

use worklog::domain::{DailyLogEntry, DailyLogRow, ReviewStatus};
use worklog::hours::{hours_to_clock, sum_entries};

/// A contiguous Monday-anchored 7-day range used to group entries for
/// weekly display. Derived, never persisted.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct WeekWindow {
    start: NaiveDate,
}

impl WeekWindow {
    /// The week containing the given date.
    pub fn containing(date: NaiveDate) -> Self {
        let offset = date.weekday().num_days_from_monday() as u64;
        Self {
            start: date - Days::new(offset),
        }
    }

    pub fn start(&self) -> NaiveDate {
        self.start
    }

    pub fn end(&self) -> NaiveDate {
        self.start + Days::new(6)
    }

    pub fn previous(&self) -> Self {
        Self {
            start: self.start - Days::new(7),
        }
    }

    pub fn next(&self) -> Self {
        Self {
            start: self.start + Days::new(7),
        }
    }

    pub fn dates(&self) -> impl Iterator<Item = NaiveDate> {
        let start = self.start;
        (0..7).map(move |i| start + Days::new(i))
    }

    pub fn contains(&self, date: NaiveDate) -> bool {
        date >= self.start && date <= self.end()
    }
}

/// A week's entries grouped by day, with the totals the weekly table
/// shows: per project per day, per project across the week, per day, and
/// the grand total.
#[derive(Debug, Clone, Default)]
pub struct WeekLogs {
    by_day: BTreeMap<NaiveDate, Vec<DailyLogEntry>>,
}

impl WeekLogs {
    pub fn from_rows(window: &WeekWindow, rows: Vec<DailyLogRow>) -> Self {
        let mut by_day: BTreeMap<NaiveDate, Vec<DailyLogEntry>> = BTreeMap::new();
        for row in rows {
            let entry = DailyLogEntry::from_row(row, window.start());
            if window.contains(entry.log_date) {
                by_day.entry(entry.log_date).or_default().push(entry);
            }
        }
        Self { by_day }
    }

    pub fn day_entries(&self, date: NaiveDate) -> &[DailyLogEntry] {
        self.by_day.get(&date).map(Vec::as_slice).unwrap_or(&[])
    }

    /// Project ids that have at least one entry this week, in first-seen
    /// day order. The weekly table only lists these.
    pub fn active_project_ids(&self) -> Vec<i64> {
        let mut ids = Vec::new();
        for entries in self.by_day.values() {
            for entry in entries {
                if let Some(id) = entry.project_id {
                    if !ids.contains(&id) {
                        ids.push(id);
                    }
                }
            }
        }
        ids
    }

    pub fn project_day_hours(&self, project_id: i64, date: NaiveDate) -> f64 {
        sum_entries(
            self.day_entries(date)
                .iter()
                .filter(|e| e.project_id == Some(project_id))
                .map(|e| &e.hours),
        )
    }

    pub fn project_week_hours(&self, project_id: i64) -> f64 {
        sum_entries(
            self.by_day
                .values()
                .flatten()
                .filter(|e| e.project_id == Some(project_id))
                .map(|e| &e.hours),
        )
    }

    pub fn day_hours(&self, date: NaiveDate) -> f64 {
        sum_entries(self.day_entries(date).iter().map(|e| &e.hours))
    }

    pub fn grand_total_hours(&self) -> f64 {
        sum_entries(self.by_day.values().flatten().map(|e| &e.hours))
    }

    pub fn grand_total_display(&self) -> String {
        hours_to_clock(self.grand_total_hours())
    }

    /// Review status shown in a project/day cell: the first entry's.
    pub fn project_day_status(&self, project_id: i64, date: NaiveDate) -> Option<ReviewStatus> {
        self.day_entries(date)
            .iter()
            .find(|e| e.project_id == Some(project_id))
            .map(|e| e.status)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use worklog::domain::HoursValue;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn row(project_id: i64, log_date: NaiveDate, hours: HoursValue) -> DailyLogRow {
        DailyLogRow {
            id: Some(1),
            project_id: Some(project_id),
            log_date: Some(log_date),
            total_hours: Some(hours),
            ..Default::default()
        }
    }

    #[test]
    fn test_week_window_anchors_to_monday() {
        // 2025-08-06 is a Wednesday.
        let window = WeekWindow::containing(date(2025, 8, 6));
        assert_eq!(window.start(), date(2025, 8, 4));
        assert_eq!(window.end(), date(2025, 8, 10));
    }

    #[test]
    fn test_week_window_of_sunday_reaches_back_six_days() {
        let window = WeekWindow::containing(date(2025, 8, 10));
        assert_eq!(window.start(), date(2025, 8, 4));
    }

    #[test]
    fn test_week_window_navigation() {
        let window = WeekWindow::containing(date(2025, 8, 4));
        assert_eq!(window.previous().start(), date(2025, 7, 28));
        assert_eq!(window.next().start(), date(2025, 8, 11));
        assert_eq!(window.dates().count(), 7);
    }

    #[test]
    fn test_week_totals_mix_representations() {
        let window = WeekWindow::containing(date(2025, 8, 4));
        let logs = WeekLogs::from_rows(
            &window,
            vec![
                row(1, date(2025, 8, 4), HoursValue::Text("1:00".to_string())),
                row(2, date(2025, 8, 4), HoursValue::Text("2:30".to_string())),
                row(1, date(2025, 8, 5), HoursValue::Number(1.25)),
            ],
        );

        assert_eq!(logs.day_hours(date(2025, 8, 4)), 3.5);
        assert_eq!(logs.project_week_hours(1), 2.25);
        assert_eq!(logs.project_day_hours(1, date(2025, 8, 5)), 1.25);
        assert_eq!(logs.grand_total_hours(), 4.75);
        assert_eq!(logs.grand_total_display(), "4:45");
        assert_eq!(logs.active_project_ids(), vec![1, 2]);
    }

    #[test]
    fn test_rows_outside_window_are_dropped() {
        let window = WeekWindow::containing(date(2025, 8, 4));
        let logs = WeekLogs::from_rows(
            &window,
            vec![row(1, date(2025, 7, 30), HoursValue::Number(8.0))],
        );
        assert_eq!(logs.grand_total_hours(), 0.0);
    }
}
