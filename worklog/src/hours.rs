//! Date and hour helpers shared by every timesheet surface.
//!
//! The backend is loose about hour representations: some endpoints return
//! decimal hours, others `H:MM` strings, and locally edited rows hold raw
//! user input. Everything here tolerates that mix, treating malformed
//! values as zero rather than failing a whole table render.

use chrono::{Datelike, NaiveDate};

use crate::domain::HoursValue;

const MINUTES_PER_DAY: u32 = 24 * 60;

/// Formats a date as `YYYY-MM-DD`; `None` renders as an empty string.
pub fn to_iso_date(date: Option<NaiveDate>) -> String {
    match date {
        Some(d) => d.format("%Y-%m-%d").to_string(),
        None => String::new(),
    }
}

/// True iff `s` is shaped `YYYY-MM-DD` and names a real calendar date.
pub fn is_valid_date(s: &str) -> bool {
    parse_iso_date(s).is_some()
}

pub fn parse_iso_date(s: &str) -> Option<NaiveDate> {
    let bytes = s.as_bytes();
    if bytes.len() != 10 || bytes[4] != b'-' || bytes[7] != b'-' {
        return None;
    }
    if !s
        .chars()
        .enumerate()
        .all(|(i, c)| matches!(i, 4 | 7) || c.is_ascii_digit())
    {
        return None;
    }
    NaiveDate::parse_from_str(s, "%Y-%m-%d").ok()
}

/// True iff `s` is `HH:MM` with hours in 0..24 and minutes in 0..60.
pub fn is_valid_time(s: &str) -> bool {
    clock_to_minutes(s).is_some()
}

/// Wall-clock `HH:MM` as minutes since midnight. Strict two-digit fields.
pub fn clock_to_minutes(s: &str) -> Option<u32> {
    let bytes = s.as_bytes();
    if bytes.len() != 5 || bytes[2] != b':' {
        return None;
    }
    if !s
        .chars()
        .enumerate()
        .all(|(i, c)| i == 2 || c.is_ascii_digit())
    {
        return None;
    }
    let hours: u32 = s[..2].parse().ok()?;
    let minutes: u32 = s[3..].parse().ok()?;
    if hours < 24 && minutes < 60 {
        Some(hours * 60 + minutes)
    } else {
        None
    }
}

/// Full English weekday name for an ISO date string; empty when invalid.
pub fn day_of_week(date_str: &str) -> String {
    match parse_iso_date(date_str) {
        Some(date) => weekday_name(date).to_string(),
        None => String::new(),
    }
}

pub fn weekday_name(date: NaiveDate) -> &'static str {
    match date.weekday() {
        chrono::Weekday::Mon => "Monday",
        chrono::Weekday::Tue => "Tuesday",
        chrono::Weekday::Wed => "Wednesday",
        chrono::Weekday::Thu => "Thursday",
        chrono::Weekday::Fri => "Friday",
        chrono::Weekday::Sat => "Saturday",
        chrono::Weekday::Sun => "Sunday",
    }
}

/// Decimal hours to `H:MM`, rounded to the nearest minute.
/// Non-finite or negative input renders as `0:00`.
pub fn hours_to_clock(hours: f64) -> String {
    if !hours.is_finite() || hours < 0.0 {
        return "0:00".to_string();
    }
    let total_minutes = (hours * 60.0).round() as u64;
    format!("{}:{:02}", total_minutes / 60, total_minutes % 60)
}

/// Inverse of [`hours_to_clock`]; malformed input yields `0.0`.
/// Minutes must stay below 60, so `"1:60"` is malformed rather than `2:00`.
pub fn clock_to_hours(clock: &str) -> f64 {
    let Some((h, m)) = clock.split_once(':') else {
        return 0.0;
    };
    let (Ok(hours), Ok(minutes)) = (h.parse::<u32>(), m.parse::<u32>()) else {
        return 0.0;
    };
    if m.len() != 2 || minutes >= 60 {
        return 0.0;
    }
    hours as f64 + minutes as f64 / 60.0
}

/// True iff `s` is a plain decimal (optional fraction) parsing into `[0, 24]`.
/// The save path additionally requires a strictly positive value.
pub fn is_valid_hours(s: &str) -> bool {
    if s.is_empty() || !s.chars().any(|c| c.is_ascii_digit()) {
        return false;
    }
    let mut seen_dot = false;
    for c in s.chars() {
        match c {
            '0'..='9' => {}
            '.' if !seen_dot => seen_dot = true,
            _ => return false,
        }
    }
    matches!(s.parse::<f64>(), Ok(v) if (0.0..=24.0).contains(&v))
}

/// Length of a wall-clock range as `H:MM`. Ranges that end at or before
/// their start are taken to cross midnight. Invalid input yields `0:00`.
pub fn range_hours(start: &str, end: &str) -> String {
    let (Some(start_mins), Some(end_mins)) = (clock_to_minutes(start), clock_to_minutes(end))
    else {
        return "0:00".to_string();
    };
    let mut mins = end_mins as i64 - start_mins as i64;
    if mins < 0 {
        mins += MINUTES_PER_DAY as i64;
    }
    format!("{}:{:02}", mins / 60, mins % 60)
}

/// Sums a collection of hour values, tolerating mixed `H:MM` strings and
/// decimals. Malformed values count as zero.
pub fn sum_entries<'a>(values: impl IntoIterator<Item = &'a HoursValue>) -> f64 {
    values.into_iter().map(HoursValue::as_hours).sum()
}
