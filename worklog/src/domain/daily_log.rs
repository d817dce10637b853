use std::fmt;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::OnceLock;
use std::time::{SystemTime, UNIX_EPOCH};

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::hours::{clock_to_hours, hours_to_clock};

use super::DailyLogChange;

/// Identifier of a daily log entry. Rows the user has added but never
/// saved carry a client-generated temporary id; the server assigns the
/// persistent one on first save.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum LogId {
    Temporary(u64),
    Persisted(i64),
}

impl LogId {
    /// A temporary id unique within this session: a monotonic counter
    /// seeded from the process start time.
    pub fn fresh_temporary() -> Self {
        static COUNTER: OnceLock<AtomicU64> = OnceLock::new();
        let counter = COUNTER.get_or_init(|| {
            let seed = SystemTime::now()
                .duration_since(UNIX_EPOCH)
                .map(|d| d.as_millis() as u64)
                .unwrap_or(0);
            AtomicU64::new(seed << 16)
        });
        LogId::Temporary(counter.fetch_add(1, Ordering::Relaxed))
    }

    pub fn is_temporary(&self) -> bool {
        matches!(self, LogId::Temporary(_))
    }

    /// The server-assigned id, when there is one.
    pub fn persisted(&self) -> Option<i64> {
        match self {
            LogId::Persisted(id) => Some(*id),
            LogId::Temporary(_) => None,
        }
    }
}

impl fmt::Display for LogId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            LogId::Temporary(token) => write!(f, "temp-{}", token),
            LogId::Persisted(id) => write!(f, "{}", id),
        }
    }
}

/// Hours as they actually arrive: some endpoints send decimal hours,
/// others `H:MM` strings, and locally edited rows hold raw user input.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum HoursValue {
    Number(f64),
    Text(String),
}

impl HoursValue {
    /// Decimal hours, tolerating both representations. Malformed or
    /// non-finite values count as zero.
    pub fn as_hours(&self) -> f64 {
        match self {
            HoursValue::Number(n) if n.is_finite() => *n,
            HoursValue::Number(_) => 0.0,
            HoursValue::Text(s) => {
                if s == "0:00" {
                    return 0.0;
                }
                if s.contains(':') {
                    clock_to_hours(s)
                } else {
                    match s.parse::<f64>() {
                        Ok(v) if v.is_finite() => v,
                        _ => 0.0,
                    }
                }
            }
        }
    }

    /// `H:MM` rendering for tables and totals rows.
    pub fn display_clock(&self) -> String {
        hours_to_clock(self.as_hours())
    }

    /// The raw text a user typed, if any. Fetched decimal values render
    /// with two decimals, the way the entry forms display them.
    pub fn input_text(&self) -> String {
        match self {
            HoursValue::Text(s) => s.clone(),
            HoursValue::Number(n) if n.is_finite() => format!("{:.2}", n),
            HoursValue::Number(_) => "0.00".to_string(),
        }
    }
}

impl Default for HoursValue {
    fn default() -> Self {
        HoursValue::Text(String::new())
    }
}

/// Review state of a log entry. Anything the backend sends that is not a
/// known value normalizes to `Pending`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ReviewStatus {
    #[default]
    Pending,
    Approved,
    Rejected,
}

impl ReviewStatus {
    pub fn from_wire(raw: Option<&str>) -> Self {
        match raw.map(str::trim) {
            Some(s) if s.eq_ignore_ascii_case("approved") => ReviewStatus::Approved,
            Some(s) if s.eq_ignore_ascii_case("rejected") => ReviewStatus::Rejected,
            _ => ReviewStatus::Pending,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            ReviewStatus::Pending => "Pending",
            ReviewStatus::Approved => "Approved",
            ReviewStatus::Rejected => "Rejected",
        }
    }
}

impl fmt::Display for ReviewStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A daily log row as the backend returns it. Field names follow the
/// wire contract; the client model below does the mapping.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct DailyLogRow {
    pub id: Option<i64>,
    pub employee_id: Option<i64>,
    pub employee_name: Option<String>,
    pub project_id: Option<i64>,
    #[serde(rename = "task_description")]
    pub description: Option<String>,
    pub log_date: Option<NaiveDate>,
    pub total_hours: Option<HoursValue>,
    pub start_time: Option<String>,
    pub end_time: Option<String>,
    pub status_review: Option<String>,
    pub rejection_reason: Option<String>,
    pub reviewer_id: Option<i64>,
    pub reviewer_name: Option<String>,
    #[serde(default)]
    pub changes: Vec<DailyLogChange>,
}

/// One project/time allocation for an employee on one calendar day, as
/// the pages hold it. `is_edited` and `error` are local-only and never
/// sent to the server.
#[derive(Debug, Clone)]
pub struct DailyLogEntry {
    pub id: LogId,
    pub employee_id: Option<i64>,
    pub employee_name: Option<String>,
    pub project_id: Option<i64>,
    pub description: String,
    pub log_date: NaiveDate,
    pub hours: HoursValue,
    pub start_time: Option<String>,
    pub end_time: Option<String>,
    pub status: ReviewStatus,
    pub rejection_reason: Option<String>,
    pub reviewer_id: Option<i64>,
    pub changes: Vec<DailyLogChange>,
    pub is_edited: bool,
    pub error: Option<String>,
}

impl DailyLogEntry {
    /// Maps a wire row into the client model. Rows without a server id
    /// (the backend pads empty days with blanks on some endpoints) get a
    /// temporary one.
    pub fn from_row(row: DailyLogRow, fallback_date: NaiveDate) -> Self {
        Self {
            id: row
                .id
                .map(LogId::Persisted)
                .unwrap_or_else(LogId::fresh_temporary),
            employee_id: row.employee_id,
            employee_name: row.employee_name,
            project_id: row.project_id,
            description: row.description.unwrap_or_default(),
            log_date: row.log_date.unwrap_or(fallback_date),
            hours: row.total_hours.unwrap_or(HoursValue::Number(0.0)),
            start_time: row.start_time.map(truncate_clock),
            end_time: row.end_time.map(truncate_clock),
            status: ReviewStatus::from_wire(row.status_review.as_deref()),
            rejection_reason: row.rejection_reason,
            reviewer_id: row.reviewer_id,
            changes: row.changes,
            is_edited: false,
            error: None,
        }
    }

    /// The hours cell for display: time-ranged entries that carry no
    /// stored total show the wall-clock range length instead.
    pub fn display_hours(&self) -> String {
        if self.hours.as_hours() == 0.0 {
            if let (Some(start), Some(end)) = (self.start_time.as_deref(), self.end_time.as_deref())
            {
                return crate::hours::range_hours(start, end);
            }
        }
        self.hours.display_clock()
    }

    /// A blank, never-saved row for the given day.
    pub fn blank(log_date: NaiveDate) -> Self {
        Self {
            id: LogId::fresh_temporary(),
            employee_id: None,
            employee_name: None,
            project_id: None,
            description: String::new(),
            log_date,
            hours: HoursValue::default(),
            start_time: None,
            end_time: None,
            status: ReviewStatus::Pending,
            rejection_reason: None,
            reviewer_id: None,
            changes: Vec::new(),
            is_edited: false,
            error: None,
        }
    }
}

// Some endpoints return seconds ("09:00:00"); the forms work in HH:MM.
fn truncate_clock(s: String) -> String {
    if s.len() > 5 {
        s.chars().take(5).collect()
    } else {
        s
    }
}

/// Body of `POST /api/daily-logs/save`. `id` is null for rows that have
/// never been persisted.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SaveLogPayload {
    pub id: Option<i64>,
    pub employee_id: i64,
    pub log_date: NaiveDate,
    pub project_id: i64,
    pub total_hours: f64,
    #[serde(rename = "task_description")]
    pub description: String,
    pub status_review: String,
    pub reviewer_id: Option<i64>,
}

impl SaveLogPayload {
    pub fn new(
        id: Option<i64>,
        employee_id: i64,
        log_date: NaiveDate,
        project_id: i64,
        total_hours: f64,
        description: String,
        reviewer_id: Option<i64>,
    ) -> Self {
        Self {
            id,
            employee_id,
            log_date,
            project_id,
            total_hours,
            description,
            // Saves always (re)enter review.
            status_review: "pending".to_string(),
            reviewer_id,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_temporary_ids_are_unique() {
        let a = LogId::fresh_temporary();
        let b = LogId::fresh_temporary();
        assert_ne!(a, b);
        assert!(a.is_temporary());
        assert_eq!(a.persisted(), None);
    }

    #[test]
    fn test_status_normalizes_unknown_to_pending() {
        assert_eq!(ReviewStatus::from_wire(None), ReviewStatus::Pending);
        assert_eq!(ReviewStatus::from_wire(Some("pending")), ReviewStatus::Pending);
        assert_eq!(ReviewStatus::from_wire(Some("odd")), ReviewStatus::Pending);
        assert_eq!(ReviewStatus::from_wire(Some("Approved")), ReviewStatus::Approved);
        assert_eq!(ReviewStatus::from_wire(Some("rejected")), ReviewStatus::Rejected);
    }

    #[test]
    fn test_hours_value_tolerates_both_representations() {
        assert_eq!(HoursValue::Number(1.25).as_hours(), 1.25);
        assert_eq!(HoursValue::Text("1:30".to_string()).as_hours(), 1.5);
        assert_eq!(HoursValue::Text("2.5".to_string()).as_hours(), 2.5);
        assert_eq!(HoursValue::Text("junk".to_string()).as_hours(), 0.0);
    }

    #[test]
    fn test_row_mapping_assigns_temp_id_and_truncates_times() {
        let date = NaiveDate::from_ymd_opt(2025, 8, 4).unwrap();
        let row = DailyLogRow {
            start_time: Some("09:00:00".to_string()),
            end_time: Some("17:30".to_string()),
            status_review: Some("approved".to_string()),
            ..Default::default()
        };
        let entry = DailyLogEntry::from_row(row, date);
        assert!(entry.id.is_temporary());
        assert_eq!(entry.start_time.as_deref(), Some("09:00"));
        assert_eq!(entry.end_time.as_deref(), Some("17:30"));
        assert_eq!(entry.status, ReviewStatus::Approved);
        assert_eq!(entry.log_date, date);
        assert!(!entry.is_edited);
    }

    #[test]
    fn test_hours_value_deserializes_untagged() {
        let n: HoursValue = serde_json::from_str("1.5").unwrap();
        let s: HoursValue = serde_json::from_str("\"1:30\"").unwrap();
        assert_eq!(n.as_hours(), 1.5);
        assert_eq!(s.as_hours(), 1.5);
    }
}
