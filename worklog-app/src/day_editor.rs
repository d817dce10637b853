//! Editable state for one calendar day of timesheet entries.
//!
//! Rows start life with temporary ids and become server-identified after
//! a successful save. The editor enforces the local rules: duplicate
//! projects are flagged, persisted rows can be edited but not removed,
//! and a persisted row saves again only after an actual edit.

use chrono::NaiveDate;
use thiserror::Error;

use worklog::conflict::check_duplicate_project;
use worklog::domain::{DailyLogEntry, DailyLogRow, HoursValue, LogId, ReviewStatus, SaveLogPayload};
use worklog::hours::{hours_to_clock, is_valid_hours, sum_entries};

/// Local validation failures. These block the save action and are shown
/// inline; none of them ever reaches the network layer.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum EditorError {
    #[error("Log entry not found.")]
    NotFound,
    #[error("Saved logs cannot be removed.")]
    PersistedRemoval,
    #[error("Please fill all required fields and resolve conflicts.")]
    Incomplete,
    #[error("Total hours must be between 0.01 and 24.00.")]
    HoursOutOfRange,
    #[error("No changes to save.")]
    NotEdited,
}

#[derive(Debug, Clone)]
pub struct DayEditor {
    date: NaiveDate,
    employee_id: i64,
    reviewer_id: Option<i64>,
    entries: Vec<DailyLogEntry>,
}

impl DayEditor {
    pub fn new(date: NaiveDate, employee_id: i64, reviewer_id: Option<i64>) -> Self {
        Self {
            date,
            employee_id,
            reviewer_id,
            entries: Vec::new(),
        }
    }

    /// Replaces the day's entries with freshly fetched rows, flagging any
    /// duplicate projects already present in the data.
    pub fn load(&mut self, rows: Vec<DailyLogRow>) {
        self.entries = rows
            .into_iter()
            .map(|row| DailyLogEntry::from_row(row, self.date))
            .collect();
        for idx in 0..self.entries.len() {
            let error = check_duplicate_project(&self.entries, self.entries[idx].project_id, idx);
            self.entries[idx].error = error;
        }
    }

    pub fn date(&self) -> NaiveDate {
        self.date
    }

    pub fn entries(&self) -> &[DailyLogEntry] {
        &self.entries
    }

    pub fn has_flagged_entries(&self) -> bool {
        self.entries.iter().any(|e| e.error.is_some())
    }

    /// Appends a blank, never-saved row and returns its index.
    pub fn add_row(&mut self) -> usize {
        self.entries.push(DailyLogEntry::blank(self.date));
        self.entries.len() - 1
    }

    /// Removes a row, which is only permitted while its id is temporary.
    pub fn remove_row(&mut self, idx: usize) -> Result<(), EditorError> {
        let entry = self.entries.get(idx).ok_or(EditorError::NotFound)?;
        if !entry.id.is_temporary() {
            return Err(EditorError::PersistedRemoval);
        }
        self.entries.remove(idx);
        Ok(())
    }

    pub fn edit_project(&mut self, idx: usize, project_id: Option<i64>) -> Result<(), EditorError> {
        if idx >= self.entries.len() {
            return Err(EditorError::NotFound);
        }
        let error = check_duplicate_project(&self.entries, project_id, idx);
        let entry = &mut self.entries[idx];
        entry.project_id = project_id;
        entry.error = error;
        Self::mark_touched(entry);
        Ok(())
    }

    pub fn edit_description(&mut self, idx: usize, text: impl Into<String>) -> Result<(), EditorError> {
        let entry = self.entries.get_mut(idx).ok_or(EditorError::NotFound)?;
        entry.description = text.into();
        Self::mark_touched(entry);
        Ok(())
    }

    /// Stores raw hours input, validating the format immediately. A valid
    /// value re-runs the duplicate check so a stale flag clears.
    pub fn edit_hours(&mut self, idx: usize, input: impl Into<String>) -> Result<(), EditorError> {
        if idx >= self.entries.len() {
            return Err(EditorError::NotFound);
        }
        let input = input.into();
        let error = if !is_valid_hours(&input) {
            Some("Invalid hours format (0.00-24.00).".to_string())
        } else {
            check_duplicate_project(&self.entries, self.entries[idx].project_id, idx)
        };
        let entry = &mut self.entries[idx];
        entry.hours = HoursValue::Text(input);
        entry.error = error;
        Self::mark_touched(entry);
        Ok(())
    }

    // Any content change re-enters review; rows that already have a
    // server id also pick up the dirty flag.
    fn mark_touched(entry: &mut DailyLogEntry) {
        entry.status = ReviewStatus::Pending;
        if !entry.id.is_temporary() {
            entry.is_edited = true;
        }
    }

    /// Validates one row for saving and builds its payload. Persisted
    /// rows must actually be edited; a no-op save is refused before any
    /// network call happens.
    pub fn validate_for_save(&self, idx: usize) -> Result<SaveLogPayload, EditorError> {
        let entry = self.entries.get(idx).ok_or(EditorError::NotFound)?;

        let Some(project_id) = entry.project_id else {
            return Err(EditorError::Incomplete);
        };
        if entry.description.trim().is_empty() || entry.error.is_some() {
            return Err(EditorError::Incomplete);
        }
        let hours = match &entry.hours {
            HoursValue::Text(s) => {
                if !is_valid_hours(s) {
                    return Err(EditorError::Incomplete);
                }
                s.parse::<f64>().map_err(|_| EditorError::Incomplete)?
            }
            HoursValue::Number(n) => *n,
        };
        if hours <= 0.0 || hours > 24.0 {
            return Err(EditorError::HoursOutOfRange);
        }
        if !entry.id.is_temporary() && !entry.is_edited {
            return Err(EditorError::NotEdited);
        }

        Ok(SaveLogPayload::new(
            entry.id.persisted(),
            entry.employee_id.unwrap_or(self.employee_id),
            entry.log_date,
            project_id,
            hours,
            entry.description.clone(),
            entry.reviewer_id.or(self.reviewer_id),
        ))
    }

    /// Merges the server's save response back into the row. Server fields
    /// win except the purely local ones (`error`, `is_edited`), which
    /// reset; fields the server does not echo keep their local values.
    pub fn apply_saved(&mut self, idx: usize, saved: &[DailyLogRow]) -> Result<(), EditorError> {
        let entry = self.entries.get_mut(idx).ok_or(EditorError::NotFound)?;
        if let Some(row) = saved.first() {
            if let Some(id) = row.id {
                entry.id = LogId::Persisted(id);
            }
            if row.project_id.is_some() {
                entry.project_id = row.project_id;
            }
            if let Some(description) = &row.description {
                entry.description = description.clone();
            }
            if let Some(date) = row.log_date {
                entry.log_date = date;
            }
            if let Some(hours) = &row.total_hours {
                entry.hours = hours.clone();
            }
            if row.reviewer_id.is_some() {
                entry.reviewer_id = row.reviewer_id;
            }
            entry.changes = row.changes.clone();
        }
        entry.status = ReviewStatus::Pending;
        entry.is_edited = false;
        entry.error = None;
        Ok(())
    }

    /// Sum of the day's hours, tolerant of mixed representations.
    pub fn total_hours(&self) -> f64 {
        sum_entries(self.entries.iter().map(|e| &e.hours))
    }

    /// The day total as `H:MM` for the totals row.
    pub fn total_display(&self) -> String {
        hours_to_clock(self.total_hours())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn day() -> NaiveDate {
        NaiveDate::from_ymd_opt(2025, 8, 4).unwrap()
    }

    fn editor() -> DayEditor {
        DayEditor::new(day(), 12, Some(3))
    }

    fn row(id: i64, project_id: i64, hours: f64) -> DailyLogRow {
        DailyLogRow {
            id: Some(id),
            project_id: Some(project_id),
            description: Some("work".to_string()),
            log_date: Some(day()),
            total_hours: Some(HoursValue::Number(hours)),
            ..Default::default()
        }
    }

    #[test]
    fn test_add_edit_remove_leaves_day_unchanged() {
        let mut editor = editor();
        editor.load(vec![row(1, 1, 2.0)]);
        let before: Vec<_> = editor.entries().iter().map(|e| e.id).collect();

        editor.add_row();
        editor.edit_project(1, Some(2)).unwrap();
        editor.edit_hours(1, "1.5").unwrap();
        editor.remove_row(1).unwrap();

        let after: Vec<_> = editor.entries().iter().map(|e| e.id).collect();
        assert_eq!(before, after);
    }

    #[test]
    fn test_persisted_rows_cannot_be_removed() {
        let mut editor = editor();
        editor.load(vec![row(7, 1, 2.0)]);
        assert_eq!(editor.remove_row(0), Err(EditorError::PersistedRemoval));
        assert_eq!(editor.entries().len(), 1);
    }

    #[test]
    fn test_duplicate_project_is_flagged_on_edit() {
        let mut editor = editor();
        editor.load(vec![row(1, 1, 2.0)]);
        editor.add_row();
        editor.edit_project(1, Some(1)).unwrap();
        assert_eq!(
            editor.entries()[1].error.as_deref(),
            Some("This project is already selected for this day.")
        );
        // Picking a different project clears the flag.
        editor.edit_project(1, Some(2)).unwrap();
        assert_eq!(editor.entries()[1].error, None);
    }

    #[test]
    fn test_load_flags_duplicates_in_fetched_data() {
        let mut editor = editor();
        editor.load(vec![row(1, 5, 2.0), row(2, 5, 1.0)]);
        assert!(editor.has_flagged_entries());
    }

    #[test]
    fn test_hours_over_24_rejected_before_network() {
        let mut editor = editor();
        editor.add_row();
        editor.edit_project(0, Some(1)).unwrap();
        editor.edit_description(0, "long day").unwrap();
        editor.edit_hours(0, "25").unwrap();
        // "25" already fails the input pattern, so the row carries an
        // inline error and save reports the incomplete state.
        assert_eq!(editor.validate_for_save(0), Err(EditorError::Incomplete));
    }

    #[test]
    fn test_zero_hours_rejected() {
        let mut editor = editor();
        editor.add_row();
        editor.edit_project(0, Some(1)).unwrap();
        editor.edit_description(0, "idle").unwrap();
        editor.edit_hours(0, "0").unwrap();
        assert_eq!(
            editor.validate_for_save(0),
            Err(EditorError::HoursOutOfRange)
        );
    }

    #[test]
    fn test_save_payload_for_new_row_has_null_id() {
        let mut editor = editor();
        editor.add_row();
        editor.edit_project(0, Some(4)).unwrap();
        editor.edit_description(0, "api work").unwrap();
        editor.edit_hours(0, "7.5").unwrap();

        let payload = editor.validate_for_save(0).unwrap();
        assert_eq!(payload.id, None);
        assert_eq!(payload.employee_id, 12);
        assert_eq!(payload.project_id, 4);
        assert_eq!(payload.total_hours, 7.5);
        assert_eq!(payload.status_review, "pending");
        assert_eq!(payload.reviewer_id, Some(3));
    }

    #[test]
    fn test_save_merge_assigns_server_id_and_clears_local_flags() {
        let mut editor = editor();
        editor.add_row();
        editor.edit_project(0, Some(4)).unwrap();
        editor.edit_description(0, "api work").unwrap();
        editor.edit_hours(0, "7.5").unwrap();

        let saved = vec![DailyLogRow {
            id: Some(42),
            changes: vec![Default::default()],
            ..Default::default()
        }];
        editor.apply_saved(0, &saved).unwrap();

        let entry = &editor.entries()[0];
        assert_eq!(entry.id, LogId::Persisted(42));
        assert_eq!(entry.status, ReviewStatus::Pending);
        assert!(!entry.is_edited);
        assert_eq!(entry.error, None);
        assert_eq!(entry.changes.len(), 1);
        // Fields the server did not echo keep their local values.
        assert_eq!(entry.description, "api work");
        assert_eq!(entry.project_id, Some(4));
    }

    #[test]
    fn test_unedited_persisted_row_refuses_save() {
        let mut editor = editor();
        editor.load(vec![row(42, 1, 2.0)]);
        assert_eq!(editor.validate_for_save(0), Err(EditorError::NotEdited));

        // An edit flips the dirty flag and save goes through again.
        editor.edit_description(0, "amended").unwrap();
        assert!(editor.entries()[0].is_edited);
        let payload = editor.validate_for_save(0).unwrap();
        assert_eq!(payload.id, Some(42));
    }

    #[test]
    fn test_edit_resets_status_to_pending() {
        let mut editor = editor();
        let mut approved = row(9, 1, 2.0);
        approved.status_review = Some("Approved".to_string());
        editor.load(vec![approved]);
        assert_eq!(editor.entries()[0].status, ReviewStatus::Approved);

        editor.edit_hours(0, "3").unwrap();
        assert_eq!(editor.entries()[0].status, ReviewStatus::Pending);
    }

    #[test]
    fn test_missing_description_is_incomplete() {
        let mut editor = editor();
        editor.add_row();
        editor.edit_project(0, Some(1)).unwrap();
        editor.edit_hours(0, "2").unwrap();
        assert_eq!(editor.validate_for_save(0), Err(EditorError::Incomplete));
    }

    #[test]
    fn test_day_total_mixes_representations() {
        let mut editor = editor();
        editor.load(vec![
            DailyLogRow {
                id: Some(1),
                project_id: Some(1),
                total_hours: Some(HoursValue::Text("1:00".to_string())),
                ..Default::default()
            },
            DailyLogRow {
                id: Some(2),
                project_id: Some(2),
                total_hours: Some(HoursValue::Text("2:30".to_string())),
                ..Default::default()
            },
        ]);
        assert_eq!(editor.total_hours(), 3.5);
        assert_eq!(editor.total_display(), "3:30");
    }
}
