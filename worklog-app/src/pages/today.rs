use chrono::Local;

use worklog::domain::{Employee, Project};
use worklog::WorklogClient;

use crate::day_editor::DayEditor;
use crate::fetch::RequestSlot;

use super::PageError;

/// The editable timesheet for the current day.
pub struct TodayPage {
    client: WorklogClient,
    logs_request: RequestSlot,
    pub employee: Option<Employee>,
    pub projects: Vec<Project>,
    pub editor: Option<DayEditor>,
    pub status_message: Option<String>,
}

impl TodayPage {
    pub fn new(client: WorklogClient) -> Self {
        Self {
            client,
            logs_request: RequestSlot::new(),
            employee: None,
            projects: Vec::new(),
            editor: None,
            status_message: None,
        }
    }

    /// Loads the current employee and their projects, then today's logs.
    pub async fn load(&mut self) -> Result<(), PageError> {
        let info = self.client.employee_info().await?;
        self.employee = Some(info.employee);
        self.projects = info.projects;
        self.reload_logs().await
    }

    /// (Re)fetches today's logs and seeds the day editor. A fetch that is
    /// superseded by a newer one resolves quietly.
    pub async fn reload_logs(&mut self) -> Result<(), PageError> {
        let Some(employee) = &self.employee else {
            return Err(PageError::Validation(
                "Unable to load employee data.".to_string(),
            ));
        };
        let (employee_id, reviewer_id) = (employee.id, employee.reviewer_id);

        let client = self.client.clone();
        let outcome = self
            .logs_request
            .run(async move { client.todays_logs(employee_id).await })
            .await;
        let Some(result) = outcome.into_option() else {
            return Ok(());
        };
        let rows = result?;

        // The backend names the day; fall back to the local date when the
        // day is still empty.
        let date = rows
            .iter()
            .find_map(|row| row.log_date)
            .unwrap_or_else(|| Local::now().date_naive());

        let mut editor = DayEditor::new(date, employee_id, reviewer_id);
        editor.load(rows);
        if editor.has_flagged_entries() {
            self.status_message = Some("Some log entries have duplicate projects.".to_string());
        }
        self.editor = Some(editor);
        Ok(())
    }

    /// Saves one row. Validation happens locally first; only a valid row
    /// produces a network call, and a failed save leaves state untouched.
    pub async fn save_row(&mut self, idx: usize) -> Result<(), PageError> {
        let payload = self
            .editor
            .as_ref()
            .ok_or_else(|| PageError::Validation("Log entry not found.".to_string()))?
            .validate_for_save(idx)
            .map_err(|e| PageError::Validation(e.to_string()))?;

        let saved = self.client.save_daily_logs(&[payload]).await?;
        if let Some(editor) = self.editor.as_mut() {
            editor
                .apply_saved(idx, &saved)
                .map_err(|e| PageError::Validation(e.to_string()))?;
        }
        tracing::debug!(row = idx, "daily log saved");
        self.status_message = Some("Log saved successfully!".to_string());
        Ok(())
    }

    /// Aborts any outstanding fetch; called on navigation away.
    pub fn teardown(&self) {
        self.logs_request.cancel();
    }
}
