use chrono::Local;

use worklog::domain::{Employee, Project};
use worklog::WorklogClient;

use crate::fetch::RequestSlot;
use crate::week::{WeekLogs, WeekWindow};

use super::PageError;

/// Read-only weekly grid: projects down, days across, totals on both
/// edges.
pub struct WeekPage {
    client: WorklogClient,
    logs_request: RequestSlot,
    pub employee: Option<Employee>,
    pub projects: Vec<Project>,
    pub window: WeekWindow,
    pub logs: WeekLogs,
}

impl WeekPage {
    pub fn new(client: WorklogClient) -> Self {
        Self {
            client,
            logs_request: RequestSlot::new(),
            employee: None,
            projects: Vec::new(),
            window: WeekWindow::containing(Local::now().date_naive()),
            logs: WeekLogs::default(),
        }
    }

    pub async fn load(&mut self) -> Result<(), PageError> {
        if self.employee.is_none() {
            let info = self.client.employee_info().await?;
            self.employee = Some(info.employee);
            self.projects = info.projects;
        }
        self.reload_logs().await
    }

    /// Fetches the current window's logs. Week navigation calls this
    /// repeatedly; each call supersedes the previous in-flight fetch.
    pub async fn reload_logs(&mut self) -> Result<(), PageError> {
        let Some(employee) = &self.employee else {
            return Err(PageError::Validation(
                "Unable to load employee data.".to_string(),
            ));
        };
        let employee_id = employee.id;
        let (start, end) = (self.window.start(), self.window.end());

        let client = self.client.clone();
        let outcome = self
            .logs_request
            .run(async move { client.week_logs(employee_id, start, end).await })
            .await;
        let Some(result) = outcome.into_option() else {
            return Ok(());
        };
        self.logs = WeekLogs::from_rows(&self.window, result?);
        Ok(())
    }

    pub async fn previous_week(&mut self) -> Result<(), PageError> {
        self.window = self.window.previous();
        self.reload_logs().await
    }

    pub async fn next_week(&mut self) -> Result<(), PageError> {
        self.window = self.window.next();
        self.reload_logs().await
    }

    pub fn teardown(&self) {
        self.logs_request.cancel();
    }
}
