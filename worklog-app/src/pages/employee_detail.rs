use chrono::Local;

use worklog::domain::{DailyLogEntry, Employee, EmployeeDetails};
use worklog::WorklogClient;

use crate::fetch::RequestSlot;

use super::PageError;

/// One employee's detail view: profile with department/designation,
/// reviewer reassignment, and their full and recent log history.
pub struct EmployeeDetailPage {
    client: WorklogClient,
    logs_request: RequestSlot,
    employee_id: i64,
    pub details: Option<EmployeeDetails>,
    pub reviewer_options: Vec<Employee>,
    pub logs: Vec<DailyLogEntry>,
    pub recent_logs: Vec<DailyLogEntry>,
}

impl EmployeeDetailPage {
    pub fn new(client: WorklogClient, employee_id: i64) -> Self {
        Self {
            client,
            logs_request: RequestSlot::new(),
            employee_id,
            details: None,
            reviewer_options: Vec::new(),
            logs: Vec::new(),
            recent_logs: Vec::new(),
        }
    }

    pub async fn load(&mut self) -> Result<(), PageError> {
        self.details = Some(self.client.employee_details(self.employee_id).await?);
        self.reviewer_options = self.client.employees().await?;
        self.reload_logs().await
    }

    /// Fetches the employee's full history and the last seven days in one
    /// slotted request; re-entry supersedes the in-flight fetch.
    pub async fn reload_logs(&mut self) -> Result<(), PageError> {
        let employee_id = self.employee_id;
        let client = self.client.clone();
        let outcome = self
            .logs_request
            .run(async move {
                let all = client.logs_by_employee(employee_id).await?;
                let recent = client.latest_seven_days(employee_id).await?;
                Ok::<_, worklog::ApiError>((all, recent))
            })
            .await;
        let Some(result) = outcome.into_option() else {
            return Ok(());
        };
        let (all, recent) = result?;

        let today = Local::now().date_naive();
        self.logs = all
            .into_iter()
            .map(|row| DailyLogEntry::from_row(row, today))
            .collect();
        self.recent_logs = recent
            .into_iter()
            .map(|row| DailyLogEntry::from_row(row, today))
            .collect();
        Ok(())
    }

    /// Reassigns this employee's reviewer and refreshes the profile.
    pub async fn update_reviewer(&mut self, reviewer_id: Option<i64>) -> Result<(), PageError> {
        self.client
            .update_reviewer(self.employee_id, reviewer_id)
            .await?;
        self.details = Some(self.client.employee_details(self.employee_id).await?);
        Ok(())
    }

    pub fn teardown(&self) {
        self.logs_request.cancel();
    }
}
