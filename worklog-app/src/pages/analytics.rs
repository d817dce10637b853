use worklog::domain::{AnalyticsQuery, Project, TimesheetAnalytics};
use worklog::hours::hours_to_clock;
use worklog::WorklogClient;

use crate::fetch::RequestSlot;

use super::PageError;

/// Filtered timesheet analytics: log count, hour totals, and a
/// per-status breakdown.
pub struct AnalyticsPage {
    client: WorklogClient,
    data_request: RequestSlot,
    pub query: AnalyticsQuery,
    pub data: TimesheetAnalytics,
    pub projects: Vec<Project>,
}

impl AnalyticsPage {
    pub fn new(client: WorklogClient, query: AnalyticsQuery) -> Self {
        Self {
            client,
            data_request: RequestSlot::new(),
            query,
            data: TimesheetAnalytics::default(),
            projects: Vec::new(),
        }
    }

    pub async fn load(&mut self) -> Result<(), PageError> {
        if self.projects.is_empty() {
            self.projects = self.client.projects().await?;
        }
        self.reload_data().await
    }

    pub async fn reload_data(&mut self) -> Result<(), PageError> {
        let query = self.query.clone();
        let client = self.client.clone();
        let outcome = self
            .data_request
            .run(async move { client.analytics(&query).await })
            .await;
        let Some(result) = outcome.into_option() else {
            return Ok(());
        };
        self.data = result?;
        Ok(())
    }

    pub async fn apply_query(&mut self, query: AnalyticsQuery) -> Result<(), PageError> {
        self.query = query;
        self.reload_data().await
    }

    pub fn total_hours_display(&self) -> String {
        hours_to_clock(self.data.total_hours)
    }

    pub fn teardown(&self) {
        self.data_request.cancel();
    }
}
