use chrono::NaiveDate;

use crate::hours::to_iso_date;

use super::ReviewStatus;

/// Optional filters for the daily-log listing endpoints. Renders to plain
/// query pairs; unset fields are omitted.
#[derive(Debug, Clone, Default)]
pub struct LogFilter {
    pub start_date: Option<NaiveDate>,
    pub end_date: Option<NaiveDate>,
    pub project_id: Option<i64>,
    pub status: Option<ReviewStatus>,
}

impl LogFilter {
    pub fn date_range(start: NaiveDate, end: NaiveDate) -> Self {
        Self {
            start_date: Some(start),
            end_date: Some(end),
            ..Default::default()
        }
    }

    pub fn with_project(mut self, project_id: i64) -> Self {
        self.project_id = Some(project_id);
        self
    }

    pub fn with_status(mut self, status: ReviewStatus) -> Self {
        self.status = Some(status);
        self
    }

    pub fn query_pairs(&self) -> Vec<(&'static str, String)> {
        let mut pairs = Vec::new();
        if let Some(start) = self.start_date {
            pairs.push(("start_date", to_iso_date(Some(start))));
        }
        if let Some(end) = self.end_date {
            pairs.push(("end_date", to_iso_date(Some(end))));
        }
        if let Some(project_id) = self.project_id {
            pairs.push(("project_id", project_id.to_string()));
        }
        if let Some(status) = self.status {
            pairs.push(("status_review", status.as_str().to_string()));
        }
        pairs
    }
}
