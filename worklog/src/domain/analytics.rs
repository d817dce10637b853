use std::collections::BTreeMap;

use chrono::NaiveDate;
use serde::Deserialize;

use crate::hours::to_iso_date;

use super::ReviewStatus;

/// Aggregated totals from `GET /api/analytics/timesheet`.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct TimesheetAnalytics {
    #[serde(default)]
    pub total_logs: u64,
    #[serde(default)]
    pub total_hours: f64,
    #[serde(default)]
    pub status_counts: BTreeMap<String, u64>,
}

#[derive(Debug, Clone, Default)]
pub struct AnalyticsQuery {
    pub employee_id: Option<i64>,
    pub start_date: Option<NaiveDate>,
    pub end_date: Option<NaiveDate>,
    pub status: Option<ReviewStatus>,
    pub project_id: Option<i64>,
}

impl AnalyticsQuery {
    pub fn for_employee(employee_id: i64) -> Self {
        Self {
            employee_id: Some(employee_id),
            ..Default::default()
        }
    }

    pub fn query_pairs(&self) -> Vec<(&'static str, String)> {
        let mut pairs = Vec::new();
        if let Some(start) = self.start_date {
            pairs.push(("start_date", to_iso_date(Some(start))));
        }
        if let Some(end) = self.end_date {
            pairs.push(("end_date", to_iso_date(Some(end))));
        }
        if let Some(status) = self.status {
            pairs.push(("status_review", status.as_str().to_string()));
        }
        if let Some(project_id) = self.project_id {
            pairs.push(("project_id", project_id.to_string()));
        }
        if let Some(employee_id) = self.employee_id {
            pairs.push(("employee_id", employee_id.to_string()));
        }
        pairs
    }
}
