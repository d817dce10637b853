use std::collections::BTreeMap;

use chrono::NaiveDate;

use worklog::conflict::check_time_conflict;
use worklog::domain::{DailyLogEntry, Employee, LogFilter, Project};
use worklog::hours::{hours_to_clock, sum_entries};
use worklog::WorklogClient;

use crate::fetch::RequestSlot;

use super::PageError;

/// Read-only history of past timesheets, filterable by date range and
/// project, grouped into per-day tables.
pub struct PreviousPage {
    client: WorklogClient,
    logs_request: RequestSlot,
    pub employee: Option<Employee>,
    pub projects: Vec<Project>,
    pub filter: LogFilter,
    pub logs_by_day: BTreeMap<NaiveDate, Vec<DailyLogEntry>>,
}

impl PreviousPage {
    pub fn new(client: WorklogClient) -> Self {
        Self {
            client,
            logs_request: RequestSlot::new(),
            employee: None,
            projects: Vec::new(),
            filter: LogFilter::default(),
            logs_by_day: BTreeMap::new(),
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

    /// Applies the current filter. Changing filters while a fetch is in
    /// flight supersedes it.
    pub async fn reload_logs(&mut self) -> Result<(), PageError> {
        let Some(employee) = &self.employee else {
            return Err(PageError::Validation(
                "Unable to load employee data.".to_string(),
            ));
        };
        let employee_id = employee.id;
        let filter = self.filter.clone();

        let client = self.client.clone();
        let outcome = self
            .logs_request
            .run(async move { client.filtered_logs(employee_id, &filter).await })
            .await;
        let Some(result) = outcome.into_option() else {
            return Ok(());
        };

        let mut by_day: BTreeMap<NaiveDate, Vec<DailyLogEntry>> = BTreeMap::new();
        for row in result? {
            let Some(date) = row.log_date else { continue };
            by_day
                .entry(date)
                .or_default()
                .push(DailyLogEntry::from_row(row, date));
        }
        // Historic entries carry explicit time ranges; flag any that
        // overlap within their day.
        for entries in by_day.values_mut() {
            for idx in 0..entries.len() {
                let error = check_time_conflict(entries, &entries[idx], idx);
                entries[idx].error = error;
            }
        }
        self.logs_by_day = by_day;
        Ok(())
    }

    pub fn has_flagged_entries(&self) -> bool {
        self.logs_by_day
            .values()
            .flatten()
            .any(|e| e.error.is_some())
    }

    pub async fn apply_filter(&mut self, filter: LogFilter) -> Result<(), PageError> {
        self.filter = filter;
        self.reload_logs().await
    }

    pub fn day_total_display(&self, date: NaiveDate) -> String {
        let hours = self
            .logs_by_day
            .get(&date)
            .map(|entries| sum_entries(entries.iter().map(|e| &e.hours)))
            .unwrap_or(0.0);
        hours_to_clock(hours)
    }

    pub fn grand_total_hours(&self) -> f64 {
        sum_entries(self.logs_by_day.values().flatten().map(|e| &e.hours))
    }

    pub fn grand_total_display(&self) -> String {
        hours_to_clock(self.grand_total_hours())
    }

    pub fn teardown(&self) {
        self.logs_request.cancel();
    }
}
