use chrono::NaiveDate;
use serde::{de::DeserializeOwned, Deserialize, Serialize};
use thiserror::Error;

use crate::domain::{
    AnalyticsQuery, DailyLogChange, DailyLogRow, DashboardInit, Department, Designation, Employee,
    EmployeeDetails, EmployeeInfo, LogFilter, Project, ProjectAssignment, ReviewPayload,
    SaveLogPayload, TimesheetAnalytics,
};
use crate::{BackendUrl, Session};

/// Client for the timesheet backend. One method per endpoint; no retries,
/// no caching — a failed call surfaces its error and leaves the caller's
/// state alone.
#[derive(Debug, Clone)]
pub struct WorklogClient {
    http: reqwest::Client,
    base_url: BackendUrl,
    session: Session,
}

#[derive(Error, Debug)]
pub enum ApiError {
    #[error("Unauthorized")]
    Unauthorized,
    /// 403 on the review endpoint: the log was already reviewed and may
    /// not be mutated again.
    #[error("{0}")]
    AlreadyReviewed(String),
    /// The backend rejected the request; carries the JSON `error` body
    /// when one was sent, otherwise a generic message with the status.
    #[error("{0}")]
    Rejected(String),
    #[error("ResponseError: {0}")]
    ResponseError(String),
    #[error("ParsingError: {0}")]
    ParsingError(String),
}

#[derive(Deserialize)]
struct ErrorBody {
    error: Option<String>,
}

impl WorklogClient {
    pub fn new(base_url: BackendUrl, session: Session) -> Self {
        Self {
            http: reqwest::Client::new(),
            base_url,
            session,
        }
    }

    pub fn session(&self) -> &Session {
        &self.session
    }

    fn authorize(&self, req: reqwest::RequestBuilder) -> reqwest::RequestBuilder {
        match self.session.as_bearer_header() {
            Some(header) => req.header(reqwest::header::AUTHORIZATION, header),
            None => req,
        }
    }

    async fn send(
        &self,
        req: reqwest::RequestBuilder,
        action: &str,
    ) -> Result<reqwest::Response, ApiError> {
        let resp = self
            .authorize(req)
            .send()
            .await
            .map_err(|e| ApiError::ResponseError(e.to_string()))?;

        let status = resp.status();
        if status == reqwest::StatusCode::UNAUTHORIZED {
            return Err(ApiError::Unauthorized);
        }
        if !status.is_success() {
            return Err(ApiError::Rejected(error_message(resp, action).await));
        }
        Ok(resp)
    }

    async fn fetch<T: DeserializeOwned>(
        &self,
        url: impl AsRef<str>,
        action: &str,
    ) -> Result<T, ApiError> {
        let resp = self.send(self.http.get(url.as_ref()), action).await?;
        resp.json::<T>().await.map_err(|e| {
            ApiError::ParsingError(format!("Failed to parse response as JSON: {}", e))
        })
    }

    async fn post<B: Serialize + ?Sized, T: DeserializeOwned>(
        &self,
        url: impl AsRef<str>,
        body: &B,
        action: &str,
    ) -> Result<T, ApiError> {
        let resp = self
            .send(self.http.post(url.as_ref()).json(body), action)
            .await?;
        resp.json::<T>().await.map_err(|e| {
            ApiError::ParsingError(format!("Failed to parse response as JSON: {}", e))
        })
    }

    /// GET /api/employee-info — the current employee and their projects,
    /// looked up by the session email.
    pub async fn employee_info(&self) -> Result<EmployeeInfo, ApiError> {
        let url = self
            .base_url
            .append_path("/api/employee-info")
            .with_query([("email", self.session.email.clone())]);
        self.fetch(url, "fetch employee data").await
    }

    /// GET /api/daily-logs/today/{employee_id}
    pub async fn todays_logs(&self, employee_id: i64) -> Result<Vec<DailyLogRow>, ApiError> {
        let url = self
            .base_url
            .append_path(&format!("/api/daily-logs/today/{}", employee_id));
        self.fetch(url, "fetch today's logs").await
    }

    /// GET /api/daily-logs/week/{employee_id}
    pub async fn week_logs(
        &self,
        employee_id: i64,
        start: NaiveDate,
        end: NaiveDate,
    ) -> Result<Vec<DailyLogRow>, ApiError> {
        let url = self
            .base_url
            .append_path(&format!("/api/daily-logs/week/{}", employee_id))
            .with_query(LogFilter::date_range(start, end).query_pairs());
        self.fetch(url, "fetch weekly logs").await
    }

    /// GET /api/daily-logs/filter/{employee_id}
    pub async fn filtered_logs(
        &self,
        employee_id: i64,
        filter: &LogFilter,
    ) -> Result<Vec<DailyLogRow>, ApiError> {
        let url = self
            .base_url
            .append_path(&format!("/api/daily-logs/filter/{}", employee_id))
            .with_query(filter.query_pairs());
        self.fetch(url, "fetch filtered logs").await
    }

    /// GET /api/daily-logs/latest-seven-days/{employee_id}
    pub async fn latest_seven_days(&self, employee_id: i64) -> Result<Vec<DailyLogRow>, ApiError> {
        let url = self
            .base_url
            .append_path(&format!("/api/daily-logs/latest-seven-days/{}", employee_id));
        self.fetch(url, "fetch recent logs").await
    }

    /// GET /api/daily-logs/by-employee
    pub async fn logs_by_employee(&self, employee_id: i64) -> Result<Vec<DailyLogRow>, ApiError> {
        let url = self
            .base_url
            .append_path("/api/daily-logs/by-employee")
            .with_query([("employee_id", employee_id.to_string())]);
        self.fetch(url, "fetch employee logs").await
    }

    /// GET /api/daily-logs/by-reviewer — the session user's review queue.
    pub async fn logs_by_reviewer(&self, filter: &LogFilter) -> Result<Vec<DailyLogRow>, ApiError> {
        let url = self
            .base_url
            .append_path("/api/daily-logs/by-reviewer")
            .with_query([("reviewer_email", self.session.email.clone())])
            .with_query(filter.query_pairs());
        self.fetch(url, "fetch review queue").await
    }

    /// POST /api/daily-logs/save — saves new or edited entries, returns
    /// the persisted rows with server ids and change history.
    #[tracing::instrument(skip(self, payload), fields(entries = payload.len()))]
    pub async fn save_daily_logs(
        &self,
        payload: &[SaveLogPayload],
    ) -> Result<Vec<DailyLogRow>, ApiError> {
        let url = self.base_url.append_path("/api/daily-logs/save");
        self.post(url, payload, "save daily log").await
    }

    /// POST /api/daily-logs/review. A 403 means the log was already
    /// reviewed, which callers surface differently from other failures.
    #[tracing::instrument(skip(self, payload), fields(log_id = payload.log_id))]
    pub async fn submit_review(&self, payload: &ReviewPayload) -> Result<(), ApiError> {
        let url = self.base_url.append_path("/api/daily-logs/review");
        let resp = self
            .authorize(self.http.post(url.as_ref()).json(payload))
            .send()
            .await
            .map_err(|e| ApiError::ResponseError(e.to_string()))?;

        let status = resp.status();
        if status == reqwest::StatusCode::UNAUTHORIZED {
            return Err(ApiError::Unauthorized);
        }
        if status == reqwest::StatusCode::FORBIDDEN {
            let message = match resp.json::<ErrorBody>().await {
                Ok(ErrorBody { error: Some(msg) }) => msg,
                _ => "Cannot update: Log is already reviewed.".to_string(),
            };
            return Err(ApiError::AlreadyReviewed(message));
        }
        if !status.is_success() {
            return Err(ApiError::Rejected(
                error_message(resp, "update review status").await,
            ));
        }
        Ok(())
    }

    /// GET /api/daily-logs/{id}/changes — audit trail, earliest first.
    pub async fn log_changes(&self, log_id: i64) -> Result<Vec<DailyLogChange>, ApiError> {
        let url = self
            .base_url
            .append_path(&format!("/api/daily-logs/{}/changes", log_id));
        self.fetch(url, "fetch changes").await
    }

    /// GET /api/analytics/timesheet
    pub async fn analytics(&self, query: &AnalyticsQuery) -> Result<TimesheetAnalytics, ApiError> {
        let url = self
            .base_url
            .append_path("/api/analytics/timesheet")
            .with_query(query.query_pairs());
        self.fetch(url, "fetch analytics").await
    }

    /// GET /api/dashboard/init — all admin lookup tables in one call.
    pub async fn dashboard_init(&self) -> Result<DashboardInit, ApiError> {
        let url = self.base_url.append_path("/api/dashboard/init");
        self.fetch(url, "fetch dashboard data").await
    }

    /// GET /api/employees
    pub async fn employees(&self) -> Result<Vec<Employee>, ApiError> {
        let url = self.base_url.append_path("/api/employees");
        self.fetch(url, "fetch employees").await
    }

    /// GET /api/employees/{id}/details
    pub async fn employee_details(&self, employee_id: i64) -> Result<EmployeeDetails, ApiError> {
        let url = self
            .base_url
            .append_path(&format!("/api/employees/{}/details", employee_id));
        self.fetch(url, "fetch employee details").await
    }

    /// PUT /api/employees/update-reviewer/{id}
    pub async fn update_reviewer(
        &self,
        employee_id: i64,
        reviewer_id: Option<i64>,
    ) -> Result<(), ApiError> {
        #[derive(Serialize)]
        struct Body {
            reviewer_id: Option<i64>,
        }
        let url = self
            .base_url
            .append_path(&format!("/api/employees/update-reviewer/{}", employee_id));
        self.send(
            self.http.put(url.as_ref()).json(&Body { reviewer_id }),
            "update reviewer",
        )
        .await?;
        Ok(())
    }

    /// GET /api/subordinates/{manager_id}
    pub async fn subordinates(&self, manager_id: i64) -> Result<Vec<Employee>, ApiError> {
        let url = self
            .base_url
            .append_path(&format!("/api/subordinates/{}", manager_id));
        self.fetch(url, "fetch subordinates").await
    }

    /// GET /api/projects
    pub async fn projects(&self) -> Result<Vec<Project>, ApiError> {
        let url = self.base_url.append_path("/api/projects");
        self.fetch(url, "fetch projects").await
    }

    /// GET /api/projects/all
    pub async fn all_projects(&self) -> Result<Vec<Project>, ApiError> {
        let url = self.base_url.append_path("/api/projects/all");
        self.fetch(url, "fetch projects").await
    }

    /// GET /api/projects-related/{manager_id}
    pub async fn projects_for_manager(&self, manager_id: i64) -> Result<Vec<Project>, ApiError> {
        let url = self
            .base_url
            .append_path(&format!("/api/projects-related/{}", manager_id));
        self.fetch(url, "fetch related projects").await
    }

    /// GET /api/departments
    pub async fn departments(&self) -> Result<Vec<Department>, ApiError> {
        let url = self.base_url.append_path("/api/departments");
        self.fetch(url, "fetch departments").await
    }

    /// GET /api/designations
    pub async fn designations(&self) -> Result<Vec<Designation>, ApiError> {
        let url = self.base_url.append_path("/api/designations");
        self.fetch(url, "fetch designations").await
    }

    /// POST /api/manager_project/assign
    pub async fn assign_project(&self, assignment: &ProjectAssignment) -> Result<(), ApiError> {
        let url = self.base_url.append_path("/api/manager_project/assign");
        self.send(
            self.http.post(url.as_ref()).json(assignment),
            "assign project",
        )
        .await?;
        Ok(())
    }

    /// DELETE /api/manager_project/remove
    pub async fn remove_project(&self, assignment: &ProjectAssignment) -> Result<(), ApiError> {
        let url = self.base_url.append_path("/api/manager_project/remove");
        self.send(
            self.http.delete(url.as_ref()).json(assignment),
            "remove project",
        )
        .await?;
        Ok(())
    }
}

async fn error_message(resp: reqwest::Response, action: &str) -> String {
    let status = resp.status();
    match resp.json::<ErrorBody>().await {
        Ok(ErrorBody { error: Some(msg) }) => msg,
        _ => format!("Failed to {} ({})", action, status),
    }
}
