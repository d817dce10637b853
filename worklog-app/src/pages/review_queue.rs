use chrono::Local;

use worklog::domain::{DailyLogEntry, LogFilter, Project, ReviewPayload, ReviewStatus};
use worklog::{ApiError, WorklogClient};

use crate::fetch::RequestSlot;

use super::PageError;

/// The reviewer's approval queue. Approvals and rejections go through
/// `POST /api/daily-logs/review`; a log that was already reviewed comes
/// back as a 403 and is surfaced distinctly from other failures.
pub struct ReviewQueuePage {
    client: WorklogClient,
    queue_request: RequestSlot,
    pub status_filter: Option<ReviewStatus>,
    pub filter: LogFilter,
    pub logs: Vec<DailyLogEntry>,
    pub projects: Vec<Project>,
    pub status_message: Option<String>,
}

impl ReviewQueuePage {
    pub fn new(client: WorklogClient) -> Self {
        Self {
            client,
            queue_request: RequestSlot::new(),
            status_filter: None,
            filter: LogFilter::default(),
            logs: Vec::new(),
            projects: Vec::new(),
            status_message: None,
        }
    }

    pub async fn load(&mut self) -> Result<(), PageError> {
        self.projects = self.client.projects().await?;
        self.reload_queue().await
    }

    pub async fn reload_queue(&mut self) -> Result<(), PageError> {
        let mut filter = self.filter.clone();
        filter.status = self.status_filter;

        let client = self.client.clone();
        let outcome = self
            .queue_request
            .run(async move { client.logs_by_reviewer(&filter).await })
            .await;
        let Some(result) = outcome.into_option() else {
            return Ok(());
        };

        let today = Local::now().date_naive();
        self.logs = result?
            .into_iter()
            .map(|row| DailyLogEntry::from_row(row, today))
            .collect();
        Ok(())
    }

    pub async fn set_status_filter(
        &mut self,
        status: Option<ReviewStatus>,
    ) -> Result<(), PageError> {
        self.status_filter = status;
        self.reload_queue().await
    }

    pub async fn approve(&mut self, log_id: i64) -> Result<(), PageError> {
        let payload = ReviewPayload::approve(log_id, self.client.session().email.clone());
        self.submit(payload).await
    }

    /// Rejecting requires a reason; an empty one is a local validation
    /// error and never reaches the network.
    pub async fn reject(&mut self, log_id: i64, reason: &str) -> Result<(), PageError> {
        let reason = reason.trim();
        if reason.is_empty() {
            return Err(PageError::Validation(
                "Rejection reason is required when rejecting a log.".to_string(),
            ));
        }
        let payload = ReviewPayload::reject(log_id, self.client.session().email.clone(), reason);
        self.submit(payload).await
    }

    async fn submit(&mut self, payload: ReviewPayload) -> Result<(), PageError> {
        match self.client.submit_review(&payload).await {
            Ok(()) => {
                self.status_message = Some("Review submitted successfully!".to_string());
                self.reload_queue().await
            }
            Err(ApiError::AlreadyReviewed(message)) => {
                // The log was reviewed elsewhere; keep the queue as-is and
                // let the caller show the specific message.
                tracing::warn!(log_id = payload.log_id, "log already reviewed");
                self.status_message = Some(message.clone());
                Err(PageError::Api(ApiError::AlreadyReviewed(message)))
            }
            Err(err) => Err(err.into()),
        }
    }

    pub fn teardown(&self) {
        self.queue_request.cancel();
    }
}
