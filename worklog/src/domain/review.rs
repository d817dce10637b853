use serde::Serialize;

/// Body of `POST /api/daily-logs/review`. The backend rejects a second
/// review of the same log with a 403.
#[derive(Debug, Clone, Serialize)]
pub struct ReviewPayload {
    pub log_id: i64,
    pub reviewer_email: String,
    pub status_review: String,
    pub rejection_reason: String,
}

impl ReviewPayload {
    pub fn approve(log_id: i64, reviewer_email: impl Into<String>) -> Self {
        Self {
            log_id,
            reviewer_email: reviewer_email.into(),
            status_review: "Approved".to_string(),
            rejection_reason: String::new(),
        }
    }

    pub fn reject(
        log_id: i64,
        reviewer_email: impl Into<String>,
        reason: impl Into<String>,
    ) -> Self {
        Self {
            log_id,
            reviewer_email: reviewer_email.into(),
            status_review: "Rejected".to_string(),
            rejection_reason: reason.into(),
        }
    }
}
