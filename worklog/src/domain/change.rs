use serde::{Deserialize, Serialize};

use super::ReviewStatus;

/// One audit record of a prior state of a daily log. Read-only; the
/// backend returns them ordered by time, earliest first. `changed_at` is
/// displayed verbatim, so it stays a string.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct DailyLogChange {
    pub id: Option<i64>,
    pub project_id: Option<i64>,
    pub new_description: Option<String>,
    pub status_review: Option<String>,
    pub changed_at: Option<String>,
}

impl DailyLogChange {
    pub fn status(&self) -> ReviewStatus {
        ReviewStatus::from_wire(self.status_review.as_deref())
    }
}
