use worklog::domain::{DailyLogChange, LogId};
use worklog::WorklogClient;

use super::PageError;

/// The audit-trail dialog for one log: prior project, description, and
/// status states, earliest first.
#[derive(Debug, Clone, Default)]
pub struct ChangeHistory {
    pub changes: Vec<DailyLogChange>,
}

impl ChangeHistory {
    /// Loads the trail for a log. Entries that were never saved have no
    /// history, so a temporary id short-circuits to an empty trail.
    pub async fn load(client: &WorklogClient, id: LogId) -> Result<Self, PageError> {
        match id.persisted() {
            None => Ok(Self::default()),
            Some(log_id) => Ok(Self {
                changes: client.log_changes(log_id).await?,
            }),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.changes.is_empty()
    }

    /// The "Changed At" cell: the earliest record is the initial entry,
    /// later ones show their timestamp verbatim.
    pub fn changed_at_label(&self, idx: usize) -> String {
        if idx == 0 {
            return "Initial Entry".to_string();
        }
        self.changes
            .get(idx)
            .and_then(|change| change.changed_at.clone())
            .unwrap_or_else(|| "N/A".to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_earliest_record_is_labeled_initial_entry() {
        let history = ChangeHistory {
            changes: vec![
                DailyLogChange {
                    id: Some(1),
                    project_id: Some(1),
                    new_description: Some("first".to_string()),
                    status_review: None,
                    changed_at: Some("2025-08-01 09:00:00".to_string()),
                },
                DailyLogChange {
                    id: Some(2),
                    project_id: Some(1),
                    new_description: Some("second".to_string()),
                    status_review: Some("Approved".to_string()),
                    changed_at: Some("2025-08-02 10:00:00".to_string()),
                },
            ],
        };
        assert_eq!(history.changed_at_label(0), "Initial Entry");
        assert_eq!(history.changed_at_label(1), "2025-08-02 10:00:00");
    }
}
