use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct Project {
    pub id: i64,
    pub name: String,
    pub manager_id: Option<i64>,
}

impl Project {
    /// Lookup-table helper for table cells: name by id, "Unknown" when
    /// the project is missing from the reference list.
    pub fn name_by_id(projects: &[Project], id: Option<i64>) -> &str {
        id.and_then(|id| projects.iter().find(|p| p.id == id))
            .map(|p| p.name.as_str())
            .unwrap_or("Unknown")
    }
}

/// Body of the manager-project assign/remove endpoints.
#[derive(Debug, Clone, Serialize)]
pub struct ProjectAssignment {
    pub manager_id: i64,
    pub project_id: i64,
    pub employee_id: i64,
}
