use worklog::domain::{Employee, Project, ProjectAssignment};
use worklog::WorklogClient;

use crate::fetch::RequestSlot;

use super::PageError;

/// A manager's project-assignment view: their subordinates, the projects
/// they manage, and assign/remove actions against both.
pub struct AssignmentPage {
    client: WorklogClient,
    team_request: RequestSlot,
    pub manager: Option<Employee>,
    pub subordinates: Vec<Employee>,
    pub projects: Vec<Project>,
    pub status_message: Option<String>,
}

impl AssignmentPage {
    pub fn new(client: WorklogClient) -> Self {
        Self {
            client,
            team_request: RequestSlot::new(),
            manager: None,
            subordinates: Vec::new(),
            projects: Vec::new(),
            status_message: None,
        }
    }

    pub async fn load(&mut self) -> Result<(), PageError> {
        if self.manager.is_none() {
            let info = self.client.employee_info().await?;
            self.manager = Some(info.employee);
        }
        self.reload_team().await
    }

    pub async fn reload_team(&mut self) -> Result<(), PageError> {
        let Some(manager) = &self.manager else {
            return Err(PageError::Validation(
                "Unable to load manager data.".to_string(),
            ));
        };
        let manager_id = manager.id;

        let client = self.client.clone();
        let outcome = self
            .team_request
            .run(async move {
                let subordinates = client.subordinates(manager_id).await?;
                let projects = client.projects_for_manager(manager_id).await?;
                Ok::<_, worklog::ApiError>((subordinates, projects))
            })
            .await;
        let Some(result) = outcome.into_option() else {
            return Ok(());
        };
        let (subordinates, projects) = result?;
        self.subordinates = subordinates;
        self.projects = projects;
        Ok(())
    }

    /// Assigns one of the manager's projects to a subordinate.
    pub async fn assign(&mut self, employee_id: i64, project_id: i64) -> Result<(), PageError> {
        let assignment = self.assignment(employee_id, project_id)?;
        self.client.assign_project(&assignment).await?;
        self.status_message = Some("Project assigned successfully!".to_string());
        self.reload_team().await
    }

    pub async fn remove(&mut self, employee_id: i64, project_id: i64) -> Result<(), PageError> {
        let assignment = self.assignment(employee_id, project_id)?;
        self.client.remove_project(&assignment).await?;
        self.status_message = Some("Project assignment removed.".to_string());
        self.reload_team().await
    }

    fn assignment(&self, employee_id: i64, project_id: i64) -> Result<ProjectAssignment, PageError> {
        let Some(manager) = &self.manager else {
            return Err(PageError::Validation(
                "Unable to load manager data.".to_string(),
            ));
        };
        if !self.projects.iter().any(|p| p.id == project_id) {
            return Err(PageError::Validation(
                "Select one of your projects first.".to_string(),
            ));
        }
        Ok(ProjectAssignment {
            manager_id: manager.id,
            project_id,
            employee_id,
        })
    }

    pub fn teardown(&self) {
        self.team_request.cancel();
    }
}
