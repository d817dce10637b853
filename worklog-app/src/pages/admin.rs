use worklog::domain::{Department, Designation, Employee, Project};
use worklog::WorklogClient;

use crate::fetch::RequestSlot;

use super::PageError;

const PAGE_SIZE: usize = 10;

/// The admin dashboard's employee directory: all lookup tables fetched in
/// one round trip, paginated client-side, with reviewer reassignment.
pub struct AdminPage {
    client: WorklogClient,
    dashboard_request: RequestSlot,
    pub employees: Vec<Employee>,
    pub departments: Vec<Department>,
    pub designations: Vec<Designation>,
    pub projects: Vec<Project>,
    pub page: usize,
}

impl AdminPage {
    pub fn new(client: WorklogClient) -> Self {
        Self {
            client,
            dashboard_request: RequestSlot::new(),
            employees: Vec::new(),
            departments: Vec::new(),
            designations: Vec::new(),
            projects: Vec::new(),
            page: 1,
        }
    }

    pub async fn load(&mut self) -> Result<(), PageError> {
        let client = self.client.clone();
        let outcome = self
            .dashboard_request
            .run(async move { client.dashboard_init().await })
            .await;
        let Some(result) = outcome.into_option() else {
            return Ok(());
        };
        let mut data = result?;

        data.employees.sort_by_key(|e| e.id);
        data.departments.sort_by_key(|d| d.id);
        data.designations.sort_by_key(|d| d.id);
        data.projects.sort_by_key(|p| p.id);

        self.employees = data.employees;
        self.departments = data.departments;
        self.designations = data.designations;
        self.projects = data.projects;
        self.page = 1;
        Ok(())
    }

    pub fn page_count(&self) -> usize {
        self.employees.len().div_ceil(PAGE_SIZE).max(1)
    }

    pub fn set_page(&mut self, page: usize) {
        self.page = page.clamp(1, self.page_count());
    }

    /// The employees visible on the current page.
    pub fn current_page(&self) -> &[Employee] {
        let start = (self.page - 1) * PAGE_SIZE;
        let end = (start + PAGE_SIZE).min(self.employees.len());
        if start >= self.employees.len() {
            &[]
        } else {
            &self.employees[start..end]
        }
    }

    pub fn designations_for_department(&self, department_id: i64) -> Vec<&Designation> {
        self.designations
            .iter()
            .filter(|d| d.department_id == Some(department_id))
            .collect()
    }

    /// Reassigns an employee's reviewer, then refreshes the directory.
    pub async fn update_reviewer(
        &mut self,
        employee_id: i64,
        reviewer_id: Option<i64>,
    ) -> Result<(), PageError> {
        self.client
            .update_reviewer(employee_id, reviewer_id)
            .await?;
        self.load().await
    }

    pub fn teardown(&self) {
        self.dashboard_request.cancel();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use worklog::{BackendUrl, Session};

    fn page_with_employees(count: usize) -> AdminPage {
        let client = WorklogClient::new(
            BackendUrl::new("http://localhost:5000"),
            Session::new("admin@example.com", None).unwrap(),
        );
        let mut page = AdminPage::new(client);
        page.employees = (1..=count as i64)
            .map(|id| Employee {
                id,
                employee_name: Some(format!("Employee {id}")),
                email: None,
                department_id: None,
                designation_id: None,
                reviewer_id: None,
            })
            .collect();
        page
    }

    #[test]
    fn test_pagination_slices_and_clamps() {
        let mut page = page_with_employees(23);
        assert_eq!(page.page_count(), 3);
        assert_eq!(page.current_page().len(), 10);

        page.set_page(3);
        assert_eq!(page.current_page().len(), 3);

        page.set_page(99);
        assert_eq!(page.page, 3);
        page.set_page(0);
        assert_eq!(page.page, 1);
    }

    #[test]
    fn test_empty_directory_has_one_empty_page() {
        let page = page_with_employees(0);
        assert_eq!(page.page_count(), 1);
        assert!(page.current_page().is_empty());
    }
}
