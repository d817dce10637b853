use serde::Deserialize;

use super::{Department, Designation, Project};

#[derive(Debug, Clone, Deserialize)]
pub struct Employee {
    pub id: i64,
    pub employee_name: Option<String>,
    pub email: Option<String>,
    pub department_id: Option<i64>,
    pub designation_id: Option<i64>,
    pub reviewer_id: Option<i64>,
}

/// Response of `GET /api/employee-info?email=`: the current employee plus
/// the projects they may log against.
#[derive(Debug, Clone, Deserialize)]
pub struct EmployeeInfo {
    pub employee: Employee,
    #[serde(default)]
    pub projects: Vec<Project>,
}

/// Response of `GET /api/employees/{id}/details`.
#[derive(Debug, Clone, Deserialize)]
pub struct EmployeeDetails {
    #[serde(flatten)]
    pub employee: Employee,
    pub department: Option<Department>,
    pub designation: Option<Designation>,
}

/// Response of `GET /api/dashboard/init`: the admin dashboard's lookup
/// tables, fetched in one round trip.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct DashboardInit {
    #[serde(default)]
    pub employees: Vec<Employee>,
    #[serde(default)]
    pub departments: Vec<Department>,
    #[serde(default)]
    pub designations: Vec<Designation>,
    #[serde(default)]
    pub projects: Vec<Project>,
}
