use serde::Deserialize;

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct Department {
    pub id: i64,
    pub name: String,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct Designation {
    pub id: i64,
    pub title: String,
    pub department_id: Option<i64>,
}
