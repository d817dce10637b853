use std::collections::HashMap;
use std::error::Error;
use std::env;

use chrono::{Datelike, Days, Local};
use worklog::domain::{LogFilter, Project};
use worklog::hours::hours_to_clock;
use worklog::{BackendUrl, Session, WorklogClient};

#[tokio::main]
async fn main() -> Result<(), Box<dyn Error>> {
    let client = get_client()?;

    let info = client.employee_info().await?;
    let today = Local::now().date_naive();
    let week_start = today - Days::new(today.weekday().num_days_from_monday() as u64);
    let filter = LogFilter::date_range(week_start, week_start + Days::new(6));

    let rows = client.filtered_logs(info.employee.id, &filter).await?;

    // Sum hours per project across the week
    let mut totals: HashMap<i64, f64> = HashMap::new();
    for row in &rows {
        let (Some(project_id), Some(hours)) = (row.project_id, row.total_hours.as_ref()) else {
            continue;
        };
        *totals.entry(project_id).or_insert(0.0) += hours.as_hours();
    }

    let mut totals: Vec<_> = totals.into_iter().collect();
    totals.sort_by(|a, b| b.1.partial_cmp(&a.1).unwrap_or(std::cmp::Ordering::Equal));

    println!("This week per project:");
    for (project_id, hours) in totals {
        println!(
            "{} | {}",
            Project::name_by_id(&info.projects, Some(project_id)),
            hours_to_clock(hours)
        );
    }

    Ok(())
}

fn get_client() -> Result<WorklogClient, Box<dyn Error>> {
    dotenvy::from_filename("./worklog/.env.local").ok();
    let email = env::var("WORKLOG_EMAIL").expect("WORKLOG_EMAIL must be set");
    let token = env::var("WORKLOG_TOKEN").ok();

    let session = Session::new(email, token)?;
    Ok(WorklogClient::new(BackendUrl::from_env(), session))
}
