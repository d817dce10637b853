mod cli;

use anyhow::{Context, Result};
use clap::Parser;
use tracing_subscriber::EnvFilter;

use worklog::domain::Project;
use worklog::hours::{hours_to_clock, to_iso_date, weekday_name};
use worklog::{BackendUrl, Session, WorklogClient};
use worklog_app::config::AppConfig;
use worklog_app::pages::{TodayPage, WeekPage};

use cli::{Cli, Commands};

#[tokio::main]
async fn main() -> Result<()> {
    dotenvy::dotenv().ok();
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    let cli = Cli::parse();
    match cli.command {
        Commands::Week => {
            let mut page = WeekPage::new(build_client()?);
            page.load().await?;
            print_week(&page);
        }
        Commands::Today => {
            let mut page = TodayPage::new(build_client()?);
            page.load().await?;
            print_today(&page);
        }
        Commands::Login { token } => {
            AppConfig::save_token(&token)?;
            println!("Token saved.");
        }
        Commands::Logout => {
            AppConfig::clear_token()?;
            println!("Token removed.");
        }
        Commands::ConfigPath => {
            let path = AppConfig::config_path()?;
            if !path.exists() {
                AppConfig::default().save()?;
            }
            println!("{}", path.display());
        }
    }
    Ok(())
}

fn build_client() -> Result<WorklogClient> {
    let config = AppConfig::load()?;
    let email = config
        .effective_email()
        .context("No email configured. Set `email` in config.toml or WORKLOG_EMAIL.")?;
    let token = AppConfig::load_token()?;
    let base_url = match std::env::var("WORKLOG_URL") {
        Ok(url) => BackendUrl::new(url),
        Err(_) => BackendUrl::new(&config.api_url),
    };
    let session = Session::new(email, token)?;
    Ok(WorklogClient::new(base_url, session))
}

fn print_week(page: &WeekPage) {
    println!(
        "Week {} – {}",
        to_iso_date(Some(page.window.start())),
        to_iso_date(Some(page.window.end()))
    );

    for project_id in page.logs.active_project_ids() {
        let name = Project::name_by_id(&page.projects, Some(project_id));
        print!("{:<30}", name);
        for date in page.window.dates() {
            print!(" {:>6}", hours_to_clock(page.logs.project_day_hours(project_id, date)));
        }
        println!(
            " | {:>6}",
            hours_to_clock(page.logs.project_week_hours(project_id))
        );
    }

    print!("{:<30}", "Total");
    for date in page.window.dates() {
        print!(" {:>6}", hours_to_clock(page.logs.day_hours(date)));
    }
    println!(" | {:>6}", page.logs.grand_total_display());
}

fn print_today(page: &TodayPage) {
    let Some(editor) = &page.editor else {
        println!("No logs loaded.");
        return;
    };
    println!(
        "{} ({})",
        to_iso_date(Some(editor.date())),
        weekday_name(editor.date())
    );
    for entry in editor.entries() {
        println!(
            "  {:<30} {:>6}  {:<8}  {}",
            Project::name_by_id(&page.projects, entry.project_id),
            entry.hours.display_clock(),
            entry.status.as_str(),
            entry.description
        );
    }
    println!("  Total: {}", editor.total_display());
}
