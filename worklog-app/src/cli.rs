use clap::{Parser, Subcommand};

#[derive(Debug, Parser)]
#[command(name = "worklog")]
#[command(about = "Timesheet client for the worklog backend")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Print this week's timesheet with per-project and daily totals
    Week,
    /// Print today's log entries
    Today,
    /// Save the bearer token used for API calls
    Login { token: String },
    /// Remove the saved bearer token
    Logout,
    /// Print config path and create default file if missing
    ConfigPath,
}
