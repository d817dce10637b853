mod admin;
mod analytics;
mod assignment;
mod employee_detail;
mod history;
mod previous;
mod review_queue;
mod today;
mod week_view;

pub use admin::*;
pub use analytics::*;
pub use assignment::*;
pub use employee_detail::*;
pub use history::*;
pub use previous::*;
pub use review_queue::*;
pub use today::*;
pub use week_view::*;

use thiserror::Error;

/// Failures a page surfaces to the user. Local validation never reaches
/// the network; superseded fetches are not errors at all and resolve as
/// quiet no-ops.
#[derive(Error, Debug)]
pub enum PageError {
    #[error("{0}")]
    Validation(String),
    #[error(transparent)]
    Api(#[from] worklog::ApiError),
}
