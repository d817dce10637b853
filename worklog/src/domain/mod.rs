mod analytics;
mod change;
mod daily_log;
mod employee;
mod filters;
mod org;
mod project;
mod review;

pub use analytics::*;
pub use change::*;
pub use daily_log::*;
pub use employee::*;
pub use filters::*;
pub use org::*;
pub use project::*;
pub use review::*;
