mod backend_url;
mod client;
mod session;

pub mod conflict;
pub mod domain;
pub mod hours;

pub use backend_url::*;
pub use client::*;
pub use session::*;
