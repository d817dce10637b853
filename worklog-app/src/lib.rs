pub mod config;
pub mod day_editor;
pub mod fetch;
pub mod pages;
pub mod week;
