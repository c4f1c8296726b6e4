pub mod api;
pub mod cli;
pub mod infra;
pub mod view;

pub use api::{RequestError, SummaryClient};
