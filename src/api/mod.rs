pub mod client;
pub mod error;
pub mod types;

pub use client::SummaryClient;
pub use error::RequestError;
pub use types::{BulletPointsResponse, SummaryResponse, TextRequest, TokenResponse};
