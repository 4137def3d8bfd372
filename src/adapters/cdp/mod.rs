pub mod auth;
pub mod client;
pub mod types;

pub use auth::ApiKey;
pub use client::{CdpClient, DEFAULT_BASE_URL};
