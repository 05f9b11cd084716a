// Declare modules within this crate
pub mod client;
pub mod errors;
pub mod models;
pub mod response;

// Re-export the main components for users of this crate
pub use client::ApiClient;
pub use errors::ApiClientError;
pub use response::{handle_response, RawResponse};
