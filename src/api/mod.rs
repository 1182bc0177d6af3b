//! REST client layer: request building, the response envelope and errors.

mod client;
mod endpoints;
mod envelope;
mod error;

pub use client::{ApiClient, ApiResponse, RequestOptions};
pub use endpoints::Endpoints;
pub use envelope::Envelope;
pub use error::ApiError;
