// Ports to the external services the crew depends on
// Implementations live in the infrastructure layer

pub mod language_model;
pub mod search_tool;

pub use language_model::{LanguageModel, Prompt};
pub use search_tool::SearchTool;

use thiserror::Error;

/// Failure reported by an external service adapter
#[derive(Debug, Error)]
pub enum ServiceError {
    #[error("transport error: {0}")]
    Transport(String),

    #[error("service returned HTTP {status}: {body}")]
    Status { status: u16, body: String },

    #[error("rate limited by upstream service")]
    RateLimited,

    #[error("malformed response: {0}")]
    MalformedResponse(String),
}
