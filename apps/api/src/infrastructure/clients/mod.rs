// External service clients
// Adapters that implement the domain service ports

pub mod duckduckgo_search;
pub mod gemini_client;

pub use duckduckgo_search::DuckDuckGoSearch;
pub use gemini_client::GeminiClient;

use crate::domain::ports::ServiceError;

/// Maps a reqwest failure onto the port error
pub(crate) fn transport_error(err: reqwest::Error) -> ServiceError {
    ServiceError::Transport(err.to_string())
}

/// Turns a non-success response into the matching port error
pub(crate) async fn status_error(response: reqwest::Response) -> ServiceError {
    let status = response.status();
    if status == reqwest::StatusCode::TOO_MANY_REQUESTS {
        return ServiceError::RateLimited;
    }

    let body = response.text().await.unwrap_or_default();
    ServiceError::Status {
        status: status.as_u16(),
        body,
    }
}
