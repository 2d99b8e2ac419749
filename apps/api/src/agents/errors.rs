use thiserror::Error;

use crate::domain::ports::ServiceError;

/// Errors that can occur in the agent system
#[derive(Debug, Error)]
pub enum AgentError {
    #[error("LLM API error: {0}")]
    LlmError(ServiceError),

    #[error("Search tool error: {0}")]
    SearchError(ServiceError),

    #[error("Agent not found: {0}")]
    AgentNotFound(String),

    #[error("Task execution failed: {0}")]
    TaskExecutionFailed(String),

    #[error("Configuration error: {0}")]
    ConfigError(String),
}

impl AgentError {
    /// True when the failure came from an upstream service rather than
    /// from the crew itself
    pub fn is_upstream(&self) -> bool {
        matches!(self, AgentError::LlmError(_) | AgentError::SearchError(_))
    }
}

pub type AgentResult<T> = Result<T, AgentError>;
