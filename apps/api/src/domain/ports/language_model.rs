use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use super::ServiceError;

/// A single request to the language model
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Prompt {
    /// Persona and rules for the model
    pub system: String,
    /// The actual request
    pub user: String,
}

impl Prompt {
    pub fn new(system: impl Into<String>, user: impl Into<String>) -> Self {
        Self {
            system: system.into(),
            user: user.into(),
        }
    }
}

/// Text generation capability
///
/// Configured once at startup and shared by every request.
#[async_trait]
pub trait LanguageModel: Send + Sync {
    /// Generate a free-text completion for the prompt
    async fn generate(&self, prompt: &Prompt) -> Result<String, ServiceError>;

    /// Model identifier, for logging
    fn model_name(&self) -> &str;
}
