use async_trait::async_trait;

use super::ServiceError;

/// Web search capability bound to agents that carry the search tool
#[async_trait]
pub trait SearchTool: Send + Sync {
    /// Run a query and return a plain-text summary of the results
    async fn search(&self, query: &str) -> Result<String, ServiceError>;

    /// Tool name as shown to the model
    fn name(&self) -> &str;
}
