use async_trait::async_trait;
use reqwest::Client;
use serde::Deserialize;

use super::{status_error, transport_error};
use crate::domain::ports::{SearchTool, ServiceError};

pub const DEFAULT_BASE_URL: &str = "https://api.duckduckgo.com";

/// Related topics kept in a summary unless configured otherwise
pub const DEFAULT_MAX_RESULTS: usize = 5;

/// Returned when a query yields nothing usable
pub const NO_RESULTS: &str = "No good DuckDuckGo Search Result was found";

/// DuckDuckGo Instant Answer implementation of SearchTool
#[derive(Clone)]
pub struct DuckDuckGoSearch {
    client: Client,
    base_url: String,
    max_results: usize,
}

impl DuckDuckGoSearch {
    pub fn new() -> Self {
        Self {
            client: Client::new(),
            base_url: DEFAULT_BASE_URL.to_string(),
            max_results: DEFAULT_MAX_RESULTS,
        }
    }

    /// Points the client at another host (proxies, tests)
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }

    /// Caps how many related topics end up in the summary
    pub fn with_max_results(mut self, max_results: usize) -> Self {
        self.max_results = max_results;
        self
    }
}

impl Default for DuckDuckGoSearch {
    fn default() -> Self {
        Self::new()
    }
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "PascalCase", default)]
struct InstantAnswer {
    heading: String,
    abstract_text: String,
    answer: String,
    definition: String,
    related_topics: Vec<RelatedTopic>,
}

/// Either a single topic or a named group of topics
#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "PascalCase", default)]
struct RelatedTopic {
    text: Option<String>,
    topics: Vec<RelatedTopic>,
}

impl RelatedTopic {
    fn collect_texts<'a>(&'a self, out: &mut Vec<&'a str>) {
        if let Some(text) = self.text.as_deref().filter(|t| !t.is_empty()) {
            out.push(text);
        }
        for topic in &self.topics {
            topic.collect_texts(out);
        }
    }
}

impl InstantAnswer {
    /// Plain-text summary for the model
    fn summarize(&self, max_results: usize) -> String {
        let mut lines = Vec::new();

        if !self.abstract_text.is_empty() {
            if self.heading.is_empty() {
                lines.push(self.abstract_text.clone());
            } else {
                lines.push(format!("{}: {}", self.heading, self.abstract_text));
            }
        }
        if !self.answer.is_empty() {
            lines.push(self.answer.clone());
        }
        if !self.definition.is_empty() {
            lines.push(self.definition.clone());
        }

        let mut topics = Vec::new();
        for topic in &self.related_topics {
            topic.collect_texts(&mut topics);
        }
        lines.extend(topics.into_iter().take(max_results).map(String::from));

        if lines.is_empty() {
            NO_RESULTS.to_string()
        } else {
            lines.join("\n")
        }
    }
}

#[async_trait]
impl SearchTool for DuckDuckGoSearch {
    async fn search(&self, query: &str) -> Result<String, ServiceError> {
        let response = self
            .client
            .get(format!("{}/", self.base_url.trim_end_matches('/')))
            .query(&[
                ("q", query),
                ("format", "json"),
                ("no_html", "1"),
                ("skip_disambig", "1"),
            ])
            .send()
            .await
            .map_err(transport_error)?;

        if !response.status().is_success() {
            return Err(status_error(response).await);
        }

        let answer: InstantAnswer = response
            .json()
            .await
            .map_err(|e| ServiceError::MalformedResponse(e.to_string()))?;

        Ok(answer.summarize(self.max_results))
    }

    fn name(&self) -> &str {
        "duckduckgo_search"
    }
}
