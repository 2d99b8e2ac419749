//! Test doubles for the external services

#![allow(dead_code)]

use async_trait::async_trait;
use healthcrew_api::domain::ports::{LanguageModel, Prompt, SearchTool, ServiceError};
use std::collections::VecDeque;
use std::sync::Mutex;

/// Language model that replays a script, then answers as the prompted role
///
/// Once the script is exhausted every call returns
/// `Final Answer: Advice from <role>`, where the role is read from the
/// first line of the system prompt.
pub struct ScriptedModel {
    script: Mutex<VecDeque<String>>,
    prompts: Mutex<Vec<Prompt>>,
    fail_on_call: Option<usize>,
}

impl ScriptedModel {
    pub fn new() -> Self {
        Self::with_script(&[])
    }

    pub fn with_script(responses: &[&str]) -> Self {
        Self {
            script: Mutex::new(responses.iter().map(|r| r.to_string()).collect()),
            prompts: Mutex::new(Vec::new()),
            fail_on_call: None,
        }
    }

    /// Fails the n-th call (1-based) with an HTTP 500
    pub fn failing_on(call: usize) -> Self {
        Self {
            fail_on_call: Some(call),
            ..Self::new()
        }
    }

    pub fn prompts(&self) -> Vec<Prompt> {
        self.prompts.lock().unwrap().clone()
    }

    /// Role named by each prompt, in call order
    pub fn prompted_roles(&self) -> Vec<String> {
        self.prompts().iter().map(role_of).collect()
    }
}

pub fn role_of(prompt: &Prompt) -> String {
    prompt
        .system
        .lines()
        .next()
        .and_then(|line| line.strip_prefix("You are "))
        .map(|role| role.trim_end_matches('.').to_string())
        .unwrap_or_default()
}

#[async_trait]
impl LanguageModel for ScriptedModel {
    async fn generate(&self, prompt: &Prompt) -> Result<String, ServiceError> {
        let call = {
            let mut prompts = self.prompts.lock().unwrap();
            prompts.push(prompt.clone());
            prompts.len()
        };

        if self.fail_on_call == Some(call) {
            return Err(ServiceError::Status {
                status: 500,
                body: "model unavailable".to_string(),
            });
        }

        if let Some(response) = self.script.lock().unwrap().pop_front() {
            return Ok(response);
        }

        Ok(format!("Final Answer: Advice from {}", role_of(prompt)))
    }

    fn model_name(&self) -> &str {
        "scripted"
    }
}

/// Search tool that records queries
pub struct RecordingSearch {
    queries: Mutex<Vec<String>>,
    fail: bool,
}

impl RecordingSearch {
    pub fn new() -> Self {
        Self {
            queries: Mutex::new(Vec::new()),
            fail: false,
        }
    }

    pub fn failing() -> Self {
        Self {
            fail: true,
            ..Self::new()
        }
    }

    pub fn queries(&self) -> Vec<String> {
        self.queries.lock().unwrap().clone()
    }
}

#[async_trait]
impl SearchTool for RecordingSearch {
    async fn search(&self, query: &str) -> Result<String, ServiceError> {
        self.queries.lock().unwrap().push(query.to_string());

        if self.fail {
            return Err(ServiceError::RateLimited);
        }

        Ok(format!("Result for {}", query))
    }

    fn name(&self) -> &str {
        "recording_search"
    }
}
