// Prompt templates for LLM interactions
//
// This module contains all prompt templates used by the agent system.
// Prompts are versioned for reproducibility.

use std::collections::HashMap;

/// Prompt template structure
pub struct PromptTemplate {
    pub name: String,
    pub version: String,
    pub system: String,
    pub user_template: String,
}

impl PromptTemplate {
    /// Render the user template with variables
    pub fn render(&self, variables: &HashMap<String, String>) -> String {
        substitute(&self.user_template, variables)
    }

    /// Render the system template with variables
    pub fn render_system(&self, variables: &HashMap<String, String>) -> String {
        substitute(&self.system, variables)
    }
}

/// Builds a variable map from `(name, value)` pairs
pub fn variables<I, K, V>(pairs: I) -> HashMap<String, String>
where
    I: IntoIterator<Item = (K, V)>,
    K: Into<String>,
    V: ToString,
{
    pairs
        .into_iter()
        .map(|(k, v)| (k.into(), v.to_string()))
        .collect()
}

/// Replaces every `{{name}}` placeholder with its value
///
/// Substitution is single-pass: values are never re-scanned, and
/// placeholders without a value are left as they are.
///
/// # Example
/// ```
/// use healthcrew_api::agents::prompts::{substitute, variables};
///
/// let vars = variables([("age", 45)]);
/// assert_eq!(substitute("a {{age}}-year-old", &vars), "a 45-year-old");
/// ```
pub fn substitute(template: &str, variables: &HashMap<String, String>) -> String {
    let mut out = String::with_capacity(template.len());
    let mut rest = template;

    while let Some(start) = rest.find("{{") {
        out.push_str(&rest[..start]);
        let after = &rest[start + 2..];

        match after.find("}}") {
            Some(end) => {
                let key = after[..end].trim();
                match variables.get(key) {
                    Some(value) => out.push_str(value),
                    None => out.push_str(&rest[start..start + end + 4]),
                }
                rest = &after[end + 2..];
            }
            None => {
                out.push_str(&rest[start..]);
                rest = "";
            }
        }
    }

    out.push_str(rest);
    out
}

pub mod library {
    use super::PromptTemplate;

    /// Persona prompt for an agent working on a task
    ///
    /// Variables: `role`, `backstory`, `goal`, `capabilities`
    pub fn agent_task() -> PromptTemplate {
        PromptTemplate {
            name: "agent_task".to_string(),
            version: "1.0.0".to_string(),
            system: "You are {{role}}.\n\
                     {{backstory}}\n\n\
                     Your personal goal is: {{goal}}\n\n\
                     {{capabilities}}"
                .to_string(),
            user_template: "Current Task: {{description}}\n\n\
                            This is the expected criteria for your final answer: {{expected_output}}\n\
                            You MUST return the actual complete content as the final answer, not a summary.\n\
                            {{context}}{{scratchpad}}\n\
                            Begin! This is VERY important to you, use the tools available and give your best \
                            Final Answer, your job depends on it!"
                .to_string(),
        }
    }

    /// One-shot consultation of a coworker during delegation
    ///
    /// Variables: `role`, `backstory`, `goal`, `requester`, `request`
    pub fn coworker_consult() -> PromptTemplate {
        PromptTemplate {
            name: "coworker_consult".to_string(),
            version: "1.0.0".to_string(),
            system: "You are {{role}}.\n\
                     {{backstory}}\n\n\
                     Your personal goal is: {{goal}}"
                .to_string(),
            user_template: "Your coworker, the {{requester}}, needs your help:\n\n\
                            {{request}}\n\n\
                            Answer directly and completely. Do not prescribe medicines."
                .to_string(),
        }
    }

    /// Response format shared by every agent
    pub const FINAL_ANSWER_FORMAT: &str = "When you have the final answer, reply with:\n\
                                           Final Answer: <your complete answer>";

    /// Describes the search action to agents bound to the search tool
    ///
    /// Variables: `tool_name`
    pub const SEARCH_ACTION_FORMAT: &str = "You can search the internet with the {{tool_name}} tool. \
                                            To use it, reply with exactly:\n\
                                            Action: search\n\
                                            Input: <search query>";

    /// Describes delegation to agents that may delegate
    ///
    /// Variables: `coworkers`
    pub const DELEGATE_ACTION_FORMAT: &str = "You can delegate work to or ask a question of a coworker. \
                                              Available coworkers: {{coworkers}}. \
                                              To do so, reply with exactly:\n\
                                              Action: delegate\n\
                                              Coworker: <coworker role>\n\
                                              Input: <everything they need to know, including context>";

    /// Appended once an agent runs out of action rounds
    pub const FORCE_FINAL_ANSWER: &str = "You have used all your allowed actions. \
                                          Give your Final Answer now without using any tool or coworker.";
}
