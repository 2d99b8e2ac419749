use serde::{Deserialize, Serialize};
use std::fmt;

/// Roles available to a health crew
///
/// A role is unique within a crew and doubles as the agent's identity.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Role {
    FitnessExpert,
    Nutritionist,
    Doctor,
    DiseaseExpert,
}

impl Role {
    /// Resolves a role from the name a model writes in a delegation request
    pub fn from_name(name: &str) -> Option<Self> {
        let normalized: String = name
            .chars()
            .filter(|c| c.is_alphanumeric())
            .collect::<String>()
            .to_lowercase();

        match normalized.as_str() {
            "fitnessexpert" => Some(Role::FitnessExpert),
            "nutritionist" => Some(Role::Nutritionist),
            "doctor" => Some(Role::Doctor),
            "diseaseexpert" => Some(Role::DiseaseExpert),
            _ => None,
        }
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Role::FitnessExpert => write!(f, "Fitness Expert"),
            Role::Nutritionist => write!(f, "Nutritionist"),
            Role::Doctor => write!(f, "Doctor"),
            Role::DiseaseExpert => write!(f, "Disease Expert"),
        }
    }
}

/// Tools an agent may be bound to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ToolRef {
    WebSearch,
}

/// A configured persona that performs tasks
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AgentSpec {
    pub role: Role,
    pub goal: String,
    pub backstory: String,
    pub allow_delegation: bool,
    pub tools: Vec<ToolRef>,
}

impl AgentSpec {
    pub fn has_tool(&self, tool: ToolRef) -> bool {
        self.tools.contains(&tool)
    }
}

/// An instruction bound to one agent of the crew
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TaskSpec {
    pub description: String,
    pub agent: Role,
    pub expected_output: String,
}

/// Output of one executed task
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TaskOutput {
    pub role: Role,
    pub description: String,
    pub output: String,
}
