use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use tracing::info;

use super::errors::{AgentError, AgentResult};
use super::executor::TaskExecutor;
use super::types::{AgentSpec, Role, TaskOutput, TaskSpec};
use crate::domain::ports::{LanguageModel, SearchTool};

/// Execution knobs for a crew run
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct CrewSettings {
    /// Action rounds (searches, delegations) an agent gets per task
    pub max_iterations: usize,
    /// Log full prompts and responses at debug level
    pub verbose: bool,
}

impl CrewSettings {
    pub fn new(max_iterations: usize, verbose: bool) -> AgentResult<Self> {
        if max_iterations == 0 {
            return Err(AgentError::ConfigError(
                "max_iterations must be at least 1".to_string(),
            ));
        }

        Ok(Self {
            max_iterations,
            verbose,
        })
    }
}

impl Default for CrewSettings {
    fn default() -> Self {
        Self {
            max_iterations: 5,
            verbose: false,
        }
    }
}

/// Ordered agents and tasks executed together
///
/// # Invariants
/// - Agent roles are unique
/// - Every task is assigned to an agent of this crew
/// - Tasks run in construction order
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Crew {
    agents: Vec<AgentSpec>,
    tasks: Vec<TaskSpec>,
}

impl Crew {
    /// Creates a crew, checking that every task has its agent
    pub fn new(agents: Vec<AgentSpec>, tasks: Vec<TaskSpec>) -> AgentResult<Self> {
        let mut roles = HashSet::new();
        for agent in &agents {
            if !roles.insert(agent.role) {
                return Err(AgentError::ConfigError(format!(
                    "Duplicate agent role: {}",
                    agent.role
                )));
            }
        }

        if let Some(orphan) = tasks.iter().find(|t| !roles.contains(&t.agent)) {
            return Err(AgentError::AgentNotFound(orphan.agent.to_string()));
        }

        Ok(Self { agents, tasks })
    }

    pub fn agents(&self) -> &[AgentSpec] {
        &self.agents
    }

    pub fn tasks(&self) -> &[TaskSpec] {
        &self.tasks
    }

    pub fn agent(&self, role: Role) -> Option<&AgentSpec> {
        self.agents.iter().find(|a| a.role == role)
    }

    /// Runs every task in order
    ///
    /// Each task sees the outputs of the tasks before it. The first
    /// failing model or search call aborts the whole run.
    pub async fn kickoff(
        &self,
        llm: &dyn LanguageModel,
        search: &dyn SearchTool,
        settings: &CrewSettings,
    ) -> AgentResult<CrewOutput> {
        let executor = TaskExecutor::new(
            llm,
            search,
            &self.agents,
            settings.max_iterations,
            settings.verbose,
        );
        let mut completed: Vec<TaskOutput> = Vec::with_capacity(self.tasks.len());

        for (index, task) in self.tasks.iter().enumerate() {
            let agent = self
                .agent(task.agent)
                .ok_or_else(|| AgentError::AgentNotFound(task.agent.to_string()))?;

            info!(
                task = index + 1,
                of = self.tasks.len(),
                role = %agent.role,
                "Starting task"
            );

            let output = executor.execute(agent, task, &completed).await?;
            completed.push(output);
        }

        Ok(CrewOutput { tasks: completed })
    }
}

/// Outputs of a finished crew run, in task order
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CrewOutput {
    pub tasks: Vec<TaskOutput>,
}

impl CrewOutput {
    /// All task outputs joined by blank lines
    pub fn text(&self) -> String {
        self.tasks
            .iter()
            .map(|t| t.output.as_str())
            .collect::<Vec<_>>()
            .join("\n\n")
    }
}
