// Agent system modules
//
// This module contains the health crew: the role catalog, the task
// graph builder, and the sequential executor that runs them against
// the language model.

pub mod catalog;
pub mod crew;
pub mod errors;
pub mod executor;
pub mod pipeline;
pub mod prompts;
pub mod tasks;
pub mod types;

// Re-export main types
pub use catalog::{build_agents, AgentRoster};
pub use crew::{Crew, CrewOutput, CrewSettings};
pub use errors::{AgentError, AgentResult};
pub use pipeline::{assemble_crew, HealthCrew, CrewRun};
pub use tasks::build_tasks;
pub use types::{AgentSpec, Role, TaskOutput, TaskSpec, ToolRef};
