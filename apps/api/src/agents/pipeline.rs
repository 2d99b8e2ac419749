use serde::Serialize;
use std::sync::Arc;
use tracing::{error, info, info_span, Instrument};
use uuid::Uuid;

use super::catalog::build_agents;
use super::crew::{Crew, CrewSettings};
use super::errors::{AgentError, AgentResult};
use super::tasks::build_tasks;
use crate::domain::ports::{LanguageModel, SearchTool};
use crate::domain::profile::{DiseaseStatus, UserProfile};

/// Result of one pipeline run
#[derive(Debug, Clone, Serialize)]
pub struct CrewRun {
    pub run_id: Uuid,
    pub result: String,
    pub disease_branch: bool,
    pub task_count: usize,
}

/// Assembles the crew for a profile without running it
pub fn assemble_crew(profile: &UserProfile) -> AgentResult<Crew> {
    let roster = build_agents(profile);
    let tasks = build_tasks(profile, &roster);
    Crew::new(roster.agents(), tasks)
}

/// Appends the declared disease to results of the no-disease path
///
/// # Example
/// ```
/// use healthcrew_api::agents::pipeline::append_disease_note;
/// use healthcrew_api::domain::profile::DiseaseStatus;
///
/// let text = append_disease_note("Plan".to_string(), &DiseaseStatus::from_flag("no"));
/// assert_eq!(text, "Plan\n disease: no");
/// ```
pub fn append_disease_note(mut result: String, disease: &DiseaseStatus) -> String {
    if let DiseaseStatus::Absent(raw) = disease {
        result.push_str("\n disease: ");
        result.push_str(raw);
    }
    result
}

/// Entry point from user input to finished advice
///
/// Holds the shared model and search handles; agents and tasks are
/// rebuilt from scratch for every run.
#[derive(Clone)]
pub struct HealthCrew {
    llm: Arc<dyn LanguageModel>,
    search: Arc<dyn SearchTool>,
    settings: CrewSettings,
}

impl HealthCrew {
    pub fn new(
        llm: Arc<dyn LanguageModel>,
        search: Arc<dyn SearchTool>,
        settings: CrewSettings,
    ) -> Self {
        Self {
            llm,
            search,
            settings,
        }
    }

    /// Builds and runs the crew for one profile
    pub async fn run(&self, profile: &UserProfile) -> AgentResult<CrewRun> {
        let run_id = Uuid::new_v4();
        let disease_branch = profile.has_disease();
        let span = info_span!("crew_run", %run_id, disease_branch);

        async {
            let crew = assemble_crew(profile)?;
            let task_count = crew.tasks().len();

            info!(
                agents = crew.agents().len(),
                tasks = task_count,
                model = self.llm.model_name(),
                "Kicking off crew"
            );

            let output = crew
                .kickoff(self.llm.as_ref(), self.search.as_ref(), &self.settings)
                .await
                .map_err(|e| {
                    error!(error = %e, "Crew run failed");
                    e
                })?;

            let result = append_disease_note(output.text(), profile.disease());
            info!(chars = result.len(), "Crew run finished");

            Ok::<_, AgentError>(CrewRun {
                run_id,
                result,
                disease_branch,
                task_count,
            })
        }
        .instrument(span)
        .await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::agents::types::Role;

    #[test]
    fn suffix_added_without_disease() {
        let text = append_disease_note("Advice".to_string(), &DiseaseStatus::from_flag("No"));
        assert_eq!(text, "Advice\n disease: No");
    }

    #[test]
    fn suffix_keeps_empty_disease() {
        let text = append_disease_note("Advice".to_string(), &DiseaseStatus::from_flag(""));
        assert!(text.ends_with("\n disease: "));
    }

    #[test]
    fn no_suffix_with_disease() {
        let text = append_disease_note("Advice".to_string(), &DiseaseStatus::from_flag("YES"));
        assert_eq!(text, "Advice");
    }

    #[test]
    fn assembled_crew_is_consistent() {
        let crew = assemble_crew(&UserProfile::from_inputs(30.0, "Female", "Yes")).unwrap();

        assert_eq!(crew.agents().len(), 4);
        assert_eq!(crew.tasks().len(), 4);
        for task in crew.tasks() {
            assert!(crew.agent(task.agent).is_some());
        }
        assert_eq!(crew.tasks()[3].agent, Role::DiseaseExpert);
    }

    #[test]
    fn assembly_is_deterministic() {
        let profile = UserProfile::from_inputs(45.0, "Male", "no");
        assert_eq!(assemble_crew(&profile).unwrap(), assemble_crew(&profile).unwrap());
    }
}
