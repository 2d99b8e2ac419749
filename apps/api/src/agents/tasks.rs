use super::catalog::AgentRoster;
use super::prompts::{substitute, variables};
use super::types::TaskSpec;
use crate::domain::profile::UserProfile;

const FITNESS_TASK: &str = "Analyze the fitness requirements for a {{age}}-year-old {{gender}}. \
                            Provide recommendations for exercise routines and fitness strategies.";

const NUTRITION_TASK: &str = "Assess nutritional requirements for a {{age}}-year-old {{gender}}. \
                              Provide dietary recommendations based on specific nutritional needs. \
                              Do not prescribe a medicine";

const HEALTH_TASK: &str = "Evaluate overall health considerations for a {{age}}-year-old {{gender}}. \
                           Provide recommendations for a healthy lifestyle.";

const DISEASE_TASK: &str = "Provide recommendations for managing {{disease}}";

/// Builds the ordered task list for one crew run
///
/// The three base tasks (fitness, nutrition, doctor) are always present
/// and only mention age and gender. A declared disease appends a fourth
/// task for the disease expert, so the disease branch runs the full
/// four-task graph rather than the disease task alone.
pub fn build_tasks(profile: &UserProfile, roster: &AgentRoster) -> Vec<TaskSpec> {
    let vars = variables([
        ("age", profile.age().to_string()),
        ("gender", profile.gender().to_string()),
        ("disease", profile.disease().raw().to_string()),
    ]);

    let mut tasks = vec![
        TaskSpec {
            description: substitute(FITNESS_TASK, &vars),
            agent: roster.fitness.role,
            expected_output: "Exercise routines and fitness strategies".to_string(),
        },
        TaskSpec {
            description: substitute(NUTRITION_TASK, &vars),
            agent: roster.nutrition.role,
            expected_output: "Dietary recommendations".to_string(),
        },
        TaskSpec {
            description: substitute(HEALTH_TASK, &vars),
            agent: roster.doctor.role,
            expected_output: "Healthy lifestyle recommendations".to_string(),
        },
    ];

    if let Some(expert) = &roster.disease_expert {
        tasks.push(TaskSpec {
            description: substitute(DISEASE_TASK, &vars),
            agent: expert.role,
            expected_output: "Recommendations for managing the specific disease".to_string(),
        });
    }

    tasks
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::agents::catalog::build_agents;
    use crate::agents::types::Role;

    fn tasks_for(age: f64, gender: &str, disease: &str) -> Vec<TaskSpec> {
        let profile = UserProfile::from_inputs(age, gender, disease);
        let roster = build_agents(&profile);
        build_tasks(&profile, &roster)
    }

    #[test]
    fn three_tasks_without_disease() {
        let tasks = tasks_for(45.0, "Male", "no");

        let roles: Vec<Role> = tasks.iter().map(|t| t.agent).collect();
        assert_eq!(roles, vec![Role::FitnessExpert, Role::Nutritionist, Role::Doctor]);
    }

    #[test]
    fn four_tasks_with_disease() {
        let tasks = tasks_for(30.0, "Female", "Yes");

        let roles: Vec<Role> = tasks.iter().map(|t| t.agent).collect();
        assert_eq!(
            roles,
            vec![
                Role::FitnessExpert,
                Role::Nutritionist,
                Role::Doctor,
                Role::DiseaseExpert
            ]
        );
        assert_eq!(tasks[3].description, "Provide recommendations for managing Yes");
    }

    #[test]
    fn base_tasks_mention_age_and_gender_only() {
        let tasks = tasks_for(45.0, "Male", "no");

        assert_eq!(
            tasks[0].description,
            "Analyze the fitness requirements for a 45-year-old Male. \
             Provide recommendations for exercise routines and fitness strategies."
        );
        assert!(tasks.iter().all(|t| !t.description.contains("with ")));
        assert!(tasks[1].description.ends_with("Do not prescribe a medicine"));
    }

    #[test]
    fn expected_outputs() {
        let tasks = tasks_for(30.0, "Other", "yes");

        assert_eq!(tasks[0].expected_output, "Exercise routines and fitness strategies");
        assert_eq!(tasks[1].expected_output, "Dietary recommendations");
        assert_eq!(tasks[2].expected_output, "Healthy lifestyle recommendations");
        assert_eq!(
            tasks[3].expected_output,
            "Recommendations for managing the specific disease"
        );
    }
}
