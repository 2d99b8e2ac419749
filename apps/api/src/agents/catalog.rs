use serde::{Deserialize, Serialize};

use super::prompts::{substitute, variables};
use super::types::{AgentSpec, Role, ToolRef};
use crate::domain::profile::UserProfile;

/// Goal and backstory templates for one role
struct Persona {
    role: Role,
    goal: &'static str,
    backstory: &'static str,
    tools: &'static [ToolRef],
}

const FITNESS_EXPERT: Persona = Persona {
    role: Role::FitnessExpert,
    goal: "Analyze the fitness requirements for a {{age}}-year-old {{gender}} with {{disease}} \
           and suggest exercise routines and fitness strategies",
    backstory: "Expert at understanding fitness needs, age-specific requirements, \
                and gender-specific considerations. Skilled in developing \
                customized exercise routines and fitness strategies.",
    tools: &[ToolRef::WebSearch],
};

const NUTRITIONIST: Persona = Persona {
    role: Role::Nutritionist,
    goal: "Assess nutritional requirements for a {{age}}-year-old {{gender}} with {{disease}} \
           and provide dietary recommendations",
    backstory: "Knowledgeable in nutrition for different age groups and genders, \
                especially for individuals of {{age}} years old. Provides tailored \
                dietary advice based on specific nutritional needs.",
    tools: &[],
};

const DOCTOR: Persona = Persona {
    role: Role::Doctor,
    goal: "Evaluate the overall health considerations for a {{age}}-year-old {{gender}} with {{disease}} \
           and provide recommendations for a healthy lifestyle. \
           Pass it on to the Disease Expert if you are not an expert of {{disease}}",
    backstory: "Medical professional experienced in assessing overall health and \
                well-being. Offers recommendations for a healthy lifestyle \
                considering age, gender, and disease factors.",
    tools: &[],
};

const DISEASE_EXPERT: Persona = Persona {
    role: Role::DiseaseExpert,
    goal: "Provide recommendations for managing {{disease}}",
    backstory: "Specialized in dealing with individuals having {{disease}}. \
                Offers tailored advice for managing the specific health condition. \
                Do not prescribe medicines but only give advice.",
    tools: &[],
};

/// Agents built for one request
///
/// The disease expert exists iff the profile declares a disease.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AgentRoster {
    pub fitness: AgentSpec,
    pub nutrition: AgentSpec,
    pub doctor: AgentSpec,
    pub disease_expert: Option<AgentSpec>,
}

impl AgentRoster {
    /// All agents in crew order
    pub fn agents(&self) -> Vec<AgentSpec> {
        let mut agents = vec![
            self.fitness.clone(),
            self.nutrition.clone(),
            self.doctor.clone(),
        ];
        agents.extend(self.disease_expert.clone());
        agents
    }
}

/// Builds the crew's agents from the user's profile
///
/// Pure function of the profile. Age and gender are interpolated as-is,
/// without any validation.
pub fn build_agents(profile: &UserProfile) -> AgentRoster {
    AgentRoster {
        fitness: instantiate(&FITNESS_EXPERT, profile),
        nutrition: instantiate(&NUTRITIONIST, profile),
        doctor: instantiate(&DOCTOR, profile),
        disease_expert: profile
            .has_disease()
            .then(|| instantiate(&DISEASE_EXPERT, profile)),
    }
}

fn instantiate(persona: &Persona, profile: &UserProfile) -> AgentSpec {
    let vars = variables([
        ("age", profile.age().to_string()),
        ("gender", profile.gender().to_string()),
        ("disease", profile.disease().raw().to_string()),
    ]);

    AgentSpec {
        role: persona.role,
        goal: substitute(persona.goal, &vars),
        backstory: substitute(persona.backstory, &vars),
        allow_delegation: true,
        tools: persona.tools.to_vec(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn base_roster_without_disease() {
        let roster = build_agents(&UserProfile::from_inputs(45.0, "Male", "no"));

        assert!(roster.disease_expert.is_none());
        assert_eq!(roster.agents().len(), 3);
        assert_eq!(roster.fitness.role, Role::FitnessExpert);
        assert_eq!(roster.nutrition.role, Role::Nutritionist);
        assert_eq!(roster.doctor.role, Role::Doctor);
    }

    #[test]
    fn disease_expert_added_when_declared() {
        let roster = build_agents(&UserProfile::from_inputs(30.0, "Female", "Yes"));

        let expert = roster.disease_expert.as_ref().expect("disease expert");
        assert_eq!(expert.role, Role::DiseaseExpert);
        assert_eq!(expert.goal, "Provide recommendations for managing Yes");
        assert_eq!(roster.agents().len(), 4);
    }

    #[test]
    fn goals_interpolate_profile() {
        let roster = build_agents(&UserProfile::from_inputs(45.0, "Male", "no"));

        assert!(roster
            .fitness
            .goal
            .starts_with("Analyze the fitness requirements for a 45-year-old Male with no"));
        assert!(roster.nutrition.backstory.contains("individuals of 45 years old"));
        assert!(roster.doctor.goal.contains("not an expert of no"));
    }

    #[test]
    fn only_fitness_expert_searches() {
        let roster = build_agents(&UserProfile::from_inputs(30.0, "Other", "yes"));

        assert!(roster.fitness.has_tool(ToolRef::WebSearch));
        for agent in roster.agents().iter().skip(1) {
            assert!(agent.tools.is_empty(), "{} should have no tools", agent.role);
        }
    }

    #[test]
    fn every_agent_may_delegate() {
        let roster = build_agents(&UserProfile::from_inputs(30.0, "Other", "yes"));
        assert!(roster.agents().iter().all(|a| a.allow_delegation));
    }

    #[test]
    fn unvalidated_inputs_pass_through() {
        let roster = build_agents(&UserProfile::from_inputs(-2.0, "Robot", ""));
        assert!(roster.fitness.goal.contains("a -2-year-old Robot with "));
    }
}
