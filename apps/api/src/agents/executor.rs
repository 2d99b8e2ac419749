use tracing::debug;

use super::errors::{AgentError, AgentResult};
use super::prompts::{library, substitute, variables};
use super::types::{AgentSpec, Role, TaskOutput, TaskSpec, ToolRef};
use crate::domain::ports::{LanguageModel, Prompt, SearchTool};

/// What the model asked for in one response
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Directive {
    Search(String),
    Delegate { coworker: String, request: String },
    Final(String),
    Malformed(String),
}

const FINAL_ANSWER: &str = "Final Answer:";
const LABELS: [&str; 4] = ["Action:", "Coworker:", "Input:", FINAL_ANSWER];

/// Interprets a model response
///
/// Labels only count at the start of a line. Whichever of `Action:` and
/// `Final Answer:` comes first decides the directive, and a response
/// with neither is taken as the final answer verbatim. An `Input:`
/// block runs until the next label line.
pub fn parse_directive(response: &str) -> Directive {
    let text = response.trim();
    let lines: Vec<&str> = text.lines().collect();

    let first_label = lines.iter().enumerate().find_map(|(idx, line)| {
        let line = line.trim_start();
        if line.starts_with(FINAL_ANSWER) {
            Some((idx, true))
        } else if line.starts_with("Action:") {
            Some((idx, false))
        } else {
            None
        }
    });

    match first_label {
        None => Directive::Final(text.to_string()),
        Some((idx, true)) => {
            let answer = lines[idx..].join("\n");
            let answer = answer.trim_start();
            Directive::Final(answer[FINAL_ANSWER.len()..].trim().to_string())
        }
        Some((idx, false)) => parse_action(&lines[idx..]),
    }
}

fn parse_action(lines: &[&str]) -> Directive {
    let action = field(lines, "Action:").unwrap_or_default();
    let input = block(lines, "Input:");

    match (action.to_lowercase().as_str(), input) {
        ("search", Some(query)) => Directive::Search(query),
        ("delegate", Some(request)) => match field(lines, "Coworker:") {
            Some(coworker) => Directive::Delegate { coworker, request },
            None => Directive::Malformed("Delegation needs a 'Coworker:' line.".to_string()),
        },
        ("search" | "delegate", None) => {
            Directive::Malformed(format!("Action '{}' needs an 'Input:' section.", action))
        }
        (other, _) => Directive::Malformed(format!(
            "'{}' is not a valid action. Use 'search', 'delegate', or give your Final Answer.",
            other
        )),
    }
}

fn is_label(line: &str) -> bool {
    let line = line.trim_start();
    LABELS.iter().any(|label| line.starts_with(label))
}

/// Value of the first line starting with `label`
fn field(lines: &[&str], label: &str) -> Option<String> {
    lines
        .iter()
        .map(|line| line.trim())
        .find_map(|line| line.strip_prefix(label))
        .map(|value| value.trim().to_string())
        .filter(|value| !value.is_empty())
}

/// Like `field`, but continues over following lines up to the next label
fn block(lines: &[&str], label: &str) -> Option<String> {
    let start = lines
        .iter()
        .position(|line| line.trim_start().starts_with(label))?;
    let first = lines[start].trim_start()[label.len()..].to_string();

    let value = std::iter::once(first)
        .chain(
            lines[start + 1..]
                .iter()
                .take_while(|line| !is_label(line))
                .map(|line| line.to_string()),
        )
        .collect::<Vec<_>>()
        .join("\n");

    Some(value.trim().to_string()).filter(|value| !value.is_empty())
}

/// Runs single tasks on behalf of a crew
///
/// Each task is a short loop: the agent answers, asks for a search, or
/// delegates to a coworker, until it gives a final answer or runs out of
/// action rounds.
pub struct TaskExecutor<'a> {
    llm: &'a dyn LanguageModel,
    search: &'a dyn SearchTool,
    crew: &'a [AgentSpec],
    max_iterations: usize,
    verbose: bool,
}

impl<'a> TaskExecutor<'a> {
    pub fn new(
        llm: &'a dyn LanguageModel,
        search: &'a dyn SearchTool,
        crew: &'a [AgentSpec],
        max_iterations: usize,
        verbose: bool,
    ) -> Self {
        Self {
            llm,
            search,
            crew,
            max_iterations,
            verbose,
        }
    }

    /// Execute one task with the outputs of earlier tasks as context
    pub async fn execute(
        &self,
        agent: &AgentSpec,
        task: &TaskSpec,
        context: &[TaskOutput],
    ) -> AgentResult<TaskOutput> {
        let template = library::agent_task();
        let system = template.render_system(&variables([
            ("role", agent.role.to_string()),
            ("backstory", agent.backstory.clone()),
            ("goal", agent.goal.clone()),
            ("capabilities", self.capabilities(agent)),
        ]));
        let context = render_context(context);
        let mut scratchpad = String::new();

        for round in 0..=self.max_iterations {
            let forced = round == self.max_iterations;
            if forced {
                scratchpad.push_str("\n\n");
                scratchpad.push_str(library::FORCE_FINAL_ANSWER);
            }

            let user = template.render(&variables([
                ("description", task.description.as_str()),
                ("expected_output", task.expected_output.as_str()),
                ("context", context.as_str()),
                ("scratchpad", scratchpad.as_str()),
            ]));
            let response = self.generate(agent.role, Prompt::new(system.clone(), user)).await?;

            let observation = match parse_directive(&response) {
                Directive::Final(answer) => return Ok(output(agent, task, answer)),
                _ if forced => return Ok(output(agent, task, response.trim().to_string())),
                Directive::Search(query) => self.run_search(agent, &query).await?,
                Directive::Delegate { coworker, request } => {
                    self.delegate(agent, &coworker, &request).await?
                }
                Directive::Malformed(reason) => format!("Error: {}", reason),
            };

            scratchpad.push_str("\n\n");
            scratchpad.push_str(response.trim());
            scratchpad.push_str("\nObservation: ");
            scratchpad.push_str(&observation);
        }

        Err(AgentError::TaskExecutionFailed(format!(
            "{} produced no final answer",
            agent.role
        )))
    }

    async fn generate(&self, role: Role, prompt: Prompt) -> AgentResult<String> {
        if self.verbose {
            debug!(%role, system = %prompt.system, user = %prompt.user, "Prompting model");
        }

        let response = self
            .llm
            .generate(&prompt)
            .await
            .map_err(AgentError::LlmError)?;

        if self.verbose {
            debug!(%role, %response, "Model responded");
        } else {
            debug!(%role, chars = response.len(), "Model responded");
        }

        Ok(response)
    }

    async fn run_search(&self, agent: &AgentSpec, query: &str) -> AgentResult<String> {
        if !agent.has_tool(ToolRef::WebSearch) {
            return Ok("Error: you do not have access to a search tool. \
                       Answer from your own knowledge."
                .to_string());
        }

        debug!(role = %agent.role, %query, tool = self.search.name(), "Running search");
        self.search
            .search(query)
            .await
            .map_err(AgentError::SearchError)
    }

    async fn delegate(
        &self,
        agent: &AgentSpec,
        coworker: &str,
        request: &str,
    ) -> AgentResult<String> {
        if !agent.allow_delegation {
            return Ok("Error: you are not allowed to delegate this task.".to_string());
        }

        let Some(target) = Role::from_name(coworker)
            .filter(|role| *role != agent.role)
            .and_then(|role| self.crew.iter().find(|a| a.role == role))
        else {
            return Ok(format!(
                "Error: there is no coworker named '{}'. Available coworkers: {}.",
                coworker,
                self.coworker_names(agent)
            ));
        };

        debug!(from = %agent.role, to = %target.role, "Delegating to coworker");

        let template = library::coworker_consult();
        let vars = variables([
            ("role", target.role.to_string()),
            ("backstory", target.backstory.clone()),
            ("goal", target.goal.clone()),
            ("requester", agent.role.to_string()),
            ("request", request.to_string()),
        ]);
        let prompt = Prompt::new(template.render_system(&vars), template.render(&vars));

        self.generate(target.role, prompt).await
    }

    fn coworker_names(&self, agent: &AgentSpec) -> String {
        self.crew
            .iter()
            .filter(|a| a.role != agent.role)
            .map(|a| a.role.to_string())
            .collect::<Vec<_>>()
            .join(", ")
    }

    fn capabilities(&self, agent: &AgentSpec) -> String {
        let mut sections = Vec::new();

        if agent.has_tool(ToolRef::WebSearch) {
            sections.push(substitute(
                library::SEARCH_ACTION_FORMAT,
                &variables([("tool_name", self.search.name())]),
            ));
        }

        let coworkers = self.coworker_names(agent);
        if agent.allow_delegation && !coworkers.is_empty() {
            sections.push(substitute(
                library::DELEGATE_ACTION_FORMAT,
                &variables([("coworkers", coworkers)]),
            ));
        }

        sections.push(library::FINAL_ANSWER_FORMAT.to_string());
        sections.join("\n\n")
    }
}

fn render_context(context: &[TaskOutput]) -> String {
    if context.is_empty() {
        return String::new();
    }

    let entries: Vec<String> = context
        .iter()
        .map(|done| format!("{}:\n{}", done.role, done.output))
        .collect();

    format!(
        "\nThis is the context you're working with:\n{}\n",
        entries.join("\n\n")
    )
}

fn output(agent: &AgentSpec, task: &TaskSpec, answer: String) -> TaskOutput {
    TaskOutput {
        role: agent.role,
        description: task.description.clone(),
        output: answer,
    }
}
