//! Single-use agent descriptions.
//!
//! An [`AgentDescription`] is rendered into one system prompt by
//! [`render_system_prompt`]. Only the fields that are set and non-empty produce a clause,
//! in this order: role, task, name, format, restrictions.
//!
//! ```
//! use colloquy::agent::{render_system_prompt, AgentDescription};
//!
//! let agent = AgentDescription::new()
//!     .role("travel agent")
//!     .task("Suggest a weekend trip")
//!     .format("a bulleted list");
//!
//! assert_eq!(
//!     render_system_prompt(&agent),
//!     "As a travel agent, Suggest a weekend trip. Format your response as a bulleted list."
//! );
//! ```

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AgentDescription {
    pub name: Option<String>,
    pub role: Option<String>,
    pub task: Option<String>,
    pub format: Option<String>,
    pub restrictions: Option<String>,
}

impl AgentDescription {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    pub fn role(mut self, role: impl Into<String>) -> Self {
        self.role = Some(role.into());
        self
    }

    pub fn task(mut self, task: impl Into<String>) -> Self {
        self.task = Some(task.into());
        self
    }

    pub fn format(mut self, format: impl Into<String>) -> Self {
        self.format = Some(format.into());
        self
    }

    pub fn restrictions(mut self, restrictions: impl Into<String>) -> Self {
        self.restrictions = Some(restrictions.into());
        self
    }

    pub fn system_prompt(&self) -> String {
        render_system_prompt(self)
    }
}

fn present(field: &Option<String>) -> Option<&str> {
    field.as_deref().map(str::trim).filter(|s| !s.is_empty())
}

/// Render an agent description as a system prompt.
pub fn render_system_prompt(agent: &AgentDescription) -> String {
    let clauses = [
        present(&agent.role).map(|role| format!("As a {role},")),
        present(&agent.task).map(|task| format!("{task}.")),
        present(&agent.name).map(|name| format!("Your name is {name}.")),
        present(&agent.format).map(|format| format!("Format your response as {format}.")),
        present(&agent.restrictions).map(str::to_string),
    ];

    clauses.into_iter().flatten().collect::<Vec<_>>().join(" ")
}
