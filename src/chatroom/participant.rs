use crate::llm::models::{normalize_temperature, ChatMessage};
use serde::{Deserialize, Serialize};

/// A named participant in a chatroom.
///
/// The name is the participant's identity and must be unique within a registry. The setup
/// prompt is sent as the first system message of every turn the participant takes; the
/// intro prompt, when present, is sent at most once.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChatAgent {
    pub name: String,
    pub setup_prompt: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub intro_prompt: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub temperature: Option<f32>,
    #[serde(default)]
    pub was_introduced: bool,
}

impl ChatAgent {
    pub fn new(name: impl Into<String>, setup_prompt: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            setup_prompt: setup_prompt.into(),
            intro_prompt: None,
            temperature: None,
            was_introduced: false,
        }
    }

    /// A speaker that only labels messages, such as "System" or "Host"
    pub fn placeholder(name: impl Into<String>) -> Self {
        Self::new(name, "")
    }

    pub fn with_intro(mut self, intro_prompt: impl Into<String>) -> Self {
        self.intro_prompt = Some(intro_prompt.into());
        self
    }

    /// Set the participant's temperature, clamped into `[0, 2]`
    pub fn with_temperature(mut self, temperature: f32) -> Self {
        self.temperature = normalize_temperature(Some(temperature));
        self
    }

    /// True iff an intro prompt is set and non-empty
    pub fn has_intro(&self) -> bool {
        self.intro_prompt.as_deref().is_some_and(|p| !p.is_empty())
    }

    /// The setup prompt as a system message
    pub fn setup_message(&self) -> ChatMessage {
        ChatMessage::system(&self.setup_prompt)
    }

    /// The intro prompt as a system message, if there is one
    pub fn intro_message(&self) -> Option<ChatMessage> {
        if self.has_intro() {
            self.intro_prompt.as_deref().map(ChatMessage::system)
        } else {
            None
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::llm::models::Role;

    #[test]
    fn test_new_participant() {
        let agent = ChatAgent::new("Alice", "You are Alice, a pirate.");

        assert_eq!(agent.name, "Alice");
        assert!(!agent.was_introduced);
        assert!(!agent.has_intro());
        assert!(agent.temperature.is_none());
    }

    #[test]
    fn test_temperature_is_clamped() {
        assert_eq!(ChatAgent::new("a", "").with_temperature(5.0).temperature, Some(2.0));
        assert_eq!(ChatAgent::new("a", "").with_temperature(-1.0).temperature, Some(0.0));
        assert_eq!(ChatAgent::new("a", "").with_temperature(1.3).temperature, Some(1.3));
        assert_eq!(ChatAgent::new("a", "").with_temperature(f32::NAN).temperature, None);
    }

    #[test]
    fn test_empty_intro_is_not_an_intro() {
        let agent = ChatAgent::new("Bob", "setup").with_intro("");
        assert!(!agent.has_intro());
        assert!(agent.intro_message().is_none());
    }

    #[test]
    fn test_messages_are_system_role() {
        let agent = ChatAgent::new("Bob", "You are Bob.").with_intro("Say hello.");

        assert_eq!(agent.setup_message(), ChatMessage::new(Role::System, "You are Bob."));
        assert_eq!(agent.intro_message(), Some(ChatMessage::system("Say hello.")));
    }

    #[test]
    fn test_deserialize_defaults() {
        let agent: ChatAgent =
            serde_json::from_str(r#"{"name":"Eve","setup_prompt":"You are Eve."}"#).unwrap();
        assert!(!agent.was_introduced);
        assert!(agent.intro_prompt.is_none());
    }
}
