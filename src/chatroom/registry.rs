use crate::chatroom::participant::ChatAgent;
use crate::error::{ColloquyError, Result};

/// Participants of a chatroom, kept in insertion order with unique names.
#[derive(Debug, Clone, Default)]
pub struct ParticipantRegistry {
    participants: Vec<ChatAgent>,
}

impl ParticipantRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a new participant built from its parts.
    ///
    /// The temperature is clamped into `[0, 2]`.
    pub fn add(
        &mut self,
        name: impl Into<String>,
        setup_prompt: impl Into<String>,
        intro_prompt: Option<String>,
        temperature: Option<f32>,
    ) -> Result<&ChatAgent> {
        let mut participant = ChatAgent::new(name, setup_prompt);
        participant.intro_prompt = intro_prompt;
        if let Some(temperature) = temperature {
            participant = participant.with_temperature(temperature);
        }
        self.add_existing(participant)
    }

    /// Register an already built participant as-is.
    pub fn add_existing(&mut self, participant: ChatAgent) -> Result<&ChatAgent> {
        if self.contains(&participant.name) {
            return Err(ColloquyError::DuplicateParticipant(participant.name));
        }
        self.participants.push(participant);
        Ok(&self.participants[self.participants.len() - 1])
    }

    /// Remove and return the participant with the given name.
    pub fn remove(&mut self, name: &str) -> Result<ChatAgent> {
        let index = self
            .position(name)
            .ok_or_else(|| ColloquyError::ParticipantNotFound(name.to_string()))?;
        Ok(self.participants.remove(index))
    }

    pub fn contains(&self, name: &str) -> bool {
        self.position(name).is_some()
    }

    pub fn get(&self, name: &str) -> Option<&ChatAgent> {
        self.participants.iter().find(|p| p.name == name)
    }

    pub fn get_mut(&mut self, name: &str) -> Option<&mut ChatAgent> {
        self.participants.iter_mut().find(|p| p.name == name)
    }

    /// Participants in insertion order
    pub fn list(&self) -> &[ChatAgent] {
        &self.participants
    }

    pub fn names(&self) -> Vec<String> {
        self.participants.iter().map(|p| p.name.clone()).collect()
    }

    pub fn len(&self) -> usize {
        self.participants.len()
    }

    pub fn is_empty(&self) -> bool {
        self.participants.is_empty()
    }

    pub fn clear(&mut self) {
        self.participants.clear();
    }

    pub fn has_intro(participant: &ChatAgent) -> bool {
        participant.has_intro()
    }

    fn position(&self, name: &str) -> Option<usize> {
        self.participants.iter().position(|p| p.name == name)
    }
}
