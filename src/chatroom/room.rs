//! The chatroom orchestrator.
//!
//! A [`Chatroom`] owns a [`ParticipantRegistry`] and a shared [`Conversation`]. Before a
//! participant speaks, it assembles that participant's context: their setup prompt, the
//! whole shared history, and (on an introduce turn) their one-time intro prompt. The reply
//! is appended to the shared history only when the remote call succeeds.

use crate::chatroom::conversation::{ChatroomMessage, Conversation};
use crate::chatroom::participant::ChatAgent;
use crate::chatroom::registry::ParticipantRegistry;
use crate::error::{ColloquyError, Result, TransportError};
use crate::llm::client::{ChatClient, PromptOptions};
use crate::llm::models::{ChatMessage, Role};
use tracing::{debug, info, warn};

pub const SYSTEM_SPEAKER: &str = "System";
pub const HOST_SPEAKER: &str = "Host";

/// When an introduce turn consumes a participant's intro prompt
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum IntroPolicy {
    /// Mark the participant introduced before the request is sent, even if it then fails.
    #[default]
    OnAttempt,
    /// Mark the participant introduced only after a reply has been recorded.
    OnSuccess,
}

/// Multi-participant conversation over a shared history.
///
/// # Examples
///
/// ```ignore
/// use colloquy::prelude::*;
/// use std::sync::Arc;
///
/// let gateway = Arc::new(OpenAIGateway::from_env()?);
/// let mut room = Chatroom::new(ChatClient::with_defaults(gateway));
///
/// room.add_participant("Alice", "You are Alice, a pirate.", None, None)?;
/// room.add_host_message("Hello");
///
/// let reply = room.prompt_participant("Alice").await?;
/// println!("{}: {}", reply.speaker_name(), reply.content());
/// ```
pub struct Chatroom {
    client: ChatClient,
    participants: ParticipantRegistry,
    conversation: Conversation,
    intro_policy: IntroPolicy,
}

impl Chatroom {
    pub fn new(client: ChatClient) -> Self {
        Self {
            client,
            participants: ParticipantRegistry::new(),
            conversation: Conversation::new(),
            intro_policy: IntroPolicy::default(),
        }
    }

    pub fn with_intro_policy(mut self, policy: IntroPolicy) -> Self {
        self.intro_policy = policy;
        self
    }

    pub fn client(&self) -> &ChatClient {
        &self.client
    }

    pub fn intro_policy(&self) -> IntroPolicy {
        self.intro_policy
    }

    // Chat history

    /// Add a system message spoken by the "System" placeholder
    pub fn add_system_message(&mut self, text: impl Into<String>) {
        self.add_message(text, Role::System, SYSTEM_SPEAKER);
    }

    /// Add a user message spoken by the "Host" placeholder
    pub fn add_host_message(&mut self, text: impl Into<String>) {
        self.add_message(text, Role::User, HOST_SPEAKER);
    }

    /// Add a message under a speaker name that is not registered as a participant
    pub fn add_message(&mut self, text: impl Into<String>, role: Role, speaker: &str) {
        self.conversation.append(ChatroomMessage::new(
            ChatMessage::new(role, text),
            ChatAgent::placeholder(speaker),
        ));
    }

    /// Register a new participant and record a message from them.
    ///
    /// Fails with [`ColloquyError::DuplicateParticipant`] if the name is taken; nothing is
    /// appended in that case.
    pub fn add_participant_with_message(
        &mut self,
        participant: ChatAgent,
        text: impl Into<String>,
        role: Role,
    ) -> Result<()> {
        let speaker = self.participants.add_existing(participant)?.clone();
        self.conversation.append(ChatroomMessage::new(ChatMessage::new(role, text), speaker));
        Ok(())
    }

    /// Record a message attributed to a registered participant (user role by default)
    pub fn add_message_for(
        &mut self,
        name: &str,
        text: impl Into<String>,
        role: Option<Role>,
    ) -> Result<()> {
        let speaker = self.participant(name)?.clone();
        let message = ChatMessage::new(role.unwrap_or_default(), text);
        self.conversation.append(ChatroomMessage::new(message, speaker));
        Ok(())
    }

    /// Record a system message attributed to a registered participant
    pub fn add_system_message_for(&mut self, name: &str, text: impl Into<String>) -> Result<()> {
        self.add_message_for(name, text, Some(Role::System))
    }

    pub fn conversation(&self) -> &[ChatroomMessage] {
        self.conversation.history()
    }

    /// The history as plain messages, optionally prefixed with speaker names
    pub fn conversation_messages(&self, include_names: bool) -> Vec<ChatMessage> {
        self.conversation.flatten_messages(include_names)
    }

    pub fn clear_chat(&mut self) {
        self.conversation.clear();
    }

    // Participants

    pub fn add_participant(
        &mut self,
        name: impl Into<String>,
        setup_prompt: impl Into<String>,
        intro_prompt: Option<String>,
        temperature: Option<f32>,
    ) -> Result<()> {
        let participant = self.participants.add(name, setup_prompt, intro_prompt, temperature)?;
        info!(participant = participant.name.as_str(), "Participant joined the chatroom");
        Ok(())
    }

    pub fn add_existing_participant(&mut self, participant: ChatAgent) -> Result<()> {
        let participant = self.participants.add_existing(participant)?;
        info!(participant = participant.name.as_str(), "Participant joined the chatroom");
        Ok(())
    }

    /// Remove a participant. Messages they already spoke stay in the history.
    pub fn remove_participant(&mut self, name: &str) -> Result<ChatAgent> {
        let removed = self.participants.remove(name)?;
        info!(participant = name, "Participant left the chatroom");
        Ok(removed)
    }

    pub fn is_participant_in_chat(&self, name: &str) -> bool {
        self.participants.contains(name)
    }

    pub fn participant(&self, name: &str) -> Result<&ChatAgent> {
        self.participants
            .get(name)
            .ok_or_else(|| ColloquyError::ParticipantNotFound(name.to_string()))
    }

    pub fn participants(&self) -> &[ChatAgent] {
        self.participants.list()
    }

    pub fn clear_participants(&mut self) {
        self.participants.clear();
    }

    /// A participant's setup prompt as a system message
    pub fn setup_message(&self, name: &str) -> Result<ChatMessage> {
        Ok(self.participant(name)?.setup_message())
    }

    /// A participant's intro prompt as a system message.
    ///
    /// Fails with [`ColloquyError::MissingPrompt`] if they have no intro prompt.
    pub fn intro_message(&self, name: &str) -> Result<ChatMessage> {
        self.participant(name)?
            .intro_message()
            .ok_or_else(|| ColloquyError::MissingPrompt(name.to_string()))
    }

    // Turns

    /// Ask one participant to reply to the shared history.
    pub async fn prompt_participant(&mut self, name: &str) -> Result<ChatroomMessage> {
        self.take_turn(name, false).await
    }

    /// Ask one participant to reply, including their intro prompt if it is still unused.
    pub async fn introduce_participant(&mut self, name: &str) -> Result<ChatroomMessage> {
        self.take_turn(name, true).await
    }

    /// Prompt every participant in registry order.
    ///
    /// Turns run one after another, so each participant sees the replies appended by the
    /// ones before it. The first failure ends the round; replies already recorded stay.
    pub async fn prompt_all_participants(&mut self) -> Result<Vec<ChatroomMessage>> {
        let names = self.participants.names();
        info!("Prompting {} participant(s)", names.len());

        let mut replies = Vec::with_capacity(names.len());
        for name in names {
            replies.push(self.take_turn(&name, false).await?);
        }
        Ok(replies)
    }

    /// Build the messages sent for one participant's turn
    fn assemble_context(&self, participant: &ChatAgent, introduce: bool) -> Vec<ChatMessage> {
        let mut context = Vec::with_capacity(self.conversation.len() + 2);
        context.push(participant.setup_message());
        context.extend(self.conversation.history().iter().map(|m| m.message.clone()));

        if introduce && !participant.was_introduced {
            if let Some(intro) = participant.intro_message() {
                context.push(intro);
            }
        }
        context
    }

    fn mark_introduced(&mut self, name: &str) {
        if let Some(participant) = self.participants.get_mut(name) {
            participant.was_introduced = true;
        }
    }

    async fn take_turn(&mut self, name: &str, introduce: bool) -> Result<ChatroomMessage> {
        let participant = self.participant(name)?.clone();
        let context = self.assemble_context(&participant, introduce);
        debug!(
            participant = name,
            introduce = introduce,
            context_len = context.len(),
            "Assembled turn context"
        );

        if introduce && self.intro_policy == IntroPolicy::OnAttempt {
            self.mark_introduced(name);
        }

        let options = PromptOptions {
            temperature: participant.temperature,
            ..Default::default()
        };
        let response = match self.client.continue_conversation_full(&context, &options).await {
            Ok(response) => response,
            Err(e) => {
                warn!(participant = name, "Turn failed: {}", e);
                return Err(e);
            }
        };

        let message = response
            .choices
            .into_iter()
            .next()
            .map(|choice| choice.message)
            .ok_or(TransportError::EmptyResponse)?;

        if introduce && self.intro_policy == IntroPolicy::OnSuccess {
            self.mark_introduced(name);
        }

        let speaker = self.participant(name)?.clone();
        let entry = ChatroomMessage::new(message, speaker);
        self.conversation.append(entry.clone());
        info!(participant = name, "Participant replied");

        Ok(entry)
    }
}
