use crate::chatroom::participant::ChatAgent;
use crate::llm::models::ChatMessage;
use serde::{Deserialize, Serialize};

/// A message tagged with the participant who spoke it.
///
/// The speaker is a snapshot taken when the message was recorded; later changes to the
/// registry do not rewrite history.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChatroomMessage {
    pub message: ChatMessage,
    pub speaker: ChatAgent,
}

impl ChatroomMessage {
    pub fn new(message: ChatMessage, speaker: ChatAgent) -> Self {
        Self { message, speaker }
    }

    pub fn speaker_name(&self) -> &str {
        &self.speaker.name
    }

    pub fn content(&self) -> &str {
        &self.message.content
    }
}

/// Shared, append-only chat history in chronological order.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Conversation {
    messages: Vec<ChatroomMessage>,
}

impl Conversation {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn append(&mut self, message: ChatroomMessage) {
        self.messages.push(message);
    }

    pub fn history(&self) -> &[ChatroomMessage] {
        &self.messages
    }

    pub fn last(&self) -> Option<&ChatroomMessage> {
        self.messages.last()
    }

    /// Drop speaker tags, optionally folding the speaker's name into the content.
    ///
    /// The API has no field for who said what, so `"<name>: "` is prefixed when
    /// `include_speaker_names` is set.
    pub fn flatten_messages(&self, include_speaker_names: bool) -> Vec<ChatMessage> {
        self.messages
            .iter()
            .map(|m| {
                if include_speaker_names {
                    ChatMessage::new(
                        m.message.role,
                        format!("{}: {}", m.speaker.name, m.message.content),
                    )
                } else {
                    m.message.clone()
                }
            })
            .collect()
    }

    pub fn len(&self) -> usize {
        self.messages.len()
    }

    pub fn is_empty(&self) -> bool {
        self.messages.is_empty()
    }

    pub fn clear(&mut self) {
        self.messages.clear();
    }
}
