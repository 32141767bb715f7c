use crate::error::Result;
use crate::llm::models::{clamp_temperature, ChatMessage, ChatResponseBody, DEFAULT_TEMPERATURE};
use async_trait::async_trait;

/// Sampling parameters for a single completion request
#[derive(Debug, Clone, PartialEq)]
pub struct CompletionConfig {
    pub temperature: f32,
    pub max_tokens: u32,
}

impl CompletionConfig {
    pub fn new(temperature: f32, max_tokens: u32) -> Self {
        Self {
            temperature: clamp_temperature(temperature),
            max_tokens,
        }
    }
}

impl Default for CompletionConfig {
    fn default() -> Self {
        Self {
            temperature: DEFAULT_TEMPERATURE,
            max_tokens: 1024,
        }
    }
}

/// The seam between this library and the remote chat service.
///
/// Implementations send one completion request and return the typed response body.
/// They must not retry; any failure is returned as a transport error.
#[async_trait]
pub trait ChatGateway: Send + Sync {
    /// Complete a conversation
    async fn complete(
        &self,
        model: &str,
        messages: &[ChatMessage],
        config: &CompletionConfig,
    ) -> Result<ChatResponseBody>;
}
