use crate::agent::{render_system_prompt, AgentDescription};
use crate::error::{Result, TransportError};
use crate::llm::gateway::{ChatGateway, CompletionConfig};
use crate::llm::models::{normalize_temperature, ChatMessage, ChatResponseBody};
use std::sync::Arc;
use tracing::{debug, info};

pub const DEFAULT_MODEL: &str = "gpt-3.5-turbo";
pub use crate::llm::models::DEFAULT_TEMPERATURE;
pub const DEFAULT_MAX_TOKENS: u32 = 1024;

/// Defaults applied to every request that does not override them
#[derive(Debug, Clone, PartialEq)]
pub struct ClientConfig {
    pub default_model: String,
    pub default_temperature: f32,
    pub default_max_tokens: u32,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            default_model: DEFAULT_MODEL.to_string(),
            default_temperature: DEFAULT_TEMPERATURE,
            default_max_tokens: DEFAULT_MAX_TOKENS,
        }
    }
}

impl ClientConfig {
    pub fn with_model(mut self, model: impl Into<String>) -> Self {
        self.default_model = model.into();
        self
    }

    /// Set the default temperature (clamped into `[0, 2]`). NaN leaves the current default.
    pub fn with_temperature(mut self, temperature: f32) -> Self {
        if let Some(temperature) = normalize_temperature(Some(temperature)) {
            self.default_temperature = temperature;
        }
        self
    }

    pub fn with_max_tokens(mut self, max_tokens: u32) -> Self {
        self.default_max_tokens = max_tokens;
        self
    }
}

/// Per-call overrides of [`ClientConfig`]
#[derive(Debug, Clone, Default, PartialEq)]
pub struct PromptOptions {
    pub model: Option<String>,
    pub temperature: Option<f32>,
    pub max_tokens: Option<u32>,
}

impl PromptOptions {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn model(mut self, model: impl Into<String>) -> Self {
        self.model = Some(model.into());
        self
    }

    pub fn temperature(mut self, temperature: f32) -> Self {
        self.temperature = Some(temperature);
        self
    }

    pub fn max_tokens(mut self, max_tokens: u32) -> Self {
        self.max_tokens = Some(max_tokens);
        self
    }
}

/// Stateless two-party chat interface.
///
/// `ChatClient` pairs a [`ChatGateway`] with the defaults in [`ClientConfig`]. None of its
/// methods keep history: every call sends exactly the messages it is given.
#[derive(Clone)]
pub struct ChatClient {
    gateway: Arc<dyn ChatGateway>,
    config: ClientConfig,
}

impl ChatClient {
    pub fn new(gateway: Arc<dyn ChatGateway>, config: ClientConfig) -> Self {
        Self { gateway, config }
    }

    /// Create a client with the default model, temperature and token limit
    pub fn with_defaults(gateway: Arc<dyn ChatGateway>) -> Self {
        Self::new(gateway, ClientConfig::default())
    }

    pub fn config(&self) -> &ClientConfig {
        &self.config
    }

    /// Resolve per-call options against the client defaults
    fn resolve(&self, options: &PromptOptions) -> (String, CompletionConfig) {
        let model = options
            .model
            .clone()
            .unwrap_or_else(|| self.config.default_model.clone());
        let temperature =
            normalize_temperature(options.temperature).unwrap_or(self.config.default_temperature);
        let max_tokens = options.max_tokens.unwrap_or(self.config.default_max_tokens);

        (model, CompletionConfig::new(temperature, max_tokens))
    }

    /// Send a conversation and return the whole response body
    pub async fn continue_conversation_full(
        &self,
        messages: &[ChatMessage],
        options: &PromptOptions,
    ) -> Result<ChatResponseBody> {
        let (model, config) = self.resolve(options);
        debug!(
            model = model.as_str(),
            temperature = config.temperature,
            max_tokens = config.max_tokens,
            "Continuing conversation of {} message(s)",
            messages.len()
        );

        self.gateway.complete(&model, messages, &config).await
    }

    /// Send a conversation and return the first reply's text
    pub async fn continue_conversation(
        &self,
        messages: &[ChatMessage],
        options: &PromptOptions,
    ) -> Result<String> {
        let response = self.continue_conversation_full(messages, options).await?;
        first_content(response)
    }

    /// One user message in, first reply's text out
    pub async fn single_prompt(&self, text: &str, options: &PromptOptions) -> Result<String> {
        info!("Sending single prompt");
        self.continue_conversation(&[ChatMessage::user(text)], options).await
    }

    pub async fn single_prompt_full(
        &self,
        text: &str,
        options: &PromptOptions,
    ) -> Result<ChatResponseBody> {
        info!("Sending single prompt");
        self.continue_conversation_full(&[ChatMessage::user(text)], options).await
    }

    /// Append `next` as a user message to a caller-owned history and send it.
    ///
    /// The caller's slice is not modified.
    pub async fn reply_to_conversation(&self, history: &[ChatMessage], next: &str) -> Result<String> {
        let conversation = with_user_message(history, next);
        self.continue_conversation(&conversation, &PromptOptions::default()).await
    }

    pub async fn reply_to_conversation_full(
        &self,
        history: &[ChatMessage],
        next: &str,
    ) -> Result<ChatResponseBody> {
        let conversation = with_user_message(history, next);
        self.continue_conversation_full(&conversation, &PromptOptions::default()).await
    }

    /// Prompt a single-use agent, optionally over an existing conversation
    pub async fn prompt_agent(
        &self,
        agent: &AgentDescription,
        conversation: Option<&[ChatMessage]>,
        options: &PromptOptions,
    ) -> Result<String> {
        let mut messages = vec![ChatMessage::system(render_system_prompt(agent))];
        if let Some(conversation) = conversation {
            messages.extend_from_slice(conversation);
        }

        self.continue_conversation(&messages, options).await
    }
}

fn with_user_message(history: &[ChatMessage], next: &str) -> Vec<ChatMessage> {
    let mut conversation = history.to_vec();
    conversation.push(ChatMessage::user(next));
    conversation
}

fn first_content(response: ChatResponseBody) -> Result<String> {
    response
        .choices
        .into_iter()
        .next()
        .map(|choice| choice.message.content)
        .ok_or_else(|| TransportError::EmptyResponse.into())
}
