//! OpenAI Gateway for chat completions.
//!
//! This module provides the HTTP implementation of [`ChatGateway`] against an
//! OpenAI-compatible API. The assistants and files sub-resources live in
//! [`openai_resources`](super::openai_resources) and share the same client.

use crate::error::{ColloquyError, Result, TransportError};
use crate::llm::gateway::{ChatGateway, CompletionConfig};
use crate::llm::models::{ChatMessage, ChatRequestBody, ChatResponseBody};
use async_trait::async_trait;
use reqwest::{Client, RequestBuilder};
use serde::de::DeserializeOwned;
use std::time::Duration;
use tracing::{debug, info, warn};

pub const DEFAULT_BASE_URL: &str = "https://api.openai.com/v1";

/// Configuration for connecting to the OpenAI API.
#[derive(Debug, Clone)]
pub struct OpenAIConfig {
    pub api_key: String,
    pub base_url: String,
    pub timeout: Option<Duration>,
}

impl OpenAIConfig {
    pub fn new(api_key: impl Into<String>) -> Self {
        Self {
            api_key: api_key.into(),
            base_url: DEFAULT_BASE_URL.to_string(),
            timeout: None,
        }
    }

    /// Read `OPENAI_API_KEY` and `OPENAI_API_ENDPOINT` from the environment.
    pub fn from_env() -> Self {
        Self {
            api_key: std::env::var("OPENAI_API_KEY").unwrap_or_default(),
            base_url: std::env::var("OPENAI_API_ENDPOINT")
                .unwrap_or_else(|_| DEFAULT_BASE_URL.to_string()),
            timeout: None,
        }
    }

    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }
}

/// Gateway for the OpenAI chat service.
///
/// Construction fails with [`ColloquyError::ConfigError`] when no API key is supplied,
/// so a gateway that exists is always able to authenticate its requests.
#[derive(Debug, Clone)]
pub struct OpenAIGateway {
    client: Client,
    config: OpenAIConfig,
}

impl OpenAIGateway {
    /// Create a new gateway with custom configuration.
    pub fn with_config(config: OpenAIConfig) -> Result<Self> {
        if config.api_key.trim().is_empty() {
            return Err(ColloquyError::ConfigError(
                "OPENAI_API_KEY is not set - supply an API key when building the gateway"
                    .to_string(),
            ));
        }

        let mut client_builder = Client::builder();

        if let Some(timeout) = config.timeout {
            client_builder = client_builder.timeout(timeout);
        }

        let client = client_builder
            .build()
            .map_err(|e| ColloquyError::ConfigError(format!("failed to build HTTP client: {e}")))?;

        Ok(Self { client, config })
    }

    /// Create a gateway from environment variables.
    pub fn from_env() -> Result<Self> {
        Self::with_config(OpenAIConfig::from_env())
    }

    /// Create gateway with custom API key.
    pub fn with_api_key(api_key: impl Into<String>) -> Result<Self> {
        Self::with_config(OpenAIConfig::new(api_key))
    }

    /// Create gateway with custom API key and base URL.
    pub fn with_api_key_and_base_url(
        api_key: impl Into<String>,
        base_url: impl Into<String>,
    ) -> Result<Self> {
        Self::with_config(OpenAIConfig::new(api_key).with_base_url(base_url))
    }

    pub fn config(&self) -> &OpenAIConfig {
        &self.config
    }

    pub(super) fn url(&self, path: &str) -> String {
        format!("{}/{}", self.config.base_url.trim_end_matches('/'), path)
    }

    pub(super) fn get(&self, path: &str) -> RequestBuilder {
        self.authorize(self.client.get(self.url(path)))
    }

    pub(super) fn post(&self, path: &str) -> RequestBuilder {
        self.authorize(self.client.post(self.url(path)))
    }

    pub(super) fn delete(&self, path: &str) -> RequestBuilder {
        self.authorize(self.client.delete(self.url(path)))
    }

    fn authorize(&self, request: RequestBuilder) -> RequestBuilder {
        request.header("Authorization", format!("Bearer {}", self.config.api_key))
    }

    /// Send a request and decode a successful JSON body into `T`.
    pub(super) async fn send_json<T: DeserializeOwned>(&self, request: RequestBuilder) -> Result<T> {
        let response = request.send().await?;

        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            warn!(status = status.as_u16(), "OpenAI API returned an error status");
            return Err(TransportError::Api {
                status: status.as_u16(),
                body,
            }
            .into());
        }

        let text = response.text().await?;
        Ok(serde_json::from_str(&text)?)
    }
}

#[async_trait]
impl ChatGateway for OpenAIGateway {
    async fn complete(
        &self,
        model: &str,
        messages: &[ChatMessage],
        config: &CompletionConfig,
    ) -> Result<ChatResponseBody> {
        info!("Delegating to OpenAI for completion");
        debug!("Model: {}, Message count: {}", model, messages.len());

        let body = ChatRequestBody::new(messages.to_vec())
            .with_model(model)
            .with_temperature(config.temperature)
            .with_max_tokens(config.max_tokens);

        let request = self
            .post("chat/completions")
            .header("Content-Type", "application/json")
            .json(&body);

        let response: ChatResponseBody = self.send_json(request).await?;

        if let Some(usage) = &response.usage {
            debug!("Usage: {}", usage);
        }

        Ok(response)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::llm::models::Role;

    #[test]
    fn test_openai_config_new() {
        let config = OpenAIConfig::new("key");
        assert_eq!(config.api_key, "key");
        assert_eq!(config.base_url, "https://api.openai.com/v1");
        assert!(config.timeout.is_none());
    }

    #[test]
    fn test_openai_config_builders() {
        let config = OpenAIConfig::new("key")
            .with_base_url("https://custom.com")
            .with_timeout(Duration::from_secs(5));
        assert_eq!(config.base_url, "https://custom.com");
        assert_eq!(config.timeout, Some(Duration::from_secs(5)));
    }

    #[test]
    fn test_gateway_requires_api_key() {
        let result = OpenAIGateway::with_api_key("");
        assert!(matches!(result, Err(ColloquyError::ConfigError(_))));

        let result = OpenAIGateway::with_api_key("   ");
        assert!(matches!(result, Err(ColloquyError::ConfigError(_))));
    }

    #[test]
    fn test_gateway_with_api_key_and_base_url() {
        let gateway = OpenAIGateway::with_api_key_and_base_url("key", "https://custom.com/").unwrap();
        assert_eq!(gateway.config().api_key, "key");
        assert_eq!(gateway.url("chat/completions"), "https://custom.com/chat/completions");
    }

    #[tokio::test]
    async fn test_complete_success() {
        let mut server = mockito::Server::new_async().await;
        let mock = server
            .mock("POST", "/chat/completions")
            .match_header("authorization", "Bearer test-key")
            .match_body(mockito::Matcher::Json(serde_json::json!({
                "model": "gpt-3.5-turbo",
                "temperature": 0.5,
                "max_tokens": 100,
                "messages": [
                    {"role": "system", "content": "Be terse"},
                    {"role": "user", "content": "Hi"}
                ]
            })))
            .with_status(200)
            .with_body(
                r#"{"id":"chatcmpl-1","object":"chat.completion","created":1,"model":"gpt-3.5-turbo",
                    "choices":[{"index":0,"message":{"role":"assistant","content":"Hello!"},"finish_reason":"stop"}],
                    "usage":{"prompt_tokens":5,"completion_tokens":2,"total_tokens":7}}"#,
            )
            .create_async()
            .await;

        let gateway = OpenAIGateway::with_api_key_and_base_url("test-key", server.url()).unwrap();
        let messages = vec![ChatMessage::system("Be terse"), ChatMessage::user("Hi")];
        let config = CompletionConfig::new(0.5, 100);

        let response = gateway.complete("gpt-3.5-turbo", &messages, &config).await.unwrap();

        mock.assert_async().await;
        assert_eq!(response.first_content(), Some("Hello!"));
        assert_eq!(response.choices[0].message.role, Role::Assistant);
        assert_eq!(response.usage.unwrap().total_tokens, 7);
    }

    #[tokio::test]
    async fn test_complete_error_status() {
        let mut server = mockito::Server::new_async().await;
        let mock = server
            .mock("POST", "/chat/completions")
            .with_status(401)
            .with_body("Unauthorized")
            .create_async()
            .await;

        let gateway = OpenAIGateway::with_api_key_and_base_url("bad-key", server.url()).unwrap();
        let messages = vec![ChatMessage::user("Hi")];

        let result = gateway.complete("gpt-4", &messages, &CompletionConfig::default()).await;

        mock.assert_async().await;
        match result {
            Err(ColloquyError::Transport(TransportError::Api { status, body })) => {
                assert_eq!(status, 401);
                assert_eq!(body, "Unauthorized");
            }
            other => panic!("Expected API error, got {:?}", other),
        }
    }

    #[tokio::test]
    async fn test_complete_malformed_body() {
        let mut server = mockito::Server::new_async().await;
        let _mock = server
            .mock("POST", "/chat/completions")
            .with_status(200)
            .with_body("not json")
            .create_async()
            .await;

        let gateway = OpenAIGateway::with_api_key_and_base_url("test-key", server.url()).unwrap();
        let result = gateway
            .complete("gpt-4", &[ChatMessage::user("Hi")], &CompletionConfig::default())
            .await;

        assert!(matches!(
            result,
            Err(ColloquyError::Transport(TransportError::Malformed(_)))
        ));
    }

    #[tokio::test]
    async fn test_complete_connection_failure() {
        let port = {
            let listener = std::net::TcpListener::bind("127.0.0.1:0").unwrap();
            listener.local_addr().unwrap().port()
        };
        let gateway =
            OpenAIGateway::with_api_key_and_base_url("test-key", format!("http://127.0.0.1:{}", port))
                .unwrap();
        let result = gateway
            .complete("gpt-4", &[ChatMessage::user("Hi")], &CompletionConfig::default())
            .await;

        assert!(matches!(result, Err(ColloquyError::Transport(TransportError::Http(_)))));
    }
}
