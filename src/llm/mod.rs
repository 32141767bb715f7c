pub mod client;
pub mod gateway;
pub mod gateways;
pub mod models;
pub mod resources;

pub use client::{ChatClient, ClientConfig, PromptOptions};
pub use gateway::{ChatGateway, CompletionConfig};
pub use models::{
    clamp_temperature, normalize_temperature, ChatChoice, ChatMessage, ChatRequestBody,
    ChatResponseBody, Role, Usage,
};
