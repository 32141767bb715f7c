pub mod openai;
pub mod openai_resources;

pub use openai::{OpenAIConfig, OpenAIGateway, DEFAULT_BASE_URL};
