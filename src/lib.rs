pub mod agent;
pub mod chatroom;
pub mod error;
pub mod llm;
pub mod training;

pub use error::{ColloquyError, Result, TransportError};

/// Prelude module for common imports
pub mod prelude {
    pub use crate::agent::{render_system_prompt, AgentDescription};
    pub use crate::chatroom::{ChatAgent, Chatroom, ChatroomMessage, IntroPolicy};
    pub use crate::error::{ColloquyError, Result, TransportError};
    pub use crate::llm::gateways::{OpenAIConfig, OpenAIGateway};
    pub use crate::llm::{
        ChatClient, ChatGateway, ChatMessage, ChatResponseBody, ClientConfig, CompletionConfig,
        PromptOptions, Role,
    };
}
