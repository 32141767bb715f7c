//! Error types and result aliases for the Colloquy library.
//!
//! This module defines the core error type [`ColloquyError`] and the [`Result`] type alias
//! used throughout the library. Failures coming back from the remote service are grouped
//! under [`TransportError`] so callers can tell registry mistakes apart from network ones.

use thiserror::Error;

#[derive(Error, Debug)]
pub enum ColloquyError {
    #[error("Invalid configuration: {0}")]
    ConfigError(String),

    #[error("Chat participants must have unique names - {0} is already in this chatroom")]
    DuplicateParticipant(String),

    #[error("There is no participant in the chatroom with the name {0}")]
    ParticipantNotFound(String),

    #[error("Participant {0} does not have an intro prompt")]
    MissingPrompt(String),

    #[error("Transport error: {0}")]
    Transport(#[from] TransportError),

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),
}

/// Failures raised while talking to the remote API.
#[derive(Error, Debug)]
pub enum TransportError {
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("API error: {status} - {body}")]
    Api { status: u16, body: String },

    #[error("Malformed response body: {0}")]
    Malformed(#[from] serde_json::Error),

    #[error("Response contained no choices")]
    EmptyResponse,
}

impl From<reqwest::Error> for ColloquyError {
    fn from(err: reqwest::Error) -> Self {
        ColloquyError::Transport(TransportError::Http(err))
    }
}

impl From<serde_json::Error> for ColloquyError {
    fn from(err: serde_json::Error) -> Self {
        ColloquyError::Transport(TransportError::Malformed(err))
    }
}

impl ColloquyError {
    /// True when the error came from the remote call rather than local bookkeeping.
    pub fn is_transport(&self) -> bool {
        matches!(self, ColloquyError::Transport(_))
    }
}

pub type Result<T> = std::result::Result<T, ColloquyError>;
