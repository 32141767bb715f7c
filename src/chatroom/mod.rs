//! Multi-participant chatrooms.
//!
//! - [`ChatAgent`] - a named participant with a setup prompt and optional intro prompt
//! - [`ParticipantRegistry`] - unique-name registry in insertion order
//! - [`Conversation`] - shared, append-only history of [`ChatroomMessage`]s
//! - [`Chatroom`] - assembles each participant's context and records their replies

pub mod conversation;
pub mod participant;
pub mod registry;
pub mod room;

pub use conversation::{ChatroomMessage, Conversation};
pub use participant::ChatAgent;
pub use registry::ParticipantRegistry;
pub use room::{Chatroom, IntroPolicy, HOST_SPEAKER, SYSTEM_SPEAKER};
