//! Conversation domain module.
//!
//! This module contains the message thread model and the request
//! lifecycle state machine shared by all interaction modes.
//!
//! # Module Structure
//!
//! - `message`: Conversation message types (`MessageRole`, `ConversationMessage`)
//! - `thread`: Append-only message log (`Thread`)
//! - `lifecycle`: Request lifecycle state machine (`Conversation`, `RequestState`)

mod lifecycle;
mod message;
mod thread;

// Re-export public API
pub use lifecycle::{APOLOGY_MESSAGE, Conversation, RequestState};
pub use message::{ConversationMessage, MessageRole};
pub use thread::Thread;
