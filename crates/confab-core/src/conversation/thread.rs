//! Ordered, append-only message log for a single conversation.

use serde::{Deserialize, Serialize};

use super::message::{ConversationMessage, MessageRole};

/// An ordered sequence of messages for one conversation.
///
/// The thread is append-only: messages are added at the end and never
/// reordered. The only removal ever performed is `remove_last`, used to
/// retract a failure placeholder before a retry. The thread never
/// inspects message content; it is opaque payload plus a role tag.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Thread {
    messages: Vec<ConversationMessage>,
}

impl Thread {
    /// Creates an empty thread.
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends a message to the end of the thread.
    pub fn push(&mut self, message: ConversationMessage) {
        self.messages.push(message);
    }

    /// Removes and returns the final message, if any.
    ///
    /// Used only to retract a failure placeholder before a retry.
    pub fn remove_last(&mut self) -> Option<ConversationMessage> {
        self.messages.pop()
    }

    /// Returns the content of the most recent user-authored message.
    ///
    /// Used to reconstruct the request payload for a retry.
    pub fn last_user_content(&self) -> Option<&str> {
        self.messages
            .iter()
            .rev()
            .find(|m| m.role == MessageRole::User)
            .map(|m| m.content.as_str())
    }

    /// Returns the final message without removing it.
    pub fn last(&self) -> Option<&ConversationMessage> {
        self.messages.last()
    }

    /// Returns all messages in append order.
    pub fn messages(&self) -> &[ConversationMessage] {
        &self.messages
    }

    /// Returns the number of messages in the thread.
    pub fn len(&self) -> usize {
        self.messages.len()
    }

    /// Returns true if the thread holds no messages.
    pub fn is_empty(&self) -> bool {
        self.messages.is_empty()
    }

    /// Removes every message. Used by an explicit "new session" action only.
    pub fn clear(&mut self) {
        self.messages.clear();
    }
}
