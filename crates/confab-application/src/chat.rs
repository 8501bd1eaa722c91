//! Free-form chat mode controller.

use confab_core::Result;
use confab_core::conversation::{Conversation, RequestState, Thread};
use tracing::debug;

use crate::backend::AssistantBackend;

/// Controller for a free-form chat conversation.
///
/// Owns the conversation thread exclusively and drives the request
/// lifecycle around the backend round-trip. Transport failures are
/// absorbed into the conversation state (apology turn + retryable error
/// flag) rather than returned, so the presentation layer renders
/// everything from [`ChatSession::thread`] and
/// [`ChatSession::last_error`].
pub struct ChatSession<B: AssistantBackend> {
    backend: B,
    conversation: Conversation,
}

impl<B: AssistantBackend> ChatSession<B> {
    /// Creates a session with an empty thread.
    pub fn new(backend: B) -> Self {
        Self {
            backend,
            conversation: Conversation::new(),
        }
    }

    /// Submits user input.
    ///
    /// Returns `Ok(false)` when the input was a no-op (empty after
    /// trimming, or a request is already pending); `Ok(true)` when a
    /// request was issued and has settled one way or the other.
    pub async fn submit(&mut self, input: &str) -> Result<bool> {
        let Some(prepared) = self.conversation.begin(input) else {
            return Ok(false);
        };

        debug!(len = prepared.len(), "submitting chat message");
        match self.backend.respond(&prepared).await {
            Ok(reply) => self.conversation.complete(reply),
            Err(err) => self.conversation.fail(&err),
        }
        Ok(true)
    }

    /// Re-issues the request that produced the last failure.
    ///
    /// Returns `Ok(false)` when no retry is currently valid.
    pub async fn retry(&mut self) -> Result<bool> {
        let Some(payload) = self.conversation.begin_retry() else {
            return Ok(false);
        };

        debug!("retrying last chat message");
        match self.backend.respond(&payload).await {
            Ok(reply) => self.conversation.complete(reply),
            Err(err) => self.conversation.fail(&err),
        }
        Ok(true)
    }

    /// Discards the thread and starts a fresh conversation.
    pub fn start_new(&mut self) {
        self.conversation.reset();
    }

    /// Returns the conversation thread.
    pub fn thread(&self) -> &Thread {
        self.conversation.thread()
    }

    /// Returns the current lifecycle state.
    pub fn state(&self) -> RequestState {
        self.conversation.state()
    }

    /// Returns the retryable error message from the last failure, if any.
    pub fn last_error(&self) -> Option<&str> {
        self.conversation.last_error()
    }

    /// Returns true when a user-triggered retry is valid.
    pub fn can_retry(&self) -> bool {
        self.conversation.can_retry()
    }
}
