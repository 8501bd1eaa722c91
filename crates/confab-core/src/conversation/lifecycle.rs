//! Request lifecycle state machine for a single conversation.
//!
//! The machine itself is synchronous: the async mode controllers in the
//! application layer call [`Conversation::begin`] before issuing the
//! network request and [`Conversation::complete`] / [`Conversation::fail`]
//! once it settles. Everything between those calls is a plain state
//! transition.

use serde::{Deserialize, Serialize};

use super::message::{ConversationMessage, MessageRole};
use super::thread::Thread;
use crate::error::ConfabError;

/// Placeholder appended to the thread when a request fails.
///
/// Distinct from the error detail, which is surfaced through the
/// retryable error flag instead.
pub const APOLOGY_MESSAGE: &str =
    "I apologize, but I encountered an error. Please try rephrasing your question or try again later.";

/// The state of the single allowed in-flight request for a conversation.
///
/// Success transitions straight back to `Idle`; there is no observable
/// `Succeeded` state between a completed request and the next submission.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RequestState {
    /// No request in flight.
    #[default]
    Idle,
    /// A request has been issued and has not settled yet.
    Pending,
    /// The last request failed; a user-triggered retry is available.
    Failed,
}

/// A conversation thread together with its request lifecycle state.
///
/// Owns the message [`Thread`] exclusively. A submission optimistically
/// appends the user turn before the request is issued; the request then
/// resolves into either an assistant turn or the apology placeholder,
/// never a partially applied state.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Conversation {
    thread: Thread,
    state: RequestState,
    last_error: Option<String>,
}

impl Conversation {
    /// Creates an empty conversation in the `Idle` state.
    pub fn new() -> Self {
        Self::default()
    }

    /// Starts a submission.
    ///
    /// Trims the input, appends the user turn, clears any prior error
    /// flag, and transitions to `Pending`. Returns the prepared input the
    /// caller must send to the backend.
    ///
    /// Returns `None` without touching the thread when the trimmed input
    /// is empty or another request is still `Pending`. Both are silent
    /// no-ops rather than errors: the first is invalid input that must
    /// never reach the network, the second enforces the single in-flight
    /// request per conversation.
    pub fn begin(&mut self, input: &str) -> Option<String> {
        let trimmed = input.trim();
        if trimmed.is_empty() || self.state == RequestState::Pending {
            return None;
        }

        self.thread.push(ConversationMessage::user(trimmed));
        self.last_error = None;
        self.state = RequestState::Pending;
        Some(trimmed.to_string())
    }

    /// Resolves the pending request with a successful reply.
    ///
    /// Appends the assistant turn and returns to `Idle`. Ignored when no
    /// request is pending (a resolution abandoned by the caller).
    pub fn complete(&mut self, reply: impl Into<String>) {
        if self.state != RequestState::Pending {
            return;
        }

        self.thread.push(ConversationMessage::assistant(reply));
        self.last_error = None;
        self.state = RequestState::Idle;
    }

    /// Resolves the pending request with a failure.
    ///
    /// Appends the apology placeholder and records the human-readable
    /// error message as the retryable error flag. Ignored when no request
    /// is pending.
    pub fn fail(&mut self, error: &ConfabError) {
        if self.state != RequestState::Pending {
            return;
        }

        self.thread.push(ConversationMessage::assistant(APOLOGY_MESSAGE));
        self.last_error = Some(error.user_message());
        self.state = RequestState::Failed;
    }

    /// Starts a retry of the failed request.
    ///
    /// Valid only while `Failed` with the apology placeholder as the
    /// thread tail: removes the placeholder, clears the error flag,
    /// transitions to `Pending`, and returns the content of the most
    /// recent user turn so the caller can re-issue the exact payload.
    /// Any other state is a no-op returning `None`.
    pub fn begin_retry(&mut self) -> Option<String> {
        if !self.can_retry() {
            return None;
        }

        // The placeholder is an assistant turn, so the payload is the same
        // before and after removing it.
        let input = self.thread.last_user_content()?.to_string();
        self.thread.remove_last();
        self.last_error = None;
        self.state = RequestState::Pending;
        Some(input)
    }

    /// Returns true when a user-triggered retry is currently valid.
    pub fn can_retry(&self) -> bool {
        self.state == RequestState::Failed
            && self
                .thread
                .last()
                .is_some_and(|m| m.role == MessageRole::Assistant && m.content == APOLOGY_MESSAGE)
    }

    /// Returns true while a request is in flight.
    pub fn is_pending(&self) -> bool {
        self.state == RequestState::Pending
    }

    /// Returns the current lifecycle state.
    pub fn state(&self) -> RequestState {
        self.state
    }

    /// Returns the retryable error message from the last failure, if any.
    pub fn last_error(&self) -> Option<&str> {
        self.last_error.as_deref()
    }

    /// Returns the conversation thread.
    pub fn thread(&self) -> &Thread {
        &self.thread
    }

    /// Appends an out-of-band assistant notice to the thread.
    ///
    /// Used for system-side messages such as the document upload
    /// confirmation; does not interact with the request lifecycle.
    pub fn push_notice(&mut self, content: impl Into<String>) {
        self.thread.push(ConversationMessage::assistant(content));
    }

    /// Discards the thread and error state, returning to `Idle`.
    ///
    /// Only an explicit "new session" action calls this.
    pub fn reset(&mut self) {
        self.thread.clear();
        self.last_error = None;
        self.state = RequestState::Idle;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn contents(conversation: &Conversation) -> Vec<(MessageRole, &str)> {
        conversation
            .thread()
            .messages()
            .iter()
            .map(|m| (m.role, m.content.as_str()))
            .collect()
    }

    #[test]
    fn test_successful_round_trip() {
        let mut conversation = Conversation::new();

        let prepared = conversation.begin("hello").unwrap();
        assert_eq!(prepared, "hello");
        assert_eq!(conversation.state(), RequestState::Pending);
        assert_eq!(contents(&conversation), vec![(MessageRole::User, "hello")]);

        conversation.complete("hi");
        assert_eq!(conversation.state(), RequestState::Idle);
        assert_eq!(conversation.last_error(), None);
        assert_eq!(
            contents(&conversation),
            vec![(MessageRole::User, "hello"), (MessageRole::Assistant, "hi")]
        );
    }

    #[test]
    fn test_failure_appends_apology_and_sets_flag() {
        let mut conversation = Conversation::new();
        conversation.begin("hello").unwrap();

        conversation.fail(&ConfabError::transport_with_status(500, "overloaded"));
        assert_eq!(conversation.state(), RequestState::Failed);
        assert_eq!(conversation.last_error(), Some("overloaded"));
        assert_eq!(
            contents(&conversation),
            vec![
                (MessageRole::User, "hello"),
                (MessageRole::Assistant, APOLOGY_MESSAGE),
            ]
        );
    }

    #[test]
    fn test_retry_removes_placeholder_and_resends_payload() {
        let mut conversation = Conversation::new();
        conversation.begin("hello").unwrap();
        conversation.fail(&ConfabError::transport("connection refused"));

        let payload = conversation.begin_retry().unwrap();
        assert_eq!(payload, "hello");
        assert_eq!(conversation.state(), RequestState::Pending);
        assert_eq!(conversation.last_error(), None);
        assert_eq!(contents(&conversation), vec![(MessageRole::User, "hello")]);

        conversation.complete("real answer");
        assert_eq!(
            contents(&conversation),
            vec![
                (MessageRole::User, "hello"),
                (MessageRole::Assistant, "real answer"),
            ]
        );
    }

    #[test]
    fn test_empty_input_is_a_no_op() {
        let mut conversation = Conversation::new();
        assert!(conversation.begin("   ").is_none());
        assert_eq!(conversation.state(), RequestState::Idle);
        assert!(conversation.thread().is_empty());
    }

    #[test]
    fn test_input_is_trimmed_before_append() {
        let mut conversation = Conversation::new();
        let prepared = conversation.begin("  hello  ").unwrap();
        assert_eq!(prepared, "hello");
        assert_eq!(conversation.thread().messages()[0].content, "hello");
    }

    #[test]
    fn test_submit_while_pending_is_rejected() {
        let mut conversation = Conversation::new();
        conversation.begin("first").unwrap();

        assert!(conversation.begin("second").is_none());
        assert_eq!(conversation.thread().len(), 1);
        assert_eq!(conversation.state(), RequestState::Pending);
    }

    #[test]
    fn test_retry_without_failure_is_a_no_op() {
        let mut conversation = Conversation::new();
        assert!(conversation.begin_retry().is_none());

        conversation.begin("hello").unwrap();
        conversation.complete("hi");
        assert!(conversation.begin_retry().is_none());
        assert_eq!(conversation.thread().len(), 2);
    }

    #[test]
    fn test_retry_requires_placeholder_at_tail() {
        let mut conversation = Conversation::new();
        conversation.begin("hello").unwrap();
        conversation.fail(&ConfabError::transport("boom"));

        // A notice pushed after the failure displaces the placeholder tail.
        conversation.push_notice("unrelated notice");
        assert!(!conversation.can_retry());
        assert!(conversation.begin_retry().is_none());
        assert_eq!(conversation.thread().len(), 3);
    }

    #[test]
    fn test_resolution_without_pending_request_is_ignored() {
        let mut conversation = Conversation::new();
        conversation.complete("stray reply");
        conversation.fail(&ConfabError::transport("stray failure"));

        assert!(conversation.thread().is_empty());
        assert_eq!(conversation.state(), RequestState::Idle);
    }

    #[test]
    fn test_begin_clears_previous_error_flag() {
        let mut conversation = Conversation::new();
        conversation.begin("hello").unwrap();
        conversation.fail(&ConfabError::transport("boom"));
        assert!(conversation.last_error().is_some());

        conversation.begin("next question").unwrap();
        assert_eq!(conversation.last_error(), None);
    }

    #[test]
    fn test_reset_returns_to_initial_state() {
        let mut conversation = Conversation::new();
        conversation.begin("hello").unwrap();
        conversation.fail(&ConfabError::transport("boom"));

        conversation.reset();
        assert!(conversation.thread().is_empty());
        assert_eq!(conversation.state(), RequestState::Idle);
        assert_eq!(conversation.last_error(), None);
    }
}
