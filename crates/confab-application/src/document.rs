//! Document-grounded Q&A mode controller.

use confab_core::Result;
use confab_core::conversation::{Conversation, RequestState, Thread};
use tracing::debug;

use crate::backend::AssistantBackend;

/// Upper bound on the document excerpt carried as request context.
pub const CONTEXT_EXCERPT_LIMIT: usize = 1000;

const UPLOAD_NOTICE: &str =
    "Document uploaded successfully! You can now ask questions about its content.";

/// Controller for document-grounded question answering.
///
/// Identical request lifecycle to the chat mode, with one addition: an
/// optional document context excerpt is prepended to every outgoing
/// request. The thread always records the user's raw question; the
/// context prefix exists only in the request payload, so a retry
/// reconstructs it from the stored question.
pub struct DocumentSession<B: AssistantBackend> {
    backend: B,
    conversation: Conversation,
    context: Option<String>,
}

impl<B: AssistantBackend> DocumentSession<B> {
    /// Creates a session with no document attached.
    pub fn new(backend: B) -> Self {
        Self {
            backend,
            conversation: Conversation::new(),
            context: None,
        }
    }

    /// Attaches a document, keeping only the leading excerpt as context.
    ///
    /// File reading and format parsing happen upstream; this receives the
    /// extracted text. Appends a notice turn confirming the upload.
    pub fn attach_document(&mut self, text: &str) {
        let excerpt: String = text.chars().take(CONTEXT_EXCERPT_LIMIT).collect();
        debug!(excerpt_len = excerpt.len(), "attached document context");
        self.context = Some(excerpt);
        self.conversation.push_notice(UPLOAD_NOTICE);
    }

    /// Returns true when a document excerpt is attached.
    pub fn has_document(&self) -> bool {
        self.context.is_some()
    }

    /// Submits a question; see [`crate::chat::ChatSession::submit`].
    pub async fn submit(&mut self, input: &str) -> Result<bool> {
        let Some(prepared) = self.conversation.begin(input) else {
            return Ok(false);
        };

        let payload = self.compose_payload(&prepared);
        match self.backend.respond(&payload).await {
            Ok(reply) => self.conversation.complete(reply),
            Err(err) => self.conversation.fail(&err),
        }
        Ok(true)
    }

    /// Re-issues the request that produced the last failure.
    pub async fn retry(&mut self) -> Result<bool> {
        let Some(question) = self.conversation.begin_retry() else {
            return Ok(false);
        };

        let payload = self.compose_payload(&question);
        match self.backend.respond(&payload).await {
            Ok(reply) => self.conversation.complete(reply),
            Err(err) => self.conversation.fail(&err),
        }
        Ok(true)
    }

    /// Discards the thread and the attached document.
    pub fn start_new(&mut self) {
        self.conversation.reset();
        self.context = None;
    }

    fn compose_payload(&self, question: &str) -> String {
        match &self.context {
            Some(excerpt) => {
                format!("Context from document: {excerpt}\n\nQuestion: {question}")
            }
            None => question.to_string(),
        }
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
