//! Application layer for Confab.
//!
//! One controller per interaction mode, each owning its conversation
//! state and driving the request lifecycle against a backend seam:
//!
//! - [`chat::ChatSession`]: free-form chat
//! - [`document::DocumentSession`]: document-grounded Q&A
//! - [`summary::SummarySession`]: video summarization with follow-up Q&A

pub mod backend;
pub mod chat;
pub mod document;
pub mod summary;

#[cfg(test)]
mod testing;

pub use backend::{AnalyzeEndpoint, AssistantBackend, ChatEndpoint, SummaryBackend};
pub use chat::ChatSession;
pub use document::{CONTEXT_EXCERPT_LIMIT, DocumentSession};
pub use summary::SummarySession;
