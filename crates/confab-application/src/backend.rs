//! Backend seams for the mode controllers.
//!
//! Controllers depend on these traits rather than on the HTTP client so
//! the request lifecycle can be exercised against mocks. Production code
//! plugs in [`BackendClient`] through the endpoint adapters.

use async_trait::async_trait;
use confab_core::Result;
use confab_interaction::{BackendClient, SummarizeOutcome};

/// A backend that answers one prepared input with one reply.
///
/// Implementations wrap a single endpoint; the controller decides what
/// the prepared input looks like (raw chat message, context-prefixed
/// document question).
#[async_trait]
pub trait AssistantBackend: Send + Sync {
    async fn respond(&self, input: &str) -> Result<String>;
}

/// A backend for the summarization mode's two operations.
#[async_trait]
pub trait SummaryBackend: Send + Sync {
    async fn summarize(&self, url: &str) -> Result<SummarizeOutcome>;
    async fn ask(&self, url: &str, question: &str) -> Result<String>;
}

/// Adapter routing [`AssistantBackend`] to the free-form chat endpoint.
pub struct ChatEndpoint {
    client: BackendClient,
}

impl ChatEndpoint {
    pub fn new(client: BackendClient) -> Self {
        Self { client }
    }
}

#[async_trait]
impl AssistantBackend for ChatEndpoint {
    async fn respond(&self, input: &str) -> Result<String> {
        self.client.send_chat(input).await
    }
}

/// Adapter routing [`AssistantBackend`] to the document-analysis endpoint.
pub struct AnalyzeEndpoint {
    client: BackendClient,
}

impl AnalyzeEndpoint {
    pub fn new(client: BackendClient) -> Self {
        Self { client }
    }
}

#[async_trait]
impl AssistantBackend for AnalyzeEndpoint {
    async fn respond(&self, input: &str) -> Result<String> {
        self.client.analyze(input).await
    }
}

#[async_trait]
impl SummaryBackend for BackendClient {
    async fn summarize(&self, url: &str) -> Result<SummarizeOutcome> {
        BackendClient::summarize(self, url).await
    }

    async fn ask(&self, url: &str, question: &str) -> Result<String> {
        BackendClient::ask(self, url, question).await
    }
}
