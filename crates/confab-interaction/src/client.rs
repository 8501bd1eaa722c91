//! HTTP client for the remote inference backend.
//!
//! One method per endpoint, all speaking the same JSON contract: a POST
//! body carrying the input, a 2xx JSON body carrying the answer under a
//! mode-specific key, and a non-2xx JSON body optionally carrying a
//! `detail` string with the human-readable failure reason.

use confab_core::summary::VideoMetadata;
use confab_core::{ConfabError, Result};
use reqwest::{Client, StatusCode};
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::config::ClientConfig;

const CHAT_PATH: &str = "/chat-ai";
const ANALYZE_PATH: &str = "/api/analyze";
const SUMMARIZE_PATH: &str = "/api/summarize";
const ASK_PATH: &str = "/api/ask";

/// Client for the Confab inference backend.
#[derive(Debug, Clone)]
pub struct BackendClient {
    client: Client,
    base_url: String,
    model: Option<String>,
}

/// Result of a successful summarize request.
#[derive(Debug, Clone, PartialEq)]
pub struct SummarizeOutcome {
    /// The generated summary text.
    pub summary: String,
    /// Descriptive video fields, passed through unmodified.
    pub video: VideoMetadata,
}

impl BackendClient {
    /// Creates a client for the given backend base URL.
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            client: Client::new(),
            base_url: base_url.into(),
            model: None,
        }
    }

    /// Creates a client from a loaded [`ClientConfig`].
    pub fn from_config(config: &ClientConfig) -> Self {
        let mut client = Self::new(config.base_url.clone());
        client.model = config.model.clone();
        client
    }

    /// Overrides the model identifier sent with summarize/ask requests.
    pub fn with_model(mut self, model: impl Into<String>) -> Self {
        self.model = Some(model.into());
        self
    }

    /// Sends a free-form chat message and returns the assistant reply.
    pub async fn send_chat(&self, message: &str) -> Result<String> {
        let response = self
            .execute(CHAT_PATH, &ChatRequest { message }, "Failed to get answer")
            .await?;
        let parsed: ChatResponse = decode(response).await?;
        Ok(parsed.message)
    }

    /// Sends a document-analysis message and returns the answer.
    ///
    /// The backend is inconsistent about the response key here, so the
    /// answer is taken from `result`, then `message`, then the raw body.
    pub async fn analyze(&self, message: &str) -> Result<String> {
        let response = self
            .execute(
                ANALYZE_PATH,
                &ChatRequest { message },
                "Failed to analyze message",
            )
            .await?;
        let parsed: serde_json::Value = decode(response).await?;

        let answer = parsed
            .get("result")
            .and_then(|v| v.as_str())
            .or_else(|| parsed.get("message").and_then(|v| v.as_str()))
            .map(str::to_string)
            .unwrap_or_else(|| parsed.to_string());
        Ok(answer)
    }

    /// Requests a summary for a video URL.
    pub async fn summarize(&self, url: &str) -> Result<SummarizeOutcome> {
        let request = SummarizeRequest {
            url,
            model: self.model.as_deref(),
        };
        let response = self
            .execute(SUMMARIZE_PATH, &request, "Failed to generate summary")
            .await?;
        let parsed: SummarizeResponse = decode(response).await?;
        Ok(SummarizeOutcome {
            summary: parsed.summary,
            video: parsed.video_data,
        })
    }

    /// Asks a follow-up question about a previously summarized video.
    pub async fn ask(&self, url: &str, question: &str) -> Result<String> {
        let request = AskRequest {
            url,
            question,
            model: self.model.as_deref(),
        };
        let response = self
            .execute(ASK_PATH, &request, "Failed to process question")
            .await?;
        let parsed: AskResponse = decode(response).await?;
        Ok(parsed.answer)
    }

    async fn execute(
        &self,
        path: &str,
        body: &impl Serialize,
        default_error: &str,
    ) -> Result<reqwest::Response> {
        let url = format!("{}{}", self.base_url.trim_end_matches('/'), path);
        debug!(%url, "issuing backend request");

        let response = self
            .client
            .post(&url)
            .json(body)
            .send()
            .await
            .map_err(|err| ConfabError::transport(format!("Request to {path} failed: {err}")))?;

        let status = response.status();
        if !status.is_success() {
            let body_text = response.text().await.unwrap_or_default();
            return Err(map_http_error(status, &body_text, default_error));
        }

        Ok(response)
    }
}

async fn decode<T: serde::de::DeserializeOwned>(response: reqwest::Response) -> Result<T> {
    response
        .json()
        .await
        .map_err(|err| ConfabError::transport(format!("Failed to parse backend response: {err}")))
}

fn map_http_error(status: StatusCode, body: &str, default_error: &str) -> ConfabError {
    ConfabError::transport_with_status(status.as_u16(), extract_error_detail(body, default_error))
}

/// Extracts the `detail` field from an error response body, falling back
/// to the endpoint's default message when absent or unparseable.
fn extract_error_detail(body: &str, default_error: &str) -> String {
    serde_json::from_str::<ErrorResponse>(body)
        .ok()
        .and_then(|wrapper| wrapper.detail)
        .unwrap_or_else(|| default_error.to_string())
}

#[derive(Serialize)]
struct ChatRequest<'a> {
    message: &'a str,
}

#[derive(Deserialize)]
struct ChatResponse {
    message: String,
}

#[derive(Serialize)]
struct SummarizeRequest<'a> {
    url: &'a str,
    #[serde(skip_serializing_if = "Option::is_none")]
    model: Option<&'a str>,
}

#[derive(Deserialize)]
struct SummarizeResponse {
    summary: String,
    #[serde(default)]
    video_data: VideoMetadata,
}

#[derive(Serialize)]
struct AskRequest<'a> {
    url: &'a str,
    question: &'a str,
    #[serde(skip_serializing_if = "Option::is_none")]
    model: Option<&'a str>,
}

#[derive(Deserialize)]
struct AskResponse {
    answer: String,
}

#[derive(Deserialize)]
struct ErrorResponse {
    #[serde(default)]
    detail: Option<String>,
}
