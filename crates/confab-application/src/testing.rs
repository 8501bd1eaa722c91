//! Scriptable mock backends for controller tests.

use std::collections::VecDeque;
use std::sync::Mutex;

use async_trait::async_trait;
use confab_core::summary::VideoMetadata;
use confab_core::{ConfabError, Result};
use confab_interaction::SummarizeOutcome;

use crate::backend::{AssistantBackend, SummaryBackend};

/// Mock [`AssistantBackend`] that records every call and replays a
/// scripted sequence of results.
pub struct MockBackend {
    calls: Mutex<Vec<String>>,
    script: Mutex<VecDeque<Result<String>>>,
}

impl MockBackend {
    /// A backend answering each call with the next reply in order.
    pub fn replying<I, S>(replies: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            calls: Mutex::new(Vec::new()),
            script: Mutex::new(replies.into_iter().map(|r| Ok(r.into())).collect()),
        }
    }

    /// A backend whose first call fails with a transport error carrying
    /// `detail`, then answers with `replies` in order.
    pub fn failing_then_replying<I, S>(detail: &str, replies: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let mut script: VecDeque<Result<String>> = VecDeque::new();
        script.push_back(Err(ConfabError::transport_with_status(500, detail)));
        script.extend(replies.into_iter().map(|r| Ok(r.into())));
        Self {
            calls: Mutex::new(Vec::new()),
            script: Mutex::new(script),
        }
    }

    /// Returns the inputs received so far, in call order.
    pub fn calls(&self) -> Vec<String> {
        self.calls.lock().unwrap().clone()
    }
}

#[async_trait]
impl AssistantBackend for MockBackend {
    async fn respond(&self, input: &str) -> Result<String> {
        self.calls.lock().unwrap().push(input.to_string());
        self.script
            .lock()
            .unwrap()
            .pop_front()
            .unwrap_or_else(|| Err(ConfabError::internal("mock backend script exhausted")))
    }
}

/// Mock [`SummaryBackend`] with independently scripted summarize and ask
/// operations.
pub struct MockSummaryBackend {
    summarize_calls: Mutex<Vec<String>>,
    ask_calls: Mutex<Vec<(String, String)>>,
    summarize_script: Mutex<VecDeque<Result<SummarizeOutcome>>>,
    ask_script: Mutex<VecDeque<Result<String>>>,
}

impl MockSummaryBackend {
    pub fn new() -> Self {
        Self {
            summarize_calls: Mutex::new(Vec::new()),
            ask_calls: Mutex::new(Vec::new()),
            summarize_script: Mutex::new(VecDeque::new()),
            ask_script: Mutex::new(VecDeque::new()),
        }
    }

    /// Scripts the next summarize call to succeed.
    pub fn push_summary(&self, summary: &str, title: Option<&str>) {
        self.summarize_script
            .lock()
            .unwrap()
            .push_back(Ok(SummarizeOutcome {
                summary: summary.to_string(),
                video: VideoMetadata {
                    title: title.map(str::to_string),
                    ..VideoMetadata::default()
                },
            }));
    }

    /// Scripts the next summarize call to fail with a transport error.
    pub fn push_summarize_failure(&self, detail: &str) {
        self.summarize_script
            .lock()
            .unwrap()
            .push_back(Err(ConfabError::transport_with_status(500, detail)));
    }

    /// Scripts the next ask call to succeed.
    pub fn push_answer(&self, answer: &str) {
        self.ask_script.lock().unwrap().push_back(Ok(answer.to_string()));
    }

    /// Scripts the next ask call to fail with a transport error.
    pub fn push_ask_failure(&self, detail: &str) {
        self.ask_script
            .lock()
            .unwrap()
            .push_back(Err(ConfabError::transport_with_status(500, detail)));
    }

    /// Returns the URLs summarize was called with, in order.
    pub fn summarize_calls(&self) -> Vec<String> {
        self.summarize_calls.lock().unwrap().clone()
    }

    /// Returns the (url, question) pairs ask was called with, in order.
    pub fn ask_calls(&self) -> Vec<(String, String)> {
        self.ask_calls.lock().unwrap().clone()
    }
}

#[async_trait]
impl SummaryBackend for MockSummaryBackend {
    async fn summarize(&self, url: &str) -> Result<SummarizeOutcome> {
        self.summarize_calls.lock().unwrap().push(url.to_string());
        self.summarize_script
            .lock()
            .unwrap()
            .pop_front()
            .unwrap_or_else(|| Err(ConfabError::internal("mock summarize script exhausted")))
    }

    async fn ask(&self, url: &str, question: &str) -> Result<String> {
        self.ask_calls
            .lock()
            .unwrap()
            .push((url.to_string(), question.to_string()));
        self.ask_script
            .lock()
            .unwrap()
            .pop_front()
            .unwrap_or_else(|| Err(ConfabError::internal("mock ask script exhausted")))
    }
}
