//! Video summarization mode controller.

use confab_core::conversation::{Conversation, RequestState, Thread};
use confab_core::summary::{SessionRecord, validate_video_url};
use confab_core::{ConfabError, Result};
use confab_infrastructure::{HistoryStore, SnapshotStore};
use confab_interaction::SummarizeOutcome;
use tracing::{debug, warn};

use crate::backend::SummaryBackend;

/// Controller for video summarization and its follow-up Q&A.
///
/// Two request lifecycles live here. Summarize requests have no thread
/// to append to, so their failures surface as an inline error with a
/// user-triggered retry of the same URL. Follow-up questions run on the
/// shared [`Conversation`] machine exactly like the chat mode.
///
/// Completed summaries become immutable [`SessionRecord`]s: prepended to
/// the bounded history store and saved as the current-session snapshot,
/// both persisted before the call returns. The follow-up thread is
/// ephemeral; it is never persisted and starts empty after a restart.
pub struct SummarySession<B: SummaryBackend> {
    backend: B,
    history: HistoryStore,
    snapshot: SnapshotStore,
    current: Option<SessionRecord>,
    conversation: Conversation,
    summarize_state: RequestState,
    summarize_error: Option<String>,
    requested_url: Option<String>,
}

impl<B: SummaryBackend> SummarySession<B> {
    /// Creates a session over the given stores, resuming the snapshotted
    /// current session when one exists.
    pub fn new(backend: B, history: HistoryStore, snapshot: SnapshotStore) -> Self {
        let current = snapshot.load();
        if let Some(record) = &current {
            debug!(url = %record.source_url, "resumed session from snapshot");
        }

        Self {
            backend,
            history,
            snapshot,
            current,
            conversation: Conversation::new(),
            summarize_state: RequestState::Idle,
            summarize_error: None,
            requested_url: None,
        }
    }

    /// Requests a summary for `url`.
    ///
    /// The URL is validated locally first; a malformed URL is an
    /// [`ConfabError::InvalidInput`] and no request is issued. Returns
    /// `Ok(false)` while a summarize request is already pending.
    pub async fn summarize(&mut self, url: &str) -> Result<bool> {
        let url = url.trim();
        if url.is_empty() || self.summarize_state == RequestState::Pending {
            return Ok(false);
        }
        validate_video_url(url)?;

        self.summarize_state = RequestState::Pending;
        self.summarize_error = None;
        self.requested_url = Some(url.to_string());

        let outcome = self.backend.summarize(url).await;
        self.resolve_summarize(url.to_string(), outcome);
        Ok(true)
    }

    /// Re-issues the summarize request that produced the last failure.
    ///
    /// Returns `Ok(false)` when there is no failed summarize to retry.
    pub async fn retry_summarize(&mut self) -> Result<bool> {
        if self.summarize_state != RequestState::Failed {
            return Ok(false);
        }
        let Some(url) = self.requested_url.clone() else {
            return Ok(false);
        };

        self.summarize_state = RequestState::Pending;
        self.summarize_error = None;

        let outcome = self.backend.summarize(&url).await;
        self.resolve_summarize(url, outcome);
        Ok(true)
    }

    fn resolve_summarize(&mut self, url: String, outcome: Result<SummarizeOutcome>) {
        match outcome {
            Ok(result) => {
                let record = SessionRecord::new(url, result.summary, result.video);
                if let Err(err) = self.history.add(record.clone()) {
                    warn!(%err, "failed to persist history");
                }
                if let Err(err) = self.snapshot.save(&record) {
                    warn!(%err, "failed to persist session snapshot");
                }
                self.current = Some(record);
                self.conversation.reset();
                self.summarize_state = RequestState::Idle;
                self.requested_url = None;
            }
            Err(err) => {
                self.summarize_state = RequestState::Failed;
                self.summarize_error = Some(err.user_message());
            }
        }
    }

    /// Asks a follow-up question about the current summary.
    ///
    /// Requires a current summary; asking without one is an input error.
    /// Thread/lifecycle semantics match the chat mode.
    pub async fn ask(&mut self, question: &str) -> Result<bool> {
        let url = self
            .current
            .as_ref()
            .map(|record| record.source_url.clone())
            .ok_or_else(|| {
                ConfabError::invalid_input("Please generate a summary first before asking questions")
            })?;

        let Some(prepared) = self.conversation.begin(question) else {
            return Ok(false);
        };

        match self.backend.ask(&url, &prepared).await {
            Ok(answer) => self.conversation.complete(answer),
            Err(err) => self.conversation.fail(&err),
        }
        Ok(true)
    }

    /// Re-issues the follow-up question that produced the last failure.
    pub async fn retry_ask(&mut self) -> Result<bool> {
        let Some(url) = self
            .current
            .as_ref()
            .map(|record| record.source_url.clone())
        else {
            return Ok(false);
        };

        let Some(question) = self.conversation.begin_retry() else {
            return Ok(false);
        };

        match self.backend.ask(&url, &question).await {
            Ok(answer) => self.conversation.complete(answer),
            Err(err) => self.conversation.fail(&err),
        }
        Ok(true)
    }

    /// Makes a past history entry the current session again.
    ///
    /// Clears the follow-up thread and re-saves the snapshot. Returns
    /// `Ok(false)` when the index is out of range.
    pub fn load_history_entry(&mut self, index: usize) -> Result<bool> {
        let Some(record) = self.history.get(index).cloned() else {
            return Ok(false);
        };

        if let Err(err) = self.snapshot.save(&record) {
            warn!(%err, "failed to persist session snapshot");
        }
        self.current = Some(record);
        self.conversation.reset();
        self.summarize_state = RequestState::Idle;
        self.summarize_error = None;
        Ok(true)
    }

    /// Starts a new summary: discards the current session, its thread,
    /// and the snapshot. History is untouched.
    pub fn start_new(&mut self) -> Result<()> {
        self.current = None;
        self.conversation.reset();
        self.summarize_state = RequestState::Idle;
        self.summarize_error = None;
        self.requested_url = None;
        self.snapshot.clear()
    }

    /// Clears the persisted history and the snapshot.
    ///
    /// The in-memory current session stays open; only persisted state is
    /// dropped.
    pub fn clear_history(&mut self) -> Result<()> {
        self.history.clear()?;
        self.snapshot.clear()
    }

    /// Returns the current session record, if any.
    pub fn current(&self) -> Option<&SessionRecord> {
        self.current.as_ref()
    }

    /// Returns the stored history records, most-recent-first.
    pub fn history(&self) -> &[SessionRecord] {
        self.history.records()
    }

    /// Returns the follow-up Q&A thread.
    pub fn thread(&self) -> &Thread {
        self.conversation.thread()
    }

    /// Returns the lifecycle state of the summarize request.
    pub fn summarize_state(&self) -> RequestState {
        self.summarize_state
    }

    /// Returns the inline error from the last failed summarize, if any.
    pub fn summarize_error(&self) -> Option<&str> {
        self.summarize_error.as_deref()
    }

    /// Returns the retryable error from the last failed question, if any.
    pub fn ask_error(&self) -> Option<&str> {
        self.conversation.last_error()
    }

    /// Returns true when a failed follow-up question can be retried.
    pub fn can_retry_ask(&self) -> bool {
        self.conversation.can_retry()
    }
}
