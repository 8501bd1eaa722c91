//! Persistence layer for Confab.
//!
//! JSON-file-backed stores for the bounded summarization history and the
//! current-session snapshot, plus path resolution. All writes are
//! synchronous and last-writer-wins; corruption is recovered locally by
//! reinitializing to empty.

pub mod history;
pub mod paths;
pub mod snapshot;

pub use history::{HISTORY_CAPACITY, HistoryStore};
pub use paths::ConfabPaths;
pub use snapshot::SnapshotStore;
