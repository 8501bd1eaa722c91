//! Bounded, persisted store of past summarization sessions.

use std::fs;
use std::path::{Path, PathBuf};

use confab_core::Result;
use confab_core::summary::SessionRecord;
use tracing::warn;

use crate::paths::ConfabPaths;

/// Maximum number of records retained; inserting past this evicts the oldest.
pub const HISTORY_CAPACITY: usize = 10;

const HISTORY_FILE: &str = "history.json";

/// Persisted collection of past completed sessions, most-recent-first.
///
/// Every mutation re-persists the full collection synchronously before
/// returning, so a crash right after a successful summarize request
/// cannot silently lose history. Malformed persisted data is treated as
/// absent: the store initializes empty and self-heals on the next write.
pub struct HistoryStore {
    file_path: PathBuf,
    records: Vec<SessionRecord>,
}

impl HistoryStore {
    /// Opens the store rooted at `base_dir`, hydrating from disk.
    ///
    /// The directory is created if it doesn't exist. A missing history
    /// file yields an empty store; a corrupt one is discarded with a
    /// warning rather than propagated.
    pub fn open(base_dir: impl AsRef<Path>) -> Result<Self> {
        let base_dir = base_dir.as_ref();
        fs::create_dir_all(base_dir)?;

        let file_path = base_dir.join(HISTORY_FILE);
        let records = load_records(&file_path);
        Ok(Self { file_path, records })
    }

    /// Opens the store at the default location (`~/.local/share/confab`).
    pub fn default_location() -> Result<Self> {
        let base_dir = ConfabPaths::data_dir()
            .map_err(|e| confab_core::ConfabError::io(e.to_string()))?;
        Self::open(base_dir)
    }

    /// Prepends a record, evicting the oldest entries beyond capacity,
    /// and persists the collection before returning.
    pub fn add(&mut self, record: SessionRecord) -> Result<()> {
        self.records.insert(0, record);
        self.records.truncate(HISTORY_CAPACITY);
        self.persist()
    }

    /// Empties the store and removes its persisted copy. Idempotent.
    pub fn clear(&mut self) -> Result<()> {
        self.records.clear();
        if self.file_path.exists() {
            fs::remove_file(&self.file_path)?;
        }
        Ok(())
    }

    /// Returns the records, most-recent-first.
    pub fn records(&self) -> &[SessionRecord] {
        &self.records
    }

    /// Returns the record at `index`, if present.
    pub fn get(&self, index: usize) -> Option<&SessionRecord> {
        self.records.get(index)
    }

    /// Returns the number of stored records.
    pub fn len(&self) -> usize {
        self.records.len()
    }

    /// Returns true when no records are stored.
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    fn persist(&self) -> Result<()> {
        let json = serde_json::to_string_pretty(&self.records)?;
        fs::write(&self.file_path, json)?;
        Ok(())
    }
}

fn load_records(file_path: &Path) -> Vec<SessionRecord> {
    let json = match fs::read_to_string(file_path) {
        Ok(json) => json,
        Err(err) if err.kind() == std::io::ErrorKind::NotFound => return Vec::new(),
        Err(err) => {
            warn!(path = %file_path.display(), %err, "failed to read history file; starting empty");
            return Vec::new();
        }
    };

    match serde_json::from_str(&json) {
        Ok(records) => records,
        Err(err) => {
            warn!(path = %file_path.display(), %err, "discarding corrupt history file");
            Vec::new()
        }
    }
}
