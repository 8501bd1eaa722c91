//! Persisted snapshot of the currently open summarization session.

use std::fs;
use std::path::{Path, PathBuf};

use confab_core::Result;
use confab_core::summary::SessionRecord;
use tracing::warn;

use crate::paths::ConfabPaths;

const SNAPSHOT_FILE: &str = "current_summary.json";

/// Persists at most one [`SessionRecord`], the "currently open" session,
/// so a restart can resume it.
///
/// The follow-up question/answer thread is not part of the snapshot; it
/// is ephemeral and scoped to the live session. Malformed persisted data
/// yields "none" rather than an error.
pub struct SnapshotStore {
    file_path: PathBuf,
}

impl SnapshotStore {
    /// Opens the store rooted at `base_dir`, creating the directory if needed.
    pub fn open(base_dir: impl AsRef<Path>) -> Result<Self> {
        let base_dir = base_dir.as_ref();
        fs::create_dir_all(base_dir)?;
        Ok(Self {
            file_path: base_dir.join(SNAPSHOT_FILE),
        })
    }

    /// Opens the store at the default location (`~/.local/share/confab`).
    pub fn default_location() -> Result<Self> {
        let base_dir = ConfabPaths::data_dir()
            .map_err(|e| confab_core::ConfabError::io(e.to_string()))?;
        Self::open(base_dir)
    }

    /// Persists the current session, overwriting any prior snapshot.
    pub fn save(&self, record: &SessionRecord) -> Result<()> {
        let json = serde_json::to_string_pretty(record)?;
        fs::write(&self.file_path, json)?;
        Ok(())
    }

    /// Returns the persisted snapshot, or `None` when absent or corrupt.
    pub fn load(&self) -> Option<SessionRecord> {
        let json = match fs::read_to_string(&self.file_path) {
            Ok(json) => json,
            Err(err) if err.kind() == std::io::ErrorKind::NotFound => return None,
            Err(err) => {
                warn!(path = %self.file_path.display(), %err, "failed to read snapshot file");
                return None;
            }
        };

        match serde_json::from_str(&json) {
            Ok(record) => Some(record),
            Err(err) => {
                warn!(path = %self.file_path.display(), %err, "discarding corrupt snapshot file");
                None
            }
        }
    }

    /// Removes the persisted snapshot. Idempotent.
    pub fn clear(&self) -> Result<()> {
        if self.file_path.exists() {
            fs::remove_file(&self.file_path)?;
        }
        Ok(())
    }
}
