//! Unified path management for Confab persisted state.

use std::path::PathBuf;

/// Errors that can occur during path resolution.
#[derive(Debug)]
pub enum PathError {
    /// Home directory could not be determined.
    HomeDirNotFound,
}

impl std::fmt::Display for PathError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            PathError::HomeDirNotFound => write!(f, "Cannot find home directory"),
        }
    }
}

impl std::error::Error for PathError {}

/// Unified path management for Confab.
///
/// # Directory Structure
///
/// ```text
/// ~/.local/share/confab/       # Data directory
/// ├── history.json             # Past summarization sessions (bounded)
/// └── current_summary.json     # Snapshot of the open session
/// ```
pub struct ConfabPaths;

impl ConfabPaths {
    /// Returns the Confab data directory.
    ///
    /// Uses the platform data directory (e.g. `~/.local/share/confab/`),
    /// falling back to `~/.confab` when the platform directory is
    /// unavailable.
    pub fn data_dir() -> Result<PathBuf, PathError> {
        if let Some(dir) = dirs::data_dir() {
            return Ok(dir.join("confab"));
        }
        dirs::home_dir()
            .map(|home| home.join(".confab"))
            .ok_or(PathError::HomeDirNotFound)
    }
}
