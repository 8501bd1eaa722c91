//! Source-URL validation for the summarization entry point.

use once_cell::sync::Lazy;
use regex::Regex;

use crate::error::{ConfabError, Result};

/// Canonical video-sharing URL: optional scheme, optional `www.`, one of
/// the two recognized hosts, then exactly an 11-character video id.
static VIDEO_URL: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^(https?://)?(www\.)?(youtube\.com/watch\?v=|youtu\.be/)[A-Za-z0-9_-]{11}$")
        .expect("video URL pattern is valid")
});

/// Returns true when the input has the shape of a canonical video URL.
pub fn is_valid_video_url(url: &str) -> bool {
    VIDEO_URL.is_match(url)
}

/// Validates a summarization source URL.
///
/// Failure is a local input error; it must never reach the network layer.
pub fn validate_video_url(url: &str) -> Result<()> {
    if is_valid_video_url(url) {
        Ok(())
    } else {
        Err(ConfabError::invalid_input("Please enter a valid YouTube URL"))
    }
}
