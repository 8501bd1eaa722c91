//! Summarization session domain model.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Descriptive fields returned by the backend for a summarized video.
///
/// The backend owns this shape; everything is optional and unknown
/// fields are carried through unmodified so new backend fields survive a
/// persistence round-trip.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct VideoMetadata {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub duration: Option<String>,
    /// Any further backend-provided fields, passed through opaquely.
    #[serde(flatten)]
    pub extra: BTreeMap<String, Value>,
}

/// A completed summarization result.
///
/// Created only after a successful summarize request and never mutated
/// in place. The follow-up question/answer thread is not part of the
/// record: it is ephemeral, scoped to the live session, and dropped on
/// reload.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SessionRecord {
    /// Unique record identifier (UUID format).
    pub id: String,
    /// The validated source video URL.
    pub source_url: String,
    /// The generated summary text (markdown from the backend).
    pub summary: String,
    /// Descriptive video fields returned alongside the summary.
    #[serde(default)]
    pub video: VideoMetadata,
    /// Timestamp when the record was created (ISO 8601 format).
    pub created_at: String,
}

impl SessionRecord {
    /// Builds a fresh record for a just-completed summarize request.
    pub fn new(source_url: impl Into<String>, summary: impl Into<String>, video: VideoMetadata) -> Self {
        Self {
            id: uuid::Uuid::new_v4().to_string(),
            source_url: source_url.into(),
            summary: summary.into(),
            video,
            created_at: chrono::Utc::now().to_rfc3339(),
        }
    }

    /// Returns a display title: the video title when the backend provided
    /// one, otherwise the source URL.
    pub fn title(&self) -> &str {
        self.video.title.as_deref().unwrap_or(&self.source_url)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_title_falls_back_to_url() {
        let record = SessionRecord::new(
            "https://youtu.be/dQw4w9WgXcQ",
            "a summary",
            VideoMetadata::default(),
        );
        assert_eq!(record.title(), "https://youtu.be/dQw4w9WgXcQ");

        let with_title = SessionRecord::new(
            "https://youtu.be/dQw4w9WgXcQ",
            "a summary",
            VideoMetadata {
                title: Some("Never Gonna Give You Up".to_string()),
                ..VideoMetadata::default()
            },
        );
        assert_eq!(with_title.title(), "Never Gonna Give You Up");
    }

    #[test]
    fn test_unknown_video_fields_survive_round_trip() {
        let json = r#"{
            "title": "Talk",
            "view_count": 12345,
            "channel": "ConfTalks"
        }"#;

        let video: VideoMetadata = serde_json::from_str(json).unwrap();
        assert_eq!(video.title.as_deref(), Some("Talk"));
        assert_eq!(video.extra.get("view_count"), Some(&Value::from(12345)));

        let reserialized = serde_json::to_value(&video).unwrap();
        assert_eq!(reserialized["channel"], Value::from("ConfTalks"));
    }

    #[test]
    fn test_records_get_unique_ids() {
        let a = SessionRecord::new("u", "s", VideoMetadata::default());
        let b = SessionRecord::new("u", "s", VideoMetadata::default());
        assert_ne!(a.id, b.id);
    }
}
