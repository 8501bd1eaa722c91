//! Error types for the Confab application.

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// A shared error type for the entire Confab application.
///
/// This provides typed, structured error variants with automatic conversion
/// from common error types via the `From` trait.
#[derive(Error, Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum ConfabError {
    /// Invalid user input (empty submission, malformed URL).
    ///
    /// Input errors are reported inline and never reach the network layer.
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    /// Transport error (connection failure, non-2xx status, unparseable body).
    ///
    /// Transport errors are recoverable through a user-initiated retry.
    #[error("Transport error: {message}")]
    Transport {
        /// HTTP status code, if the server produced a response at all.
        status: Option<u16>,
        message: String,
    },

    /// IO error (file system operations)
    #[error("IO error: {message}")]
    Io { message: String },

    /// Serialization/deserialization error
    #[error("Serialization error: {message}")]
    Serialization { message: String },

    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(String),

    /// Internal error (should not happen in normal operation)
    #[error("Internal error: {0}")]
    Internal(String),
}

impl ConfabError {
    /// Creates an InvalidInput error
    pub fn invalid_input(message: impl Into<String>) -> Self {
        Self::InvalidInput(message.into())
    }

    /// Creates a Transport error without an HTTP status.
    pub fn transport(message: impl Into<String>) -> Self {
        Self::Transport {
            status: None,
            message: message.into(),
        }
    }

    /// Creates a Transport error carrying the HTTP status code.
    pub fn transport_with_status(status: u16, message: impl Into<String>) -> Self {
        Self::Transport {
            status: Some(status),
            message: message.into(),
        }
    }

    /// Creates an IO error
    pub fn io(message: impl Into<String>) -> Self {
        Self::Io {
            message: message.into(),
        }
    }

    /// Creates a Config error
    pub fn config(message: impl Into<String>) -> Self {
        Self::Config(message.into())
    }

    /// Creates an Internal error
    pub fn internal(message: impl Into<String>) -> Self {
        Self::Internal(message.into())
    }

    /// Check if this is an InvalidInput error
    pub fn is_invalid_input(&self) -> bool {
        matches!(self, Self::InvalidInput(_))
    }

    /// Check if this is a Transport error
    pub fn is_transport(&self) -> bool {
        matches!(self, Self::Transport { .. })
    }

    /// Returns the message a user should see for this error.
    ///
    /// Transport errors carry the `detail` text extracted from the backend
    /// response body (or a fallback); other variants render via `Display`.
    pub fn user_message(&self) -> String {
        match self {
            Self::InvalidInput(message) => message.clone(),
            Self::Transport { message, .. } => message.clone(),
            other => other.to_string(),
        }
    }
}

impl From<std::io::Error> for ConfabError {
    fn from(err: std::io::Error) -> Self {
        Self::Io {
            message: format!("{} (kind: {:?})", err, err.kind()),
        }
    }
}

impl From<serde_json::Error> for ConfabError {
    fn from(err: serde_json::Error) -> Self {
        Self::Serialization {
            message: err.to_string(),
        }
    }
}

/// A type alias for `Result<T, ConfabError>`.
pub type Result<T> = std::result::Result<T, ConfabError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_classification_predicates() {
        assert!(ConfabError::invalid_input("empty").is_invalid_input());
        assert!(ConfabError::transport("connection refused").is_transport());
        assert!(!ConfabError::io("disk full").is_transport());
    }

    #[test]
    fn test_user_message_prefers_detail() {
        let err = ConfabError::transport_with_status(500, "overloaded");
        assert_eq!(err.user_message(), "overloaded");

        let err = ConfabError::invalid_input("Please enter a valid YouTube URL");
        assert_eq!(err.user_message(), "Please enter a valid YouTube URL");
    }
}
