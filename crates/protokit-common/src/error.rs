//! Error types for Protokit
//!
//! Provides a unified error type and domain-specific error variants

use thiserror::Error;

/// Result type alias using ProtocolError
pub type Result<T> = std::result::Result<T, ProtocolError>;

/// Unified error type for protocol generation
#[derive(Debug, Error)]
pub enum ProtocolError {
    // Caller supplied missing or empty input
    #[error("Invalid input: {0}")]
    InvalidInput(#[from] InputError),

    // Builder produced a document that breaks referential integrity
    #[error("Malformed output: {0}")]
    MalformedOutput(#[from] DocumentError),

    // Configuration errors
    #[error("Configuration error: {0}")]
    Config(String),

    // Serialization errors
    #[error("Serialization error: {0}")]
    Serialization(String),

    // Filesystem errors while loading protocol files
    #[error("I/O error: {0}")]
    Io(String),
}

/// Input validation errors
#[derive(Debug, Error, PartialEq, Eq)]
pub enum InputError {
    #[error("participant profile is required")]
    MissingProfile,

    #[error("session history must contain at least the current session")]
    EmptyHistory,
}

/// Protocol document integrity errors
#[derive(Debug, Error, PartialEq, Eq)]
pub enum DocumentError {
    #[error("sequence step {position} references unknown frame '{frame_id}'")]
    DanglingReference { frame_id: String, position: usize },

    #[error("frame '{frame_id}' is missing its kind")]
    MissingKind { frame_id: String },
}

impl ProtocolError {
    /// Whether the caller can recover by supplying corrected input
    pub fn is_recoverable(&self) -> bool {
        matches!(self, ProtocolError::InvalidInput(_))
    }
}

// Implement From for common external error types
impl From<serde_json::Error> for ProtocolError {
    fn from(err: serde_json::Error) -> Self {
        ProtocolError::Serialization(err.to_string())
    }
}

impl From<std::io::Error> for ProtocolError {
    fn from(err: std::io::Error) -> Self {
        ProtocolError::Io(err.to_string())
    }
}

impl From<config::ConfigError> for ProtocolError {
    fn from(err: config::ConfigError) -> Self {
        ProtocolError::Config(err.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = ProtocolError::MalformedOutput(DocumentError::DanglingReference {
            frame_id: "exit-survey".to_string(),
            position: 8,
        });
        assert!(err.to_string().contains("exit-survey"));
        assert!(err.to_string().contains("step 8"));
    }

    #[test]
    fn test_recoverability() {
        assert!(ProtocolError::from(InputError::EmptyHistory).is_recoverable());
        let malformed = ProtocolError::from(DocumentError::MissingKind {
            frame_id: "preview".to_string(),
        });
        assert!(!malformed.is_recoverable());
    }
}
