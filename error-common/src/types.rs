use thiserror::Error;

use crate::codes;

/// Cross-crate error for CareVoice application boundaries
#[derive(Error, Debug)]
pub enum CareVoiceError {
    /// Invalid input or invalid static data (alias table, routes)
    #[error("Validation error: {0}")]
    Validation(String),

    /// Configuration could not be loaded or extracted
    #[error("Configuration error: {0}")]
    Configuration(String),

    /// Speech recognition or synthesis failures
    #[error("Voice error: {0}")]
    Voice(String),

    /// Router rejected a navigation
    #[error("Navigation error: {0}")]
    Navigation(String),

    /// Event bus failures
    #[error("Event bus error: {0}")]
    EventBus(String),

    /// Session storage failures
    #[error("Session error: {0}")]
    Session(String),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Internal error: {0}")]
    Internal(String),
}

impl CareVoiceError {
    /// Stable error code for this error
    pub fn code(&self) -> &'static str {
        match self {
            Self::Validation(_) => codes::validation::INVALID_INPUT,
            Self::Configuration(_) => codes::config::PARSE_FAILED,
            Self::Voice(_) => codes::voice::RECOGNITION_FAILED,
            Self::Navigation(_) => codes::voice::NAVIGATION_FAILED,
            Self::EventBus(_) => codes::bus::PUBLISH_FAILED,
            Self::Session(_) => codes::session::STORAGE_FAILED,
            Self::Io(_) => codes::system::IO_FAILED,
            Self::Internal(_) => codes::system::INTERNAL,
        }
    }

    /// Short subsystem name, used as a structured log field
    pub fn error_type(&self) -> &'static str {
        match self {
            Self::Validation(_) => "validation",
            Self::Configuration(_) => "configuration",
            Self::Voice(_) => "voice",
            Self::Navigation(_) => "navigation",
            Self::EventBus(_) => "event_bus",
            Self::Session(_) => "session",
            Self::Io(_) => "io",
            Self::Internal(_) => "internal",
        }
    }
}

/// Result type alias for CareVoice operations
pub type Result<T> = std::result::Result<T, CareVoiceError>;
