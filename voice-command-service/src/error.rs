use config_engine::ConfigError;
use error_common::{codes, CareVoiceError};
use events_bus::EventBusError;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum VoiceError {
    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Configuration loading failed: {0}")]
    ConfigLoad(#[from] ConfigError),

    #[error("Alias '{alias}' is declared for both {first} and {second}")]
    DuplicateAlias {
        alias: String,
        first: String,
        second: String,
    },

    #[error("Alias table targets unregistered route: {0}")]
    UnknownRoute(String),

    #[error("Invalid action identifier: {0}")]
    InvalidAction(String),

    #[error("Invalid hotkey: {0}")]
    InvalidHotkey(String),

    #[error("Speech recognition is not supported on this platform")]
    RecognitionUnsupported,

    #[error("Speech recognition error: {0}")]
    Recognition(String),

    #[error("Speech synthesis error: {0}")]
    Synthesis(String),

    #[error("Navigation error: {0}")]
    Navigation(String),

    #[error("Unknown role '{0}'")]
    InvalidRole(String),

    #[error("Session error: {0}")]
    Session(String),

    #[error("Event bus error: {0}")]
    EventBus(#[from] EventBusError),
}

impl VoiceError {
    /// Stable error code, shared with `error_common`
    pub fn code(&self) -> &'static str {
        match self {
            VoiceError::Config(_) => codes::config::SOURCE_INVALID,
            VoiceError::ConfigLoad(_) => codes::config::PARSE_FAILED,
            VoiceError::DuplicateAlias { .. } => codes::validation::DUPLICATE_ALIAS,
            VoiceError::UnknownRoute(_) => codes::validation::UNKNOWN_ROUTE,
            VoiceError::InvalidAction(_) | VoiceError::InvalidHotkey(_) => {
                codes::validation::INVALID_ACTION
            }
            VoiceError::RecognitionUnsupported => codes::voice::RECOGNITION_UNSUPPORTED,
            VoiceError::Recognition(_) => codes::voice::RECOGNITION_FAILED,
            VoiceError::Synthesis(_) => codes::voice::SYNTHESIS_FAILED,
            VoiceError::Navigation(_) => codes::voice::NAVIGATION_FAILED,
            VoiceError::InvalidRole(_) => codes::session::INVALID_ROLE,
            VoiceError::Session(_) => codes::session::STORAGE_FAILED,
            VoiceError::EventBus(EventBusError::SubscriptionClosed) => {
                codes::bus::SUBSCRIPTION_CLOSED
            }
            VoiceError::EventBus(_) => codes::bus::PUBLISH_FAILED,
        }
    }
}

impl From<VoiceError> for CareVoiceError {
    fn from(err: VoiceError) -> Self {
        let message = err.to_string();
        match err {
            VoiceError::Config(_) | VoiceError::ConfigLoad(_) => {
                CareVoiceError::Configuration(message)
            }
            VoiceError::DuplicateAlias { .. }
            | VoiceError::UnknownRoute(_)
            | VoiceError::InvalidAction(_)
            | VoiceError::InvalidHotkey(_) => CareVoiceError::Validation(message),
            VoiceError::RecognitionUnsupported
            | VoiceError::Recognition(_)
            | VoiceError::Synthesis(_) => CareVoiceError::Voice(message),
            VoiceError::Navigation(_) => CareVoiceError::Navigation(message),
            VoiceError::InvalidRole(_) | VoiceError::Session(_) => CareVoiceError::Session(message),
            VoiceError::EventBus(_) => CareVoiceError::EventBus(message),
        }
    }
}

pub type VoiceResult<T> = Result<T, VoiceError>;
