//! Platform speech seams.
//!
//! Recognition and synthesis belong to the host (browser, OS service, cloud
//! provider). The service only drives them through these traits and receives
//! recognizer output through `VoiceCommandService::handle_recognition_*`.

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::error::{VoiceError, VoiceResult};

/// Parameters handed to the recognizer when listening starts
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RecognitionSettings {
    /// BCP 47 language tag
    pub language: String,
    /// Keep listening across pauses until stopped
    pub continuous: bool,
    /// Deliver non-final hypotheses for the live transcript
    pub interim_results: bool,
}

impl Default for RecognitionSettings {
    fn default() -> Self {
        Self {
            language: "en-US".to_string(),
            continuous: true,
            interim_results: true,
        }
    }
}

pub trait SpeechRecognizer: Send {
    fn is_supported(&self) -> bool;

    /// # Errors
    ///
    /// When the platform refuses to start a recognition session.
    fn start(&mut self, settings: &RecognitionSettings) -> VoiceResult<()>;

    fn stop(&mut self);
}

pub trait SpeechSynthesizer: Send {
    /// Speak `text` aloud, replacing anything still being spoken.
    ///
    /// # Errors
    ///
    /// When the platform synthesizer fails.
    fn speak(&mut self, text: &str) -> VoiceResult<()>;
}

/// Recognizer for platforms without speech recognition
#[derive(Debug, Default, Clone, Copy)]
pub struct UnsupportedRecognizer;

impl SpeechRecognizer for UnsupportedRecognizer {
    fn is_supported(&self) -> bool {
        false
    }

    fn start(&mut self, _settings: &RecognitionSettings) -> VoiceResult<()> {
        Err(VoiceError::RecognitionUnsupported)
    }

    fn stop(&mut self) {}
}

/// Synthesizer that only logs
#[derive(Debug, Default, Clone, Copy)]
pub struct SilentSynthesizer;

impl SpeechSynthesizer for SilentSynthesizer {
    fn speak(&mut self, text: &str) -> VoiceResult<()> {
        debug!(chars = text.chars().count(), "speech synthesis skipped");
        Ok(())
    }
}
