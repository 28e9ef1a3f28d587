//! Voice capture lifecycle.
//!
//! ```text
//! Disabled --enable--> Idle --start--> Listening
//!    ^                  ^                  |
//!    |                  +--end/stop/error--+
//!    +------------disable (stops first)----+
//! ```

use serde::{Deserialize, Serialize};
use tracing::{debug, info, warn};

use crate::error::{VoiceError, VoiceResult};
use crate::speech::{RecognitionSettings, SpeechRecognizer};

pub const RECOGNITION_ERROR_FEEDBACK: &str = "An error occurred with voice recognition.";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CaptureState {
    Disabled,
    Idle,
    Listening,
}

impl CaptureState {
    pub fn is_enabled(self) -> bool {
        !matches!(self, CaptureState::Disabled)
    }

    pub fn is_listening(self) -> bool {
        matches!(self, CaptureState::Listening)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TranscriptSegment {
    pub text: String,
    pub is_final: bool,
}

impl TranscriptSegment {
    pub fn final_text(text: impl Into<String>) -> Self {
        Self { text: text.into(), is_final: true }
    }

    pub fn interim(text: impl Into<String>) -> Self {
        Self { text: text.into(), is_final: false }
    }
}

/// One recognizer result event. Segments before `result_index` were already
/// delivered by earlier events.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct RecognitionResult {
    pub result_index: usize,
    pub segments: Vec<TranscriptSegment>,
}

impl RecognitionResult {
    pub fn new(result_index: usize, segments: Vec<TranscriptSegment>) -> Self {
        Self { result_index, segments }
    }

    /// Concatenated `(final, interim)` text of the new segments
    pub fn split(&self) -> (String, String) {
        self.segments.iter().skip(self.result_index).fold(
            (String::new(), String::new()),
            |(mut finals, mut interims), segment| {
                if segment.is_final {
                    finals.push_str(&segment.text);
                } else {
                    interims.push_str(&segment.text);
                }
                (finals, interims)
            },
        )
    }
}

/// Recognizer error codes
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RecognitionError {
    NoSpeech,
    Aborted,
    AudioCapture,
    Network,
    NotAllowed,
    ServiceNotAllowed,
    LanguageNotSupported,
    Other(String),
}

impl RecognitionError {
    pub fn code(&self) -> &str {
        match self {
            RecognitionError::NoSpeech => "no-speech",
            RecognitionError::Aborted => "aborted",
            RecognitionError::AudioCapture => "audio-capture",
            RecognitionError::Network => "network",
            RecognitionError::NotAllowed => "not-allowed",
            RecognitionError::ServiceNotAllowed => "service-not-allowed",
            RecognitionError::LanguageNotSupported => "language-not-supported",
            RecognitionError::Other(code) => code,
        }
    }

    /// Silence timeouts reset the state without telling the user
    pub fn is_silent(&self) -> bool {
        matches!(self, RecognitionError::NoSpeech)
    }
}

impl From<&str> for RecognitionError {
    fn from(code: &str) -> Self {
        match code {
            "no-speech" => RecognitionError::NoSpeech,
            "aborted" => RecognitionError::Aborted,
            "audio-capture" => RecognitionError::AudioCapture,
            "network" => RecognitionError::Network,
            "not-allowed" => RecognitionError::NotAllowed,
            "service-not-allowed" => RecognitionError::ServiceNotAllowed,
            "language-not-supported" => RecognitionError::LanguageNotSupported,
            other => RecognitionError::Other(other.to_string()),
        }
    }
}

impl std::fmt::Display for RecognitionError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.code())
    }
}

/// Owns the recognizer and the capture state machine
pub struct CaptureController {
    state: CaptureState,
    recognizer: Box<dyn SpeechRecognizer>,
    settings: RecognitionSettings,
    transcript: String,
}

impl CaptureController {
    pub fn new(recognizer: Box<dyn SpeechRecognizer>, settings: RecognitionSettings) -> Self {
        Self {
            state: CaptureState::Disabled,
            recognizer,
            settings,
            transcript: String::new(),
        }
    }

    pub fn state(&self) -> CaptureState {
        self.state
    }

    pub fn is_enabled(&self) -> bool {
        self.state.is_enabled()
    }

    pub fn is_listening(&self) -> bool {
        self.state.is_listening()
    }

    pub fn is_supported(&self) -> bool {
        self.recognizer.is_supported()
    }

    /// Latest transcript shown to the user: interim text if any, else final
    pub fn transcript(&self) -> &str {
        &self.transcript
    }

    pub fn enable(&mut self) {
        if self.state == CaptureState::Disabled {
            self.state = CaptureState::Idle;
            info!("voice control enabled");
        }
    }

    pub fn disable(&mut self) {
        self.stop();
        if self.state != CaptureState::Disabled {
            self.state = CaptureState::Disabled;
            info!("voice control disabled");
        }
    }

    /// Flip the control; returns whether it is now enabled
    pub fn toggle(&mut self) -> bool {
        if self.is_enabled() {
            self.disable();
        } else {
            self.enable();
        }
        self.is_enabled()
    }

    /// Start a recognition session. Returns `false` when nothing changed
    /// (already listening, or the control is disabled).
    ///
    /// # Errors
    ///
    /// `VoiceError::RecognitionUnsupported` without a recognizer, or the
    /// recognizer's own start failure. The state stays Idle.
    pub fn start(&mut self) -> VoiceResult<bool> {
        match self.state {
            CaptureState::Listening => return Ok(false),
            CaptureState::Disabled => {
                debug!("start ignored while voice control is disabled");
                return Ok(false);
            }
            CaptureState::Idle => {}
        }
        if !self.recognizer.is_supported() {
            return Err(VoiceError::RecognitionUnsupported);
        }

        self.recognizer.start(&self.settings)?;
        self.state = CaptureState::Listening;
        info!(language = %self.settings.language, "listening");
        Ok(true)
    }

    /// Stop listening. Safe to call in any state.
    pub fn stop(&mut self) -> bool {
        if self.state != CaptureState::Listening {
            return false;
        }
        self.recognizer.stop();
        self.state = CaptureState::Idle;
        info!("listening stopped");
        true
    }

    /// Recognizer reported end of input
    pub fn on_end(&mut self) {
        if self.state == CaptureState::Listening {
            self.state = CaptureState::Idle;
            debug!("recognition ended");
        }
    }

    /// Recognizer failure. Returns the feedback to surface, if any.
    pub fn on_error(&mut self, error: &RecognitionError) -> Option<&'static str> {
        if self.state == CaptureState::Listening {
            self.state = CaptureState::Idle;
        }
        if error.is_silent() {
            debug!(code = %error, "recognition timed out without speech");
            None
        } else {
            warn!(code = %error, "speech recognition error");
            Some(RECOGNITION_ERROR_FEEDBACK)
        }
    }

    /// Update the live transcript and return the finalized text to resolve.
    pub fn on_result(&mut self, result: &RecognitionResult) -> Option<String> {
        let (finals, interims) = result.split();
        self.transcript = if interims.is_empty() { finals.clone() } else { interims };

        let finals = finals.trim();
        (!finals.is_empty()).then(|| finals.to_string())
    }
}

impl std::fmt::Debug for CaptureController {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CaptureController")
            .field("state", &self.state)
            .field("settings", &self.settings)
            .field("transcript", &self.transcript)
            .finish_non_exhaustive()
    }
}
