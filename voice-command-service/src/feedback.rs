use chrono::{DateTime, Duration, Utc};
use serde::Serialize;
use tracing::warn;

use crate::speech::SpeechSynthesizer;

pub const DEFAULT_FEEDBACK_DURATION_MS: u64 = 4000;

/// Transient toast message
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Feedback {
    pub message: String,
    pub shown_at: DateTime<Utc>,
    pub expires_at: DateTime<Utc>,
}

impl Feedback {
    pub fn is_visible_at(&self, now: DateTime<Utc>) -> bool {
        now < self.expires_at
    }
}

/// Shows response strings as a toast and optionally speaks them
pub struct FeedbackSurface {
    current: Option<Feedback>,
    duration: Duration,
    speech_enabled: bool,
    synthesizer: Box<dyn SpeechSynthesizer>,
}

impl FeedbackSurface {
    pub fn new(synthesizer: Box<dyn SpeechSynthesizer>, duration: Duration, speech_enabled: bool) -> Self {
        Self {
            current: None,
            duration,
            speech_enabled,
            synthesizer,
        }
    }

    /// Replace the toast with `message`, restarting its timer. A
    /// synthesizer failure is logged and the toast is shown anyway.
    pub fn surface(&mut self, message: impl Into<String>, now: DateTime<Utc>) -> &Feedback {
        let message = message.into();
        if self.speech_enabled {
            if let Err(err) = self.synthesizer.speak(&message) {
                warn!(error = %err, "speech feedback failed");
            }
        }

        let expires_at = now
            .checked_add_signed(self.duration)
            .unwrap_or(DateTime::<Utc>::MAX_UTC);
        self.current.insert(Feedback {
            message,
            shown_at: now,
            expires_at,
        })
    }

    /// The toast if it has not expired at `now`
    pub fn visible_at(&self, now: DateTime<Utc>) -> Option<&Feedback> {
        self.current.as_ref().filter(|f| f.is_visible_at(now))
    }

    /// Last surfaced feedback, expired or not
    pub fn current(&self) -> Option<&Feedback> {
        self.current.as_ref()
    }

    pub fn speech_enabled(&self) -> bool {
        self.speech_enabled
    }

    /// Returns the new setting
    pub fn toggle_speech(&mut self) -> bool {
        self.speech_enabled = !self.speech_enabled;
        self.speech_enabled
    }
}

impl std::fmt::Debug for FeedbackSurface {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("FeedbackSurface")
            .field("current", &self.current)
            .field("duration", &self.duration)
            .field("speech_enabled", &self.speech_enabled)
            .finish_non_exhaustive()
    }
}
