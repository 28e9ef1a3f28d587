//! Command dispatch.
//!
//! Route commands go to the [`Navigator`]. Chat and audio actions are
//! published on the event bus for whichever panel is listening. Stopping
//! and signing out touch state the dispatcher does not own, so they come
//! back to the caller as a [`LocalEffect`].

use events_bus::{AudioAction, ChatAction, EventBus, EventPayload};
use tracing::debug;

use crate::error::VoiceResult;
use crate::navigation::Navigator;
use crate::resolver::{Resolution, ResolvedCommand};

/// Effect the dispatcher cannot perform itself; the owning service applies it
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LocalEffect {
    StopListening,
    SignOut,
}

/// Turns a [`Resolution`] into navigation or a bus event
pub struct CommandDispatcher {
    bus: EventBus,
    navigator: Box<dyn Navigator>,
}

impl CommandDispatcher {
    /// Create a dispatcher publishing on `bus`
    pub fn new(bus: EventBus, navigator: Box<dyn Navigator>) -> Self {
        Self { bus, navigator }
    }

    pub fn bus(&self) -> &EventBus {
        &self.bus
    }

    /// Navigate outside of a resolution (sign-out redirect)
    ///
    /// # Errors
    ///
    /// When the navigator rejects `path`.
    pub fn navigate(&mut self, path: &str) -> VoiceResult<()> {
        self.navigator.navigate(path)
    }

    /// Carry out a resolved command
    ///
    /// # Errors
    ///
    /// Only navigation can fail; publishing to a bus without listeners is not
    /// an error.
    pub fn dispatch(&mut self, resolution: &Resolution) -> VoiceResult<Option<LocalEffect>> {
        let payload = match &resolution.command {
            ResolvedCommand::Navigate { path } => {
                self.navigator.navigate(path)?;
                return Ok(None);
            }
            ResolvedCommand::StopListening => return Ok(Some(LocalEffect::StopListening)),
            ResolvedCommand::SignOut => return Ok(Some(LocalEffect::SignOut)),
            ResolvedCommand::SendMessage => {
                EventPayload::chat(ChatAction::SendMessage, Some(resolution.utterance.clone()))
            }
            ResolvedCommand::ClearChat => {
                EventPayload::chat(ChatAction::ClearChat, Some(resolution.utterance.clone()))
            }
            ResolvedCommand::PlayLastMessage => EventPayload::audio(AudioAction::PlayLastMessage),
            ResolvedCommand::FreeText => {
                EventPayload::chat(ChatAction::SendText, Some(resolution.utterance.clone()))
            }
        };

        let event = self.bus.publish(payload);
        debug!(event_id = %event.id, channel = %event.channel, "voice command published");
        Ok(None)
    }
}

impl std::fmt::Debug for CommandDispatcher {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CommandDispatcher")
            .field("bus", &self.bus)
            .finish_non_exhaustive()
    }
}
