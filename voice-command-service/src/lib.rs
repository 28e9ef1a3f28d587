//! Voice command service for CareVoice
//!
//! Turns a spoken or typed utterance into one of three outcomes:
//!
//! - **Navigation** to a registered route (`"go to chatbot"` → `/chatbot`)
//! - **An application action** published on the [`events_bus`] or applied
//!   locally (`"send it"`, `"stop listening"`, `"sign out"`)
//! - **Free text** forwarded to the conversational assistant when nothing
//!   matches well enough
//!
//! Matching first looks for the longest alias contained in the utterance and
//! falls back to normalized Levenshtein similarity against every alias, with
//! a configurable threshold (0.6 by default).
//!
//! Speech recognition and synthesis are host facilities behind the
//! [`SpeechRecognizer`] and [`SpeechSynthesizer`] traits; text invocation
//! works without either.
//!
//! # Example
//!
//! ```rust
//! use events_bus::{Channel, EventBus};
//! use voice_command_service::{VoiceCommandConfig, VoiceCommandService};
//!
//! # fn main() -> voice_command_service::VoiceResult<()> {
//! let bus = EventBus::new();
//! let mut chat = bus.subscribe(Channel::VoiceCommandChat);
//! let mut service = VoiceCommandService::new(VoiceCommandConfig::default(), bus)?;
//!
//! let resolution = service.process_command("go to chat boat")?.expect("non-empty");
//! assert_eq!(resolution.response, "Navigating to chatbot.");
//!
//! service.process_command("I have a fever")?;
//! assert!(chat.try_recv()?.is_some());
//! # Ok(())
//! # }
//! ```

pub mod aliases;
pub mod capture;
pub mod config;
pub mod dispatch;
pub mod error;
pub mod feedback;
pub mod history;
pub mod hotkey;
pub mod navigation;
pub mod resolver;
pub mod service;
pub mod session;
pub mod similarity;
pub mod speech;

pub use aliases::*;
pub use capture::*;
pub use config::*;
pub use dispatch::*;
pub use error::*;
pub use feedback::*;
pub use history::*;
pub use hotkey::*;
pub use navigation::*;
pub use resolver::*;
pub use service::*;
pub use session::*;
pub use similarity::*;
pub use speech::*;
