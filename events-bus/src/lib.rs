//! In-process event bus for CareVoice
//!
//! Sibling UI components (the chat panel, the audio player) react to voice
//! commands without holding a reference to the component that resolved
//! them. The application shell owns one [`EventBus`] and hands clones of it
//! to publishers and listeners.
//!
//! # Channels
//!
//! - **`voice-command-chat`**: `{ action: send_message | clear_chat | send_text, text? }`
//! - **`voice-command-audio`**: `{ action: play_last_message }`
//!
//! Publishing never fails: an event with no listener is dropped and logged
//! at debug level. Slow listeners that fall more than the channel capacity
//! behind skip the overflowed events and keep receiving.
//!
//! # Example
//!
//! ```rust
//! use events_bus::{Channel, ChatAction, EventBus, EventPayload};
//!
//! let bus = EventBus::new();
//! let mut chat = bus.subscribe(Channel::VoiceCommandChat);
//!
//! bus.publish(EventPayload::chat(ChatAction::SendText, Some("i have a fever".to_string())));
//!
//! let event = chat.try_recv().unwrap().unwrap();
//! assert_eq!(event.channel, Channel::VoiceCommandChat);
//! ```

pub mod bus;
pub mod error;
pub mod event;
pub mod handlers;
pub mod subscriber;

pub use bus::*;
pub use error::*;
pub use event::*;
pub use handlers::*;
pub use subscriber::*;
