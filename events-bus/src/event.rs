use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

pub const VOICE_COMMAND_CHAT: &str = "voice-command-chat";
pub const VOICE_COMMAND_AUDIO: &str = "voice-command-audio";

/// Named broadcast channel
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Channel {
    #[serde(rename = "voice-command-chat")]
    VoiceCommandChat,
    #[serde(rename = "voice-command-audio")]
    VoiceCommandAudio,
}

impl Channel {
    pub fn name(self) -> &'static str {
        match self {
            Channel::VoiceCommandChat => VOICE_COMMAND_CHAT,
            Channel::VoiceCommandAudio => VOICE_COMMAND_AUDIO,
        }
    }
}

impl std::fmt::Display for Channel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ChatAction {
    SendMessage,
    ClearChat,
    /// Free text for the conversational assistant
    SendText,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AudioAction {
    PlayLastMessage,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChatCommand {
    pub action: ChatAction,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub text: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AudioCommand {
    pub action: AudioAction,
}

/// Event body, serialized as the bare `{ action, text? }` object
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum EventPayload {
    Chat(ChatCommand),
    Audio(AudioCommand),
}

impl EventPayload {
    pub fn chat(action: ChatAction, text: Option<String>) -> Self {
        EventPayload::Chat(ChatCommand { action, text })
    }

    pub fn audio(action: AudioAction) -> Self {
        EventPayload::Audio(AudioCommand { action })
    }

    /// Channel the payload travels on
    pub fn channel(&self) -> Channel {
        match self {
            EventPayload::Chat(_) => Channel::VoiceCommandChat,
            EventPayload::Audio(_) => Channel::VoiceCommandAudio,
        }
    }
}

/// Envelope delivered to subscribers
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Event {
    pub id: Uuid,
    pub channel: Channel,
    pub payload: EventPayload,
    pub timestamp: DateTime<Utc>,
}

impl Event {
    pub fn new(payload: EventPayload) -> Self {
        Self {
            id: Uuid::new_v4(),
            channel: payload.channel(),
            payload,
            timestamp: Utc::now(),
        }
    }
}
