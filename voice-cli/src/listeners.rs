// Console stand-ins for the chat panel and audio player components

use colored::Colorize;
use events_bus::{AudioAction, ChatAction, Event, EventHandler, EventPayload};

/// Prints what the chat panel would do with voice commands
#[derive(Debug, Default)]
pub struct ConsoleChatPanel {
    lines: Vec<String>,
    sent: usize,
}

impl ConsoleChatPanel {
    pub fn new() -> Self {
        Self::default()
    }

    /// Messages forwarded to the assistant so far
    pub fn sent(&self) -> usize {
        self.sent
    }

    /// Output produced since the last call
    pub fn take_lines(&mut self) -> Vec<String> {
        std::mem::take(&mut self.lines)
    }
}

impl EventHandler for ConsoleChatPanel {
    fn handle_event(&mut self, event: &Event) -> events_bus::Result<()> {
        let EventPayload::Chat(command) = &event.payload else {
            return Ok(());
        };
        let line = match command.action {
            ChatAction::SendText => {
                self.sent += 1;
                format!(
                    "{} {}",
                    "[chat] assistant <-".cyan(),
                    command.text.as_deref().unwrap_or_default()
                )
            }
            ChatAction::SendMessage => format!("{}", "[chat] draft sent".cyan()),
            ChatAction::ClearChat => format!("{}", "[chat] conversation cleared".cyan()),
        };
        self.lines.push(line);
        Ok(())
    }
}

/// Prints what the audio player would do with voice commands
#[derive(Debug, Default)]
pub struct ConsoleAudioPlayer {
    lines: Vec<String>,
}

impl ConsoleAudioPlayer {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn take_lines(&mut self) -> Vec<String> {
        std::mem::take(&mut self.lines)
    }
}

impl EventHandler for ConsoleAudioPlayer {
    fn handle_event(&mut self, event: &Event) -> events_bus::Result<()> {
        if let EventPayload::Audio(command) = &event.payload {
            match command.action {
                AudioAction::PlayLastMessage => {
                    self.lines.push(format!("{}", "[audio] replaying last assistant message".magenta()));
                }
            }
        }
        Ok(())
    }
}
