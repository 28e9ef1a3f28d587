use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Recent commands shown by default
pub const DEFAULT_DISPLAY_LIMIT: usize = 3;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CommandLogEntry {
    /// Normalized utterance
    pub text: String,
    pub timestamp: DateTime<Utc>,
}

/// Append-only log of processed utterances
#[derive(Debug, Clone, Default)]
pub struct CommandHistory {
    entries: Vec<CommandLogEntry>,
}

impl CommandHistory {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn record(&mut self, text: impl Into<String>, timestamp: DateTime<Utc>) {
        self.entries.push(CommandLogEntry {
            text: text.into(),
            timestamp,
        });
    }

    pub fn entries(&self) -> &[CommandLogEntry] {
        &self.entries
    }

    /// The last `limit` entries, oldest first
    pub fn recent(&self, limit: usize) -> &[CommandLogEntry] {
        let skip = self.entries.len().saturating_sub(limit);
        self.entries.get(skip..).unwrap_or_default()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_recent_keeps_order() {
        let mut history = CommandHistory::new();
        let now = Utc::now();
        for text in ["home", "profile", "stop", "help"] {
            history.record(text, now);
        }

        let recent: Vec<&str> = history.recent(DEFAULT_DISPLAY_LIMIT).iter().map(|e| e.text.as_str()).collect();
        assert_eq!(recent, vec!["profile", "stop", "help"]);
        assert_eq!(history.len(), 4);
    }

    #[test]
    fn test_recent_with_few_entries() {
        let mut history = CommandHistory::new();
        assert!(history.recent(3).is_empty());
        history.record("home", Utc::now());
        assert_eq!(history.recent(3).len(), 1);
        assert!(history.recent(0).is_empty());
    }
}
