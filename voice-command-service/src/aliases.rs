//! Alias table: spoken phrases mapped to navigation routes and app actions.
//!
//! The table is built once at startup and shared read-only. Declaration
//! order is preserved because it decides ties between equally good matches.

use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fmt;
use std::str::FromStr;

use crate::error::{VoiceError, VoiceResult};

/// Prefix of symbolic action identifiers
pub const ACTION_PREFIX: &str = "action:";

/// Named application action
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum ActionName {
    SendMessage,
    ClearChat,
    PlayLastMessage,
    StopListening,
    SignOut,
    /// Declared in configuration but with no built-in behavior
    Other(String),
}

impl ActionName {
    pub fn as_str(&self) -> &str {
        match self {
            ActionName::SendMessage => "send_message",
            ActionName::ClearChat => "clear_chat",
            ActionName::PlayLastMessage => "play_last_message",
            ActionName::StopListening => "stop_listening",
            ActionName::SignOut => "sign_out",
            ActionName::Other(name) => name,
        }
    }
}

impl From<&str> for ActionName {
    fn from(name: &str) -> Self {
        match name {
            "send_message" => ActionName::SendMessage,
            "clear_chat" => ActionName::ClearChat,
            "play_last_message" => ActionName::PlayLastMessage,
            "stop_listening" => ActionName::StopListening,
            "sign_out" => ActionName::SignOut,
            other => ActionName::Other(other.to_string()),
        }
    }
}

/// Target of an alias: a route path (`/chatbot`) or an action (`action:sign_out`)
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum ActionId {
    Route(String),
    Action(ActionName),
}

impl ActionId {
    pub fn route(path: impl Into<String>) -> Self {
        ActionId::Route(path.into())
    }

    pub fn action(name: ActionName) -> Self {
        ActionId::Action(name)
    }

    pub fn is_route(&self) -> bool {
        matches!(self, ActionId::Route(_))
    }
}

impl FromStr for ActionId {
    type Err = VoiceError;

    fn from_str(s: &str) -> VoiceResult<Self> {
        let s = s.trim();
        if s.starts_with('/') {
            return Ok(ActionId::Route(s.to_string()));
        }
        match s.strip_prefix(ACTION_PREFIX) {
            Some(name) if !name.is_empty() => Ok(ActionId::Action(ActionName::from(name))),
            _ => Err(VoiceError::InvalidAction(format!(
                "'{s}' is neither a route path nor an '{ACTION_PREFIX}<name>' token"
            ))),
        }
    }
}

impl fmt::Display for ActionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ActionId::Route(path) => f.write_str(path),
            ActionId::Action(name) => write!(f, "{ACTION_PREFIX}{}", name.as_str()),
        }
    }
}

/// Configuration form of one alias group
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AliasEntry {
    pub action: String,
    pub phrases: Vec<String>,
}

impl AliasEntry {
    pub fn new(action: &str, phrases: &[&str]) -> Self {
        Self {
            action: action.to_string(),
            phrases: phrases.iter().map(|p| (*p).to_string()).collect(),
        }
    }
}

/// The command aliases shipped with the application
pub fn default_alias_entries() -> Vec<AliasEntry> {
    vec![
        // Navigation
        AliasEntry::new("/chatbot", &["chatbot", "chat bot", "open chatbot", "go to chatbot"]),
        AliasEntry::new("/", &["home", "go home", "go to home", "main page", "dashboard"]),
        AliasEntry::new(
            "/quick-checkup",
            &["quick checkup", "check up", "checkup", "go to quick checkup", "disease prediction"],
        ),
        AliasEntry::new(
            "/appointments",
            &["appointments", "my appointments", "show appointments", "go to appointments"],
        ),
        AliasEntry::new(
            "/health-metrics",
            &["health metrics", "metrics", "my health", "go to health metrics"],
        ),
        AliasEntry::new("/emergency", &["emergency", "emergency page", "go to emergency", "help"]),
        AliasEntry::new("/profile", &["profile", "my profile", "user profile", "go to profile"]),
        // Chat actions
        AliasEntry::new("action:send_message", &["send message", "send", "send it"]),
        AliasEntry::new("action:clear_chat", &["clear chat", "reset chat", "new chat"]),
        AliasEntry::new(
            "action:play_last_message",
            &["play message", "play the message", "play response", "read it to me", "play audio"],
        ),
        // Auth actions
        AliasEntry::new("action:sign_out", &["sign out", "log out", "logout"]),
        // Meta actions
        AliasEntry::new("action:stop_listening", &["stop listening", "stop", "cancel", "turn off"]),
    ]
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AliasGroup {
    pub action: ActionId,
    pub phrases: Vec<String>,
}

/// Immutable phrase → action mapping
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AliasTable {
    groups: Vec<AliasGroup>,
}

impl AliasTable {
    /// Build a table from ordered groups.
    ///
    /// Phrases are trimmed and lowercased.
    ///
    /// # Errors
    ///
    /// Rejects empty phrases, an action declared twice, and a phrase that
    /// appears more than once anywhere in the table.
    pub fn new(groups: Vec<(ActionId, Vec<String>)>) -> VoiceResult<Self> {
        let mut owners: HashMap<String, ActionId> = HashMap::new();
        let mut normalized = Vec::with_capacity(groups.len());

        for (action, phrases) in groups {
            if normalized.iter().any(|g: &AliasGroup| g.action == action) {
                return Err(VoiceError::InvalidAction(format!("{action} is declared twice")));
            }

            let mut cleaned = Vec::with_capacity(phrases.len());
            for phrase in phrases {
                let phrase = phrase.trim().to_lowercase();
                if phrase.is_empty() {
                    return Err(VoiceError::InvalidAction(format!("{action} has an empty alias")));
                }
                if let Some(first) = owners.get(&phrase) {
                    return Err(VoiceError::DuplicateAlias {
                        alias: phrase,
                        first: first.to_string(),
                        second: action.to_string(),
                    });
                }
                owners.insert(phrase.clone(), action.clone());
                cleaned.push(phrase);
            }

            normalized.push(AliasGroup { action, phrases: cleaned });
        }

        Ok(Self { groups: normalized })
    }

    /// Build from configuration entries, checking every route target
    /// against `routes`.
    ///
    /// # Errors
    ///
    /// Everything [`AliasTable::new`] rejects, plus malformed action
    /// identifiers and routes missing from `routes`.
    pub fn from_entries(entries: &[AliasEntry], routes: &[String]) -> VoiceResult<Self> {
        let groups = entries
            .iter()
            .map(|entry| {
                let action: ActionId = entry.action.parse()?;
                if let ActionId::Route(path) = &action {
                    if !routes.iter().any(|r| r == path) {
                        return Err(VoiceError::UnknownRoute(path.clone()));
                    }
                }
                Ok((action, entry.phrases.clone()))
            })
            .collect::<VoiceResult<Vec<_>>>()?;

        Self::new(groups)
    }

    pub fn groups(&self) -> &[AliasGroup] {
        &self.groups
    }

    /// Every `(action, phrase)` pair in declaration order
    pub fn iter(&self) -> impl Iterator<Item = (&ActionId, &str)> + '_ {
        self.groups
            .iter()
            .flat_map(|g| g.phrases.iter().map(move |p| (&g.action, p.as_str())))
    }

    /// Action owning `phrase`, if any
    pub fn action_for(&self, phrase: &str) -> Option<&ActionId> {
        let phrase = phrase.trim().to_lowercase();
        self.iter().find(|(_, p)| *p == phrase).map(|(action, _)| action)
    }

    /// Number of alias phrases
    pub fn len(&self) -> usize {
        self.groups.iter().map(|g| g.phrases.len()).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::navigation::default_routes;

    #[test]
    fn test_parse_action_ids() {
        assert_eq!("/chatbot".parse::<ActionId>().unwrap(), ActionId::route("/chatbot"));
        assert_eq!(
            "action:sign_out".parse::<ActionId>().unwrap(),
            ActionId::action(ActionName::SignOut)
        );
        assert_eq!(
            "action:open_camera".parse::<ActionId>().unwrap(),
            ActionId::action(ActionName::Other("open_camera".into()))
        );
        assert!("action:".parse::<ActionId>().is_err());
        assert!("chatbot".parse::<ActionId>().is_err());
    }

    #[test]
    fn test_display_round_trips_identifier() {
        for raw in ["/", "/health-metrics", "action:play_last_message"] {
            assert_eq!(raw.parse::<ActionId>().unwrap().to_string(), raw);
        }
    }

    #[test]
    fn test_default_table_is_valid() {
        let table = AliasTable::from_entries(&default_alias_entries(), &default_routes()).unwrap();
        assert_eq!(table.groups().len(), 12);
        assert_eq!(table.len(), 48);
        assert_eq!(table.action_for("Dashboard"), Some(&ActionId::route("/")));
        assert_eq!(
            table.action_for("cancel"),
            Some(&ActionId::action(ActionName::StopListening))
        );
        assert!(table.action_for("fever").is_none());
    }

    #[test]
    fn test_duplicate_alias_rejected() {
        let result = AliasTable::new(vec![
            (ActionId::route("/emergency"), vec!["help".into()]),
            (ActionId::route("/about"), vec!["Help ".into()]),
        ]);
        match result {
            Err(VoiceError::DuplicateAlias { alias, first, second }) => {
                assert_eq!(alias, "help");
                assert_eq!(first, "/emergency");
                assert_eq!(second, "/about");
            }
            other => panic!("expected duplicate alias error, got {other:?}"),
        }
    }

    #[test]
    fn test_repeated_action_rejected() {
        let result = AliasTable::new(vec![
            (ActionId::route("/"), vec!["home".into()]),
            (ActionId::route("/"), vec!["main page".into()]),
        ]);
        assert!(matches!(result, Err(VoiceError::InvalidAction(_))));
    }

    #[test]
    fn test_unregistered_route_rejected() {
        let entries = vec![AliasEntry::new("/lab-reports", &["lab reports"])];
        let result = AliasTable::from_entries(&entries, &default_routes());
        assert!(matches!(result, Err(VoiceError::UnknownRoute(path)) if path == "/lab-reports"));
    }

    #[test]
    fn test_phrases_are_normalized() {
        let table = AliasTable::new(vec![(
            ActionId::route("/profile"),
            vec!["  My Profile ".into()],
        )])
        .unwrap();
        assert_eq!(table.iter().next(), Some((&ActionId::route("/profile"), "my profile")));
    }
}
