//! Utterance → command resolution.
//!
//! Two passes over the alias table:
//!
//! 1. **Containment**: every alias contained in the utterance is a
//!    candidate; the longest wins, so "go to home" beats "home" and a
//!    generic phrase never shadows a precise one. Equal lengths keep the
//!    first declared.
//! 2. **Fuzzy**: only when nothing is contained. The alias with the highest
//!    normalized Levenshtein similarity wins if it reaches the threshold;
//!    otherwise the utterance is free text for the assistant.
//!
//! Resolution is pure: the same utterance against the same table always
//! yields the same [`Resolution`].

use std::sync::Arc;

use crate::aliases::{ActionId, ActionName, AliasTable};
use crate::error::{VoiceError, VoiceResult};
use crate::navigation::page_name;
use crate::similarity::similarity;

pub const DEFAULT_SIMILARITY_THRESHOLD: f64 = 0.6;

pub const STOP_LISTENING_RESPONSE: &str = "Turning off voice recognition.";
pub const PLAY_LAST_MESSAGE_RESPONSE: &str = "Playing last message.";
pub const SIGN_OUT_RESPONSE: &str = "Signing you out.";

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum MatchKind {
    /// Alias contained verbatim in the utterance
    Exact,
    /// Best similarity at or above the threshold
    Fuzzy { score: f64 },
}

#[derive(Debug, Clone, PartialEq)]
pub struct AliasMatch {
    pub action: ActionId,
    pub alias: String,
    pub kind: MatchKind,
}

/// What the dispatcher should do
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ResolvedCommand {
    Navigate { path: String },
    SendMessage,
    ClearChat,
    PlayLastMessage,
    StopListening,
    SignOut,
    /// Forward the utterance to the conversational assistant
    FreeText,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Resolution {
    /// Trimmed, lowercased utterance
    pub utterance: String,
    pub matched: Option<AliasMatch>,
    pub command: ResolvedCommand,
    pub response: String,
}

impl Resolution {
    /// Winning action identifier, `None` for unmatched free text
    pub fn action(&self) -> Option<&ActionId> {
        self.matched.as_ref().map(|m| &m.action)
    }
}

/// Maps utterances to actions from an alias table
#[derive(Debug, Clone)]
pub struct CommandResolver {
    table: Arc<AliasTable>,
    threshold: f64,
}

impl CommandResolver {
    /// Create a resolver with the default similarity threshold
    pub fn new(table: Arc<AliasTable>) -> Self {
        Self {
            table,
            threshold: DEFAULT_SIMILARITY_THRESHOLD,
        }
    }

    /// # Errors
    ///
    /// `VoiceError::Config` unless `threshold` is a number within `[0, 1]`.
    pub fn with_threshold(table: Arc<AliasTable>, threshold: f64) -> VoiceResult<Self> {
        if !(0.0..=1.0).contains(&threshold) {
            return Err(VoiceError::Config(format!(
                "similarity threshold {threshold} outside [0, 1]"
            )));
        }
        Ok(Self { table, threshold })
    }

    /// Alias table the resolver matches against
    pub fn table(&self) -> &AliasTable {
        &self.table
    }

    /// Minimum fuzzy similarity for a match
    pub fn threshold(&self) -> f64 {
        self.threshold
    }

    /// Trim and lowercase; the form aliases and history entries use
    pub fn normalize(utterance: &str) -> String {
        utterance.trim().to_lowercase()
    }

    /// Resolve an utterance; `None` when it is empty after trimming.
    pub fn resolve(&self, utterance: &str) -> Option<Resolution> {
        let utterance = Self::normalize(utterance);
        if utterance.is_empty() {
            return None;
        }

        let matched = self.find_match(&utterance);
        let command = matched
            .as_ref()
            .map_or(ResolvedCommand::FreeText, |m| command_for(&m.action));
        let response = response_for(&command, matched.as_ref().map(|m| &m.action), &utterance);

        Some(Resolution {
            utterance,
            matched,
            command,
            response,
        })
    }

    /// Best alias for an already normalized utterance
    pub fn find_match(&self, utterance: &str) -> Option<AliasMatch> {
        self.contained_match(utterance)
            .or_else(|| self.fuzzy_match(utterance))
    }

    fn contained_match(&self, utterance: &str) -> Option<AliasMatch> {
        let mut best: Option<(&ActionId, &str)> = None;
        let mut best_len = 0;

        for (action, alias) in self.table.iter() {
            let len = alias.chars().count();
            if len > best_len && utterance.contains(alias) {
                best_len = len;
                best = Some((action, alias));
            }
        }

        best.map(|(action, alias)| AliasMatch {
            action: action.clone(),
            alias: alias.to_string(),
            kind: MatchKind::Exact,
        })
    }

    fn fuzzy_match(&self, utterance: &str) -> Option<AliasMatch> {
        let mut best: Option<(&ActionId, &str)> = None;
        let mut best_score = 0.0;

        for (action, alias) in self.table.iter() {
            let score = similarity(utterance, alias);
            if score > best_score {
                best_score = score;
                best = Some((action, alias));
            }
        }

        if best_score < self.threshold {
            return None;
        }

        best.map(|(action, alias)| AliasMatch {
            action: action.clone(),
            alias: alias.to_string(),
            kind: MatchKind::Fuzzy { score: best_score },
        })
    }
}

fn command_for(action: &ActionId) -> ResolvedCommand {
    match action {
        ActionId::Route(path) => ResolvedCommand::Navigate { path: path.clone() },
        ActionId::Action(name) => match name {
            ActionName::SendMessage => ResolvedCommand::SendMessage,
            ActionName::ClearChat => ResolvedCommand::ClearChat,
            ActionName::PlayLastMessage => ResolvedCommand::PlayLastMessage,
            ActionName::StopListening => ResolvedCommand::StopListening,
            ActionName::SignOut => ResolvedCommand::SignOut,
            ActionName::Other(_) => ResolvedCommand::FreeText,
        },
    }
}

fn response_for(command: &ResolvedCommand, action: Option<&ActionId>, utterance: &str) -> String {
    match command {
        ResolvedCommand::Navigate { path } => format!("Navigating to {}.", page_name(path)),
        ResolvedCommand::SendMessage | ResolvedCommand::ClearChat => {
            let name = match action {
                Some(ActionId::Action(name)) => name.as_str(),
                _ => "",
            };
            format!("Action acknowledged: {}.", name.replacen('_', " ", 1))
        }
        ResolvedCommand::PlayLastMessage => PLAY_LAST_MESSAGE_RESPONSE.to_string(),
        ResolvedCommand::StopListening => STOP_LISTENING_RESPONSE.to_string(),
        ResolvedCommand::SignOut => SIGN_OUT_RESPONSE.to_string(),
        ResolvedCommand::FreeText => format!("Sending \"{utterance}\" to the chatbot."),
    }
}
