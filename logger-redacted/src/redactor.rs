use base64::{engine::general_purpose, Engine as _};
use lazy_static::lazy_static;
use regex::Regex;
use sha2::{Digest, Sha256};

use crate::config::LoggerConfig;

/// Kind of personal data recognised in an utterance
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PiiKind {
    Email,
    CardNumber,
    Ssn,
    Date,
    Phone,
    MedicalRecord,
}

impl PiiKind {
    /// Application order. Longer digit runs go first so a card number is
    /// never partially consumed as a phone number.
    pub const ALL: [PiiKind; 6] = [
        PiiKind::Email,
        PiiKind::CardNumber,
        PiiKind::Ssn,
        PiiKind::Date,
        PiiKind::Phone,
        PiiKind::MedicalRecord,
    ];

    pub fn label(self) -> &'static str {
        match self {
            PiiKind::Email => "EMAIL",
            PiiKind::CardNumber => "CARD",
            PiiKind::Ssn => "SSN",
            PiiKind::Date => "DATE",
            PiiKind::Phone => "PHONE",
            PiiKind::MedicalRecord => "MRN",
        }
    }

    fn pattern(self) -> &'static str {
        match self {
            PiiKind::Email => r"\b[A-Za-z0-9._%+-]+@[A-Za-z0-9.-]+\.[A-Za-z]{2,}\b",
            PiiKind::CardNumber => r"\b\d{4}[-\s]?\d{4}[-\s]?\d{4}[-\s]?\d{4}\b",
            PiiKind::Ssn => r"\b\d{3}-\d{2}-\d{4}\b",
            PiiKind::Date => r"\b(?:\d{1,2}[/-]\d{1,2}[/-]\d{2,4}|\d{4}-\d{2}-\d{2})\b",
            PiiKind::Phone => r"(?:\+?1[-.\s]?)?(?:\(\d{3}\)|\b\d{3})[-.\s]?\d{3}[-.\s]?\d{4}\b",
            PiiKind::MedicalRecord => r"(?i)\bmrn[\s:#-]*\d{4,}\b",
        }
    }
}

lazy_static! {
    static ref PATTERNS: Vec<(PiiKind, Regex)> = PiiKind::ALL
        .iter()
        .filter_map(|kind| Regex::new(kind.pattern()).ok().map(|re| (*kind, re)))
        .collect();
}

/// PII redaction configuration
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RedactionConfig {
    pub enabled: bool,
    pub hash_for_correlation: bool,
    pub kinds: Vec<PiiKind>,
}

impl Default for RedactionConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            hash_for_correlation: false,
            kinds: PiiKind::ALL.to_vec(),
        }
    }
}

impl From<&LoggerConfig> for RedactionConfig {
    fn from(config: &LoggerConfig) -> Self {
        Self {
            enabled: config.redact_utterances,
            hash_for_correlation: config.hash_for_correlation,
            ..Self::default()
        }
    }
}

/// Strips personal data from free text before it is logged
#[derive(Debug, Clone, Default)]
pub struct PiiRedactor {
    config: RedactionConfig,
}

impl PiiRedactor {
    pub fn new(config: RedactionConfig) -> Self {
        Self { config }
    }

    pub fn from_logger_config(config: &LoggerConfig) -> Self {
        Self::new(RedactionConfig::from(config))
    }

    pub fn is_enabled(&self) -> bool {
        self.config.enabled
    }

    pub fn redact(&self, text: &str) -> String {
        if !self.config.enabled {
            return text.to_string();
        }

        PATTERNS
            .iter()
            .filter(|(kind, _)| self.config.kinds.contains(kind))
            .fold(text.to_string(), |acc, (kind, re)| {
                re.replace_all(&acc, |caps: &regex::Captures| {
                    self.replacement(*kind, caps.get(0).map_or("", |m| m.as_str()))
                })
                    .into_owned()
            })
    }

    fn replacement(&self, kind: PiiKind, value: &str) -> String {
        if self.config.hash_for_correlation {
            format!("{}[{}]", kind.label(), hash_value(value))
        } else {
            format!("[{}]", kind.label())
        }
    }
}

fn hash_value(value: &str) -> String {
    let digest = Sha256::digest(value.as_bytes());
    let prefix = digest.as_slice().get(..8).unwrap_or(digest.as_slice());
    general_purpose::STANDARD.encode(prefix)
}
