use chrono::Duration;
use config_engine::{default_config_path, ensure, ConfigEngine, ConfigSource, Validate};
use logger_redacted::LoggerConfig;
use serde::{Deserialize, Serialize};
use std::path::Path;

use crate::aliases::{default_alias_entries, AliasEntry, AliasTable};
use crate::error::VoiceResult;
use crate::feedback::DEFAULT_FEEDBACK_DURATION_MS;
use crate::history::DEFAULT_DISPLAY_LIMIT;
use crate::hotkey::{Hotkey, DEFAULT_HOTKEY};
use crate::navigation::default_routes;
use crate::resolver::DEFAULT_SIMILARITY_THRESHOLD;
use crate::speech::RecognitionSettings;

/// Application name used for the platform config directory
pub const APPLICATION: &str = "carevoice";

/// Prefix of environment overrides, e.g. `CAREVOICE_SIMILARITY_THRESHOLD`
pub const ENV_PREFIX: &str = "CAREVOICE_";

const MAX_FEEDBACK_DURATION_MS: u64 = 60_000;

/// Voice command service configuration
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
#[serde(default)]
pub struct VoiceCommandConfig {
    /// Minimum fuzzy similarity for a command match
    pub similarity_threshold: f64,
    pub feedback_duration_ms: u64,
    pub speech_feedback_enabled: bool,
    pub recognition_language: String,
    pub continuous: bool,
    pub interim_results: bool,
    pub hotkey: String,
    pub history_display_limit: usize,
    /// Route shown after a voice sign-out
    pub sign_out_redirect: String,
    /// Routes registered with the router
    pub routes: Vec<String>,
    /// Ordered alias groups; order decides ties
    pub aliases: Vec<AliasEntry>,
    pub logging: LoggerConfig,
}

impl Default for VoiceCommandConfig {
    fn default() -> Self {
        Self {
            similarity_threshold: DEFAULT_SIMILARITY_THRESHOLD,
            feedback_duration_ms: DEFAULT_FEEDBACK_DURATION_MS,
            speech_feedback_enabled: true,
            recognition_language: "en-US".to_string(),
            continuous: true,
            interim_results: true,
            hotkey: DEFAULT_HOTKEY.to_string(),
            history_display_limit: DEFAULT_DISPLAY_LIMIT,
            sign_out_redirect: "/".to_string(),
            routes: default_routes(),
            aliases: default_alias_entries(),
            logging: LoggerConfig::default(),
        }
    }
}

impl Validate for VoiceCommandConfig {
    fn validate(&self) -> config_engine::Result<()> {
        ensure(
            (0.0..=1.0).contains(&self.similarity_threshold),
            format!("similarity_threshold {} must be within [0, 1]", self.similarity_threshold),
        )?;
        ensure(
            (1..=MAX_FEEDBACK_DURATION_MS).contains(&self.feedback_duration_ms),
            format!("feedback_duration_ms must be within 1..={MAX_FEEDBACK_DURATION_MS}"),
        )?;
        ensure(!self.recognition_language.trim().is_empty(), "recognition_language is empty")?;
        ensure(
            self.hotkey.parse::<Hotkey>().is_ok(),
            format!("hotkey '{}' is not a valid binding", self.hotkey),
        )?;
        ensure(
            self.routes.iter().all(|r| r.starts_with('/')),
            "every route must start with '/'",
        )?;
        ensure(
            self.routes.contains(&self.sign_out_redirect),
            format!("sign_out_redirect '{}' is not a registered route", self.sign_out_redirect),
        )
    }
}

impl VoiceCommandConfig {
    /// Defaults, then `path` (or the platform config file if it exists),
    /// then `CAREVOICE_*` environment variables.
    ///
    /// # Errors
    ///
    /// Missing explicit file, unparsable sources, or failed validation.
    pub fn load(path: Option<&Path>) -> VoiceResult<Self> {
        let mut engine = ConfigEngine::new().with_defaults(&Self::default());
        match path {
            Some(path) => engine = engine.add_source(ConfigSource::file(path)),
            None => {
                if let Some(path) = default_config_path(APPLICATION) {
                    engine = engine.add_source(ConfigSource::optional_file(path));
                }
            }
        }
        let config = engine.add_source(ConfigSource::env(ENV_PREFIX)).extract()?;
        Ok(config)
    }

    /// Defaults overridden by environment variables only
    ///
    /// # Errors
    ///
    /// Unparsable variables or failed validation.
    pub fn from_env() -> VoiceResult<Self> {
        let config = ConfigEngine::new()
            .with_defaults(&Self::default())
            .add_source(ConfigSource::env(ENV_PREFIX))
            .extract()?;
        Ok(config)
    }

    /// # Errors
    ///
    /// Duplicate phrases, malformed action identifiers, or routes missing
    /// from `routes`.
    pub fn alias_table(&self) -> VoiceResult<AliasTable> {
        AliasTable::from_entries(&self.aliases, &self.routes)
    }

    pub fn recognition_settings(&self) -> RecognitionSettings {
        RecognitionSettings {
            language: self.recognition_language.clone(),
            continuous: self.continuous,
            interim_results: self.interim_results,
        }
    }

    pub fn feedback_duration(&self) -> Duration {
        Duration::milliseconds(i64::try_from(self.feedback_duration_ms).unwrap_or(i64::MAX))
    }
}
