//! Logging for CareVoice with PII redaction of spoken input
//!
//! Utterances are free text typed or dictated by patients, so they can carry
//! phone numbers, email addresses, dates of birth, or record numbers. This
//! crate installs the process-wide `tracing` subscriber and provides the
//! [`PiiRedactor`] that every utterance passes through before it is written
//! to a log record.
//!
//! # Detected data types
//!
//! - **Email addresses**: `john@example.com` → `[EMAIL]`
//! - **Phone numbers**: `555 123 4567`, `(555) 123-4567` → `[PHONE]`
//! - **SSN**: `123-45-6789` → `[SSN]`
//! - **Card numbers**: sixteen digits in groups of four → `[CARD]`
//! - **Dates**: `01/02/1990`, `1990-02-01` → `[DATE]`
//! - **Medical record numbers**: `MRN 123456` → `[MRN]`
//!
//! With `hash_for_correlation` the marker carries a short SHA-256 prefix so
//! repeated values can be correlated across records without exposing them.
//!
//! # Example
//!
//! ```rust
//! use logger_redacted::{LoggerConfig, PiiRedactor, redacted_info};
//!
//! let redactor = PiiRedactor::from_logger_config(&LoggerConfig::default());
//! redacted_info!(redactor, "call me on 555 123 4567", "utterance received");
//! assert_eq!(redactor.redact("call me on 555 123 4567"), "call me on [PHONE]");
//! ```

pub mod config;
pub mod macros;
pub mod redactor;

pub use config::*;
pub use redactor::*;

// Re-exported for the logging macros
pub use tracing;

use error_common::{CareVoiceError, Result};
use tracing_subscriber::{
    fmt::{self, time::ChronoUtc},
    layer::SubscriberExt,
    util::SubscriberInitExt,
    EnvFilter,
};

/// Install the global tracing subscriber.
///
/// `RUST_LOG` takes precedence over `config.level`. Log output goes to
/// stderr so stdout stays free for command output.
///
/// # Errors
///
/// Fails when the level directive cannot be parsed or a global subscriber
/// is already installed.
pub fn init_tracing(config: &LoggerConfig) -> Result<()> {
    let env_filter = match EnvFilter::try_from_default_env() {
        Ok(filter) => filter,
        Err(_) => EnvFilter::try_new(&config.level).map_err(|e| {
            CareVoiceError::Configuration(format!("invalid log level '{}': {e}", config.level))
        })?,
    };

    let registry = tracing_subscriber::registry().with(env_filter);

    let installed = match config.format {
        LogFormat::Pretty => registry
            .with(
                fmt::layer()
                    .with_writer(std::io::stderr)
                    .with_target(true)
                    .with_timer(ChronoUtc::rfc_3339()),
            )
            .try_init(),
        LogFormat::Json => registry
            .with(
                fmt::layer()
                    .json()
                    .with_writer(std::io::stderr)
                    .with_target(false)
                    .with_timer(ChronoUtc::rfc_3339()),
            )
            .try_init(),
    };

    installed.map_err(|e| CareVoiceError::Internal(format!("tracing already initialised: {e}")))
}
