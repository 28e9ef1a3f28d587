// Validation run after a configuration is extracted

use crate::error::{ConfigError, Result};

pub trait Validate {
    /// # Errors
    ///
    /// Returns `ConfigError::ValidationError` describing the first violated rule.
    fn validate(&self) -> Result<()>;
}

/// Fail with `message` unless `condition` holds
pub fn ensure(condition: bool, message: impl Into<String>) -> Result<()> {
    if condition {
        Ok(())
    } else {
        Err(ConfigError::ValidationError(message.into()))
    }
}
