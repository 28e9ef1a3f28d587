use figment::{providers::Serialized, Figment};
use serde::{de::DeserializeOwned, Serialize};

use crate::error::Result;
use crate::providers::ConfigSource;
use crate::validation::Validate;

/// Ordered set of configuration sources
#[derive(Clone)]
pub struct ConfigEngine {
    base: Figment,
    sources: Vec<ConfigSource>,
}

impl Default for ConfigEngine {
    fn default() -> Self {
        Self::new()
    }
}

impl ConfigEngine {
    pub fn new() -> Self {
        Self {
            base: Figment::new(),
            sources: Vec::new(),
        }
    }

    /// Lowest-priority layer; every later source overrides it
    pub fn with_defaults<T: Serialize>(mut self, defaults: &T) -> Self {
        self.base = self.base.merge(Serialized::defaults(defaults));
        self
    }

    pub fn add_source(mut self, source: ConfigSource) -> Self {
        self.sources.push(source);
        self
    }

    pub fn sources(&self) -> &[ConfigSource] {
        &self.sources
    }

    /// Merge all sources in order
    ///
    /// # Errors
    ///
    /// Fails when a required file is missing or has an unknown extension.
    pub fn figment(&self) -> Result<Figment> {
        self.sources
            .iter()
            .try_fold(self.base.clone(), |figment, source| source.merge_into(figment))
    }

    /// Extract and validate a typed configuration
    ///
    /// # Errors
    ///
    /// Fails when merging fails, the merged data does not fit `T`, or
    /// `T::validate` rejects it.
    pub fn extract<T>(&self) -> Result<T>
    where
        T: DeserializeOwned + Validate,
    {
        let config: T = self.figment()?.extract()?;
        config.validate()?;

        tracing::debug!(
            sources = ?self.sources.iter().map(ConfigSource::describe).collect::<Vec<_>>(),
            "configuration loaded"
        );
        Ok(config)
    }
}

/// Render a configuration value as YAML
///
/// # Errors
///
/// Fails when `value` cannot be represented in YAML.
pub fn render_yaml<T: Serialize>(value: &T) -> Result<String> {
    Ok(serde_yaml::to_string(value)?)
}
