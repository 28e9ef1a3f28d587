// Configuration sources: files and environment

use std::path::{Path, PathBuf};

use directories::ProjectDirs;
use figment::{
    providers::{Env, Format, Json, Toml, Yaml},
    Figment,
};

use crate::error::{ConfigError, Result};

/// Separator between nesting levels in environment variable names
pub const ENV_NESTING_SEPARATOR: &str = "__";

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConfigSource {
    /// A file that must exist
    File(PathBuf),
    /// A file that is skipped when absent
    OptionalFile(PathBuf),
    /// Environment variables starting with `prefix`
    Env { prefix: String },
}

impl ConfigSource {
    pub fn file(path: impl Into<PathBuf>) -> Self {
        ConfigSource::File(path.into())
    }

    pub fn optional_file(path: impl Into<PathBuf>) -> Self {
        ConfigSource::OptionalFile(path.into())
    }

    pub fn env(prefix: impl Into<String>) -> Self {
        ConfigSource::Env { prefix: prefix.into() }
    }

    /// Human-readable description for diagnostics
    pub fn describe(&self) -> String {
        match self {
            ConfigSource::File(path) | ConfigSource::OptionalFile(path) => {
                format!("file:{}", path.display())
            }
            ConfigSource::Env { prefix } => format!("env:{prefix}*"),
        }
    }

    /// Merge this source on top of `figment`
    pub(crate) fn merge_into(&self, figment: Figment) -> Result<Figment> {
        match self {
            ConfigSource::File(path) => {
                if !path.exists() {
                    return Err(ConfigError::SourceNotFound(path.clone()));
                }
                merge_file(figment, path)
            }
            ConfigSource::OptionalFile(path) => {
                if path.exists() {
                    merge_file(figment, path)
                } else {
                    tracing::debug!(path = %path.display(), "optional configuration file absent");
                    Ok(figment)
                }
            }
            ConfigSource::Env { prefix } => {
                Ok(figment.merge(Env::prefixed(prefix).split(ENV_NESTING_SEPARATOR)))
            }
        }
    }
}

fn merge_file(figment: Figment, path: &Path) -> Result<Figment> {
    let extension = path
        .extension()
        .and_then(|ext| ext.to_str())
        .map(str::to_ascii_lowercase)
        .unwrap_or_default();

    match extension.as_str() {
        "yaml" | "yml" => Ok(figment.merge(Yaml::file(path))),
        "toml" => Ok(figment.merge(Toml::file(path))),
        "json" => Ok(figment.merge(Json::file(path))),
        other => Err(ConfigError::UnsupportedFormat(format!(
            "'{other}' ({})",
            path.display()
        ))),
    }
}

/// Platform configuration file location for `application`
/// (e.g. `~/.config/carevoice/config.yaml` on Linux)
pub fn default_config_path(application: &str) -> Option<PathBuf> {
    ProjectDirs::from("dev", "carevoice", application)
        .map(|dirs| dirs.config_dir().join("config.yaml"))
}
