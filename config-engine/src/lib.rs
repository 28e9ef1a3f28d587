//! Layered configuration loading for CareVoice
//!
//! Configuration is assembled from ordered sources, later sources
//! overriding earlier ones:
//!
//! 1. **Defaults**: a serialized value supplied by the caller
//! 2. **Files**: YAML, TOML, or JSON, chosen by extension
//! 3. **Environment**: prefixed variables, `__` separating nested keys
//!
//! The merged result is extracted into a typed struct and checked with its
//! [`Validate`] implementation before it is handed out.
//!
//! # Example
//!
//! ```rust,no_run
//! use config_engine::{ConfigEngine, ConfigSource, Validate};
//! use serde::{Deserialize, Serialize};
//!
//! #[derive(Debug, Default, Serialize, Deserialize)]
//! struct AppConfig {
//!     similarity_threshold: f64,
//! }
//!
//! impl Validate for AppConfig {
//!     fn validate(&self) -> config_engine::Result<()> {
//!         config_engine::ensure(
//!             (0.0..=1.0).contains(&self.similarity_threshold),
//!             "similarity_threshold must be within [0, 1]",
//!         )
//!     }
//! }
//!
//! # fn main() -> config_engine::Result<()> {
//! let config: AppConfig = ConfigEngine::new()
//!     .with_defaults(&AppConfig::default())
//!     .add_source(ConfigSource::optional_file("carevoice.yaml"))
//!     .add_source(ConfigSource::env("CAREVOICE_"))
//!     .extract()?;
//! # Ok(())
//! # }
//! ```

pub mod engine;
pub mod error;
pub mod providers;
pub mod validation;

pub use engine::*;
pub use error::*;
pub use providers::*;
pub use validation::*;
