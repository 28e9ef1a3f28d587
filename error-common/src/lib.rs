//! Common error handling utilities for CareVoice
//!
//! Every crate in the workspace keeps its own `thiserror` enum for the
//! failures it knows about. This crate provides the shared pieces that sit
//! above those enums:
//!
//! - **`CareVoiceError`**: the cross-crate error returned at application
//!   boundaries (CLI, service facade)
//! - **Error codes**: stable string codes, grouped by subsystem
//! - **`ErrorContext`**: structured context attached to error log records
//! - **Reporting**: one structured `tracing` record per reported error
//!
//! # Example
//!
//! ```rust
//! use error_common::{CareVoiceError, ErrorContext, log_error_with_context};
//!
//! fn check_threshold(value: f64) -> error_common::Result<f64> {
//!     if !(0.0..=1.0).contains(&value) {
//!         return Err(CareVoiceError::Validation(format!(
//!             "similarity threshold {value} outside [0, 1]"
//!         )));
//!     }
//!     Ok(value)
//! }
//!
//! if let Err(err) = check_threshold(1.5) {
//!     let context = ErrorContext::new().with_component("config");
//!     log_error_with_context(&context, &err);
//!     assert_eq!(err.code(), error_common::codes::validation::INVALID_INPUT);
//! }
//! ```

pub mod codes;
pub mod context;
pub mod reporting;
pub mod types;

pub use context::*;
pub use reporting::*;
pub use types::*;
