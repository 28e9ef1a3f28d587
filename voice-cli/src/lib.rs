//! `carevoice` command-line front end
//!
//! Text invocation of the voice command service: resolve single utterances,
//! run an interactive shell where each line is treated as a finalized
//! transcript, and inspect the alias table and effective configuration.

pub mod commands;
pub mod listeners;

pub use listeners::*;
