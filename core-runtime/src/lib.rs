//! # Core Runtime Module
//!
//! Foundational runtime infrastructure for the Canta core:
//! - Logging and tracing setup, with forwarding to host log sinks
//! - Configuration management with fail-fast validation
//! - Typed event bus for decoupled UI consumers
//!
//! Every other core crate builds on the conventions established here: the
//! `tracing` macros for logging, `CoreConfig` for backend settings, and
//! `EventBus` for observing playback and library changes.

pub mod config;
pub mod error;
pub mod events;
pub mod logging;

pub use error::{Error, Result};
