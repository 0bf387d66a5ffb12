//! # Host Bridge Traits
//!
//! Platform capability contracts that must be implemented by each host
//! platform (iOS, Android, desktop shells used for development).
//!
//! ## Overview
//!
//! The core never talks to platform media or file APIs directly. Each trait
//! in this crate represents one capability the core requires but that must
//! be implemented differently per platform:
//!
//! - [`MediaResource`](media::MediaResource) — the platform audio player:
//!   asynchronous source loading, transport commands, and a generation-tagged
//!   status feed.
//! - [`CoverPicker`](files::CoverPicker) — OS image picking for playlist
//!   covers.
//! - [`LoggerSink`](log::LoggerSink) — forwarding structured logs to the
//!   host logging pipeline (OSLog, Logcat).
//!
//! ## Error handling
//!
//! All bridge traits use [`BridgeError`](error::BridgeError). Hosts should
//! convert platform-specific failures into the closest variant; the
//! [`BridgeError::Disposed`](error::BridgeError) variant exists specifically
//! for transport commands that race a source replacement, which callers are
//! expected to swallow.
//!
//! ## Thread safety
//!
//! All traits require `Send + Sync`: bridge handles are shared across the
//! core via `Arc<dyn …>`. [`MediaResource`](media::MediaResource) methods
//! additionally must be fast and non-blocking, since they are issued from
//! the UI event loop.

pub mod error;
pub mod files;
pub mod log;
pub mod media;

pub use error::BridgeError;

// Re-export commonly used types
pub use files::{infer_content_type, infer_file_name, CoverPicker, PickedCover};
pub use log::{ConsoleLogger, LogEntry, LogLevel, LoggerSink};
pub use media::{LoadGeneration, MediaResource, MediaStatus};
