//! Platform media resource contract.
//!
//! The host provides a single audio-player object per process. Loading a
//! source is asynchronous: [`MediaResource::attach`] only *requests* the
//! load, and the host later reports progress through status notifications
//! delivered to the core. Because the user can re-point the resource while
//! a load is still in flight, every `attach` carries a [`LoadGeneration`]
//! token, and the host must echo that token on each status notification it
//! emits for the resulting load. The core uses the token to discard stale
//! notifications; the host never needs to cancel anything.

use crate::error::Result;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Monotonically increasing counter identifying one `attach` request.
///
/// Process-local and never persisted. Allocated by the playback coordinator
/// on every source change; compared against the current value before any
/// asynchronous effect is applied. A mismatch is a normal race-loser
/// outcome, not an error.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct LoadGeneration(u64);

impl LoadGeneration {
    /// Initial value, before any source has been attached.
    pub const fn initial() -> Self {
        Self(0)
    }

    /// The next generation in sequence.
    pub const fn next(self) -> Self {
        Self(self.0 + 1)
    }

    /// Raw counter value, mainly for logging.
    pub const fn value(self) -> u64 {
        self.0
    }
}

impl fmt::Display for LoadGeneration {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// One status notification from the platform player.
///
/// The core never caches transport state across notifications; it derives
/// everything the UI sees from the most recent status, fresh each time.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct MediaStatus {
    /// The source finished loading and transport commands are meaningful.
    pub is_loaded: bool,
    /// Audio is currently audible (not paused, not still buffering).
    pub is_playing: bool,
    /// Playhead position in milliseconds.
    pub position_ms: u64,
    /// Total duration in milliseconds; `0` while unknown.
    pub duration_ms: u64,
    /// Set when the source could not be fetched or decoded.
    pub error: Option<String>,
}

impl MediaStatus {
    /// Status for a source that finished loading.
    pub fn loaded(position_ms: u64, duration_ms: u64) -> Self {
        Self {
            is_loaded: true,
            is_playing: false,
            position_ms,
            duration_ms,
            error: None,
        }
    }

    /// Status reporting a failed load.
    pub fn failed(message: impl Into<String>) -> Self {
        Self {
            error: Some(message.into()),
            ..Self::default()
        }
    }

    /// Builder-style playing flag.
    pub fn with_playing(mut self, playing: bool) -> Self {
        self.is_playing = playing;
        self
    }
}

/// Platform audio player handle.
///
/// Exclusively owned by the playback coordinator; no other component may
/// issue transport commands. All methods must return quickly — they are
/// called from the UI event loop. Implementations use interior mutability;
/// a command issued after the native object was replaced should fail with
/// [`BridgeError::Disposed`](crate::error::BridgeError), which the caller
/// swallows.
pub trait MediaResource: Send + Sync {
    /// (Re)point the resource at a new audio source, replacing any previous
    /// attachment. Completion is delivered later as status notifications
    /// tagged with `generation`.
    fn attach(&self, locator: &str, generation: LoadGeneration) -> Result<()>;

    /// Begin or resume playback of the attached source.
    fn play(&self) -> Result<()>;

    /// Pause playback, keeping the playhead position.
    fn pause(&self) -> Result<()>;

    /// Move the playhead to an absolute position.
    fn seek_to(&self, position_ms: u64) -> Result<()>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn generation_is_monotonic() {
        let g0 = LoadGeneration::initial();
        let g1 = g0.next();
        let g2 = g1.next();
        assert!(g0 < g1 && g1 < g2);
        assert_eq!(g2.value(), 2);
    }

    #[test]
    fn loaded_status_defaults_to_paused() {
        let status = MediaStatus::loaded(0, 180_000);
        assert!(status.is_loaded);
        assert!(!status.is_playing);
        assert_eq!(status.duration_ms, 180_000);
        assert!(status.error.is_none());

        let playing = MediaStatus::loaded(500, 180_000).with_playing(true);
        assert!(playing.is_playing);
    }

    #[test]
    fn failed_status_is_not_loaded() {
        let status = MediaStatus::failed("404 from storage");
        assert!(!status.is_loaded);
        assert_eq!(status.error.as_deref(), Some("404 from storage"));
    }
}
