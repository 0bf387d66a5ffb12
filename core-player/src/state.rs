//! Player phases and derived playback snapshots.
//!
//! The phase enum carries the current track inside every non-idle variant,
//! so "which track" and "what is it doing" can never disagree. Transport
//! facts (position, duration) are not stored in the phase; they are derived
//! fresh from the latest media status each time a view asks.

use bridge_traits::MediaStatus;
use serde::{Deserialize, Serialize};

use crate::track::TrackMeta;

/// What the player is currently doing.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "phase")]
pub enum PlayerPhase {
    /// Nothing selected since startup.
    Idle,
    /// A track was selected and the media resource is loading it.
    Loading { track: TrackMeta },
    /// The media resource has the track loaded.
    Ready { track: TrackMeta, playing: bool },
    /// The most recent load or playback attempt failed.
    Failed { track: TrackMeta, message: String },
}

impl PlayerPhase {
    /// The track occupying the player, in any non-idle phase.
    pub fn track(&self) -> Option<&TrackMeta> {
        match self {
            PlayerPhase::Idle => None,
            PlayerPhase::Loading { track }
            | PlayerPhase::Ready { track, .. }
            | PlayerPhase::Failed { track, .. } => Some(track),
        }
    }

    pub fn is_loading(&self) -> bool {
        matches!(self, PlayerPhase::Loading { .. })
    }

    pub fn is_ready(&self) -> bool {
        matches!(self, PlayerPhase::Ready { .. })
    }

    pub fn is_failed(&self) -> bool {
        matches!(self, PlayerPhase::Failed { .. })
    }
}

/// Transport facts derived from the latest media status.
///
/// Recomputed from scratch on every status; nothing here is accumulated.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct PlaybackSnapshot {
    pub is_playing: bool,
    pub position_ms: u64,
    pub duration_ms: u64,
    /// Fraction of the track elapsed, clamped to `[0.0, 1.0]`.
    /// Zero while the duration is unknown.
    pub progress: f64,
}

impl PlaybackSnapshot {
    pub fn from_status(status: &MediaStatus) -> Self {
        Self {
            is_playing: status.is_playing,
            position_ms: status.position_ms,
            duration_ms: status.duration_ms,
            progress: derive_progress(status.position_ms, status.duration_ms),
        }
    }
}

fn derive_progress(position_ms: u64, duration_ms: u64) -> f64 {
    if duration_ms == 0 {
        return 0.0;
    }
    (position_ms as f64 / duration_ms as f64).clamp(0.0, 1.0)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn phase_exposes_track_in_every_non_idle_variant() {
        let track = TrackMeta::new("t-1", "Flume", "https://cdn/a.mp3");

        assert!(PlayerPhase::Idle.track().is_none());
        assert_eq!(
            PlayerPhase::Loading {
                track: track.clone()
            }
            .track()
            .map(|t| t.id.as_str()),
            Some("t-1")
        );
        assert_eq!(
            PlayerPhase::Ready {
                track: track.clone(),
                playing: true
            }
            .track()
            .map(|t| t.id.as_str()),
            Some("t-1")
        );
        assert_eq!(
            PlayerPhase::Failed {
                track,
                message: "boom".to_string()
            }
            .track()
            .map(|t| t.id.as_str()),
            Some("t-1")
        );
    }

    #[test]
    fn progress_is_zero_without_duration() {
        assert_eq!(derive_progress(5_000, 0), 0.0);
        assert_eq!(derive_progress(0, 0), 0.0);
    }

    #[test]
    fn progress_is_clamped() {
        assert_eq!(derive_progress(200_000, 100_000), 1.0);
        assert_eq!(derive_progress(50_000, 100_000), 0.5);
    }

    #[test]
    fn snapshot_derives_from_status() {
        let status = MediaStatus {
            is_loaded: true,
            is_playing: true,
            position_ms: 30_000,
            duration_ms: 120_000,
            error: None,
        };
        let snapshot = PlaybackSnapshot::from_status(&status);
        assert!(snapshot.is_playing);
        assert_eq!(snapshot.position_ms, 30_000);
        assert_eq!(snapshot.duration_ms, 120_000);
        assert_eq!(snapshot.progress, 0.25);
    }

    #[test]
    fn default_snapshot_is_empty() {
        let snapshot = PlaybackSnapshot::default();
        assert!(!snapshot.is_playing);
        assert_eq!(snapshot.progress, 0.0);
    }
}
