//! Playback coordination.
//!
//! `PlayerCoordinator` resolves UI intents (select a track, toggle
//! play/pause, seek) against an asynchronously loading media resource. The
//! host replaces the underlying media item on every load, so callbacks from
//! a superseded load must not be allowed to mutate state; each load gets a
//! fresh generation and the host echoes it back with every status report.
//!
//! The coordinator runs on one logical thread (the host UI loop). All
//! methods take `&mut self` and return nothing fallible: transport failures
//! from torn-down media items are absorbed here, logged, and never surface
//! to the UI.

use std::sync::Arc;

use bridge_traits::{BridgeError, LoadGeneration, MediaResource, MediaStatus};
use core_runtime::events::{CoreEvent, EventBus, PlayerEvent};
use tracing::{debug, info, trace, warn};

use crate::state::{PlaybackSnapshot, PlayerPhase};
use crate::track::TrackMeta;

pub struct PlayerCoordinator {
    media: Arc<dyn MediaResource>,
    events: EventBus,
    phase: PlayerPhase,
    generation: LoadGeneration,
    /// Set when a load should start playing the moment it completes.
    /// Holds the generation the autoplay belongs to; a newer load cancels it.
    pending_autoplay: Option<LoadGeneration>,
    last_status: Option<MediaStatus>,
    player_open: bool,
}

impl PlayerCoordinator {
    pub fn new(media: Arc<dyn MediaResource>, events: EventBus) -> Self {
        Self {
            media,
            events,
            phase: PlayerPhase::Idle,
            generation: LoadGeneration::initial(),
            pending_autoplay: None,
            last_status: None,
            player_open: false,
        }
    }

    // ------------------------------------------------------------------
    // Intents
    // ------------------------------------------------------------------

    /// Selects a track for playback.
    ///
    /// Starts a new load, supersedes any load still in flight, and arms
    /// autoplay for when this load completes. The player surface is not
    /// touched; opening and closing it is the UI's call.
    pub fn play_track(&mut self, track: TrackMeta) {
        self.generation = self.generation.next();
        self.pending_autoplay = Some(self.generation);
        self.last_status = None;

        info!(
            track_id = %track.id,
            generation = %self.generation,
            "Starting track load"
        );

        self.events
            .emit(CoreEvent::Player(PlayerEvent::TrackRequested {
                track_id: track.id.clone(),
                title: track.title.clone(),
            }))
            .ok();

        match self.media.attach(&track.audio_url, self.generation) {
            Ok(()) => {
                self.phase = PlayerPhase::Loading { track };
            }
            Err(err) => {
                warn!(track_id = %track.id, error = %err, "Track load failed to start");
                self.pending_autoplay = None;
                self.events
                    .emit(CoreEvent::Player(PlayerEvent::LoadFailed {
                        track_id: track.id.clone(),
                        message: err.to_string(),
                    }))
                    .ok();
                self.phase = PlayerPhase::Failed {
                    track,
                    message: err.to_string(),
                };
            }
        }
    }

    /// Toggles between playing and paused.
    ///
    /// Only meaningful once a track is loaded; ignored while idle, loading
    /// or failed. The playing flag flips only when the transport command
    /// succeeds, so a torn-down media item cannot desync the UI.
    pub fn toggle_play_pause(&mut self) {
        let PlayerPhase::Ready { track, playing } = &self.phase else {
            trace!("Ignoring play/pause toggle outside ready phase");
            return;
        };
        let track_id = track.id.clone();

        if *playing {
            if self.transport(|media| media.pause()) {
                self.set_playing(false);
                self.events
                    .emit(CoreEvent::Player(PlayerEvent::Paused { track_id }))
                    .ok();
            }
        } else if self.transport(|media| media.play()) {
            self.set_playing(true);
            self.events
                .emit(CoreEvent::Player(PlayerEvent::Resumed { track_id }))
                .ok();
        }
    }

    /// Seeks to a position in the current track.
    ///
    /// A no-op until a loaded status with a known duration has arrived.
    /// Positions are clamped to `[0, duration]`, so negative and past-end
    /// requests land on the track edges.
    pub fn seek_to(&mut self, position_ms: i64) {
        let Some(status) = self.last_status.as_ref() else {
            trace!("Ignoring seek before any media status");
            return;
        };
        if !status.is_loaded || status.duration_ms == 0 {
            trace!("Ignoring seek without a loaded duration");
            return;
        }

        let clamped = position_ms.clamp(0, status.duration_ms as i64) as u64;
        self.transport(|media| media.seek_to(clamped));
    }

    /// Opens the full player surface.
    pub fn open_player(&mut self) {
        self.player_open = true;
    }

    /// Closes the full player surface. Playback continues underneath.
    pub fn close_player(&mut self) {
        self.player_open = false;
    }

    // ------------------------------------------------------------------
    // Media status intake
    // ------------------------------------------------------------------

    /// Feeds a status report from the media resource.
    ///
    /// The host echoes the generation it was given at attach time; reports
    /// from superseded loads are discarded wholesale. At most one autoplay
    /// fires per load, on its first loaded status.
    pub fn on_media_status(&mut self, generation: LoadGeneration, status: MediaStatus) {
        if generation != self.generation {
            trace!(
                received = %generation,
                current = %self.generation,
                "Discarding stale media status"
            );
            return;
        }

        self.last_status = Some(status.clone());

        let Some(track) = self.phase.track().cloned() else {
            // A status for the current generation implies a load was
            // started, which implies a non-idle phase.
            debug!("Media status with no current track; ignoring");
            return;
        };

        if let Some(message) = status.error {
            warn!(track_id = %track.id, error = %message, "Media resource reported failure");
            self.pending_autoplay = None;
            self.events
                .emit(CoreEvent::Player(PlayerEvent::LoadFailed {
                    track_id: track.id.clone(),
                    message: message.clone(),
                }))
                .ok();
            self.phase = PlayerPhase::Failed { track, message };
            return;
        }

        if !status.is_loaded {
            return;
        }

        let playing = if self.pending_autoplay == Some(generation) {
            self.pending_autoplay = None;
            if self.transport(|media| media.play()) {
                debug!(track_id = %track.id, "Autoplay started");
                self.events
                    .emit(CoreEvent::Player(PlayerEvent::AutoplayStarted {
                        track_id: track.id.clone(),
                    }))
                    .ok();
                true
            } else {
                status.is_playing
            }
        } else {
            status.is_playing
        };

        self.phase = PlayerPhase::Ready { track, playing };
    }

    // ------------------------------------------------------------------
    // Views
    // ------------------------------------------------------------------

    pub fn phase(&self) -> &PlayerPhase {
        &self.phase
    }

    /// The track occupying the player, if any.
    pub fn current(&self) -> Option<&TrackMeta> {
        self.phase.track()
    }

    pub fn is_player_open(&self) -> bool {
        self.player_open
    }

    /// Whether the player intends to be playing.
    pub fn is_playing(&self) -> bool {
        matches!(self.phase, PlayerPhase::Ready { playing: true, .. })
    }

    /// Transport facts derived from the latest status of the current load.
    pub fn snapshot(&self) -> PlaybackSnapshot {
        self.last_status
            .as_ref()
            .map(PlaybackSnapshot::from_status)
            .unwrap_or_default()
    }

    pub fn position_ms(&self) -> u64 {
        self.snapshot().position_ms
    }

    pub fn duration_ms(&self) -> u64 {
        self.snapshot().duration_ms
    }

    /// Fraction of the track elapsed, clamped to `[0.0, 1.0]`.
    pub fn progress(&self) -> f64 {
        self.snapshot().progress
    }

    // ------------------------------------------------------------------

    /// Runs a transport command, absorbing failures.
    ///
    /// The host tears media items down when a new load replaces them, so a
    /// command can race a disposal. That race is expected and logged at
    /// trace; anything else gets a warning. Either way the command simply
    /// reports whether it took effect.
    fn transport<F>(&self, command: F) -> bool
    where
        F: FnOnce(&dyn MediaResource) -> bridge_traits::error::Result<()>,
    {
        match command(self.media.as_ref()) {
            Ok(()) => true,
            Err(BridgeError::Disposed(context)) => {
                trace!(context = %context, "Transport command raced media disposal");
                false
            }
            Err(err) => {
                warn!(error = %err, "Transport command failed");
                false
            }
        }
    }

    fn set_playing(&mut self, value: bool) {
        if let PlayerPhase::Ready { playing, .. } = &mut self.phase {
            *playing = value;
        }
    }
}

impl std::fmt::Debug for PlayerCoordinator {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PlayerCoordinator")
            .field("phase", &self.phase)
            .field("generation", &self.generation)
            .field("pending_autoplay", &self.pending_autoplay)
            .field("player_open", &self.player_open)
            .finish()
    }
}
