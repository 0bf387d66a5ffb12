//! # Core Player Module
//!
//! The playback-state coordinator: resolves UI intents against an
//! asynchronously loading platform media resource.
//!
//! - [`TrackMeta`] — a track resolved into displayable strings and URLs
//! - [`PlayerPhase`] — idle / loading / ready / failed, track carried inside
//! - [`PlaybackSnapshot`] — transport facts derived from the latest status
//! - [`PlayerCoordinator`] — generation-guarded intent resolution
//!
//! The coordinator is a plain struct driven from the host UI loop; it holds
//! no locks and spawns no tasks. Asynchrony enters only through
//! [`PlayerCoordinator::on_media_status`], which the host calls with the
//! generation token it was handed at attach time.

pub mod coordinator;
pub mod state;
pub mod testing;
pub mod track;

pub use coordinator::PlayerCoordinator;
pub use state::{PlaybackSnapshot, PlayerPhase};
pub use track::TrackMeta;
