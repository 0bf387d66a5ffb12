//! Read-side catalog contract.
//!
//! The catalog lives in the hosted backend; the core only consumes it.
//! Implementations translate these calls into backend queries and map rows
//! into the models in [`crate::models`]. Every method returns the joined
//! shapes list views need, so the UI never stitches relations itself.

use crate::error::Result;
use crate::models::{ArtistWithAlbums, TrackWithDetails};

/// Hosted catalog queries.
///
/// All methods are read-only. Failures come back as
/// [`CatalogError::Backend`](crate::error::CatalogError::Backend) with an
/// opaque message; callers surface them as a generic load error rather than
/// branching on the cause.
#[async_trait::async_trait]
pub trait CatalogService: Send + Sync {
    /// Lists every track with its artist and album joined in.
    async fn list_tracks(&self) -> Result<Vec<TrackWithDetails>>;

    /// Case-insensitive title search across all tracks.
    ///
    /// An empty query returns the full list, matching `list_tracks`.
    async fn search_tracks(&self, query: &str) -> Result<Vec<TrackWithDetails>>;

    /// Lists every artist with their albums grouped underneath.
    async fn list_artists_with_albums(&self) -> Result<Vec<ArtistWithAlbums>>;

    /// Lists the tracks of one album, joined with artist and album rows.
    async fn list_album_tracks(&self, album_id: &str) -> Result<Vec<TrackWithDetails>>;
}
