//! Playlist contract.
//!
//! Playlists are per-user and mutable, unlike the read-only catalog.
//! Implementations handle the backend writes, including uploading a picked
//! cover image and recording its object key on the playlist row.

use crate::error::Result;
use crate::models::{NewPlaylist, Playlist, TrackWithDetails};

/// Per-user playlist queries and mutations.
#[async_trait::async_trait]
pub trait PlaylistService: Send + Sync {
    /// Lists the playlists owned by `user_id`, newest first.
    async fn list_playlists(&self, user_id: &str) -> Result<Vec<Playlist>>;

    /// Lists the tracks of one playlist in playlist order.
    async fn list_playlist_tracks(&self, playlist_id: &str) -> Result<Vec<TrackWithDetails>>;

    /// Creates a playlist for `user_id`, uploading the cover first when one
    /// is attached. Returns the stored row.
    ///
    /// Implementations must run [`NewPlaylist::validate`] before any write
    /// goes out.
    async fn create_playlist(&self, user_id: &str, input: NewPlaylist) -> Result<Playlist>;

    /// Adds a track to a playlist. Adding a track that is already present is
    /// a no-op and returns `Ok(false)`.
    async fn add_track(&self, playlist_id: &str, track_id: &str) -> Result<bool>;

    /// Removes a track from a playlist. Returns `Ok(false)` when the track
    /// was not in the playlist.
    async fn remove_track(&self, playlist_id: &str, track_id: &str) -> Result<bool>;
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::CatalogError;
    use mockall::mock;
    use mockall::predicate::eq;

    mock! {
        Playlists {}

        #[async_trait::async_trait]
        impl PlaylistService for Playlists {
            async fn list_playlists(&self, user_id: &str) -> Result<Vec<Playlist>>;
            async fn list_playlist_tracks(&self, playlist_id: &str) -> Result<Vec<TrackWithDetails>>;
            async fn create_playlist(&self, user_id: &str, input: NewPlaylist) -> Result<Playlist>;
            async fn add_track(&self, playlist_id: &str, track_id: &str) -> Result<bool>;
            async fn remove_track(&self, playlist_id: &str, track_id: &str) -> Result<bool>;
        }
    }

    #[tokio::test]
    async fn add_track_reports_duplicates_as_false() {
        let mut playlists = MockPlaylists::new();
        playlists
            .expect_add_track()
            .with(eq("p-1"), eq("t-1"))
            .returning(|_, _| Ok(false));

        let added = playlists.add_track("p-1", "t-1").await.unwrap();
        assert!(!added);
    }

    #[tokio::test]
    async fn backend_errors_stay_opaque() {
        let mut playlists = MockPlaylists::new();
        playlists
            .expect_list_playlists()
            .returning(|_| Err(CatalogError::Backend("status 500".to_string())));

        let err = playlists.list_playlists("user-1").await.unwrap_err();
        assert!(matches!(err, CatalogError::Backend(_)));
    }
}
