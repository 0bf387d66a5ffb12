//! Domain models for the hosted music catalog
//!
//! Rows come back from the hosted backend with string ids and nullable
//! relations, so the models keep those shapes instead of inventing richer
//! local ones. Validation lives next to the models it guards.

use crate::error::{CatalogError, Result};
use bridge_traits::PickedCover;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Maximum length accepted for a playlist name.
pub const MAX_PLAYLIST_NAME_LEN: usize = 120;

// =============================================================================
// Catalog Rows
// =============================================================================

/// A recording artist.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Artist {
    /// Unique identifier
    pub id: String,
    /// Artist name
    pub name: String,
}

/// An album, optionally linked to its artist and cover object.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Album {
    /// Unique identifier
    pub id: String,
    /// Album title
    pub title: String,
    /// Artist reference
    pub artist_id: Option<String>,
    /// Storage object key of the cover image, scoped under the artist
    pub cover_key: Option<String>,
    /// Release year
    pub year: Option<i32>,
}

/// A music track as stored in the catalog.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Track {
    /// Unique identifier
    pub id: String,
    /// Track title
    pub title: String,
    /// Artist reference
    pub artist_id: Option<String>,
    /// Album reference
    pub album_id: Option<String>,
    /// Duration in whole seconds, when the backend knows it
    pub duration_seconds: Option<i64>,
    /// Object key for an on-device copy, when one exists
    pub local_key: Option<String>,
    /// Storage object key of the audio file, scoped under the album
    pub remote_key: Option<String>,
}

/// A track joined with its artist and album rows.
///
/// This is the shape list views work with; the joins happen backend-side.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TrackWithDetails {
    pub track: Track,
    pub artist: Option<Artist>,
    pub album: Option<Album>,
}

/// An artist together with all of their albums.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ArtistWithAlbums {
    pub artist: Artist,
    pub albums: Vec<Album>,
}

// =============================================================================
// Playlists
// =============================================================================

/// A user-owned playlist.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Playlist {
    /// Unique identifier
    pub id: String,
    /// Owning user
    pub user_id: String,
    /// Display name
    pub name: String,
    /// Storage object key of the cover image, when one was uploaded
    pub cover_key: Option<String>,
    /// Creation timestamp
    pub created_at: DateTime<Utc>,
}

impl Playlist {
    /// Creates a playlist row with a fresh id and the current timestamp.
    pub fn new(user_id: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            id: Uuid::new_v4().to_string(),
            user_id: user_id.into(),
            name: name.into(),
            cover_key: None,
            created_at: Utc::now(),
        }
    }
}

/// Input for creating a playlist.
#[derive(Debug, Clone)]
pub struct NewPlaylist {
    /// Display name, validated before the create call goes out
    pub name: String,
    /// Cover image chosen through the host picker, if any
    pub cover: Option<PickedCover>,
}

impl NewPlaylist {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            cover: None,
        }
    }

    pub fn with_cover(mut self, cover: PickedCover) -> Self {
        self.cover = Some(cover);
        self
    }

    /// Validates the playlist input.
    ///
    /// Names must be non-blank after trimming and within the length cap the
    /// backend enforces.
    pub fn validate(&self) -> Result<()> {
        let trimmed = self.name.trim();
        if trimmed.is_empty() {
            return Err(CatalogError::InvalidInput {
                field: "name".to_string(),
                message: "Playlist name cannot be empty".to_string(),
            });
        }

        if trimmed.len() > MAX_PLAYLIST_NAME_LEN {
            return Err(CatalogError::InvalidInput {
                field: "name".to_string(),
                message: format!(
                    "Playlist name exceeds maximum length of {} characters",
                    MAX_PLAYLIST_NAME_LEN
                ),
            });
        }

        Ok(())
    }
}
