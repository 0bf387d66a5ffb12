//! Resolved track metadata.
//!
//! The coordinator never talks to the catalog. By the time a track reaches
//! it, every reference has been resolved into displayable strings and
//! fetchable URLs.

use serde::{Deserialize, Serialize};

/// A track fully resolved for playback and display.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TrackMeta {
    /// Catalog id, kept for event payloads and dedup checks
    pub id: String,
    /// Display title
    pub title: String,
    /// Display artist name, when the catalog knows one
    pub artist: Option<String>,
    /// Fetchable cover image URL, when the album has one
    pub cover_url: Option<String>,
    /// Fetchable audio URL handed to the media resource
    pub audio_url: String,
}

impl TrackMeta {
    pub fn new(
        id: impl Into<String>,
        title: impl Into<String>,
        audio_url: impl Into<String>,
    ) -> Self {
        Self {
            id: id.into(),
            title: title.into(),
            artist: None,
            cover_url: None,
            audio_url: audio_url.into(),
        }
    }

    pub fn with_artist(mut self, artist: impl Into<String>) -> Self {
        self.artist = Some(artist.into());
        self
    }

    pub fn with_cover_url(mut self, url: impl Into<String>) -> Self {
        self.cover_url = Some(url.into());
        self
    }
}
