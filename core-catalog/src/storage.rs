//! Storage URL assembly for the hosted object store.
//!
//! Audio files and cover images live in storage buckets behind the backend.
//! Object keys stored on catalog rows are relative to an owner scope: album
//! covers under the artist id, track audio under the album id, playlist
//! covers under the user id. This module turns those keys into fetchable
//! URLs, optionally through the image render endpoint for resized covers.

use serde::{Deserialize, Serialize};
use std::fmt::Write as _;

/// Bucket names used by the backend.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Buckets {
    /// Album cover images, keyed `{artist_id}/{cover_key}`
    pub album_covers: String,
    /// Track audio files, keyed `{album_id}/{remote_key}`
    pub tracks: String,
    /// Playlist cover images, keyed `{user_id}/{file_name}`
    pub playlist_covers: String,
}

impl Default for Buckets {
    fn default() -> Self {
        Self {
            album_covers: "album_covers".to_string(),
            tracks: "tracks".to_string(),
            playlist_covers: "playlist_covers".to_string(),
        }
    }
}

/// Resize behavior for the image render endpoint.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ResizeMode {
    /// Fit inside the box, preserving aspect ratio
    Contain,
    /// Fill the box, cropping as needed
    Cover,
    /// Stretch to the exact box
    Fill,
}

impl ResizeMode {
    fn as_str(&self) -> &'static str {
        match self {
            ResizeMode::Contain => "contain",
            ResizeMode::Cover => "cover",
            ResizeMode::Fill => "fill",
        }
    }
}

/// Server-side image transformation parameters.
///
/// All fields are optional; an empty transform falls back to the plain
/// public object URL since the render endpoint would do no work.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct ImageTransform {
    pub width: Option<u32>,
    pub height: Option<u32>,
    /// Quality percentage, 1-100
    pub quality: Option<u8>,
    pub resize: Option<ResizeMode>,
}

impl ImageTransform {
    pub fn width(mut self, width: u32) -> Self {
        self.width = Some(width);
        self
    }

    pub fn height(mut self, height: u32) -> Self {
        self.height = Some(height);
        self
    }

    pub fn quality(mut self, quality: u8) -> Self {
        self.quality = Some(quality);
        self
    }

    pub fn resize(mut self, mode: ResizeMode) -> Self {
        self.resize = Some(mode);
        self
    }

    fn is_empty(&self) -> bool {
        self.width.is_none()
            && self.height.is_none()
            && self.quality.is_none()
            && self.resize.is_none()
    }

    fn query_string(&self) -> String {
        let mut query = String::new();
        let mut push = |query: &mut String, key: &str, value: String| {
            if query.is_empty() {
                query.push('?');
            } else {
                query.push('&');
            }
            let _ = write!(query, "{}={}", key, value);
        };

        if let Some(width) = self.width {
            push(&mut query, "width", width.to_string());
        }
        if let Some(height) = self.height {
            push(&mut query, "height", height.to_string());
        }
        if let Some(quality) = self.quality {
            push(&mut query, "quality", quality.to_string());
        }
        if let Some(resize) = self.resize {
            push(&mut query, "resize", resize.as_str().to_string());
        }

        query
    }
}

/// Storage endpoint configuration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StorageConfig {
    /// Backend base URL without a trailing slash
    pub base_url: String,
    /// Bucket names, defaulting to the hosted backend's layout
    pub buckets: Buckets,
}

impl StorageConfig {
    pub fn new(base_url: impl Into<String>) -> Self {
        let base_url = base_url.into();
        Self {
            base_url: base_url.trim_end_matches('/').to_string(),
            buckets: Buckets::default(),
        }
    }

    /// Public URL of an object, served as-is.
    pub fn public_url(&self, bucket: &str, path: &str) -> String {
        format!(
            "{}/storage/v1/object/public/{}/{}",
            self.base_url,
            bucket,
            path.trim_start_matches('/')
        )
    }

    /// URL of an image routed through the server-side render endpoint.
    ///
    /// Falls back to [`public_url`](Self::public_url) when the transform is
    /// empty.
    pub fn render_url(&self, bucket: &str, path: &str, transform: ImageTransform) -> String {
        if transform.is_empty() {
            return self.public_url(bucket, path);
        }

        format!(
            "{}/storage/v1/render/image/public/{}/{}{}",
            self.base_url,
            bucket,
            path.trim_start_matches('/'),
            transform.query_string()
        )
    }

    /// URL of an album cover. Cover keys are scoped under the artist id.
    pub fn album_cover_url(
        &self,
        artist_id: &str,
        cover_key: &str,
        transform: ImageTransform,
    ) -> String {
        let path = format!("{}/{}", artist_id, cover_key.trim_start_matches('/'));
        self.render_url(&self.buckets.album_covers, &path, transform)
    }

    /// URL of a track's audio object. Audio keys are scoped under the album id.
    pub fn track_audio_url(&self, album_id: &str, object_key: &str) -> String {
        let path = format!("{}/{}", album_id, object_key.trim_start_matches('/'));
        self.public_url(&self.buckets.tracks, &path)
    }

    /// URL of a playlist cover. The stored key already carries the user scope.
    pub fn playlist_cover_url(&self, cover_key: &str, transform: ImageTransform) -> String {
        self.render_url(&self.buckets.playlist_covers, cover_key, transform)
    }

    /// Object key for a playlist cover about to be uploaded.
    pub fn playlist_cover_key(user_id: &str, file_name: &str) -> String {
        format!("{}/{}", user_id, file_name.trim_start_matches('/'))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn config() -> StorageConfig {
        StorageConfig::new("https://abc.supabase.co")
    }

    #[test]
    fn public_url_shape() {
        let url = config().public_url("tracks", "album-1/song.mp3");
        assert_eq!(
            url,
            "https://abc.supabase.co/storage/v1/object/public/tracks/album-1/song.mp3"
        );
    }

    #[test]
    fn new_strips_trailing_slash() {
        let config = StorageConfig::new("https://abc.supabase.co/");
        assert_eq!(config.base_url, "https://abc.supabase.co");
    }

    #[test]
    fn public_url_strips_leading_slash() {
        let url = config().public_url("tracks", "/album-1/song.mp3");
        assert!(url.ends_with("/tracks/album-1/song.mp3"));
    }

    #[test]
    fn render_url_with_transform() {
        let transform = ImageTransform::default()
            .width(256)
            .quality(80)
            .resize(ResizeMode::Cover);
        let url = config().render_url("album_covers", "artist-1/cover.jpg", transform);
        assert_eq!(
            url,
            "https://abc.supabase.co/storage/v1/render/image/public/album_covers/artist-1/cover.jpg?width=256&quality=80&resize=cover"
        );
    }

    #[test]
    fn render_url_without_transform_falls_back_to_public() {
        let url = config().render_url("album_covers", "artist-1/cover.jpg", ImageTransform::default());
        assert_eq!(
            url,
            "https://abc.supabase.co/storage/v1/object/public/album_covers/artist-1/cover.jpg"
        );
    }

    #[test]
    fn album_cover_url_scopes_under_artist() {
        let url = config().album_cover_url("artist-1", "cover.jpg", ImageTransform::default());
        assert!(url.ends_with("/album_covers/artist-1/cover.jpg"));
    }

    #[test]
    fn track_audio_url_scopes_under_album() {
        let url = config().track_audio_url("album-1", "song.mp3");
        assert_eq!(
            url,
            "https://abc.supabase.co/storage/v1/object/public/tracks/album-1/song.mp3"
        );
    }

    #[test]
    fn playlist_cover_key_scopes_under_user() {
        assert_eq!(
            StorageConfig::playlist_cover_key("user-1", "sunset.jpg"),
            "user-1/sunset.jpg"
        );
    }

    #[test]
    fn playlist_cover_url_uses_stored_key() {
        let url = config().playlist_cover_url("user-1/sunset.jpg", ImageTransform::default().width(64));
        assert_eq!(
            url,
            "https://abc.supabase.co/storage/v1/render/image/public/playlist_covers/user-1/sunset.jpg?width=64"
        );
    }
}
