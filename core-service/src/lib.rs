//! Core service façade and bootstrap helpers.
//!
//! This crate wires host-provided bridge implementations (media resource,
//! cover picker, backend services) into the shared Rust core. It owns the
//! glue the UI layers should never see: resolving catalog rows into playable
//! track metadata, assembling storage URLs, validating playlist input, and
//! handing out the playback coordinator.

pub mod error;

pub use error::{CoreError, Result};

use std::sync::Arc;

use bridge_traits::{CoverPicker, MediaResource};
use core_catalog::storage::StorageConfig;
use core_catalog::{
    Album, ArtistWithAlbums, CatalogService, ImageTransform, NewPlaylist, Playlist,
    PlaylistService, TrackWithDetails,
};
use core_player::{PlayerCoordinator, TrackMeta};
use core_runtime::config::CoreConfig;
use core_runtime::events::{CoreEvent, EventBus, LibraryEvent, Receiver};
use tracing::{debug, info};

/// Aggregated handle to all bridge dependencies the core requires.
pub struct CoreDependencies {
    pub catalog: Arc<dyn CatalogService>,
    pub playlists: Arc<dyn PlaylistService>,
    /// Optional; playlist covers are skipped on hosts without a picker.
    pub cover_picker: Option<Arc<dyn CoverPicker>>,
    pub media: Arc<dyn MediaResource>,
}

impl CoreDependencies {
    /// Construct a dependency bundle from explicit bridge handles.
    pub fn new(
        catalog: Arc<dyn CatalogService>,
        playlists: Arc<dyn PlaylistService>,
        cover_picker: Option<Arc<dyn CoverPicker>>,
        media: Arc<dyn MediaResource>,
    ) -> Self {
        Self {
            catalog,
            playlists,
            cover_picker,
            media,
        }
    }
}

/// Primary façade exposed to host applications.
#[derive(Clone)]
pub struct CoreService {
    deps: Arc<CoreDependencies>,
    config: CoreConfig,
    storage: StorageConfig,
    events: EventBus,
}

impl std::fmt::Debug for CoreService {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CoreService").finish_non_exhaustive()
    }
}

impl CoreService {
    /// Create a new service from validated configuration and the provided
    /// dependencies.
    pub fn new(config: CoreConfig, deps: CoreDependencies) -> Result<Self> {
        config
            .validate()
            .map_err(|err| CoreError::InitializationFailed(err.to_string()))?;

        let storage = StorageConfig::new(config.backend_url.clone());
        let events = EventBus::new(config.event_buffer_size);

        info!(backend_url = %config.backend_url, "Core service initialized");

        Ok(Self {
            deps: Arc::new(deps),
            config,
            storage,
            events,
        })
    }

    /// Access the bridge dependencies being used by the service.
    pub fn dependencies(&self) -> Arc<CoreDependencies> {
        Arc::clone(&self.deps)
    }

    pub fn config(&self) -> &CoreConfig {
        &self.config
    }

    pub fn storage(&self) -> &StorageConfig {
        &self.storage
    }

    pub fn events(&self) -> &EventBus {
        &self.events
    }

    /// Subscribe to core events.
    pub fn subscribe(&self) -> Receiver<CoreEvent> {
        self.events.subscribe()
    }

    /// Build the playback coordinator over the host media resource.
    ///
    /// The coordinator expects single-threaded use from the host UI loop;
    /// create one per player surface (in practice, one per process).
    pub fn create_player(&self) -> PlayerCoordinator {
        PlayerCoordinator::new(Arc::clone(&self.deps.media), self.events.clone())
    }

    // ------------------------------------------------------------------
    // Track resolution
    // ------------------------------------------------------------------

    /// Resolves a catalog row into playable track metadata.
    ///
    /// Returns `None` when the row cannot be played: audio objects are keyed
    /// under the album, so a track without an album or without a remote
    /// object key has no fetchable URL.
    pub fn track_meta(&self, row: &TrackWithDetails) -> Option<TrackMeta> {
        let album = row.album.as_ref()?;
        let remote_key = row.track.remote_key.as_deref()?;

        let audio_url = self.storage.track_audio_url(&album.id, remote_key);

        let mut meta = TrackMeta::new(&row.track.id, &row.track.title, audio_url);
        if let Some(artist) = &row.artist {
            meta = meta.with_artist(&artist.name);
        }
        if let Some(cover_url) = self.album_cover_url(album, ImageTransform::default()) {
            meta = meta.with_cover_url(cover_url);
        }
        Some(meta)
    }

    /// Resolves a list of catalog rows, skipping the unplayable ones.
    pub fn playable_tracks(&self, rows: &[TrackWithDetails]) -> Vec<TrackMeta> {
        rows.iter()
            .filter_map(|row| {
                let meta = self.track_meta(row);
                if meta.is_none() {
                    debug!(track_id = %row.track.id, "Skipping track without a playable source");
                }
                meta
            })
            .collect()
    }

    /// URL of an album's cover image, when the album has one.
    ///
    /// Cover objects are keyed under the artist, so an album without an
    /// artist reference cannot resolve its cover either.
    pub fn album_cover_url(&self, album: &Album, transform: ImageTransform) -> Option<String> {
        let artist_id = album.artist_id.as_deref()?;
        let cover_key = album.cover_key.as_deref()?;
        Some(self.storage.album_cover_url(artist_id, cover_key, transform))
    }

    /// URL of a playlist's cover image, when one was uploaded.
    pub fn playlist_cover_url(
        &self,
        playlist: &Playlist,
        transform: ImageTransform,
    ) -> Option<String> {
        playlist
            .cover_key
            .as_deref()
            .map(|key| self.storage.playlist_cover_url(key, transform))
    }

    // ------------------------------------------------------------------
    // Catalog views
    // ------------------------------------------------------------------

    pub async fn list_tracks(&self) -> Result<Vec<TrackWithDetails>> {
        Ok(self.deps.catalog.list_tracks().await?)
    }

    pub async fn search_tracks(&self, query: &str) -> Result<Vec<TrackWithDetails>> {
        Ok(self.deps.catalog.search_tracks(query).await?)
    }

    pub async fn list_artists_with_albums(&self) -> Result<Vec<ArtistWithAlbums>> {
        Ok(self.deps.catalog.list_artists_with_albums().await?)
    }

    pub async fn list_album_tracks(&self, album_id: &str) -> Result<Vec<TrackWithDetails>> {
        Ok(self.deps.catalog.list_album_tracks(album_id).await?)
    }

    // ------------------------------------------------------------------
    // Playlists
    // ------------------------------------------------------------------

    pub async fn list_playlists(&self) -> Result<Vec<Playlist>> {
        Ok(self
            .deps
            .playlists
            .list_playlists(&self.config.default_user_id)
            .await?)
    }

    pub async fn list_playlist_tracks(&self, playlist_id: &str) -> Result<Vec<TrackWithDetails>> {
        Ok(self.deps.playlists.list_playlist_tracks(playlist_id).await?)
    }

    /// Creates a playlist for the configured user.
    ///
    /// With `pick_cover` set and a picker available, the host image picker
    /// runs first; cancelling it creates the playlist without a cover rather
    /// than aborting.
    pub async fn create_playlist(&self, name: &str, pick_cover: bool) -> Result<Playlist> {
        let mut input = NewPlaylist::new(name);
        input.validate().map_err(CoreError::Catalog)?;

        if pick_cover {
            if let Some(picker) = &self.deps.cover_picker {
                if let Some(cover) = picker.pick_cover().await? {
                    debug!(file = %cover.file_name, "Cover picked for new playlist");
                    input = input.with_cover(cover);
                }
            } else {
                debug!("No cover picker on this host; creating playlist without cover");
            }
        }

        let playlist = self
            .deps
            .playlists
            .create_playlist(&self.config.default_user_id, input)
            .await?;

        info!(playlist_id = %playlist.id, "Playlist created");
        self.events
            .emit(CoreEvent::Library(LibraryEvent::PlaylistCreated {
                playlist_id: playlist.id.clone(),
                name: playlist.name.clone(),
            }))
            .ok();

        Ok(playlist)
    }

    /// Adds a track to a playlist. Returns `false` for duplicates.
    pub async fn add_track_to_playlist(&self, playlist_id: &str, track_id: &str) -> Result<bool> {
        let added = self.deps.playlists.add_track(playlist_id, track_id).await?;
        if added {
            self.events
                .emit(CoreEvent::Library(LibraryEvent::PlaylistTrackAdded {
                    playlist_id: playlist_id.to_string(),
                    track_id: track_id.to_string(),
                }))
                .ok();
        }
        Ok(added)
    }

    /// Removes a track from a playlist. Returns `false` when it was absent.
    pub async fn remove_track_from_playlist(
        &self,
        playlist_id: &str,
        track_id: &str,
    ) -> Result<bool> {
        let removed = self
            .deps
            .playlists
            .remove_track(playlist_id, track_id)
            .await?;
        if removed {
            self.events
                .emit(CoreEvent::Library(LibraryEvent::PlaylistTrackRemoved {
                    playlist_id: playlist_id.to_string(),
                    track_id: track_id.to_string(),
                }))
                .ok();
        }
        Ok(removed)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use bridge_traits::error::Result as BridgeResult;
    use bridge_traits::PickedCover;
    use bytes::Bytes;
    use core_catalog::error::Result as CatalogResult;
    use core_catalog::{Artist, CatalogError, Track};
    use core_player::testing::FakeMedia;
    use mockall::mock;
    use mockall::predicate::eq;

    mock! {
        Catalog {}

        #[async_trait::async_trait]
        impl CatalogService for Catalog {
            async fn list_tracks(&self) -> CatalogResult<Vec<TrackWithDetails>>;
            async fn search_tracks(&self, query: &str) -> CatalogResult<Vec<TrackWithDetails>>;
            async fn list_artists_with_albums(&self) -> CatalogResult<Vec<ArtistWithAlbums>>;
            async fn list_album_tracks(&self, album_id: &str) -> CatalogResult<Vec<TrackWithDetails>>;
        }
    }

    mock! {
        Playlists {}

        #[async_trait::async_trait]
        impl PlaylistService for Playlists {
            async fn list_playlists(&self, user_id: &str) -> CatalogResult<Vec<Playlist>>;
            async fn list_playlist_tracks(&self, playlist_id: &str) -> CatalogResult<Vec<TrackWithDetails>>;
            async fn create_playlist(&self, user_id: &str, input: NewPlaylist) -> CatalogResult<Playlist>;
            async fn add_track(&self, playlist_id: &str, track_id: &str) -> CatalogResult<bool>;
            async fn remove_track(&self, playlist_id: &str, track_id: &str) -> CatalogResult<bool>;
        }
    }

    mock! {
        Picker {}

        #[async_trait::async_trait]
        impl CoverPicker for Picker {
            async fn pick_cover(&self) -> BridgeResult<Option<PickedCover>>;
        }
    }

    fn config() -> CoreConfig {
        CoreConfig::builder()
            .backend_url("https://abc.supabase.co")
            .anon_key("anon-key")
            .default_user_id("user-1")
            .build()
            .unwrap()
    }

    fn service_with(
        catalog: MockCatalog,
        playlists: MockPlaylists,
        picker: Option<MockPicker>,
    ) -> CoreService {
        let deps = CoreDependencies::new(
            Arc::new(catalog),
            Arc::new(playlists),
            picker.map(|p| Arc::new(p) as Arc<dyn CoverPicker>),
            Arc::new(FakeMedia::default()),
        );
        CoreService::new(config(), deps).unwrap()
    }

    fn full_row() -> TrackWithDetails {
        TrackWithDetails {
            track: Track {
                id: "t-1".to_string(),
                title: "Holocene".to_string(),
                artist_id: Some("a-1".to_string()),
                album_id: Some("al-1".to_string()),
                duration_seconds: Some(337),
                local_key: None,
                remote_key: Some("holocene.mp3".to_string()),
            },
            artist: Some(Artist {
                id: "a-1".to_string(),
                name: "Bon Iver".to_string(),
            }),
            album: Some(Album {
                id: "al-1".to_string(),
                title: "Bon Iver, Bon Iver".to_string(),
                artist_id: Some("a-1".to_string()),
                cover_key: Some("cover.jpg".to_string()),
                year: Some(2011),
            }),
        }
    }

    #[tokio::test]
    async fn track_meta_resolves_urls_from_row() {
        let service = service_with(MockCatalog::new(), MockPlaylists::new(), None);

        let meta = service.track_meta(&full_row()).unwrap();
        assert_eq!(meta.id, "t-1");
        assert_eq!(meta.artist.as_deref(), Some("Bon Iver"));
        assert_eq!(
            meta.audio_url,
            "https://abc.supabase.co/storage/v1/object/public/tracks/al-1/holocene.mp3"
        );
        assert_eq!(
            meta.cover_url.as_deref(),
            Some("https://abc.supabase.co/storage/v1/object/public/album_covers/a-1/cover.jpg")
        );
    }

    #[tokio::test]
    async fn track_meta_requires_album_and_remote_key() {
        let service = service_with(MockCatalog::new(), MockPlaylists::new(), None);

        let mut no_album = full_row();
        no_album.album = None;
        assert!(service.track_meta(&no_album).is_none());

        let mut no_key = full_row();
        no_key.track.remote_key = None;
        assert!(service.track_meta(&no_key).is_none());
    }

    #[tokio::test]
    async fn playable_tracks_skips_unresolvable_rows() {
        let service = service_with(MockCatalog::new(), MockPlaylists::new(), None);

        let mut broken = full_row();
        broken.track.id = "t-2".to_string();
        broken.track.remote_key = None;

        let tracks = service.playable_tracks(&[full_row(), broken]);
        assert_eq!(tracks.len(), 1);
        assert_eq!(tracks[0].id, "t-1");
    }

    #[tokio::test]
    async fn search_delegates_to_catalog() {
        let mut catalog = MockCatalog::new();
        catalog
            .expect_search_tracks()
            .with(eq("holo"))
            .returning(|_| Ok(vec![]));

        let service = service_with(catalog, MockPlaylists::new(), None);
        let rows = service.search_tracks("holo").await.unwrap();
        assert!(rows.is_empty());
    }

    #[tokio::test]
    async fn create_playlist_rejects_blank_names() {
        let service = service_with(MockCatalog::new(), MockPlaylists::new(), None);

        let err = service.create_playlist("   ", false).await.unwrap_err();
        assert!(matches!(
            err,
            CoreError::Catalog(CatalogError::InvalidInput { .. })
        ));
    }

    #[tokio::test]
    async fn create_playlist_passes_picked_cover_through() {
        let mut picker = MockPicker::new();
        picker.expect_pick_cover().returning(|| {
            Ok(Some(PickedCover::from_uri(
                "file:///x/sunset.jpg",
                Bytes::from_static(b"img"),
            )))
        });

        let mut playlists = MockPlaylists::new();
        playlists
            .expect_create_playlist()
            .withf(|user_id, input| {
                user_id == "user-1"
                    && input.name == "Evening"
                    && input
                        .cover
                        .as_ref()
                        .is_some_and(|c| c.file_name == "sunset.jpg")
            })
            .returning(|user_id, input| {
                let mut playlist = Playlist::new(user_id, input.name);
                playlist.cover_key = Some("user-1/sunset.jpg".to_string());
                Ok(playlist)
            });

        let service = service_with(MockCatalog::new(), playlists, Some(picker));
        let mut events = service.subscribe();

        let playlist = service.create_playlist("Evening", true).await.unwrap();
        assert_eq!(playlist.cover_key.as_deref(), Some("user-1/sunset.jpg"));

        let event = events.try_recv().unwrap();
        assert!(matches!(
            event,
            CoreEvent::Library(LibraryEvent::PlaylistCreated { ref name, .. }) if name == "Evening"
        ));
    }

    #[tokio::test]
    async fn create_playlist_survives_picker_cancel() {
        let mut picker = MockPicker::new();
        picker.expect_pick_cover().returning(|| Ok(None));

        let mut playlists = MockPlaylists::new();
        playlists
            .expect_create_playlist()
            .withf(|_, input| input.cover.is_none())
            .returning(|user_id, input| Ok(Playlist::new(user_id, input.name)));

        let service = service_with(MockCatalog::new(), playlists, Some(picker));
        let playlist = service.create_playlist("No art", true).await.unwrap();
        assert!(playlist.cover_key.is_none());
    }

    #[tokio::test]
    async fn add_track_emits_only_when_added() {
        let mut playlists = MockPlaylists::new();
        playlists
            .expect_add_track()
            .with(eq("p-1"), eq("t-1"))
            .returning(|_, _| Ok(true));
        playlists
            .expect_add_track()
            .with(eq("p-1"), eq("t-2"))
            .returning(|_, _| Ok(false));

        let service = service_with(MockCatalog::new(), playlists, None);
        let mut events = service.subscribe();

        assert!(service.add_track_to_playlist("p-1", "t-1").await.unwrap());
        assert!(!service.add_track_to_playlist("p-1", "t-2").await.unwrap());

        let mut count = 0;
        while events.try_recv().is_ok() {
            count += 1;
        }
        assert_eq!(count, 1);
    }

    #[tokio::test]
    async fn playlist_cover_url_uses_stored_key() {
        let service = service_with(MockCatalog::new(), MockPlaylists::new(), None);

        let mut playlist = Playlist::new("user-1", "Evening");
        assert!(service
            .playlist_cover_url(&playlist, ImageTransform::default())
            .is_none());

        playlist.cover_key = Some("user-1/sunset.jpg".to_string());
        let url = service
            .playlist_cover_url(&playlist, ImageTransform::default().width(128))
            .unwrap();
        assert_eq!(
            url,
            "https://abc.supabase.co/storage/v1/render/image/public/playlist_covers/user-1/sunset.jpg?width=128"
        );
    }

    #[tokio::test]
    async fn created_player_coordinates_the_shared_media_resource() {
        let service = service_with(MockCatalog::new(), MockPlaylists::new(), None);
        let mut player = service.create_player();

        let meta = service.track_meta(&full_row()).unwrap();
        player.play_track(meta);
        assert!(player.phase().is_loading());
    }

    #[tokio::test]
    async fn invalid_config_fails_initialization() {
        let config = CoreConfig {
            backend_url: String::new(),
            anon_key: "k".to_string(),
            default_user_id: "u".to_string(),
            event_buffer_size: 16,
        };
        let deps = CoreDependencies::new(
            Arc::new(MockCatalog::new()),
            Arc::new(MockPlaylists::new()),
            None,
            Arc::new(FakeMedia::default()),
        );

        let err = CoreService::new(config, deps).unwrap_err();
        assert!(matches!(err, CoreError::InitializationFailed(_)));
    }
}
