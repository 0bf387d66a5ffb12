//! # Core Catalog Module
//!
//! Contracts and models for the hosted music catalog:
//! - Domain models mirroring backend rows ([`models`])
//! - Read-side catalog queries ([`catalog`])
//! - Per-user playlist queries and mutations ([`playlists`])
//! - Storage URL assembly for audio and cover objects ([`storage`])
//!
//! The backend owns the data; this crate owns the shapes and the contracts
//! the rest of the core programs against. Host shells inject concrete
//! implementations of [`CatalogService`] and [`PlaylistService`].

pub mod catalog;
pub mod error;
pub mod models;
pub mod playlists;
pub mod storage;

pub use catalog::CatalogService;
pub use error::{CatalogError, Result};
pub use models::{
    Album, Artist, ArtistWithAlbums, NewPlaylist, Playlist, Track, TrackWithDetails,
};
pub use playlists::PlaylistService;
pub use storage::{Buckets, ImageTransform, ResizeMode, StorageConfig};
