//! Musicapp Core
//!
//! Domain types, typed identifiers, cache keys and error handling shared by the
//! storage layer and the HTTP server.
//!
//! # Architecture
//!
//! The core crate defines:
//! - **Domain Types**: playlist summaries, songs, user registration
//! - **Identifiers**: `<prefix>-<random>` ids generated by [`ids::generate_id`]
//! - **Cache Keys**: one derivation per cached entity, see [`cache_keys`]
//! - **Error Handling**: unified `MusicError` and `Result` types
//!
//! # Example
//!
//! ```rust
//! use musicapp_core::types::PlaylistId;
//! use musicapp_core::cache_keys;
//!
//! let id = PlaylistId::generate();
//! assert!(id.as_str().starts_with("playlist-"));
//!
//! let key = cache_keys::playlist_songs(&id);
//! assert_eq!(key, format!("playlistsongs:{}", id));
//! ```

#![forbid(unsafe_code)]

pub mod cache_keys;
pub mod error;
pub mod ids;
pub mod types;

pub use error::{MusicError, Result};
pub use types::{
    CollaborationId, CreateSong, CreateUser, PlaylistId, PlaylistSongId, PlaylistSummary, Song,
    SongId, SongSummary, UserId,
};
