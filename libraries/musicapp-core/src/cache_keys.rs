//! Cache key derivation
//!
//! Each cached entity has exactly one key function. Read paths and every
//! write path that can make the entry stale call the same function.

use crate::types::{PlaylistId, UserId};

/// Prefix of the playlists-by-user entries
pub const PLAYLISTS_PREFIX: &str = "playlists";

/// Prefix of the songs-in-playlist entries
pub const PLAYLIST_SONGS_PREFIX: &str = "playlistsongs";

/// Key of the playlist listing visible to `user_id` (owned + collaborating).
pub fn playlists(user_id: &UserId) -> String {
    format!("{PLAYLISTS_PREFIX}:{user_id}")
}

/// Key of the song listing of `playlist_id`.
pub fn playlist_songs(playlist_id: &PlaylistId) -> String {
    format!("{PLAYLIST_SONGS_PREFIX}:{playlist_id}")
}
