//! Playlist types

use super::PlaylistId;
use serde::{Deserialize, Serialize};

/// Playlist as listed to a user, with the owner's username.
///
/// This is also the shape stored in the playlists-by-user cache entry.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlaylistSummary {
    pub id: PlaylistId,
    pub name: String,
    pub username: String,
}
