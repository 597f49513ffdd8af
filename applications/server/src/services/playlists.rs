//! Playlist data service
//!
//! Wraps the playlist and membership storage slices. Every mutation first
//! commits to Postgres, then deletes each cache entry whose value it can have
//! made stale. Nothing here reads the cache; handlers own the read-through
//! orchestration.

use crate::services::cache::CacheBackend;
use musicapp_core::{
    cache_keys,
    error::Result,
    types::{PlaylistId, PlaylistSongId, PlaylistSummary, SongId, SongSummary, UserId},
};
use musicapp_storage::{authorization, collaborations, playlist_songs, playlists};
use sqlx::PgPool;

pub struct PlaylistsService {
    pool: PgPool,
    cache: CacheBackend,
}

impl PlaylistsService {
    pub fn new(pool: PgPool, cache: CacheBackend) -> Self {
        Self { pool, cache }
    }

    /// Fail with an authorization error unless `user_id` owns the playlist
    pub async fn verify_ownership(&self, playlist_id: &PlaylistId, user_id: &UserId) -> Result<()> {
        authorization::verify_ownership(&self.pool, playlist_id, user_id).await
    }

    /// Fail with an authorization error unless `user_id` owns or collaborates
    pub async fn verify_access(&self, playlist_id: &PlaylistId, user_id: &UserId) -> Result<()> {
        authorization::verify_access(&self.pool, playlist_id, user_id).await
    }

    pub async fn add_playlist(&self, name: &str, owner: &UserId) -> Result<PlaylistId> {
        let id = playlists::create(&self.pool, name, owner).await?;
        self.cache.delete(&cache_keys::playlists(owner)).await;

        tracing::info!(playlist_id = %id, owner = %owner, "Playlist created");
        Ok(id)
    }

    pub async fn get_playlists(&self, credential_id: &UserId) -> Result<Vec<PlaylistSummary>> {
        playlists::get_user_playlists(&self.pool, credential_id).await
    }

    /// Delete a playlist; only its owner may do so
    ///
    /// Invalidates the listing of the owner and of every collaborator (their
    /// listings included the playlist) plus the playlist's song listing.
    pub async fn delete_playlist_by_id(
        &self,
        playlist_id: &PlaylistId,
        credential_id: &UserId,
    ) -> Result<()> {
        self.verify_ownership(playlist_id, credential_id).await?;

        // Grants cascade away with the playlist, read them first
        let collaborators = collaborations::get_collaborator_ids(&self.pool, playlist_id).await?;

        playlists::delete(&self.pool, playlist_id, credential_id).await?;

        self.cache.delete(&cache_keys::playlists(credential_id)).await;
        for user_id in &collaborators {
            self.cache.delete(&cache_keys::playlists(user_id)).await;
        }
        self.cache.delete(&cache_keys::playlist_songs(playlist_id)).await;

        tracing::info!(playlist_id = %playlist_id, "Playlist deleted");
        Ok(())
    }

    /// Attach a song; owner or collaborator only
    pub async fn post_song_to_playlist(
        &self,
        song_id: &SongId,
        playlist_id: &PlaylistId,
        credential_id: &UserId,
    ) -> Result<PlaylistSongId> {
        self.verify_access(playlist_id, credential_id).await?;

        let id = playlist_songs::add(&self.pool, playlist_id, song_id).await?;
        self.cache.delete(&cache_keys::playlist_songs(playlist_id)).await;

        Ok(id)
    }

    /// Songs of a playlist; the query itself filters out non-members
    pub async fn get_songs_in_playlist(
        &self,
        playlist_id: &PlaylistId,
        credential_id: &UserId,
    ) -> Result<Vec<SongSummary>> {
        playlist_songs::get_songs(&self.pool, playlist_id, credential_id).await
    }

    /// Detach a song; owner or collaborator only
    ///
    /// A song that is not in the playlist yields `MusicError::NotFound`.
    pub async fn delete_song_in_playlist(
        &self,
        playlist_id: &PlaylistId,
        song_id: &SongId,
        credential_id: &UserId,
    ) -> Result<()> {
        self.verify_access(playlist_id, credential_id).await?;

        playlist_songs::remove(&self.pool, playlist_id, song_id).await?;
        self.cache.delete(&cache_keys::playlist_songs(playlist_id)).await;

        Ok(())
    }
}
