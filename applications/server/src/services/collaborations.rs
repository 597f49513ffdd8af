//! Collaboration data service

use crate::services::cache::CacheBackend;
use musicapp_core::{
    cache_keys,
    error::Result,
    types::{CollaborationId, PlaylistId, UserId},
};
use musicapp_storage::collaborations;
use sqlx::PgPool;

pub struct CollaborationsService {
    pool: PgPool,
    cache: CacheBackend,
}

impl CollaborationsService {
    pub fn new(pool: PgPool, cache: CacheBackend) -> Self {
        Self { pool, cache }
    }

    pub async fn add_collaboration(
        &self,
        playlist_id: &PlaylistId,
        user_id: &UserId,
    ) -> Result<CollaborationId> {
        let id = collaborations::add(&self.pool, playlist_id, user_id).await?;
        self.invalidate(playlist_id, user_id).await;

        tracing::info!(playlist_id = %playlist_id, user_id = %user_id, "Collaboration added");
        Ok(id)
    }

    pub async fn delete_collaboration(&self, playlist_id: &PlaylistId, user_id: &UserId) -> Result<()> {
        collaborations::delete(&self.pool, playlist_id, user_id).await?;
        self.invalidate(playlist_id, user_id).await;

        tracing::info!(playlist_id = %playlist_id, user_id = %user_id, "Collaboration removed");
        Ok(())
    }

    /// The grantee's playlist listing gains or loses the playlist
    async fn invalidate(&self, playlist_id: &PlaylistId, user_id: &UserId) {
        self.cache.delete(&cache_keys::playlists(user_id)).await;
        self.cache.delete(&cache_keys::playlist_songs(playlist_id)).await;
    }
}
