//! Collaboration grants

use musicapp_core::{
    error::Result,
    types::{CollaborationId, PlaylistId, UserId},
    MusicError,
};
use sqlx::PgPool;

/// Grant `user_id` access to `playlist_id`
pub async fn add(pool: &PgPool, playlist_id: &PlaylistId, user_id: &UserId) -> Result<CollaborationId> {
    let id = CollaborationId::generate();

    let inserted = sqlx::query_scalar::<_, CollaborationId>(
        "INSERT INTO collaborations (id, playlist_id, user_id) VALUES ($1, $2, $3) RETURNING id",
    )
    .bind(&id)
    .bind(playlist_id)
    .bind(user_id)
    .fetch_optional(pool)
    .await?;

    inserted.ok_or_else(|| MusicError::invariant("Failed to add collaboration"))
}

/// Revoke the grant of `user_id` on `playlist_id`
pub async fn delete(pool: &PgPool, playlist_id: &PlaylistId, user_id: &UserId) -> Result<()> {
    let deleted = sqlx::query_scalar::<_, CollaborationId>(
        "DELETE FROM collaborations WHERE playlist_id = $1 AND user_id = $2 RETURNING id",
    )
    .bind(playlist_id)
    .bind(user_id)
    .fetch_optional(pool)
    .await?;

    match deleted {
        Some(_) => Ok(()),
        None => Err(MusicError::invariant("Failed to delete collaboration")),
    }
}

/// Users holding a grant on `playlist_id`
pub async fn get_collaborator_ids(pool: &PgPool, playlist_id: &PlaylistId) -> Result<Vec<UserId>> {
    let ids = sqlx::query_scalar::<_, UserId>(
        "SELECT user_id FROM collaborations WHERE playlist_id = $1 ORDER BY user_id",
    )
    .bind(playlist_id)
    .fetch_all(pool)
    .await?;

    Ok(ids)
}
