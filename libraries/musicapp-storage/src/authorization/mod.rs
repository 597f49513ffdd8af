//! Playlist authorization predicates
//!
//! Both checks are read-only and treat a missing playlist exactly like a
//! denied one: callers get a single `Authorization` outcome.

use musicapp_core::{
    error::Result,
    types::{PlaylistId, UserId},
    MusicError,
};
use sqlx::PgPool;

/// Fail unless `user_id` owns `playlist_id`
pub async fn verify_ownership(
    pool: &PgPool,
    playlist_id: &PlaylistId,
    user_id: &UserId,
) -> Result<()> {
    let owner = sqlx::query_scalar::<_, UserId>("SELECT owner FROM playlists WHERE id = $1")
        .bind(playlist_id)
        .fetch_optional(pool)
        .await?;

    match owner {
        Some(owner) if &owner == user_id => Ok(()),
        _ => Err(MusicError::authorization(
            "You are not allowed to access this resource",
        )),
    }
}

/// Fail unless `user_id` owns `playlist_id` or holds a collaboration grant on it
pub async fn verify_access(
    pool: &PgPool,
    playlist_id: &PlaylistId,
    user_id: &UserId,
) -> Result<()> {
    let allowed = sqlx::query_scalar::<_, bool>(
        r#"
        SELECT EXISTS (
            SELECT 1
            FROM playlists p
            WHERE p.id = $1
              AND (
                p.owner = $2
                OR EXISTS (
                    SELECT 1 FROM collaborations c
                    WHERE c.playlist_id = p.id AND c.user_id = $2
                )
              )
        )
        "#,
    )
    .bind(playlist_id)
    .bind(user_id)
    .fetch_one(pool)
    .await?;

    if allowed {
        Ok(())
    } else {
        Err(MusicError::authorization(
            "You are not allowed to access this resource",
        ))
    }
}
