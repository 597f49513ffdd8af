use musicapp_core::{
    error::Result,
    types::{PlaylistId, PlaylistSummary, UserId},
    MusicError,
};
use sqlx::{postgres::PgRow, PgPool, Row};

fn summary_from_row(row: &PgRow) -> PlaylistSummary {
    PlaylistSummary {
        id: row.get("id"),
        name: row.get("name"),
        username: row.get("username"),
    }
}

/// Create a playlist owned by `owner` and return its fresh id
pub async fn create(pool: &PgPool, name: &str, owner: &UserId) -> Result<PlaylistId> {
    let id = PlaylistId::generate();

    let inserted = sqlx::query_scalar::<_, PlaylistId>(
        "INSERT INTO playlists (id, name, owner) VALUES ($1, $2, $3) RETURNING id",
    )
    .bind(&id)
    .bind(name)
    .bind(owner)
    .fetch_optional(pool)
    .await?;

    inserted.ok_or_else(|| MusicError::invariant("Failed to add playlist"))
}

/// Get playlists visible to `user_id` (owned + collaborating), with the
/// owner's username
pub async fn get_user_playlists(pool: &PgPool, user_id: &UserId) -> Result<Vec<PlaylistSummary>> {
    let rows = sqlx::query(
        r#"
        SELECT p.id, p.name, u.username
        FROM playlists p
        INNER JOIN users u ON u.id = p.owner
        WHERE p.owner = $1
           OR EXISTS (
               SELECT 1 FROM collaborations c
               WHERE c.playlist_id = p.id AND c.user_id = $1
           )
        ORDER BY p.name, p.id
        "#,
    )
    .bind(user_id)
    .fetch_all(pool)
    .await?;

    Ok(rows.iter().map(summary_from_row).collect())
}

/// Delete a playlist owned by `owner`
///
/// Membership and collaboration rows go with it (`ON DELETE CASCADE`).
pub async fn delete(pool: &PgPool, id: &PlaylistId, owner: &UserId) -> Result<()> {
    let deleted = sqlx::query_scalar::<_, PlaylistId>(
        "DELETE FROM playlists WHERE id = $1 AND owner = $2 RETURNING id",
    )
    .bind(id)
    .bind(owner)
    .fetch_optional(pool)
    .await?;

    match deleted {
        Some(_) => Ok(()),
        None => Err(MusicError::not_found("Playlist", id.as_str())),
    }
}
