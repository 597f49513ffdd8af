//! Playlist membership (`playlistsongs`)

use crate::songs;
use musicapp_core::{
    error::Result,
    types::{PlaylistId, PlaylistSongId, SongId, SongSummary, UserId},
    MusicError,
};
use sqlx::{PgPool, Row};

/// Attach an existing song to a playlist
///
/// Attaching the same song twice creates two rows.
pub async fn add(pool: &PgPool, playlist_id: &PlaylistId, song_id: &SongId) -> Result<PlaylistSongId> {
    if !songs::exists(pool, song_id).await? {
        return Err(MusicError::not_found("Song", song_id.as_str()));
    }

    let id = PlaylistSongId::generate();

    let inserted = sqlx::query_scalar::<_, PlaylistSongId>(
        "INSERT INTO playlistsongs (id, playlist_id, song_id) VALUES ($1, $2, $3) RETURNING id",
    )
    .bind(&id)
    .bind(playlist_id)
    .bind(song_id)
    .fetch_optional(pool)
    .await?;

    inserted.ok_or_else(|| MusicError::invariant("Failed to add song to playlist"))
}

/// Songs attached to `playlist_id`, visible only to its owner and collaborators
pub async fn get_songs(
    pool: &PgPool,
    playlist_id: &PlaylistId,
    user_id: &UserId,
) -> Result<Vec<SongSummary>> {
    let rows = sqlx::query(
        r#"
        SELECT s.id, s.title, s.performer
        FROM songs s
        INNER JOIN playlistsongs ps ON ps.song_id = s.id
        INNER JOIN playlists p ON p.id = ps.playlist_id
        WHERE p.id = $1
          AND (
            p.owner = $2
            OR EXISTS (
                SELECT 1 FROM collaborations c
                WHERE c.playlist_id = p.id AND c.user_id = $2
            )
          )
        ORDER BY ps.id
        "#,
    )
    .bind(playlist_id)
    .bind(user_id)
    .fetch_all(pool)
    .await?;

    Ok(rows
        .into_iter()
        .map(|row| SongSummary {
            id: row.get("id"),
            title: row.get("title"),
            performer: row.get("performer"),
        })
        .collect())
}

/// Detach a song from a playlist (every matching row)
pub async fn remove(pool: &PgPool, playlist_id: &PlaylistId, song_id: &SongId) -> Result<()> {
    let deleted = sqlx::query_scalar::<_, PlaylistSongId>(
        "DELETE FROM playlistsongs WHERE playlist_id = $1 AND song_id = $2 RETURNING id",
    )
    .bind(playlist_id)
    .bind(song_id)
    .fetch_all(pool)
    .await?;

    if deleted.is_empty() {
        return Err(MusicError::not_found("Song in playlist", song_id.as_str()));
    }

    Ok(())
}
