use musicapp_core::{
    error::Result,
    types::{CreateSong, Song, SongId, SongSummary},
    MusicError,
};
use sqlx::{PgPool, Row};

/// Add a song to the catalogue
pub async fn create(pool: &PgPool, song: CreateSong) -> Result<SongId> {
    let id = SongId::generate();

    let inserted = sqlx::query_scalar::<_, SongId>(
        r#"
        INSERT INTO songs (id, title, year, performer, genre, duration)
        VALUES ($1, $2, $3, $4, $5, $6)
        RETURNING id
        "#,
    )
    .bind(&id)
    .bind(&song.title)
    .bind(song.year)
    .bind(&song.performer)
    .bind(&song.genre)
    .bind(song.duration)
    .fetch_optional(pool)
    .await?;

    inserted.ok_or_else(|| MusicError::invariant("Failed to add song"))
}

/// Get all songs
pub async fn get_all(pool: &PgPool) -> Result<Vec<SongSummary>> {
    let rows = sqlx::query("SELECT id, title, performer FROM songs ORDER BY title, id")
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

/// Get song by ID
pub async fn get_by_id(pool: &PgPool, id: &SongId) -> Result<Option<Song>> {
    let row = sqlx::query(
        "SELECT id, title, year, performer, genre, duration FROM songs WHERE id = $1",
    )
    .bind(id)
    .fetch_optional(pool)
    .await?;

    Ok(row.map(|row| Song {
        id: row.get("id"),
        title: row.get("title"),
        year: row.get("year"),
        performer: row.get("performer"),
        genre: row.get("genre"),
        duration: row.get("duration"),
    }))
}

/// Check whether a song exists
pub async fn exists(pool: &PgPool, id: &SongId) -> Result<bool> {
    let exists = sqlx::query_scalar::<_, bool>("SELECT EXISTS (SELECT 1 FROM songs WHERE id = $1)")
        .bind(id)
        .fetch_one(pool)
        .await?;

    Ok(exists)
}
