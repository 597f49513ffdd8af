/// Song catalogue API routes
use crate::{
    api::{validation, ApiResponse},
    error::{Result, ServerError},
    middleware::AuthenticatedUser,
    state::AppState,
};
use axum::{
    extract::{Path, State},
    response::Response,
    Json,
};
use musicapp_core::types::{CreateSong, Song, SongId, SongSummary};
use musicapp_storage::songs;
use serde::{Deserialize, Serialize};

#[derive(Debug, Deserialize)]
pub struct CreateSongRequest {
    #[serde(default)]
    pub title: String,
    pub year: Option<i32>,
    #[serde(default)]
    pub performer: String,
    pub genre: Option<String>,
    pub duration: Option<i32>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SongCreated {
    pub song_id: SongId,
}

#[derive(Debug, Serialize)]
pub struct SongList {
    pub songs: Vec<SongSummary>,
}

#[derive(Debug, Serialize)]
pub struct SongDetail {
    pub song: Song,
}

/// POST /songs
pub async fn create_song(
    State(app_state): State<AppState>,
    _auth: AuthenticatedUser,
    Json(req): Json<CreateSongRequest>,
) -> Result<Response> {
    validation::require_non_empty("title", &req.title)?;
    validation::require_non_empty("performer", &req.performer)?;
    let year = validation::validate_year(req.year)?;

    if req.duration.is_some_and(|d| d < 0) {
        return Err(ServerError::BadRequest(
            "duration must not be negative".to_string(),
        ));
    }

    let song_id = songs::create(
        &app_state.pool,
        CreateSong {
            title: req.title,
            year,
            performer: req.performer,
            genre: req.genre,
            duration: req.duration,
        },
    )
    .await?;

    Ok(ApiResponse::with_message("Song added", SongCreated { song_id }).created())
}

/// GET /songs
pub async fn list_songs(State(app_state): State<AppState>) -> Result<Json<ApiResponse<SongList>>> {
    let songs = songs::get_all(&app_state.pool).await?;
    Ok(Json(ApiResponse::data(SongList { songs })))
}

/// GET /songs/:song_id
pub async fn get_song(
    Path(song_id): Path<String>,
    State(app_state): State<AppState>,
) -> Result<Json<ApiResponse<SongDetail>>> {
    let song = songs::get_by_id(&app_state.pool, &SongId::new(song_id.clone()))
        .await?
        .ok_or_else(|| ServerError::NotFound(format!("Song not found: {song_id}")))?;

    Ok(Json(ApiResponse::data(SongDetail { song })))
}
