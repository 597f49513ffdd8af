//! Playlists API routes
//!
//! Reads are cache-first; authorization always runs before the cache lookup
//! so a cached list is never served to a caller who lost access.

use crate::{
    api::{read_through, validation, ApiResponse},
    error::Result,
    middleware::AuthenticatedUser,
    state::AppState,
};
use axum::{
    extract::{Path, State},
    response::Response,
    Json,
};
use musicapp_core::{
    cache_keys,
    types::{PlaylistId, PlaylistSummary, SongId, SongSummary},
};
use serde::{Deserialize, Serialize};

#[derive(Debug, Deserialize)]
pub struct CreatePlaylistRequest {
    #[serde(default)]
    pub name: String,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PlaylistSongRequest {
    #[serde(default)]
    pub song_id: String,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PlaylistCreated {
    pub playlist_id: PlaylistId,
}

#[derive(Debug, Serialize)]
pub struct PlaylistList {
    pub playlists: Vec<PlaylistSummary>,
}

#[derive(Debug, Serialize)]
pub struct PlaylistSongs {
    pub songs: Vec<SongSummary>,
}

/// POST /playlists
pub async fn create_playlist(
    State(app_state): State<AppState>,
    auth: AuthenticatedUser,
    Json(req): Json<CreatePlaylistRequest>,
) -> Result<Response> {
    validation::require_non_empty("name", &req.name)?;

    let playlist_id = app_state
        .playlists
        .add_playlist(&req.name, auth.user_id())
        .await?;

    Ok(ApiResponse::with_message("Playlist added", PlaylistCreated { playlist_id }).created())
}

/// GET /playlists
/// Playlists the caller owns or collaborates on
pub async fn list_playlists(
    State(app_state): State<AppState>,
    auth: AuthenticatedUser,
) -> Result<Response> {
    let user_id = auth.user_id();
    let key = cache_keys::playlists(user_id);

    let (playlists, source) = read_through(&app_state.cache, &key, app_state.cache_ttl, || {
        app_state.playlists.get_playlists(user_id)
    })
    .await?;

    Ok(source.respond(ApiResponse::data(PlaylistList { playlists })))
}

/// DELETE /playlists/:playlist_id
pub async fn delete_playlist(
    Path(playlist_id): Path<String>,
    State(app_state): State<AppState>,
    auth: AuthenticatedUser,
) -> Result<Json<ApiResponse<()>>> {
    app_state
        .playlists
        .delete_playlist_by_id(&PlaylistId::new(playlist_id), auth.user_id())
        .await?;

    Ok(Json(ApiResponse::message("Playlist deleted")))
}

/// POST /playlists/:playlist_id/songs
pub async fn add_song_to_playlist(
    Path(playlist_id): Path<String>,
    State(app_state): State<AppState>,
    auth: AuthenticatedUser,
    Json(req): Json<PlaylistSongRequest>,
) -> Result<Response> {
    validation::require_non_empty("songId", &req.song_id)?;
    validation::require_max_len("songId", &req.song_id, validation::MAX_ID_LENGTH)?;

    app_state
        .playlists
        .post_song_to_playlist(
            &SongId::new(req.song_id),
            &PlaylistId::new(playlist_id),
            auth.user_id(),
        )
        .await?;

    Ok(ApiResponse::message("Song added to playlist").created())
}

/// GET /playlists/:playlist_id/songs
pub async fn list_playlist_songs(
    Path(playlist_id): Path<String>,
    State(app_state): State<AppState>,
    auth: AuthenticatedUser,
) -> Result<Response> {
    let playlist_id = PlaylistId::new(playlist_id);
    let user_id = auth.user_id();

    app_state.playlists.verify_access(&playlist_id, user_id).await?;

    let key = cache_keys::playlist_songs(&playlist_id);
    let (songs, source) = read_through(&app_state.cache, &key, app_state.cache_ttl, || {
        app_state
            .playlists
            .get_songs_in_playlist(&playlist_id, user_id)
    })
    .await?;

    Ok(source.respond(ApiResponse::data(PlaylistSongs { songs })))
}

/// DELETE /playlists/:playlist_id/songs
pub async fn remove_song_from_playlist(
    Path(playlist_id): Path<String>,
    State(app_state): State<AppState>,
    auth: AuthenticatedUser,
    Json(req): Json<PlaylistSongRequest>,
) -> Result<Json<ApiResponse<()>>> {
    validation::require_non_empty("songId", &req.song_id)?;

    app_state
        .playlists
        .delete_song_in_playlist(
            &PlaylistId::new(playlist_id),
            &SongId::new(req.song_id),
            auth.user_id(),
        )
        .await?;

    Ok(Json(ApiResponse::message("Song removed from playlist")))
}
