/// Playlist export API routes
use crate::{
    api::{validation, ApiResponse},
    error::Result,
    middleware::AuthenticatedUser,
    services::producer::{ExportPlaylistMessage, EXPORT_PLAYLISTS_QUEUE},
    state::AppState,
};
use axum::{
    extract::{Path, State},
    response::Response,
    Json,
};
use musicapp_core::{types::PlaylistId, MusicError};
use serde::Deserialize;

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ExportPlaylistRequest {
    #[serde(default)]
    pub target_email: String,
}

/// POST /export/playlists/:playlist_id
/// Queue an export; the consumer mails the playlist to `targetEmail`
pub async fn export_playlist(
    Path(playlist_id): Path<String>,
    State(app_state): State<AppState>,
    auth: AuthenticatedUser,
    Json(req): Json<ExportPlaylistRequest>,
) -> Result<Response> {
    validation::validate_email("targetEmail", &req.target_email)?;

    let playlist_id = PlaylistId::new(playlist_id);
    app_state
        .playlists
        .verify_access(&playlist_id, auth.user_id())
        .await?;

    let message = ExportPlaylistMessage {
        playlist_id,
        credential_id: auth.user_id().clone(),
        target_email: req.target_email,
    };
    let payload = serde_json::to_string(&message).map_err(MusicError::from)?;

    app_state
        .producer
        .send_message(EXPORT_PLAYLISTS_QUEUE, payload)
        .await?;

    tracing::info!(playlist_id = %message.playlist_id, "Export queued");

    Ok(ApiResponse::message("Your request is queued").created())
}
