/// Collaboration API routes
use crate::{
    api::{validation, ApiResponse},
    error::{Result, ServerError},
    middleware::AuthenticatedUser,
    state::AppState,
};
use axum::{extract::State, response::Response, Json};
use musicapp_core::types::{CollaborationId, PlaylistId, UserId};
use musicapp_storage::users;
use serde::{Deserialize, Serialize};

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CollaborationRequest {
    #[serde(default)]
    pub playlist_id: String,
    #[serde(default)]
    pub user_id: String,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CollaborationCreated {
    pub collaboration_id: CollaborationId,
}

impl CollaborationRequest {
    /// Validate the payload and check the caller owns the playlist
    async fn authorize(
        self,
        app_state: &AppState,
        auth: &AuthenticatedUser,
    ) -> Result<(PlaylistId, UserId)> {
        validation::require_non_empty("playlistId", &self.playlist_id)?;
        validation::require_non_empty("userId", &self.user_id)?;

        let playlist_id = PlaylistId::new(self.playlist_id);
        let user_id = UserId::new(self.user_id);

        app_state
            .playlists
            .verify_ownership(&playlist_id, auth.user_id())
            .await?;

        Ok((playlist_id, user_id))
    }
}

/// POST /collaborations
pub async fn add_collaboration(
    State(app_state): State<AppState>,
    auth: AuthenticatedUser,
    Json(req): Json<CollaborationRequest>,
) -> Result<Response> {
    let (playlist_id, user_id) = req.authorize(&app_state, &auth).await?;

    if !users::exists(&app_state.pool, &user_id).await? {
        return Err(ServerError::NotFound(format!("User not found: {user_id}")));
    }

    let collaboration_id = app_state
        .collaborations
        .add_collaboration(&playlist_id, &user_id)
        .await?;

    Ok(ApiResponse::with_message(
        "Collaboration added",
        CollaborationCreated { collaboration_id },
    )
    .created())
}

/// DELETE /collaborations
pub async fn delete_collaboration(
    State(app_state): State<AppState>,
    auth: AuthenticatedUser,
    Json(req): Json<CollaborationRequest>,
) -> Result<Json<ApiResponse<()>>> {
    let (playlist_id, user_id) = req.authorize(&app_state, &auth).await?;

    app_state
        .collaborations
        .delete_collaboration(&playlist_id, &user_id)
        .await?;

    Ok(Json(ApiResponse::message("Collaboration removed")))
}
