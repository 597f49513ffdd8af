/// Authentication API routes
use crate::{
    api::{validation, ApiResponse},
    error::{Result, ServerError},
    state::AppState,
};
use axum::{extract::State, response::Response, Json};
use musicapp_storage::users;
use serde::{Deserialize, Serialize};

#[derive(Debug, Deserialize)]
pub struct LoginRequest {
    #[serde(default)]
    pub username: String,
    #[serde(default)]
    pub password: String,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RefreshRequest {
    #[serde(default)]
    pub refresh_token: String,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RefreshResponse {
    pub access_token: String,
}

/// POST /authentications
pub async fn login(
    State(app_state): State<AppState>,
    Json(req): Json<LoginRequest>,
) -> Result<Response> {
    validation::require_non_empty("username", &req.username)?;
    validation::require_non_empty("password", &req.password)?;

    let invalid = || ServerError::Auth("Invalid username or password".to_string());

    let (user_id, password_hash) = users::get_credentials(&app_state.pool, &req.username)
        .await?
        .ok_or_else(invalid)?;

    if !app_state
        .auth_service
        .verify_password(&req.password, &password_hash)?
    {
        return Err(invalid());
    }

    let tokens = app_state.auth_service.issue_token_pair(&user_id)?;
    Ok(ApiResponse::with_message("Authentication added", tokens).created())
}

/// PUT /authentications
pub async fn refresh(
    State(app_state): State<AppState>,
    Json(req): Json<RefreshRequest>,
) -> Result<Json<ApiResponse<RefreshResponse>>> {
    validation::require_non_empty("refreshToken", &req.refresh_token)?;

    let access_token = app_state
        .auth_service
        .refresh_access_token(&req.refresh_token)
        .map_err(|_| ServerError::BadRequest("Invalid refresh token".to_string()))?;

    Ok(Json(ApiResponse::with_message(
        "Access token refreshed",
        RefreshResponse { access_token },
    )))
}
