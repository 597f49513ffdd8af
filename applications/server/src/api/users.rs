/// User registration API routes
use crate::{
    api::{validation, ApiResponse},
    error::Result,
    state::AppState,
};
use axum::{extract::State, response::Response, Json};
use musicapp_core::types::{CreateUser, UserId};
use musicapp_storage::users;
use serde::{Deserialize, Serialize};

/// Width of the `users.username` column
pub const MAX_USERNAME_LENGTH: usize = 50;

#[derive(Debug, Deserialize)]
pub struct CreateUserRequest {
    #[serde(default)]
    pub username: String,
    #[serde(default)]
    pub password: String,
    #[serde(default)]
    pub fullname: String,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct UserCreated {
    pub user_id: UserId,
}

/// POST /users
pub async fn create_user(
    State(app_state): State<AppState>,
    Json(req): Json<CreateUserRequest>,
) -> Result<Response> {
    validation::require_non_empty("username", &req.username)?;
    validation::require_max_len("username", &req.username, MAX_USERNAME_LENGTH)?;
    validation::require_non_empty("password", &req.password)?;
    validation::require_non_empty("fullname", &req.fullname)?;

    let password_hash = app_state.auth_service.hash_password(&req.password)?;
    let user_id = users::create(
        &app_state.pool,
        CreateUser {
            username: req.username,
            password_hash,
            fullname: req.fullname,
        },
    )
    .await?;

    tracing::info!(user_id = %user_id, "User registered");

    Ok(ApiResponse::with_message("User added", UserCreated { user_id }).created())
}
