/// Server error types
use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use musicapp_core::MusicError;
use serde_json::json;
use thiserror::Error;

pub type Result<T> = std::result::Result<T, ServerError>;

#[derive(Debug, Error)]
pub enum ServerError {
    #[error("Authentication failed: {0}")]
    Auth(String),

    #[error("Resource not found: {0}")]
    NotFound(String),

    #[error("Bad request: {0}")]
    BadRequest(String),

    #[error("Internal server error: {0}")]
    Internal(String),

    #[error(transparent)]
    Domain(#[from] MusicError),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("JWT error: {0}")]
    Jwt(#[from] jsonwebtoken::errors::Error),

    #[error("Bcrypt error: {0}")]
    Bcrypt(#[from] bcrypt::BcryptError),
}

impl From<musicapp_storage::StorageError> for ServerError {
    fn from(err: musicapp_storage::StorageError) -> Self {
        ServerError::Domain(err.into())
    }
}

impl ServerError {
    /// Status code and client-facing message
    fn status_and_message(&self) -> (StatusCode, String) {
        match self {
            ServerError::Auth(msg) => (StatusCode::UNAUTHORIZED, msg.clone()),
            ServerError::NotFound(msg) => (StatusCode::NOT_FOUND, msg.clone()),
            ServerError::BadRequest(msg) => (StatusCode::BAD_REQUEST, msg.clone()),
            ServerError::Domain(err) => match err {
                MusicError::Authorization(msg) => (StatusCode::FORBIDDEN, msg.clone()),
                MusicError::NotFound { .. } => (StatusCode::NOT_FOUND, err.to_string()),
                MusicError::Invariant(msg) => {
                    (StatusCode::BAD_REQUEST, msg.clone())
                }
                MusicError::Duplicate(_) => (StatusCode::BAD_REQUEST, err.to_string()),
                MusicError::Serialization(e) => {
                    tracing::error!("Serialization error: {:?}", e);
                    (
                        StatusCode::INTERNAL_SERVER_ERROR,
                        "Internal server error".to_string(),
                    )
                }
                MusicError::Database(msg) => {
                    tracing::error!("Database error: {}", msg);
                    (
                        StatusCode::INTERNAL_SERVER_ERROR,
                        "Database error".to_string(),
                    )
                }
            },
            ServerError::Config(msg) => {
                tracing::error!("Config error: {}", msg);
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "Configuration error".to_string(),
                )
            }
            ServerError::Internal(msg) => {
                tracing::error!("Internal error: {}", msg);
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "Internal server error".to_string(),
                )
            }
            ServerError::Jwt(e) => {
                tracing::warn!("JWT error: {:?}", e);
                (StatusCode::UNAUTHORIZED, "Invalid token".to_string())
            }
            ServerError::Bcrypt(e) => {
                tracing::error!("Bcrypt error: {:?}", e);
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "Password error".to_string(),
                )
            }
        }
    }
}

impl IntoResponse for ServerError {
    fn into_response(self) -> Response {
        let (status, message) = self.status_and_message();

        // "fail" for client errors, "error" for server errors
        let outcome = if status.is_server_error() {
            "error"
        } else {
            "fail"
        };

        let body = Json(json!({
            "status": outcome,
            "message": message,
        }));

        (status, body).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn status_of(err: ServerError) -> StatusCode {
        err.into_response().status()
    }

    #[test]
    fn domain_errors_keep_their_kind() {
        assert_eq!(
            status_of(MusicError::authorization("no").into()),
            StatusCode::FORBIDDEN
        );
        assert_eq!(
            status_of(MusicError::not_found("Song", "song-1").into()),
            StatusCode::NOT_FOUND
        );
        assert_eq!(
            status_of(MusicError::invariant("no row").into()),
            StatusCode::BAD_REQUEST
        );
        assert_eq!(
            status_of(MusicError::Duplicate("username".to_string()).into()),
            StatusCode::BAD_REQUEST
        );
        assert_eq!(
            status_of(MusicError::Database("boom".to_string()).into()),
            StatusCode::INTERNAL_SERVER_ERROR
        );
    }

    #[tokio::test]
    async fn envelope_reports_fail_for_client_errors() {
        let response = ServerError::BadRequest("name is required".to_string()).into_response();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);

        let body = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        let json: serde_json::Value = serde_json::from_slice(&body).unwrap();
        assert_eq!(json["status"], "fail");
        assert_eq!(json["message"], "name is required");
    }

    #[tokio::test]
    async fn envelope_hides_internal_details() {
        let response = ServerError::Internal("secret detail".to_string()).into_response();
        let body = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        let json: serde_json::Value = serde_json::from_slice(&body).unwrap();
        assert_eq!(json["status"], "error");
        assert_eq!(json["message"], "Internal server error");
    }
}
