/// Core error types for Musicapp
use thiserror::Error;

/// Result type alias using `MusicError`
pub type Result<T> = std::result::Result<T, MusicError>;

/// Core error type shared by the data services.
///
/// The three domain failure kinds (`Authorization`, `NotFound`, `Invariant`)
/// are kept distinct all the way up to the HTTP layer, which owns the
/// status-code mapping.
#[derive(Error, Debug)]
pub enum MusicError {
    /// Caller lacks ownership of, or access to, the referenced resource.
    /// Also returned when the resource does not exist.
    #[error("Authorization failed: {0}")]
    Authorization(String),

    /// Referenced entity is absent
    #[error("{entity} not found: {id}")]
    NotFound { entity: String, id: String },

    /// A required post-condition of a write did not hold
    #[error("Invariant violated: {0}")]
    Invariant(String),

    /// Duplicate entry
    #[error("Duplicate entry: {0}")]
    Duplicate(String),

    /// Serialization errors
    #[error(transparent)]
    Serialization(#[from] serde_json::Error),

    /// Database errors
    #[error("Database error: {0}")]
    Database(String),
}

impl MusicError {
    /// Create an authorization error
    pub fn authorization(msg: impl Into<String>) -> Self {
        Self::Authorization(msg.into())
    }

    /// Create a not found error
    pub fn not_found(entity: impl Into<String>, id: impl Into<String>) -> Self {
        Self::NotFound {
            entity: entity.into(),
            id: id.into(),
        }
    }

    /// Create an invariant error
    pub fn invariant(msg: impl Into<String>) -> Self {
        Self::Invariant(msg.into())
    }
}

#[cfg(feature = "sqlx-support")]
impl From<sqlx::Error> for MusicError {
    fn from(err: sqlx::Error) -> Self {
        if let sqlx::Error::Database(ref db_err) = err {
            if db_err.is_unique_violation() {
                return Self::Duplicate(db_err.message().to_string());
            }
        }
        Self::Database(err.to_string())
    }
}
