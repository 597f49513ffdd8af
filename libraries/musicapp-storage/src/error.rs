/// Storage-specific errors
use thiserror::Error;

/// Errors raised while bootstrapping the database (pool, migrations).
///
/// Query-level failures are reported as [`musicapp_core::MusicError`].
#[derive(Error, Debug)]
pub enum StorageError {
    /// Database connection error
    #[error("Database connection error: {0}")]
    Connection(String),

    /// Migration error
    #[error("Migration error: {0}")]
    Migration(#[from] sqlx::migrate::MigrateError),

    /// Database error from `SQLx`
    #[error(transparent)]
    Database(#[from] sqlx::Error),
}

impl From<StorageError> for musicapp_core::MusicError {
    fn from(err: StorageError) -> Self {
        musicapp_core::MusicError::Database(err.to_string())
    }
}
