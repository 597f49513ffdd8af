//! Musicapp Server Library
//!
//! Playlist REST backend: Postgres-backed playlists with collaborators, a
//! read-through cache invalidated on every write, and an export queue.
//!
//! This library exposes the core components for testing purposes.

pub mod api;
pub mod config;
pub mod error;
pub mod middleware;
pub mod routes;
pub mod services;
pub mod state;

// Re-export commonly used types for convenience
pub use config::ServerConfig;
pub use error::{Result, ServerError};
pub use routes::create_router;
pub use services::{AuthService, CacheBackend, MessageProducer};
pub use state::AppState;
