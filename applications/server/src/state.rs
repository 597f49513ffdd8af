/// Shared application state
use crate::services::{
    AuthService, CacheBackend, CollaborationsService, MessageProducer, PlaylistsService,
};
use sqlx::PgPool;
use std::sync::Arc;
use std::time::Duration;

/// Application state shared across all handlers
#[derive(Clone)]
pub struct AppState {
    pub pool: PgPool,
    pub auth_service: Arc<AuthService>,
    pub cache: CacheBackend,
    pub cache_ttl: Duration,
    pub playlists: Arc<PlaylistsService>,
    pub collaborations: Arc<CollaborationsService>,
    pub producer: Arc<dyn MessageProducer>,
}

impl AppState {
    /// Wire the data services around one pool and one cache
    pub fn new(
        pool: PgPool,
        auth_service: Arc<AuthService>,
        cache: CacheBackend,
        cache_ttl: Duration,
        producer: Arc<dyn MessageProducer>,
    ) -> Self {
        let playlists = Arc::new(PlaylistsService::new(pool.clone(), cache.clone()));
        let collaborations = Arc::new(CollaborationsService::new(pool.clone(), cache.clone()));

        Self {
            pool,
            auth_service,
            cache,
            cache_ttl,
            playlists,
            collaborations,
            producer,
        }
    }
}
