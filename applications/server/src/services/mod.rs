/// Server services
pub mod auth;
pub mod cache;
pub mod collaborations;
pub mod playlists;
pub mod producer;

pub use auth::AuthService;
pub use cache::CacheBackend;
pub use collaborations::CollaborationsService;
pub use playlists::PlaylistsService;
pub use producer::{MessageProducer, RedisProducer};
