/// Export request producer
use crate::error::{Result, ServerError};
use async_trait::async_trait;
use deadpool_redis::Pool;
use musicapp_core::types::{PlaylistId, UserId};
use redis::AsyncCommands;
use serde::{Deserialize, Serialize};

/// Queue consumed by the out-of-process exporter
pub const EXPORT_PLAYLISTS_QUEUE: &str = "export:playlists";

/// Message published for every accepted export request
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ExportPlaylistMessage {
    pub playlist_id: PlaylistId,
    pub credential_id: UserId,
    pub target_email: String,
}

/// Fire-and-forget message enqueue
#[async_trait]
pub trait MessageProducer: Send + Sync {
    async fn send_message(&self, queue: &str, message: String) -> Result<()>;
}

/// Pushes messages onto a Redis list (`RPUSH <queue> <message>`)
pub struct RedisProducer {
    pool: Pool,
}

impl RedisProducer {
    pub fn new(pool: Pool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl MessageProducer for RedisProducer {
    async fn send_message(&self, queue: &str, message: String) -> Result<()> {
        let mut conn = self
            .pool
            .get()
            .await
            .map_err(|e| ServerError::Internal(format!("Export queue unavailable: {e}")))?;

        conn.rpush::<_, _, ()>(queue, message)
            .await
            .map_err(|e| ServerError::Internal(format!("Failed to enqueue export: {e}")))?;

        tracing::debug!(queue = %queue, "Message enqueued");
        Ok(())
    }
}
