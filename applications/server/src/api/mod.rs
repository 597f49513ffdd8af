/// API route modules
pub mod auth;
pub mod collaborations;
pub mod exports;
pub mod health;
pub mod playlists;
pub mod songs;
pub mod users;
pub mod validation;

use crate::{error::Result, services::CacheBackend};
use axum::{
    http::{HeaderName, HeaderValue, StatusCode},
    response::{IntoResponse, Response},
    Json,
};
use serde::{de::DeserializeOwned, Serialize};
use std::future::Future;
use std::time::Duration;

/// Header marking a response served from the cache
pub const DATA_SOURCE_HEADER: HeaderName = HeaderName::from_static("x-data-source");

/// Response envelope: `{status, message?, data?}`
#[derive(Debug, Serialize)]
pub struct ApiResponse<T: Serialize> {
    pub status: &'static str,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<T>,
}

impl ApiResponse<()> {
    pub fn message(message: impl Into<String>) -> Self {
        Self {
            status: "success",
            message: Some(message.into()),
            data: None,
        }
    }
}

impl<T: Serialize> ApiResponse<T> {
    pub fn data(data: T) -> Self {
        Self {
            status: "success",
            message: None,
            data: Some(data),
        }
    }

    pub fn with_message(message: impl Into<String>, data: T) -> Self {
        Self {
            status: "success",
            message: Some(message.into()),
            data: Some(data),
        }
    }

    /// 201 response
    pub fn created(self) -> Response {
        (StatusCode::CREATED, Json(self)).into_response()
    }
}

/// Where a read was served from
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DataSource {
    Cache,
    Database,
}

impl DataSource {
    /// Wrap a body, tagging cache hits with `X-Data-Source: cache`
    pub fn respond<T: Serialize>(self, body: ApiResponse<T>) -> Response {
        let mut response = Json(body).into_response();
        if self == DataSource::Cache {
            response
                .headers_mut()
                .insert(DATA_SOURCE_HEADER, HeaderValue::from_static("cache"));
        }
        response
    }
}

/// Cache-first read: return the entry under `key` if present, otherwise run
/// `load`, store its result for `ttl` and return it. The result is not stored
/// if `key` was invalidated while `load` ran.
///
/// Callers run their authorization checks before this; a hit never touches
/// the database.
pub async fn read_through<T, F, Fut>(
    cache: &CacheBackend,
    key: &str,
    ttl: Duration,
    load: F,
) -> Result<(T, DataSource)>
where
    T: Serialize + DeserializeOwned,
    F: FnOnce() -> Fut,
    Fut: Future<Output = musicapp_core::Result<T>>,
{
    if let Some(value) = cache.get_json(key).await {
        return Ok((value, DataSource::Cache));
    }

    tracing::debug!(key = %key, "cache miss");
    let version = cache.version(key).await;
    let value = load().await?;
    // Without a version the fill could overwrite a newer invalidation
    if let Some(version) = version {
        cache.set_json_if_current(key, &value, ttl, version).await;
    }

    Ok((value, DataSource::Database))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicUsize, Ordering};

    #[tokio::test]
    async fn read_through_loads_once_then_hits() {
        let cache = CacheBackend::new_local();
        let loads = AtomicUsize::new(0);
        let ttl = Duration::from_secs(60);

        for expected in [DataSource::Database, DataSource::Cache, DataSource::Cache] {
            let (value, source) = read_through(&cache, "playlists:user-1", ttl, || async {
                loads.fetch_add(1, Ordering::SeqCst);
                Ok(vec!["Road Trip".to_string()])
            })
            .await
            .unwrap();

            assert_eq!(value, vec!["Road Trip".to_string()]);
            assert_eq!(source, expected);
        }
        assert_eq!(loads.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn failed_load_is_not_cached() {
        let cache = CacheBackend::new_local();
        let result: Result<(Vec<String>, DataSource)> =
            read_through(&cache, "k", Duration::from_secs(60), || async {
                Err(musicapp_core::MusicError::Database("down".to_string()))
            })
            .await;

        assert!(result.is_err());
        assert!(cache.get("k").await.is_none());
    }

    #[tokio::test]
    async fn invalidation_during_load_is_not_overwritten() {
        let cache = CacheBackend::new_local();
        let ttl = Duration::from_secs(60);

        let (value, source) = read_through(&cache, "playlists:user-1", ttl, || async {
            // A playlist write commits and invalidates while this read is in flight
            cache.delete("playlists:user-1").await;
            Ok(vec!["Road Trip".to_string()])
        })
        .await
        .unwrap();
        assert_eq!(value, vec!["Road Trip".to_string()]);
        assert_eq!(source, DataSource::Database);
        assert!(cache.get("playlists:user-1").await.is_none());

        let (value, source) = read_through(&cache, "playlists:user-1", ttl, || async {
            Ok(vec!["Road Trip".to_string(), "Focus".to_string()])
        })
        .await
        .unwrap();
        assert_eq!(value.len(), 2);
        assert_eq!(source, DataSource::Database);
        assert!(cache.get("playlists:user-1").await.is_some());
    }

    #[test]
    fn cache_hits_are_tagged() {
        let hit = DataSource::Cache.respond(ApiResponse::data(1));
        assert_eq!(hit.headers().get(DATA_SOURCE_HEADER).unwrap(), "cache");

        let miss = DataSource::Database.respond(ApiResponse::data(1));
        assert!(miss.headers().get(DATA_SOURCE_HEADER).is_none());
    }
}
