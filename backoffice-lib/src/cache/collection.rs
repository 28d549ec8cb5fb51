//! Cached handle to one remote collection.

use std::sync::Arc;
use std::sync::Mutex;
use std::sync::PoisonError;

use super::CacheConfig;
use super::CacheProvider;
use super::CachedValue;
use crate::api::RemoteSource;
use crate::error::ApiError;
use crate::model::Entity;
use crate::model::Record;
use crate::response::CacheStatus;
use crate::response::Response;

/// Snapshot of a collection as a list screen sees it.
#[derive(Debug, Clone, Default)]
pub struct CollectionState {
    pub records: Vec<Record>,
    pub cache: CacheStatus,
    /// Error of the most recent fetch. `records` still holds the last good
    /// data when there was any.
    pub error: Option<Arc<ApiError>>,
    /// A fetch is in flight and there is no data yet.
    pub is_loading: bool,
    /// A fetch is in flight.
    pub is_validating: bool,
}

impl CollectionState {
    /// Returns `true` once loading finished with no records.
    pub fn is_empty(&self) -> bool {
        !self.is_loading && self.records.is_empty()
    }
}

/// A collection endpoint read through the shared cache.
///
/// The list URL is `{company_url}/{collection}`. It doubles as the cache
/// key, so every handle to the same URL sees the same entry.
/// [`Collection::mutate`] drops that entry and reloads.
pub struct Collection {
    entity: Entity,
    company_url: String,
    url: String,
    source: Arc<dyn RemoteSource>,
    cache: Arc<dyn CacheProvider>,
    config: CacheConfig,
    state: Mutex<CollectionState>,
}

impl std::fmt::Debug for Collection {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Collection")
            .field("entity", &self.entity)
            .field("url", &self.url)
            .field("config", &self.config)
            .finish_non_exhaustive()
    }
}

impl Collection {
    pub fn new(
        entity: Entity,
        company_url: impl Into<String>,
        source: Arc<dyn RemoteSource>,
        cache: Arc<dyn CacheProvider>,
        config: CacheConfig,
    ) -> Self {
        let company_url = company_url.into().trim_end_matches('/').to_string();
        Self {
            entity,
            url: format!("{}/{}", company_url, entity.collection()),
            company_url,
            source,
            cache,
            config,
            state: Mutex::new(CollectionState::default()),
        }
    }

    pub fn entity(&self) -> Entity {
        self.entity
    }

    /// The list endpoint, also the cache key.
    pub fn url(&self) -> &str {
        &self.url
    }

    /// Root that mutation paths are relative to.
    pub fn company_url(&self) -> &str {
        &self.company_url
    }

    pub(crate) fn source(&self) -> &dyn RemoteSource {
        self.source.as_ref()
    }

    /// The current snapshot, including in-flight flags.
    pub fn state(&self) -> CollectionState {
        self.lock().clone()
    }

    pub fn is_empty(&self) -> bool {
        self.lock().is_empty()
    }

    /// Loads the collection and returns the new snapshot.
    ///
    /// A failed fetch keeps the previously known records, falling back to an
    /// expired cache entry, and sets `error`.
    pub async fn load(&self) -> CollectionState {
        {
            let mut state = self.lock();
            state.is_validating = true;
            state.is_loading = state.records.is_empty();
        }

        let result = self.fetch().await;
        let had_records = !self.lock().records.is_empty();
        let stale = match &result {
            Err(_) if !had_records => self.stale().await,
            _ => None,
        };

        let mut state = self.lock();
        state.is_validating = false;
        state.is_loading = false;
        match result {
            Ok(response) => {
                state.cache = response.cache;
                state.records = response.into_inner();
                state.error = None;
            }
            Err(err) => {
                log::error!("failed to load {}: {}", self.url, err);
                if let Some((records, status)) = stale {
                    state.records = records;
                    state.cache = status;
                }
                state.error = Some(Arc::new(err));
            }
        }
        state.clone()
    }

    /// Drops the cached entry and reloads.
    pub async fn mutate(&self) -> CollectionState {
        log::debug!("revalidating {}", self.url);
        self.cache.remove(&self.url).await;
        self.load().await
    }

    /// Returns the records, from a live cache entry when there is one.
    pub async fn fetch(&self) -> Result<Response<Vec<Record>>, ApiError> {
        if let Some(cached) = self.cache.get(&self.url).await {
            log::debug!("cache hit for {}", self.url);
            let records = decode(&cached.data)?;
            return Ok(Response::with_status(
                records,
                CacheStatus::Hit {
                    cached_at: cached.created_at,
                    expires_at: cached.expires_at,
                },
            ));
        }

        let body = self.source.fetch(&self.url).await?;
        let rows = extract_rows(self.entity, body)?;
        let data = serde_json::to_vec(&rows).map_err(|e| ApiError::parse(e.to_string()))?;
        let records = decode(&data)?;

        let cached = CachedValue::with_ttl(data, self.config.collection_ttl);
        let status = CacheStatus::Miss {
            cached_at: cached.created_at,
            expires_at: cached.expires_at,
        };
        self.cache.set(&self.url, cached).await;

        Ok(Response::with_status(records, status))
    }

    async fn stale(&self) -> Option<(Vec<Record>, CacheStatus)> {
        let cached = self.cache.peek(&self.url).await?;
        let records = decode(&cached.data).ok()?;
        Some((
            records,
            CacheStatus::Stale {
                cached_at: cached.created_at,
                expired_at: cached.expires_at,
            },
        ))
    }

    fn lock(&self) -> std::sync::MutexGuard<'_, CollectionState> {
        self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

/// Pulls the row array out of a list payload: `data.<key>`, or `data`
/// itself for entities without a payload key. A missing array is empty.
fn extract_rows(entity: Entity, body: serde_json::Value) -> Result<serde_json::Value, ApiError> {
    let data = body.get("data").unwrap_or(&serde_json::Value::Null);
    let rows = match entity.payload_key() {
        Some(key) => data.get(key).unwrap_or(&serde_json::Value::Null),
        None => data,
    };

    match rows {
        serde_json::Value::Null => Ok(serde_json::Value::Array(Vec::new())),
        serde_json::Value::Array(_) => Ok(rows.clone()),
        other => Err(ApiError::parse_with_body(
            format!("expected an array of {} records", entity),
            other.to_string(),
        )),
    }
}

fn decode(data: &[u8]) -> Result<Vec<Record>, ApiError> {
    serde_json::from_slice(data).map_err(|e| ApiError::parse(e.to_string()))
}
