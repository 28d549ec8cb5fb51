//! In-memory stand-in for the back-office API.

#![allow(dead_code)]

use std::collections::HashSet;
use std::sync::Arc;
use std::sync::Mutex;
use std::time::Duration;

use async_trait::async_trait;
use backoffice_lib::ConsoleClient;
use backoffice_lib::api::Method;
use backoffice_lib::api::RemoteResponse;
use backoffice_lib::api::RemoteSource;
use backoffice_lib::cache::CacheConfig;
use backoffice_lib::cache::Collection;
use backoffice_lib::cache::InMemoryCache;
use backoffice_lib::error::ApiError;
use backoffice_lib::model::Entity;
use serde_json::json;

pub const BASE: &str = "http://backoffice.test/api/company/c1";

/// Serves one collection and applies deletes to it.
pub struct FakeApi {
    entity: Entity,
    rows: Mutex<Vec<serde_json::Value>>,
    failing: Mutex<HashSet<String>>,
    slow: Mutex<HashSet<String>>,
    delay: Duration,
    fetch_down: Mutex<bool>,
    fetch_delay: Mutex<Option<Duration>>,
    pub requests: Mutex<Vec<(Method, String, Option<serde_json::Value>)>>,
}

impl FakeApi {
    pub fn new(entity: Entity, rows: Vec<serde_json::Value>) -> Arc<Self> {
        Arc::new(Self {
            entity,
            rows: Mutex::new(rows),
            failing: Mutex::new(HashSet::new()),
            slow: Mutex::new(HashSet::new()),
            delay: Duration::from_secs(60),
            fetch_down: Mutex::new(false),
            fetch_delay: Mutex::new(None),
            requests: Mutex::new(Vec::new()),
        })
    }

    /// Deletes of `id` answer 500.
    pub fn fail_on(&self, id: &str) {
        self.failing.lock().unwrap().insert(id.to_string());
    }

    /// Deletes of `id` take a minute.
    pub fn stall_on(&self, id: &str) {
        self.slow.lock().unwrap().insert(id.to_string());
    }

    pub fn set_fetch_down(&self, down: bool) {
        *self.fetch_down.lock().unwrap() = down;
    }

    /// List reads take `delay` before answering.
    pub fn stall_fetch(&self, delay: Duration) {
        *self.fetch_delay.lock().unwrap() = Some(delay);
    }

    pub fn row_ids(&self) -> Vec<String> {
        self.rows
            .lock()
            .unwrap()
            .iter()
            .filter_map(|row| row["_id"].as_str().map(str::to_string))
            .collect()
    }

    pub fn delete_urls(&self) -> Vec<String> {
        self.requests
            .lock()
            .unwrap()
            .iter()
            .filter(|(method, _, _)| *method == Method::Delete)
            .map(|(_, url, _)| url.clone())
            .collect()
    }

    pub fn collection_url(&self) -> String {
        format!("{}/{}", BASE, self.entity.collection())
    }

    pub fn collection(self: &Arc<Self>) -> Collection {
        Collection::new(
            self.entity,
            BASE,
            self.clone(),
            Arc::new(InMemoryCache::new()),
            CacheConfig::default(),
        )
    }

    fn remove(&self, ids: &[String]) -> RemoteResponse {
        let failing = self.failing.lock().unwrap();
        if let Some(id) = ids.iter().find(|id| failing.contains(*id)) {
            return RemoteResponse::new(500, json!({ "message": format!("Cannot delete {}", id) }));
        }
        self.rows
            .lock()
            .unwrap()
            .retain(|row| !ids.iter().any(|id| row["_id"] == id.as_str()));
        RemoteResponse::new(200, json!({ "message": "Deleted" }))
    }
}

#[async_trait]
impl RemoteSource for FakeApi {
    async fn fetch(&self, url: &str) -> Result<serde_json::Value, ApiError> {
        let delay = *self.fetch_delay.lock().unwrap();
        if let Some(delay) = delay {
            tokio::time::sleep(delay).await;
        }
        if *self.fetch_down.lock().unwrap() {
            return Err(ApiError::http(503, "Service unavailable"));
        }
        assert_eq!(url, self.collection_url());
        let rows = serde_json::Value::Array(self.rows.lock().unwrap().clone());
        let data = match self.entity.payload_key() {
            Some(key) => {
                let mut wrapped = serde_json::Map::new();
                wrapped.insert(key.to_string(), rows);
                serde_json::Value::Object(wrapped)
            }
            None => rows,
        };
        Ok(json!({ "data": data }))
    }

    async fn request(
        &self,
        method: Method,
        url: &str,
        body: Option<serde_json::Value>,
    ) -> Result<RemoteResponse, ApiError> {
        self.requests
            .lock()
            .unwrap()
            .push((method, url.to_string(), body.clone()));

        let path = url
            .strip_prefix(BASE)
            .and_then(|p| p.strip_prefix('/'))
            .unwrap_or(url);

        if path == self.entity.bulk_delete_path() {
            let ids: Vec<String> = body
                .as_ref()
                .and_then(|b| b["ids"].as_array())
                .map(|ids| ids.iter().filter_map(|id| id.as_str().map(str::to_string)).collect())
                .unwrap_or_default();
            return Ok(self.remove(&ids));
        }

        let id = path.split('/').next().unwrap_or_default().to_string();
        let stalls = self.slow.lock().unwrap().contains(&id);
        if stalls {
            tokio::time::sleep(self.delay).await;
        }
        Ok(self.remove(&[id]))
    }
}

pub fn inquiry(id: &str, first_name: &str, status: &str, created_at: &str) -> serde_json::Value {
    json!({
        "_id": id,
        "firstName": first_name,
        "lastName": "Patel",
        "email": format!("{}@mail.test", first_name.to_lowercase()),
        "contact": 9876500000u64,
        "status": status,
        "createdAt": created_at,
    })
}

/// Builds a client against an unreachable host, for URL assembly only.
pub fn offline_client() -> ConsoleClient {
    ConsoleClient::builder()
        .base_url("http://backoffice.test")
        .company_id("c1")
        .build()
        .unwrap()
}
