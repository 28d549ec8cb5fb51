//! HTTP client for the back-office API

use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use reqwest::Client;

use crate::api::Method;
use crate::api::RemoteResponse;
use crate::api::RemoteSource;
use crate::cache::CacheConfig;
use crate::cache::CacheProvider;
use crate::cache::Collection;
use crate::cache::InMemoryCache;
use crate::error::ApiError;
use crate::error::Error;
use crate::model::Entity;

/// Environment variable holding the API base URL.
pub const ENV_API_URL: &str = "BACKOFFICE_API_URL";
/// Environment variable holding the company id.
pub const ENV_COMPANY_ID: &str = "BACKOFFICE_COMPANY_ID";

/// The client for one company's back-office API.
///
/// This client is cheap to clone (uses `Arc` internally) and can be shared
/// across threads safely. Every [`Collection`] it hands out reads through
/// the same cache.
///
/// # Example
///
/// ```ignore
/// use backoffice_lib::{ConsoleClient, model::Entity};
///
/// let client = ConsoleClient::builder()
///     .base_url("https://admin.example.com")
///     .company_id("64f1c0")
///     .build()?;
///
/// let inquiries = client.collection(Entity::Inquiry);
/// let state = inquiries.load().await;
/// ```
#[derive(Clone)]
pub struct ConsoleClient {
    inner: Arc<ConsoleClientInner>,
}

struct ConsoleClientInner {
    base_url: String,
    company_id: String,
    http_client: Client,
    timeout: Option<Duration>,
    cache: Arc<dyn CacheProvider>,
    cache_config: CacheConfig,
}

impl std::fmt::Debug for ConsoleClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ConsoleClient")
            .field("base_url", &self.inner.base_url)
            .field("company_id", &self.inner.company_id)
            .finish_non_exhaustive()
    }
}

impl ConsoleClient {
    /// Creates a new builder for constructing a client.
    pub fn builder() -> ConsoleClientBuilder<Missing, Missing> {
        ConsoleClientBuilder::new()
    }

    /// Builds a client from [`ENV_API_URL`] and [`ENV_COMPANY_ID`].
    pub fn from_env() -> Result<Self, Error> {
        let base_url = read_env(ENV_API_URL)?;
        let company_id = read_env(ENV_COMPANY_ID)?;
        Self::builder().base_url(base_url).company_id(company_id).build()
    }

    pub fn base_url(&self) -> &str {
        &self.inner.base_url
    }

    pub fn company_id(&self) -> &str {
        &self.inner.company_id
    }

    /// `{base}/api/company/{company_id}`
    pub fn company_root(&self) -> String {
        format!(
            "{}/api/company/{}",
            self.inner.base_url.trim_end_matches('/'),
            urlencoding::encode(&self.inner.company_id)
        )
    }

    /// `{base}/api/company/{company_id}/{path}`
    pub fn company_url(&self, path: &str) -> String {
        format!("{}/{}", self.company_root(), path.trim_start_matches('/'))
    }

    /// List endpoint of an entity collection.
    pub fn collection_url(&self, entity: Entity) -> String {
        self.company_url(entity.collection())
    }

    /// A cached handle to an entity collection.
    pub fn collection(&self, entity: Entity) -> Collection {
        Collection::new(
            entity,
            self.company_root(),
            Arc::new(self.clone()),
            self.inner.cache.clone(),
            self.inner.cache_config.clone(),
        )
    }

    fn prepare(&self, method: Method, url: &str) -> reqwest::RequestBuilder {
        let method = match method {
            Method::Get => reqwest::Method::GET,
            Method::Post => reqwest::Method::POST,
            Method::Put => reqwest::Method::PUT,
            Method::Delete => reqwest::Method::DELETE,
        };
        let mut request = self.inner.http_client.request(method, url);
        if let Some(timeout) = self.inner.timeout {
            request = request.timeout(timeout);
        }
        request
    }
}

#[async_trait]
impl RemoteSource for ConsoleClient {
    async fn fetch(&self, url: &str) -> Result<serde_json::Value, ApiError> {
        log::debug!("GET {}", url);
        let response = self.request(Method::Get, url, None).await?;
        response.into_result()
    }

    async fn request(
        &self,
        method: Method,
        url: &str,
        body: Option<serde_json::Value>,
    ) -> Result<RemoteResponse, ApiError> {
        let mut request = self.prepare(method, url);
        if let Some(body) = &body {
            request = request.json(body);
        }

        let response = request.send().await?;
        let status = response.status().as_u16();
        let text = response.text().await?;
        log::debug!("{} {} -> {}", method.as_str(), url, status);

        Ok(RemoteResponse::new(status, decode_body(status, text)?))
    }
}

/// Decodes a response body. Error responses that are not JSON keep their
/// text as the message.
fn decode_body(status: u16, text: String) -> Result<serde_json::Value, ApiError> {
    if text.trim().is_empty() {
        return Ok(serde_json::Value::Null);
    }
    match serde_json::from_str(&text) {
        Ok(value) => Ok(value),
        Err(_) if status != 200 => Ok(serde_json::json!({ "message": text })),
        Err(e) => Err(ApiError::parse_with_body(e.to_string(), text)),
    }
}

fn read_env(name: &str) -> Result<String, Error> {
    std::env::var(name).map_err(|_| Error::InvalidOperation(format!("{} is not set", name)))
}

// =============================================================================
// Typestate Builder
// =============================================================================

/// Marker type for missing required builder fields.
pub struct Missing;

/// Marker type for set builder fields.
pub struct Set<T>(T);

/// Builder for constructing a [`ConsoleClient`].
///
/// Uses the typestate pattern to ensure required fields are set at compile time.
///
/// # Required Fields
///
/// - `base_url` - Root URL of the API server
/// - `company_id` - The company whose data the client reads
pub struct ConsoleClientBuilder<Url, Company> {
    base_url: Url,
    company_id: Company,
    timeout: Option<Duration>,
    connect_timeout: Option<Duration>,
    http_client: Option<Client>,
    cache: Option<Arc<dyn CacheProvider>>,
    cache_config: CacheConfig,
}

impl ConsoleClientBuilder<Missing, Missing> {
    /// Creates a new builder with default settings.
    pub fn new() -> Self {
        Self {
            base_url: Missing,
            company_id: Missing,
            timeout: None,
            connect_timeout: None,
            http_client: None,
            cache: None,
            cache_config: CacheConfig::default(),
        }
    }
}

impl Default for ConsoleClientBuilder<Missing, Missing> {
    fn default() -> Self {
        Self::new()
    }
}

impl<C> ConsoleClientBuilder<Missing, C> {
    /// Sets the API root, e.g. `https://admin.example.com`.
    pub fn base_url(self, url: impl Into<String>) -> ConsoleClientBuilder<Set<String>, C> {
        ConsoleClientBuilder {
            base_url: Set(url.into()),
            company_id: self.company_id,
            timeout: self.timeout,
            connect_timeout: self.connect_timeout,
            http_client: self.http_client,
            cache: self.cache,
            cache_config: self.cache_config,
        }
    }
}

impl<U> ConsoleClientBuilder<U, Missing> {
    pub fn company_id(self, id: impl Into<String>) -> ConsoleClientBuilder<U, Set<String>> {
        ConsoleClientBuilder {
            base_url: self.base_url,
            company_id: Set(id.into()),
            timeout: self.timeout,
            connect_timeout: self.connect_timeout,
            http_client: self.http_client,
            cache: self.cache,
            cache_config: self.cache_config,
        }
    }
}

impl<U, C> ConsoleClientBuilder<U, C> {
    /// Sets the per-request timeout.
    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }

    /// Sets the connection timeout.
    ///
    /// Ignored when a custom HTTP client is supplied.
    pub fn connect_timeout(mut self, timeout: Duration) -> Self {
        self.connect_timeout = Some(timeout);
        self
    }

    /// Sets a custom HTTP client.
    pub fn http_client(mut self, client: Client) -> Self {
        self.http_client = Some(client);
        self
    }

    /// Sets the cache shared by collections. Defaults to an [`InMemoryCache`].
    pub fn cache<T: CacheProvider + 'static>(mut self, cache: T) -> Self {
        self.cache = Some(Arc::new(cache));
        self
    }

    pub fn cache_config(mut self, config: CacheConfig) -> Self {
        self.cache_config = config;
        self
    }
}

impl ConsoleClientBuilder<Set<String>, Set<String>> {
    /// Builds the [`ConsoleClient`].
    ///
    /// Fails when the base URL does not parse or the HTTP client cannot be
    /// constructed.
    pub fn build(self) -> Result<ConsoleClient, Error> {
        let base_url = self.base_url.0;
        url::Url::parse(&base_url)
            .map_err(|e| ApiError::InvalidUrl(format!("{}: {}", base_url, e)))?;

        let http_client = match self.http_client {
            Some(client) => client,
            None => {
                let mut builder = Client::builder();
                if let Some(timeout) = self.connect_timeout {
                    builder = builder.connect_timeout(timeout);
                }
                builder.build().map_err(ApiError::from)?
            }
        };

        Ok(ConsoleClient {
            inner: Arc::new(ConsoleClientInner {
                base_url,
                company_id: self.company_id.0,
                http_client,
                timeout: self.timeout,
                cache: self
                    .cache
                    .unwrap_or_else(|| Arc::new(InMemoryCache::new())),
                cache_config: self.cache_config,
            }),
        })
    }
}
