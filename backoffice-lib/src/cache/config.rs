//! Cache configuration

use std::time::Duration;

/// Configuration for cache TTL (time-to-live) settings.
///
/// # Example
///
/// ```
/// use std::time::Duration;
/// use backoffice_lib::cache::CacheConfig;
///
/// let config = CacheConfig::default().with_collection_ttl(Duration::from_secs(60));
/// assert_eq!(config.collection_ttl, Duration::from_secs(60));
/// ```
#[derive(Debug, Clone)]
pub struct CacheConfig {
    /// How long a fetched collection is served without revalidating.
    ///
    /// Default: 5 minutes
    pub collection_ttl: Duration,
}

impl Default for CacheConfig {
    fn default() -> Self {
        Self {
            collection_ttl: Duration::from_secs(300), // 5 minutes
        }
    }
}

impl CacheConfig {
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the collection TTL.
    pub fn with_collection_ttl(mut self, ttl: Duration) -> Self {
        self.collection_ttl = ttl;
        self
    }

    /// Creates a config that revalidates on every load.
    pub fn no_cache() -> Self {
        Self {
            collection_ttl: Duration::ZERO,
        }
    }
}
