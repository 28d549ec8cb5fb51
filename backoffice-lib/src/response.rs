//! Response wrapper with cache status

use chrono::DateTime;
use chrono::Utc;

/// Fetched data plus where it came from.
///
/// [`Collection::fetch`](crate::cache::Collection::fetch) returns this
/// wrapper so callers can tell cached data from a fresh fetch.
///
/// # Example
///
/// ```ignore
/// let response = collection.fetch().await?;
///
/// if response.is_cached() {
///     println!("Data from cache, cached at {:?}", response.cached_at());
/// }
///
/// let records = response.into_inner();
/// ```
#[derive(Debug, Clone)]
pub struct Response<T> {
    data: T,
    /// Information about whether this response came from cache.
    pub cache: CacheStatus,
}

impl<T> Response<T> {
    /// Creates a new response with no cache involvement.
    pub fn new(data: T) -> Self {
        Self {
            data,
            cache: CacheStatus::None,
        }
    }

    pub fn with_status(data: T, cache: CacheStatus) -> Self {
        Self { data, cache }
    }

    /// Returns `true` if this response came from the cache.
    pub fn is_cached(&self) -> bool {
        matches!(self.cache, CacheStatus::Hit { .. } | CacheStatus::Stale { .. })
    }

    /// Returns `true` if this was a fresh fetch (cache miss or cache disabled).
    pub fn is_fresh(&self) -> bool {
        !self.is_cached()
    }

    /// Returns when the data was cached, if applicable.
    pub fn cached_at(&self) -> Option<DateTime<Utc>> {
        self.cache.cached_at()
    }

    pub fn data(&self) -> &T {
        &self.data
    }

    pub fn into_inner(self) -> T {
        self.data
    }

    /// Maps the inner data using the provided function.
    pub fn map<U, F: FnOnce(T) -> U>(self, f: F) -> Response<U> {
        Response {
            data: f(self.data),
            cache: self.cache,
        }
    }
}

/// Cache status for a response.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum CacheStatus {
    /// Cache was disabled or bypassed for this request.
    #[default]
    None,
    /// Cache miss - data was freshly fetched and is now cached.
    Miss {
        cached_at: DateTime<Utc>,
        expires_at: DateTime<Utc>,
    },
    /// Cache hit - data was returned from a live cache entry.
    Hit {
        cached_at: DateTime<Utc>,
        expires_at: DateTime<Utc>,
    },
    /// Revalidation failed and an expired entry was served instead.
    Stale {
        cached_at: DateTime<Utc>,
        expired_at: DateTime<Utc>,
    },
}

impl CacheStatus {
    pub fn is_hit(&self) -> bool {
        matches!(self, Self::Hit { .. })
    }

    pub fn is_miss(&self) -> bool {
        matches!(self, Self::Miss { .. })
    }

    pub fn is_stale(&self) -> bool {
        matches!(self, Self::Stale { .. })
    }

    /// Returns `true` if caching was not involved.
    pub fn is_none(&self) -> bool {
        matches!(self, Self::None)
    }

    pub fn cached_at(&self) -> Option<DateTime<Utc>> {
        match self {
            Self::None => None,
            Self::Miss { cached_at, .. }
            | Self::Hit { cached_at, .. }
            | Self::Stale { cached_at, .. } => Some(*cached_at),
        }
    }
}
