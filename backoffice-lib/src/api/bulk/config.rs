//! Bulk mutation configuration

use std::time::Duration;

/// How the ids of a bulk delete are dispatched.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ExecutionMode {
    /// One call at a time, in ascending id order.
    #[default]
    Sequential,
    /// Up to `limit` calls in flight. Outcomes are still reported in
    /// ascending id order.
    Concurrent { limit: usize },
    /// A single call carrying every id. The whole set shares one outcome.
    Batched,
}

/// Configuration for bulk mutations.
///
/// # Example
///
/// ```
/// use std::time::Duration;
/// use backoffice_lib::api::{BulkConfig, ExecutionMode};
///
/// let config = BulkConfig::default()
///     .with_call_timeout(Duration::from_secs(10))
///     .with_mode(ExecutionMode::Concurrent { limit: 4 });
/// ```
#[derive(Debug, Clone)]
pub struct BulkConfig {
    /// Deadline for each remote call. A call that runs over is recorded as
    /// a timeout failure for its id and the run moves on.
    ///
    /// Default: 30 seconds
    pub call_timeout: Duration,

    /// Default: [`ExecutionMode::Sequential`]
    pub mode: ExecutionMode,
}

impl Default for BulkConfig {
    fn default() -> Self {
        Self {
            call_timeout: Duration::from_secs(30),
            mode: ExecutionMode::Sequential,
        }
    }
}

impl BulkConfig {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_call_timeout(mut self, timeout: Duration) -> Self {
        self.call_timeout = timeout;
        self
    }

    pub fn with_mode(mut self, mode: ExecutionMode) -> Self {
        self.mode = mode;
        self
    }
}
