//! Single-flight guard for mutating calls.

use std::future::Future;
use std::sync::Arc;

use tokio::sync::Semaphore;

use crate::error::ApiError;

/// Allows at most one mutating call at a time.
///
/// A second submission while one is in flight is refused with
/// [`ApiError::Busy`] instead of queueing.
///
/// Cloning yields a handle to the same guard.
///
/// # Example
///
/// ```
/// use backoffice_lib::SubmitGuard;
///
/// let guard = SubmitGuard::new();
/// assert!(!guard.is_submitting());
/// ```
#[derive(Debug, Clone)]
pub struct SubmitGuard {
    semaphore: Arc<Semaphore>,
}

impl Default for SubmitGuard {
    fn default() -> Self {
        Self::new()
    }
}

impl SubmitGuard {
    pub fn new() -> Self {
        Self {
            semaphore: Arc::new(Semaphore::new(1)),
        }
    }

    /// Returns `true` while a submission holds the guard.
    pub fn is_submitting(&self) -> bool {
        self.semaphore.available_permits() == 0
    }

    /// Runs `call` if no other submission is in flight.
    ///
    /// The guard is released when `call` completes, whatever its result.
    pub async fn run<T, E, Fut>(&self, call: Fut) -> Result<T, E>
    where
        Fut: Future<Output = Result<T, E>>,
        E: From<ApiError>,
    {
        let _permit = self
            .semaphore
            .try_acquire()
            .map_err(|_| E::from(ApiError::Busy))?;
        call.await
    }
}
