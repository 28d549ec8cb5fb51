//! Per-id results of a bulk mutation.

use std::sync::Arc;

use crate::error::ApiError;
use crate::model::RecordId;
use crate::notice::Notice;

// =============================================================================
// Item Failure
// =============================================================================

/// A single id that could not be mutated.
#[derive(Debug, Clone)]
pub struct ItemFailure {
    pub id: RecordId,
    /// Shared because a batched call fails every id with the same error.
    pub error: Arc<ApiError>,
}

impl std::fmt::Display for ItemFailure {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}: {}", self.id, self.error)
    }
}

// =============================================================================
// Bulk Outcome
// =============================================================================

/// Result of a bulk mutation.
///
/// Every requested id lands in exactly one of `succeeded` or `failed`, and
/// both lists are in ascending id order.
#[derive(Debug, Clone, Default)]
pub struct BulkOutcome {
    pub succeeded: Vec<RecordId>,
    pub failed: Vec<ItemFailure>,
}

impl BulkOutcome {
    pub fn new() -> Self {
        Self::default()
    }

    pub(crate) fn record(&mut self, id: RecordId, result: Result<(), Arc<ApiError>>) {
        match result {
            Ok(()) => self.succeeded.push(id),
            Err(error) => {
                log::warn!("delete of {} failed: {}", id, error);
                self.failed.push(ItemFailure { id, error });
            }
        }
    }

    /// Number of ids attempted.
    pub fn len(&self) -> usize {
        self.succeeded.len() + self.failed.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Returns `true` when nothing failed.
    pub fn all_succeeded(&self) -> bool {
        self.failed.is_empty()
    }

    /// Returns `true` when some ids succeeded and some failed.
    pub fn is_partial(&self) -> bool {
        !self.succeeded.is_empty() && !self.failed.is_empty()
    }

    /// The error shown to the operator: the first failure in id order.
    pub fn representative_error(&self) -> Option<&ApiError> {
        self.failed.first().map(|failure| failure.error.as_ref())
    }

    pub fn failed_ids(&self) -> impl Iterator<Item = &RecordId> {
        self.failed.iter().map(|failure| &failure.id)
    }

    /// Summarizes the run as one notification.
    pub fn notice(&self) -> Notice {
        match self.representative_error() {
            None => Notice::success("Delete success!"),
            Some(error) if self.succeeded.is_empty() => Notice::error(error.to_string()),
            Some(error) => Notice::error(format!(
                "Deleted {} of {}; {} failed: {}",
                self.succeeded.len(),
                self.len(),
                self.failed.len(),
                error
            )),
        }
    }
}
