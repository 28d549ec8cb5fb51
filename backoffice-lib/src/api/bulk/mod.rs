//! Bulk delete with per-id outcomes
//!
//! Deletes a set of ids and reports, for each id, whether the remote call
//! succeeded. A failure never aborts the run: the remaining ids are still
//! attempted, and every id lands in exactly one outcome list.
//!
//! # Example
//!
//! ```ignore
//! let outcome = delete_records(
//!     &client,
//!     &client.company_root(),
//!     Entity::Inquiry,
//!     selected,
//!     &BulkConfig::default(),
//! )
//! .await?;
//!
//! for failure in &outcome.failed {
//!     println!("{} was not deleted: {}", failure.id, failure.error);
//! }
//! ```

mod config;
mod outcome;

pub use config::*;
pub use outcome::*;

use std::future::Future;
use std::sync::Arc;
use std::time::Duration;

use futures::StreamExt;
use futures::stream;

use crate::api::Method;
use crate::api::RemoteSource;
use crate::error::ApiError;
use crate::error::Error;
use crate::model::Entity;
use crate::model::RecordId;

// =============================================================================
// Generic driver
// =============================================================================

/// Runs `delete_one` for every id and collects per-id outcomes.
///
/// Ids are deduplicated and processed in ascending order. Each call gets
/// `config.call_timeout`; an overrun is recorded as [`ApiError::Timeout`]
/// for that id. An empty id set is rejected before any call is made.
///
/// [`ExecutionMode::Batched`] needs a bulk endpoint and is only accepted by
/// [`delete_records`].
pub async fn delete_many<F, Fut>(
    ids: impl IntoIterator<Item = RecordId>,
    config: &BulkConfig,
    delete_one: F,
) -> Result<BulkOutcome, Error>
where
    F: Fn(RecordId) -> Fut,
    Fut: Future<Output = Result<(), ApiError>>,
{
    let ids = prepare_ids(ids)?;
    let deadline = config.call_timeout;
    let mut outcome = BulkOutcome::new();

    match config.mode {
        ExecutionMode::Sequential => {
            for id in ids {
                let result = with_deadline(deadline, delete_one(id.clone())).await;
                outcome.record(id, result.map_err(Arc::new));
            }
        }
        ExecutionMode::Concurrent { limit } => {
            let mut results: Vec<(RecordId, Result<(), ApiError>)> = stream::iter(ids)
                .map(|id| {
                    let call = with_deadline(deadline, delete_one(id.clone()));
                    async move { (id, call.await) }
                })
                .buffer_unordered(limit.max(1))
                .collect()
                .await;
            results.sort_by(|a, b| a.0.cmp(&b.0));
            for (id, result) in results {
                outcome.record(id, result.map_err(Arc::new));
            }
        }
        ExecutionMode::Batched => {
            return Err(Error::InvalidOperation(
                "batched mode requires a bulk endpoint".to_string(),
            ));
        }
    }

    Ok(outcome)
}

// =============================================================================
// Remote driver
// =============================================================================

/// Deletes records of `entity` through `source`.
///
/// Endpoint paths are relative to `company_url`
/// (`{base}/api/company/{company_id}`). Sequential and concurrent modes
/// call the single-record endpoint once per id. Batched mode sends
/// `{"ids": [...]}` to the entity's bulk endpoint and applies that one
/// result to every id.
pub async fn delete_records(
    source: &dyn RemoteSource,
    company_url: &str,
    entity: Entity,
    ids: impl IntoIterator<Item = RecordId>,
    config: &BulkConfig,
) -> Result<BulkOutcome, Error> {
    let base = company_url.trim_end_matches('/');

    if config.mode != ExecutionMode::Batched {
        return delete_many(ids, config, |id| {
            let url = format!("{}/{}", base, entity.delete_path(id.as_str()));
            async move { send_delete(source, &url, None).await }
        })
        .await;
    }

    let ids = prepare_ids(ids)?;
    log::debug!("bulk deleting {} {} records", ids.len(), entity);

    let url = format!("{}/{}", base, entity.bulk_delete_path());
    let body = serde_json::json!({ "ids": ids });
    let result = with_deadline(config.call_timeout, send_delete(source, &url, Some(body)))
        .await
        .map_err(Arc::new);

    let mut outcome = BulkOutcome::new();
    for id in ids {
        outcome.record(id, result.clone());
    }
    Ok(outcome)
}

async fn send_delete(
    source: &dyn RemoteSource,
    url: &str,
    body: Option<serde_json::Value>,
) -> Result<(), ApiError> {
    source
        .request(Method::Delete, url, body)
        .await?
        .into_result()
        .map(|_| ())
}

// =============================================================================
// Helpers
// =============================================================================

fn prepare_ids(ids: impl IntoIterator<Item = RecordId>) -> Result<Vec<RecordId>, Error> {
    let mut ids: Vec<RecordId> = ids.into_iter().collect();
    if ids.is_empty() {
        return Err(Error::InvalidOperation("no records selected".to_string()));
    }
    ids.sort();
    ids.dedup();
    Ok(ids)
}

async fn with_deadline<Fut>(deadline: Duration, call: Fut) -> Result<(), ApiError>
where
    Fut: Future<Output = Result<(), ApiError>>,
{
    match tokio::time::timeout(deadline, call).await {
        Ok(result) => result,
        Err(_) => Err(ApiError::Timeout(deadline)),
    }
}
