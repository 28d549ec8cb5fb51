//! List screen controller.
//!
//! [`ListView`] is what a list page drives: it owns the table state, the
//! filter values and the delete confirmation flag for one entity
//! collection, and turns intents into state changes, remote calls and
//! notifications.

use std::sync::Mutex;
use std::sync::MutexGuard;
use std::sync::PoisonError;
use std::sync::atomic::AtomicBool;
use std::sync::atomic::Ordering;

use crate::api::BulkConfig;
use crate::api::BulkOutcome;
use crate::api::delete_records;
use crate::api::query;
use crate::api::query::FilterCriteria;
use crate::api::query::FilterFields;
use crate::api::query::FilterUpdate;
use crate::cache::Collection;
use crate::cache::CollectionState;
use crate::error::Error;
use crate::model::RecordId;
use crate::notice::Notice;
use crate::submit::SubmitGuard;
use crate::table::TableConfig;
use crate::table::TableState;
use crate::table::TableView;

/// Result of a delete intent that reached the server.
#[derive(Debug, Clone)]
pub struct DeleteReport {
    pub outcome: BulkOutcome,
    /// The one notification to show for the whole run.
    pub notice: Notice,
}

/// Controller for one entity list screen.
///
/// Every intent takes `&self`, so the view can be read (and
/// [`ListView::is_submitting`] sampled) while a load or delete is in
/// flight. A second delete issued during that time is refused with
/// [`ApiError::Busy`](crate::error::ApiError::Busy).
///
/// Locks are held only for the duration of a call, never across an await.
///
/// # Example
///
/// ```ignore
/// let inquiries = ListView::new(client.collection(Entity::Inquiry));
/// inquiries.load().await;
///
/// inquiries.set_filter(FilterUpdate::Status("pending".into()));
/// let view = inquiries.view();
///
/// inquiries.table().on_select_all_rows(true, view.row_ids());
/// inquiries.open_confirm();
/// let report = inquiries.delete_selected().await?;
/// println!("{}", report.notice);
/// ```
#[derive(Debug)]
pub struct ListView {
    collection: Collection,
    fields: FilterFields,
    table: Mutex<TableState>,
    criteria: Mutex<FilterCriteria>,
    bulk: BulkConfig,
    guard: SubmitGuard,
    confirm_open: AtomicBool,
}

impl ListView {
    /// Creates a view with the entity's default table settings.
    pub fn new(collection: Collection) -> Self {
        let config = TableConfig::for_entity(collection.entity());
        Self::with_config(collection, config)
    }

    pub fn with_config(collection: Collection, config: TableConfig) -> Self {
        Self {
            fields: collection.entity().filter_fields(),
            collection,
            table: Mutex::new(TableState::new(config)),
            criteria: Mutex::new(FilterCriteria::default()),
            bulk: BulkConfig::default(),
            guard: SubmitGuard::new(),
            confirm_open: AtomicBool::new(false),
        }
    }

    pub fn with_bulk_config(mut self, config: BulkConfig) -> Self {
        self.bulk = config;
        self
    }

    pub fn collection(&self) -> &Collection {
        &self.collection
    }

    /// Locks the table state for reading or for a table intent.
    ///
    /// Drop the guard before calling another method on this view.
    pub fn table(&self) -> MutexGuard<'_, TableState> {
        self.table.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Snapshot of the current filter values.
    pub fn criteria(&self) -> FilterCriteria {
        self.lock_criteria().clone()
    }

    /// Returns `true` while a delete holds the submit guard.
    pub fn is_submitting(&self) -> bool {
        self.guard.is_submitting()
    }

    /// A handle to this view's submit guard, for sharing with other
    /// mutating surfaces of the same screen.
    pub fn submit_guard(&self) -> SubmitGuard {
        self.guard.clone()
    }

    fn lock_criteria(&self) -> MutexGuard<'_, FilterCriteria> {
        self.criteria.lock().unwrap_or_else(PoisonError::into_inner)
    }

    // =========================================================================
    // Data
    // =========================================================================

    /// Loads the collection. A fetch failure comes back as an error notice;
    /// the previous rows stay on screen.
    ///
    /// [`Collection::state`] reports `is_loading`/`is_validating` while this
    /// runs.
    pub async fn load(&self) -> Option<Notice> {
        let state = self.collection.load().await;
        self.load_notice(&state)
    }

    fn load_notice(&self, state: &CollectionState) -> Option<Notice> {
        state.error.as_ref().map(|err| {
            Notice::error(format!(
                "Failed to load {}: {}",
                self.collection.entity(),
                err
            ))
        })
    }

    /// The current frame: sorted, filtered and sliced.
    pub fn view(&self) -> TableView {
        let state = self.collection.state();
        let criteria = self.criteria();
        self.table().view(&state.records, &criteria, &self.fields)
    }

    /// Ids of every row that passes the filters, across all pages.
    pub fn filtered_ids(&self) -> Vec<RecordId> {
        let state = self.collection.state();
        let criteria = self.criteria();
        query::apply_filters(&state.records, &criteria, &self.fields)
            .iter()
            .filter_map(|r| r.id().cloned())
            .collect()
    }

    /// Header checkbox over the whole filtered result.
    pub fn on_select_all_rows(&self, checked: bool) {
        let ids = if checked { self.filtered_ids() } else { Vec::new() };
        self.table().on_select_all_rows(checked, ids);
    }

    // =========================================================================
    // Filters
    // =========================================================================

    /// Applies one filter change and returns to the first page.
    pub fn set_filter(&self, update: FilterUpdate) {
        self.table().on_reset_page();
        self.lock_criteria().update(update);
    }

    /// Restores default filters and returns to the first page.
    pub fn reset_filters(&self) {
        self.table().on_reset_page();
        *self.lock_criteria() = FilterCriteria::default();
    }

    // =========================================================================
    // Delete confirmation
    // =========================================================================

    pub fn open_confirm(&self) {
        self.confirm_open.store(true, Ordering::Release);
    }

    pub fn dismiss_confirm(&self) {
        self.confirm_open.store(false, Ordering::Release);
    }

    pub fn confirm_open(&self) -> bool {
        self.confirm_open.load(Ordering::Acquire)
    }

    // =========================================================================
    // Deletes
    // =========================================================================

    /// Deletes one row. The row does not need to be selected.
    pub async fn delete_row(&self, id: RecordId) -> Result<DeleteReport, Error> {
        self.delete_ids(vec![id]).await
    }

    /// Deletes every selected row.
    pub async fn delete_selected(&self) -> Result<DeleteReport, Error> {
        let ids = self.table().selected();
        self.delete_ids(ids).await
    }

    /// Runs a bulk delete behind the submit guard.
    ///
    /// `Err` means nothing was sent: an empty id list, or another submission
    /// still in flight. Otherwise, when anything was deleted the collection
    /// is revalidated, deleted ids leave the selection and the page is
    /// re-clamped. The confirmation prompt is dismissed either way.
    async fn delete_ids(&self, ids: Vec<RecordId>) -> Result<DeleteReport, Error> {
        let outcome = self
            .guard
            .run(delete_records(
                self.collection.source(),
                self.collection.company_url(),
                self.collection.entity(),
                ids,
                &self.bulk,
            ))
            .await?;

        if !outcome.succeeded.is_empty() {
            let state = self.collection.mutate().await;
            let criteria = self.criteria();
            let remaining = query::apply_filters(&state.records, &criteria, &self.fields).len();
            self.table().on_delete_rows(&outcome.succeeded, remaining);
        }
        self.dismiss_confirm();

        let notice = outcome.notice();
        if notice.is_error() {
            log::error!("{}", notice);
        }
        Ok(DeleteReport { outcome, notice })
    }
}
