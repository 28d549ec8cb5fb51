//! Table state controller.

use super::Selection;
use super::TableConfig;
use crate::api::query;
use crate::api::query::FilterCriteria;
use crate::api::query::FilterFields;
use crate::api::query::SortSpec;
use crate::model::Record;
use crate::model::RecordId;

/// Paging, sorting, density and selection of one list table.
///
/// Every intent is a synchronous state transition. The controller never
/// clamps `page` on its own; callers that shrink the result set invoke
/// [`TableState::on_reset_page`] or [`TableState::clamp_page`].
///
/// # Example
///
/// ```
/// use backoffice_lib::api::query::{Direction, SortSpec};
/// use backoffice_lib::table::{TableConfig, TableState};
///
/// let mut table = TableState::new(TableConfig::new(SortSpec::asc("firstName")));
/// table.on_change_page(3);
/// table.on_sort("firstName");
///
/// assert_eq!(table.sort().direction, Direction::Desc);
/// assert_eq!(table.page(), 0);
/// ```
#[derive(Debug, Clone)]
pub struct TableState {
    page: usize,
    rows_per_page: usize,
    dense: bool,
    sort: SortSpec,
    selection: Selection,
}

impl TableState {
    pub fn new(config: TableConfig) -> Self {
        Self {
            page: 0,
            rows_per_page: config.rows_per_page.max(1),
            dense: config.dense,
            sort: config.default_sort,
            selection: Selection::new(),
        }
    }

    pub fn page(&self) -> usize {
        self.page
    }

    pub fn rows_per_page(&self) -> usize {
        self.rows_per_page
    }

    pub fn dense(&self) -> bool {
        self.dense
    }

    pub fn sort(&self) -> &SortSpec {
        &self.sort
    }

    pub fn selection(&self) -> &Selection {
        &self.selection
    }

    // =========================================================================
    // Intents
    // =========================================================================

    /// Sorts by `field`. The same field flips direction, a new field starts
    /// ascending. Either way browsing restarts at page 0.
    pub fn on_sort(&mut self, field: &str) {
        if self.sort.field == field {
            self.sort.direction = self.sort.direction.flip();
        } else {
            self.sort = SortSpec::asc(field);
        }
        self.page = 0;
        log::debug!("sort {:?} {:?}", self.sort.field, self.sort.direction);
    }

    pub fn on_change_page(&mut self, page: usize) {
        self.page = page;
    }

    /// Same as [`TableState::on_change_page`].
    pub fn set_page(&mut self, page: usize) {
        self.on_change_page(page);
    }

    /// Changes the page size and returns to page 0. Zero is raised to one.
    pub fn on_change_rows_per_page(&mut self, rows_per_page: usize) {
        self.rows_per_page = rows_per_page.max(1);
        self.page = 0;
    }

    pub fn on_change_dense(&mut self, dense: bool) {
        self.dense = dense;
    }

    /// Toggles one row's checkbox.
    pub fn on_select_row(&mut self, id: RecordId) {
        self.selection.toggle(id);
    }

    /// Header checkbox: checked selects exactly `ids`, unchecked clears.
    pub fn on_select_all_rows(&mut self, checked: bool, ids: impl IntoIterator<Item = RecordId>) {
        if checked {
            self.selection.replace(ids);
        } else {
            self.selection.clear();
        }
    }

    /// Returns to page 0 without touching sort or selection.
    pub fn on_reset_page(&mut self) {
        self.page = 0;
    }

    /// Pulls `page` back onto the last page that has rows.
    pub fn clamp_page(&mut self, total_filtered: usize) {
        let last = query::last_page(total_filtered, self.rows_per_page);
        if self.page > last {
            self.page = last;
        }
    }

    /// Forgets deleted rows and re-clamps against the shrunken total.
    pub fn on_delete_rows<'a>(
        &mut self,
        deleted: impl IntoIterator<Item = &'a RecordId>,
        total_filtered: usize,
    ) {
        self.selection.remove_all(deleted);
        self.clamp_page(total_filtered);
    }

    // =========================================================================
    // Selection queries
    // =========================================================================

    /// Selected ids in ascending order.
    pub fn selected(&self) -> Vec<RecordId> {
        self.selection.sorted()
    }

    pub fn is_selected(&self, id: &RecordId) -> bool {
        self.selection.contains(id)
    }

    pub fn num_selected(&self) -> usize {
        self.selection.len()
    }

    // =========================================================================
    // Derived view
    // =========================================================================

    /// Sorts, filters and slices `records` for the current state.
    pub fn view(
        &self,
        records: &[Record],
        criteria: &FilterCriteria,
        fields: &FilterFields,
    ) -> TableView {
        let filtered = query::sort_and_filter(records, &self.sort, criteria, fields);
        let total = filtered.len();
        let rows = query::page_slice(&filtered, self.page, self.rows_per_page).to_vec();

        TableView {
            rows,
            total,
            empty_rows: query::empty_rows(self.page, self.rows_per_page, total),
            not_found: query::not_found(total),
            can_reset: criteria.can_reset(),
            date_error: criteria.date.is_error(),
            num_selected: self.num_selected(),
            dense: self.dense,
            sort: self.sort.clone(),
            page: self.page,
            rows_per_page: self.rows_per_page,
        }
    }
}

/// What the rendering layer reads for one frame of a list table.
#[derive(Debug, Clone, PartialEq)]
pub struct TableView {
    /// Visible slice of the sorted, filtered collection.
    pub rows: Vec<Record>,
    /// Size of the sorted, filtered collection.
    pub total: usize,
    /// Placeholder rows that pad the last page.
    pub empty_rows: usize,
    pub not_found: bool,
    /// Filters differ from their defaults.
    pub can_reset: bool,
    /// The date range is reversed and therefore ignored.
    pub date_error: bool,
    pub num_selected: usize,
    pub dense: bool,
    pub sort: SortSpec,
    pub page: usize,
    pub rows_per_page: usize,
}

impl TableView {
    /// Ids of the visible rows, in display order.
    pub fn row_ids(&self) -> Vec<RecordId> {
        self.rows.iter().filter_map(|r| r.id().cloned()).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::query::Direction;

    fn table() -> TableState {
        TableState::new(TableConfig::new(SortSpec::asc("name")).with_rows_per_page(10))
    }

    fn rows(n: usize) -> Vec<Record> {
        (0..n)
            .map(|i| {
                Record::with_id(format!("r{:02}", i))
                    .set("name", format!("Student {:02}", i))
                    .set("status", if i % 2 == 0 { "active" } else { "inactive" })
            })
            .collect()
    }

    fn fields() -> FilterFields {
        FilterFields::new(["name"], "status", "createdAt")
    }

    #[test]
    fn test_sort_twice_restores_direction() {
        let mut table = table();
        table.on_change_page(4);
        table.on_sort("name");
        assert_eq!(table.sort().direction, Direction::Desc);
        table.on_sort("name");
        assert_eq!(table.sort().direction, Direction::Asc);
        assert_eq!(table.page(), 0);
    }

    #[test]
    fn test_new_field_resets_to_ascending() {
        let mut table = table();
        table.on_sort("name");
        table.on_change_page(2);
        table.on_sort("email");
        assert_eq!(table.sort(), &SortSpec::asc("email"));
        assert_eq!(table.page(), 0);
    }

    #[test]
    fn test_rows_per_page_resets_page() {
        let mut table = table();
        table.on_change_page(3);
        table.on_change_rows_per_page(25);
        assert_eq!((table.page(), table.rows_per_page()), (0, 25));
        table.on_change_rows_per_page(0);
        assert_eq!(table.rows_per_page(), 1);
    }

    #[test]
    fn test_select_all_then_none_is_empty() {
        let mut table = table();
        table.on_select_row("z".into());
        let ids: Vec<RecordId> = vec!["a".into(), "b".into()];
        table.on_select_all_rows(true, ids.clone());
        assert_eq!(table.selected(), ids);
        table.on_select_all_rows(false, ids);
        assert_eq!(table.num_selected(), 0);
    }

    #[test]
    fn test_filter_change_resets_page_before_slicing() {
        let records = rows(30);
        let mut table = table();
        table.on_change_page(2);
        assert_eq!(
            table.view(&records, &FilterCriteria::default(), &fields()).rows.len(),
            10
        );

        let criteria = FilterCriteria::new().with_status("active");
        assert!(table.view(&records, &criteria, &fields()).rows.is_empty());

        table.on_reset_page();
        let view = table.view(&records, &criteria, &fields());
        assert_eq!(view.page, 0);
        assert_eq!(view.total, 15);
        assert_eq!(view.rows.len(), 10);
        assert_eq!(view.rows[0].id(), Some(&RecordId::from("r00")));
    }

    #[test]
    fn test_view_derives_padding_and_not_found() {
        let records = rows(13);
        let mut table = table();
        table.on_change_page(1);
        let view = table.view(&records, &FilterCriteria::default(), &fields());
        assert_eq!(view.rows.len(), 3);
        assert_eq!(view.empty_rows, 7);
        assert!(!view.not_found);

        let none = FilterCriteria::new().with_name("nobody");
        let view = table.view(&records, &none, &fields());
        assert!(view.not_found);
        assert!(view.can_reset);
    }

    #[test]
    fn test_delete_rows_trims_selection_and_clamps() {
        let mut table = table();
        table.on_select_all_rows(true, ["a".into(), "b".into(), "c".into()]);
        table.on_change_page(3);
        table.on_delete_rows(&[RecordId::from("a"), RecordId::from("c")], 12);
        assert_eq!(table.selected(), [RecordId::from("b")]);
        assert_eq!(table.page(), 1);
    }
}
