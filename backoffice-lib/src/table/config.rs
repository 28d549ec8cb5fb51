//! Table configuration

use crate::api::query::SortSpec;
use crate::model::Entity;

/// Initial state of a list table.
///
/// # Example
///
/// ```
/// use backoffice_lib::api::query::SortSpec;
/// use backoffice_lib::table::TableConfig;
///
/// let config = TableConfig::new(SortSpec::asc("batch_name")).with_rows_per_page(25);
/// assert_eq!(config.rows_per_page, 25);
/// assert!(!config.dense);
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TableConfig {
    /// Default: 5
    pub rows_per_page: usize,
    /// Sort applied on mount.
    pub default_sort: SortSpec,
    /// Default: false
    pub dense: bool,
}

impl TableConfig {
    pub fn new(default_sort: SortSpec) -> Self {
        Self {
            rows_per_page: 5,
            default_sort,
            dense: false,
        }
    }

    /// The config a list screen for `entity` starts with.
    pub fn for_entity(entity: Entity) -> Self {
        Self::new(entity.default_sort())
    }

    /// Sets the page size. Zero is raised to one.
    pub fn with_rows_per_page(mut self, rows_per_page: usize) -> Self {
        self.rows_per_page = rows_per_page.max(1);
        self
    }

    pub fn with_dense(mut self, dense: bool) -> Self {
        self.dense = dense;
        self
    }
}
