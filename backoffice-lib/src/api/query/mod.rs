//! List query pipeline: sort, filter, page.
//!
//! Collections are fetched whole and shaped client-side. The pipeline order
//! is fixed: [`sort_stable`] first, then the [`FilterCriteria`] predicates,
//! then [`page_slice`].
//!
//! # Shared Types
//!
//! - [`SortSpec`] - Active sort column and [`Direction`]
//! - [`FilterCriteria`] - Free text, status and date range values
//! - [`FilterFields`] - Which record fields the predicates read

mod filter;
mod order;
mod page;

pub use filter::DateRange;
pub use filter::FilterCriteria;
pub use filter::FilterFields;
pub use filter::FilterUpdate;
pub use filter::Predicate;
pub use filter::STATUS_ALL;
pub use filter::apply as apply_filters;
pub use filter::sort_and_filter;
pub use order::Direction;
pub use order::SortSpec;
pub use order::compare;
pub use order::compare_values;
pub use order::sort_stable;
pub use page::empty_rows;
pub use page::last_page;
pub use page::not_found;
pub use page::page_slice;
