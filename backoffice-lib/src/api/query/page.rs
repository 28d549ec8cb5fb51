//! Page arithmetic for the list table.

/// Returns the rows shown on `page` (zero-based) of a filtered collection.
///
/// A page past the end yields an empty slice.
///
/// # Example
///
/// ```
/// use backoffice_lib::api::query::page_slice;
///
/// let rows = [1, 2, 3, 4, 5, 6, 7];
/// assert_eq!(page_slice(&rows, 1, 5), &[6, 7]);
/// assert!(page_slice(&rows, 3, 5).is_empty());
/// ```
pub fn page_slice<T>(rows: &[T], page: usize, rows_per_page: usize) -> &[T] {
    let start = page.saturating_mul(rows_per_page).min(rows.len());
    let end = start.saturating_add(rows_per_page).min(rows.len());
    &rows[start..end]
}

/// Placeholder row count that keeps the table height constant on the
/// last page: `max(0, rows_per_page * (page + 1) - total)`.
pub fn empty_rows(page: usize, rows_per_page: usize, total: usize) -> usize {
    rows_per_page
        .saturating_mul(page.saturating_add(1))
        .saturating_sub(total)
}

/// Whether to show the "no results" state. An empty collection counts,
/// filtered or not.
pub fn not_found(filtered_len: usize) -> bool {
    filtered_len == 0
}

/// Index of the last page that still has rows, or zero.
pub fn last_page(total: usize, rows_per_page: usize) -> usize {
    if rows_per_page == 0 || total == 0 {
        0
    } else {
        (total - 1) / rows_per_page
    }
}
