//! Pagination over the in-memory submissions snapshot

/// Fixed page size for the submissions table
pub const PAGE_SIZE: i64 = 10;

/// Pagination metadata calculated from the filtered row count
#[derive(Debug, Clone, Copy)]
pub struct Pagination {
    /// Current page number (1-indexed)
    pub page: i64,
    /// Total number of pages
    pub total_pages: i64,
    /// Index of the first row on this page
    pub offset: i64,
}

/// Calculate pagination metadata from the filtered row count and the
/// requested page, clamping the page into valid bounds so out-of-range
/// requests land on the first or last page instead of failing.
pub fn calculate_pagination(total_results: i64, requested_page: i64) -> Pagination {
    let total_pages = (total_results + PAGE_SIZE - 1) / PAGE_SIZE;
    let page = requested_page.max(1).min(total_pages.max(1));
    let offset = (page - 1) * PAGE_SIZE;

    Pagination {
        page,
        total_pages,
        offset,
    }
}
