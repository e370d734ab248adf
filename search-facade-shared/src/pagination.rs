//! Pagination contract for search requests.

/// Number of documents requested per page.
pub const PAGE_SIZE: i64 = 20;

/// Compute the result offset for a 1-based page number.
///
/// A missing page, or any page number of 1 or less, starts at offset 0.
/// Page `p > 1` starts at `(p - 1) * PAGE_SIZE`. There is no upper bound;
/// pages past the last match simply come back empty.
pub fn page_offset(page: Option<i64>) -> i64 {
    match page {
        Some(p) if p > 1 => (p - 1).saturating_mul(PAGE_SIZE),
        _ => 0,
    }
}
