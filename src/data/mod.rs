//! Read side of the dashboard: list, search and summary queries.
//!
//! Every function here is a method on [`Database`](crate::db::Database).
//! Failures are logged and replaced with a short message for the page.

mod customers;
mod dashboard;
mod invoices;

pub use customers::{customers_count_query, filtered_customers_query};
pub use dashboard::latest_invoices_query;
pub use invoices::{filtered_invoices_query, invoices_count_query};

/// Rows per page on every paginated table
pub const ITEMS_PER_PAGE: i64 = 6;

/// Row offset for a 1-based page; pages below 1 are treated as 1.
///
/// Offsets past the end of `i64` saturate and simply return no rows.
pub fn page_offset(current_page: i64) -> i64 {
    current_page
        .max(1)
        .saturating_sub(1)
        .saturating_mul(ITEMS_PER_PAGE)
}

/// Number of pages needed to show `total` rows.
pub fn total_pages(total: i64) -> i64 {
    if total <= 0 {
        return 0;
    }
    (total + ITEMS_PER_PAGE - 1) / ITEMS_PER_PAGE
}

/// `%query%` with LIKE wildcards in the query matched literally.
pub fn search_pattern(query: &str) -> String {
    let mut pattern = String::with_capacity(query.len() + 2);
    pattern.push('%');
    for ch in query.chars() {
        if matches!(ch, '%' | '_' | '\\') {
            pattern.push('\\');
        }
        pattern.push(ch);
    }
    pattern.push('%');
    pattern
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn offsets() {
        assert_eq!(page_offset(1), 0);
        assert_eq!(page_offset(2), 6);
        assert_eq!(page_offset(5), 24);
        assert_eq!(page_offset(0), 0);
        assert_eq!(page_offset(-3), 0);
        assert_eq!(page_offset(i64::MIN), 0);
    }

    #[test]
    fn huge_pages_saturate_instead_of_overflowing() {
        assert_eq!(page_offset(i64::MAX), i64::MAX);
        assert_eq!(page_offset(i64::MAX / ITEMS_PER_PAGE + 2), i64::MAX);
        assert!(page_offset(i64::MAX / ITEMS_PER_PAGE) > 0);
    }

    #[test]
    fn page_counts_round_up() {
        assert_eq!(total_pages(0), 0);
        assert_eq!(total_pages(1), 1);
        assert_eq!(total_pages(6), 1);
        assert_eq!(total_pages(7), 2);
        assert_eq!(total_pages(12), 2);
        assert_eq!(total_pages(13), 3);
    }

    #[test]
    fn search_patterns_escape_wildcards() {
        assert_eq!(search_pattern(""), "%%");
        assert_eq!(search_pattern("acme"), "%acme%");
        assert_eq!(search_pattern("50%"), "%50\\%%");
        assert_eq!(search_pattern("a_b"), "%a\\_b%");
        assert_eq!(search_pattern("c:\\x"), "%c:\\\\x%");
    }
}
