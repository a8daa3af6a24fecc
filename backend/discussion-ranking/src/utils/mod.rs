// Utility functions for discussion-ranking

use std::cmp::Ordering;

/// Order scores low to high.
/// Note: IEEE total order, so a NaN sorts to one end instead of breaking the sort
pub fn ascending(a: f64, b: f64) -> Ordering {
    a.total_cmp(&b)
}

/// Order scores high to low, same NaN handling as [`ascending`].
pub fn descending(a: f64, b: f64) -> Ordering {
    b.total_cmp(&a)
}
