//! Pagination helpers shared by list endpoints.

/// Clamp a user-provided limit to `1..=max`, defaulting when absent.
pub fn clamp_limit(limit: Option<i64>, default: i64, max: i64) -> usize {
    limit.unwrap_or(default).max(1).min(max) as usize
}

/// Clamp a user-provided offset to non-negative.
pub fn clamp_offset(offset: Option<i64>) -> usize {
    offset.unwrap_or(0).max(0) as usize
}

/// Apply an offset/limit window to an already-sorted list.
pub fn paginate<T>(items: Vec<T>, limit: usize, offset: usize) -> Vec<T> {
    items.into_iter().skip(offset).take(limit).collect()
}
