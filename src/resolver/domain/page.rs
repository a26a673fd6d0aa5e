//! Offset/limit pagination.

/// Returns the window `[offset, offset + limit)` of `items`.
///
/// The window is clipped to the slice: an oversized `limit` yields a shorter
/// page and an out-of-range `offset` yields an empty one.
#[must_use]
pub fn page<T>(items: &[T], offset: usize, limit: usize) -> &[T] {
    let start = offset.min(items.len());
    let end = start.saturating_add(limit).min(items.len());
    items.get(start..end).unwrap_or_default()
}
