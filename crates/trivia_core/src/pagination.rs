//! crates/trivia_core/src/pagination.rs
//!
//! Fixed-size, 1-based pagination over ordered listings.

/// Page size shared by every paginated listing.
pub const QUESTIONS_PER_PAGE: usize = 10;

/// The page used when a request does not name one.
pub const DEFAULT_PAGE: i64 = 1;

/// Returns the items of `page` (1-based), i.e. `[(page-1)*10, page*10)` clipped to
/// the slice. Pages below 1 or past the end are empty.
pub fn paginate<T>(items: &[T], page: i64) -> &[T] {
    if page < 1 {
        return &[];
    }
    let Ok(index) = usize::try_from(page - 1) else {
        return &[];
    };
    let start = index.saturating_mul(QUESTIONS_PER_PAGE);
    if start >= items.len() {
        return &[];
    }
    let end = start.saturating_add(QUESTIONS_PER_PAGE).min(items.len());
    &items[start..end]
}
