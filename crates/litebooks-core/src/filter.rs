//! Visibility and search filtering
//!
//! A pure subset of the collection: no re-ordering, no mutation. The
//! collection arrives already ordered (newest first from the remote store,
//! fixed insertion order for samples) and leaves in the same relative
//! order.

use crate::models::Book;

/// Filter the catalog for display.
///
/// A non-empty query keeps records whose title or category label contains
/// it as a case-insensitive substring. Anonymous viewers additionally never
/// see hidden records.
pub fn filter_catalog<'a>(books: &'a [Book], query: &str, viewer_is_admin: bool) -> Vec<&'a Book> {
    let needle = query.to_lowercase();
    books
        .iter()
        .filter(|book| {
            needle.is_empty()
                || book.title.to_lowercase().contains(&needle)
                || book.category.label().to_lowercase().contains(&needle)
        })
        .filter(|book| viewer_is_admin || !book.is_hidden)
        .collect()
}
