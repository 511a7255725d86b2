//! Content store abstraction
//!
//! The lookup engine only ever reads through this trait, so the backing
//! source (bundled sample, dataset file, a database adapter) can be swapped
//! without touching routing.

use super::{Blog, Category, RelatedBook};
use thiserror::Error;

/// Failure reported by a content store
#[derive(Debug, Error)]
pub enum StoreError {
    /// Backing source cannot be reached (networked adapters; the in-memory
    /// store never fails this way)
    #[allow(dead_code)]
    #[error("content store unavailable: {0}")]
    Unavailable(String),

    #[error("failed to read dataset '{path}': {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse dataset '{path}': {message}")]
    Parse { path: String, message: String },

    /// Dataset violates a record invariant (duplicate slug, bad timestamps, ...)
    #[error("invalid dataset: {0}")]
    Invalid(String),
}

/// Filters for listing published blogs
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BlogFilter {
    pub category_id: Option<i64>,
    pub featured: Option<bool>,
    pub tag: Option<String>,
}

impl BlogFilter {
    /// Check whether a blog satisfies every set filter (status is not checked here)
    pub fn matches(&self, blog: &Blog) -> bool {
        if self.category_id.is_some_and(|id| blog.category_id != id) {
            return false;
        }
        if self.featured.is_some_and(|f| blog.is_featured != f) {
            return false;
        }
        if let Some(tag) = &self.tag {
            if !blog.tags.iter().any(|t| t == tag) {
                return false;
            }
        }
        true
    }
}

/// Read-only access to blog content
///
/// `find_by_id`/`find_by_slug` return records regardless of status; the
/// lookup engine decides what is publicly visible.
pub trait ContentStore: Send + Sync {
    fn find_by_id(&self, id: i64) -> Result<Option<Blog>, StoreError>;

    /// Exact, case-sensitive slug match
    fn find_by_slug(&self, slug: &str) -> Result<Option<Blog>, StoreError>;

    /// Published blogs matching `filter`, in no particular order
    fn list_published(&self, filter: &BlogFilter) -> Result<Vec<Blog>, StoreError>;

    fn categories(&self) -> Result<Vec<Category>, StoreError>;

    fn related_books(&self, blog_id: i64) -> Result<Vec<RelatedBook>, StoreError>;
}
