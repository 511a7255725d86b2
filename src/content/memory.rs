//! In-memory content store
//!
//! Holds a fully materialized dataset, either the bundled sample or one
//! loaded from a JSON/TOML file at startup.

use serde::{Deserialize, Serialize};
use std::collections::{HashMap, HashSet};
use std::fs;
use std::path::Path;

use super::store::{BlogFilter, ContentStore, StoreError};
use super::{sample, Blog, Category, RelatedBook};

/// Related books grouped by the blog they are attached to
#[derive(Debug, Deserialize, Serialize, Clone, PartialEq, Eq)]
pub struct RelatedGroup {
    pub blog_id: i64,
    #[serde(default)]
    pub books: Vec<RelatedBook>,
}

/// Serialized form of a content dataset
#[derive(Debug, Deserialize, Serialize, Clone, Default, PartialEq, Eq)]
pub struct Dataset {
    #[serde(default)]
    pub categories: Vec<Category>,
    #[serde(default)]
    pub blogs: Vec<Blog>,
    #[serde(default)]
    pub related_books: Vec<RelatedGroup>,
}

impl Dataset {
    /// Load a dataset file; the format is picked from the extension
    /// (`.toml`, anything else is read as JSON)
    pub fn load(path: &Path) -> Result<Self, StoreError> {
        let display = path.display().to_string();
        let content = fs::read_to_string(path).map_err(|source| StoreError::Io {
            path: display.clone(),
            source,
        })?;

        let is_toml = path
            .extension()
            .and_then(|e| e.to_str())
            .is_some_and(|e| e.eq_ignore_ascii_case("toml"));

        let parsed = if is_toml {
            toml::from_str(&content).map_err(|e| e.to_string())
        } else {
            serde_json::from_str(&content).map_err(|e| e.to_string())
        };

        parsed.map_err(|message| StoreError::Parse {
            path: display,
            message,
        })
    }

    /// Check record invariants before the dataset is served
    pub fn validate(&self) -> Result<(), StoreError> {
        let mut ids = HashSet::new();
        let mut slugs = HashSet::new();
        for blog in &self.blogs {
            if !ids.insert(blog.id) {
                return Err(StoreError::Invalid(format!("duplicate blog id {}", blog.id)));
            }
            if !is_url_safe_slug(&blog.slug) {
                return Err(StoreError::Invalid(format!(
                    "blog {} has invalid slug '{}'",
                    blog.id, blog.slug
                )));
            }
            if !slugs.insert(blog.slug.as_str()) {
                return Err(StoreError::Invalid(format!(
                    "duplicate blog slug '{}'",
                    blog.slug
                )));
            }
            if blog.updated_at < blog.created_at {
                return Err(StoreError::Invalid(format!(
                    "blog {} updated_at precedes created_at",
                    blog.id
                )));
            }
        }

        let mut category_slugs = HashSet::new();
        for category in &self.categories {
            if !category_slugs.insert(category.slug.as_str()) {
                return Err(StoreError::Invalid(format!(
                    "duplicate category slug '{}'",
                    category.slug
                )));
            }
        }

        if let Some(orphan) = self.related_books.iter().find(|g| !ids.contains(&g.blog_id)) {
            return Err(StoreError::Invalid(format!(
                "related books reference unknown blog {}",
                orphan.blog_id
            )));
        }

        Ok(())
    }
}

fn is_url_safe_slug(slug: &str) -> bool {
    !slug.is_empty()
        && slug
            .bytes()
            .all(|b| b.is_ascii_alphanumeric() || matches!(b, b'-' | b'_' | b'.' | b'~'))
}

/// Content store over a validated, immutable dataset
#[derive(Debug)]
pub struct MemoryStore {
    blogs: Vec<Blog>,
    categories: Vec<Category>,
    related: HashMap<i64, Vec<RelatedBook>>,
}

impl MemoryStore {
    pub fn new(dataset: Dataset) -> Result<Self, StoreError> {
        dataset.validate()?;

        let mut related: HashMap<i64, Vec<RelatedBook>> = HashMap::new();
        for group in dataset.related_books {
            related.entry(group.blog_id).or_default().extend(group.books);
        }

        Ok(Self {
            blogs: dataset.blogs,
            categories: dataset.categories,
            related,
        })
    }

    /// Store seeded with the bundled sample content
    pub fn sample() -> Result<Self, StoreError> {
        Self::new(sample::dataset()?)
    }

    pub fn from_file(path: &Path) -> Result<Self, StoreError> {
        Self::new(Dataset::load(path)?)
    }

    pub fn blog_count(&self) -> usize {
        self.blogs.len()
    }
}

impl ContentStore for MemoryStore {
    fn find_by_id(&self, id: i64) -> Result<Option<Blog>, StoreError> {
        Ok(self.blogs.iter().find(|b| b.id == id).cloned())
    }

    fn find_by_slug(&self, slug: &str) -> Result<Option<Blog>, StoreError> {
        Ok(self.blogs.iter().find(|b| b.slug == slug).cloned())
    }

    fn list_published(&self, filter: &BlogFilter) -> Result<Vec<Blog>, StoreError> {
        Ok(self
            .blogs
            .iter()
            .filter(|b| b.is_published() && filter.matches(b))
            .cloned()
            .collect())
    }

    fn categories(&self) -> Result<Vec<Category>, StoreError> {
        Ok(self.categories.clone())
    }

    fn related_books(&self, blog_id: i64) -> Result<Vec<RelatedBook>, StoreError> {
        Ok(self.related.get(&blog_id).cloned().unwrap_or_default())
    }
}
