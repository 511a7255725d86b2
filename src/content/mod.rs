//! Content module
//!
//! Read-only content records (blogs, categories, related books) and the
//! store abstraction the lookup engine queries.

mod memory;
mod sample;
mod store;
pub(crate) mod timestamp;

use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

pub use memory::MemoryStore;
#[cfg(test)]
pub use memory::Dataset;
pub use store::{BlogFilter, ContentStore, StoreError};

/// Publication state of a blog
#[derive(Debug, Deserialize, Serialize, Clone, Copy, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum BlogStatus {
    Draft,
    Published,
}

/// Blog record as held by the content store
#[derive(Debug, Deserialize, Serialize, Clone, PartialEq, Eq)]
pub struct Blog {
    pub id: i64,
    pub slug: String,
    pub title: String,
    pub content: String,
    #[serde(default)]
    pub excerpt: String,
    #[serde(default)]
    pub featured_image: Option<String>,
    #[serde(default)]
    pub featured_image_2: Option<String>,
    pub category_id: i64,
    #[serde(default)]
    pub tags: Vec<String>,
    #[serde(default)]
    pub meta_title: String,
    #[serde(default)]
    pub meta_description: String,
    #[serde(default)]
    pub is_featured: bool,
    pub status: BlogStatus,
    #[serde(default)]
    pub view_count: u64,
    #[serde(with = "timestamp")]
    pub created_at: NaiveDateTime,
    #[serde(with = "timestamp")]
    pub updated_at: NaiveDateTime,
}

impl Blog {
    pub fn is_published(&self) -> bool {
        self.status == BlogStatus::Published
    }
}

#[derive(Debug, Deserialize, Serialize, Clone, PartialEq, Eq)]
pub struct Category {
    pub id: i64,
    pub name: String,
    pub slug: String,
}

/// Purchase link attached to a single-blog response
#[derive(Debug, Deserialize, Serialize, Clone, PartialEq, Eq)]
pub struct RelatedBook {
    pub id: i64,
    pub title: String,
    pub purchase_link: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub price: String,
    #[serde(default)]
    pub image: Option<String>,
}
