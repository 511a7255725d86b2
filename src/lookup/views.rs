// Response shapes produced by the lookup engine

use serde::Serialize;

use crate::content::{timestamp, Blog, BlogStatus, Category, RelatedBook};
use crate::images::ImageResolver;

/// Category summary embedded in a blog
#[derive(Debug, Serialize, Clone, PartialEq, Eq)]
pub struct CategoryRef {
    pub id: i64,
    pub name: String,
    pub slug: String,
}

/// Blog as sent to clients: image fields resolved, category denormalized
#[derive(Debug, Serialize, Clone, PartialEq, Eq)]
pub struct BlogView {
    pub id: i64,
    pub title: String,
    pub slug: String,
    pub content: String,
    pub excerpt: String,
    pub featured_image: Option<String>,
    pub featured_image_2: Option<String>,
    pub category_id: i64,
    pub category_name: Option<String>,
    pub category_slug: Option<String>,
    pub category: Option<CategoryRef>,
    pub tags: Vec<String>,
    pub meta_title: String,
    pub meta_description: String,
    pub is_featured: bool,
    pub status: BlogStatus,
    pub view_count: u64,
    pub created_at: String,
    pub updated_at: String,
    /// Only present on single-record responses
    #[serde(skip_serializing_if = "Option::is_none")]
    pub related_books: Option<Vec<RelatedBook>>,
}

impl BlogView {
    pub fn build(blog: Blog, category: Option<&Category>, images: &ImageResolver) -> Self {
        let category = category.map(|c| CategoryRef {
            id: c.id,
            name: c.name.clone(),
            slug: c.slug.clone(),
        });

        Self {
            id: blog.id,
            featured_image: images.resolve(blog.featured_image.as_deref()),
            featured_image_2: images.resolve(blog.featured_image_2.as_deref()),
            category_id: blog.category_id,
            category_name: category.as_ref().map(|c| c.name.clone()),
            category_slug: category.as_ref().map(|c| c.slug.clone()),
            category,
            created_at: blog.created_at.format(timestamp::FORMAT).to_string(),
            updated_at: blog.updated_at.format(timestamp::FORMAT).to_string(),
            title: blog.title,
            slug: blog.slug,
            content: blog.content,
            excerpt: blog.excerpt,
            tags: blog.tags,
            meta_title: blog.meta_title,
            meta_description: blog.meta_description,
            is_featured: blog.is_featured,
            status: blog.status,
            view_count: blog.view_count,
            related_books: None,
        }
    }

    pub fn with_related_books(mut self, books: Vec<RelatedBook>, images: &ImageResolver) -> Self {
        let books = books
            .into_iter()
            .map(|mut book| {
                book.image = images.resolve(book.image.as_deref());
                book
            })
            .collect();
        self.related_books = Some(books);
        self
    }
}

/// `{"blog": {...}}`
#[derive(Debug, Serialize)]
pub struct BlogEnvelope {
    pub blog: BlogView,
}

/// Paged listing of published blogs
#[derive(Debug, Serialize)]
pub struct BlogList {
    pub blogs: Vec<BlogView>,
    pub total: usize,
    pub page: usize,
    pub limit: usize,
    pub total_pages: usize,
}

#[derive(Debug, Serialize, Clone, PartialEq, Eq)]
pub struct CategorySummary {
    pub id: i64,
    pub name: String,
    pub slug: String,
    pub blog_count: usize,
}

#[derive(Debug, Serialize)]
pub struct CategoryList {
    pub categories: Vec<CategorySummary>,
}
