//! Lookup engine
//!
//! Translates routed requests into content store queries and shapes the
//! results into response DTOs. Only published blogs are ever returned.

mod views;

use std::collections::HashMap;
use std::sync::Arc;

use crate::content::{Blog, BlogFilter, Category, ContentStore};
use crate::error::ApiError;
use crate::images::ImageResolver;

pub use views::{BlogEnvelope, BlogList, BlogView, CategoryList, CategorySummary};

/// Identifies a single blog
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BlogKey {
    Id(i64),
    Slug(String),
}

/// Category filter as given by the client
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CategorySelector {
    Id(i64),
    Slug(String),
}

/// Listing parameters; all optional
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ListQuery {
    pub category: Option<CategorySelector>,
    pub featured: Option<bool>,
    pub tag: Option<String>,
    pub page: Option<usize>,
    pub limit: Option<usize>,
}

pub struct LookupEngine {
    store: Arc<dyn ContentStore>,
    images: ImageResolver,
}

impl LookupEngine {
    pub fn new(store: Arc<dyn ContentStore>, images: ImageResolver) -> Self {
        Self { store, images }
    }

    /// List published blogs, newest first (ties by ascending id)
    pub fn list(&self, query: &ListQuery) -> Result<BlogList, ApiError> {
        let categories = self.category_index()?;

        let category_id = match &query.category {
            None => None,
            Some(CategorySelector::Id(id)) => Some(*id),
            Some(CategorySelector::Slug(slug)) => {
                match categories.values().find(|c| &c.slug == slug) {
                    Some(c) => Some(c.id),
                    // Unknown category: nothing can match
                    None => return Ok(paginate(Vec::new(), query.page, query.limit)),
                }
            }
        };

        let filter = BlogFilter {
            category_id,
            featured: query.featured,
            tag: query.tag.clone(),
        };

        let mut blogs = self.store.list_published(&filter)?;
        sort_newest_first(&mut blogs);

        let views = blogs
            .into_iter()
            .map(|b| {
                let category = categories.get(&b.category_id);
                BlogView::build(b, category, &self.images)
            })
            .collect();

        Ok(paginate(views, query.page, query.limit))
    }

    /// Fetch one published blog with its related books attached
    pub fn get(&self, key: &BlogKey) -> Result<BlogEnvelope, ApiError> {
        let found = match key {
            BlogKey::Id(id) => self.store.find_by_id(*id)?,
            BlogKey::Slug(slug) => self.store.find_by_slug(slug)?,
        };

        // Drafts are indistinguishable from missing records
        let blog = found
            .filter(Blog::is_published)
            .ok_or(ApiError::BlogNotFound)?;

        let related = self.store.related_books(blog.id)?;
        let categories = self.category_index()?;
        let category = categories.get(&blog.category_id);

        let view = BlogView::build(blog, category, &self.images)
            .with_related_books(related, &self.images);

        Ok(BlogEnvelope { blog: view })
    }

    /// All categories with their published blog counts, ordered by id
    pub fn categories(&self) -> Result<CategoryList, ApiError> {
        let mut counts: HashMap<i64, usize> = HashMap::new();
        for blog in self.store.list_published(&BlogFilter::default())? {
            *counts.entry(blog.category_id).or_default() += 1;
        }

        let mut categories = self.store.categories()?;
        categories.sort_by_key(|c| c.id);

        let categories = categories
            .into_iter()
            .map(|c| CategorySummary {
                blog_count: counts.get(&c.id).copied().unwrap_or(0),
                id: c.id,
                name: c.name,
                slug: c.slug,
            })
            .collect();

        Ok(CategoryList { categories })
    }

    fn category_index(&self) -> Result<HashMap<i64, Category>, ApiError> {
        Ok(self
            .store
            .categories()?
            .into_iter()
            .map(|c| (c.id, c))
            .collect())
    }
}

fn sort_newest_first(blogs: &mut [Blog]) {
    blogs.sort_by(|a, b| b.created_at.cmp(&a.created_at).then(a.id.cmp(&b.id)));
}

/// Slice a full result set; without `limit` everything is one page
fn paginate(all: Vec<BlogView>, page: Option<usize>, limit: Option<usize>) -> BlogList {
    let total = all.len();

    let Some(limit) = limit else {
        return BlogList {
            blogs: all,
            total,
            page: 1,
            limit: total,
            total_pages: 1,
        };
    };

    let page = page.unwrap_or(1).max(1);
    let limit = limit.max(1);
    let start = (page - 1).saturating_mul(limit);
    let blogs = all.into_iter().skip(start).take(limit).collect();

    BlogList {
        blogs,
        total,
        page,
        limit,
        total_pages: total.div_ceil(limit).max(1),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::content::{BlogStatus, Dataset, MemoryStore, RelatedBook, StoreError};

    const SLUG: &str = "building-personal-library-complete-guide";

    fn images() -> ImageResolver {
        ImageResolver::new("http://localhost:8000", "/uploads")
    }

    fn engine() -> LookupEngine {
        LookupEngine::new(Arc::new(MemoryStore::sample().unwrap()), images())
    }

    fn engine_with(edit: impl FnOnce(&mut Dataset)) -> LookupEngine {
        let store = MemoryStore::sample().unwrap();
        // Rebuild the dataset from what the sample store exposes
        let mut dataset = Dataset {
            categories: store.categories().unwrap(),
            blogs: vec![
                store.find_by_id(1).unwrap().unwrap(),
                store.find_by_id(2).unwrap().unwrap(),
            ],
            related_books: Vec::new(),
        };
        edit(&mut dataset);
        LookupEngine::new(Arc::new(MemoryStore::new(dataset).unwrap()), images())
    }

    struct DownStore;

    impl ContentStore for DownStore {
        fn find_by_id(&self, _: i64) -> Result<Option<Blog>, StoreError> {
            Err(StoreError::Unavailable("connection refused".to_string()))
        }
        fn find_by_slug(&self, _: &str) -> Result<Option<Blog>, StoreError> {
            Err(StoreError::Unavailable("connection refused".to_string()))
        }
        fn list_published(&self, _: &BlogFilter) -> Result<Vec<Blog>, StoreError> {
            Err(StoreError::Unavailable("connection refused".to_string()))
        }
        fn categories(&self) -> Result<Vec<Category>, StoreError> {
            Err(StoreError::Unavailable("connection refused".to_string()))
        }
        fn related_books(&self, _: i64) -> Result<Vec<RelatedBook>, StoreError> {
            Err(StoreError::Unavailable("connection refused".to_string()))
        }
    }

    #[test]
    fn test_get_by_slug_attaches_related_books() {
        let envelope = engine().get(&BlogKey::Slug(SLUG.to_string())).unwrap();
        assert_eq!(envelope.blog.id, 1);
        assert_eq!(envelope.blog.related_books.as_ref().map(Vec::len), Some(1));
    }

    #[test]
    fn test_id_and_slug_return_same_record() {
        let engine = engine();
        for (id, slug) in [(1, SLUG), (2, "art-storytelling-modern-literature")] {
            let by_id = engine.get(&BlogKey::Id(id)).unwrap().blog;
            let by_slug = engine.get(&BlogKey::Slug(slug.to_string())).unwrap().blog;
            assert_eq!(by_id, by_slug);
        }
    }

    #[test]
    fn test_get_missing_is_not_found() {
        let err = engine().get(&BlogKey::Id(999)).unwrap_err();
        assert!(matches!(err, ApiError::BlogNotFound));
        let err = engine().get(&BlogKey::Slug("nope".to_string())).unwrap_err();
        assert!(matches!(err, ApiError::BlogNotFound));
    }

    #[test]
    fn test_get_hides_drafts() {
        let engine = engine_with(|d| d.blogs[0].status = BlogStatus::Draft);
        assert!(matches!(engine.get(&BlogKey::Id(1)), Err(ApiError::BlogNotFound)));
        assert!(matches!(
            engine.get(&BlogKey::Slug(SLUG.to_string())),
            Err(ApiError::BlogNotFound)
        ));
    }

    #[test]
    fn test_images_are_resolved() {
        let blog = engine().get(&BlogKey::Id(2)).unwrap().blog;
        assert_eq!(
            blog.featured_image.as_deref(),
            Some("http://localhost:8000/uploads/1758533654_naruto.webp")
        );
        assert_eq!(
            blog.featured_image_2.as_deref(),
            Some("http://localhost:8000/uploads/1758546897_68036b8b-c597-4903-92fb-0becd3eefb84.png")
        );
        let first = engine().get(&BlogKey::Id(1)).unwrap().blog;
        assert_eq!(first.featured_image_2, None);
    }

    #[test]
    fn test_category_is_denormalized() {
        let blog = engine().get(&BlogKey::Id(1)).unwrap().blog;
        assert_eq!(blog.category_name.as_deref(), Some("Fiction"));
        assert_eq!(blog.category_slug.as_deref(), Some("fiction"));
        assert_eq!(blog.category.map(|c| c.id), Some(1));
    }

    #[test]
    fn test_list_without_pagination() {
        let list = engine().list(&ListQuery::default()).unwrap();
        assert_eq!(list.total, list.blogs.len());
        assert_eq!(list.page, 1);
        assert_eq!(list.limit, list.total);
        assert_eq!(list.total_pages, 1);
        assert!(list.blogs.iter().all(|b| b.related_books.is_none()));
    }

    #[test]
    fn test_list_order_newest_first() {
        let ids: Vec<i64> = engine()
            .list(&ListQuery::default())
            .unwrap()
            .blogs
            .iter()
            .map(|b| b.id)
            .collect();
        assert_eq!(ids, vec![1, 2]);
    }

    #[test]
    fn test_list_ties_break_by_id() {
        let engine = engine_with(|d| d.blogs[0].created_at = d.blogs[1].created_at);
        let ids: Vec<i64> = engine
            .list(&ListQuery::default())
            .unwrap()
            .blogs
            .iter()
            .map(|b| b.id)
            .collect();
        assert_eq!(ids, vec![1, 2]);
    }

    #[test]
    fn test_list_excludes_drafts() {
        let engine = engine_with(|d| d.blogs[0].status = BlogStatus::Draft);
        let list = engine.list(&ListQuery::default()).unwrap();
        assert_eq!(list.total, 1);
        assert_eq!(list.blogs[0].id, 2);
    }

    #[test]
    fn test_list_pagination() {
        let query = ListQuery {
            page: Some(2),
            limit: Some(1),
            ..ListQuery::default()
        };
        let list = engine().list(&query).unwrap();
        assert_eq!(list.total, 2);
        assert_eq!(list.page, 2);
        assert_eq!(list.limit, 1);
        assert_eq!(list.total_pages, 2);
        assert_eq!(list.blogs.len(), 1);
        assert_eq!(list.blogs[0].id, 2);

        let past_end = ListQuery {
            page: Some(5),
            limit: Some(10),
            ..ListQuery::default()
        };
        let list = engine().list(&past_end).unwrap();
        assert!(list.blogs.is_empty());
        assert_eq!(list.total_pages, 1);
    }

    #[test]
    fn test_list_by_category() {
        let by_slug = ListQuery {
            category: Some(CategorySelector::Slug("fiction".to_string())),
            ..ListQuery::default()
        };
        assert_eq!(engine().list(&by_slug).unwrap().total, 2);

        let by_id = ListQuery {
            category: Some(CategorySelector::Id(2)),
            ..ListQuery::default()
        };
        assert_eq!(engine().list(&by_id).unwrap().total, 0);

        let unknown = ListQuery {
            category: Some(CategorySelector::Slug("poetry".to_string())),
            ..ListQuery::default()
        };
        let list = engine().list(&unknown).unwrap();
        assert_eq!(list.total, 0);
        assert_eq!(list.total_pages, 1);
    }

    #[test]
    fn test_list_featured_only() {
        let query = ListQuery {
            featured: Some(true),
            ..ListQuery::default()
        };
        let list = engine().list(&query).unwrap();
        assert_eq!(list.total, 1);
        assert!(list.blogs[0].is_featured);
    }

    #[test]
    fn test_categories_count_published() {
        let list = engine_with(|d| d.blogs[1].status = BlogStatus::Draft)
            .categories()
            .unwrap();
        let counts: Vec<(&str, usize)> = list
            .categories
            .iter()
            .map(|c| (c.slug.as_str(), c.blog_count))
            .collect();
        assert_eq!(counts, vec![("fiction", 1), ("history", 0), ("science", 0)]);
    }

    #[test]
    fn test_store_failure_surfaces_as_unavailable() {
        let engine = LookupEngine::new(Arc::new(DownStore), images());
        assert!(matches!(
            engine.get(&BlogKey::Id(1)),
            Err(ApiError::StoreUnavailable(_))
        ));
        assert!(matches!(
            engine.list(&ListQuery::default()),
            Err(ApiError::StoreUnavailable(_))
        ));
        assert!(matches!(
            engine.categories(),
            Err(ApiError::StoreUnavailable(_))
        ));
    }
}
