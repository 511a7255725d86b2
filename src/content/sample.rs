// Bundled sample content
// Served when no dataset file is configured

use super::memory::{Dataset, RelatedGroup};
use super::store::StoreError;
use super::{timestamp, Blog, BlogStatus, Category, RelatedBook};

fn at(raw: &str) -> Result<chrono::NaiveDateTime, StoreError> {
    timestamp::parse(raw).map_err(|e| StoreError::Invalid(format!("bad sample timestamp '{raw}': {e}")))
}

fn tags(values: &[&str]) -> Vec<String> {
    values.iter().map(ToString::to_string).collect()
}

pub fn dataset() -> Result<Dataset, StoreError> {
    let categories = vec![
        Category {
            id: 1,
            name: "Fiction".to_string(),
            slug: "fiction".to_string(),
        },
        Category {
            id: 2,
            name: "History".to_string(),
            slug: "history".to_string(),
        },
        Category {
            id: 3,
            name: "Science".to_string(),
            slug: "science".to_string(),
        },
    ];

    let blogs = vec![
        Blog {
            id: 1,
            slug: "building-personal-library-complete-guide".to_string(),
            title: "Building Your Personal Library: A Complete Guide".to_string(),
            content: "<h2>Introduction</h2><p>Building a personal library is more than just collecting books. It is about creating a curated space that reflects your interests, values, and intellectual journey...</p><h2>Choosing Your Focus</h2><p>The first step in building your personal library is determining what genres and topics resonate with you most...</p><h2>Quality Over Quantity</h2><p>While it might be tempting to fill your shelves with as many books as possible, focusing on quality selections will serve you better in the long run...</p>".to_string(),
            excerpt: "Essential tips for curating a collection that reflects your personality and interests".to_string(),
            featured_image: Some("1758533654_naruto.webp".to_string()),
            featured_image_2: None,
            category_id: 1,
            tags: tags(&["library", "books", "reading", "collection", "personal development"]),
            meta_title: "Building Your Personal Library: A Complete Guide".to_string(),
            meta_description: "Essential tips for curating a collection that reflects your personality and interests".to_string(),
            is_featured: true,
            status: BlogStatus::Published,
            view_count: 1250,
            created_at: at("2024-09-20 10:30:00")?,
            updated_at: at("2024-09-20 10:30:00")?,
        },
        Blog {
            id: 2,
            slug: "art-storytelling-modern-literature".to_string(),
            title: "The Art of Storytelling in Modern Literature".to_string(),
            content: "<h2>The Evolution of Narrative</h2><p>Storytelling has evolved significantly in modern literature, with authors experimenting with new forms and techniques...</p><h2>Character Development in the Digital Age</h2><p>Modern authors face unique challenges in developing characters that resonate with contemporary audiences...</p><h2>The Role of Technology in Storytelling</h2><p>Technology has not only changed how we read but also how stories are told...</p>".to_string(),
            excerpt: "Exploring how contemporary authors are revolutionizing narrative techniques".to_string(),
            featured_image: Some("1758533654_naruto.webp".to_string()),
            featured_image_2: Some("1758546897_68036b8b-c597-4903-92fb-0becd3eefb84.png".to_string()),
            category_id: 1,
            tags: tags(&["storytelling", "modern literature", "narrative", "character development", "innovation"]),
            meta_title: "The Art of Storytelling in Modern Literature".to_string(),
            meta_description: "Exploring how contemporary authors are revolutionizing narrative techniques".to_string(),
            is_featured: false,
            status: BlogStatus::Published,
            view_count: 892,
            created_at: at("2024-09-18 14:15:00")?,
            updated_at: at("2024-09-18 14:15:00")?,
        },
    ];

    let related_books = vec![
        RelatedGroup {
            blog_id: 1,
            books: vec![RelatedBook {
                id: 1,
                title: "The Library Book by Susan Orlean".to_string(),
                purchase_link: "https://www.amazon.com/Library-Book-Susan-Orlean/dp/1476740186".to_string(),
                description: "A fascinating exploration of libraries and their cultural significance".to_string(),
                price: "$15.99".to_string(),
                image: None,
            }],
        },
        RelatedGroup {
            blog_id: 2,
            books: vec![RelatedBook {
                id: 2,
                title: "The Name of the Rose by Umberto Eco".to_string(),
                purchase_link: "https://www.amazon.com/Name-Rose-Umberto-Eco/dp/0544176561".to_string(),
                description: "A medieval mystery set in a monastery library".to_string(),
                price: "$16.99".to_string(),
                image: None,
            }],
        },
    ];

    Ok(Dataset {
        categories,
        blogs,
        related_books,
    })
}
