//! HTTP cache validation
//!
//! `ETag` generation and `If-None-Match` handling for uploaded files.

use std::collections::hash_map::DefaultHasher;
use std::hash::{Hash, Hasher};

/// Cache-Control for uploads: one year, shared caches allowed
pub const UPLOAD_CACHE_CONTROL: &str = "public, max-age=31536000";

/// Quoted content-hash `ETag`, e.g. `"1f3a9c"`
pub fn generate_etag(content: &[u8]) -> String {
    let mut hasher = DefaultHasher::new();
    content.len().hash(&mut hasher);
    content.hash(&mut hasher);
    format!("\"{:x}\"", hasher.finish())
}

/// Whether `If-None-Match` (single, list, weak or `*`) covers `etag`
pub fn check_etag_match(if_none_match: Option<&str>, etag: &str) -> bool {
    if_none_match.is_some_and(|header| {
        header.split(',').map(str::trim).any(|candidate| {
            candidate == "*" || candidate.strip_prefix("W/").unwrap_or(candidate) == etag
        })
    })
}
