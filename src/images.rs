//! Image reference resolution
//!
//! Maps whatever the content store holds for an image (bare filename,
//! `/uploads/...` path or absolute URL) to a URL clients can fetch directly.

/// Resolves stored image references against the backend base URL
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ImageResolver {
    /// Base URL without trailing slash, e.g. `https://cdn.example.com`
    base_url: String,
    /// Uploads URL prefix with leading and trailing slash, e.g. `/uploads/`
    uploads_prefix: String,
}

impl ImageResolver {
    pub fn new(base_url: &str, uploads_path: &str) -> Self {
        let trimmed = uploads_path.trim_matches('/');
        let uploads_prefix = if trimmed.is_empty() {
            "/".to_string()
        } else {
            format!("/{trimmed}/")
        };

        Self {
            base_url: base_url.trim_end_matches('/').to_string(),
            uploads_prefix,
        }
    }

    /// Resolve a stored reference; `None` and blank input mean "no image"
    pub fn resolve(&self, reference: Option<&str>) -> Option<String> {
        let reference = reference.map(str::trim).filter(|r| !r.is_empty())?;

        if has_scheme(reference) {
            return Some(reference.to_string());
        }

        if reference.starts_with(&self.uploads_prefix) {
            return Some(format!("{}{reference}", self.base_url));
        }

        Some(format!(
            "{}{}{}",
            self.base_url,
            self.uploads_prefix,
            reference.trim_start_matches('/')
        ))
    }
}

/// Check for an RFC 3986 scheme followed by `://`
fn has_scheme(reference: &str) -> bool {
    let Some((scheme, _)) = reference.split_once("://") else {
        return false;
    };
    let mut chars = scheme.chars();
    chars.next().is_some_and(|c| c.is_ascii_alphabetic())
        && chars.all(|c| c.is_ascii_alphanumeric() || matches!(c, '+' | '-' | '.'))
}
