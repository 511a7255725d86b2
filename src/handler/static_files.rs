//! Static file serving module
//!
//! Serves uploaded images from the uploads directory. Requested paths are
//! confined to that directory: `..` segments are rejected outright and the
//! canonical target must stay under the canonical root.

use crate::error::ApiError;
use crate::handler::router::RequestContext;
use crate::http::{self, cache, mime, HttpResponse};
use crate::logger;
use hyper::body::Bytes;
use std::path::{Path, PathBuf};
use tokio::fs;

/// Serve `relative` (already percent-decoded) from `uploads_dir`
pub async fn serve_upload(
    ctx: &RequestContext<'_>,
    uploads_dir: &Path,
    relative: &str,
) -> Result<HttpResponse, ApiError> {
    let relative = sanitize_relative_path(relative).inspect_err(|_| {
        logger::log_warning(&format!("Path traversal attempt blocked: {}", ctx.path));
    })?;

    let root = fs::canonicalize(uploads_dir).await.map_err(|e| {
        logger::log_warning(&format!(
            "Uploads directory not found or inaccessible '{}': {e}",
            uploads_dir.display()
        ));
        ApiError::FileNotFound
    })?;

    // Missing files are common (404), no need to log them
    let resolved = fs::canonicalize(root.join(&relative))
        .await
        .map_err(|_| ApiError::FileNotFound)?;

    if !resolved.starts_with(&root) {
        logger::log_warning(&format!(
            "Upload resolves outside uploads directory: {} -> {}",
            ctx.path,
            resolved.display()
        ));
        return Err(ApiError::FileNotFound);
    }

    let is_file = fs::metadata(&resolved).await.is_ok_and(|m| m.is_file());
    if !is_file {
        return Err(ApiError::FileNotFound);
    }

    let data = fs::read(&resolved).await.map_err(|e| {
        logger::log_error(&format!("Failed to read file '{}': {e}", resolved.display()));
        ApiError::FileNotFound
    })?;

    let etag = cache::generate_etag(&data);
    if cache::check_etag_match(ctx.if_none_match.as_deref(), &etag) {
        return Ok(http::not_modified_response(&etag));
    }

    let content_type = mime::content_type_for_path(&relative);
    Ok(http::file_response(Bytes::from(data), content_type, &etag))
}

/// Turn a request path into a relative path with no parent references
fn sanitize_relative_path(raw: &str) -> Result<PathBuf, ApiError> {
    if raw.contains(['\0', '\\']) {
        return Err(ApiError::InvalidPath);
    }

    let mut path = PathBuf::new();
    for segment in raw.split('/') {
        match segment {
            "" | "." => {}
            ".." => return Err(ApiError::InvalidPath),
            s => path.push(s),
        }
    }

    if path.as_os_str().is_empty() {
        return Err(ApiError::FileNotFound);
    }
    Ok(path)
}

#[cfg(test)]
mod tests {
    use super::*;
    use http_body_util::BodyExt;
    use hyper::header;
    use std::fs as std_fs;

    fn ctx(if_none_match: Option<&str>) -> RequestContext<'static> {
        RequestContext {
            path: "/uploads/test",
            query: None,
            is_head: false,
            if_none_match: if_none_match.map(ToString::to_string),
        }
    }

    fn uploads_with(files: &[(&str, &[u8])]) -> tempfile::TempDir {
        let dir = tempfile::tempdir().unwrap();
        let uploads = dir.path().join("uploads");
        std_fs::create_dir_all(&uploads).unwrap();
        for (name, data) in files {
            let path = uploads.join(name);
            if let Some(parent) = path.parent() {
                std_fs::create_dir_all(parent).unwrap();
            }
            std_fs::write(path, data).unwrap();
        }
        std_fs::write(dir.path().join("secret.txt"), b"top secret").unwrap();
        dir
    }

    #[test]
    fn test_sanitize() {
        assert_eq!(
            sanitize_relative_path("a/./b.png").unwrap(),
            PathBuf::from("a").join("b.png")
        );
        assert!(matches!(sanitize_relative_path("../x"), Err(ApiError::InvalidPath)));
        assert!(matches!(sanitize_relative_path("a/../../x"), Err(ApiError::InvalidPath)));
        assert!(matches!(sanitize_relative_path("a\\..\\x"), Err(ApiError::InvalidPath)));
        assert!(matches!(sanitize_relative_path("//"), Err(ApiError::FileNotFound)));
    }

    #[tokio::test]
    async fn test_serves_file_with_headers() {
        let dir = uploads_with(&[("cover.webp", b"RIFFxxxxWEBP")]);
        let response = serve_upload(&ctx(None), &dir.path().join("uploads"), "cover.webp")
            .await
            .unwrap();

        assert_eq!(response.status(), 200);
        assert_eq!(response.headers()[header::CONTENT_TYPE], "image/webp");
        assert_eq!(response.headers()[header::CACHE_CONTROL], "public, max-age=31536000");
        let body = response.into_body().collect().await.unwrap().to_bytes();
        assert_eq!(&body[..], b"RIFFxxxxWEBP");
    }

    #[tokio::test]
    async fn test_nested_file_and_unknown_type() {
        let dir = uploads_with(&[("2024/09/notes.bin", b"\x00\x01")]);
        let response = serve_upload(&ctx(None), &dir.path().join("uploads"), "2024/09/notes.bin")
            .await
            .unwrap();
        assert_eq!(response.headers()[header::CONTENT_TYPE], "application/octet-stream");
    }

    #[tokio::test]
    async fn test_missing_file() {
        let dir = uploads_with(&[]);
        let err = serve_upload(&ctx(None), &dir.path().join("uploads"), "does-not-exist.png")
            .await
            .unwrap_err();
        assert!(matches!(err, ApiError::FileNotFound));
    }

    #[tokio::test]
    async fn test_directory_is_not_a_file() {
        let dir = uploads_with(&[("sub/a.png", b"png")]);
        let err = serve_upload(&ctx(None), &dir.path().join("uploads"), "sub")
            .await
            .unwrap_err();
        assert!(matches!(err, ApiError::FileNotFound));
    }

    #[tokio::test]
    async fn test_traversal_rejected_even_when_target_exists() {
        let dir = uploads_with(&[]);
        assert!(dir.path().join("secret.txt").exists());
        let err = serve_upload(&ctx(None), &dir.path().join("uploads"), "../secret.txt")
            .await
            .unwrap_err();
        assert!(matches!(err, ApiError::InvalidPath));
    }

    #[tokio::test]
    async fn test_missing_uploads_dir() {
        let dir = tempfile::tempdir().unwrap();
        let err = serve_upload(&ctx(None), &dir.path().join("nope"), "a.png")
            .await
            .unwrap_err();
        assert!(matches!(err, ApiError::FileNotFound));
    }

    #[tokio::test]
    async fn test_etag_revalidation() {
        let dir = uploads_with(&[("a.gif", b"GIF89a")]);
        let uploads = dir.path().join("uploads");
        let first = serve_upload(&ctx(None), &uploads, "a.gif").await.unwrap();
        let etag = first.headers()[header::ETAG].to_str().unwrap().to_string();

        let second = serve_upload(&ctx(Some(&etag)), &uploads, "a.gif").await.unwrap();
        assert_eq!(second.status(), 304);
    }

    #[cfg(unix)]
    #[tokio::test]
    async fn test_symlink_escape_hidden() {
        let dir = uploads_with(&[]);
        std::os::unix::fs::symlink(
            dir.path().join("secret.txt"),
            dir.path().join("uploads").join("link.png"),
        )
        .unwrap();
        let err = serve_upload(&ctx(None), &dir.path().join("uploads"), "link.png")
            .await
            .unwrap_err();
        assert!(matches!(err, ApiError::FileNotFound));
    }
}
