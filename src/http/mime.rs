//! MIME type detection module
//!
//! Content-Type for uploaded images, inferred from the file extension.

use std::path::Path;

/// Fallback for anything that is not a recognized image type
pub const OCTET_STREAM: &str = "application/octet-stream";

/// Get Content-Type for a file extension (case-insensitive)
pub fn content_type_for_extension(extension: Option<&str>) -> &'static str {
    let Some(ext) = extension else {
        return OCTET_STREAM;
    };

    match ext.to_ascii_lowercase().as_str() {
        "jpg" | "jpeg" => "image/jpeg",
        "png" => "image/png",
        "webp" => "image/webp",
        "gif" => "image/gif",
        _ => OCTET_STREAM,
    }
}

pub fn content_type_for_path(path: &Path) -> &'static str {
    content_type_for_extension(path.extension().and_then(|e| e.to_str()))
}
