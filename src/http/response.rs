//! HTTP response building module
//!
//! Builders for JSON envelopes, error bodies, preflight replies and file
//! payloads, plus the headers every response carries.

use http_body_util::Full;
use hyper::body::Bytes;
use hyper::header::{self, HeaderValue};
use hyper::{Response, StatusCode};
use serde::Serialize;

use super::cache::UPLOAD_CACHE_CONTROL;
use crate::error::ApiError;
use crate::logger;

pub type HttpResponse = Response<Full<Bytes>>;

pub const JSON_CONTENT_TYPE: &str = "application/json";
pub const ALLOWED_METHODS: &str = "GET, HEAD, OPTIONS";

const CORS_ALLOW_METHODS: &str = "GET, POST, PUT, DELETE, OPTIONS";
const CORS_ALLOW_HEADERS: &str = "Content-Type, Authorization, X-Requested-With";

/// Serialize `body` as a JSON response
pub fn json_response<T: Serialize>(status: StatusCode, body: &T) -> HttpResponse {
    match serde_json::to_vec(body) {
        Ok(json) => build_json(status, Bytes::from(json)),
        Err(e) => {
            logger::log_error(&format!("Failed to serialize response: {e}"));
            build_json(
                StatusCode::INTERNAL_SERVER_ERROR,
                Bytes::from_static(br#"{"error":"Internal server error"}"#),
            )
        }
    }
}

/// `{"error": "..."}` with the status the error maps to
pub fn error_response(err: &ApiError) -> HttpResponse {
    let mut response = json_response(
        err.status(),
        &serde_json::json!({ "error": err.to_string() }),
    );
    if matches!(err, ApiError::MethodNotAllowed) {
        response
            .headers_mut()
            .insert(header::ALLOW, HeaderValue::from_static(ALLOWED_METHODS));
    }
    response
}

/// CORS preflight reply: 200, empty body
pub fn options_response() -> HttpResponse {
    Response::builder()
        .status(StatusCode::OK)
        .header(header::ALLOW, ALLOWED_METHODS)
        .header(header::CONTENT_LENGTH, 0)
        .body(Full::new(Bytes::new()))
        .unwrap_or_else(|e| {
            log_build_error("OPTIONS", &e);
            Response::new(Full::new(Bytes::new()))
        })
}

/// Uploaded file with long-lived caching
pub fn file_response(data: Bytes, content_type: &str, etag: &str) -> HttpResponse {
    let content_length = data.len();
    Response::builder()
        .status(StatusCode::OK)
        .header(header::CONTENT_TYPE, content_type)
        .header(header::CONTENT_LENGTH, content_length)
        .header(header::ETAG, etag)
        .header(header::CACHE_CONTROL, UPLOAD_CACHE_CONTROL)
        .body(Full::new(data))
        .unwrap_or_else(|e| {
            log_build_error("200", &e);
            Response::new(Full::new(Bytes::new()))
        })
}

/// 304 for a cached upload
pub fn not_modified_response(etag: &str) -> HttpResponse {
    Response::builder()
        .status(StatusCode::NOT_MODIFIED)
        .header(header::ETAG, etag)
        .header(header::CACHE_CONTROL, UPLOAD_CACHE_CONTROL)
        .body(Full::new(Bytes::new()))
        .unwrap_or_else(|e| {
            log_build_error("304", &e);
            Response::new(Full::new(Bytes::new()))
        })
}

/// Attach CORS and `Server` headers
pub fn apply_common_headers(response: &mut HttpResponse, server_name: &str) {
    let headers = response.headers_mut();
    headers.insert(
        header::ACCESS_CONTROL_ALLOW_ORIGIN,
        HeaderValue::from_static("*"),
    );
    headers.insert(
        header::ACCESS_CONTROL_ALLOW_METHODS,
        HeaderValue::from_static(CORS_ALLOW_METHODS),
    );
    headers.insert(
        header::ACCESS_CONTROL_ALLOW_HEADERS,
        HeaderValue::from_static(CORS_ALLOW_HEADERS),
    );
    if let Ok(value) = HeaderValue::from_str(server_name) {
        headers.insert(header::SERVER, value);
    }
}

/// Drop the body of a HEAD response, keeping its headers
pub fn strip_body(response: &mut HttpResponse) {
    *response.body_mut() = Full::new(Bytes::new());
}

fn build_json(status: StatusCode, body: Bytes) -> HttpResponse {
    let content_length = body.len();
    Response::builder()
        .status(status)
        .header(header::CONTENT_TYPE, JSON_CONTENT_TYPE)
        .header(header::CONTENT_LENGTH, content_length)
        .body(Full::new(body))
        .unwrap_or_else(|e| {
            log_build_error(status.as_str(), &e);
            Response::new(Full::new(Bytes::new()))
        })
}

/// Log response build error
fn log_build_error(status: &str, error: &hyper::http::Error) {
    logger::log_error(&format!("Failed to build {status} response: {error}"));
}

#[cfg(test)]
mod tests {
    use super::*;
    use http_body_util::BodyExt;

    async fn body_string(response: HttpResponse) -> String {
        let bytes = response.into_body().collect().await.unwrap().to_bytes();
        String::from_utf8(bytes.to_vec()).unwrap()
    }

    #[tokio::test]
    async fn test_error_body_shape() {
        let response = error_response(&ApiError::BlogNotFound);
        assert_eq!(response.status(), StatusCode::NOT_FOUND);
        assert_eq!(response.headers()[header::CONTENT_TYPE], JSON_CONTENT_TYPE);
        assert_eq!(body_string(response).await, r#"{"error":"Blog not found"}"#);
    }

    #[tokio::test]
    async fn test_method_not_allowed_has_allow_header() {
        let response = error_response(&ApiError::MethodNotAllowed);
        assert_eq!(response.status(), StatusCode::METHOD_NOT_ALLOWED);
        assert_eq!(response.headers()[header::ALLOW], ALLOWED_METHODS);
        assert_eq!(body_string(response).await, r#"{"error":"Method not allowed"}"#);
    }

    #[tokio::test]
    async fn test_options_is_empty_ok() {
        let response = options_response();
        assert_eq!(response.status(), StatusCode::OK);
        assert!(body_string(response).await.is_empty());
    }

    #[test]
    fn test_common_headers() {
        let mut response = options_response();
        apply_common_headers(&mut response, "blog-content/0.1");
        let headers = response.headers();
        assert_eq!(headers[header::ACCESS_CONTROL_ALLOW_ORIGIN], "*");
        assert_eq!(headers[header::ACCESS_CONTROL_ALLOW_METHODS], CORS_ALLOW_METHODS);
        assert_eq!(headers[header::SERVER], "blog-content/0.1");
    }

    #[test]
    fn test_file_response_headers() {
        let response = file_response(Bytes::from_static(b"png"), "image/png", "\"e\"");
        assert_eq!(response.headers()[header::CONTENT_TYPE], "image/png");
        assert_eq!(response.headers()[header::CACHE_CONTROL], "public, max-age=31536000");
        assert_eq!(response.headers()[header::CONTENT_LENGTH], "3");
    }
}
