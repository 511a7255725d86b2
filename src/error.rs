//! Request-level error taxonomy
//!
//! Every variant renders as `{"error": "..."}` with a fixed status code.

use crate::content::StoreError;
use hyper::StatusCode;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ApiError {
    /// No published blog matches the requested id or slug
    #[error("Blog not found")]
    BlogNotFound,

    #[error("File not found")]
    FileNotFound,

    /// Upload path tried to leave the uploads directory
    #[error("Invalid file path")]
    InvalidPath,

    #[error("Method not allowed")]
    MethodNotAllowed,

    #[error("Route not found")]
    RouteNotFound,

    /// Malformed query parameter value
    #[error("Invalid value for '{0}'")]
    BadRequest(&'static str),

    /// Content store failure; the cause is logged, never rendered
    #[error("Service unavailable")]
    StoreUnavailable(#[source] StoreError),
}

impl ApiError {
    pub const fn status(&self) -> StatusCode {
        match self {
            Self::BlogNotFound | Self::FileNotFound | Self::RouteNotFound => StatusCode::NOT_FOUND,
            Self::InvalidPath | Self::BadRequest(_) => StatusCode::BAD_REQUEST,
            Self::MethodNotAllowed => StatusCode::METHOD_NOT_ALLOWED,
            Self::StoreUnavailable(_) => StatusCode::SERVICE_UNAVAILABLE,
        }
    }
}

impl From<StoreError> for ApiError {
    fn from(err: StoreError) -> Self {
        Self::StoreUnavailable(err)
    }
}
