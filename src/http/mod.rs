//! HTTP protocol layer module
//!
//! Response builders, cache validation and content-type inference, kept
//! apart from routing and lookup logic.

pub mod cache;
pub mod mime;
pub mod response;

pub use response::{
    apply_common_headers, error_response, file_response, json_response, not_modified_response,
    options_response, strip_body, HttpResponse,
};
