//! Request handler module
//!
//! Request dispatch plus the blog, category and upload endpoints.

mod blogs;
pub mod router;
mod static_files;

// Re-export main entry point
pub use router::handle_request;
