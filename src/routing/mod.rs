//! Routing module
//!
//! Provides the explicit route table and query-string parsing used by the
//! request dispatcher.

pub mod query;
mod table;

pub use query::QueryParams;
pub use table::{Endpoint, PathParams, RouteMatch, RouteTable};
