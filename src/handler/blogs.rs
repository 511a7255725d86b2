//! Blog and category endpoints
//!
//! Thin adapters from routed parameters to lookup engine calls.

use hyper::StatusCode;

use crate::error::ApiError;
use crate::http::{json_response, HttpResponse};
use crate::lookup::{BlogKey, LookupEngine};
use crate::routing::query::{self, KeyParam};
use crate::routing::QueryParams;

/// `GET /blogs`: single record when `id`/`slug` is given, listing otherwise
pub fn collection(engine: &LookupEngine, params: &QueryParams) -> Result<HttpResponse, ApiError> {
    match query::blog_key(params) {
        Some(KeyParam::Id(raw)) => by_id(engine, raw),
        Some(KeyParam::Slug(slug)) => by_slug(engine, slug),
        None => {
            let list = engine.list(&query::list_query(params)?)?;
            Ok(json_response(StatusCode::OK, &list))
        }
    }
}

/// Ids that are not integers cannot match any record
pub fn by_id(engine: &LookupEngine, raw: &str) -> Result<HttpResponse, ApiError> {
    let id = query::coerce_id(raw).ok_or(ApiError::BlogNotFound)?;
    let envelope = engine.get(&BlogKey::Id(id))?;
    Ok(json_response(StatusCode::OK, &envelope))
}

pub fn by_slug(engine: &LookupEngine, slug: &str) -> Result<HttpResponse, ApiError> {
    let envelope = engine.get(&BlogKey::Slug(slug.to_string()))?;
    Ok(json_response(StatusCode::OK, &envelope))
}

pub fn categories(engine: &LookupEngine) -> Result<HttpResponse, ApiError> {
    Ok(json_response(StatusCode::OK, &engine.categories()?))
}
