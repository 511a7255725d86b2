//! Request routing dispatch module
//!
//! Entry point for HTTP request processing: preflight short-circuit, route
//! resolution, endpoint dispatch, then the headers every response carries.

use crate::config::AppState;
use crate::error::ApiError;
use crate::handler::{blogs, static_files};
use crate::http::{self, HttpResponse};
use crate::logger::{self, AccessLogEntry};
use crate::routing::{Endpoint, PathParams, QueryParams, RouteMatch};
use hyper::body::Body;
use hyper::header::{self, HeaderMap};
use hyper::{Method, Request, Version};
use std::convert::Infallible;
use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Instant;

/// Request context encapsulating information needed for request processing
pub struct RequestContext<'a> {
    pub path: &'a str,
    pub query: Option<&'a str>,
    pub is_head: bool,
    pub if_none_match: Option<String>,
}

/// Main entry point for HTTP request handling
///
/// Request bodies are never read; every endpoint is read-only.
pub async fn handle_request<B>(
    req: Request<B>,
    state: Arc<AppState>,
    peer_addr: SocketAddr,
) -> Result<HttpResponse, Infallible> {
    let started = Instant::now();
    let method = req.method();
    let uri = req.uri();

    let ctx = RequestContext {
        path: uri.path(),
        query: uri.query(),
        is_head: *method == Method::HEAD,
        if_none_match: header_string(req.headers(), &header::IF_NONE_MATCH),
    };

    let mut response = dispatch(method, &ctx, &state).await;

    if ctx.is_head {
        http::strip_body(&mut response);
    }
    http::apply_common_headers(&mut response, &state.config.http.server_name);

    if state.access_log_enabled() {
        let mut entry = AccessLogEntry::new(
            peer_addr.ip().to_string(),
            method.to_string(),
            ctx.path.to_string(),
        );
        entry.query = ctx.query.map(ToString::to_string);
        entry.http_version = version_label(req.version()).to_string();
        entry.status = response.status().as_u16();
        entry.body_bytes = response.body().size_hint().exact().unwrap_or(0);
        entry.referer = header_string(req.headers(), &header::REFERER);
        entry.user_agent = header_string(req.headers(), &header::USER_AGENT);
        entry.request_time_us = u64::try_from(started.elapsed().as_micros()).unwrap_or(u64::MAX);
        logger::log_access(&entry, &state.config.logging.access_log_format);
    }

    Ok(response)
}

/// Resolve the route and run its endpoint, rendering failures as error envelopes
async fn dispatch(method: &Method, ctx: &RequestContext<'_>, state: &AppState) -> HttpResponse {
    // Preflight is answered for any path, known or not
    if *method == Method::OPTIONS {
        return http::options_response();
    }

    let result = match state.routes.resolve(method, ctx.path) {
        RouteMatch::Found { endpoint, params } => {
            run_endpoint(endpoint, &params, ctx, state).await
        }
        RouteMatch::MethodNotAllowed => {
            logger::log_warning(&format!("Method not allowed: {method} {}", ctx.path));
            Err(ApiError::MethodNotAllowed)
        }
        RouteMatch::NotFound => Err(ApiError::RouteNotFound),
    };

    result.unwrap_or_else(|err| {
        if let ApiError::StoreUnavailable(ref cause) = err {
            logger::log_error(&format!("Content store failure on {}: {cause}", ctx.path));
        }
        http::error_response(&err)
    })
}

async fn run_endpoint(
    endpoint: Endpoint,
    params: &PathParams,
    ctx: &RequestContext<'_>,
    state: &AppState,
) -> Result<HttpResponse, ApiError> {
    let engine = &state.engine;
    match endpoint {
        Endpoint::BlogCollection => blogs::collection(engine, &QueryParams::parse(ctx.query)),
        Endpoint::BlogById => blogs::by_id(engine, params.get("id").unwrap_or_default()),
        Endpoint::BlogBySlug => blogs::by_slug(engine, params.get("slug").unwrap_or_default()),
        Endpoint::Categories => blogs::categories(engine),
        Endpoint::Upload => {
            let relative = params.get("path").unwrap_or_default();
            static_files::serve_upload(ctx, &state.uploads_dir, relative).await
        }
    }
}

fn header_string(headers: &HeaderMap, name: &header::HeaderName) -> Option<String> {
    headers
        .get(name)
        .and_then(|v| v.to_str().ok())
        .map(ToString::to_string)
}

const fn version_label(version: Version) -> &'static str {
    match version {
        Version::HTTP_09 => "0.9",
        Version::HTTP_10 => "1.0",
        Version::HTTP_2 => "2",
        Version::HTTP_3 => "3",
        _ => "1.1",
    }
}
