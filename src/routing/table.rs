//! Route table
//!
//! Explicit `method + path template -> endpoint` table. A path that matches
//! some template under a different method yields 405; a path no template
//! matches yields 404.

use hyper::Method;
use percent_encoding::percent_decode_str;

/// Handler a matched route dispatches to
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Endpoint {
    BlogCollection,
    BlogById,
    BlogBySlug,
    Categories,
    Upload,
}

#[derive(Debug, Clone, PartialEq, Eq)]
enum Segment {
    Literal(String),
    /// `{name}`: any single non-empty segment
    Param(String),
    /// `{name:int}`: a segment of ASCII digits
    IntParam(String),
    /// `{*name}`: one or more trailing segments
    Rest(String),
}

/// Parsed path template such as `/api/blogs/{id:int}`
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RouteTemplate {
    raw: String,
    segments: Vec<Segment>,
}

impl RouteTemplate {
    pub fn parse(raw: &str) -> Self {
        let segments = split_path(raw)
            .map(|s| match s.strip_prefix('{').and_then(|s| s.strip_suffix('}')) {
                Some(inner) => {
                    if let Some(name) = inner.strip_prefix('*') {
                        Segment::Rest(name.to_string())
                    } else if let Some(name) = inner.strip_suffix(":int") {
                        Segment::IntParam(name.to_string())
                    } else {
                        Segment::Param(inner.to_string())
                    }
                }
                None => Segment::Literal(s.to_string()),
            })
            .collect();

        Self {
            raw: format!("/{}", split_path(raw).collect::<Vec<_>>().join("/")),
            segments,
        }
    }

    pub fn as_str(&self) -> &str {
        &self.raw
    }

    /// Match a request path, returning decoded parameters on success
    pub fn matches(&self, path: &str) -> Option<PathParams> {
        let parts: Vec<&str> = split_path(path).collect();
        let mut params = PathParams::default();

        for (i, segment) in self.segments.iter().enumerate() {
            match segment {
                Segment::Rest(name) => {
                    if i >= parts.len() {
                        return None;
                    }
                    params.push(name, &decode(&parts[i..].join("/"))?);
                    return Some(params);
                }
                _ if i >= parts.len() => return None,
                Segment::Literal(lit) => {
                    if parts[i] != lit {
                        return None;
                    }
                }
                Segment::Param(name) => params.push(name, &decode(parts[i])?),
                Segment::IntParam(name) => {
                    if !parts[i].bytes().all(|b| b.is_ascii_digit()) {
                        return None;
                    }
                    params.push(name, parts[i]);
                }
            }
        }

        (parts.len() == self.segments.len()).then_some(params)
    }
}

/// Split on `/`, ignoring empty segments (so `/blogs/` equals `/blogs`)
fn split_path(path: &str) -> impl Iterator<Item = &str> {
    path.split('/').filter(|s| !s.is_empty())
}

fn decode(raw: &str) -> Option<String> {
    percent_decode_str(raw)
        .decode_utf8()
        .ok()
        .map(std::borrow::Cow::into_owned)
}

/// Named path parameters captured by a template
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PathParams(Vec<(String, String)>);

impl PathParams {
    fn push(&mut self, name: &str, value: &str) {
        self.0.push((name.to_string(), value.to_string()));
    }

    pub fn get(&self, name: &str) -> Option<&str> {
        self.0
            .iter()
            .find(|(n, _)| n == name)
            .map(|(_, v)| v.as_str())
    }
}

#[derive(Debug, Clone)]
pub struct Route {
    pub template: RouteTemplate,
    pub methods: Vec<Method>,
    pub endpoint: Endpoint,
}

/// Outcome of resolving a request against the table
#[derive(Debug, PartialEq, Eq)]
pub enum RouteMatch {
    Found {
        endpoint: Endpoint,
        params: PathParams,
    },
    /// Path is known but not for this method
    MethodNotAllowed,
    NotFound,
}

#[derive(Debug, Clone, Default)]
pub struct RouteTable {
    routes: Vec<Route>,
}

impl RouteTable {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a read-only (GET/HEAD) route
    pub fn get(mut self, template: &str, endpoint: Endpoint) -> Self {
        self.routes.push(Route {
            template: RouteTemplate::parse(template),
            methods: vec![Method::GET, Method::HEAD],
            endpoint,
        });
        self
    }

    /// Blog and category routes under each mount prefix, plus uploads
    pub fn content_routes(mounts: &[String], uploads_path: &str) -> Self {
        let mut table = Self::new();
        for mount in mounts {
            let base = mount.trim_end_matches('/');
            table = table
                .get(&format!("{base}/blogs"), Endpoint::BlogCollection)
                .get(&format!("{base}/blogs/slug/{{slug}}"), Endpoint::BlogBySlug)
                .get(&format!("{base}/blogs/{{id:int}}"), Endpoint::BlogById)
                .get(&format!("{base}/categories"), Endpoint::Categories);
        }
        let uploads = uploads_path.trim_end_matches('/');
        table.get(&format!("{uploads}/{{*path}}"), Endpoint::Upload)
    }

    pub fn resolve(&self, method: &Method, path: &str) -> RouteMatch {
        let mut path_known = false;

        for route in &self.routes {
            let Some(params) = route.template.matches(path) else {
                continue;
            };
            if route.methods.contains(method) {
                return RouteMatch::Found {
                    endpoint: route.endpoint,
                    params,
                };
            }
            path_known = true;
        }

        if path_known {
            RouteMatch::MethodNotAllowed
        } else {
            RouteMatch::NotFound
        }
    }

    pub fn routes(&self) -> &[Route] {
        &self.routes
    }
}
