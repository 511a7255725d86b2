// Query string parsing for blog endpoints

use crate::error::ApiError;
use crate::lookup::{CategorySelector, ListQuery};

/// Decoded query parameters; the first occurrence of a name wins
#[derive(Debug, Clone, Default)]
pub struct QueryParams(Vec<(String, String)>);

impl QueryParams {
    pub fn parse(query: Option<&str>) -> Self {
        let pairs = query
            .map(|q| {
                form_urlencoded::parse(q.as_bytes())
                    .map(|(k, v)| (k.into_owned(), v.into_owned()))
                    .collect()
            })
            .unwrap_or_default();
        Self(pairs)
    }

    pub fn get(&self, name: &str) -> Option<&str> {
        self.0
            .iter()
            .find(|(k, _)| k == name)
            .map(|(_, v)| v.as_str())
    }

    /// Non-blank value of a parameter
    fn value(&self, name: &str) -> Option<&str> {
        self.get(name).map(str::trim).filter(|v| !v.is_empty())
    }
}

/// Single-record selector carried in the query string
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum KeyParam<'a> {
    /// Raw `id` value; may not be numeric
    Id(&'a str),
    Slug(&'a str),
}

/// `id` takes precedence over `slug` when both are given
pub fn blog_key(params: &QueryParams) -> Option<KeyParam<'_>> {
    params
        .get("id")
        .map(KeyParam::Id)
        .or_else(|| params.get("slug").map(KeyParam::Slug))
}

/// Loose integer id comparison: surrounding whitespace and a leading `+` are tolerated
pub fn coerce_id(raw: &str) -> Option<i64> {
    raw.trim().parse().ok()
}

pub fn list_query(params: &QueryParams) -> Result<ListQuery, ApiError> {
    let category = params.value("category").map(|raw| match raw.parse::<i64>() {
        Ok(id) => CategorySelector::Id(id),
        Err(_) => CategorySelector::Slug(raw.to_string()),
    });

    let featured = params
        .value("featured")
        .map(|raw| parse_flag(raw).ok_or(ApiError::BadRequest("featured")))
        .transpose()?;

    Ok(ListQuery {
        category,
        featured,
        tag: params.value("tag").map(ToString::to_string),
        page: positive(params, "page")?,
        limit: positive(params, "limit")?,
    })
}

fn parse_flag(raw: &str) -> Option<bool> {
    match raw.to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" => Some(true),
        "0" | "false" | "no" => Some(false),
        _ => None,
    }
}

fn positive(params: &QueryParams, name: &'static str) -> Result<Option<usize>, ApiError> {
    params
        .value(name)
        .map(|raw| match raw.parse::<usize>() {
            Ok(n) if n > 0 => Ok(n),
            _ => Err(ApiError::BadRequest(name)),
        })
        .transpose()
}
