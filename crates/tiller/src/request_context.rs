// File: src/request_context.rs
// Purpose: Explicit per-request context threaded through the dispatch chain

use axum::http::{HeaderMap, Method};
use std::collections::HashMap;
use std::str::FromStr;

use tiller_router::ResolvedAction;

/// Query parameters from the URL (?key=value), plus the raw string for
/// redirect preservation.
#[derive(Clone, Default)]
pub struct QueryParams {
    raw: String,
    map: HashMap<String, String>,
}

impl QueryParams {
    /// Parse the raw query string. Keys and values are percent-decoded;
    /// a key without `=` maps to the empty string.
    pub fn parse(raw: Option<&str>) -> Self {
        let raw = raw.unwrap_or("").to_string();
        let map = raw
            .split('&')
            .filter(|pair| !pair.is_empty())
            .map(|pair| match pair.split_once('=') {
                Some((key, value)) => (decode_component(key), decode_component(value)),
                None => (decode_component(pair), String::new()),
            })
            .collect();

        Self { raw, map }
    }

    pub fn get(&self, key: &str) -> Option<&str> {
        self.map.get(key).map(String::as_str)
    }

    /// The query string exactly as received (still percent-encoded).
    pub fn raw(&self) -> &str {
        &self.raw
    }

    pub fn is_empty(&self) -> bool {
        self.map.is_empty()
    }

    pub fn as_map(&self) -> &HashMap<String, String> {
        &self.map
    }
}

fn decode_component(value: &str) -> String {
    urlencoding::decode(value)
        .map(|decoded| decoded.into_owned())
        .unwrap_or_else(|_| value.to_string())
}

/// Summary of the action configuration a request matched, recorded on the
/// context for downstream introspection.
#[derive(Debug, Clone)]
pub struct MatchedAction {
    pub action_path: String,
    pub execute_name: String,
    pub param_path: String,
}

impl From<&ResolvedAction> for MatchedAction {
    fn from(resolved: &ResolvedAction) -> Self {
        Self {
            action_path: resolved.action_path.clone(),
            execute_name: resolved.execute_name.clone(),
            param_path: resolved.param_path.clone(),
        }
    }
}

/// Request context passed to action handlers
#[derive(Clone)]
pub struct RequestContext {
    /// HTTP method (GET, POST, PUT, DELETE, etc.)
    pub method: Method,

    /// Request path as received (context path included)
    pub path: String,

    /// Query parameters from URL (?key=value)
    pub query: QueryParams,

    /// Request headers
    pub headers: HeaderMap,

    /// Positional url-pattern values, percent-decoded, in declaration order
    params: Vec<String>,

    /// Which action configuration matched
    matched: MatchedAction,
}

impl std::fmt::Debug for RequestContext {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RequestContext")
            .field("method", &self.method)
            .field("path", &self.path)
            .finish()
    }
}

impl RequestContext {
    pub fn new(
        method: Method,
        path: String,
        query: QueryParams,
        headers: HeaderMap,
        params: Vec<String>,
        matched: MatchedAction,
    ) -> Self {
        Self {
            method,
            path,
            query,
            headers,
            params,
            matched,
        }
    }

    /// Get a positional url-pattern value by declaration index
    pub fn param(&self, index: usize) -> Option<&str> {
        self.params.get(index).map(String::as_str)
    }

    /// Parse a positional value into a typed argument
    pub fn parse_param<T: FromStr>(&self, index: usize) -> Option<T> {
        self.param(index)?.parse().ok()
    }

    pub fn param_count(&self) -> usize {
        self.params.len()
    }

    /// Get a header value
    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers.get(name)?.to_str().ok()
    }

    /// The matched action summary
    pub fn matched(&self) -> &MatchedAction {
        &self.matched
    }
}
