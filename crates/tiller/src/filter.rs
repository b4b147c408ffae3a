// File: src/filter.rs
// Purpose: Per-request routing decision and the axum middleware around it

use std::sync::Arc;

use axum::{
    extract::{Request, State},
    http::{header, HeaderMap, HeaderValue, Method, StatusCode},
    middleware::Next,
    response::{IntoResponse, Response},
};
use tracing::{debug, error};

use crate::dispatch::DispatchError;
use crate::engine::RoutingEngine;
use crate::request_context::{MatchedAction, QueryParams, RequestContext};
use tiller_router::{is_routing_target, ResolvedAction};

/// Per-request routing decision: created, acted on, and discarded.
#[derive(Debug)]
pub enum RoutingOutcome {
    /// Not ours; hand the request to the next service in the chain.
    PassThrough,
    /// Canonicalize: 302 to the same path with its trailing slash, query
    /// string preserved as received.
    Redirect { location: String },
    /// Ours; execute the matched action.
    Dispatch(ResolvedAction),
}

/// Compute the routing decision for a request. Pure with respect to the
/// request: same engine, method, path, and query always produce the same
/// outcome.
///
/// The steps run in a fixed order:
/// 1. Paths outside the context path pass through.
/// 2. The policy may force routing; otherwise the dot/trailing-slash
///    heuristic classifies the path. Static-looking paths pass through.
/// 3. An unresolvable path passes through (the chain's static/404 handling
///    applies).
/// 4. A resolvable GET path missing its trailing slash redirects to the
///    canonical form, unless the policy suppresses it. Non-GET requests
///    dispatch directly.
pub fn decide(
    engine: &RoutingEngine,
    method: &Method,
    path: &str,
    raw_query: Option<&str>,
) -> RoutingOutcome {
    let Some(relative) = relative_to_context(path, engine.context_path()) else {
        return RoutingOutcome::PassThrough;
    };

    let forced = engine.policy().is_forced_routing_target(relative);
    if !forced && !is_routing_target(relative) {
        return RoutingOutcome::PassThrough;
    }

    let Some(resolved) = engine.registry().resolve(relative, method.as_str()) else {
        return RoutingOutcome::PassThrough;
    };

    if *method == Method::GET
        && !relative.ends_with('/')
        && !engine.policy().suppresses_trailing_slash_redirect(relative)
    {
        let location = match raw_query {
            Some(query) if !query.is_empty() => format!("{}/?{}", path, query),
            _ => format!("{}/", path),
        };
        debug!(path, location = %location, "redirecting to canonical trailing-slash form");
        return RoutingOutcome::Redirect { location };
    }

    RoutingOutcome::Dispatch(resolved)
}

/// The request path relative to the context path, or None when the request
/// lives outside it. An exact context-path hit maps to the root.
fn relative_to_context<'a>(path: &'a str, context_path: &str) -> Option<&'a str> {
    if context_path.is_empty() {
        return Some(path);
    }
    let stripped = path.strip_prefix(context_path)?;
    if stripped.is_empty() {
        Some("/")
    } else if stripped.starts_with('/') {
        Some(stripped)
    } else {
        // "/appfoo" is not inside "/app"
        None
    }
}

/// Axum middleware: intercepts every inbound request ahead of static-file
/// handling. Use with `axum::middleware::from_fn_with_state`.
pub async fn route_request(
    State(engine): State<Arc<RoutingEngine>>,
    req: Request,
    next: Next,
) -> Response {
    let method = req.method().clone();
    let path = req.uri().path().to_string();
    let raw_query = req.uri().query().map(str::to_string);

    match decide(&engine, &method, &path, raw_query.as_deref()) {
        RoutingOutcome::PassThrough => next.run(req).await,
        RoutingOutcome::Redirect { location } => redirect_response(&location),
        RoutingOutcome::Dispatch(resolved) => {
            let ctx = build_context(&resolved, method, path, raw_query, req.headers().clone());
            match engine.dispatcher().dispatch(&resolved, ctx).await {
                Ok(response) => response,
                Err(err) => failure_response(&err),
            }
        }
    }
}

/// Positional values are decoded exactly once, here at the dispatch boundary.
fn build_context(
    resolved: &ResolvedAction,
    method: Method,
    path: String,
    raw_query: Option<String>,
    headers: HeaderMap,
) -> RequestContext {
    let params = resolved
        .params
        .iter()
        .map(|value| {
            urlencoding::decode(value)
                .map(|decoded| decoded.into_owned())
                .unwrap_or_else(|_| value.clone())
        })
        .collect();

    RequestContext::new(
        method,
        path,
        QueryParams::parse(raw_query.as_deref()),
        headers,
        params,
        MatchedAction::from(resolved),
    )
}

fn redirect_response(location: &str) -> Response {
    let mut headers = HeaderMap::new();
    if let Ok(value) = HeaderValue::from_str(location) {
        headers.insert(header::LOCATION, value);
    }
    (StatusCode::FOUND, headers).into_response()
}

fn failure_response(err: &DispatchError) -> Response {
    error!(error = %err, "action dispatch failed");
    (StatusCode::INTERNAL_SERVER_ERROR, "internal server error").into_response()
}
