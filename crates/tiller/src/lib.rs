// Tiller - action routing and dispatch core
// Classifies inbound requests, matches compiled url patterns, and dispatches
// to registered action handlers; everything else passes through the chain.

pub mod config;
pub mod dispatch;
pub mod engine;
pub mod filter;
pub mod request_context;

// Re-export framework types
pub use config::{Config, ConfigRoutingPolicy, RoutingConfig, ServerConfig};
pub use dispatch::{boxed_handler, DispatchError, Dispatcher, HandlerFn};
pub use engine::{EngineError, RoutingEngine, RoutingEngineBuilder};
pub use filter::{decide, route_request, RoutingOutcome};
pub use request_context::{MatchedAction, QueryParams, RequestContext};

// Re-export the router crate and its commonly used types
pub use tiller_router as router;
pub use tiller_router::{
    is_routing_target, ActionRegistry, DefaultRoutingPolicy, ExecuteDef, PatternError,
    RequestMethod, ResolvedAction, RoutingPolicy, UrlPattern,
};

// Re-export commonly used types from dependencies
pub use axum;
pub use axum::http::StatusCode;
