//! # Tiller Router
//!
//! URL pattern compilation and action path resolution:
//! - Anonymous `{}` placeholders compiled to match expressions (`/member/edit` + `{}`)
//! - Routing-target classification (action path vs. static resource)
//! - Action mounts with method-restricted executes
//! - Longest-split-first path resolution
//!
//! ## Pattern Language
//!
//! Route templates use anonymous positional placeholders only. `{}` matches a
//! single path segment and is captured as `arg0`, `arg1`, ... in declaration
//! order. Named placeholders (`{id}`) are rejected when the owning action is
//! registered, never at request time.
//!
//! ## Example
//!
//! ```
//! use tiller_router::{ActionRegistry, ExecuteDef, RequestMethod};
//!
//! let mut registry = ActionRegistry::new();
//! registry
//!     .register("/member/list", vec![
//!         ExecuteDef::index(),
//!         ExecuteDef::new("detail", RequestMethod::Get, "{}"),
//!     ])
//!     .unwrap();
//!
//! let resolved = registry.resolve("/member/list/3/", "GET").unwrap();
//! assert_eq!(resolved.execute_name, "detail");
//! assert_eq!(resolved.params, vec!["3".to_string()]);
//! ```

pub mod classify;
pub mod path;
pub mod pattern;
pub mod registry;

pub use classify::{is_routing_target, DefaultRoutingPolicy, RoutingPolicy};
pub use path::{trim_trailing_slash, PathSplits};
pub use pattern::{PatternError, UrlPattern};
pub use registry::{
    ActionMount, ActionRegistry, ExecuteConfig, ExecuteDef, RegistryError, RequestMethod,
    ResolvedAction,
};
