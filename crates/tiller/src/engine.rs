// File: src/engine.rs
// Purpose: One-time startup assembly of registry, handlers, and policy

use std::collections::{BTreeSet, HashMap};
use std::sync::Arc;

use thiserror::Error;
use tiller_router::{ActionRegistry, DefaultRoutingPolicy, ExecuteDef, RegistryError, RoutingPolicy};
use tracing::info;

use crate::dispatch::{handler_key, Dispatcher, HandlerFn};

/// Errors raised while building the engine. All are deployment defects:
/// fatal at startup, never caught and retried.
#[derive(Debug, Error)]
pub enum EngineError {
    #[error(transparent)]
    Registry(#[from] RegistryError),

    #[error("execute {owner} has no registered handler")]
    MissingHandler { owner: String },

    #[error("handler {owner} does not correspond to a declared execute")]
    OrphanHandler { owner: String },

    #[error("invalid context path '{path}': must be empty or start with '/'")]
    InvalidContextPath { path: String },
}

/// The immutable routing aggregate: compiled action registry, handler
/// dispatcher, and routing policy.
///
/// Built once before the first request is served and shared via `Arc`;
/// afterwards every read is unsynchronized and lock-free.
pub struct RoutingEngine {
    registry: ActionRegistry,
    dispatcher: Dispatcher,
    policy: Arc<dyn RoutingPolicy>,
    context_path: String,
}

impl RoutingEngine {
    pub fn builder() -> RoutingEngineBuilder {
        RoutingEngineBuilder::new()
    }

    pub fn registry(&self) -> &ActionRegistry {
        &self.registry
    }

    pub fn dispatcher(&self) -> &Dispatcher {
        &self.dispatcher
    }

    pub fn policy(&self) -> &dyn RoutingPolicy {
        self.policy.as_ref()
    }

    pub fn context_path(&self) -> &str {
        &self.context_path
    }
}

impl std::fmt::Debug for RoutingEngine {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RoutingEngine")
            .field("mounts", &self.registry.len())
            .field("context_path", &self.context_path)
            .finish()
    }
}

/// Collects action declarations and handlers, then validates and compiles
/// the whole configuration in one `build()` step.
pub struct RoutingEngineBuilder {
    context_path: String,
    policy: Arc<dyn RoutingPolicy>,
    actions: Vec<(String, Vec<ExecuteDef>)>,
    handlers: HashMap<String, HandlerFn>,
}

impl RoutingEngineBuilder {
    fn new() -> Self {
        Self {
            context_path: String::new(),
            policy: Arc::new(DefaultRoutingPolicy),
            actions: Vec::new(),
            handlers: HashMap::new(),
        }
    }

    /// Set the context path prefix (e.g. "/app"); a trailing slash is trimmed.
    pub fn context_path(mut self, path: impl Into<String>) -> Self {
        self.context_path = path.into();
        self
    }

    pub fn policy(mut self, policy: Arc<dyn RoutingPolicy>) -> Self {
        self.policy = policy;
        self
    }

    /// Declare an action mount with its executes.
    pub fn action(mut self, path: impl Into<String>, executes: Vec<ExecuteDef>) -> Self {
        self.actions.push((path.into(), executes));
        self
    }

    /// Register the handler for one execute.
    pub fn handler(
        mut self,
        action_path: &str,
        execute_name: &str,
        handler: HandlerFn,
    ) -> Self {
        self.handlers
            .insert(handler_key(action_path, execute_name), handler);
        self
    }

    /// Compile every declared pattern and validate the handler registry
    /// against the declared executes, failing fast on any mismatch.
    pub fn build(self) -> Result<RoutingEngine, EngineError> {
        let context_path = normalize_context_path(&self.context_path)?;

        let mut registry = ActionRegistry::new();
        for (path, executes) in self.actions {
            registry.register(&path, executes)?;
        }

        // Every execute needs a handler...
        let mut declared = BTreeSet::new();
        for mount in registry.mounts() {
            for execute in &mount.executes {
                let owner = handler_key(&mount.path, &execute.name);
                if !self.handlers.contains_key(&owner) {
                    return Err(EngineError::MissingHandler { owner });
                }
                declared.insert(owner);
            }
        }

        // ...and every handler a declared execute
        let mut registered: Vec<&String> = self.handlers.keys().collect();
        registered.sort();
        for owner in registered {
            if !declared.contains(owner) {
                return Err(EngineError::OrphanHandler {
                    owner: owner.clone(),
                });
            }
        }

        info!(
            mounts = registry.len(),
            handlers = self.handlers.len(),
            "routing engine built"
        );

        Ok(RoutingEngine {
            registry,
            dispatcher: Dispatcher::new(self.handlers),
            policy: self.policy,
            context_path,
        })
    }
}

fn normalize_context_path(path: &str) -> Result<String, EngineError> {
    let trimmed = path.strip_suffix('/').unwrap_or(path);
    if !trimmed.is_empty() && !trimmed.starts_with('/') {
        return Err(EngineError::InvalidContextPath {
            path: path.to_string(),
        });
    }
    Ok(trimmed.to_string())
}
