// File: src/dispatch.rs
// Purpose: Execute matched actions through the configuration-time handler registry

use std::collections::HashMap;
use std::future::Future;
use std::pin::Pin;
use std::sync::Arc;

use axum::response::Response;
use thiserror::Error;
use tiller_router::ResolvedAction;

use crate::request_context::RequestContext;

/// Future returned by an action handler.
pub type HandlerFuture = Pin<Box<dyn Future<Output = Result<Response, anyhow::Error>> + Send>>;

/// An action handler: a named function registered at configuration time and
/// invoked with the explicit request context. No reflection, no per-request
/// lookup beyond one hash access.
pub type HandlerFn = Arc<dyn Fn(RequestContext) -> HandlerFuture + Send + Sync>;

/// Wrap an async fn into a [`HandlerFn`].
pub fn boxed_handler<F, Fut>(f: F) -> HandlerFn
where
    F: Fn(RequestContext) -> Fut + Send + Sync + 'static,
    Fut: Future<Output = Result<Response, anyhow::Error>> + Send + 'static,
{
    Arc::new(move |ctx| Box::pin(f(ctx)))
}

/// Registry key for an execute's handler.
pub(crate) fn handler_key(action_path: &str, execute_name: &str) -> String {
    format!("{}#{}", action_path, execute_name)
}

/// Per-request dispatch failures, narrowed to the categories the surrounding
/// server contract allows. Nothing is swallowed: every variant propagates to
/// the boundary where it is logged and converted.
#[derive(Debug, Error)]
pub enum DispatchError {
    #[error("i/o failure while executing {owner}")]
    Io {
        owner: String,
        #[source]
        source: std::io::Error,
    },

    /// Anything that is not an I/O failure: the illegal-state wrap.
    #[error("action {owner} failed")]
    Action {
        owner: String,
        #[source]
        source: anyhow::Error,
    },

    /// An execute without a handler; the engine builder rejects this at
    /// startup, so seeing it means the dispatcher was built by other means.
    #[error("no handler registered for {owner}")]
    HandlerNotRegistered { owner: String },
}

impl DispatchError {
    /// Narrow an arbitrary handler failure to the allowed categories.
    fn narrow(owner: String, err: anyhow::Error) -> Self {
        match err.downcast::<std::io::Error>() {
            Ok(io) => DispatchError::Io { owner, source: io },
            Err(other) => DispatchError::Action {
                owner,
                source: other,
            },
        }
    }
}

/// Read-only handler registry, built once by the engine builder.
#[derive(Clone)]
pub struct Dispatcher {
    handlers: HashMap<String, HandlerFn>,
}

impl Dispatcher {
    pub(crate) fn new(handlers: HashMap<String, HandlerFn>) -> Self {
        Self { handlers }
    }

    pub fn contains(&self, action_path: &str, execute_name: &str) -> bool {
        self.handlers
            .contains_key(&handler_key(action_path, execute_name))
    }

    pub fn len(&self) -> usize {
        self.handlers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.handlers.is_empty()
    }

    /// Run the handler for a resolved action.
    pub async fn dispatch(
        &self,
        resolved: &ResolvedAction,
        ctx: RequestContext,
    ) -> Result<Response, DispatchError> {
        let key = handler_key(&resolved.action_path, &resolved.execute_name);
        let handler = self
            .handlers
            .get(&key)
            .ok_or_else(|| DispatchError::HandlerNotRegistered { owner: key.clone() })?;

        handler(ctx)
            .await
            .map_err(|err| DispatchError::narrow(key, err))
    }
}

impl std::fmt::Debug for Dispatcher {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Dispatcher")
            .field("handlers", &self.handlers.len())
            .finish()
    }
}
