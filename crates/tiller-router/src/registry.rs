/// Action registry and path resolution
///
/// Actions are mounted at a path and expose one or more executes, each with
/// an HTTP-method restriction and a compiled url pattern for its trailing
/// parameter path. The registry is built once at configuration time and is
/// read-only afterwards.
use std::collections::HashMap;

use thiserror::Error;
use tracing::debug;

use crate::path::{trim_trailing_slash, PathSplits};
use crate::pattern::{PatternError, UrlPattern};

/// HTTP-method restriction for an execute.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RequestMethod {
    Any,
    Get,
    Post,
    Put,
    Patch,
    Delete,
}

impl RequestMethod {
    /// Check if an HTTP method string satisfies this restriction.
    pub fn accepts(&self, http_method: &str) -> bool {
        match self {
            RequestMethod::Any => true,
            RequestMethod::Get => http_method.eq_ignore_ascii_case("GET"),
            RequestMethod::Post => http_method.eq_ignore_ascii_case("POST"),
            RequestMethod::Put => http_method.eq_ignore_ascii_case("PUT"),
            RequestMethod::Patch => http_method.eq_ignore_ascii_case("PATCH"),
            RequestMethod::Delete => http_method.eq_ignore_ascii_case("DELETE"),
        }
    }
}

/// Raw execute declaration, compiled into [`ExecuteConfig`] at registration.
#[derive(Debug, Clone)]
pub struct ExecuteDef {
    pub name: String,
    pub method: RequestMethod,
    pub url_pattern: String,
}

impl ExecuteDef {
    pub fn new(
        name: impl Into<String>,
        method: RequestMethod,
        url_pattern: impl Into<String>,
    ) -> Self {
        Self {
            name: name.into(),
            method,
            url_pattern: url_pattern.into(),
        }
    }

    /// The conventional index execute: any method, empty parameter path.
    pub fn index() -> Self {
        Self::new("index", RequestMethod::Any, "")
    }
}

/// A compiled execute: name, method restriction, compiled pattern.
#[derive(Debug, Clone)]
pub struct ExecuteConfig {
    pub name: String,
    pub method: RequestMethod,
    pub pattern: UrlPattern,
}

/// An action mounted at a path, with its executes in declaration order.
#[derive(Debug, Clone)]
pub struct ActionMount {
    pub path: String,
    pub executes: Vec<ExecuteConfig>,
}

/// Errors raised while registering actions. Fatal at startup; never retried.
#[derive(Debug, Error)]
pub enum RegistryError {
    #[error(transparent)]
    Pattern(#[from] PatternError),

    #[error("action mount '{path}' registered twice")]
    DuplicateMount { path: String },

    #[error("invalid action mount path '{path}': must start with '/' and not end with '/'")]
    InvalidMountPath { path: String },
}

/// The action configuration matched for a request, plus the positional
/// values extracted from its trailing parameter path.
///
/// Created and discarded per request; values are as captured from the path
/// (still percent-encoded).
#[derive(Debug, Clone)]
pub struct ResolvedAction {
    pub action_path: String,
    pub execute_name: String,
    pub method: RequestMethod,
    pub param_path: String,
    pub params: Vec<String>,
}

/// Registered action mounts, keyed by mount path.
#[derive(Debug, Clone, Default)]
pub struct ActionRegistry {
    mounts: HashMap<String, ActionMount>,
}

impl ActionRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers an action mount, compiling every execute pattern.
    ///
    /// Pattern violations fail here, at configuration time, with an error
    /// naming the offending pattern and the declaring execute.
    pub fn register(&mut self, path: &str, executes: Vec<ExecuteDef>) -> Result<(), RegistryError> {
        let path = normalize_mount_path(path)?;
        if self.mounts.contains_key(&path) {
            return Err(RegistryError::DuplicateMount { path });
        }

        let executes = executes
            .into_iter()
            .map(|def| {
                let owner = format!("{}#{}", path, def.name);
                let pattern = UrlPattern::compile(&def.url_pattern, &owner)?;
                Ok(ExecuteConfig {
                    name: def.name,
                    method: def.method,
                    pattern,
                })
            })
            .collect::<Result<Vec<_>, PatternError>>()?;

        self.mounts.insert(
            path.clone(),
            ActionMount { path, executes },
        );
        Ok(())
    }

    /// Resolves a request path against the registered mounts.
    ///
    /// The path is trimmed of its trailing slash, then candidate splits are
    /// walked longest action path first. At each split with a registered
    /// mount, executes are tried in declaration order; the first whose method
    /// accepts the request and whose pattern matches the parameter path wins.
    /// An empty pattern matches only an empty parameter path (the index
    /// case).
    ///
    /// A miss is not an error; it is expected and frequent, and traced at
    /// debug level only.
    pub fn resolve(&self, path: &str, http_method: &str) -> Option<ResolvedAction> {
        let lookup = trim_trailing_slash(path);

        for (action_path, param_path) in PathSplits::new(lookup) {
            let Some(mount) = self.mounts.get(action_path) else {
                continue;
            };
            for execute in &mount.executes {
                if !execute.method.accepts(http_method) {
                    continue;
                }
                if let Some(params) = execute.pattern.match_params(param_path) {
                    return Some(ResolvedAction {
                        action_path: mount.path.clone(),
                        execute_name: execute.name.clone(),
                        method: execute.method,
                        param_path: param_path.to_string(),
                        params,
                    });
                }
            }
        }

        debug!(path, http_method, "no action resolved, expected routing miss");
        None
    }

    pub fn get(&self, path: &str) -> Option<&ActionMount> {
        self.mounts.get(path)
    }

    pub fn mounts(&self) -> impl Iterator<Item = &ActionMount> {
        self.mounts.values()
    }

    pub fn len(&self) -> usize {
        self.mounts.len()
    }

    pub fn is_empty(&self) -> bool {
        self.mounts.is_empty()
    }
}

/// Mount paths are absolute and canonical without a trailing slash; the root
/// mount is `/` itself.
fn normalize_mount_path(path: &str) -> Result<String, RegistryError> {
    if path == "/" {
        return Ok(path.to_string());
    }
    if !path.starts_with('/') || path.ends_with('/') {
        return Err(RegistryError::InvalidMountPath {
            path: path.to_string(),
        });
    }
    Ok(path.to_string())
}
