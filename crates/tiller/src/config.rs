// File: src/config.rs
// Purpose: Configuration parsing from tiller.toml

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

use tiller_router::RoutingPolicy;

/// Application configuration
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct Config {
    #[serde(default)]
    pub server: ServerConfig,

    #[serde(default)]
    pub routing: RoutingConfig,
}

/// Server configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerConfig {
    #[serde(default = "default_port")]
    pub port: u16,

    #[serde(default = "default_host")]
    pub host: String,
}

/// Routing configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RoutingConfig {
    /// Context path prefix stripped before classification (e.g. "/app")
    #[serde(default)]
    pub context_path: String,

    /// Disable the trailing-slash redirect for resolvable GET paths
    #[serde(default = "default_false")]
    pub suppress_trailing_slash_redirect: bool,

    /// Path prefixes that are routed even when the heuristic says static
    #[serde(default)]
    pub forced_routing_prefixes: Vec<String>,

    /// Directory served for paths the router passes through (default: "static")
    #[serde(default = "default_static_dir")]
    pub static_dir: String,
}

// Default values
fn default_port() -> u16 {
    3000
}

fn default_host() -> String {
    "127.0.0.1".to_string()
}

fn default_static_dir() -> String {
    "static".to_string()
}

fn default_false() -> bool {
    false
}

// Default implementations
impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            port: default_port(),
            host: default_host(),
        }
    }
}

impl Default for RoutingConfig {
    fn default() -> Self {
        Self {
            context_path: String::new(),
            suppress_trailing_slash_redirect: false,
            forced_routing_prefixes: Vec::new(),
            static_dir: default_static_dir(),
        }
    }
}

impl Config {
    /// Load configuration from tiller.toml
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();

        // If file doesn't exist or is empty, return default config
        if !path.exists() {
            return Ok(Self::default());
        }

        let content = fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {:?}", path))?;

        if content.trim().is_empty() {
            return Ok(Self::default());
        }

        let config: Config = toml::from_str(&content)
            .with_context(|| format!("Failed to parse config file: {:?}", path))?;

        Ok(config)
    }

    /// Load configuration from default path (./tiller.toml)
    pub fn load_default() -> Result<Self> {
        Self::load("tiller.toml")
    }
}

/// Routing policy backed by the `[routing]` table.
#[derive(Debug, Clone, Default)]
pub struct ConfigRoutingPolicy {
    suppress_trailing_slash_redirect: bool,
    forced_routing_prefixes: Vec<String>,
}

impl From<&RoutingConfig> for ConfigRoutingPolicy {
    fn from(config: &RoutingConfig) -> Self {
        Self {
            suppress_trailing_slash_redirect: config.suppress_trailing_slash_redirect,
            forced_routing_prefixes: config.forced_routing_prefixes.clone(),
        }
    }
}

impl RoutingPolicy for ConfigRoutingPolicy {
    fn is_forced_routing_target(&self, path: &str) -> bool {
        self.forced_routing_prefixes
            .iter()
            .any(|prefix| path.starts_with(prefix.as_str()))
    }

    fn suppresses_trailing_slash_redirect(&self, _path: &str) -> bool {
        self.suppress_trailing_slash_redirect
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = Config::default();
        assert_eq!(config.server.port, 3000);
        assert_eq!(config.server.host, "127.0.0.1");
        assert_eq!(config.routing.context_path, "");
        assert!(!config.routing.suppress_trailing_slash_redirect);
        assert_eq!(config.routing.static_dir, "static");
    }

    #[test]
    fn test_empty_config() {
        let config = toml::from_str::<Config>("").unwrap_or_default();
        assert_eq!(config.server.port, 3000);
        assert!(config.routing.forced_routing_prefixes.is_empty());
    }

    #[test]
    fn test_custom_routing_table() {
        let toml = r#"
            [routing]
            context_path = "/app"
            suppress_trailing_slash_redirect = true
            forced_routing_prefixes = ["/export/"]
            static_dir = "public"
        "#;
        let config: Config = toml::from_str(toml).unwrap();
        assert_eq!(config.routing.context_path, "/app");
        assert!(config.routing.suppress_trailing_slash_redirect);
        assert_eq!(config.routing.static_dir, "public");

        let policy = ConfigRoutingPolicy::from(&config.routing);
        assert!(policy.is_forced_routing_target("/export/member.csv"));
        assert!(!policy.is_forced_routing_target("/member/export.csv"));
        assert!(policy.suppresses_trailing_slash_redirect("/member/list"));
    }
}
