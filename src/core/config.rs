//! Configuration management for the MCP server.
//!
//! This module provides a centralized configuration structure that can be
//! populated from environment variables, command-line overrides, or defaults.

use super::transport::TransportConfig;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use tracing::{info, warn};

/// Default Microsoft Graph endpoint.
pub const DEFAULT_GRAPH_BASE_URL: &str = "https://graph.microsoft.com/v1.0";

/// Main configuration structure for the MCP server.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    /// Server identification and metadata.
    pub server: ServerConfig,

    /// Logging configuration.
    pub logging: LoggingConfig,

    /// Transport configuration.
    pub transport: TransportConfig,

    /// Microsoft Graph access and tool catalog configuration.
    pub graph: GraphConfig,
}

/// Server identification configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerConfig {
    /// The name of the server as reported to clients.
    pub name: String,

    /// The version of the server.
    pub version: String,
}

/// Logging configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoggingConfig {
    /// Log level filter (e.g., "info", "debug", "trace").
    pub level: String,

    /// Whether to include timestamps in log output.
    pub with_timestamps: bool,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
            with_timestamps: true,
        }
    }
}

impl LoggingConfig {
    /// Load logging settings from `.env` and `MCP_LOG_LEVEL`.
    ///
    /// Emits nothing, so it can run before the subscriber is installed.
    pub fn from_env() -> Self {
        dotenvy::dotenv().ok();

        let mut logging = Self::default();
        if let Ok(level) = std::env::var("MCP_LOG_LEVEL") {
            logging.level = level;
        }
        logging
    }
}

/// Microsoft Graph configuration.
#[derive(Clone, Serialize, Deserialize)]
pub struct GraphConfig {
    /// Base URL every endpoint path is appended to.
    pub base_url: String,

    /// Bearer token sent with every request.
    pub access_token: Option<String>,

    /// Endpoint catalog file. The embedded catalog is used when unset.
    pub catalog_path: Option<PathBuf>,

    /// Only register tools that do not modify remote data.
    pub read_only: bool,
}

/// Custom Debug implementation to redact the token from logs.
impl std::fmt::Debug for GraphConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("GraphConfig")
            .field("base_url", &self.base_url)
            .field(
                "access_token",
                &self.access_token.as_ref().map(|_| "[REDACTED]"),
            )
            .field("catalog_path", &self.catalog_path)
            .field("read_only", &self.read_only)
            .finish()
    }
}

impl Default for GraphConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_GRAPH_BASE_URL.to_string(),
            access_token: None,
            catalog_path: None,
            read_only: false,
        }
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            server: ServerConfig {
                name: "graph-mcp-server".to_string(),
                version: env!("CARGO_PKG_VERSION").to_string(),
            },
            logging: LoggingConfig::default(),
            transport: TransportConfig::default(),
            graph: GraphConfig::default(),
        }
    }
}

/// Parse a boolean flag the way shells usually spell it.
fn parse_flag(value: &str) -> Option<bool> {
    match value.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Some(true),
        "0" | "false" | "no" | "off" | "" => Some(false),
        _ => None,
    }
}

impl Config {
    /// Create a new configuration with default values.
    pub fn new() -> Self {
        Self::default()
    }

    /// Load configuration from environment variables.
    ///
    /// Environment variables are expected to be prefixed with `MCP_`.
    /// `READ_ONLY` is accepted as an alias of `MCP_READ_ONLY`.
    /// Logs about the token and flags, so call it after logging is set up.
    pub fn from_env() -> Self {
        let mut config = Self {
            logging: LoggingConfig::from_env(),
            ..Self::default()
        };

        if let Ok(name) = std::env::var("MCP_SERVER_NAME") {
            config.server.name = name;
        }

        // Load transport configuration from environment
        config.transport = TransportConfig::from_env();

        if let Ok(base_url) = std::env::var("MCP_GRAPH_BASE_URL") {
            config.graph.base_url = base_url.trim_end_matches('/').to_string();
        }

        match std::env::var("MCP_GRAPH_ACCESS_TOKEN") {
            Ok(token) if !token.trim().is_empty() => {
                config.graph.access_token = Some(token.trim().to_string());
                info!("Graph access token loaded from environment");
            }
            _ => warn!(
                "MCP_GRAPH_ACCESS_TOKEN not set - tools will fail until a token is provided"
            ),
        }

        if let Ok(path) = std::env::var("MCP_CATALOG_PATH") {
            config.graph.catalog_path = Some(PathBuf::from(path));
        }

        let read_only = std::env::var("MCP_READ_ONLY").or_else(|_| std::env::var("READ_ONLY"));
        if let Ok(value) = read_only {
            match parse_flag(&value) {
                Some(flag) => config.graph.read_only = flag,
                None => warn!("Ignoring invalid read-only flag: {}", value),
            }
        }

        config
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Mutex;

    // Mutex to ensure env var tests run serially
    static ENV_TEST_LOCK: Mutex<()> = Mutex::new(());

    fn clear_graph_env() {
        unsafe {
            for key in [
                "MCP_GRAPH_BASE_URL",
                "MCP_GRAPH_ACCESS_TOKEN",
                "MCP_CATALOG_PATH",
                "MCP_READ_ONLY",
                "READ_ONLY",
            ] {
                std::env::remove_var(key);
            }
        }
    }

    #[test]
    fn test_graph_from_env() {
        let _lock = ENV_TEST_LOCK.lock().unwrap();
        clear_graph_env();
        unsafe {
            std::env::set_var("MCP_GRAPH_ACCESS_TOKEN", "token_12345");
            std::env::set_var("MCP_GRAPH_BASE_URL", "https://graph.example.test/beta/");
            std::env::set_var("MCP_CATALOG_PATH", "/etc/graph/catalog.json");
        }

        let config = Config::from_env();
        assert_eq!(config.graph.access_token.as_deref(), Some("token_12345"));
        assert_eq!(config.graph.base_url, "https://graph.example.test/beta");
        assert_eq!(
            config.graph.catalog_path,
            Some(PathBuf::from("/etc/graph/catalog.json"))
        );
        clear_graph_env();
    }

    #[test]
    fn test_read_only_aliases() {
        let _lock = ENV_TEST_LOCK.lock().unwrap();
        clear_graph_env();
        assert!(!Config::from_env().graph.read_only);

        unsafe {
            std::env::set_var("READ_ONLY", "true");
        }
        assert!(Config::from_env().graph.read_only);

        unsafe {
            std::env::set_var("MCP_READ_ONLY", "0");
        }
        assert!(!Config::from_env().graph.read_only);
        clear_graph_env();
    }

    #[test]
    fn test_logging_from_env() {
        let _lock = ENV_TEST_LOCK.lock().unwrap();
        unsafe {
            std::env::set_var("MCP_LOG_LEVEL", "trace");
        }
        let logging = LoggingConfig::from_env();
        assert_eq!(logging.level, "trace");
        assert!(logging.with_timestamps);
        assert_eq!(Config::from_env().logging.level, "trace");

        unsafe {
            std::env::remove_var("MCP_LOG_LEVEL");
        }
        assert_eq!(LoggingConfig::from_env().level, "info");
    }

    #[test]
    fn test_token_redacted_in_debug() {
        let graph = GraphConfig {
            access_token: Some("super_secret_token".to_string()),
            ..GraphConfig::default()
        };
        let debug_str = format!("{:?}", graph);
        assert!(debug_str.contains("REDACTED"));
        assert!(!debug_str.contains("super_secret_token"));
    }

    #[test]
    fn test_parse_flag() {
        assert_eq!(parse_flag("TRUE"), Some(true));
        assert_eq!(parse_flag(" yes "), Some(true));
        assert_eq!(parse_flag("off"), Some(false));
        assert_eq!(parse_flag("maybe"), None);
    }

    #[test]
    fn test_config_default_graph() {
        let config = Config::default();
        assert_eq!(config.graph.base_url, DEFAULT_GRAPH_BASE_URL);
        assert!(config.graph.access_token.is_none());
        assert!(!config.graph.read_only);
    }
}
