//! MCP Server implementation and lifecycle management.
//!
//! This module contains the main server handler that implements the MCP
//! protocol on top of the tool registry.
//!
//! ## Tool Architecture
//!
//! Tools come from the endpoint catalog (`catalog/endpoints.json` or the file
//! named by `MCP_CATALOG_PATH`) plus the fixed tools in
//! `domains/tools/definitions/`. The registry is built once at startup and the
//! ToolRouter is derived from it, so STDIO and HTTP expose the same tools.

use rmcp::{ServerHandler, handler::server::tool::ToolRouter, model::*, tool_handler};
use std::sync::Arc;
use tracing::info;

use super::config::Config;
use super::error;
use crate::domains::catalog::Catalog;
use crate::domains::graph::{GraphClient, GraphTransport};
use crate::domains::tools::{ToolRegistry, build_tool_router};

/// Instructions reported to clients on initialize.
pub const INSTRUCTIONS: &str = "Microsoft Graph MCP server. Each tool maps to one Graph \
     endpoint (mail, calendar, OneDrive, Excel workbooks, contacts, To Do). \
     Tool failures are returned as results with an \"error\" field.";

/// The main MCP server handler.
///
/// This struct implements the `ServerHandler` trait from rmcp and routes tool
/// calls to the registry.
#[derive(Clone)]
pub struct McpServer {
    /// Server configuration.
    config: Arc<Config>,

    /// Registered tools.
    registry: Arc<ToolRegistry>,

    /// Tool router for handling tool calls.
    tool_router: ToolRouter<Self>,
}

impl McpServer {
    /// Create a new MCP server talking to Microsoft Graph.
    ///
    /// Fails when the catalog is invalid or the HTTP client cannot be built.
    pub fn new(config: Config) -> error::Result<Self> {
        let catalog = Catalog::load(config.graph.catalog_path.as_deref())?;
        let transport = Arc::new(GraphClient::new(&config.graph)?);
        Self::with_transport(config, &catalog, transport)
    }

    /// Create a server over an explicit catalog and transport.
    pub fn with_transport(
        config: Config,
        catalog: &Catalog,
        transport: Arc<dyn GraphTransport>,
    ) -> error::Result<Self> {
        let registry = ToolRegistry::new(catalog, transport, config.graph.read_only)?;
        info!(
            "Loaded {} catalog endpoints, {} tools registered",
            catalog.len(),
            registry.len()
        );

        Ok(Self {
            tool_router: build_tool_router::<Self>(&registry),
            registry: Arc::new(registry),
            config: Arc::new(config),
        })
    }

    /// Get the server name.
    pub fn name(&self) -> &str {
        &self.config.server.name
    }

    /// Get the server version.
    pub fn version(&self) -> &str {
        &self.config.server.version
    }

    /// Get the server configuration.
    pub fn config(&self) -> &Arc<Config> {
        &self.config
    }

    /// Get the tool registry.
    pub fn registry(&self) -> &Arc<ToolRegistry> {
        &self.registry
    }

    // ========================================================================
    // HTTP Transport Support Methods
    // ========================================================================

    /// List all available tools (for HTTP transport).
    pub fn list_tools(&self) -> Vec<serde_json::Value> {
        self.registry
            .tools()
            .into_iter()
            .map(|t| {
                serde_json::json!({
                    "name": t.name,
                    "description": t.description,
                    "inputSchema": t.input_schema,
                    "annotations": t.annotations
                })
            })
            .collect()
    }

    /// Call a tool by name (for HTTP transport).
    ///
    /// Returns `Err` only for protocol-level problems (unknown tool,
    /// non-object arguments). Tool failures are `isError` results.
    #[cfg(feature = "http")]
    pub async fn call_tool(
        &self,
        name: &str,
        arguments: serde_json::Value,
    ) -> Result<serde_json::Value, String> {
        let arguments = match arguments {
            serde_json::Value::Object(map) => map,
            serde_json::Value::Null => JsonObject::new(),
            _ => return Err("Tool arguments must be an object".to_string()),
        };

        let result = self
            .registry
            .call_tool(name, arguments)
            .await
            .map_err(|e| e.to_string())?;
        serde_json::to_value(result).map_err(|e| e.to_string())
    }
}

/// ServerHandler implementation with tool_handler macro for automatic tool routing.
#[tool_handler]
impl ServerHandler for McpServer {
    fn get_info(&self) -> ServerInfo {
        ServerInfo {
            instructions: Some(INSTRUCTIONS.to_string()),
            capabilities: ServerCapabilities::builder().enable_tools().build(),
            server_info: Implementation {
                name: self.config.server.name.clone(),
                version: self.config.server.version.clone(),
                ..Implementation::from_build_env()
            },
            ..Default::default()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domains::catalog::EndpointDescriptor;
    use crate::domains::graph::testing::MockTransport;

    fn test_catalog() -> Catalog {
        Catalog::new(vec![
            EndpointDescriptor::new("list-items", "GET", "/items"),
            EndpointDescriptor::new("create-item", "POST", "/items"),
        ])
        .unwrap()
    }

    #[test]
    fn test_server_lists_registry_tools() {
        let server =
            McpServer::with_transport(Config::default(), &test_catalog(), MockTransport::new())
                .unwrap();
        let tools = server.list_tools();
        assert_eq!(tools.len(), server.registry().len());
        assert_eq!(tools[0]["name"], "list-items");
        assert_eq!(server.tool_router.list_all().len(), server.registry().len());
    }

    #[test]
    fn test_server_read_only_config() {
        let mut config = Config::default();
        config.graph.read_only = true;
        let server =
            McpServer::with_transport(config, &test_catalog(), MockTransport::new()).unwrap();
        assert!(!server.registry().tool_names().contains(&"create-item"));
    }

    #[test]
    fn test_server_with_embedded_catalog() {
        let server = McpServer::new(Config::default()).unwrap();
        assert!(server.registry().len() > 3);
        assert_eq!(server.name(), "graph-mcp-server");
    }

    #[test]
    fn test_get_info_advertises_tools() {
        let server =
            McpServer::with_transport(Config::default(), &test_catalog(), MockTransport::new())
                .unwrap();
        let info = server.get_info();
        assert!(info.capabilities.tools.is_some());
        assert!(info.capabilities.resources.is_none());
        assert_eq!(info.server_info.name, "graph-mcp-server");
    }

    #[cfg(feature = "http")]
    #[test]
    fn test_call_tool_unknown() {
        let server =
            McpServer::with_transport(Config::default(), &test_catalog(), MockTransport::new())
                .unwrap();
        let result = tokio_test::block_on(server.call_tool("missing", serde_json::json!({})));
        assert!(result.is_err());
    }

    #[cfg(feature = "http")]
    #[test]
    fn test_call_tool_serializes_result() {
        let server =
            McpServer::with_transport(Config::default(), &test_catalog(), MockTransport::new())
                .unwrap();
        let result =
            tokio_test::block_on(server.call_tool("list-items", serde_json::Value::Null)).unwrap();
        assert_eq!(result["isError"], false);
        assert_eq!(result["content"][0]["text"], r#"{"value":[]}"#);
    }
}
