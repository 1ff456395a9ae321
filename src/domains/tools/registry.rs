//! Tool Registry - central registration and dispatch for all tools.
//!
//! This module provides:
//! - Registration of catalog-derived tools and the fixed tools
//! - Read-only filtering
//! - Dispatch for tool calls (used by the HTTP transport and the router)

use std::collections::HashMap;
use std::sync::Arc;

use rmcp::model::{CallToolResult, JsonObject, Tool};
use tracing::{info, warn};

use crate::domains::catalog::Catalog;
use crate::domains::graph::GraphTransport;

use super::adapter::EndpointTool;
use super::definitions::{CreateEmptyFileTool, ExcelAccessTool, UploadContentTool};
use super::error::ToolError;
use super::handlers::{ToolHandler, invoke_enveloped};

// ============================================================================
// Tool Registry
// ============================================================================

/// Tool registry - owns every tool exposed to the MCP host.
///
/// Tools keep registration order: catalog order first, then the fixed tools.
pub struct ToolRegistry {
    handlers: Vec<Arc<dyn ToolHandler>>,
    index: HashMap<String, usize>,
    read_only: bool,
}

impl ToolRegistry {
    /// Register one tool per catalog descriptor plus the fixed tools.
    ///
    /// In read-only mode, descriptors whose method is not GET and the fixed
    /// write tools are skipped.
    pub fn new(
        catalog: &Catalog,
        transport: Arc<dyn GraphTransport>,
        read_only: bool,
    ) -> Result<Self, ToolError> {
        let mut registry = Self::empty(read_only);

        for descriptor in catalog.endpoints() {
            let tool = EndpointTool::new(descriptor.clone(), transport.clone());
            registry.register(Arc::new(tool))?;
        }

        registry.register(Arc::new(ExcelAccessTool::new(transport.clone())))?;
        registry.register(Arc::new(UploadContentTool::new(transport.clone())))?;
        registry.register(Arc::new(CreateEmptyFileTool::new(transport)))?;

        info!(
            "Registered {} tools ({} mode)",
            registry.len(),
            if read_only { "read-only" } else { "read-write" }
        );
        Ok(registry)
    }

    /// Registry with no tools.
    pub fn empty(read_only: bool) -> Self {
        Self {
            handlers: Vec::new(),
            index: HashMap::new(),
            read_only,
        }
    }

    /// Add a handler. Returns `false` when it was skipped by the read-only filter.
    pub fn register(&mut self, handler: Arc<dyn ToolHandler>) -> Result<bool, ToolError> {
        let name = handler.name().to_string();

        if self.read_only && !handler.read_only() {
            info!("Skipping tool {} in read-only mode", name);
            return Ok(false);
        }
        if self.index.contains_key(&name) {
            return Err(ToolError::DuplicateName(name));
        }

        self.index.insert(name, self.handlers.len());
        self.handlers.push(handler);
        Ok(true)
    }

    /// Whether the registry filters out write tools.
    pub fn is_read_only(&self) -> bool {
        self.read_only
    }

    /// Get all tool names.
    pub fn tool_names(&self) -> Vec<&str> {
        self.handlers.iter().map(|h| h.name()).collect()
    }

    /// Get all tools as Tool models (metadata).
    ///
    /// Both HTTP and STDIO transports list tools from here.
    pub fn tools(&self) -> Vec<Tool> {
        self.handlers.iter().map(|h| h.tool()).collect()
    }

    /// Registered handlers, in registration order.
    pub fn handlers(&self) -> &[Arc<dyn ToolHandler>] {
        &self.handlers
    }

    /// Look up a handler by tool name.
    pub fn get(&self, name: &str) -> Option<&Arc<dyn ToolHandler>> {
        self.index.get(name).map(|&i| &self.handlers[i])
    }

    pub fn len(&self) -> usize {
        self.handlers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.handlers.is_empty()
    }

    /// Dispatch a tool call.
    ///
    /// Only an unknown tool name is an `Err`; failures inside the tool come
    /// back as an `isError` result.
    pub async fn call_tool(
        &self,
        name: &str,
        arguments: JsonObject,
    ) -> Result<CallToolResult, ToolError> {
        match self.get(name) {
            Some(handler) => Ok(invoke_enveloped(handler.as_ref(), arguments).await),
            None => {
                warn!("Unknown tool requested: {}", name);
                Err(ToolError::not_found(name))
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domains::catalog::{EndpointDescriptor, ParameterLocation, ParameterSpec};
    use crate::domains::graph::testing::MockTransport;
    use std::collections::BTreeSet;

    fn test_catalog() -> Catalog {
        Catalog::new(vec![
            EndpointDescriptor::new("list-items", "GET", "/items"),
            EndpointDescriptor::new("get-item", "get", "/items/{id}")
                .with_parameter(ParameterSpec::new("id", ParameterLocation::Path).required()),
            EndpointDescriptor::new("create-item", "POST", "/items"),
            EndpointDescriptor::new("delete-item", "DELETE", "/items/{id}"),
        ])
        .unwrap()
    }

    fn names(registry: &ToolRegistry) -> BTreeSet<String> {
        registry.tool_names().into_iter().map(String::from).collect()
    }

    #[test]
    fn test_registry_tool_names() {
        let registry = ToolRegistry::new(&test_catalog(), MockTransport::new(), false).unwrap();
        assert_eq!(
            registry.tool_names(),
            vec![
                "list-items",
                "get-item",
                "create-item",
                "delete-item",
                "test-excel-file-access",
                "upload-file-content",
                "create-empty-file",
            ]
        );
        assert_eq!(registry.tools().len(), registry.len());
    }

    #[test]
    fn test_read_only_filter() {
        let registry = ToolRegistry::new(&test_catalog(), MockTransport::new(), true).unwrap();
        let expected: BTreeSet<String> = ["list-items", "get-item", "test-excel-file-access"]
            .into_iter()
            .map(String::from)
            .collect();
        assert_eq!(names(&registry), expected);
        assert!(registry.is_read_only());
    }

    #[test]
    fn test_read_only_hint_matches_method() {
        let registry = ToolRegistry::new(&test_catalog(), MockTransport::new(), false).unwrap();
        for tool in registry.tools() {
            let hint = tool.annotations.and_then(|a| a.read_only_hint);
            let expected = matches!(
                tool.name.as_ref(),
                "list-items" | "get-item" | "test-excel-file-access"
            );
            assert_eq!(hint, Some(expected), "{}", tool.name);
        }
    }

    #[test]
    fn test_duplicate_name_rejected() {
        let catalog = Catalog::new(vec![EndpointDescriptor::new(
            "test-excel-file-access",
            "GET",
            "/x",
        )])
        .unwrap();
        let err = ToolRegistry::new(&catalog, MockTransport::new(), false)
            .err()
            .unwrap();
        assert!(matches!(err, ToolError::DuplicateName(name) if name == "test-excel-file-access"));
    }

    #[test]
    fn test_skipped_tool_does_not_collide() {
        let mut registry = ToolRegistry::empty(true);
        let transport = MockTransport::new();
        let write = EndpointDescriptor::new("same", "POST", "/a");
        let read = EndpointDescriptor::new("same", "GET", "/b");

        assert!(!registry.register(Arc::new(EndpointTool::new(write, transport.clone()))).unwrap());
        assert!(registry.register(Arc::new(EndpointTool::new(read, transport))).unwrap());
        assert_eq!(registry.len(), 1);
    }

    #[test]
    fn test_registry_call() {
        let transport = MockTransport::new();
        let registry = ToolRegistry::new(&test_catalog(), transport.clone(), false).unwrap();

        let mut args = JsonObject::new();
        args.insert("id".to_string(), serde_json::json!(7));
        let result = tokio_test::block_on(registry.call_tool("get-item", args)).unwrap();

        assert_eq!(result.is_error, Some(false));
        assert_eq!(transport.last().0, "/items/7");
    }

    #[test]
    fn test_registry_call_failure_is_result() {
        let registry =
            ToolRegistry::new(&test_catalog(), MockTransport::failing(500, "boom"), false).unwrap();
        let result =
            tokio_test::block_on(registry.call_tool("list-items", JsonObject::new())).unwrap();
        assert_eq!(result.is_error, Some(true));
    }

    #[test]
    fn test_registry_call_unknown() {
        let registry = ToolRegistry::new(&test_catalog(), MockTransport::new(), false).unwrap();
        let result = tokio_test::block_on(registry.call_tool("unknown", JsonObject::new()));
        assert!(matches!(result, Err(ToolError::NotFound(_))));
    }
}
