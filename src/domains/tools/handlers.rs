//! Tool handler seam.
//!
//! Every registered tool, catalog-derived or hand-authored, implements
//! `ToolHandler`. The registry never calls `ToolHandler::call` directly; it
//! goes through `enveloped`, which turns every failure into an error result.

use std::future::Future;
use std::panic::AssertUnwindSafe;

use futures::FutureExt;
use rmcp::model::{CallToolResult, JsonObject, Tool, ToolAnnotations};

use super::adapter::error_envelope;
use super::error::ToolError;

/// A callable MCP tool.
#[async_trait::async_trait]
pub trait ToolHandler: Send + Sync {
    /// Registered tool name.
    fn name(&self) -> &str;

    /// Whether the tool only reads remote data.
    fn read_only(&self) -> bool;

    /// Tool metadata (description, input schema, annotations).
    fn tool(&self) -> Tool;

    /// Execute the tool. Errors are converted by the caller.
    async fn call(&self, arguments: JsonObject) -> Result<CallToolResult, ToolError>;
}

/// Run a fallible tool operation, converting errors and panics into an error result.
pub async fn enveloped<F>(tool_name: &str, operation: F) -> CallToolResult
where
    F: Future<Output = Result<CallToolResult, ToolError>>,
{
    match AssertUnwindSafe(operation).catch_unwind().await {
        Ok(Ok(result)) => result,
        Ok(Err(err)) => error_envelope(tool_name, err),
        Err(_) => error_envelope(tool_name, "tool handler panicked"),
    }
}

/// Invoke a handler through the envelope.
pub async fn invoke_enveloped(handler: &dyn ToolHandler, arguments: JsonObject) -> CallToolResult {
    enveloped(handler.name(), handler.call(arguments)).await
}

/// Annotations advertising the tool title and read-only hint.
pub fn tool_annotations(name: &str, read_only: bool) -> ToolAnnotations {
    ToolAnnotations {
        title: Some(name.to_string()),
        read_only_hint: Some(read_only),
        destructive_hint: None,
        idempotent_hint: None,
        open_world_hint: None,
    }
}
