//! Response normalizer.
//!
//! Maps transport outcomes onto the MCP `CallToolResult` envelope. Payloads
//! are copied verbatim; JSON inspection only feeds log lines.

use std::fmt::Display;

use rmcp::model::{CallToolResult, Content, Meta};
use serde_json::Value;
use tracing::{debug, error, info};

use crate::domains::graph::GraphResponse;

/// Envelope for a successful transport response.
pub fn normalize_response(tool_name: &str, response: GraphResponse) -> CallToolResult {
    if let Some(first) = response.content.first() {
        inspect_payload(tool_name, first);
    }

    let mut content: Vec<Content> = response.content.into_iter().map(Content::text).collect();
    if content.is_empty() {
        content.push(Content::text(
            serde_json::json!({ "message": "No content" }).to_string(),
        ));
    }

    CallToolResult {
        content,
        structured_content: None,
        is_error: Some(response.is_error),
        meta: response.meta.map(Meta),
    }
}

/// Envelope for any failure: one text item holding `{"error": ...}`.
pub fn error_envelope(tool_name: &str, err: impl Display) -> CallToolResult {
    let message = format!("Error in tool {}: {}", tool_name, err);
    error!("{}", message);
    CallToolResult::error(vec![Content::text(
        serde_json::json!({ "error": message }).to_string(),
    )])
}

/// Log list sizes and pagination markers of a JSON payload.
fn inspect_payload(tool_name: &str, text: &str) {
    let parsed: Value = match serde_json::from_str(text) {
        Ok(value) => value,
        Err(_) => {
            debug!("{} returned a non-JSON payload ({} bytes)", tool_name, text.len());
            return;
        }
    };

    if let Some(items) = parsed.get("value").and_then(Value::as_array) {
        info!("{} response contains {} items", tool_name, items.len());
    }
    if parsed.get("@odata.nextLink").is_some() {
        info!("{} response has a pagination nextLink", tool_name);
    }
}
