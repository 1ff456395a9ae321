//! Excel file access check.
//!
//! Diagnostic tool that checks whether a workbook is reachable by path and
//! whether a workbook session can be opened on it.

use std::sync::Arc;

use rmcp::{
    handler::server::tool::cached_schema_for_type,
    model::{CallToolResult, Content, JsonObject, Tool},
};
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use tracing::{info, instrument};

use crate::domains::graph::{
    GraphResponse, GraphTransport, RequestOptions, drive_root_path, workbook_key,
};
use crate::domains::tools::error::ToolError;
use crate::domains::tools::handlers::{ToolHandler, tool_annotations};

use super::common::{parse_params, validate_file_path};

// ============================================================================
// Tool Parameters
// ============================================================================

/// Parameters for the Excel access check.
#[derive(Debug, Clone, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct ExcelAccessParams {
    /// Workbook path relative to the OneDrive root.
    #[schemars(description = "Workbook path relative to the OneDrive root, e.g. /Reports/Budget.xlsx")]
    pub file_path: String,
}

// ============================================================================
// Structured Output
// ============================================================================

/// Summary returned by the access check.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ExcelAccessResult {
    pub file_path: String,
    pub item: Value,
    pub worksheets: Value,
}

// ============================================================================
// Tool Definition
// ============================================================================

/// Excel access check tool.
pub struct ExcelAccessTool {
    transport: Arc<dyn GraphTransport>,
}

impl ExcelAccessTool {
    /// Tool name as registered in MCP.
    pub const NAME: &'static str = "test-excel-file-access";

    /// Tool description shown to clients.
    pub const DESCRIPTION: &'static str = "Check that an Excel workbook in OneDrive can be opened: \
         fetches the drive item by path, then lists its worksheets inside a workbook session. \
         Use this to diagnose failing Excel tools.";

    pub fn new(transport: Arc<dyn GraphTransport>) -> Self {
        Self { transport }
    }

    /// Execute the access check.
    #[instrument(skip_all, fields(file_path = %params.file_path))]
    pub async fn execute(&self, params: &ExcelAccessParams) -> Result<CallToolResult, ToolError> {
        let file_path = validate_file_path(&params.file_path)?;
        let item_path = drive_root_path(file_path);
        info!("Probing workbook access for {}", file_path);

        let item = self
            .transport
            .send(&item_path, RequestOptions::new("GET"))
            .await?;

        let worksheets = self
            .transport
            .send(
                &format!("{}:/workbook/worksheets", item_path),
                RequestOptions::new("GET").with_workbook(workbook_key(file_path)),
            )
            .await?;

        let result = ExcelAccessResult {
            file_path: file_path.to_string(),
            item: first_json(&item),
            worksheets: first_json(&worksheets),
        };

        let text = serde_json::to_string(&result)
            .map_err(|e| ToolError::internal(format!("failed to encode access check result: {}", e)))?;
        Ok(CallToolResult::success(vec![Content::text(text)]))
    }

    /// Create a Tool model for this tool (metadata).
    pub fn to_tool() -> Tool {
        Tool {
            name: Self::NAME.into(),
            description: Some(Self::DESCRIPTION.into()),
            input_schema: cached_schema_for_type::<ExcelAccessParams>(),
            annotations: Some(tool_annotations(Self::NAME, true)),
            output_schema: None,
            icons: None,
            meta: None,
            title: None,
        }
    }
}

/// First content item as JSON, or as a string when it is not JSON.
fn first_json(response: &GraphResponse) -> Value {
    response
        .content
        .first()
        .map(|text| serde_json::from_str(text).unwrap_or_else(|_| Value::String(text.clone())))
        .unwrap_or(Value::Null)
}

#[async_trait::async_trait]
impl ToolHandler for ExcelAccessTool {
    fn name(&self) -> &str {
        Self::NAME
    }

    fn read_only(&self) -> bool {
        true
    }

    fn tool(&self) -> Tool {
        Self::to_tool()
    }

    async fn call(&self, arguments: JsonObject) -> Result<CallToolResult, ToolError> {
        let params: ExcelAccessParams = parse_params(arguments)?;
        self.execute(&params).await
    }
}

// ============================================================================
// Tests
// ============================================================================
