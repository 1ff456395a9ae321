//! Create empty file tool.
//!
//! Creates a zero-byte file in OneDrive at the given path. Uploading
//! content afterwards is done with `upload-file-content`.

use std::sync::Arc;

use rmcp::{
    handler::server::tool::cached_schema_for_type,
    model::{CallToolResult, JsonObject, Tool},
};
use schemars::JsonSchema;
use serde::Deserialize;
use tracing::{info, instrument};

use crate::domains::graph::{GraphTransport, RequestOptions, drive_root_path};
use crate::domains::tools::adapter::normalize_response;
use crate::domains::tools::error::ToolError;
use crate::domains::tools::handlers::{ToolHandler, tool_annotations};

use super::common::{parse_params, validate_file_path};

/// Parameters for the create empty file tool.
#[derive(Debug, Clone, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct CreateEmptyFileParams {
    /// Path of the new file relative to the OneDrive root.
    #[schemars(description = "Path of the new file relative to the OneDrive root, e.g. /Reports/New.xlsx")]
    pub file_path: String,
}

/// Create empty file tool.
pub struct CreateEmptyFileTool {
    transport: Arc<dyn GraphTransport>,
}

impl CreateEmptyFileTool {
    /// Tool name as registered in MCP.
    pub const NAME: &'static str = "create-empty-file";

    /// Tool description shown to clients.
    pub const DESCRIPTION: &'static str =
        "Create an empty file in OneDrive at the given path. Existing files are truncated.";

    pub fn new(transport: Arc<dyn GraphTransport>) -> Self {
        Self { transport }
    }

    #[instrument(skip_all, fields(file_path = %params.file_path))]
    pub async fn execute(&self, params: &CreateEmptyFileParams) -> Result<CallToolResult, ToolError> {
        let file_path = validate_file_path(&params.file_path)?;
        info!("Creating empty file {}", file_path);

        let options = RequestOptions::new("PUT")
            .with_header("Content-Type", "application/octet-stream")
            .with_body("");
        let response = self
            .transport
            .send(&format!("{}:/content", drive_root_path(file_path)), options)
            .await?;

        Ok(normalize_response(Self::NAME, response))
    }

    /// Create a Tool model for this tool (metadata).
    pub fn to_tool() -> Tool {
        Tool {
            name: Self::NAME.into(),
            description: Some(Self::DESCRIPTION.into()),
            input_schema: cached_schema_for_type::<CreateEmptyFileParams>(),
            annotations: Some(tool_annotations(Self::NAME, false)),
            output_schema: None,
            icons: None,
            meta: None,
            title: None,
        }
    }
}

#[async_trait::async_trait]
impl ToolHandler for CreateEmptyFileTool {
    fn name(&self) -> &str {
        Self::NAME
    }

    fn read_only(&self) -> bool {
        false
    }

    fn tool(&self) -> Tool {
        Self::to_tool()
    }

    async fn call(&self, arguments: JsonObject) -> Result<CallToolResult, ToolError> {
        let params: CreateEmptyFileParams = parse_params(arguments)?;
        self.execute(&params).await
    }
}
