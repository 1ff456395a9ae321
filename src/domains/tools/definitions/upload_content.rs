//! Upload file content tool.
//!
//! Writes text content to a OneDrive file addressed by path, creating or
//! replacing it.

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

/// Parameters for the upload tool.
#[derive(Debug, Clone, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct UploadContentParams {
    /// Target path relative to the OneDrive root.
    #[schemars(description = "Target path relative to the OneDrive root, e.g. /Notes/today.md")]
    pub file_path: String,

    /// File content.
    #[schemars(description = "Text content to write")]
    pub content: String,

    /// MIME type sent with the content.
    #[serde(default = "default_content_type")]
    #[schemars(description = "MIME type of the content (default: text/plain)")]
    pub content_type: String,
}

fn default_content_type() -> String {
    "text/plain".to_string()
}

/// Upload file content tool.
pub struct UploadContentTool {
    transport: Arc<dyn GraphTransport>,
}

impl UploadContentTool {
    /// Tool name as registered in MCP.
    pub const NAME: &'static str = "upload-file-content";

    /// Tool description shown to clients.
    pub const DESCRIPTION: &'static str = "Upload text content to a file in OneDrive by path. \
         Creates the file if it does not exist and replaces its content otherwise.";

    pub fn new(transport: Arc<dyn GraphTransport>) -> Self {
        Self { transport }
    }

    #[instrument(skip_all, fields(file_path = %params.file_path))]
    pub async fn execute(&self, params: &UploadContentParams) -> Result<CallToolResult, ToolError> {
        let file_path = validate_file_path(&params.file_path)?;
        info!("Uploading {} bytes to {}", params.content.len(), file_path);

        let options = RequestOptions::new("PUT")
            .with_header("Content-Type", params.content_type.as_str())
            .with_body(params.content.as_str());
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
            input_schema: cached_schema_for_type::<UploadContentParams>(),
            annotations: Some(tool_annotations(Self::NAME, false)),
            output_schema: None,
            icons: None,
            meta: None,
            title: None,
        }
    }
}

#[async_trait::async_trait]
impl ToolHandler for UploadContentTool {
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
        let params: UploadContentParams = parse_params(arguments)?;
        self.execute(&params).await
    }
}
