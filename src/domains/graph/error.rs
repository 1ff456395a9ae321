//! Graph-specific error types.

use thiserror::Error;

/// Errors returned by a `GraphTransport`.
///
/// The message of every variant is what ends up in the tool error envelope,
/// so variants keep the remote status and body verbatim.
#[derive(Debug, Error)]
pub enum GraphError {
    /// No access token is configured.
    #[error("No access token configured (set MCP_GRAPH_ACCESS_TOKEN)")]
    MissingToken,

    /// The HTTP method in the request is not valid.
    #[error("Invalid HTTP method: {0}")]
    InvalidMethod(String),

    /// A header name or value could not be sent.
    #[error("Invalid header '{0}'")]
    InvalidHeader(String),

    /// The request never produced a response.
    #[error("Request failed: {0}")]
    Request(#[from] reqwest::Error),

    /// Microsoft Graph answered with a non-success status.
    #[error("Microsoft Graph API error: {status} - {body}")]
    Status { status: u16, body: String },

    /// A workbook session could not be created.
    #[error("Failed to create workbook session for {path}: {reason}")]
    WorkbookSession { path: String, reason: String },
}

impl GraphError {
    /// Create a workbook session error.
    pub fn workbook_session(path: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::WorkbookSession {
            path: path.into(),
            reason: reason.into(),
        }
    }
}
