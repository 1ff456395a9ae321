//! Transport seam between the tool adapter and Microsoft Graph.

use std::collections::BTreeMap;

use async_trait::async_trait;
use rmcp::model::JsonObject;

use super::error::GraphError;

/// Options accompanying a request path.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RequestOptions {
    /// Upper-case HTTP method.
    pub method: String,

    /// Extra request headers, sent verbatim.
    pub headers: BTreeMap<String, String>,

    /// Serialized request body.
    pub body: Option<String>,

    /// Drive-root path of a workbook that needs a server-side session.
    pub workbook_path: Option<String>,

    /// Return the response bytes instead of decoding JSON.
    pub raw_response: bool,
}

impl RequestOptions {
    /// Options for a request without body or hints.
    pub fn new(method: impl Into<String>) -> Self {
        Self {
            method: method.into(),
            ..Default::default()
        }
    }

    pub fn with_body(mut self, body: impl Into<String>) -> Self {
        self.body = Some(body.into());
        self
    }

    pub fn with_header(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.headers.insert(name.into(), value.into());
        self
    }

    pub fn with_workbook(mut self, path: impl Into<String>) -> Self {
        self.workbook_path = Some(path.into());
        self
    }
}

/// Response already decomposed into text content items.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct GraphResponse {
    /// Text items, usually a single JSON document.
    pub content: Vec<String>,

    /// Optional metadata passed through to the tool result.
    pub meta: Option<JsonObject>,

    /// Set when the transport itself flags the response as an error.
    pub is_error: bool,
}

impl GraphResponse {
    /// A response with a single text item.
    pub fn text(text: impl Into<String>) -> Self {
        Self {
            content: vec![text.into()],
            meta: None,
            is_error: false,
        }
    }
}

/// Executes Graph requests on behalf of tools.
///
/// Implementations own authentication and any shared state such as workbook
/// sessions. Callers pass a path relative to the Graph base URL, including the
/// query string.
#[async_trait]
pub trait GraphTransport: Send + Sync {
    /// Send a request and return its decoded content.
    async fn send(&self, path: &str, options: RequestOptions) -> Result<GraphResponse, GraphError>;
}
