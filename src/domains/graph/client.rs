//! reqwest-backed Graph client.
//!
//! Sends requests to the Graph REST endpoint with a bearer token, keeps one
//! workbook session per Excel file and turns responses into text items.

use std::collections::HashMap;

use async_trait::async_trait;
use base64::Engine;
use base64::engine::general_purpose::STANDARD;
use reqwest::header::{CONTENT_TYPE, HeaderMap, HeaderName, HeaderValue};
use reqwest::{Client, Method};
use tokio::sync::RwLock;
use tracing::{debug, info, instrument, warn};

use crate::core::config::GraphConfig;

use super::error::GraphError;
use super::transport::{GraphResponse, GraphTransport, RequestOptions};

const WORKBOOK_SESSION_HEADER: &str = "workbook-session-id";

/// Graph client used by the server binary.
pub struct GraphClient {
    http: Client,
    base_url: String,
    access_token: Option<String>,
    /// Workbook session ids keyed by drive-root file path.
    workbook_sessions: RwLock<HashMap<String, String>>,
}

impl GraphClient {
    /// Create a client from the Graph configuration section.
    pub fn new(config: &GraphConfig) -> Result<Self, GraphError> {
        let http = Client::builder()
            .user_agent(concat!("graph_mcp_server/", env!("CARGO_PKG_VERSION")))
            .build()?;

        Ok(Self {
            http,
            base_url: config.base_url.trim_end_matches('/').to_string(),
            access_token: config.access_token.clone(),
            workbook_sessions: RwLock::new(HashMap::new()),
        })
    }

    fn token(&self) -> Result<&str, GraphError> {
        self.access_token
            .as_deref()
            .filter(|t| !t.is_empty())
            .ok_or(GraphError::MissingToken)
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    /// Return the cached workbook session for `file_path`, creating it first if needed.
    #[instrument(skip(self))]
    async fn workbook_session(&self, file_path: &str) -> Result<String, GraphError> {
        let key = workbook_key(file_path);
        let file_path = key.as_str();
        if let Some(id) = self.workbook_sessions.read().await.get(file_path) {
            return Ok(id.clone());
        }

        let url = self.url(&format!("{}:/workbook/createSession", drive_root_path(file_path)));
        let response = self
            .http
            .post(&url)
            .bearer_auth(self.token()?)
            .json(&serde_json::json!({ "persistChanges": true }))
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(GraphError::workbook_session(
                file_path,
                format!("HTTP {} - {}", status.as_u16(), body),
            ));
        }

        let payload: serde_json::Value = response.json().await?;
        let id = payload
            .get("id")
            .and_then(|v| v.as_str())
            .ok_or_else(|| GraphError::workbook_session(file_path, "response has no session id"))?
            .to_string();

        info!("Created workbook session for {}", file_path);

        // Another call may have raced us here; keep whichever session landed first.
        let mut sessions = self.workbook_sessions.write().await;
        Ok(sessions.entry(file_path.to_string()).or_insert(id).clone())
    }

    /// Drop the cached session for `file_path` so the next call opens a new one.
    ///
    /// Returns whether a session was cached.
    async fn forget_workbook_session(&self, file_path: &str) -> bool {
        let key = workbook_key(file_path);
        let removed = self.workbook_sessions.write().await.remove(&key).is_some();
        if removed {
            info!("Discarded workbook session for {}", key);
        }
        removed
    }

    fn build_headers(options: &RequestOptions) -> Result<HeaderMap, GraphError> {
        let mut headers = HeaderMap::new();
        for (name, value) in &options.headers {
            let header_name = HeaderName::from_bytes(name.as_bytes())
                .map_err(|_| GraphError::InvalidHeader(name.clone()))?;
            let header_value =
                HeaderValue::from_str(value).map_err(|_| GraphError::InvalidHeader(name.clone()))?;
            headers.insert(header_name, header_value);
        }
        if options.body.is_some() && !headers.contains_key(CONTENT_TYPE) {
            headers.insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));
        }
        Ok(headers)
    }
}

#[async_trait]
impl GraphTransport for GraphClient {
    #[instrument(skip(self, options), fields(method = %options.method))]
    async fn send(&self, path: &str, options: RequestOptions) -> Result<GraphResponse, GraphError> {
        let token = self.token()?;
        let method = Method::from_bytes(options.method.as_bytes())
            .map_err(|_| GraphError::InvalidMethod(options.method.clone()))?;

        let mut headers = Self::build_headers(&options)?;
        if let Some(file_path) = &options.workbook_path {
            let session = self.workbook_session(file_path).await?;
            let value = HeaderValue::from_str(&session)
                .map_err(|_| GraphError::InvalidHeader(WORKBOOK_SESSION_HEADER.to_string()))?;
            headers.insert(WORKBOOK_SESSION_HEADER, value);
        }

        debug!("Sending {} {}", method, path);
        let mut request = self
            .http
            .request(method, self.url(path))
            .bearer_auth(token)
            .headers(headers);
        if let Some(body) = options.body {
            request = request.body(body);
        }

        let response = request.send().await?;
        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            warn!("Graph request {} failed with HTTP {}", path, status);
            if let Some(file_path) = &options.workbook_path {
                self.forget_workbook_session(file_path).await;
            }
            return Err(GraphError::Status {
                status: status.as_u16(),
                body,
            });
        }

        if options.raw_response {
            let content_type = response
                .headers()
                .get(CONTENT_TYPE)
                .and_then(|v| v.to_str().ok())
                .unwrap_or("application/octet-stream")
                .to_string();
            let bytes = response.bytes().await?;
            debug!("Received {} raw bytes ({})", bytes.len(), content_type);
            return Ok(GraphResponse::text(
                serde_json::json!({
                    "contentType": content_type,
                    "encoding": "base64",
                    "content": STANDARD.encode(&bytes),
                })
                .to_string(),
            ));
        }

        let text = response.text().await?;
        if text.trim().is_empty() {
            return Ok(GraphResponse::text(
                serde_json::json!({ "message": "OK!" }).to_string(),
            ));
        }
        Ok(GraphResponse::text(text))
    }
}

/// Cache key of a workbook session: the percent-decoded file path with a leading `/`.
///
/// `Reports%2FQ1.xlsx` and `/Reports/Q1.xlsx` name the same workbook.
pub fn workbook_key(file_path: &str) -> String {
    let decoded = urlencoding::decode(file_path)
        .map(|s| s.into_owned())
        .unwrap_or_else(|_| file_path.to_string());
    if decoded.starts_with('/') {
        decoded
    } else {
        format!("/{}", decoded)
    }
}

/// Address of a drive item by path, e.g. `/me/drive/root:/Reports/Q1.xlsx`.
///
/// Each path segment is percent-encoded; a missing leading slash is added.
pub fn drive_root_path(file_path: &str) -> String {
    let encoded: Vec<String> = file_path
        .trim_start_matches('/')
        .split('/')
        .map(|segment| urlencoding::encode(segment).into_owned())
        .collect();
    format!("/me/drive/root:/{}", encoded.join("/"))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn config(token: Option<&str>) -> GraphConfig {
        GraphConfig {
            access_token: token.map(str::to_string),
            ..GraphConfig::default()
        }
    }

    #[test]
    fn test_drive_root_path() {
        assert_eq!(drive_root_path("/Book.xlsx"), "/me/drive/root:/Book.xlsx");
        assert_eq!(
            drive_root_path("Reports/Q1 Budget.xlsx"),
            "/me/drive/root:/Reports/Q1%20Budget.xlsx"
        );
    }

    #[test]
    fn test_base_url_trailing_slash_trimmed() {
        let client = GraphClient::new(&GraphConfig {
            base_url: "https://graph.example.com/v1.0/".to_string(),
            ..config(None)
        })
        .unwrap();
        assert_eq!(client.url("/me"), "https://graph.example.com/v1.0/me");
    }

    #[tokio::test]
    async fn test_send_without_token_fails_before_network() {
        let client = GraphClient::new(&config(None)).unwrap();
        let err = client.send("/me", RequestOptions::new("GET")).await.unwrap_err();
        assert!(matches!(err, GraphError::MissingToken));
    }

    #[tokio::test]
    async fn test_send_rejects_invalid_method() {
        let client = GraphClient::new(&config(Some("token"))).unwrap();
        let err = client
            .send("/me", RequestOptions::new("NOT A METHOD"))
            .await
            .unwrap_err();
        assert!(matches!(err, GraphError::InvalidMethod(_)));
    }

    #[test]
    fn test_json_content_type_added_for_body() {
        let options = RequestOptions::new("POST").with_body("{}");
        let headers = GraphClient::build_headers(&options).unwrap();
        assert_eq!(headers[CONTENT_TYPE], "application/json");

        let options = RequestOptions::new("PUT")
            .with_body("raw")
            .with_header("Content-Type", "text/plain");
        let headers = GraphClient::build_headers(&options).unwrap();
        assert_eq!(headers[CONTENT_TYPE], "text/plain");
    }

    #[test]
    fn test_workbook_key() {
        assert_eq!(workbook_key("Reports/Q1.xlsx"), "/Reports/Q1.xlsx");
        assert_eq!(workbook_key("/Reports%2FQ1%20Budget.xlsx"), "/Reports/Q1 Budget.xlsx");
        assert_eq!(workbook_key("/Book.xlsx"), "/Book.xlsx");
    }

    #[tokio::test]
    async fn test_forget_workbook_session() {
        let client = GraphClient::new(&config(Some("token"))).unwrap();
        client
            .workbook_sessions
            .write()
            .await
            .insert("/Reports/Q1.xlsx".to_string(), "session-1".to_string());

        assert!(client.forget_workbook_session("Reports/Q1.xlsx").await);
        assert!(client.workbook_sessions.read().await.is_empty());
        assert!(!client.forget_workbook_session("/Reports/Q1.xlsx").await);
    }

    #[test]
    fn test_invalid_header_name() {
        let options = RequestOptions::new("GET").with_header("bad header", "x");
        assert!(matches!(
            GraphClient::build_headers(&options).unwrap_err(),
            GraphError::InvalidHeader(_)
        ));
    }
}
