//! In-memory transport for tests.

use std::collections::VecDeque;
use std::sync::{Arc, Mutex};

use async_trait::async_trait;

use super::error::GraphError;
use super::transport::{GraphResponse, GraphTransport, RequestOptions};

/// Transport that records every request and replies from a script.
///
/// Queued responses are returned in order; once the queue is empty every
/// request gets `{"value":[]}`, or a status error when built with `failing`.
#[derive(Default)]
pub struct MockTransport {
    requests: Mutex<Vec<(String, RequestOptions)>>,
    responses: Mutex<VecDeque<GraphResponse>>,
    failure: Option<(u16, String)>,
}

impl MockTransport {
    pub fn new() -> Arc<Self> {
        Arc::new(Self::default())
    }

    pub fn failing(status: u16, body: &str) -> Arc<Self> {
        Arc::new(Self {
            failure: Some((status, body.to_string())),
            ..Default::default()
        })
    }

    pub fn push_response(&self, text: &str) {
        self.responses
            .lock()
            .unwrap()
            .push_back(GraphResponse::text(text));
    }

    pub fn requests(&self) -> Vec<(String, RequestOptions)> {
        self.requests.lock().unwrap().clone()
    }

    pub fn last(&self) -> (String, RequestOptions) {
        self.requests().last().cloned().expect("no request sent")
    }
}

#[async_trait]
impl GraphTransport for MockTransport {
    async fn send(&self, path: &str, options: RequestOptions) -> Result<GraphResponse, GraphError> {
        self.requests
            .lock()
            .unwrap()
            .push((path.to_string(), options));

        if let Some((status, body)) = &self.failure {
            return Err(GraphError::Status {
                status: *status,
                body: body.clone(),
            });
        }

        Ok(self
            .responses
            .lock()
            .unwrap()
            .pop_front()
            .unwrap_or_else(|| GraphResponse::text(r#"{"value":[]}"#)))
    }
}
