//! Request synthesizer.
//!
//! Assembles a `BoundRequest` into the concrete request handed to the Graph
//! transport, then applies endpoint fixups.

use std::collections::BTreeMap;

use crate::domains::catalog::EndpointDescriptor;
use crate::domains::graph::RequestOptions;

use super::binder::BoundRequest;
use super::fixups::apply_fixups;

/// Auxiliary transport flags set by fixups.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TransportHints {
    /// Return the raw response bytes instead of decoding JSON.
    pub raw_response: bool,
    /// Drive-root path of the workbook needing a server-side session.
    pub workbook_path: Option<String>,
}

/// Fully resolved request for one tool invocation.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SynthesizedRequest {
    pub method: String,
    /// Resolved path without the appended query string.
    pub path: String,
    /// Encoded query string, without the leading separator.
    pub query: Option<String>,
    pub headers: BTreeMap<String, String>,
    pub body: Option<String>,
    pub hints: TransportHints,
}

impl SynthesizedRequest {
    /// Path and query string as sent to the transport.
    pub fn target(&self) -> String {
        match &self.query {
            Some(query) => {
                let separator = if self.path.contains('?') { '&' } else { '?' };
                format!("{}{}{}", self.path, separator, query)
            }
            None => self.path.clone(),
        }
    }

    /// Transport options carrying method, headers, body and hints.
    pub fn options(&self) -> RequestOptions {
        RequestOptions {
            method: self.method.clone(),
            headers: self.headers.clone(),
            body: self.body.clone(),
            workbook_path: self.hints.workbook_path.clone(),
            raw_response: self.hints.raw_response,
        }
    }
}

/// Percent-encode a query key, keeping a leading `$` sigil literal.
fn encode_query_key(key: &str) -> String {
    match key.strip_prefix('$') {
        Some(rest) => format!("${}", urlencoding::encode(rest)),
        None => urlencoding::encode(key).into_owned(),
    }
}

/// Join query pairs as `key=value` with `&`, escaping both sides.
pub fn encode_query(pairs: &[(String, String)]) -> Option<String> {
    if pairs.is_empty() {
        return None;
    }
    Some(
        pairs
            .iter()
            .map(|(key, value)| format!("{}={}", encode_query_key(key), urlencoding::encode(value)))
            .collect::<Vec<_>>()
            .join("&"),
    )
}

/// Build the request for `descriptor` from bound arguments.
pub fn synthesize(descriptor: &EndpointDescriptor, bound: BoundRequest) -> SynthesizedRequest {
    let method = descriptor.http_method();
    let body = if method == "GET" {
        None
    } else {
        bound.body.and_then(|body| body.into_payload())
    };

    let mut request = SynthesizedRequest {
        query: encode_query(&bound.query),
        method,
        path: bound.path,
        headers: bound.headers,
        body,
        hints: TransportHints::default(),
    };

    apply_fixups(descriptor, &mut request);
    request
}
