//! Endpoint descriptor types.
//!
//! A descriptor is the static metadata for one remote operation: HTTP method,
//! path template with `{param}` placeholders, and the ordered list of
//! parameters with the transport location each one binds to.

use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Where a parameter travels in the outgoing HTTP request.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ParameterLocation {
    /// Substituted into the path template.
    Path,
    /// Appended to the query string.
    Query,
    /// Sent as a request header.
    Header,
    /// Sent as the request body.
    Body,
}

/// Declared parameter of an endpoint.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ParameterSpec {
    /// Argument name, matched case-sensitively against caller arguments.
    pub name: String,

    /// Transport location.
    #[serde(rename = "type", alias = "location")]
    pub location: ParameterLocation,

    /// Value-shape constraint as a JSON Schema fragment.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub schema: Option<Value>,

    /// Human readable description shown in the tool schema.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,

    /// Whether callers must supply this argument.
    #[serde(default)]
    pub required: bool,

    /// Value used when the caller omits the argument.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub default: Option<Value>,
}

impl ParameterSpec {
    /// Create a parameter spec with no schema, description or default.
    pub fn new(name: impl Into<String>, location: ParameterLocation) -> Self {
        Self {
            name: name.into(),
            location,
            schema: None,
            description: None,
            required: false,
            default: None,
        }
    }

    /// Attach a JSON Schema fragment.
    pub fn with_schema(mut self, schema: Value) -> Self {
        self.schema = Some(schema);
        self
    }

    /// Mark the parameter as required.
    pub fn required(mut self) -> Self {
        self.required = true;
        self
    }

    /// Attach a default value.
    pub fn with_default(mut self, default: Value) -> Self {
        self.default = Some(default);
        self
    }
}

/// Static description of one Graph endpoint.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EndpointDescriptor {
    /// Unique tool name (e.g. `list-mail-messages`).
    #[serde(alias = "alias")]
    pub name: String,

    /// HTTP method as written in the catalog (case-insensitive).
    pub method: String,

    /// Path template relative to the Graph base URL.
    pub path: String,

    /// Description shown to MCP clients.
    #[serde(default)]
    pub description: String,

    /// Ordered parameter declarations.
    #[serde(default)]
    pub parameters: Vec<ParameterSpec>,

    /// Descriptions of documented responses, used for transport hints.
    #[serde(default)]
    pub error_hints: Vec<String>,
}

impl EndpointDescriptor {
    /// Create a descriptor with no parameters.
    pub fn new(name: impl Into<String>, method: impl Into<String>, path: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            method: method.into(),
            path: path.into(),
            description: String::new(),
            parameters: Vec::new(),
            error_hints: Vec::new(),
        }
    }

    /// Add a parameter declaration.
    pub fn with_parameter(mut self, parameter: ParameterSpec) -> Self {
        self.parameters.push(parameter);
        self
    }

    /// Add a documented response description.
    pub fn with_error_hint(mut self, hint: impl Into<String>) -> Self {
        self.error_hints.push(hint.into());
        self
    }

    /// Set the description.
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = description.into();
        self
    }

    /// Look up a parameter by exact name.
    pub fn parameter(&self, name: &str) -> Option<&ParameterSpec> {
        self.parameters.iter().find(|p| p.name == name)
    }

    /// Upper-cased HTTP method.
    pub fn http_method(&self) -> String {
        self.method.to_uppercase()
    }

    /// Whether this endpoint only reads data (GET).
    pub fn is_read_only(&self) -> bool {
        self.method.eq_ignore_ascii_case("GET")
    }
}
