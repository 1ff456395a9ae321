//! Catalog-derived tools.
//!
//! An `EndpointTool` turns one `EndpointDescriptor` into an MCP tool whose
//! handler chains binder, synthesizer, Graph transport and normalizer.

use std::sync::Arc;

use rmcp::model::{CallToolResult, JsonObject, Tool};
use serde_json::{Value, json};
use tracing::{debug, instrument};

use crate::domains::catalog::{EndpointDescriptor, ParameterLocation, ParameterSpec};
use crate::domains::graph::GraphTransport;
use crate::domains::tools::error::ToolError;
use crate::domains::tools::handlers::{ToolHandler, tool_annotations};

use super::binder::bind;
use super::normalizer::normalize_response;
use super::synthesizer::synthesize;

/// Tool generated from a catalog descriptor.
pub struct EndpointTool {
    descriptor: EndpointDescriptor,
    transport: Arc<dyn GraphTransport>,
}

impl EndpointTool {
    pub fn new(descriptor: EndpointDescriptor, transport: Arc<dyn GraphTransport>) -> Self {
        Self {
            descriptor,
            transport,
        }
    }

    pub fn descriptor(&self) -> &EndpointDescriptor {
        &self.descriptor
    }

    /// Fail when a required parameter without default is absent or null.
    fn check_required(&self, arguments: &JsonObject) -> Result<(), ToolError> {
        let missing: Vec<&str> = self
            .descriptor
            .parameters
            .iter()
            .filter(|p| p.required && p.default.is_none())
            .filter(|p| arguments.get(&p.name).is_none_or(Value::is_null))
            .map(|p| p.name.as_str())
            .collect();

        if missing.is_empty() {
            Ok(())
        } else {
            Err(ToolError::invalid_arguments(format!(
                "missing required parameter(s): {}",
                missing.join(", ")
            )))
        }
    }
}

/// Schema presented to callers for one parameter.
///
/// Body parameters with a schema accept either the structured shape or its
/// JSON text. Parameters without a schema are unconstrained.
fn parameter_schema(spec: &ParameterSpec) -> Value {
    let mut schema = match (spec.location, &spec.schema) {
        (ParameterLocation::Body, Some(shape)) => json!({ "anyOf": [{ "type": "string" }, shape] }),
        (_, Some(shape)) => shape.clone(),
        (_, None) => json!({}),
    };

    if let Value::Object(map) = &mut schema {
        if let Some(description) = &spec.description {
            map.entry("description")
                .or_insert_with(|| Value::String(description.clone()));
        }
        if let Some(default) = &spec.default {
            map.insert("default".to_string(), default.clone());
        }
    }
    schema
}

/// JSON Schema object describing a descriptor's arguments.
pub fn input_schema(descriptor: &EndpointDescriptor) -> JsonObject {
    let mut properties = JsonObject::new();
    let mut required = Vec::new();

    for spec in &descriptor.parameters {
        properties.insert(spec.name.clone(), parameter_schema(spec));
        if spec.required && spec.default.is_none() {
            required.push(Value::String(spec.name.clone()));
        }
    }

    let mut schema = JsonObject::new();
    schema.insert("type".to_string(), json!("object"));
    schema.insert("properties".to_string(), Value::Object(properties));
    if !required.is_empty() {
        schema.insert("required".to_string(), Value::Array(required));
    }
    schema
}

#[async_trait::async_trait]
impl ToolHandler for EndpointTool {
    fn name(&self) -> &str {
        &self.descriptor.name
    }

    fn read_only(&self) -> bool {
        self.descriptor.is_read_only()
    }

    fn tool(&self) -> Tool {
        Tool {
            name: self.descriptor.name.clone().into(),
            description: Some(self.descriptor.description.clone().into()),
            input_schema: Arc::new(input_schema(&self.descriptor)),
            annotations: Some(tool_annotations(&self.descriptor.name, self.read_only())),
            output_schema: None,
            icons: None,
            meta: None,
            title: None,
        }
    }

    #[instrument(skip_all, fields(tool = %self.descriptor.name))]
    async fn call(&self, arguments: JsonObject) -> Result<CallToolResult, ToolError> {
        debug!(
            "Called with arguments: {:?}",
            arguments.keys().collect::<Vec<_>>()
        );
        self.check_required(&arguments)?;

        let request = synthesize(&self.descriptor, bind(&self.descriptor, &arguments));
        let target = request.target();
        debug!("{} {}", request.method, target);

        let response = self.transport.send(&target, request.options()).await?;
        Ok(normalize_response(&self.descriptor.name, response))
    }
}
