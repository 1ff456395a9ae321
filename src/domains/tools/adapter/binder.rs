//! Parameter binder.
//!
//! Routes each caller argument to the request location declared by the
//! endpoint's `ParameterSpec`. Binding never fails: unknown arguments are
//! dropped and unparsable bodies degrade to their raw text.

use std::collections::BTreeMap;

use rmcp::model::JsonObject;
use serde_json::Value;
use tracing::debug;

use crate::domains::catalog::{EndpointDescriptor, ParameterLocation};

/// Argument name treated as the body when no spec declares it.
const LEGACY_BODY_ARGUMENT: &str = "body";

/// OData system query options that Graph expects with a `$` prefix.
const RESERVED_QUERY_OPTIONS: [&str; 9] = [
    "filter", "select", "expand", "orderby", "skip", "top", "count", "search", "format",
];

/// Request body as supplied by the caller.
#[derive(Debug, Clone, PartialEq)]
pub enum BodyArgument {
    /// Text that did not parse as JSON, sent unchanged.
    Raw(String),
    /// JSON value, either supplied directly or parsed from text.
    Structured(Value),
}

impl BodyArgument {
    /// Best-effort conversion of a caller value into a body.
    ///
    /// Strings are parsed as JSON when possible, otherwise kept raw.
    pub fn from_value(value: Value) -> Self {
        match value {
            Value::String(text) => match serde_json::from_str::<Value>(&text) {
                Ok(parsed) => Self::Structured(parsed),
                Err(_) => Self::Raw(text),
            },
            other => Self::Structured(other),
        }
    }

    /// Wire form of the body, or `None` for a JSON null.
    pub fn into_payload(self) -> Option<String> {
        match self {
            Self::Raw(text) => Some(text),
            Self::Structured(Value::Null) => None,
            Self::Structured(value) => Some(value.to_string()),
        }
    }
}

/// Arguments routed to their request locations.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct BoundRequest {
    /// Path template with supplied placeholders substituted.
    pub path: String,
    /// Query pairs in argument order, keys already aliased.
    pub query: Vec<(String, String)>,
    /// Header values, keys already aliased.
    pub headers: BTreeMap<String, String>,
    pub body: Option<BodyArgument>,
}

/// Rename reserved OData options to their `$`-prefixed form.
///
/// Matching is case-insensitive and the original spelling is kept after the
/// sigil. Names that already carry a `$` are left alone.
pub fn alias_parameter_name(name: &str) -> String {
    if RESERVED_QUERY_OPTIONS
        .iter()
        .any(|reserved| reserved.eq_ignore_ascii_case(name))
    {
        format!("${}", name)
    } else {
        name.to_string()
    }
}

/// String form of an argument for path, query and header locations.
pub fn stringify_value(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        Value::Null => String::new(),
        Value::Array(items) => items
            .iter()
            .map(stringify_value)
            .collect::<Vec<_>>()
            .join(","),
        Value::Number(_) | Value::Bool(_) | Value::Object(_) => value.to_string(),
    }
}

/// Bind `arguments` against the descriptor's parameter list.
///
/// Declared defaults fill in parameters the caller omitted.
pub fn bind(descriptor: &EndpointDescriptor, arguments: &JsonObject) -> BoundRequest {
    let mut bound = BoundRequest {
        path: descriptor.path.clone(),
        ..Default::default()
    };

    for (name, value) in arguments {
        match descriptor.parameter(name) {
            Some(spec) => route(&mut bound, name, spec.location, value.clone()),
            None if name == LEGACY_BODY_ARGUMENT => {
                bound.body = Some(BodyArgument::from_value(value.clone()));
            }
            None => debug!("Dropping undeclared argument '{}' for {}", name, descriptor.name),
        }
    }

    for spec in &descriptor.parameters {
        if arguments.contains_key(&spec.name) {
            continue;
        }
        if let Some(default) = &spec.default {
            route(&mut bound, &spec.name, spec.location, default.clone());
        }
    }

    bound
}

fn route(bound: &mut BoundRequest, name: &str, location: ParameterLocation, value: Value) {
    match location {
        ParameterLocation::Path => {
            let escaped = urlencoding::encode(&stringify_value(&value)).into_owned();
            let braced = bound.path.replace(&format!("{{{}}}", name), &escaped);
            bound.path = replace_colon_placeholder(&braced, name, &escaped);
        }
        ParameterLocation::Query => {
            bound
                .query
                .push((alias_parameter_name(name), stringify_value(&value)));
        }
        ParameterLocation::Header => {
            bound
                .headers
                .insert(alias_parameter_name(name), stringify_value(&value));
        }
        ParameterLocation::Body => {
            bound.body = Some(BodyArgument::from_value(value));
        }
    }
}

/// Replace every `:name` segment whose identifier ends right after `name`.
///
/// `:id` must not touch `:idx`.
fn replace_colon_placeholder(path: &str, name: &str, value: &str) -> String {
    let placeholder = format!(":{}", name);
    let mut out = String::with_capacity(path.len());
    let mut rest = path;

    while let Some(pos) = rest.find(&placeholder) {
        let after = &rest[pos + placeholder.len()..];
        let ends_identifier = after
            .chars()
            .next()
            .is_none_or(|c| !(c.is_ascii_alphanumeric() || c == '_'));

        out.push_str(&rest[..pos]);
        out.push_str(if ends_identifier { value } else { &placeholder });
        rest = after;
    }
    out.push_str(rest);
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domains::catalog::ParameterSpec;
    use serde_json::json;

    fn args(value: Value) -> JsonObject {
        value.as_object().cloned().unwrap()
    }

    fn descriptor() -> EndpointDescriptor {
        EndpointDescriptor::new("update-item", "PATCH", "/items/{id}/children/:child")
            .with_parameter(ParameterSpec::new("id", ParameterLocation::Path))
            .with_parameter(ParameterSpec::new("child", ParameterLocation::Path))
            .with_parameter(ParameterSpec::new("filter", ParameterLocation::Query))
            .with_parameter(ParameterSpec::new("category", ParameterLocation::Query))
            .with_parameter(ParameterSpec::new("Select", ParameterLocation::Header))
            .with_parameter(ParameterSpec::new("If-Match", ParameterLocation::Header))
            .with_parameter(ParameterSpec::new("payload", ParameterLocation::Body))
    }

    #[test]
    fn test_path_placeholders_substituted_and_escaped() {
        let bound = bind(&descriptor(), &args(json!({ "id": "a b/c", "child": 7 })));
        assert_eq!(bound.path, "/items/a%20b%2Fc/children/7");
    }

    #[test]
    fn test_unsupplied_placeholder_left_in_place() {
        let bound = bind(&descriptor(), &args(json!({ "id": "1" })));
        assert_eq!(bound.path, "/items/1/children/:child");
    }

    #[test]
    fn test_colon_placeholder_matches_whole_name() {
        let descriptor = EndpointDescriptor::new("get-tag", "GET", "/items/:id/tags/:idx/:id")
            .with_parameter(ParameterSpec::new("id", ParameterLocation::Path))
            .with_parameter(ParameterSpec::new("idx", ParameterLocation::Path));

        let bound = bind(&descriptor, &args(json!({ "id": "7" })));
        assert_eq!(bound.path, "/items/7/tags/:idx/7");

        let bound = bind(&descriptor, &args(json!({ "idx": "2" })));
        assert_eq!(bound.path, "/items/:id/tags/2/:id");
    }

    #[test]
    fn test_reserved_names_aliased_case_insensitively() {
        for name in [
            "filter", "select", "expand", "orderby", "skip", "top", "count", "search", "format",
        ] {
            assert_eq!(alias_parameter_name(name), format!("${}", name));
            let upper = name.to_uppercase();
            assert_eq!(alias_parameter_name(&upper), format!("${}", upper));
        }
        assert_eq!(alias_parameter_name("orderBy"), "$orderBy");
        assert_eq!(alias_parameter_name("category"), "category");
        assert_eq!(alias_parameter_name("startDateTime"), "startDateTime");
    }

    #[test]
    fn test_query_and_header_routing() {
        let bound = bind(
            &descriptor(),
            &args(json!({
                "filter": "a eq 1",
                "category": "x",
                "Select": "id",
                "If-Match": "etag"
            })),
        );
        assert!(bound.query.contains(&("$filter".to_string(), "a eq 1".to_string())));
        assert!(bound.query.contains(&("category".to_string(), "x".to_string())));
        assert_eq!(bound.headers.get("$Select").map(String::as_str), Some("id"));
        assert_eq!(bound.headers.get("If-Match").map(String::as_str), Some("etag"));
    }

    #[test]
    fn test_values_stringified() {
        assert_eq!(stringify_value(&json!(10)), "10");
        assert_eq!(stringify_value(&json!(true)), "true");
        assert_eq!(stringify_value(&json!(["id", "subject"])), "id,subject");
        assert_eq!(stringify_value(&json!({"a": 1})), r#"{"a":1}"#);
        assert_eq!(stringify_value(&Value::Null), "");
    }

    #[test]
    fn test_json_string_body_parsed() {
        let bound = bind(&descriptor(), &args(json!({ "payload": r#"{"name":"x"}"# })));
        assert_eq!(bound.body, Some(BodyArgument::Structured(json!({ "name": "x" }))));
    }

    #[test]
    fn test_invalid_json_body_kept_raw() {
        let bound = bind(&descriptor(), &args(json!({ "payload": "{not json" })));
        assert_eq!(bound.body, Some(BodyArgument::Raw("{not json".to_string())));
    }

    #[test]
    fn test_structured_body_used_as_is() {
        let bound = bind(&descriptor(), &args(json!({ "payload": { "values": [[1]] } })));
        assert_eq!(
            bound.body,
            Some(BodyArgument::Structured(json!({ "values": [[1]] })))
        );
    }

    #[test]
    fn test_legacy_body_argument() {
        let legacy = EndpointDescriptor::new("send", "POST", "/send");
        let bound = bind(&legacy, &args(json!({ "body": { "message": {} } })));
        assert_eq!(
            bound.body,
            Some(BodyArgument::Structured(json!({ "message": {} })))
        );
    }

    #[test]
    fn test_unknown_arguments_dropped() {
        let bound = bind(&descriptor(), &args(json!({ "id": "1", "sneaky": "x" })));
        assert!(bound.query.is_empty());
        assert!(bound.headers.is_empty());
        assert!(bound.body.is_none());
        assert!(!bound.path.contains("sneaky"));
    }

    #[test]
    fn test_defaults_applied_for_omitted_parameters() {
        let with_default = EndpointDescriptor::new("list", "GET", "/items").with_parameter(
            ParameterSpec::new("top", ParameterLocation::Query).with_default(json!(25)),
        );

        let bound = bind(&with_default, &JsonObject::new());
        assert_eq!(bound.query, vec![("$top".to_string(), "25".to_string())]);

        let bound = bind(&with_default, &args(json!({ "top": 5 })));
        assert_eq!(bound.query, vec![("$top".to_string(), "5".to_string())]);
    }

    #[test]
    fn test_body_payload_forms() {
        assert_eq!(BodyArgument::Raw("x".into()).into_payload().as_deref(), Some("x"));
        assert_eq!(
            BodyArgument::Structured(json!({ "a": 1 })).into_payload().as_deref(),
            Some(r#"{"a":1}"#)
        );
        assert_eq!(
            BodyArgument::Structured(json!("plain")).into_payload().as_deref(),
            Some(r#""plain""#)
        );
        assert_eq!(BodyArgument::Structured(Value::Null).into_payload(), None);
    }
}
