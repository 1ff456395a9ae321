//! Common utilities shared across hand-authored tools.

use rmcp::model::JsonObject;
use serde::de::DeserializeOwned;

use crate::domains::tools::error::ToolError;

/// Deserialize tool arguments into a typed parameter struct.
pub fn parse_params<P: DeserializeOwned>(arguments: JsonObject) -> Result<P, ToolError> {
    serde_json::from_value(serde_json::Value::Object(arguments))
        .map_err(|e| ToolError::invalid_arguments(e.to_string()))
}

/// Validate a drive-root file path supplied by a caller.
pub fn validate_file_path(file_path: &str) -> Result<&str, ToolError> {
    let trimmed = file_path.trim();
    if trimmed.trim_matches('/').is_empty() {
        return Err(ToolError::invalid_arguments("filePath must not be empty"));
    }
    if trimmed.contains(':') {
        return Err(ToolError::invalid_arguments(
            "filePath must not contain ':' (use a path relative to the drive root)",
        ));
    }
    Ok(trimmed)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde::Deserialize;

    #[derive(Debug, Deserialize)]
    struct Params {
        name: String,
    }

    #[test]
    fn test_parse_params() {
        let mut args = JsonObject::new();
        args.insert("name".to_string(), serde_json::json!("x"));
        let params: Params = parse_params(args).unwrap();
        assert_eq!(params.name, "x");

        let err = parse_params::<Params>(JsonObject::new()).unwrap_err();
        assert!(matches!(err, ToolError::InvalidArguments(_)));
    }

    #[test]
    fn test_validate_file_path() {
        assert_eq!(validate_file_path(" /Book.xlsx ").unwrap(), "/Book.xlsx");
        assert!(validate_file_path("/").is_err());
        assert!(validate_file_path("").is_err());
        assert!(validate_file_path("/a:b.xlsx").is_err());
    }
}
