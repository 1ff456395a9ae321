//! Catalog-specific error types.

use thiserror::Error;

/// Errors raised while loading or validating the endpoint catalog.
///
/// These surface at startup only. Once a catalog is loaded, descriptors are
/// immutable and never produce errors at call time.
#[derive(Debug, Error)]
pub enum CatalogError {
    /// The catalog file could not be read.
    #[error("Failed to read catalog {path}: {source}")]
    Read {
        path: String,
        #[source]
        source: std::io::Error,
    },

    /// The catalog is not valid JSON or does not match the descriptor shape.
    #[error("Invalid catalog format: {0}")]
    Parse(#[from] serde_json::Error),

    /// Two descriptors share the same name.
    #[error("Duplicate endpoint name: {0}")]
    DuplicateEndpoint(String),

    /// A descriptor declares the same parameter twice.
    #[error("Duplicate parameter '{parameter}' in endpoint '{endpoint}'")]
    DuplicateParameter { endpoint: String, parameter: String },

    /// A descriptor is missing a mandatory field.
    #[error("Invalid endpoint '{endpoint}': {reason}")]
    InvalidEndpoint { endpoint: String, reason: String },
}

impl CatalogError {
    /// Create an "invalid endpoint" error.
    pub fn invalid(endpoint: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::InvalidEndpoint {
            endpoint: endpoint.into(),
            reason: reason.into(),
        }
    }
}
