//! Catalog loading and validation.

use std::collections::HashSet;
use std::path::Path;

use tracing::{debug, info};

use super::descriptor::EndpointDescriptor;
use super::error::CatalogError;

/// Default catalog compiled into the binary.
const EMBEDDED_CATALOG: &str = include_str!("../../../catalog/endpoints.json");

/// Ordered, validated list of endpoint descriptors.
#[derive(Debug, Clone, Default)]
pub struct Catalog {
    endpoints: Vec<EndpointDescriptor>,
}

impl Catalog {
    /// Build a catalog from descriptors, validating names and parameters.
    pub fn new(endpoints: Vec<EndpointDescriptor>) -> Result<Self, CatalogError> {
        let mut names = HashSet::new();

        for endpoint in &endpoints {
            if endpoint.name.trim().is_empty() {
                return Err(CatalogError::invalid(&endpoint.path, "empty name"));
            }
            if endpoint.method.trim().is_empty() {
                return Err(CatalogError::invalid(&endpoint.name, "empty method"));
            }
            if !names.insert(endpoint.name.as_str()) {
                return Err(CatalogError::DuplicateEndpoint(endpoint.name.clone()));
            }

            let mut params = HashSet::new();
            for param in &endpoint.parameters {
                if !params.insert(param.name.as_str()) {
                    return Err(CatalogError::DuplicateParameter {
                        endpoint: endpoint.name.clone(),
                        parameter: param.name.clone(),
                    });
                }
            }
        }

        Ok(Self { endpoints })
    }

    /// Parse a catalog from its JSON text (an array of descriptors).
    pub fn from_json(json: &str) -> Result<Self, CatalogError> {
        let endpoints: Vec<EndpointDescriptor> = serde_json::from_str(json)?;
        Self::new(endpoints)
    }

    /// Load the catalog shipped with the binary.
    pub fn embedded() -> Result<Self, CatalogError> {
        let catalog = Self::from_json(EMBEDDED_CATALOG)?;
        debug!("Loaded embedded catalog with {} endpoints", catalog.len());
        Ok(catalog)
    }

    /// Load a catalog from a JSON file.
    pub fn from_path(path: impl AsRef<Path>) -> Result<Self, CatalogError> {
        let path = path.as_ref();
        let json = std::fs::read_to_string(path).map_err(|source| CatalogError::Read {
            path: path.display().to_string(),
            source,
        })?;
        let catalog = Self::from_json(&json)?;
        info!(
            "Loaded catalog from {} ({} endpoints)",
            path.display(),
            catalog.len()
        );
        Ok(catalog)
    }

    /// Load from `path` if given, otherwise the embedded catalog.
    pub fn load(path: Option<&Path>) -> Result<Self, CatalogError> {
        match path {
            Some(path) => Self::from_path(path),
            None => Self::embedded(),
        }
    }

    /// Descriptors in catalog order.
    pub fn endpoints(&self) -> &[EndpointDescriptor] {
        &self.endpoints
    }

    /// Look up a descriptor by name.
    pub fn get(&self, name: &str) -> Option<&EndpointDescriptor> {
        self.endpoints.iter().find(|e| e.name == name)
    }

    pub fn len(&self) -> usize {
        self.endpoints.len()
    }

    pub fn is_empty(&self) -> bool {
        self.endpoints.is_empty()
    }
}
