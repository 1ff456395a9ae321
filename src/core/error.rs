//! Error types and handling for the MCP server.
//!
//! Server construction fails only through one of the domain errors below;
//! the binary wraps this type with `anyhow` context.

use thiserror::Error;

/// A specialized Result type for MCP server operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Unified error type for the MCP server.
#[derive(Debug, Error)]
pub enum Error {
    /// The endpoint catalog could not be loaded.
    #[error("Catalog error: {0}")]
    Catalog(#[from] crate::domains::catalog::CatalogError),

    /// The Graph client could not be built.
    #[error("Graph error: {0}")]
    Graph(#[from] crate::domains::graph::GraphError),

    /// Error originating from the tools domain.
    #[error("Tool error: {0}")]
    Tool(#[from] crate::domains::tools::ToolError),
}
