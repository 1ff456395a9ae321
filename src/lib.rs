//! Microsoft Graph MCP Server Library
//!
//! Exposes Microsoft Graph REST endpoints as MCP tools. Endpoints are
//! described declaratively in a catalog; each descriptor becomes one tool
//! whose calls are bound, synthesized into a Graph request, sent, and
//! normalized into an MCP tool result.
//!
//! # Architecture
//!
//! - **core**: Configuration, error handling, the MCP server and transports
//! - **domains**: Business logic organized by bounded contexts
//!   - **catalog**: Endpoint descriptors and catalog loading
//!   - **graph**: Transport to Microsoft Graph (`GraphTransport`, `GraphClient`)
//!   - **tools**: Tool adapter pipeline, fixed tools, registry and router
//!
//! # Example
//!
//! ```rust,no_run
//! use graph_mcp_server::{core::McpServer, core::Config};
//!
//! #[tokio::main]
//! async fn main() -> anyhow::Result<()> {
//!     let config = Config::from_env();
//!     let server = McpServer::new(config)?;
//!     // Start the server...
//!     Ok(())
//! }
//! ```

pub mod core;
pub mod domains;

// Re-export commonly used types for convenience
pub use core::{Config, Error, McpServer, Result};
