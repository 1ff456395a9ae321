//! Tools domain module.
//!
//! Every tool exposed to the MCP host lives here: one tool per catalog
//! descriptor plus a few hand-authored ones.
//!
//! ## Architecture
//!
//! - `adapter/` - Catalog-driven pipeline: binder, synthesizer with fixups,
//!   normalizer and the `EndpointTool` that chains them
//! - `definitions/` - Hand-authored tools (one file per tool)
//! - `handlers.rs` - `ToolHandler` trait and the error envelope
//! - `registry.rs` - Central tool registry, read-only filter and dispatch
//! - `router.rs` - Dynamic ToolRouter builder for the STDIO transport
//! - `error.rs` - Tool-specific error types
//!
//! ## Adding a New Tool
//!
//! Graph endpoints usually need only a new entry in `catalog/endpoints.json`.
//! For anything that is not a single request:
//! 1. Create a new file in `definitions/` implementing `ToolHandler`
//! 2. Export it in `definitions/mod.rs`
//! 3. Register it in `ToolRegistry::new`

pub mod adapter;
pub mod definitions;
mod error;
mod handlers;
mod registry;
pub mod router;

pub use error::ToolError;
pub use handlers::*;
pub use registry::ToolRegistry;
pub use router::build_tool_router;
