//! Endpoint catalog domain module.
//!
//! The catalog is the static list of Microsoft Graph endpoint descriptors that
//! the tool registry turns into callable MCP tools. It is produced by an
//! external generator and only read here.
//!
//! ## Architecture
//!
//! - `descriptor.rs` - `EndpointDescriptor`, `ParameterSpec` and `ParameterLocation`
//! - `loader.rs` - `Catalog` loading (embedded default or file) and validation
//! - `error.rs` - Catalog-specific error types

mod descriptor;
mod error;
mod loader;

pub use descriptor::{EndpointDescriptor, ParameterLocation, ParameterSpec};
pub use error::CatalogError;
pub use loader::Catalog;
