//! Domains module containing business logic organized by bounded contexts.
//!
//! - `catalog` - declarative endpoint descriptors
//! - `graph` - Microsoft Graph transport
//! - `tools` - MCP tools built from the catalog, plus the fixed tools

pub mod catalog;
pub mod graph;
pub mod tools;
