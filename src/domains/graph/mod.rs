//! Microsoft Graph transport domain.
//!
//! The tool adapter never talks HTTP directly. It hands a synthesized request
//! to a `GraphTransport`, which owns authentication headers, workbook sessions
//! and response decoding.
//!
//! ## Architecture
//!
//! - `transport.rs` - `GraphTransport` trait, `RequestOptions`, `GraphResponse`
//! - `client.rs` - reqwest-backed `GraphClient` implementation
//! - `error.rs` - Graph-specific error types

mod client;
mod error;
mod transport;

#[cfg(test)]
pub mod testing;

pub use client::{GraphClient, drive_root_path, workbook_key};
pub use error::GraphError;
pub use transport::{GraphResponse, GraphTransport, RequestOptions};
