//! Declarative tool adapter.
//!
//! Turns an endpoint descriptor plus caller arguments into a Graph request and
//! the transport's answer into an MCP tool result:
//!
//! ```text
//! arguments ─▶ binder ─▶ synthesizer ─▶ fixups ─▶ GraphTransport ─▶ normalizer ─▶ CallToolResult
//! ```
//!
//! Fixups are the only endpoint-specific code; everything else is generic over
//! the descriptor's parameter list.

pub mod binder;
mod endpoint;
pub mod fixups;
pub mod normalizer;
pub mod synthesizer;

pub use binder::{BodyArgument, BoundRequest, bind};
pub use endpoint::{EndpointTool, input_schema};
pub use normalizer::{error_envelope, normalize_response};
pub use synthesizer::{SynthesizedRequest, TransportHints, synthesize};
