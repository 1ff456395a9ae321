//! Tool Router - builds the rmcp ToolRouter from the registry.
//!
//! Each registered handler becomes a dynamic route. Routes dispatch through
//! the same envelope as `ToolRegistry::call_tool`, so a failing tool never
//! surfaces as a protocol error.

use std::sync::Arc;

use futures::FutureExt;
use rmcp::handler::server::tool::{ToolCallContext, ToolRoute, ToolRouter};

use super::handlers::{ToolHandler, invoke_enveloped};
use super::registry::ToolRegistry;

/// Build a route for one handler.
pub fn create_route<S>(handler: Arc<dyn ToolHandler>) -> ToolRoute<S>
where
    S: Send + Sync + 'static,
{
    ToolRoute::new_dyn(handler.tool(), move |ctx: ToolCallContext<'_, S>| {
        let args = ctx.arguments.clone().unwrap_or_default();
        let handler = handler.clone();
        async move { Ok(invoke_enveloped(handler.as_ref(), args).await) }.boxed()
    })
}

/// Build the tool router with all registered tools.
pub fn build_tool_router<S>(registry: &ToolRegistry) -> ToolRouter<S>
where
    S: Send + Sync + 'static,
{
    registry
        .handlers()
        .iter()
        .cloned()
        .fold(ToolRouter::new(), |router, handler| {
            router.with_route(create_route(handler))
        })
}
