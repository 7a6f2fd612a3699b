//! Tool registry: maps tool names to handlers and dispatches invocations
//! through the [`guarded`](crate::boundary::guarded) boundary.

use std::collections::HashMap;
use std::sync::Arc;

use ab_domain::outcome::OutcomeMessage;
use ab_domain::stream::OutcomeStream;
use ab_domain::tool::ToolDefinition;

use crate::boundary::guarded;
use crate::types::{ToolContext, ToolResult};

/// Implement this trait to expose a tool to the host.
///
/// Handlers return a [`ToolResult`]; the registry wraps every call so the
/// host always receives exactly one message.
///
/// # Example
///
/// ```rust,no_run
/// use ab_domain::outcome::OutcomeMessage;
/// use ab_domain::tool::ToolDefinition;
/// use ab_plugin::{PluginTool, ToolContext, ToolResult};
///
/// struct PingTool;
///
/// #[async_trait::async_trait]
/// impl PluginTool for PingTool {
///     fn definition(&self) -> ToolDefinition {
///         ToolDefinition {
///             name: "ping".into(),
///             description: "Replies with pong.".into(),
///             parameters: serde_json::json!({ "type": "object" }),
///         }
///     }
///
///     async fn call(&self, _ctx: ToolContext, _args: serde_json::Value) -> ToolResult {
///         Ok(OutcomeMessage::body("pong"))
///     }
/// }
/// ```
#[async_trait::async_trait]
pub trait PluginTool: Send + Sync + 'static {
    /// Name, description, and parameter schema advertised to the host.
    fn definition(&self) -> ToolDefinition;

    /// Execute the tool.
    ///
    /// * `ctx`: request context (correlation ID, cancellation token)
    /// * `args`: JSON parameters from the host
    async fn call(&self, ctx: ToolContext, args: serde_json::Value) -> ToolResult;
}

/// Registry of tool handlers.
#[derive(Clone, Default)]
pub struct ToolRegistry {
    tools: HashMap<String, Arc<dyn PluginTool>>,
}

impl ToolRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a tool under its definition's name.
    ///
    /// The name is normalized to lowercase so lookups are case-insensitive.
    ///
    /// Returns `&mut Self` for method chaining.
    pub fn register<T: PluginTool>(&mut self, tool: T) -> &mut Self {
        self.register_boxed(Arc::new(tool))
    }

    /// Register a pre-wrapped tool handler.
    pub fn register_boxed(&mut self, tool: Arc<dyn PluginTool>) -> &mut Self {
        let name = tool.definition().name.to_ascii_lowercase();
        self.tools.insert(name, tool);
        self
    }

    /// All registered tool names (sorted).
    pub fn tool_names(&self) -> Vec<String> {
        let mut names: Vec<String> = self.tools.keys().cloned().collect();
        names.sort();
        names
    }

    /// All tool definitions, in the same case-insensitive order as
    /// [`tool_names`](Self::tool_names).
    pub fn definitions(&self) -> Vec<ToolDefinition> {
        let mut defs: Vec<ToolDefinition> = self.tools.values().map(|t| t.definition()).collect();
        defs.sort_by_cached_key(|d| d.name.to_ascii_lowercase());
        defs
    }

    /// Look up a handler by tool name (case-insensitive).
    pub fn get(&self, tool_name: &str) -> Option<Arc<dyn PluginTool>> {
        self.tools.get(&tool_name.to_ascii_lowercase()).cloned()
    }

    /// Invoke a tool by name.  Always returns a stream of exactly one
    /// message, including for unknown tool names.
    pub fn invoke(&self, tool_name: &str, args: serde_json::Value) -> OutcomeStream {
        self.invoke_with(ToolContext::new(tool_name), args)
    }

    /// Like [`invoke`](Self::invoke) with a caller-supplied context (to
    /// share a request ID or a cancellation token with the host).
    pub fn invoke_with(&self, ctx: ToolContext, args: serde_json::Value) -> OutcomeStream {
        match self.get(&ctx.tool_name) {
            Some(handler) => {
                let call_ctx = ctx.clone();
                guarded(ctx, async move { handler.call(call_ctx, args).await })
            }
            None => {
                tracing::warn!(tool = %ctx.tool_name, "invocation of unknown tool");
                let known = self.tool_names().join(", ");
                let msg = OutcomeMessage::fault(format!(
                    "Error: unknown tool '{}'. Available tools: {known}",
                    ctx.tool_name
                ));
                Box::pin(futures_util::stream::once(async move { msg }))
            }
        }
    }
}
