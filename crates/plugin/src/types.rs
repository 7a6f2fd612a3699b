//! Core types for tool handling: context and results.

use tokio_util::sync::CancellationToken;

use ab_domain::fault::Fault;
use ab_domain::outcome::OutcomeMessage;

/// Context provided to every tool invocation.
#[derive(Clone, Debug)]
pub struct ToolContext {
    /// Correlation ID for logs and trace events.
    pub request_id: String,
    /// Tool name as registered (e.g. `"search_actions"`).
    pub tool_name: String,

    // ── Cancellation ─────────────────────────────────────────────
    /// Cancelled by the host to abandon the invocation.  The in-flight
    /// request is dropped and the invocation still yields one message.
    pub cancel: CancellationToken,
}

impl ToolContext {
    /// Fresh context with a random request ID and its own cancel token.
    pub fn new(tool_name: impl Into<String>) -> Self {
        Self {
            request_id: uuid::Uuid::new_v4().to_string(),
            tool_name: tool_name.into(),
            cancel: CancellationToken::new(),
        }
    }

    pub fn with_cancel(mut self, cancel: CancellationToken) -> Self {
        self.cancel = cancel;
        self
    }
}

/// Result type for tool handlers.  The invocation boundary turns the error
/// side into an outcome message.
pub type ToolResult = Result<OutcomeMessage, Fault>;
