use serde::Serialize;

/// Structured trace events emitted across the plugin crates.
///
/// Events go through `tracing`; whoever installs the subscriber decides
/// where they end up.  No event ever carries the API key.
#[derive(Debug, Clone, Serialize)]
#[serde(tag = "event")]
pub enum TraceEvent {
    ToolInvoked {
        tool: String,
        request_id: String,
    },
    ApiCall {
        endpoint: String,
        status: u16,
        duration_ms: u64,
        authenticated: bool,
    },
    FaultNormalized {
        tool: String,
        request_id: String,
        fault: String,
    },
    CredentialChecked {
        mode: String,
        valid: bool,
    },
}

impl TraceEvent {
    pub fn emit(&self) {
        let json = serde_json::to_string(self).unwrap_or_default();
        tracing::info!(trace_event = %json, "ab_event");
    }
}
