//! The closed set of ways a tool invocation can fail.
//!
//! Every failure path in the client and plugin crates ends in one of these
//! variants.  The plugin boundary turns a [`Fault`] into a single
//! [`OutcomeMessage`] via [`Fault::into_outcome`], so nothing here ever
//! reaches the host as an error value.

use serde::Serialize;

use crate::outcome::OutcomeMessage;

// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━
// Input validation
// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━

/// Rejected tool parameters.  Raised before any request is built.
#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
pub enum ValidationError {
    #[error("'query' parameter is required and cannot be empty")]
    QueryRequired,

    #[error("'area_id' parameter is required and cannot be empty")]
    AreaIdRequired,

    #[error(
        "Invalid area_id format. Expected 'site:path:area' \
         (e.g., 'github.com:login:email-input'), got: {0}"
    )]
    InvalidAreaIdFormat(String),

    #[error(
        "Invalid area_id format. Each segment of 'site:path:area' must be \
         non-empty, got: {0}"
    )]
    EmptyAreaIdSegment(String),
}

// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━
// Connection sub-classes
// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━

/// Finer-grained reason behind a connection failure, derived from the
/// transport's error text.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ConnectClass {
    Tls,
    Refused,
    Dns,
    Reset,
    TimeoutLike,
    Other,
}

impl ConnectClass {
    /// Classify a connection failure by inspecting its (full chain) text.
    ///
    /// Order matters: TLS failures frequently mention "connection" too.
    pub fn classify(text: &str) -> Self {
        let lower = text.to_ascii_lowercase();
        if ["certificate", "tls", "ssl", "handshake"]
            .iter()
            .any(|needle| lower.contains(needle))
        {
            Self::Tls
        } else if lower.contains("refused") {
            Self::Refused
        } else if ["dns", "resolve", "lookup", "name or service not known"]
            .iter()
            .any(|needle| lower.contains(needle))
        {
            Self::Dns
        } else if lower.contains("reset") || lower.contains("broken pipe") {
            Self::Reset
        } else if lower.contains("timed out") || lower.contains("timeout") {
            Self::TimeoutLike
        } else {
            Self::Other
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Self::Tls => "TLS handshake failed",
            Self::Refused => "connection refused",
            Self::Dns => "DNS resolution failed",
            Self::Reset => "connection reset",
            Self::TimeoutLike => "connection timed out",
            Self::Other => "network error",
        }
    }

    fn hint(&self) -> &'static str {
        match self {
            Self::Tls => {
                "Check that no proxy is intercepting HTTPS traffic and that the \
                 system CA certificates are up to date."
            }
            Self::Refused => {
                "Check the configured API base URL and that outbound HTTPS is \
                 allowed from this host."
            }
            Self::Dns => {
                "Check DNS settings; self-hosted deployments may need \
                 api.actionbook.dev allowed through the SSRF proxy."
            }
            Self::Reset => "A proxy or firewall may be dropping the connection.",
            Self::TimeoutLike => {
                "The network path to the API is slow or blocked; check firewall \
                 and proxy rules."
            }
            Self::Other => "Check your network connection and proxy settings.",
        }
    }
}

// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━
// Fault
// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━

/// Every failure a tool invocation can end in.
#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
pub enum Fault {
    #[error(transparent)]
    Validation(#[from] ValidationError),

    #[error("Unauthorized (401)")]
    Unauthorized,

    #[error("Forbidden (403)")]
    Forbidden,

    #[error("Rate limit exceeded (429)")]
    RateLimited,

    #[error("server error ({status})")]
    Unavailable { status: u16 },

    #[error("request failed with status {status}")]
    Status { status: u16 },

    #[error("cannot connect ({}): {detail}", class.label())]
    Connect { class: ConnectClass, detail: String },

    #[error("timed out after {secs}s")]
    Timeout { secs: u64 },

    #[error("unexpected error ({type_name}): {message}")]
    Unexpected { type_name: String, message: String },

    #[error("system-level error ({type_name}): {message}")]
    System { type_name: String, message: String },
}

impl Fault {
    /// Map a non-success HTTP status to its fault.
    ///
    /// Callers handle 200 (and 404 for lookups) before reaching here.
    pub fn from_status(status: u16) -> Self {
        match status {
            401 => Self::Unauthorized,
            403 => Self::Forbidden,
            429 => Self::RateLimited,
            s if s >= 500 => Self::Unavailable { status: s },
            s => Self::Status { status: s },
        }
    }

    /// Stable short name, used in trace events.
    pub fn kind(&self) -> &'static str {
        match self {
            Self::Validation(_) => "validation",
            Self::Unauthorized => "unauthorized",
            Self::Forbidden => "forbidden",
            Self::RateLimited => "rate_limited",
            Self::Unavailable { .. } => "unavailable",
            Self::Status { .. } => "status",
            Self::Connect { .. } => "connect",
            Self::Timeout { .. } => "timeout",
            Self::Unexpected { .. } => "unexpected",
            Self::System { .. } => "system",
        }
    }

    /// The user-visible text for this fault.  Always starts with `Error:` and
    /// names the failure class plainly.
    pub fn message(&self) -> String {
        match self {
            Self::Validation(e) => format!("Error: {e}"),
            Self::Unauthorized => "Error: Unauthorized (401). The Actionbook API key is \
                                   invalid or missing. Check the key configured in the \
                                   plugin credentials."
                .into(),
            Self::Forbidden => "Error: Forbidden (403). The API key does not have \
                                permission to access this resource."
                .into(),
            Self::RateLimited => {
                "Error: Rate limit exceeded (429). Please retry later.".into()
            }
            Self::Unavailable { status } => format!(
                "Error: Actionbook API server error ({status}). The service is \
                 currently unavailable, please try again later."
            ),
            Self::Status { status } => {
                format!("Error: API request failed with status {status}.")
            }
            Self::Connect { class, detail } => format!(
                "Error: Cannot connect to Actionbook API ({}): {detail}. {}",
                class.label(),
                class.hint()
            ),
            Self::Timeout { secs } => format!(
                "Error: Request to Actionbook API timed out after {secs} seconds. \
                 Please try again."
            ),
            Self::Unexpected { type_name, message } => {
                format!("Error: An unexpected error occurred ({type_name}): {message}")
            }
            Self::System { type_name, message } => {
                format!("Error: A system-level error occurred ({type_name}): {message}")
            }
        }
    }

    pub fn into_outcome(self) -> OutcomeMessage {
        OutcomeMessage::fault(self.message())
    }
}

// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━
// Tests
// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━
