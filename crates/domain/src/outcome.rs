use std::fmt;

use serde::Serialize;

/// What an [`OutcomeMessage`] carries.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum OutcomeKind {
    /// The remote body, passed through verbatim.
    Body,
    /// Lookup returned 404.  Not an error.
    NotFound,
    /// HTTP 200 with a blank body.
    EmptyResponse,
    /// A normalized [`Fault`](crate::fault::Fault).
    Fault,
}

/// The single unit of output per tool invocation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct OutcomeMessage {
    pub kind: OutcomeKind,
    pub text: String,
}

impl OutcomeMessage {
    pub fn body(text: impl Into<String>) -> Self {
        Self {
            kind: OutcomeKind::Body,
            text: text.into(),
        }
    }

    pub fn not_found(area_id: &str) -> Self {
        Self {
            kind: OutcomeKind::NotFound,
            text: format!("Action not found for area_id: {area_id}"),
        }
    }

    /// Diagnostic for a 200 response with nothing in it.
    ///
    /// The API always returns text for a successful call (even "no results"
    /// is phrased by the server), so a blank body points at something
    /// between the plugin and the API eating the response.
    pub fn empty_response(operation: &str) -> Self {
        Self {
            kind: OutcomeKind::EmptyResponse,
            text: format!(
                "Error: Actionbook API returned an empty response (HTTP 200) for {operation}. \
                 This usually means outbound requests are being blocked or rewritten by a \
                 network restriction.\n\
                 \n\
                 Possible fixes:\n\
                 - Self-hosted deployments: allow api.actionbook.dev through the SSRF proxy \
                 (check SSRF_PROXY_HTTP_URL / SSRF_PROXY_HTTPS_URL and the proxy whitelist).\n\
                 - Check firewall or corporate proxy rules for outbound HTTPS.\n\
                 - Verify the API base URL in the plugin configuration."
            ),
        }
    }

    pub fn fault(text: impl Into<String>) -> Self {
        Self {
            kind: OutcomeKind::Fault,
            text: text.into(),
        }
    }

    pub fn is_error(&self) -> bool {
        matches!(self.kind, OutcomeKind::Fault | OutcomeKind::EmptyResponse)
    }
}

impl fmt::Display for OutcomeMessage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.text)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn not_found_echoes_identifier() {
        let msg = OutcomeMessage::not_found("example.com:page:nonexistent");
        assert_eq!(msg.kind, OutcomeKind::NotFound);
        assert!(msg.text.contains("not found"));
        assert!(msg.text.contains("example.com:page:nonexistent"));
        assert!(!msg.is_error());
    }

    #[test]
    fn empty_response_points_at_network_restriction() {
        let msg = OutcomeMessage::empty_response("search_actions");
        assert!(msg.text.to_lowercase().contains("empty response"));
        assert!(msg.text.contains("SSRF proxy"));
        assert!(msg.text.contains("Self-hosted"));
        assert!(!msg.text.contains("not found"));
        assert!(msg.is_error());
    }

    #[test]
    fn display_is_the_text() {
        let msg = OutcomeMessage::body("Area ID: github.com:login:username");
        assert_eq!(msg.to_string(), "Area ID: github.com:login:username");
    }
}
