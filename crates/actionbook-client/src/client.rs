//! The remote query executor.
//!
//! `ActionbookClient` turns a validated request into exactly one GET and
//! classifies whatever comes back: an [`OutcomeMessage`] for the cases the
//! caller should read as a result, a [`Fault`] for everything else.

use std::sync::Arc;
use std::time::{Duration, Instant};

use ab_domain::config::ActionbookConfig;
use ab_domain::credential::Credential;
use ab_domain::error::Result;
use ab_domain::fault::{ConnectClass, Fault};
use ab_domain::outcome::OutcomeMessage;
use ab_domain::request::{AreaId, LookupRequest, SearchRequest};
use ab_domain::trace::TraceEvent;

use crate::rest::ReqwestTransport;
use crate::transport::{HttpRequest, HttpResponse, HttpTransport, TransportError};

/// Operation names used in diagnostics and trace events.
pub const SEARCH_OPERATION: &str = "search_actions";
pub const LOOKUP_OPERATION: &str = "get_action_by_area_id";

// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━
// Client
// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━

/// Client for the Actionbook actions API.
///
/// Holds no per-invocation state; clones share the transport.
#[derive(Clone)]
pub struct ActionbookClient {
    transport: Arc<dyn HttpTransport>,
    cfg: ActionbookConfig,
}

impl ActionbookClient {
    /// Build a client backed by [`ReqwestTransport`].
    pub fn new(cfg: &ActionbookConfig) -> Result<Self> {
        let transport = ReqwestTransport::new(&cfg.user_agent)?;
        Ok(Self::with_transport(cfg, Arc::new(transport)))
    }

    pub fn with_transport(cfg: &ActionbookConfig, transport: Arc<dyn HttpTransport>) -> Self {
        Self {
            transport,
            cfg: cfg.clone(),
        }
    }

    pub fn config(&self) -> &ActionbookConfig {
        &self.cfg
    }

    // ── request builders ─────────────────────────────────────────────

    /// Standard headers: `Accept: text/plain` always, the API key header
    /// only when a credential is present.
    fn headers(&self, credential: Option<&Credential>) -> Vec<(String, String)> {
        let mut headers = vec![("Accept".to_owned(), "text/plain".to_owned())];
        if let Some(key) = credential {
            headers.push((self.cfg.api_key_header.clone(), key.expose().to_owned()));
        }
        headers
    }

    pub fn search_request(
        &self,
        req: &SearchRequest,
        credential: Option<&Credential>,
        timeout: Duration,
    ) -> HttpRequest {
        let mut query = vec![("query".to_owned(), req.query().to_owned())];
        if let Some(domain) = req.domain() {
            query.push(("domain".to_owned(), domain.to_owned()));
        }
        query.push((self.cfg.limit_param.clone(), req.limit().get().to_string()));

        HttpRequest {
            url: self.cfg.url(&self.cfg.search_path),
            headers: self.headers(credential),
            query,
            timeout,
        }
    }

    pub fn lookup_request(
        &self,
        req: &LookupRequest,
        credential: Option<&Credential>,
    ) -> HttpRequest {
        HttpRequest {
            url: self.cfg.url(&self.cfg.lookup_path),
            headers: self.headers(credential),
            query: vec![("area_id".to_owned(), req.area_id.as_str().to_owned())],
            timeout: self.cfg.tool_timeout(),
        }
    }

    // ── execution ────────────────────────────────────────────────────

    /// Send one request.  Emits a `TraceEvent::ApiCall` either way.
    pub(crate) async fn execute(
        &self,
        endpoint: &str,
        req: HttpRequest,
    ) -> std::result::Result<HttpResponse, Fault> {
        let timeout = req.timeout;
        let authenticated = req.header(&self.cfg.api_key_header).is_some();

        let start = Instant::now();
        let result = self.transport.get(req).await;
        let duration_ms = start.elapsed().as_millis() as u64;

        TraceEvent::ApiCall {
            endpoint: endpoint.to_owned(),
            status: result.as_ref().map(|r| r.status).unwrap_or(0),
            duration_ms,
            authenticated,
        }
        .emit();

        result.map_err(|e| {
            tracing::warn!(endpoint, error = %e, "actionbook request failed");
            transport_fault(e, timeout)
        })
    }

    pub async fn search(
        &self,
        req: &SearchRequest,
        credential: Option<&Credential>,
    ) -> std::result::Result<OutcomeMessage, Fault> {
        let http = self.search_request(req, credential, self.cfg.tool_timeout());
        let endpoint = format!("GET {}", self.cfg.search_path);
        tracing::debug!(
            query = %req.query(),
            domain = ?req.domain(),
            limit = req.limit().get(),
            "searching actions"
        );
        let resp = self.execute(&endpoint, http).await?;
        classify_search(resp)
    }

    pub async fn lookup(
        &self,
        req: &LookupRequest,
        credential: Option<&Credential>,
    ) -> std::result::Result<OutcomeMessage, Fault> {
        let http = self.lookup_request(req, credential);
        let endpoint = format!("GET {}", self.cfg.lookup_path);
        tracing::debug!(area_id = %req.area_id, "fetching action");
        let resp = self.execute(&endpoint, http).await?;
        classify_lookup(resp, &req.area_id)
    }
}

impl std::fmt::Debug for ActionbookClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ActionbookClient")
            .field("base_url", &self.cfg.base_url)
            .finish_non_exhaustive()
    }
}

// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━
// Classification
// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━

/// Search responses: 200 passes the body through, a blank 200 becomes the
/// empty-response diagnostic, anything else is a fault.
pub fn classify_search(resp: HttpResponse) -> std::result::Result<OutcomeMessage, Fault> {
    classify_ok(resp, SEARCH_OPERATION)
}

/// Lookup responses: like search, except 404 is a regular "not found"
/// outcome that echoes the identifier.
pub fn classify_lookup(
    resp: HttpResponse,
    area_id: &AreaId,
) -> std::result::Result<OutcomeMessage, Fault> {
    if resp.status == 404 {
        return Ok(OutcomeMessage::not_found(area_id.as_str()));
    }
    classify_ok(resp, LOOKUP_OPERATION)
}

fn classify_ok(resp: HttpResponse, operation: &str) -> std::result::Result<OutcomeMessage, Fault> {
    if resp.status != 200 {
        return Err(Fault::from_status(resp.status));
    }
    if resp.body.trim().is_empty() {
        tracing::warn!(operation, "actionbook returned 200 with an empty body");
        return Ok(OutcomeMessage::empty_response(operation));
    }
    Ok(OutcomeMessage::body(resp.body))
}

/// Map a transport failure onto the fault taxonomy.
pub fn transport_fault(e: TransportError, timeout: Duration) -> Fault {
    match e {
        TransportError::Connect(detail) => Fault::Connect {
            class: ConnectClass::classify(&detail),
            detail,
        },
        TransportError::Timeout => Fault::Timeout {
            secs: timeout.as_secs(),
        },
        TransportError::Other { type_name, message } => Fault::Unexpected { type_name, message },
    }
}

// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━
// Tests
// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━
