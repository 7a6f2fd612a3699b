//! Provider-registration credential check.

use ab_domain::config::AccessMode;
use ab_domain::credential::Credential;
use ab_domain::fault::Fault;
use ab_domain::request::{ResultLimit, SearchRequest};
use ab_domain::trace::TraceEvent;

use crate::client::ActionbookClient;

/// Why a credential was rejected.  Every message tells the user what to do
/// next.
#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
pub enum CredentialError {
    #[error("API key is required")]
    Missing,

    #[error("Invalid API key. Get your key at https://actionbook.dev/dashboard/api-keys")]
    Invalid,

    #[error("API key does not have permission to access this resource")]
    Forbidden,

    #[error("Actionbook API is currently unavailable ({0}). Please try again later.")]
    Unavailable(u16),

    #[error("API key validation failed with status {0}")]
    Status(u16),

    #[error("Cannot connect to Actionbook API: {0}")]
    Connect(String),

    #[error("Actionbook API request timed out. Please try again.")]
    Timeout,

    #[error("API key validation failed unexpectedly: {0}")]
    Unexpected(String),
}

impl From<Fault> for CredentialError {
    fn from(fault: Fault) -> Self {
        match fault {
            Fault::Unauthorized => Self::Invalid,
            Fault::Forbidden => Self::Forbidden,
            Fault::Unavailable { status } => Self::Unavailable(status),
            Fault::RateLimited => Self::Status(429),
            Fault::Status { status } => Self::Status(status),
            Fault::Connect { class, detail } => Self::Connect(format!("{}: {detail}", class.label())),
            Fault::Timeout { .. } => Self::Timeout,
            other => Self::Unexpected(other.to_string()),
        }
    }
}

/// Validates an API key once, at provider registration.
#[derive(Debug, Clone)]
pub struct CredentialGate {
    client: ActionbookClient,
    mode: AccessMode,
}

impl CredentialGate {
    pub fn new(client: ActionbookClient, mode: AccessMode) -> Self {
        Self { client, mode }
    }

    pub fn mode(&self) -> AccessMode {
        self.mode
    }

    /// Accept or reject `credential`.
    ///
    /// Public mode accepts anything without touching the network.  API-key
    /// mode rejects a missing key immediately, otherwise issues one
    /// minimal search (`query=test`, limit 1) with the short credential
    /// timeout and accepts only a 200.
    pub async fn validate(&self, credential: Option<&Credential>) -> Result<(), CredentialError> {
        let result = match (self.mode, credential) {
            (AccessMode::Public, _) => Ok(()),
            (AccessMode::ApiKey, None) => Err(CredentialError::Missing),
            (AccessMode::ApiKey, Some(key)) => self.probe(key).await,
        };

        TraceEvent::CredentialChecked {
            mode: format!("{:?}", self.mode),
            valid: result.is_ok(),
        }
        .emit();
        if let Err(ref e) = result {
            tracing::warn!(error = %e, "credential validation failed");
        }
        result
    }

    async fn probe(&self, key: &Credential) -> Result<(), CredentialError> {
        let cfg = self.client.config();
        let limit = ResultLimit::within(1, cfg.max_limit).unwrap_or_default();
        let probe = SearchRequest::new("test", None, limit)
            .map_err(|e| CredentialError::Unexpected(e.to_string()))?;
        let req = self
            .client
            .search_request(&probe, Some(key), cfg.credential_timeout());
        let endpoint = format!("GET {} (credential check)", cfg.search_path);

        let resp = self.client.execute(&endpoint, req).await?;
        if resp.status == 200 {
            Ok(())
        } else {
            Err(Fault::from_status(resp.status).into())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::transport::{HttpRequest, HttpResponse, HttpTransport, TransportError};
    use ab_domain::config::ActionbookConfig;
    use async_trait::async_trait;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::{Arc, Mutex};
    use std::time::Duration;

    struct Probe {
        reply: Result<HttpResponse, TransportError>,
        calls: AtomicUsize,
        last: Mutex<Option<HttpRequest>>,
    }

    impl Probe {
        fn new(reply: Result<HttpResponse, TransportError>) -> Arc<Self> {
            Arc::new(Self {
                reply,
                calls: AtomicUsize::new(0),
                last: Mutex::new(None),
            })
        }

        fn status(status: u16) -> Arc<Self> {
            Self::new(Ok(HttpResponse {
                status,
                body: String::new(),
            }))
        }
    }

    #[async_trait]
    impl HttpTransport for Probe {
        async fn get(&self, req: HttpRequest) -> Result<HttpResponse, TransportError> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            *self.last.lock().unwrap() = Some(req);
            self.reply.clone()
        }
    }

    fn gate(probe: Arc<Probe>, mode: AccessMode) -> CredentialGate {
        let client = ActionbookClient::with_transport(&ActionbookConfig::default(), probe);
        CredentialGate::new(client, mode)
    }

    fn key() -> Credential {
        Credential::new("test_key_123").unwrap()
    }

    #[tokio::test]
    async fn public_mode_accepts_anything_offline() {
        let probe = Probe::status(401);
        let g = gate(probe.clone(), AccessMode::Public);
        assert!(g.validate(None).await.is_ok());
        assert!(g.validate(Some(&key())).await.is_ok());
        assert_eq!(probe.calls.load(Ordering::SeqCst), 0);
    }

    #[tokio::test]
    async fn missing_key_fails_without_network() {
        let probe = Probe::status(200);
        let g = gate(probe.clone(), AccessMode::ApiKey);
        assert_eq!(g.validate(None).await, Err(CredentialError::Missing));
        assert_eq!(probe.calls.load(Ordering::SeqCst), 0);
    }

    #[tokio::test]
    async fn valid_key_sends_minimal_probe() {
        let probe = Probe::status(200);
        let g = gate(probe.clone(), AccessMode::ApiKey);
        assert!(g.validate(Some(&key())).await.is_ok());

        let req = probe.last.lock().unwrap().clone().unwrap();
        assert_eq!(req.query_param("query"), Some("test"));
        assert_eq!(req.query_param("page_size"), Some("1"));
        assert_eq!(req.header("X-API-Key"), Some("test_key_123"));
        assert_eq!(req.timeout, Duration::from_secs(10));
    }

    #[tokio::test]
    async fn status_codes_map_to_credential_errors() {
        for (status, expected) in [
            (401, CredentialError::Invalid),
            (403, CredentialError::Forbidden),
            (500, CredentialError::Unavailable(500)),
            (429, CredentialError::Status(429)),
            (418, CredentialError::Status(418)),
        ] {
            let g = gate(Probe::status(status), AccessMode::ApiKey);
            assert_eq!(g.validate(Some(&key())).await, Err(expected), "status {status}");
        }
    }

    #[tokio::test]
    async fn invalid_key_message_points_at_dashboard() {
        let g = gate(Probe::status(401), AccessMode::ApiKey);
        let msg = g.validate(Some(&key())).await.unwrap_err().to_string();
        assert!(msg.contains("Invalid API key"));
        assert!(msg.contains("dashboard/api-keys"));
    }

    #[tokio::test]
    async fn transport_faults_map_to_credential_errors() {
        let g = gate(
            Probe::new(Err(TransportError::Connect("Connection refused".into()))),
            AccessMode::ApiKey,
        );
        let err = g.validate(Some(&key())).await.unwrap_err();
        assert!(err.to_string().contains("Cannot connect"));

        let g = gate(Probe::new(Err(TransportError::Timeout)), AccessMode::ApiKey);
        assert_eq!(g.validate(Some(&key())).await, Err(CredentialError::Timeout));
    }
}
