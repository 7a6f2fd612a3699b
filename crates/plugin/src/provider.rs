//! `ActionbookProvider`: the host-facing entry point.
//!
//! The host registers the provider once (credential check), then invokes
//! tools any number of times.  Every invocation returns an
//! [`OutcomeStream`] of exactly one message.

use std::collections::HashMap;

use ab_client::{
    ActionbookClient, CredentialError, CredentialGate, LOOKUP_OPERATION, SEARCH_OPERATION,
};
use ab_domain::config::ActionbookConfig;
use ab_domain::credential::Credential;
use ab_domain::error::Result;
use ab_domain::stream::OutcomeStream;

use crate::boundary::guarded;
use crate::manifest::ProviderManifest;
use crate::registry::ToolRegistry;
use crate::tools::{GetActionByAreaIdTool, SearchActionsTool};
use crate::types::ToolContext;
use crate::validate;

#[derive(Debug, Clone)]
pub struct ActionbookProvider {
    client: ActionbookClient,
    gate: CredentialGate,
}

impl ActionbookProvider {
    /// Provider backed by the default reqwest transport.
    pub fn new(cfg: &ActionbookConfig) -> Result<Self> {
        Ok(Self::with_client(ActionbookClient::new(cfg)?))
    }

    /// Provider over an existing client (custom transport in tests).
    pub fn with_client(client: ActionbookClient) -> Self {
        let gate = CredentialGate::new(client.clone(), client.config().access_mode);
        Self { client, gate }
    }

    pub fn config(&self) -> &ActionbookConfig {
        self.client.config()
    }

    // ── registration ─────────────────────────────────────────────────

    /// Check the host's credential map once at registration time.
    pub async fn validate_credentials(
        &self,
        credentials: &HashMap<String, String>,
    ) -> std::result::Result<(), CredentialError> {
        self.gate.validate(Credential::from_map(credentials).as_ref()).await
    }

    pub fn manifest(&self) -> ProviderManifest {
        ProviderManifest::new(self.config().access_mode, self.tools(None).definitions())
    }

    // ── tools ────────────────────────────────────────────────────────

    /// Both tools bound to `credential`.
    pub fn tools(&self, credential: Option<Credential>) -> ToolRegistry {
        let mut reg = ToolRegistry::new();
        reg.register(SearchActionsTool::new(self.client.clone(), credential.clone()))
            .register(GetActionByAreaIdTool::new(self.client.clone(), credential));
        reg
    }

    /// Both tools bound to the API key found in the host's credential map.
    pub fn from_credentials(&self, credentials: &HashMap<String, String>) -> ToolRegistry {
        self.tools(Credential::from_map(credentials))
    }

    /// Typed `search_actions`.  Validation runs inside the stream, so an
    /// invalid query still arrives as one message when polled.
    pub fn search(
        &self,
        credential: Option<&Credential>,
        query: &str,
        domain: Option<&str>,
        limit: Option<i64>,
    ) -> OutcomeStream {
        let client = self.client.clone();
        let credential = credential.cloned();
        let query = query.to_owned();
        let domain = domain.map(str::to_owned);

        guarded(ToolContext::new(SEARCH_OPERATION), async move {
            let req = validate::search(&query, domain.as_deref(), limit, client.config())?;
            client.search(&req, credential.as_ref()).await
        })
    }

    /// Typed `get_action_by_area_id`.
    pub fn lookup(&self, credential: Option<&Credential>, area_id: &str) -> OutcomeStream {
        let client = self.client.clone();
        let credential = credential.cloned();
        let area_id = area_id.to_owned();

        guarded(ToolContext::new(LOOKUP_OPERATION), async move {
            let req = validate::lookup(&area_id)?;
            client.lookup(&req, credential.as_ref()).await
        })
    }
}
