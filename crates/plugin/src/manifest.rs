//! Provider manifest: what the host needs to register the plugin.

use serde::{Deserialize, Serialize};

use ab_domain::config::AccessMode;
use ab_domain::credential::CREDENTIAL_KEY;
use ab_domain::tool::ToolDefinition;

pub const PROVIDER_NAME: &str = "actionbook";

/// One credential field the host should prompt for.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CredentialField {
    pub name: String,
    #[serde(rename = "type")]
    pub kind: String,
    pub required: bool,
    pub label: String,
    pub help: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub url: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProviderManifest {
    pub name: String,
    pub version: String,
    pub description: String,
    pub credentials_schema: Vec<CredentialField>,
    pub tools: Vec<ToolDefinition>,
}

impl ProviderManifest {
    /// Build the manifest.  The API key is required only in
    /// [`AccessMode::ApiKey`].
    pub fn new(mode: AccessMode, tools: Vec<ToolDefinition>) -> Self {
        Self {
            name: PROVIDER_NAME.into(),
            version: env!("CARGO_PKG_VERSION").into(),
            description: "Search and retrieve verified website actions (selectors, \
                          element types, allowed methods) from Actionbook."
                .into(),
            credentials_schema: vec![CredentialField {
                name: CREDENTIAL_KEY.into(),
                kind: "secret-input".into(),
                required: mode == AccessMode::ApiKey,
                label: "Actionbook API Key".into(),
                help: "Get your API key from the Actionbook dashboard.".into(),
                url: Some("https://actionbook.dev/dashboard/api-keys".into()),
            }],
            tools,
        }
    }

    pub fn to_yaml(&self) -> Result<String, serde_yaml::Error> {
        serde_yaml::to_string(self)
    }
}
