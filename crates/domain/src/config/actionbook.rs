use std::time::Duration;

use serde::{Deserialize, Serialize};

// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━
// Actionbook API connection
// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━

/// How the provider treats credentials at registration time.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AccessMode {
    /// An API key is required and checked against the API.
    ApiKey,
    /// Public access: any credential (including none) is accepted without
    /// a network call.
    Public,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ActionbookConfig {
    #[serde(default = "d_base_url")]
    pub base_url: String,
    #[serde(default = "d_search_path")]
    pub search_path: String,
    #[serde(default = "d_lookup_path")]
    pub lookup_path: String,
    /// Header carrying the API key.  Only sent when a key is present.
    #[serde(default = "d_api_key_header")]
    pub api_key_header: String,
    /// Query parameter carrying the result limit on search.
    #[serde(default = "d_limit_param")]
    pub limit_param: String,
    #[serde(default = "d_30")]
    pub tool_timeout_secs: u64,
    #[serde(default = "d_10")]
    pub credential_timeout_secs: u64,
    #[serde(default = "d_access_mode")]
    pub access_mode: AccessMode,
    /// Limit used when the caller's value is absent, non-numeric, or out of range.
    #[serde(default = "d_default_limit")]
    pub default_limit: u32,
    #[serde(default = "d_max_limit")]
    pub max_limit: u32,
    #[serde(default = "d_user_agent")]
    pub user_agent: String,
}

impl Default for ActionbookConfig {
    fn default() -> Self {
        Self {
            base_url: d_base_url(),
            search_path: d_search_path(),
            lookup_path: d_lookup_path(),
            api_key_header: d_api_key_header(),
            limit_param: d_limit_param(),
            tool_timeout_secs: 30,
            credential_timeout_secs: 10,
            access_mode: AccessMode::ApiKey,
            default_limit: 10,
            max_limit: 50,
            user_agent: d_user_agent(),
        }
    }
}

impl ActionbookConfig {
    pub fn tool_timeout(&self) -> Duration {
        Duration::from_secs(self.tool_timeout_secs)
    }

    pub fn credential_timeout(&self) -> Duration {
        Duration::from_secs(self.credential_timeout_secs)
    }

    /// Build the full URL for a path like `/api/search_actions`.
    pub fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url.trim_end_matches('/'), path)
    }
}

// ── serde default helpers ───────────────────────────────────────────

fn d_base_url() -> String {
    "https://api.actionbook.dev".into()
}
fn d_search_path() -> String {
    "/api/search_actions".into()
}
fn d_lookup_path() -> String {
    "/api/get_action_by_area_id".into()
}
fn d_api_key_header() -> String {
    "X-API-Key".into()
}
fn d_limit_param() -> String {
    "page_size".into()
}
fn d_30() -> u64 {
    30
}
fn d_10() -> u64 {
    10
}
fn d_access_mode() -> AccessMode {
    AccessMode::ApiKey
}
fn d_default_limit() -> u32 {
    10
}
fn d_max_limit() -> u32 {
    50
}
fn d_user_agent() -> String {
    concat!("actionbook-plugin/", env!("CARGO_PKG_VERSION")).into()
}
