//! `ab-plugin`: the Actionbook tool plugin.
//!
//! Exposes two tools to an LLM orchestration host, `search_actions` and
//! `get_action_by_area_id`, plus the credential check the host runs when the
//! provider is registered.
//!
//! # Architecture
//!
//! ```text
//! ┌──────────────────────────────────────────────────────────────┐
//! │  Host                                                        │
//! │                                                              │
//! │   let provider = ActionbookProvider::new(&cfg.actionbook)?;  │
//! │   provider.validate_credentials(&creds).await?;  // once     │
//! │                                                              │
//! │   let tools = provider.from_credentials(&creds);             │
//! │   let mut out = tools.invoke("search_actions", args);        │
//! │   let msg = out.next().await;            // exactly one item │
//! └──────────────────────────────────────────────────────────────┘
//!            │ validate (no network on bad input)
//!            ▼
//!     ab_client::ActionbookClient ── one GET ──▶ Actionbook API
//!            │ Result<OutcomeMessage, Fault>
//!            ▼
//!     boundary::guarded (catch_unwind + cancellation) ──▶ OutcomeStream
//! ```
//!
//! # Delivery
//!
//! Every failure (bad input, HTTP status, network fault, panic, host
//! cancellation) is delivered as a single [`OutcomeMessage`] starting with
//! `Error:`.  Invocations never fail the caller.

pub mod boundary;
pub mod extract;
pub mod manifest;
pub mod provider;
pub mod registry;
pub mod telemetry;
pub mod tools;
pub mod types;
pub mod validate;

// ── Re-exports for ergonomic imports ─────────────────────────────────

pub use boundary::{guarded, SystemSignal};
pub use extract::{extract_area_ids, first_area_id};
pub use manifest::{CredentialField, ProviderManifest};
pub use provider::ActionbookProvider;
pub use registry::{PluginTool, ToolRegistry};
pub use telemetry::init_tracing;
pub use types::{ToolContext, ToolResult};

// Re-export the types hosts touch so they never need ab-domain directly.
pub use ab_client::CredentialError;
pub use ab_domain::config::{AccessMode, ActionbookConfig, Config};
pub use ab_domain::credential::{Credential, CREDENTIAL_KEY};
pub use ab_domain::fault::Fault;
pub use ab_domain::outcome::{OutcomeKind, OutcomeMessage};
pub use ab_domain::stream::OutcomeStream;
