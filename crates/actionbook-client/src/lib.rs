//! `ab-client`: HTTP client for the Actionbook actions API.
//!
//! Provides the [`HttpTransport`] seam, a production reqwest
//! implementation ([`ReqwestTransport`]), the [`ActionbookClient`] that
//! builds and classifies the two GET requests, and the [`CredentialGate`]
//! used at provider registration.
//!
//! # Endpoints
//!
//! | Operation               | Request                                                    |
//! |-------------------------|------------------------------------------------------------|
//! | `search_actions`        | `GET /api/search_actions?query=&domain=&page_size=`        |
//! | `get_action_by_area_id` | `GET /api/get_action_by_area_id?area_id=`                  |
//!
//! Both send `Accept: text/plain`; `X-API-Key` only when a key is present.
//!
//! # Quick start
//!
//! ```rust,no_run
//! use ab_client::ActionbookClient;
//! use ab_domain::config::ActionbookConfig;
//! use ab_domain::request::{ResultLimit, SearchRequest};
//!
//! # async fn example() -> ab_domain::error::Result<()> {
//! let client = ActionbookClient::new(&ActionbookConfig::default())?;
//! let req = SearchRequest::new("login", Some("github.com"), ResultLimit::default())
//!     .expect("non-empty query");
//!
//! match client.search(&req, None).await {
//!     Ok(outcome) => println!("{outcome}"),
//!     Err(fault) => println!("{}", fault.message()),
//! }
//! # Ok(())
//! # }
//! ```

pub mod client;
pub mod credential;
pub mod rest;
pub mod transport;

// ── Re-exports for ergonomic imports ─────────────────────────────────

pub use client::{
    classify_lookup, classify_search, transport_fault, ActionbookClient, LOOKUP_OPERATION,
    SEARCH_OPERATION,
};
pub use credential::{CredentialError, CredentialGate};
pub use rest::{from_reqwest, ReqwestTransport};
pub use transport::{HttpRequest, HttpResponse, HttpTransport, TransportError};
