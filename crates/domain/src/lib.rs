//! `ab-domain`: shared types for the Actionbook tool plugin.
//!
//! Holds everything the client and plugin crates agree on: configuration,
//! validated requests, the host-owned credential, the error and fault
//! taxonomy, the [`OutcomeMessage`](outcome::OutcomeMessage)
//! produced by every tool invocation, and structured trace events.

pub mod config;
pub mod credential;
pub mod error;
pub mod fault;
pub mod outcome;
pub mod request;
pub mod stream;
pub mod tool;
pub mod trace;
