//! HTTP server for the credit wallet system.
//!
//! Exposes account creation and wallet operations over a REST API backed by
//! the [`credit_wallet`] crate. See [`api`] for the endpoint catalog.

pub mod api;
pub mod config;
pub mod logging;
pub mod metrics;
