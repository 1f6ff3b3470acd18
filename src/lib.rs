//! Conformance checks for a deployed graph database.
//!
//! Two independent checks run against a named deployment (a [`TargetId`]):
//!
//! - [`ConfigReconciler`] waits for the server's effective configuration to
//!   settle and compares it with an expected `neo4j.conf` plus the values the
//!   deployment always forces.
//! - [`NodeLedger`] issues tracked writes and later checks that the server's
//!   node count matches the writes it confirmed.
//!
//! Both sit on [`QueryExecutor`], which opens a fresh tunnel, connection and
//! session per query and always releases them. The tunnel and the bolt client
//! are supplied by the caller through the traits in [`client`].

pub mod client;
pub mod config;
pub mod dbconf;
pub mod ledger;
pub mod observability;
pub mod query;
pub mod reconcile;
pub mod resilience;

pub use client::TargetId;
pub use config::HarnessConfig;
pub use dbconf::{DbmsConfiguration, OverrideSet};
pub use ledger::NodeLedger;
pub use query::QueryExecutor;
pub use reconcile::ConfigReconciler;
