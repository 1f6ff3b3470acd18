//! Query execution subsystem.
//!
//! # Data Flow
//! ```text
//! run_query(target, cypher, params)
//!     → TunnelGuard::open          (local port)
//!     → GraphDriver::connect       (ConnectionGuard)
//!     → await_connectivity         (resilience gate)
//!     → open_session(database)     (SessionGuard)
//!     → GraphSession::run          (records collected eagerly)
//!     ← guards drop: session, connection, tunnel
//! ```
//!
//! # Design Decisions
//! - Nothing is pooled: every query gets its own tunnel, connection and session
//! - Release is tied to `Drop`, so it also runs on early return and unwinding
//! - No retries here; only the connectivity gate polls

pub mod executor;
pub mod scoped;

pub use executor::{QueryError, QueryExecutor};
