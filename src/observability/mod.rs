//! Observability subsystem.
//!
//! # Data Flow
//! ```text
//! Poll loops, query executor, ledger:
//!     → logging.rs (structured tracing events)
//!     → metrics.rs (counters via the `metrics` facade)
//!
//! Consumers:
//!     → test output (fmt or JSON lines)
//!     → whatever metrics recorder the embedding harness installs
//! ```
//!
//! # Design Decisions
//! - Structured fields (target, attempt, counts) rather than formatted strings
//! - Metrics are no-ops until a recorder is installed

pub mod logging;
pub mod metrics;
