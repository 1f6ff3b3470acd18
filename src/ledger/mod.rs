//! Write/count ledger subsystem.
//!
//! # Data Flow
//! ```text
//! record_write(target)
//!     → CREATE query through the QueryExecutor
//!     → on success only: counter.rs increments the target's counter
//!
//! verify_count(target)
//!     → MATCH (n) RETURN COUNT(n)
//!     → compare with the target's counter at call time
//! ```
//!
//! # Design Decisions
//! - One ledger per process, shared by `Arc` instead of a global map
//! - Per-target counters are created lazily and never removed
//! - No lock spans the write and the increment; a failed write never
//!   touches the counter
//! - Verifying while writes to the same target are in flight is the
//!   caller's race to avoid

pub mod counter;
pub mod writer;

pub use counter::WriteCounters;
pub use writer::{LedgerError, NodeLedger, COUNT_NODES_QUERY, CREATE_NODE_QUERY};
