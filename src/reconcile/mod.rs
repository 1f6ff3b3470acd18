//! Configuration reconciliation subsystem.
//!
//! # Data Flow
//! ```text
//! expected neo4j.conf
//!     → dbconf::DbmsConfiguration::load
//!     → checker.rs: poll `dbms.listConfig()` until enough entries show up
//!     → apply deployment overrides (override wins)
//!     → compare every observed entry (entry.rs decodes rows)
//!     → report.rs: mismatches recorded, checking continues
//! ```
//!
//! # Design Decisions
//! - The poll stops on entry *count*, not on the presence of specific keys
//! - Scalar values compare case-insensitively; JVM arguments compare exactly, in order
//! - Observed keys the file does not declare are ignored

pub mod checker;
pub mod entry;
pub mod report;

pub use checker::{ConfigReconciler, ReconcileError, LIST_CONFIG_QUERY};
pub use entry::ConfigEntry;
pub use report::{CheckReport, Mismatch};
