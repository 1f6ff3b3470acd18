//! Resilience subsystem.
//!
//! # Data Flow
//! ```text
//! Fresh driver connection:
//!     → connectivity.rs (poll verify_connectivity, fixed delay, deadline)
//!     → timeouts.rs (Deadline shared with the reconcile poll loop)
//! ```
//!
//! # Design Decisions
//! - Fixed delay between attempts, no backoff and no jitter
//! - Only the deadline cancels a poll loop
//! - A timeout always carries the last observed error or state

pub mod connectivity;
pub mod timeouts;

pub use connectivity::{await_connectivity, ConnectivityError};
pub use timeouts::Deadline;
