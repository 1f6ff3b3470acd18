//! Database client and tunnel seams.
//!
//! # Data Flow
//! ```text
//! TargetId (release name)
//!     → TunnelProvider::open (local port forwarded to the deployment)
//!     → GraphDriver::connect (bolt URI + auth)
//!     → GraphConnection::open_session (fixed database)
//!     → GraphSession::run (parametrized cypher → Vec<Record>)
//! ```
//!
//! # Design Decisions
//! - The wire protocol and the tunnel live outside this crate; only traits here
//! - Every handle exposes a synchronous `close` so release can run from `Drop`
//! - Result rows are decoded through typed accessors, absent fields are errors

pub mod driver;
pub mod record;
pub mod target;

pub use driver::{AuthToken, DriverError, GraphConnection, GraphDriver, GraphSession, TunnelProvider};
pub use record::{Params, Record, RecordError};
pub use target::TargetId;
