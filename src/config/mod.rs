//! Harness settings subsystem.
//!
//! # Data Flow
//! ```text
//! settings file (TOML)
//!     → loader.rs (parse & deserialize)
//!     → validation.rs (semantic checks)
//!     → HarnessConfig (validated, immutable)
//!     → shared via Arc with the query executor and the reconciler
//! ```
//!
//! # Design Decisions
//! - Settings are immutable once loaded
//! - All fields have defaults so an empty file works
//! - Validation separates syntactic (serde) from semantic checks
//!
//! This is the harness's own configuration. The database configuration that
//! gets verified lives in [`crate::dbconf`].

pub mod loader;
pub mod schema;
pub mod validation;

pub use loader::{load_config, parse_config, ConfigError};
pub use schema::{ConnectionConfig, ConnectivityConfig, HarnessConfig, ObservabilityConfig, ReconcileConfig};
