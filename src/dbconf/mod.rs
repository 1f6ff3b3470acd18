//! Expected database configuration.
//!
//! # Data Flow
//! ```text
//! neo4j.conf (key=value, shadowed dbms.jvm.additional lines)
//!     → loader.rs (parse, split out JVM arguments)
//!     → DbmsConfiguration (entries + ordered jvm_additional)
//!     → model.rs merge / with_overrides (right-biased, shallow)
//!     → reconcile subsystem compares against the live server
//! ```
//!
//! # Design Decisions
//! - `dbms.jvm.additional` is never present in `entries` once loaded
//! - Merging never mutates either input; a new value is returned
//! - JVM arguments are replaced all-or-nothing by a non-empty override

pub mod loader;
pub mod model;

pub use loader::DbConfError;
pub use model::{DbmsConfiguration, OverrideSet, JVM_ADDITIONAL_KEY};
