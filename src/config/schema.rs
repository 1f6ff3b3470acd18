//! Harness settings schema.
//!
//! All types derive Serde traits for deserialization from a TOML file and
//! every section has defaults, so an empty file is a valid configuration.

use std::collections::BTreeMap;
use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::client::AuthToken;
use crate::dbconf::OverrideSet;

/// Root settings for the conformance harness.
#[derive(Debug, Clone, Deserialize, Serialize, Default)]
#[serde(default)]
pub struct HarnessConfig {
    /// How to reach a target once its tunnel is open.
    pub connection: ConnectionConfig,

    /// Connectivity gate polling.
    pub connectivity: ConnectivityConfig,

    /// Configuration convergence polling.
    pub reconcile: ReconcileConfig,

    /// Values forced by the deployment, applied over the expected file.
    pub overrides: OverridesConfig,

    /// Logging settings.
    pub observability: ObservabilityConfig,
}

/// Connection settings.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct ConnectionConfig {
    /// URI scheme (`neo4j+ssc` accepts self-signed certificates).
    pub scheme: String,

    /// Host the tunnel listens on.
    pub host: String,

    pub user: String,

    pub password: String,

    /// Database every session is bound to.
    pub database: String,
}

impl ConnectionConfig {
    pub fn auth(&self) -> AuthToken {
        AuthToken::basic(&self.user, &self.password)
    }
}

impl Default for ConnectionConfig {
    fn default() -> Self {
        Self {
            scheme: "neo4j+ssc".to_string(),
            host: "localhost".to_string(),
            user: "neo4j".to_string(),
            password: String::new(),
            database: "neo4j".to_string(),
        }
    }
}

/// Connectivity gate settings.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct ConnectivityConfig {
    /// Give up after this many seconds.
    pub timeout_secs: u64,

    /// Fixed delay between attempts in seconds.
    pub retry_delay_secs: u64,
}

impl ConnectivityConfig {
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }

    pub fn retry_delay(&self) -> Duration {
        Duration::from_secs(self.retry_delay_secs)
    }
}

impl Default for ConnectivityConfig {
    fn default() -> Self {
        Self {
            timeout_secs: 180,
            retry_delay_secs: 5,
        }
    }
}

/// Configuration convergence settings.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct ReconcileConfig {
    /// Overall deadline for the live configuration to show up.
    pub timeout_secs: u64,

    /// Pause between introspection queries in milliseconds (0 = back to back).
    pub poll_delay_ms: u64,
}

impl ReconcileConfig {
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }

    pub fn poll_delay(&self) -> Duration {
        Duration::from_millis(self.poll_delay_ms)
    }
}

impl Default for ReconcileConfig {
    fn default() -> Self {
        Self {
            timeout_secs: 180,
            poll_delay_ms: 0,
        }
    }
}

/// Override set as it appears in the settings file.
#[derive(Debug, Clone, Deserialize, Serialize, PartialEq, Eq)]
#[serde(transparent)]
pub struct OverridesConfig(pub BTreeMap<String, String>);

impl OverridesConfig {
    pub fn to_override_set(&self) -> OverrideSet {
        OverrideSet::from(self.0.clone())
    }
}

impl Default for OverridesConfig {
    fn default() -> Self {
        Self(
            OverrideSet::deployment_defaults()
                .iter()
                .map(|(k, v)| (k.to_string(), v.to_string()))
                .collect(),
        )
    }
}

/// Observability configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct ObservabilityConfig {
    /// Log level (trace, debug, info, warn, error).
    pub log_level: String,

    /// Emit JSON lines instead of human readable output.
    pub json: bool,
}

impl Default for ObservabilityConfig {
    fn default() -> Self {
        Self {
            log_level: "info".to_string(),
            json: false,
        }
    }
}
