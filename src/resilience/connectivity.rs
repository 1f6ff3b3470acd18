//! Connectivity gate.
//!
//! Polls `verify_connectivity` until the target answers or the budget runs
//! out. A credentials-expired rejection counts as reachable: the server is up
//! and mid password rotation.

use std::time::Duration;

use thiserror::Error;

use crate::client::{DriverError, GraphConnection};
use crate::config::ConnectivityConfig;
use crate::observability::metrics;
use crate::resilience::timeouts::Deadline;

/// The target never became reachable.
#[derive(Debug, Error)]
#[error("target unreachable after {elapsed:?} ({attempts} attempts): {last_error}")]
pub struct ConnectivityError {
    pub elapsed: Duration,
    pub attempts: u32,
    #[source]
    pub last_error: DriverError,
}

/// Block until `connection` is reachable.
pub async fn await_connectivity(
    connection: &dyn GraphConnection,
    config: &ConnectivityConfig,
) -> Result<(), ConnectivityError> {
    let deadline = Deadline::after(config.timeout());
    let mut attempts = 0u32;

    loop {
        attempts += 1;
        metrics::record_connectivity_attempt();
        tracing::debug!(attempt = attempts, "Checking connectivity");

        match connection.verify_connectivity().await {
            Ok(()) => return Ok(()),
            Err(e) if e.is_credentials_expired() => {
                tracing::warn!(error = %e, "Received CredentialsExpired from driver, proceeding");
                return Ok(());
            }
            Err(e) => {
                if deadline.exceeded() {
                    return Err(ConnectivityError {
                        elapsed: deadline.elapsed(),
                        attempts,
                        last_error: e,
                    });
                }
                tracing::info!(
                    error = %e,
                    attempt = attempts,
                    retry_in_secs = config.retry_delay_secs,
                    "Connectivity check failed, retrying"
                );
                tokio::time::sleep(config.retry_delay()).await;
            }
        }
    }
}
