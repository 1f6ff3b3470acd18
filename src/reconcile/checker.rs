//! Config reconciler.

use std::path::Path;
use std::sync::Arc;
use std::time::Duration;

use thiserror::Error;

use crate::client::{Params, Record, RecordError, TargetId};
use crate::config::{HarnessConfig, ReconcileConfig};
use crate::dbconf::{DbConfError, DbmsConfiguration, OverrideSet, JVM_ADDITIONAL_KEY};
use crate::observability::metrics;
use crate::query::{QueryError, QueryExecutor};
use crate::reconcile::entry::ConfigEntry;
use crate::reconcile::report::{CheckReport, Mismatch};
use crate::resilience::Deadline;

/// Introspection query listing the effective server configuration.
pub const LIST_CONFIG_QUERY: &str = "CALL dbms.listConfig() YIELD name, value";

/// Errors raised while checking a target's configuration.
#[derive(Debug, Error)]
pub enum ReconcileError {
    #[error("failed to load expected configuration: {0}")]
    Load(#[from] DbConfError),

    #[error(transparent)]
    Query(#[from] QueryError),

    #[error("timed out fetching config after {elapsed:?}: observed {observed} entries, expected at least {expected}")]
    TimedOut {
        observed: usize,
        expected: usize,
        elapsed: Duration,
    },

    #[error("malformed listConfig record: {0}")]
    Record(#[from] RecordError),

    #[error("{} configuration mismatch(es) on {target}: {}", .mismatches.len(), join_mismatches(.mismatches))]
    Mismatch {
        target: TargetId,
        mismatches: Vec<Mismatch>,
    },
}

fn join_mismatches(mismatches: &[Mismatch]) -> String {
    mismatches
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join("; ")
}

impl CheckReport {
    /// Turn recorded mismatches into an error.
    pub fn into_result(self) -> Result<CheckReport, ReconcileError> {
        if self.passed() {
            Ok(self)
        } else {
            Err(ReconcileError::Mismatch {
                target: self.target,
                mismatches: self.mismatches,
            })
        }
    }
}

/// Compares a target's live configuration with an expected file.
#[derive(Debug, Clone)]
pub struct ConfigReconciler {
    executor: Arc<QueryExecutor>,
    overrides: OverrideSet,
    settings: ReconcileConfig,
}

impl ConfigReconciler {
    pub fn new(executor: Arc<QueryExecutor>, config: &HarnessConfig) -> Self {
        Self {
            executor,
            overrides: config.overrides.to_override_set(),
            settings: config.reconcile.clone(),
        }
    }

    /// Check `target` against the configuration file at `expected_path`.
    ///
    /// Fails on the first load, query or timeout error. Value mismatches are
    /// all collected before failing with [`ReconcileError::Mismatch`].
    pub async fn check_configuration(
        &self,
        target: &TargetId,
        expected_path: &Path,
    ) -> Result<CheckReport, ReconcileError> {
        let expected = DbmsConfiguration::load(expected_path)?;
        self.collect_report(target, &expected).await?.into_result()
    }

    /// Compare `target` against `expected` and return every comparison made,
    /// passing or not.
    pub async fn collect_report(
        &self,
        target: &TargetId,
        expected: &DbmsConfiguration,
    ) -> Result<CheckReport, ReconcileError> {
        // The count the poll waits for is taken before overrides add keys.
        let observed = self.await_observations(target, expected.len()).await?;
        let expected = expected.with_overrides(&self.overrides);

        let mut report = CheckReport::new(target.clone());
        for record in &observed {
            let entry = ConfigEntry::try_from(record)?;
            compare_entry(&entry, &expected, &mut report);
        }

        tracing::info!(
            target_id = %target,
            observed = observed.len(),
            checked = report.checked,
            mismatches = report.mismatches.len(),
            "Configuration check finished"
        );
        Ok(report)
    }

    /// Poll the introspection query until at least `expected_count` entries
    /// come back or the deadline passes.
    async fn await_observations(
        &self,
        target: &TargetId,
        expected_count: usize,
    ) -> Result<Vec<Record>, ReconcileError> {
        let deadline = Deadline::after(self.settings.timeout());
        let poll_delay = self.settings.poll_delay();
        let params = Params::new();
        let mut observed = 0usize;

        loop {
            if deadline.reached() {
                return Err(ReconcileError::TimedOut {
                    observed,
                    expected: expected_count,
                    elapsed: deadline.elapsed(),
                });
            }

            metrics::record_config_poll();
            let records = self
                .executor
                .run_query(target, LIST_CONFIG_QUERY, &params)
                .await?;
            if records.len() >= expected_count {
                return Ok(records);
            }

            observed = records.len();
            tracing::debug!(
                target_id = %target,
                observed,
                expected = expected_count,
                "Live configuration not settled yet"
            );
            if poll_delay.is_zero() {
                tokio::task::yield_now().await;
            } else {
                tokio::time::sleep(poll_delay).await;
            }
        }
    }
}

fn compare_entry(entry: &ConfigEntry, expected: &DbmsConfiguration, report: &mut CheckReport) {
    if let Some(expected_value) = expected.get(&entry.name) {
        report.check_scalar(&entry.name, expected_value, &entry.value);
    }
    if entry.name == JVM_ADDITIONAL_KEY {
        let actual: Vec<&str> = entry.value.split('\n').collect();
        report.check_sequence(&entry.name, &expected.jvm_additional, &actual);
    }
}
