//! Tracked writes and count verification.

use std::sync::Arc;

use serde_json::json;
use thiserror::Error;

use crate::client::{Params, TargetId};
use crate::ledger::counter::WriteCounters;
use crate::observability::metrics;
use crate::query::{QueryError, QueryExecutor};

/// Creates one `Item` node per call.
pub const CREATE_NODE_QUERY: &str = "CREATE (n:Item { id: $id, name: $name }) RETURN n.id, n.name";

/// Counts every node in the database.
pub const COUNT_NODES_QUERY: &str = "MATCH (n) RETURN COUNT(n) AS count";

/// Errors from ledger operations.
#[derive(Debug, Error)]
pub enum LedgerError {
    #[error(transparent)]
    Query(#[from] QueryError),

    #[error("expected at least one result with a 'count' field from {target}")]
    EmptyResult { target: TargetId },

    #[error("node count mismatch on {target}: ledger has {expected}, server reports {actual}")]
    CountMismatch {
        target: TargetId,
        expected: i64,
        actual: i64,
    },
}

/// Issues tracked writes and checks the server's node count against them.
#[derive(Debug, Clone)]
pub struct NodeLedger {
    executor: Arc<QueryExecutor>,
    counters: WriteCounters,
}

impl NodeLedger {
    pub fn new(executor: Arc<QueryExecutor>) -> Self {
        Self {
            executor,
            counters: WriteCounters::new(),
        }
    }

    /// Writes confirmed so far for `target`.
    pub fn confirmed_writes(&self, target: &TargetId) -> i64 {
        self.counters.get(target)
    }

    /// Create a node on `target`; counted only once the server confirms it.
    pub async fn record_write(&self, target: &TargetId) -> Result<(), LedgerError> {
        let mut params = Params::new();
        params.insert("id".to_string(), json!(1));
        params.insert("name".to_string(), json!("Item 1"));

        self.executor
            .run_query(target, CREATE_NODE_QUERY, &params)
            .await?;

        let total = self.counters.increment(target);
        metrics::record_confirmed_write(target.as_str());
        tracing::debug!(target_id = %target, total, "Recorded confirmed write");
        Ok(())
    }

    /// Check that the server's node count equals the confirmed writes.
    pub async fn verify_count(&self, target: &TargetId) -> Result<(), LedgerError> {
        let records = self
            .executor
            .run_query(target, COUNT_NODES_QUERY, &Params::new())
            .await?;

        let actual = records
            .first()
            .and_then(|record| record.get_i64("count").ok())
            .ok_or_else(|| LedgerError::EmptyResult {
                target: target.clone(),
            })?;

        let expected = self.counters.get(target);
        if expected != actual {
            tracing::error!(target_id = %target, expected, actual, "Node count mismatch");
            return Err(LedgerError::CountMismatch {
                target: target.clone(),
                expected,
                actual,
            });
        }

        tracing::info!(target_id = %target, count = actual, "Node count verified");
        Ok(())
    }
}
