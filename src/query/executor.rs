//! Query executor.

use std::sync::Arc;

use thiserror::Error;
use url::Url;

use crate::client::{DriverError, GraphDriver, Params, Record, TargetId, TunnelProvider};
use crate::config::{ConnectionConfig, ConnectivityConfig, HarnessConfig};
use crate::observability::metrics;
use crate::query::scoped::{ConnectionGuard, SessionGuard, TunnelGuard};
use crate::resilience::{await_connectivity, ConnectivityError};

/// Errors from a single query round trip.
#[derive(Debug, Error)]
pub enum QueryError {
    #[error("failed to open tunnel: {0}")]
    Tunnel(#[source] DriverError),

    #[error("invalid bolt URI: {0}")]
    Uri(#[from] url::ParseError),

    #[error("failed to create driver: {0}")]
    Connect(#[source] DriverError),

    #[error(transparent)]
    Connectivity(#[from] ConnectivityError),

    #[error("failed to open session: {0}")]
    Session(#[source] DriverError),

    #[error("query failed: {0}")]
    Query(#[source] DriverError),
}

impl QueryError {
    /// The driver error behind this failure, if any.
    pub fn driver_error(&self) -> Option<&DriverError> {
        match self {
            QueryError::Tunnel(e)
            | QueryError::Connect(e)
            | QueryError::Session(e)
            | QueryError::Query(e) => Some(e),
            QueryError::Connectivity(e) => Some(&e.last_error),
            QueryError::Uri(_) => None,
        }
    }
}

/// Runs cypher against a target through a fresh tunnel, connection and session.
#[derive(Clone)]
pub struct QueryExecutor {
    tunnels: Arc<dyn TunnelProvider>,
    driver: Arc<dyn GraphDriver>,
    connection: ConnectionConfig,
    connectivity: ConnectivityConfig,
}

impl QueryExecutor {
    pub fn new(
        tunnels: Arc<dyn TunnelProvider>,
        driver: Arc<dyn GraphDriver>,
        config: &HarnessConfig,
    ) -> Self {
        Self {
            tunnels,
            driver,
            connection: config.connection.clone(),
            connectivity: config.connectivity.clone(),
        }
    }

    /// URI for a tunnel listening on `port`.
    pub fn bolt_uri(&self, port: u16) -> Result<Url, url::ParseError> {
        Url::parse(&format!(
            "{}://{}:{}",
            self.connection.scheme, self.connection.host, port
        ))
    }

    /// Execute `cypher` with `params` and collect every record.
    pub async fn run_query(
        &self,
        target: &TargetId,
        cypher: &str,
        params: &Params,
    ) -> Result<Vec<Record>, QueryError> {
        let result = self.execute(target, cypher, params).await;
        metrics::record_query(result.is_ok());
        match &result {
            Ok(records) => {
                tracing::debug!(target_id = %target, cypher, records = records.len(), "Query completed")
            }
            Err(e) => tracing::warn!(target_id = %target, cypher, error = %e, "Query failed"),
        }
        result
    }

    async fn execute(
        &self,
        target: &TargetId,
        cypher: &str,
        params: &Params,
    ) -> Result<Vec<Record>, QueryError> {
        let tunnel = TunnelGuard::new(self.tunnels.as_ref(), target);
        let port = tunnel.open().await.map_err(QueryError::Tunnel)?;

        let uri = self.bolt_uri(port)?;
        let connection = ConnectionGuard::new(
            self.driver
                .connect(uri.as_str(), &self.connection.auth())
                .await
                .map_err(QueryError::Connect)?,
        );

        await_connectivity(&*connection, &self.connectivity).await?;

        let mut session = SessionGuard::new(
            connection
                .open_session(&self.connection.database)
                .await
                .map_err(QueryError::Session)?,
        );

        let records = session
            .run(cypher, params)
            .await
            .map_err(QueryError::Query)?;
        Ok(records)
    }
}

impl std::fmt::Debug for QueryExecutor {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("QueryExecutor")
            .field("scheme", &self.connection.scheme)
            .field("host", &self.connection.host)
            .field("database", &self.connection.database)
            .finish()
    }
}
