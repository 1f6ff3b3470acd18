//! In-memory stand-ins for the tunnel and the bolt client.
//!
//! A `FakeCluster` holds one `FakeServer` per target. The tunnel maps a
//! target to a fixed local port and the driver maps the port in the URI
//! back to the server, so queries for different targets never mix.

#![allow(dead_code)]

use std::collections::HashMap;
use std::sync::atomic::{AtomicBool, AtomicI64, AtomicU32, Ordering};
use std::sync::{Arc, Mutex};
use std::time::Duration;

use async_trait::async_trait;
use serde_json::json;

use graph_conformance::client::{
    AuthToken, DriverError, GraphConnection, GraphDriver, GraphSession, Params, Record, TargetId,
    TunnelProvider,
};
use graph_conformance::config::HarnessConfig;
use graph_conformance::ledger::{COUNT_NODES_QUERY, CREATE_NODE_QUERY};
use graph_conformance::reconcile::LIST_CONFIG_QUERY;
use graph_conformance::QueryExecutor;

/// Ordered record of resource acquisition and release.
#[derive(Debug, Default)]
pub struct EventLog(Mutex<Vec<String>>);

impl EventLog {
    pub fn push(&self, event: impl Into<String>) {
        self.0.lock().unwrap().push(event.into());
    }

    pub fn events(&self) -> Vec<String> {
        self.0.lock().unwrap().clone()
    }

    pub fn clear(&self) {
        self.0.lock().unwrap().clear();
    }
}

/// One simulated database deployment.
#[derive(Debug, Default)]
pub struct FakeServer {
    /// Rows returned by `dbms.listConfig()` once settled.
    pub live_config: Mutex<Vec<(String, String)>>,
    /// Number of listConfig polls answered with an empty list first.
    pub settle_after_polls: AtomicU32,
    pub config_polls: AtomicU32,
    /// Number of connectivity checks refused before the server answers.
    pub unreachable_checks: AtomicU32,
    /// Reply to connectivity checks with CredentialsExpired instead of success.
    pub credentials_expired: AtomicBool,
    /// Nodes actually created.
    pub nodes: AtomicI64,
    /// Replace the COUNT reply with these rows.
    pub count_reply: Mutex<Option<Vec<Record>>>,
    /// Fail every query with a server error.
    pub fail_queries: AtomicBool,
    /// Simulated per-query latency in milliseconds.
    pub latency_ms: AtomicU32,
}

impl FakeServer {
    pub fn set_live_config(&self, rows: &[(&str, &str)]) {
        *self.live_config.lock().unwrap() = rows
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
    }

    fn list_config(&self) -> Vec<Record> {
        let poll = self.config_polls.fetch_add(1, Ordering::SeqCst);
        if poll < self.settle_after_polls.load(Ordering::SeqCst) {
            return Vec::new();
        }
        self.live_config
            .lock()
            .unwrap()
            .iter()
            .map(|(name, value)| Record::new([("name", json!(name)), ("value", json!(value))]))
            .collect()
    }

    fn count(&self) -> Vec<Record> {
        if let Some(reply) = self.count_reply.lock().unwrap().clone() {
            return reply;
        }
        vec![Record::new([("count", json!(self.nodes.load(Ordering::SeqCst)))])]
    }

    fn create(&self, params: &Params) -> Vec<Record> {
        self.nodes.fetch_add(1, Ordering::SeqCst);
        vec![Record::new([
            ("n.id", params.get("id").cloned().unwrap_or_default()),
            ("n.name", params.get("name").cloned().unwrap_or_default()),
        ])]
    }
}

/// Servers plus the tunnel and driver that reach them.
pub struct FakeCluster {
    servers: HashMap<TargetId, (u16, Arc<FakeServer>)>,
    pub events: Arc<EventLog>,
    pub tunnel_failures: Arc<AtomicU32>,
    pub tunnels_closed: Arc<AtomicU32>,
}

impl FakeCluster {
    pub fn new(targets: &[&str]) -> Self {
        let servers = targets
            .iter()
            .enumerate()
            .map(|(i, name)| {
                (
                    TargetId::new(*name),
                    (7687 + i as u16, Arc::new(FakeServer::default())),
                )
            })
            .collect();
        Self {
            servers,
            events: Arc::new(EventLog::default()),
            tunnel_failures: Arc::new(AtomicU32::new(0)),
            tunnels_closed: Arc::new(AtomicU32::new(0)),
        }
    }

    pub fn server(&self, target: &str) -> Arc<FakeServer> {
        self.servers[&TargetId::new(target)].1.clone()
    }

    /// Make the next `n` tunnel opens fail.
    pub fn fail_next_tunnels(&self, n: u32) {
        self.tunnel_failures.store(n, Ordering::SeqCst);
    }

    pub fn executor(&self, config: &HarnessConfig) -> Arc<QueryExecutor> {
        let tunnels = FakeTunnels {
            ports: self
                .servers
                .iter()
                .map(|(target, (port, _))| (target.clone(), *port))
                .collect(),
            failures: self.tunnel_failures.clone(),
            closed: self.tunnels_closed.clone(),
            events: self.events.clone(),
        };
        let driver = FakeDriver {
            servers: self
                .servers
                .values()
                .map(|(port, server)| (*port, server.clone()))
                .collect(),
            events: self.events.clone(),
        };
        Arc::new(QueryExecutor::new(Arc::new(tunnels), Arc::new(driver), config))
    }
}

/// Default harness settings with a password set.
pub fn test_config() -> HarnessConfig {
    let mut config = HarnessConfig::default();
    config.connection.password = "test".to_string();
    config
}

struct FakeTunnels {
    ports: HashMap<TargetId, u16>,
    failures: Arc<AtomicU32>,
    closed: Arc<AtomicU32>,
    events: Arc<EventLog>,
}

#[async_trait]
impl TunnelProvider for FakeTunnels {
    async fn open(&self, target: &TargetId) -> Result<u16, DriverError> {
        let failing = self
            .failures
            .fetch_update(Ordering::SeqCst, Ordering::SeqCst, |n| n.checked_sub(1))
            .is_ok();
        if failing {
            self.events.push("tunnel.open.failed");
            return Err(DriverError::transport("port-forward: connection refused"));
        }
        let port = *self
            .ports
            .get(target)
            .ok_or_else(|| DriverError::transport(format!("no such release {target}")))?;
        self.events.push("tunnel.open");
        Ok(port)
    }

    fn close(&self, _target: &TargetId) {
        self.closed.fetch_add(1, Ordering::SeqCst);
        self.events.push("tunnel.close");
    }
}

struct FakeDriver {
    servers: HashMap<u16, Arc<FakeServer>>,
    events: Arc<EventLog>,
}

#[async_trait]
impl GraphDriver for FakeDriver {
    async fn connect(
        &self,
        uri: &str,
        _auth: &AuthToken,
    ) -> Result<Box<dyn GraphConnection>, DriverError> {
        let port = url::Url::parse(uri)
            .ok()
            .and_then(|url| url.port())
            .ok_or_else(|| DriverError::transport(format!("bad uri {uri}")))?;
        let server = self
            .servers
            .get(&port)
            .cloned()
            .ok_or_else(|| DriverError::transport(format!("nothing listening on {port}")))?;
        self.events.push("connection.open");
        Ok(Box::new(FakeConnection {
            server,
            events: self.events.clone(),
        }))
    }
}

struct FakeConnection {
    server: Arc<FakeServer>,
    events: Arc<EventLog>,
}

#[async_trait]
impl GraphConnection for FakeConnection {
    async fn verify_connectivity(&self) -> Result<(), DriverError> {
        let refusing = self
            .server
            .unreachable_checks
            .fetch_update(Ordering::SeqCst, Ordering::SeqCst, |n| n.checked_sub(1))
            .is_ok();
        if refusing {
            return Err(DriverError::transport("connection refused"));
        }
        if self.server.credentials_expired.load(Ordering::SeqCst) {
            return Err(DriverError::server(
                "Neo.ClientError.Security.CredentialsExpired",
                "The credentials you provided were valid, but must be changed before you can use this instance.",
            ));
        }
        Ok(())
    }

    async fn open_session(&self, _database: &str) -> Result<Box<dyn GraphSession>, DriverError> {
        self.events.push("session.open");
        Ok(Box::new(FakeSession {
            server: self.server.clone(),
            events: self.events.clone(),
        }))
    }

    fn close(&mut self) {
        self.events.push("connection.close");
    }
}

struct FakeSession {
    server: Arc<FakeServer>,
    events: Arc<EventLog>,
}

#[async_trait]
impl GraphSession for FakeSession {
    async fn run(&mut self, cypher: &str, params: &Params) -> Result<Vec<Record>, DriverError> {
        let latency = self.server.latency_ms.load(Ordering::SeqCst);
        if latency > 0 {
            tokio::time::sleep(Duration::from_millis(u64::from(latency))).await;
        }
        if self.server.fail_queries.load(Ordering::SeqCst) {
            return Err(DriverError::server(
                "Neo.ClientError.Statement.SyntaxError",
                "invalid input",
            ));
        }
        match cypher {
            LIST_CONFIG_QUERY => Ok(self.server.list_config()),
            COUNT_NODES_QUERY => Ok(self.server.count()),
            CREATE_NODE_QUERY => Ok(self.server.create(params)),
            other => Err(DriverError::server(
                "Neo.ClientError.Statement.SyntaxError",
                format!("unsupported query: {other}"),
            )),
        }
    }

    fn close(&mut self) {
        self.events.push("session.close");
    }
}
