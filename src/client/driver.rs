//! Driver, session and tunnel traits.

use async_trait::async_trait;

use crate::client::record::{Params, Record};
use crate::client::target::TargetId;

/// Error surfaced by the database client or the tunnel.
///
/// `code` carries the server status code when there is one
/// (e.g. `Neo.ClientError.Security.CredentialsExpired`).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DriverError {
    pub code: Option<String>,
    pub message: String,
}

impl std::fmt::Display for DriverError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match &self.code {
            Some(code) => write!(f, "{}: {}", code, self.message),
            None => f.write_str(&self.message),
        }
    }
}

impl std::error::Error for DriverError {}

impl DriverError {
    /// Transport level failure without a server status code.
    pub fn transport(message: impl Into<String>) -> Self {
        Self {
            code: None,
            message: message.into(),
        }
    }

    /// Failure reported by the server with a status code.
    pub fn server(code: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            code: Some(code.into()),
            message: message.into(),
        }
    }

    /// True when the server rejected the credentials because they are being rotated.
    pub fn is_credentials_expired(&self) -> bool {
        self.code
            .as_deref()
            .is_some_and(|code| code.contains("CredentialsExpired"))
    }
}

/// Basic authentication token.
#[derive(Clone, PartialEq, Eq)]
pub struct AuthToken {
    pub user: String,
    pub password: String,
}

impl AuthToken {
    pub fn basic(user: impl Into<String>, password: impl Into<String>) -> Self {
        Self {
            user: user.into(),
            password: password.into(),
        }
    }
}

impl std::fmt::Debug for AuthToken {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AuthToken")
            .field("user", &self.user)
            .field("password", &"<redacted>")
            .finish()
    }
}

/// Exposes a remote deployment's bolt port on a local port.
#[async_trait]
pub trait TunnelProvider: Send + Sync {
    /// Open a tunnel and return the local port.
    async fn open(&self, target: &TargetId) -> Result<u16, DriverError>;

    /// Tear the tunnel down. Must be idempotent and safe after a failed `open`.
    fn close(&self, target: &TargetId);
}

/// Creates connections to a bolt URI.
#[async_trait]
pub trait GraphDriver: Send + Sync {
    async fn connect(
        &self,
        uri: &str,
        auth: &AuthToken,
    ) -> Result<Box<dyn GraphConnection>, DriverError>;
}

/// A live driver connection.
#[async_trait]
pub trait GraphConnection: Send + Sync {
    async fn verify_connectivity(&self) -> Result<(), DriverError>;

    async fn open_session(&self, database: &str) -> Result<Box<dyn GraphSession>, DriverError>;

    fn close(&mut self);
}

/// A short-lived session bound to a single database.
#[async_trait]
pub trait GraphSession: Send {
    /// Run a query and collect every record eagerly.
    async fn run(&mut self, cypher: &str, params: &Params) -> Result<Vec<Record>, DriverError>;

    fn close(&mut self);
}
