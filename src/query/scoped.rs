//! RAII guards for the resources a query acquires.
//!
//! Locals drop in reverse declaration order, so declaring tunnel, then
//! connection, then session releases them innermost first.

use std::ops::{Deref, DerefMut};

use crate::client::{DriverError, GraphConnection, GraphSession, TargetId, TunnelProvider};

/// Closes the tunnel on drop, whether or not `open` succeeded.
pub struct TunnelGuard<'a> {
    provider: &'a dyn TunnelProvider,
    target: &'a TargetId,
}

impl<'a> TunnelGuard<'a> {
    pub fn new(provider: &'a dyn TunnelProvider, target: &'a TargetId) -> Self {
        Self { provider, target }
    }

    pub async fn open(&self) -> Result<u16, DriverError> {
        self.provider.open(self.target).await
    }
}

impl Drop for TunnelGuard<'_> {
    fn drop(&mut self) {
        tracing::trace!(target_id = %self.target, "Closing tunnel");
        self.provider.close(self.target);
    }
}

/// Owns a driver connection and closes it on drop.
pub struct ConnectionGuard(Box<dyn GraphConnection>);

impl ConnectionGuard {
    pub fn new(connection: Box<dyn GraphConnection>) -> Self {
        Self(connection)
    }
}

impl Deref for ConnectionGuard {
    type Target = dyn GraphConnection;
    fn deref(&self) -> &Self::Target {
        self.0.as_ref()
    }
}

impl Drop for ConnectionGuard {
    fn drop(&mut self) {
        self.0.close();
    }
}

/// Owns a session and closes it on drop.
pub struct SessionGuard(Box<dyn GraphSession>);

impl SessionGuard {
    pub fn new(session: Box<dyn GraphSession>) -> Self {
        Self(session)
    }
}

impl Deref for SessionGuard {
    type Target = dyn GraphSession;
    fn deref(&self) -> &Self::Target {
        self.0.as_ref()
    }
}

impl DerefMut for SessionGuard {
    fn deref_mut(&mut self) -> &mut Self::Target {
        self.0.as_mut()
    }
}

impl Drop for SessionGuard {
    fn drop(&mut self) {
        self.0.close();
    }
}
