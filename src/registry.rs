//! Role-keyed registry of running services.
use std::collections::HashMap;

use strum_macros::{AsRefStr, Display, EnumString};
use tracing::warn;

use crate::process::ServiceHandle;

/// Logical role of a supervised service. At most one process runs per role.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, AsRefStr, Display, EnumString)]
#[strum(serialize_all = "kebab-case")]
pub enum ServiceRole {
    /// The reverse-proxy gateway. Always launched.
    Proxy,
    /// The optional overlay-network daemon.
    OverlayNetwork,
}

impl ServiceRole {
    /// All roles in teardown order. The proxy is waited on first, though the
    /// ordering is not load-bearing: termination requests are broadcast to
    /// every role before any wait begins.
    pub const ALL: [ServiceRole; 2] = [ServiceRole::Proxy, ServiceRole::OverlayNetwork];
}

/// Holds the handles of currently-supervised processes, keyed by role.
///
/// A role is present only if its process launched successfully and has not
/// yet been confirmed terminated. Owned by the supervisor and touched only
/// from the main flow.
#[derive(Debug, Default)]
pub struct ServiceRegistry {
    handles: HashMap<ServiceRole, ServiceHandle>,
}

impl ServiceRegistry {
    /// Creates an empty registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers a freshly launched service under its role.
    pub fn register(&mut self, handle: ServiceHandle) {
        let role = handle.role();
        if self.handles.insert(role, handle).is_some() {
            warn!("Replaced existing handle for role '{role}'");
        }
    }

    /// Whether a service is registered under `role`.
    pub fn contains(&self, role: ServiceRole) -> bool {
        self.handles.contains_key(&role)
    }

    /// Number of registered services.
    pub fn len(&self) -> usize {
        self.handles.len()
    }

    /// Whether no services are registered.
    pub fn is_empty(&self) -> bool {
        self.handles.is_empty()
    }

    /// Borrows the handle registered under `role`.
    pub fn get(&self, role: ServiceRole) -> Option<&ServiceHandle> {
        self.handles.get(&role)
    }

    /// Mutably borrows the handle registered under `role`.
    pub fn get_mut(&mut self, role: ServiceRole) -> Option<&mut ServiceHandle> {
        self.handles.get_mut(&role)
    }

    /// Removes and returns the handle registered under `role`, once its
    /// process is confirmed terminated.
    pub fn take(&mut self, role: ServiceRole) -> Option<ServiceHandle> {
        self.handles.remove(&role)
    }
}
