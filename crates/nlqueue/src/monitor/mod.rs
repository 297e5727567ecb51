//! Backlog monitoring for the host's Unix listeners.
//!
//! [`QueueMonitor`] is driven once per tick of the host's management loop.
//! The first tick dumps every listening Unix stream socket the kernel knows,
//! and remembers the inode and cookie of each one the host owns. Every tick
//! (the first included) then asks the kernel for the queue lengths of those
//! sockets, one exact lookup each, and writes them into the registry.
//!
//! The dump is attempted exactly once. If it fails or matches nothing, later
//! ticks only refresh whatever identities it did produce.
//!
//! # Example
//!
//! ```ignore
//! use std::time::Duration;
//! use nlqueue::monitor::QueueMonitor;
//! use nlqueue::registry::{SocketEntry, SocketRegistry};
//!
//! let mut registry = SocketRegistry::new();
//! registry.push(SocketEntry::unix("/run/app.sock"));
//!
//! let mut monitor = QueueMonitor::new();
//! let mut ticks = tokio::time::interval(Duration::from_secs(1));
//! loop {
//!     ticks.tick().await;
//!     monitor.tick(&mut registry).await;
//! }
//! ```

mod config;
mod exchange;
mod refresher;
mod resolver;

pub use config::{DEFAULT_RECV_TIMEOUT, MonitorConfig};
pub use refresher::RefreshStats;

use tracing::debug;

use crate::netlink::{Connector, SockDiagConnector};
use crate::registry::{EntryId, SocketRegistry};

/// Kernel identity of one registry entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Identity {
    /// The registry entry this socket belongs to.
    pub entry: EntryId,
    /// Kernel inode number.
    pub inode: u32,
    /// Kernel socket cookie.
    pub cookie: [u32; 2],
}

/// Per-tick driver of the resolver and refresher passes.
pub struct QueueMonitor<C = SockDiagConnector> {
    connector: C,
    config: MonitorConfig,
    resolved: bool,
    identities: Vec<Identity>,
}

impl QueueMonitor {
    /// Create a monitor talking to the kernel with default settings.
    pub fn new() -> Self {
        Self::with_config(MonitorConfig::default())
    }

    /// Create a monitor talking to the kernel.
    pub fn with_config(config: MonitorConfig) -> Self {
        let connector = SockDiagConnector::new().recv_buffer(config.recv_buffer);
        Self::with_connector(connector, config)
    }
}

impl Default for QueueMonitor {
    fn default() -> Self {
        Self::new()
    }
}

impl<C: Connector> QueueMonitor<C> {
    /// Create a monitor using `connector` to open transports.
    pub fn with_connector(connector: C, config: MonitorConfig) -> Self {
        Self {
            connector,
            config,
            resolved: false,
            identities: Vec::new(),
        }
    }

    /// Run one tick: resolve on first call, then refresh every identity.
    ///
    /// Never fails. Problems are logged and the affected metrics keep their
    /// previous values.
    pub async fn tick(&mut self, registry: &mut SocketRegistry) -> RefreshStats {
        if !self.resolved {
            self.resolved = true;
            match resolver::resolve(&self.connector, &self.config, registry, &mut self.identities)
                .await
            {
                Ok(seen) => debug!(
                    listeners = seen,
                    resolved = self.identities.len(),
                    "resolved unix listeners"
                ),
                Err(e) => exchange::log_failure("listener dump", &e),
            }
        }

        let stats =
            refresher::refresh(&self.connector, &self.config, &self.identities, registry).await;
        debug!(
            queried = stats.queried,
            updated = stats.updated,
            missing = stats.missing,
            failed = stats.failed,
            "refreshed queue lengths"
        );
        stats
    }

    /// Check if the first-run dump has been attempted.
    pub fn is_resolved(&self) -> bool {
        self.resolved
    }

    /// Identities discovered by the dump, in discovery order.
    pub fn identities(&self) -> &[Identity] {
        &self.identities
    }

    /// The monitor configuration.
    pub fn config(&self) -> &MonitorConfig {
        &self.config
    }
}
