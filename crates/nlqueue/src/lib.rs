//! Backlog monitoring for Unix listening sockets on Linux.
//!
//! This crate asks the kernel, over `NETLINK_SOCK_DIAG`, how many connections
//! are waiting to be accepted on each Unix stream listener a host process
//! owns, and what its listen backlog is. The host keeps its sockets in a
//! [`SocketRegistry`]; a [`QueueMonitor`] driven from the host's periodic
//! management tick fills in the `queue` and `max_queue` metrics of every
//! Unix entry.
//!
//! # Example
//!
//! ```ignore
//! use nlqueue::{QueueMonitor, SocketEntry, SocketRegistry};
//!
//! #[tokio::main]
//! async fn main() {
//!     let mut registry = SocketRegistry::new();
//!     let app = registry.push(SocketEntry::unix("/run/app.sock"));
//!
//!     let mut monitor = QueueMonitor::new();
//!     monitor.tick(&mut registry).await;
//!
//!     let entry = registry.get(app).unwrap();
//!     println!("{}: {}/{}", entry.name, entry.queue, entry.max_queue);
//! }
//! ```

pub mod monitor;
pub mod netlink;
pub mod registry;
pub mod sockdiag;

#[cfg(test)]
mod fixtures;
#[cfg(test)]
mod testing;

// Re-export common types at crate root for convenience
pub use monitor::{MonitorConfig, QueueMonitor, RefreshStats};
pub use netlink::{Error, Result};
pub use registry::{EntryId, SocketEntry, SocketRegistry};
