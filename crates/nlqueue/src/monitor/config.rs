//! Monitor configuration.

use std::time::Duration;

use crate::netlink::DEFAULT_RECV_BUFFER;

/// Default time to wait for each reply datagram.
pub const DEFAULT_RECV_TIMEOUT: Duration = Duration::from_secs(1);

/// Tunables for [`QueueMonitor`](super::QueueMonitor).
///
/// # Example
///
/// ```ignore
/// use std::time::Duration;
/// use nlqueue::monitor::MonitorConfig;
///
/// let config = MonitorConfig::new()
///     .recv_timeout(Duration::from_millis(250))
///     .recv_buffer(16384);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MonitorConfig {
    /// How long to wait for each reply before abandoning the exchange.
    pub recv_timeout: Duration,
    /// Receive buffer size per datagram, in bytes.
    pub recv_buffer: usize,
}

impl MonitorConfig {
    /// Create a configuration with default values.
    pub fn new() -> Self {
        Self {
            recv_timeout: DEFAULT_RECV_TIMEOUT,
            recv_buffer: DEFAULT_RECV_BUFFER,
        }
    }

    /// Set the per-reply wait.
    pub fn recv_timeout(mut self, timeout: Duration) -> Self {
        self.recv_timeout = timeout;
        self
    }

    /// Set the receive buffer size.
    pub fn recv_buffer(mut self, bytes: usize) -> Self {
        self.recv_buffer = bytes;
        self
    }
}

impl Default for MonitorConfig {
    fn default() -> Self {
        Self::new()
    }
}
