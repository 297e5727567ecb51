//! Error types for netlink operations.

use std::io;

/// Result type for netlink operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur during a sock_diag exchange.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// I/O error from socket operations.
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    /// Kernel returned an error code.
    #[error("kernel error: {message} (errno {errno})")]
    Kernel {
        /// The errno value from the kernel.
        errno: i32,
        /// Human-readable error message.
        message: String,
    },

    /// Message was truncated.
    #[error("message truncated: expected {expected} bytes, got {actual}")]
    Truncated {
        /// Expected message length.
        expected: usize,
        /// Actual bytes received.
        actual: usize,
    },

    /// Invalid message format.
    #[error("invalid message: {0}")]
    InvalidMessage(String),

    /// No reply arrived within the receive timeout.
    #[error("timed out waiting for a netlink reply")]
    Timeout,

    /// The socket returned an empty read.
    #[error("netlink socket returned no data")]
    Closed,
}

impl Error {
    /// Create a kernel error from the (negative) code of an `NLMSG_ERROR` record.
    pub fn from_errno(errno: i32) -> Self {
        let message = io::Error::from_raw_os_error(-errno).to_string();
        Self::Kernel {
            errno: -errno,
            message,
        }
    }

    /// Get the errno value if this is a kernel error.
    pub fn errno(&self) -> Option<i32> {
        match self {
            Self::Kernel { errno, .. } => Some(*errno),
            _ => None,
        }
    }

    /// Check if this is a "not found" error (ENOENT).
    ///
    /// The kernel answers an exact query with ENOENT once the socket is gone.
    pub fn is_not_found(&self) -> bool {
        matches!(self.errno(), Some(libc::ENOENT))
    }

    /// Check if the exchange was abandoned without a reply.
    pub fn is_abort(&self) -> bool {
        matches!(self, Self::Timeout | Self::Closed)
    }
}
