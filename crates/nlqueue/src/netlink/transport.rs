//! Request/response transport seam.
//!
//! Every diagnostic exchange opens a fresh [`Transport`] through a
//! [`Connector`], sends one request and drains the replies. The kernel
//! implementation is [`SockDiagConnector`]; tests plug in a scripted one.

use std::future::Future;

use super::builder::MessageBuilder;
use super::error::Result;
use super::socket::{DEFAULT_RECV_BUFFER, NetlinkSocket};

/// One open request/response channel to the kernel.
pub trait Transport {
    /// Stamp `request` with a sequence number and the local port id, then
    /// send it as a single datagram.
    fn send_request(&self, request: MessageBuilder) -> impl Future<Output = Result<()>>;

    /// Receive the next datagram. Resolves once data is readable.
    fn recv(&self) -> impl Future<Output = Result<Vec<u8>>>;
}

/// Opens transports, one per exchange.
pub trait Connector {
    /// The transport type produced by [`open`](Self::open).
    type Transport: Transport;

    /// Open a new transport.
    fn open(&self) -> Result<Self::Transport>;
}

impl Transport for NetlinkSocket {
    async fn send_request(&self, mut request: MessageBuilder) -> Result<()> {
        request.set_seq(self.next_seq());
        request.set_pid(self.pid());
        self.send(&request.finish()).await
    }

    async fn recv(&self) -> Result<Vec<u8>> {
        self.recv_msg().await
    }
}

/// Opens real `NETLINK_SOCK_DIAG` sockets.
#[derive(Debug, Clone, Copy)]
pub struct SockDiagConnector {
    recv_buffer: usize,
}

impl SockDiagConnector {
    /// Create a connector using the default receive buffer size.
    pub fn new() -> Self {
        Self {
            recv_buffer: DEFAULT_RECV_BUFFER,
        }
    }

    /// Set the receive buffer size of opened sockets.
    pub fn recv_buffer(mut self, bytes: usize) -> Self {
        self.recv_buffer = bytes;
        self
    }
}

impl Default for SockDiagConnector {
    fn default() -> Self {
        Self::new()
    }
}

impl Connector for SockDiagConnector {
    type Transport = NetlinkSocket;

    fn open(&self) -> Result<NetlinkSocket> {
        NetlinkSocket::with_recv_buffer(self.recv_buffer)
    }
}
