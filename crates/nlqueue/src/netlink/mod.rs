//! Netlink framing and the sock_diag transport.
//!
//! This module holds the protocol-independent pieces of a netlink exchange:
//! message headers, attribute walking, request building, and the socket
//! that carries requests to the kernel's `NETLINK_SOCK_DIAG` endpoint.
//!
//! # Example
//!
//! ```ignore
//! use nlqueue::netlink::{Connector, MessageBuilder, SockDiagConnector, Transport};
//! use nlqueue::netlink::message::{NLM_F_DUMP, NLM_F_REQUEST, NlMsgType};
//!
//! let transport = SockDiagConnector::new().open()?;
//! let mut request = MessageBuilder::new(
//!     NlMsgType::SOCK_DIAG_BY_FAMILY,
//!     NLM_F_REQUEST | NLM_F_DUMP,
//! );
//! request.append(&payload);
//! transport.send_request(request).await?;
//! let reply = transport.recv().await?;
//! ```

pub mod attr;
mod builder;
mod error;
pub mod message;
mod socket;
mod transport;

pub use attr::{AttrIter, NlAttr};
pub use builder::MessageBuilder;
pub use error::{Error, Result};
pub use message::{MessageIter, NLMSG_HDRLEN, NlMsgHdr, NlMsgType};
pub use socket::{DEFAULT_RECV_BUFFER, NetlinkSocket};
pub use transport::{Connector, SockDiagConnector, Transport};
