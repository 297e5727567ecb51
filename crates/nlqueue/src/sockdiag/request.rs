//! Unix diagnostics request construction.

use zerocopy::FromBytes;

use crate::netlink::message::{NLM_F_DUMP, NLM_F_REQUEST, NLMSG_HDRLEN, NlMsgType};
use crate::netlink::{MessageBuilder, NlMsgHdr};

use super::types::{LISTEN_STATES, UnixDiagReq, UnixShow};

/// Dump every listening `SOCK_STREAM` Unix socket, asking only for its name.
pub fn dump_listening_names() -> MessageBuilder {
    let req = UnixDiagReq {
        sdiag_family: libc::AF_UNIX as u8,
        sdiag_protocol: libc::SOCK_STREAM as u8,
        udiag_states: LISTEN_STATES,
        udiag_show: UnixShow::Name.mask(),
        ..Default::default()
    };

    let mut builder =
        MessageBuilder::new(NlMsgType::SOCK_DIAG_BY_FAMILY, NLM_F_REQUEST | NLM_F_DUMP);
    builder.append(&req);
    builder
}

/// Look up one socket by inode and cookie, asking only for its queue lengths.
pub fn exact_queue_length(inode: u32, cookie: [u32; 2]) -> MessageBuilder {
    let req = UnixDiagReq {
        sdiag_family: libc::AF_UNIX as u8,
        udiag_ino: inode,
        udiag_show: UnixShow::RqLen.mask(),
        udiag_cookie: cookie,
        ..Default::default()
    };

    let mut builder = MessageBuilder::new(NlMsgType::SOCK_DIAG_BY_FAMILY, NLM_F_REQUEST);
    builder.append(&req);
    builder
}

/// Decode the `unix_diag_req` carried by a framed request.
///
/// Returns `None` if `msg` is not a complete sock_diag request.
pub fn decode(msg: &[u8]) -> Option<(bool, UnixDiagReq)> {
    let header = NlMsgHdr::from_bytes(msg).ok()?;
    if header.nlmsg_type != NlMsgType::SOCK_DIAG_BY_FAMILY {
        return None;
    }
    let body = msg.get(NLMSG_HDRLEN..)?;
    let (req, _) = UnixDiagReq::read_from_prefix(body).ok()?;
    Some((header.is_dump(), req))
}
