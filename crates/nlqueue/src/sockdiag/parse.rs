//! Unix diagnostics reply parsing.
//!
//! [`DiagRecords`] walks one received datagram and yields each netlink record
//! as a [`DiagRecord`]. Data records expose the fixed `unix_diag_msg` header
//! and a lazy [`UnixAttrs`] walk over the attributes that follow it. Nothing
//! here allocates or touches any state outside the borrowed buffer.

use std::fmt;

use zerocopy::FromBytes;

use crate::netlink::attr::{AttrIter, get};
use crate::netlink::{Error, MessageIter, NlMsgHdr, NlMsgType, Result};

use super::types::{UNIX_DIAG_NAME, UNIX_DIAG_RQLEN, UnixDiagMsg, UnixDiagRqLen};

/// One netlink record of a sock_diag reply.
#[derive(Debug)]
pub enum DiagRecord<'a> {
    /// A socket description.
    Data(UnixDiagEntry<'a>),
    /// End of a dump.
    Done,
    /// The kernel rejected the request. `code` is the negative errno.
    Error {
        /// Signed error code as sent by the kernel.
        code: i32,
    },
}

impl DiagRecord<'_> {
    /// Check if the record ends the exchange.
    pub fn is_terminal(&self) -> bool {
        matches!(self, Self::Done | Self::Error { .. })
    }
}

/// Iterator over the records of one sock_diag datagram.
///
/// Iteration ends after a `Done` or `Error` record, or after yielding the
/// first framing error. Records are never read past the buffer end.
pub struct DiagRecords<'a> {
    messages: MessageIter<'a>,
    finished: bool,
}

impl<'a> DiagRecords<'a> {
    /// Start walking `data`.
    pub fn new(data: &'a [u8]) -> Self {
        Self {
            messages: MessageIter::new(data),
            finished: false,
        }
    }

    fn decode(header: &'a NlMsgHdr, payload: &'a [u8]) -> Result<Option<DiagRecord<'a>>> {
        match header.nlmsg_type {
            NlMsgType::NOOP => Ok(None),
            NlMsgType::DONE => Ok(Some(DiagRecord::Done)),
            NlMsgType::ERROR => {
                let code = get::i32_ne(payload)?;
                if code == 0 {
                    // ACK
                    Ok(None)
                } else {
                    Ok(Some(DiagRecord::Error { code }))
                }
            }
            NlMsgType::OVERRUN => Err(Error::InvalidMessage("netlink overrun".into())),
            _ => {
                let (msg, attrs) =
                    UnixDiagMsg::read_from_prefix(payload).map_err(|_| Error::Truncated {
                        expected: std::mem::size_of::<UnixDiagMsg>(),
                        actual: payload.len(),
                    })?;
                Ok(Some(DiagRecord::Data(UnixDiagEntry { header, msg, attrs })))
            }
        }
    }
}

impl<'a> Iterator for DiagRecords<'a> {
    type Item = Result<DiagRecord<'a>>;

    fn next(&mut self) -> Option<Self::Item> {
        while !self.finished {
            let (header, payload) = match self.messages.next()? {
                Ok(msg) => msg,
                Err(e) => {
                    self.finished = true;
                    return Some(Err(e));
                }
            };

            match Self::decode(header, payload) {
                Ok(None) => continue,
                Ok(Some(record)) => {
                    self.finished = record.is_terminal();
                    return Some(Ok(record));
                }
                Err(e) => {
                    self.finished = true;
                    return Some(Err(e));
                }
            }
        }
        None
    }
}

/// A Unix socket description from a data record.
#[derive(Debug, Clone, Copy)]
pub struct UnixDiagEntry<'a> {
    header: &'a NlMsgHdr,
    msg: UnixDiagMsg,
    attrs: &'a [u8],
}

impl<'a> UnixDiagEntry<'a> {
    /// The netlink header of the record.
    pub fn header(&self) -> &'a NlMsgHdr {
        self.header
    }

    /// The fixed diagnostic header.
    pub fn msg(&self) -> &UnixDiagMsg {
        &self.msg
    }

    /// Kernel inode number of the socket.
    pub fn inode(&self) -> u32 {
        self.msg.udiag_ino
    }

    /// Kernel cookie of the socket.
    pub fn cookie(&self) -> [u32; 2] {
        self.msg.udiag_cookie
    }

    /// Check if more records of the same reply follow.
    pub fn is_multi(&self) -> bool {
        self.header.is_multi()
    }

    /// Walk the attributes of the record.
    pub fn attrs(&self) -> UnixAttrs<'a> {
        UnixAttrs {
            inner: AttrIter::new(self.attrs),
        }
    }

    /// The first name attribute, if any.
    pub fn name(&self) -> Option<UnixName<'a>> {
        self.attrs().find_map(|attr| match attr {
            UnixAttr::Name(name) => Some(name),
            _ => None,
        })
    }

    /// The first queue-length attribute, if any.
    pub fn queue_len(&self) -> Option<UnixDiagRqLen> {
        self.attrs().find_map(|attr| match attr {
            UnixAttr::RqLen(rqlen) => Some(rqlen),
            _ => None,
        })
    }
}

/// A typed Unix diagnostics attribute.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UnixAttr<'a> {
    /// `UNIX_DIAG_NAME`: the bound address.
    Name(UnixName<'a>),
    /// `UNIX_DIAG_RQLEN`: current and maximum queue depth.
    RqLen(UnixDiagRqLen),
    /// Any other attribute, or a known one with a short payload.
    Other {
        /// Attribute type.
        kind: u16,
        /// Raw payload.
        payload: &'a [u8],
    },
}

/// Iterator over the attributes of a [`UnixDiagEntry`].
pub struct UnixAttrs<'a> {
    inner: AttrIter<'a>,
}

impl<'a> Iterator for UnixAttrs<'a> {
    type Item = UnixAttr<'a>;

    fn next(&mut self) -> Option<Self::Item> {
        let (kind, payload) = self.inner.next()?;
        let attr = match kind {
            UNIX_DIAG_NAME => UnixAttr::Name(UnixName(payload)),
            UNIX_DIAG_RQLEN => match UnixDiagRqLen::read_from_prefix(payload) {
                Ok((rqlen, _)) => UnixAttr::RqLen(rqlen),
                Err(_) => UnixAttr::Other { kind, payload },
            },
            _ => UnixAttr::Other { kind, payload },
        };
        Some(attr)
    }
}

/// The bound address of a Unix socket as reported by the kernel.
///
/// Filesystem names carry a trailing NUL; abstract names start with a NUL
/// and carry none.
#[derive(Clone, Copy, PartialEq, Eq)]
pub struct UnixName<'a>(&'a [u8]);

impl<'a> UnixName<'a> {
    /// Wrap a raw `UNIX_DIAG_NAME` payload.
    pub fn new(raw: &'a [u8]) -> Self {
        Self(raw)
    }

    /// The payload exactly as sent by the kernel.
    pub fn raw(&self) -> &'a [u8] {
        self.0
    }

    /// Check if this is an abstract-namespace name.
    pub fn is_abstract(&self) -> bool {
        self.0.first() == Some(&0)
    }

    /// The significant bytes of the name.
    ///
    /// For filesystem names the trailing NUL is dropped. Abstract names are
    /// returned without their leading NUL.
    pub fn as_bytes(&self) -> &'a [u8] {
        if self.is_abstract() {
            &self.0[1..]
        } else {
            self.0.strip_suffix(&[0]).unwrap_or(self.0)
        }
    }

    /// Compare against a configured socket name.
    ///
    /// A leading `@` in `name` selects the abstract namespace, the usual
    /// textual convention for abstract sockets.
    pub fn matches(&self, name: &str) -> bool {
        match name.strip_prefix('@') {
            Some(rest) => self.is_abstract() && self.as_bytes() == rest.as_bytes(),
            None => !self.is_abstract() && self.as_bytes() == name.as_bytes(),
        }
    }
}

impl fmt::Display for UnixName<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_abstract() {
            f.write_str("@")?;
        }
        f.write_str(&String::from_utf8_lossy(self.as_bytes()))
    }
}

impl fmt::Debug for UnixName<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "UnixName({:?})", self.to_string())
    }
}
