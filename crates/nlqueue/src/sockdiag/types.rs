//! `unix_diag` ABI types.
//!
//! Layouts mirror `<linux/sock_diag.h>` and `<linux/unix_diag.h>`. All fields
//! are native endian.

use serde::{Deserialize, Serialize};
use zerocopy::{FromBytes, Immutable, IntoBytes, KnownLayout};

/// Socket address family.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
#[repr(u8)]
pub enum AddressFamily {
    /// Unix domain sockets.
    Unix = libc::AF_UNIX as u8,
    /// IPv4.
    Inet = libc::AF_INET as u8,
    /// IPv6.
    Inet6 = libc::AF_INET6 as u8,
}

impl AddressFamily {
    /// Parse from a raw u8 value.
    pub fn from_u8(value: u8) -> Option<Self> {
        match value as i32 {
            libc::AF_UNIX => Some(Self::Unix),
            libc::AF_INET => Some(Self::Inet),
            libc::AF_INET6 => Some(Self::Inet6),
            _ => None,
        }
    }
}

/// `TCP_LISTEN`, the state the kernel reports for listening Unix sockets.
pub const TCP_LISTEN: u8 = 10;

/// State filter selecting only listening sockets.
pub const LISTEN_STATES: u32 = 1 << TCP_LISTEN;

/// What to show in Unix socket queries (`UDIAG_SHOW_*`).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[repr(u32)]
pub enum UnixShow {
    /// Show socket name.
    Name = 0x00000001,
    /// Show receive queue length.
    RqLen = 0x00000010,
}

impl UnixShow {
    /// Get the bitmask for this show option.
    pub fn mask(&self) -> u32 {
        *self as u32
    }
}

/// `UNIX_DIAG_NAME` attribute: the bound address.
pub const UNIX_DIAG_NAME: u16 = 0;
/// `UNIX_DIAG_RQLEN` attribute: a [`UnixDiagRqLen`].
pub const UNIX_DIAG_RQLEN: u16 = 4;

/// Unix diagnostics request (mirrors struct unix_diag_req).
#[repr(C)]
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, FromBytes, IntoBytes, Immutable, KnownLayout)]
pub struct UnixDiagReq {
    /// Address family, always `AF_UNIX`.
    pub sdiag_family: u8,
    /// Socket type filter for dumps (`SOCK_STREAM`, ...); 0 for exact lookups.
    pub sdiag_protocol: u8,
    /// Padding.
    pub pad: u16,
    /// Bitmask of states to dump.
    pub udiag_states: u32,
    /// Inode for exact lookups.
    pub udiag_ino: u32,
    /// `UDIAG_SHOW_*` bitmask.
    pub udiag_show: u32,
    /// Cookie for exact lookups.
    pub udiag_cookie: [u32; 2],
}

const _: () = assert!(std::mem::size_of::<UnixDiagReq>() == 24);

/// Unix diagnostics reply header (mirrors struct unix_diag_msg).
#[repr(C)]
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, FromBytes, IntoBytes, Immutable, KnownLayout)]
pub struct UnixDiagMsg {
    /// Address family.
    pub udiag_family: u8,
    /// Socket type.
    pub udiag_type: u8,
    /// Socket state.
    pub udiag_state: u8,
    /// Padding.
    pub pad: u8,
    /// Inode number.
    pub udiag_ino: u32,
    /// Socket cookie.
    pub udiag_cookie: [u32; 2],
}

const _: () = assert!(std::mem::size_of::<UnixDiagMsg>() == 16);

impl UnixDiagMsg {
    /// Check if the socket is listening.
    pub fn is_listening(&self) -> bool {
        self.udiag_state == TCP_LISTEN
    }
}

/// Queue lengths (mirrors struct unix_diag_rqlen).
///
/// For a listening socket `rqueue` is the number of pending connections and
/// `wqueue` is the backlog limit given to `listen()`.
#[repr(C)]
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, FromBytes, IntoBytes, Immutable, KnownLayout)]
pub struct UnixDiagRqLen {
    /// Receive queue length.
    pub udiag_rqueue: u32,
    /// Write queue length.
    pub udiag_wqueue: u32,
}

const _: () = assert!(std::mem::size_of::<UnixDiagRqLen>() == 8);
