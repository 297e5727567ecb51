//! Unix socket diagnostics over NETLINK_SOCK_DIAG.
//!
//! This module speaks the `unix_diag` dialect of the sock_diag protocol:
//!
//! - [`request`] builds the two requests the monitor needs: a dump of every
//!   listening stream socket with its name, and an exact lookup of one socket
//!   by inode and cookie returning its queue lengths.
//! - [`parse`] walks reply datagrams into typed records and attributes.
//! - [`types`] holds the kernel ABI structures.
//!
//! # Example
//!
//! ```ignore
//! use nlqueue::sockdiag::{DiagRecord, DiagRecords};
//!
//! for record in DiagRecords::new(&reply) {
//!     match record? {
//!         DiagRecord::Data(entry) => {
//!             if let Some(name) = entry.name() {
//!                 println!("{} inode={} cookie={:?}", name, entry.inode(), entry.cookie());
//!             }
//!         }
//!         DiagRecord::Done => break,
//!         DiagRecord::Error { code } => eprintln!("kernel error {}", code),
//!     }
//! }
//! ```

pub mod parse;
pub mod request;
pub mod types;

pub use parse::{DiagRecord, DiagRecords, UnixAttr, UnixAttrs, UnixDiagEntry, UnixName};
pub use types::{AddressFamily, UnixDiagMsg, UnixDiagReq, UnixDiagRqLen, UnixShow};
