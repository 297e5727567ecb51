//! One request/response cycle on a fresh transport.

use std::time::Duration;

use tracing::{debug, warn};

use crate::netlink::{Connector, Error, MessageBuilder, Result, Transport};
use crate::sockdiag::{DiagRecord, DiagRecords, UnixDiagEntry};

/// Send `request` on a newly opened transport and hand every data record to
/// `on_entry`.
///
/// The exchange completes on `NLMSG_DONE` or on a data record without
/// `NLM_F_MULTI` (the kernel answers exact lookups with a single message).
/// It fails on a kernel error record, a framing error, an empty read, or when
/// no datagram arrives within `recv_timeout`. The transport is dropped, and
/// its descriptor closed, on every path.
///
/// Returns the number of data records seen.
pub(crate) async fn exchange<C, F>(
    connector: &C,
    request: MessageBuilder,
    recv_timeout: Duration,
    mut on_entry: F,
) -> Result<usize>
where
    C: Connector,
    F: FnMut(&UnixDiagEntry<'_>),
{
    let transport = connector.open()?;
    transport.send_request(request).await?;

    let mut seen = 0;
    loop {
        let data = tokio::time::timeout(recv_timeout, transport.recv())
            .await
            .map_err(|_| Error::Timeout)??;
        if data.is_empty() {
            return Err(Error::Closed);
        }

        for record in DiagRecords::new(&data) {
            match record? {
                DiagRecord::Done => return Ok(seen),
                DiagRecord::Error { code } => return Err(Error::from_errno(code)),
                DiagRecord::Data(entry) => {
                    seen += 1;
                    on_entry(&entry);
                    if !entry.is_multi() {
                        return Ok(seen);
                    }
                }
            }
        }
    }
}

/// Log a failed exchange at a level matching its cause.
pub(crate) fn log_failure(what: &str, err: &Error) {
    match err {
        Error::Kernel { errno, message } => {
            warn!(errno, %message, "{} rejected by kernel", what);
        }
        Error::Io(e) => warn!(error = %e, "{} failed", what),
        e if e.is_abort() => debug!(reason = %e, "{} abandoned", what),
        e => debug!(error = %e, "{} stopped on malformed reply", what),
    }
}
