//! Per-tick queue length refresh by exact lookup.

use serde::Serialize;
use tracing::{debug, trace};

use crate::netlink::Connector;
use crate::registry::SocketRegistry;
use crate::sockdiag::request;

use super::Identity;
use super::config::MonitorConfig;
use super::exchange::{exchange, log_failure};

/// Outcome of one refresh pass.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct RefreshStats {
    /// Identities queried.
    pub queried: usize,
    /// Registry entries whose metrics were written.
    pub updated: usize,
    /// Identities the kernel no longer knows (socket closed since the dump).
    pub missing: usize,
    /// Exchanges that failed or were abandoned.
    pub failed: usize,
}

/// Query the queue lengths of every identity and write them into `registry`.
///
/// Metrics are overwritten unconditionally by each reply carrying
/// `UNIX_DIAG_RQLEN`. A failed exchange leaves the previous values in place.
/// A socket that has gone away (`ENOENT`) is a quiet no-match, not a failure.
pub(crate) async fn refresh<C: Connector>(
    connector: &C,
    config: &MonitorConfig,
    identities: &[Identity],
    registry: &mut SocketRegistry,
) -> RefreshStats {
    let mut stats = RefreshStats::default();

    for identity in identities {
        stats.queried += 1;
        let mut updated = false;

        let result = exchange(
            connector,
            request::exact_queue_length(identity.inode, identity.cookie),
            config.recv_timeout,
            |entry| {
                let Some(rqlen) = entry.queue_len() else {
                    return;
                };
                if let Some(socket) = registry.get_mut(identity.entry) {
                    trace!(
                        name = %socket.name,
                        queue = rqlen.udiag_rqueue,
                        max_queue = rqlen.udiag_wqueue,
                        "queue length"
                    );
                    socket.set_queue(rqlen.udiag_rqueue, rqlen.udiag_wqueue);
                    updated = true;
                }
            },
        )
        .await;

        match result {
            Ok(_) => {}
            Err(e) if e.is_not_found() => {
                stats.missing += 1;
                debug!(inode = identity.inode, "listener no longer known to kernel");
            }
            Err(e) => {
                stats.failed += 1;
                log_failure("queue length query", &e);
            }
        }
        if updated {
            stats.updated += 1;
        }
    }

    stats
}
