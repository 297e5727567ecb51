//! First-run dump that maps registry entries to kernel identities.

use tracing::{debug, trace};

use crate::netlink::{Connector, Result};
use crate::registry::{EntryId, SocketRegistry};
use crate::sockdiag::{UnixName, request};

use super::Identity;
use super::config::MonitorConfig;
use super::exchange::exchange;

/// Dump all listening Unix stream sockets and record an [`Identity`] for
/// every one whose name matches a Unix entry of `registry`.
///
/// When several registry entries carry the same name the last one wins.
/// A registry entry never gets more than one identity: a second kernel record
/// for an already mapped entry replaces the first. Identities found before a
/// failure are kept.
///
/// Returns the number of kernel records examined.
pub(crate) async fn resolve<C: Connector>(
    connector: &C,
    config: &MonitorConfig,
    registry: &SocketRegistry,
    identities: &mut Vec<Identity>,
) -> Result<usize> {
    let seen = exchange(
        connector,
        request::dump_listening_names(),
        config.recv_timeout,
        |entry| {
            let Some(name) = entry.name() else {
                return;
            };
            let Some(id) = last_match(registry, name) else {
                trace!(%name, inode = entry.inode(), "unowned listener");
                return;
            };

            let identity = Identity {
                entry: id,
                inode: entry.inode(),
                cookie: entry.cookie(),
            };
            debug!(%name, inode = identity.inode, cookie = ?identity.cookie, "resolved listener");

            match identities.iter_mut().find(|known| known.entry == id) {
                Some(known) => *known = identity,
                None => identities.push(identity),
            }
        },
    )
    .await?;

    Ok(seen)
}

fn last_match(registry: &SocketRegistry, name: UnixName<'_>) -> Option<EntryId> {
    registry
        .unix_entries()
        .filter(|(_, entry)| name.matches(&entry.name))
        .map(|(id, _)| id)
        .last()
}
