//! Host socket registry.
//!
//! The registry is owned by the host process: it creates the entries when it
//! binds its listeners. The monitor only reads `family` and `name` and writes
//! the two queue metrics. Entries are kept in insertion order and addressed
//! by a stable [`EntryId`]; nothing is ever removed.

use serde::{Deserialize, Serialize};

use crate::sockdiag::AddressFamily;

/// Stable index of an entry in a [`SocketRegistry`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct EntryId(usize);

impl EntryId {
    /// Position of the entry in insertion order.
    pub fn index(&self) -> usize {
        self.0
    }
}

/// One host-managed socket.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SocketEntry {
    /// Address family.
    pub family: AddressFamily,
    /// Bound name. For Unix sockets a path, or `@name` for the abstract namespace.
    pub name: String,
    /// Current queue depth (pending connections for a listener).
    pub queue: u32,
    /// Maximum queue depth (the listen backlog).
    pub max_queue: u32,
}

impl SocketEntry {
    /// Create an entry with zeroed metrics.
    pub fn new(family: AddressFamily, name: impl Into<String>) -> Self {
        Self {
            family,
            name: name.into(),
            queue: 0,
            max_queue: 0,
        }
    }

    /// Create a Unix socket entry.
    pub fn unix(name: impl Into<String>) -> Self {
        Self::new(AddressFamily::Unix, name)
    }

    /// Check if this is a Unix socket.
    pub fn is_unix(&self) -> bool {
        self.family == AddressFamily::Unix
    }

    /// Overwrite both queue metrics.
    pub fn set_queue(&mut self, queue: u32, max_queue: u32) {
        self.queue = queue;
        self.max_queue = max_queue;
    }
}

/// Insertion-ordered collection of host sockets.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SocketRegistry {
    entries: Vec<SocketEntry>,
}

impl SocketRegistry {
    /// Create an empty registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// Append an entry and return its id.
    pub fn push(&mut self, entry: SocketEntry) -> EntryId {
        self.entries.push(entry);
        EntryId(self.entries.len() - 1)
    }

    /// Get an entry.
    pub fn get(&self, id: EntryId) -> Option<&SocketEntry> {
        self.entries.get(id.0)
    }

    /// Get an entry for updating its metrics.
    pub fn get_mut(&mut self, id: EntryId) -> Option<&mut SocketEntry> {
        self.entries.get_mut(id.0)
    }

    /// Iterate over all entries in insertion order.
    pub fn iter(&self) -> impl Iterator<Item = (EntryId, &SocketEntry)> {
        self.entries
            .iter()
            .enumerate()
            .map(|(i, entry)| (EntryId(i), entry))
    }

    /// Iterate over the Unix entries in insertion order.
    pub fn unix_entries(&self) -> impl Iterator<Item = (EntryId, &SocketEntry)> {
        self.iter().filter(|(_, entry)| entry.is_unix())
    }

    /// Number of entries.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Check if the registry is empty.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl FromIterator<SocketEntry> for SocketRegistry {
    fn from_iter<I: IntoIterator<Item = SocketEntry>>(iter: I) -> Self {
        Self {
            entries: iter.into_iter().collect(),
        }
    }
}
