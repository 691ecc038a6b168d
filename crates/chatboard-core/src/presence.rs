//! Tracks which socket connections have logged in.

use dashmap::DashMap;
use uuid::Uuid;

/// Live set of logged-in connections, keyed by connection id.
#[derive(Debug, Default)]
pub struct PresenceTracker {
    online: DashMap<Uuid, Option<String>>,
}

impl PresenceTracker {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a connection. Logging in twice updates the display name.
    ///
    /// Returns the number of connections now online.
    pub fn login(&self, connection_id: Uuid, name: Option<String>) -> usize {
        self.online.insert(connection_id, name);
        self.online.len()
    }

    /// Remove a connection.
    ///
    /// Returns the new online count, or `None` if the connection was not
    /// logged in.
    pub fn disconnect(&self, connection_id: &Uuid) -> Option<usize> {
        self.online
            .remove(connection_id)
            .map(|_| self.online.len())
    }

    pub fn online_count(&self) -> usize {
        self.online.len()
    }

    /// Display name a connection logged in with, if any.
    pub fn name_of(&self, connection_id: &Uuid) -> Option<String> {
        self.online
            .get(connection_id)
            .and_then(|entry| entry.value().clone())
    }
}
