//! Live client registry: handle -> client state, behind the global lock.

use parking_lot::{RwLock, RwLockReadGuard};
use std::collections::HashMap;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

use super::core::{ConnHandle, WsConn, WsEndpoint};
use crate::router::RouteEntry;

/// State for one live connection. The registry owns it; the matched endpoint
/// entry is shared via `Arc`, so registry growth after connect can never
/// invalidate it.
struct WsClient {
    conn: WsConn,
    endpoint: Arc<RouteEntry<WsEndpoint>>,
    /// Flips to true exactly once, after `on_connect` has returned.
    ready: bool,
}

/// Point-in-time copy of a client's dispatch state, taken under the read
/// lock and used after releasing it. User callbacks are always invoked on a
/// snapshot, never while a registry guard is held.
pub(crate) struct ClientSnapshot {
    pub(crate) conn: WsConn,
    pub(crate) endpoint: Arc<RouteEntry<WsEndpoint>>,
    pub(crate) ready: bool,
}

/// Mapping from connection handle to live client state.
///
/// Invariant: a handle is present iff its connect event has completed and no
/// close event has completed for it. Insert and remove take the write side;
/// every other access takes the read side.
pub struct ClientRegistry {
    next_id: AtomicU64,
    clients: RwLock<HashMap<ConnHandle, WsClient>>,
}

impl Default for ClientRegistry {
    fn default() -> Self {
        Self::new()
    }
}

impl ClientRegistry {
    #[must_use]
    pub fn new() -> Self {
        Self {
            next_id: AtomicU64::new(1),
            clients: RwLock::new(HashMap::new()),
        }
    }

    /// Issue a fresh, never-reused handle for a connection being accepted.
    pub(crate) fn issue_handle(&self) -> ConnHandle {
        ConnHandle::new(self.next_id.fetch_add(1, Ordering::Relaxed))
    }

    /// Insert a freshly connected client. Called under no other lock; takes
    /// the write side internally.
    pub(crate) fn insert(&self, conn: WsConn, endpoint: Arc<RouteEntry<WsEndpoint>>) {
        let handle = conn.handle();
        let previous = self.clients.write().insert(
            handle,
            WsClient {
                conn,
                endpoint,
                ready: false,
            },
        );
        // Handles are issued monotonically, so a collision means the engine
        // replayed a connect event for a live handle.
        debug_assert!(previous.is_none(), "duplicate connect for {handle}");
    }

    /// Mark the client ready, after its `on_connect` callback has returned.
    /// Returns false when the handle is unknown.
    pub(crate) fn set_ready(&self, handle: ConnHandle) -> bool {
        match self.clients.write().get_mut(&handle) {
            Some(client) => {
                client.ready = true;
                true
            }
            None => false,
        }
    }

    /// Remove the client for `handle`. Returns false when the handle was not
    /// present (already removed, or never inserted).
    pub(crate) fn remove(&self, handle: ConnHandle) -> bool {
        self.clients.write().remove(&handle).is_some()
    }

    /// Copy out the client's dispatch state under a short read lock.
    pub(crate) fn snapshot(&self, handle: ConnHandle) -> Option<ClientSnapshot> {
        let clients = self.clients.read();
        clients.get(&handle).map(|client| ClientSnapshot {
            conn: client.conn.clone(),
            endpoint: Arc::clone(&client.endpoint),
            ready: client.ready,
        })
    }

    /// Number of live connections.
    #[must_use]
    pub fn len(&self) -> usize {
        self.clients.read().len()
    }

    /// True when no connection is live.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.clients.read().is_empty()
    }

    /// Acquire the global lock for external lookup and iteration.
    ///
    /// Holding the returned guard keeps concurrent connects and closes out
    /// of the registry, so a broadcaster iterating handles cannot race a
    /// removal mid-use. A connection that closed before the guard was taken
    /// simply resolves to `None`.
    #[must_use]
    pub fn lock(&self) -> RegistryGuard<'_> {
        RegistryGuard {
            clients: self.clients.read(),
        }
    }
}

/// Scoped read guard over the client registry: the global lock as seen by
/// application code outside any callback.
pub struct RegistryGuard<'a> {
    clients: RwLockReadGuard<'a, HashMap<ConnHandle, WsClient>>,
}

impl RegistryGuard<'_> {
    /// Look up the connection wrapper for `handle`.
    ///
    /// `None` after the connection's close event has completed; callers
    /// should drop the handle from any liveness list of their own.
    #[must_use]
    pub fn connection(&self, handle: ConnHandle) -> Option<WsConn> {
        self.clients.get(&handle).map(|client| client.conn.clone())
    }

    /// Handles of all live connections, in no particular order.
    pub fn handles(&self) -> impl Iterator<Item = ConnHandle> + '_ {
        self.clients.keys().copied()
    }

    /// Number of live connections.
    #[must_use]
    pub fn len(&self) -> usize {
        self.clients.len()
    }

    /// True when no connection is live.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.clients.is_empty()
    }
}
