//! Active WebSocket session registry.
//!
//! Tracks one live socket per user so messages can be pushed to whichever
//! connection is current. A reconnect replaces the previous handle; the old
//! connection's cleanup must not tear down the new one, so removal is
//! guarded by the connection id.

use dashmap::DashMap;
use tokio::sync::mpsc;
use uuid::Uuid;

/// Handle to one live WebSocket connection.
struct SessionHandle {
    conn_id: Uuid,
    sender: mpsc::UnboundedSender<String>,
}

/// Registry of live WebSocket sessions keyed by user id.
#[derive(Default)]
pub struct SessionRegistry {
    sessions: DashMap<String, SessionHandle>,
}

impl SessionRegistry {
    pub fn new() -> Self {
        Self {
            sessions: DashMap::new(),
        }
    }

    /// Register a connection for a user, silently replacing any previous one.
    ///
    /// Returns the connection id the socket task passes back at disconnect.
    pub fn register(&self, user_id: &str, sender: mpsc::UnboundedSender<String>) -> Uuid {
        let conn_id = Uuid::now_v7();
        self.sessions
            .insert(user_id.to_string(), SessionHandle { conn_id, sender });
        conn_id
    }

    /// Queue a text frame for a user's live socket.
    ///
    /// Returns false when the user has no live connection or its receiver
    /// is gone.
    pub fn send_to(&self, user_id: &str, frame: String) -> bool {
        match self.sessions.get(user_id) {
            Some(handle) => handle.sender.send(frame).is_ok(),
            None => false,
        }
    }

    /// Remove a user's session if it still belongs to the given connection.
    pub fn remove_if_owner(&self, user_id: &str, conn_id: Uuid) {
        self.sessions
            .remove_if(user_id, |_, handle| handle.conn_id == conn_id);
    }

    /// Number of live connections.
    pub fn active_count(&self) -> usize {
        self.sessions.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_register_and_send() {
        let registry = SessionRegistry::new();
        let (tx, mut rx) = mpsc::unbounded_channel();

        registry.register("alice", tx);
        assert_eq!(registry.active_count(), 1);

        assert!(registry.send_to("alice", "hello".to_string()));
        assert_eq!(rx.try_recv().unwrap(), "hello");
    }

    #[test]
    fn test_send_to_unknown_user_is_false() {
        let registry = SessionRegistry::new();
        assert!(!registry.send_to("nobody", "hello".to_string()));
    }

    #[test]
    fn test_reconnect_replaces_previous_connection() {
        let registry = SessionRegistry::new();
        let (tx1, mut rx1) = mpsc::unbounded_channel();
        let (tx2, mut rx2) = mpsc::unbounded_channel();

        let first = registry.register("alice", tx1);
        let second = registry.register("alice", tx2);
        assert_ne!(first, second);
        assert_eq!(registry.active_count(), 1);

        assert!(registry.send_to("alice", "frame".to_string()));
        assert!(rx1.try_recv().is_err());
        assert_eq!(rx2.try_recv().unwrap(), "frame");
    }

    #[test]
    fn test_stale_disconnect_does_not_remove_new_connection() {
        let registry = SessionRegistry::new();
        let (tx1, _rx1) = mpsc::unbounded_channel();
        let (tx2, _rx2) = mpsc::unbounded_channel();

        let first = registry.register("alice", tx1);
        let second = registry.register("alice", tx2);

        // The replaced connection cleans up late; the live one must survive.
        registry.remove_if_owner("alice", first);
        assert_eq!(registry.active_count(), 1);

        registry.remove_if_owner("alice", second);
        assert_eq!(registry.active_count(), 0);
    }
}
