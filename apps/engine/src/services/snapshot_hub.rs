//! Fan-out of match snapshots to subscribed hosts.

use std::sync::Arc;

use dashmap::DashMap;
use uuid::Uuid;

use crate::domain::snapshot::MatchSnapshot;
use crate::domain::state::MatchId;

/// Receives every snapshot broadcast for the matches it subscribed to.
/// Implementations must not block; the hub calls them inline.
pub trait SnapshotListener: Send + Sync {
    fn on_snapshot(&self, snapshot: &MatchSnapshot);
}

#[derive(Default)]
pub struct SnapshotHub {
    subscribers: DashMap<MatchId, DashMap<Uuid, Arc<dyn SnapshotListener>>>,
}

impl SnapshotHub {
    pub fn new() -> Self {
        Self {
            subscribers: DashMap::new(),
        }
    }

    pub fn register(&self, match_id: MatchId, listener: Arc<dyn SnapshotListener>) -> Uuid {
        let token = Uuid::new_v4();
        let entry = self.subscribers.entry(match_id).or_insert_with(DashMap::new);
        entry.insert(token, listener);
        token
    }

    pub fn unregister(&self, match_id: MatchId, token: Uuid) {
        if let Some(entry) = self.subscribers.get(&match_id) {
            entry.remove(&token);
        }
        // Drop the per-match map once the last listener leaves.
        self.subscribers
            .remove_if(&match_id, |_, listeners| listeners.is_empty());
    }

    /// Drop every subscriber of a match (match evicted or abandoned).
    pub fn clear_match(&self, match_id: MatchId) {
        self.subscribers.remove(&match_id);
    }

    pub fn broadcast(&self, match_id: MatchId, snapshot: &MatchSnapshot) {
        if let Some(entry) = self.subscribers.get(&match_id) {
            for listener in entry.iter() {
                listener.value().on_snapshot(snapshot);
            }
        }
    }

    pub fn listener_count(&self, match_id: MatchId) -> usize {
        self.subscribers
            .get(&match_id)
            .map(|entry| entry.len())
            .unwrap_or(0)
    }
}
