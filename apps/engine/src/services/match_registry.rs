//! In-memory registry of live matches.

use std::sync::Arc;

use dashmap::DashMap;
use parking_lot::Mutex;

use crate::domain::state::{MatchId, MatchState};

/// A live match behind its coarse lock. Hosts owe the engine serialized
/// mutations per match; holding this lock across a whole submit or undo
/// round is how they pay that debt.
pub struct MatchSession {
    pub state: MatchState,
}

impl MatchSession {
    pub fn new(state: MatchState) -> Self {
        Self { state }
    }
}

#[derive(Default)]
pub struct MatchRegistry {
    matches: DashMap<MatchId, Arc<Mutex<MatchSession>>>,
}

impl MatchRegistry {
    pub fn new() -> Self {
        Self {
            matches: DashMap::new(),
        }
    }

    /// Insert a fresh session, replacing any previous one under the same id.
    pub fn insert(&self, state: MatchState) -> Arc<Mutex<MatchSession>> {
        let match_id = state.match_id;
        let session = Arc::new(Mutex::new(MatchSession::new(state)));
        self.matches.insert(match_id, session.clone());
        session
    }

    pub fn get(&self, match_id: MatchId) -> Option<Arc<Mutex<MatchSession>>> {
        self.matches.get(&match_id).map(|entry| entry.value().clone())
    }

    pub fn remove(&self, match_id: MatchId) -> Option<Arc<Mutex<MatchSession>>> {
        self.matches.remove(&match_id).map(|(_, session)| session)
    }

    pub fn contains(&self, match_id: MatchId) -> bool {
        self.matches.contains_key(&match_id)
    }

    pub fn len(&self) -> usize {
        self.matches.len()
    }

    pub fn is_empty(&self) -> bool {
        self.matches.is_empty()
    }
}
