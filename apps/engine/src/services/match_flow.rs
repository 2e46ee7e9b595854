//! Match flow orchestration service - bridges the pure scoring engine with
//! the host-facing registry and snapshot fan-out.
//!
//! Every accepted mutation produces exactly one snapshot broadcast. The
//! domain layer stays lock-free and log-free; serialization per match and
//! structured tracing both live here.

use std::sync::Arc;

use tracing::{debug, info};
use uuid::Uuid;

use crate::config::engine::EngineConfig;
use crate::domain::events::{CandidatePlay, PlayEvent};
use crate::domain::lifecycle;
use crate::domain::pipeline;
use crate::domain::replay::replay_match;
use crate::domain::snapshot::{snapshot, MatchSnapshot};
use crate::domain::state::{MatchId, MatchSettings, MatchState, Player};
use crate::error::EngineError;
use crate::services::match_registry::MatchRegistry;
use crate::services::snapshot_hub::{SnapshotHub, SnapshotListener};

pub struct MatchFlowService {
    registry: MatchRegistry,
    hub: SnapshotHub,
    config: EngineConfig,
}

impl MatchFlowService {
    pub fn new(config: EngineConfig) -> Self {
        Self {
            registry: MatchRegistry::new(),
            hub: SnapshotHub::new(),
            config,
        }
    }

    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    /// Schedule a new match (status `pending`) and return its snapshot.
    pub fn create_match(
        &self,
        roster: Vec<Player>,
        settings: MatchSettings,
    ) -> Result<MatchSnapshot, EngineError> {
        let match_id = MatchId::new();
        let state = MatchState::new(match_id, roster, settings)?;
        info!(match_id = %match_id, players = state.roster.len(), "Creating match");
        let snap = snapshot(&state);
        self.registry.insert(state);
        Ok(snap)
    }

    /// Rebuild a match from a stored event log and adopt it (reconnect and
    /// reconciliation path). Broadcasts the rebuilt snapshot.
    pub fn load_match(
        &self,
        match_id: MatchId,
        roster: Vec<Player>,
        settings: MatchSettings,
        events: Vec<PlayEvent>,
    ) -> Result<MatchSnapshot, EngineError> {
        info!(match_id = %match_id, events = events.len(), "Loading match from log");
        let state = replay_match(match_id, roster, settings, events, &self.config)?;
        let snap = snapshot(&state);
        self.registry.insert(state);
        self.hub.broadcast(match_id, &snap);
        Ok(snap)
    }

    pub fn start_match(&self, match_id: MatchId) -> Result<MatchSnapshot, EngineError> {
        debug!(match_id = %match_id, "Transition: -> Active");
        self.mutate(match_id, |state| {
            lifecycle::start_match(state).map_err(EngineError::from)
        })
    }

    pub fn pause_match(&self, match_id: MatchId) -> Result<MatchSnapshot, EngineError> {
        debug!(match_id = %match_id, "Transition: Active -> Paused");
        self.mutate(match_id, |state| {
            lifecycle::pause_match(state).map_err(EngineError::from)
        })
    }

    pub fn resume_match(&self, match_id: MatchId) -> Result<MatchSnapshot, EngineError> {
        debug!(match_id = %match_id, "Transition: Paused -> Active");
        self.mutate(match_id, |state| {
            lifecycle::resume_match(state).map_err(EngineError::from)
        })
    }

    /// Explicit host-driven end; the scoreboard leader (if any) is recorded
    /// as winner.
    pub fn end_match(&self, match_id: MatchId) -> Result<MatchSnapshot, EngineError> {
        info!(match_id = %match_id, "Ending match");
        self.mutate(match_id, |state| {
            lifecycle::end_match(state).map_err(EngineError::from)
        })
    }

    pub fn abandon_match(&self, match_id: MatchId) -> Result<MatchSnapshot, EngineError> {
        info!(match_id = %match_id, "Abandoning match");
        self.mutate(match_id, |state| {
            lifecycle::abandon_match(state).map_err(EngineError::from)
        })
    }

    /// Validate, score, and append one play.
    pub fn submit_play(
        &self,
        match_id: MatchId,
        candidate: CandidatePlay,
    ) -> Result<MatchSnapshot, EngineError> {
        debug!(
            match_id = %match_id,
            thrower = %candidate.thrower_id,
            throw = %candidate.throw,
            "Submitting play"
        );
        self.mutate(match_id, |state| {
            let next = pipeline::submit_play(state, candidate, &self.config)?;
            if let Some(event) = next.last_event() {
                info!(
                    match_id = %match_id,
                    event_id = %event.id,
                    delta = event.point_delta,
                    team_one = next.scores.team_one,
                    team_two = next.scores.team_two,
                    "Play accepted"
                );
                if event.ended_match {
                    info!(match_id = %match_id, status = %next.status, "Play completed the match");
                }
            }
            Ok(next)
        })
    }

    /// Take back the most recent play.
    pub fn undo_last_play(&self, match_id: MatchId) -> Result<MatchSnapshot, EngineError> {
        debug!(match_id = %match_id, "Undoing last play");
        self.mutate(match_id, |state| {
            let next = pipeline::undo_last_play(state, &self.config)?;
            info!(
                match_id = %match_id,
                events = next.events.len(),
                team_one = next.scores.team_one,
                team_two = next.scores.team_two,
                "Play undone"
            );
            Ok(next)
        })
    }

    /// Current snapshot without mutating anything.
    pub fn snapshot(&self, match_id: MatchId) -> Result<MatchSnapshot, EngineError> {
        let session = self
            .registry
            .get(match_id)
            .ok_or_else(|| EngineError::match_not_found(match_id))?;
        let guard = session.lock();
        Ok(snapshot(&guard.state))
    }

    /// Subscribe a listener; it immediately receives the current snapshot,
    /// then every post-mutation broadcast until unsubscribed.
    pub fn subscribe(
        &self,
        match_id: MatchId,
        listener: Arc<dyn SnapshotListener>,
    ) -> Result<Uuid, EngineError> {
        let current = self.snapshot(match_id)?;
        let token = self.hub.register(match_id, listener.clone());
        debug!(match_id = %match_id, token = %token, "Listener subscribed");
        listener.on_snapshot(&current);
        Ok(token)
    }

    pub fn unsubscribe(&self, match_id: MatchId, token: Uuid) {
        debug!(match_id = %match_id, token = %token, "Listener unsubscribed");
        self.hub.unregister(match_id, token);
    }

    /// Drop a match and all of its subscribers. Returns whether it existed.
    pub fn evict_match(&self, match_id: MatchId) -> bool {
        let existed = self.registry.remove(match_id).is_some();
        self.hub.clear_match(match_id);
        if existed {
            info!(match_id = %match_id, "Match evicted");
        }
        existed
    }

    /// Apply one state transition under the match lock, then broadcast the
    /// resulting snapshot.
    fn mutate<F>(&self, match_id: MatchId, apply: F) -> Result<MatchSnapshot, EngineError>
    where
        F: FnOnce(&MatchState) -> Result<MatchState, EngineError>,
    {
        let session = self
            .registry
            .get(match_id)
            .ok_or_else(|| EngineError::match_not_found(match_id))?;
        let mut guard = session.lock();
        let next = apply(&guard.state)?;
        guard.state = next;
        let snap = snapshot(&guard.state);
        drop(guard);
        self.hub.broadcast(match_id, &snap);
        Ok(snap)
    }
}
