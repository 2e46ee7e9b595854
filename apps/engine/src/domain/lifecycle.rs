//! Match lifecycle state machine and win-condition helpers.
//!
//! Transitions are pure: each operation returns a new `MatchState` and never
//! mutates its input. Auto-completion (win condition, self sink) is applied
//! by the pipeline, not here.

use crate::domain::state::{MatchOutcome, MatchSettings, MatchState, MatchStatus, OutcomeKind, TeamId, TeamScores};
use crate::errors::domain::{LifecycleAction, TransitionError};

/// pending -> active
pub fn start_match(state: &MatchState) -> Result<MatchState, TransitionError> {
    if state.status != MatchStatus::Pending {
        return Err(TransitionError {
            action: LifecycleAction::Start,
            from: state.status,
        });
    }
    let mut next = state.clone();
    next.status = MatchStatus::Active;
    Ok(next)
}

/// active -> paused
pub fn pause_match(state: &MatchState) -> Result<MatchState, TransitionError> {
    if state.status != MatchStatus::Active {
        return Err(TransitionError {
            action: LifecycleAction::Pause,
            from: state.status,
        });
    }
    let mut next = state.clone();
    next.status = MatchStatus::Paused;
    Ok(next)
}

/// paused -> active
pub fn resume_match(state: &MatchState) -> Result<MatchState, TransitionError> {
    if state.status != MatchStatus::Paused {
        return Err(TransitionError {
            action: LifecycleAction::Resume,
            from: state.status,
        });
    }
    let mut next = state.clone();
    next.status = MatchStatus::Active;
    Ok(next)
}

/// active -> completed, explicitly called by the host.
///
/// Distinct from win-condition auto-completion: the leader at the time of the
/// call is recorded as winner, or no winner when tied.
pub fn end_match(state: &MatchState) -> Result<MatchState, TransitionError> {
    if state.status != MatchStatus::Active {
        return Err(TransitionError {
            action: LifecycleAction::End,
            from: state.status,
        });
    }
    let mut next = state.clone();
    next.status = MatchStatus::Completed;
    next.outcome = Some(MatchOutcome {
        winner: next.scores.leader(),
        kind: OutcomeKind::Explicit,
    });
    Ok(next)
}

/// active | paused -> abandoned
pub fn abandon_match(state: &MatchState) -> Result<MatchState, TransitionError> {
    if state.status != MatchStatus::Active && state.status != MatchStatus::Paused {
        return Err(TransitionError {
            action: LifecycleAction::Abandon,
            from: state.status,
        });
    }
    let mut next = state.clone();
    next.status = MatchStatus::Abandoned;
    next.outcome = None;
    Ok(next)
}

/// Would `score` over `opponent` satisfy the win condition?
pub fn satisfies_win(score: i32, opponent: i32, settings: &MatchSettings) -> bool {
    score >= settings.score_limit as i32 && (!settings.win_by_two || score - opponent >= 2)
}

/// Team currently satisfying the win condition, if any. At most one team can
/// qualify because scores move one event at a time.
pub fn winning_team(scores: &TeamScores, settings: &MatchSettings) -> Option<TeamId> {
    for team in [TeamId::TeamOne, TeamId::TeamTwo] {
        if satisfies_win(scores.get(team), scores.get(team.opponent()), settings) {
            return Some(team);
        }
    }
    None
}

/// A team is at match point when one more point would win it the match.
pub fn at_match_point(team: TeamId, scores: &TeamScores, settings: &MatchSettings) -> bool {
    satisfies_win(scores.get(team) + 1, scores.get(team.opponent()), settings)
}
