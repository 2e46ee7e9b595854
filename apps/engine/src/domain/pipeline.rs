//! The submission and undo pipeline over the append-only event log.
//!
//! Both operations are all-or-nothing: they take the current state by
//! reference and return a fresh one, so any rejection leaves the caller's
//! state exactly as it was.

use std::collections::BTreeSet;

use time::OffsetDateTime;

use crate::config::engine::EngineConfig;
use crate::domain::events::{CandidatePlay, DefensePlay, EventId, FifaAction, PlayEvent, Redemption};
use crate::domain::lifecycle::winning_team;
use crate::domain::mvp::select_mvp;
use crate::domain::scoring::{resolve_throw, PointRecipient, ScoringContext, ThrowResolution};
use crate::domain::state::{
    require_on_team, require_player, MatchOutcome, MatchState, MatchStatus, OutcomeKind,
    TeamScores, TeamId,
};
use crate::domain::stats::{fold_event, unfold_event};
use crate::errors::domain::{SubmissionError, UndoError, ValidationError, ValidationKind};

/// Validate, score, and append one play.
///
/// Accepted only while the match is active. On success the returned state
/// carries the finalized event at the end of its log, refreshed aggregates
/// and MVP, and any auto-completion (win condition or self sink) applied.
pub fn submit_play(
    state: &MatchState,
    candidate: CandidatePlay,
    config: &EngineConfig,
) -> Result<MatchState, SubmissionError> {
    if state.status != MatchStatus::Active {
        return Err(SubmissionError::NotActive(state.status));
    }

    let thrower = require_player(state, candidate.thrower_id, "thrower")?;
    let thrower_team = thrower.team;
    let defending = thrower_team.opponent();
    validate_defending_side(
        state,
        candidate.defense.as_ref(),
        candidate.fifa.as_ref(),
        candidate.redemption.as_ref(),
        defending,
    )?;

    let resolution = resolve_throw(
        candidate.throw,
        candidate.defense.as_ref(),
        candidate.fifa.as_ref(),
        candidate.redemption.as_ref(),
        ScoringContext {
            thrower_team,
            scores: &state.scores,
            settings: &state.settings,
            config,
        },
    )?;
    let (point_delta, recipient_team) =
        finalize_delta(&resolution, thrower_team, &state.scores, config);

    let mut event = PlayEvent {
        id: EventId::new(),
        timestamp: candidate.timestamp.unwrap_or_else(OffsetDateTime::now_utc),
        thrower_id: candidate.thrower_id,
        team: thrower_team,
        throw: candidate.throw,
        defense: candidate.defense,
        fifa: candidate.fifa,
        redemption: candidate.redemption,
        point_delta,
        recipient_team,
        ended_match: false,
    };

    let mut next = state.clone();
    fold_event(&mut next.scores, &mut next.stats, &event)?;
    next.mvp = select_mvp(&next.stats, &config.mvp);

    if resolution.forces_loss {
        next.status = MatchStatus::Completed;
        next.outcome = Some(MatchOutcome {
            winner: Some(defending),
            kind: OutcomeKind::SelfSink,
        });
        event.ended_match = true;
    } else if let Some(winner) = winning_team(&next.scores, &next.settings) {
        next.status = MatchStatus::Completed;
        next.outcome = Some(MatchOutcome {
            winner: Some(winner),
            kind: OutcomeKind::ScoreLimit,
        });
        event.ended_match = true;
    }

    next.events.push(event);
    Ok(next)
}

/// Defenders, kicker, and redemption target must all belong to the team
/// defending the throw. Shared with replay, which re-checks stored events
/// against the roster.
pub(crate) fn validate_defending_side(
    state: &MatchState,
    defense: Option<&DefensePlay>,
    fifa: Option<&FifaAction>,
    redemption: Option<&Redemption>,
    defending: TeamId,
) -> Result<(), ValidationError> {
    if let Some(defense) = defense {
        let mut seen = BTreeSet::new();
        for defender_id in &defense.defender_ids {
            let defender = require_player(state, *defender_id, "defender")?;
            require_on_team(defender, defending, "defender")?;
            if !seen.insert(*defender_id) {
                return Err(ValidationError::new(
                    ValidationKind::MalformedPlay,
                    format!("defender {defender_id} listed more than once"),
                ));
            }
        }
    }
    if let Some(fifa) = fifa {
        let kicker = require_player(state, fifa.kicker_id, "fifa kicker")?;
        require_on_team(kicker, defending, "fifa kicker")?;
    }
    if let Some(redemption) = redemption {
        let target = require_player(state, redemption.target_player_id, "redemption target")?;
        require_on_team(target, defending, "redemption target")?;
    }
    Ok(())
}

/// Turn a raw resolution into the effective delta and recipient stored on
/// the event. The zero-floor clamp is applied against the live score; a
/// penalty the clamp zeroes away drops its recipient, while a zero-point
/// base resolution keeps the thrower's team on the event.
pub(crate) fn finalize_delta(
    resolution: &ThrowResolution,
    thrower_team: TeamId,
    scores: &TeamScores,
    config: &EngineConfig,
) -> (i32, Option<TeamId>) {
    let mut recipient_team = match resolution.recipient {
        PointRecipient::ThrowerTeam => Some(thrower_team),
        PointRecipient::OpponentTeam => Some(thrower_team.opponent()),
        PointRecipient::None => None,
    };
    let mut point_delta = resolution.point_delta;
    if let Some(team) = recipient_team {
        if config.clamp_score_at_zero && point_delta < 0 {
            point_delta = point_delta.max(-scores.get(team));
            if point_delta == 0 {
                recipient_team = None;
            }
        }
    }
    (point_delta, recipient_team)
}

/// Take back the most recent play.
///
/// Permitted while active, and for a completed match exactly when the last
/// event caused the completion; undoing it reopens the match. Strict LIFO by
/// construction: only the tail of the log is ever popped.
pub fn undo_last_play(
    state: &MatchState,
    config: &EngineConfig,
) -> Result<MatchState, UndoError> {
    let last = state.last_event().ok_or(UndoError::EmptyEventLog)?;
    let undoable = match state.status {
        MatchStatus::Active => true,
        MatchStatus::Completed => last.ended_match,
        _ => false,
    };
    if !undoable {
        return Err(UndoError::NotUndoable(state.status));
    }

    let mut next = state.clone();
    let event = next.events.pop().ok_or(UndoError::EmptyEventLog)?;
    unfold_event(&mut next.scores, &mut next.stats, &event)?;
    next.mvp = select_mvp(&next.stats, &config.mvp);
    if event.ended_match {
        next.status = MatchStatus::Active;
        next.outcome = None;
    }
    Ok(next)
}
