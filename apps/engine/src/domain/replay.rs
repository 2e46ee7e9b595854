//! Reconstruction of a match from its stored event log.
//!
//! Replay is the only sanctioned way to turn history back into aggregates.
//! Each event is re-validated against the roster and re-resolved against the
//! running scores; a stored delta the rules cannot reproduce means the log
//! and the rule table have diverged and the whole replay is rejected.

use crate::config::engine::EngineConfig;
use crate::domain::events::PlayEvent;
use crate::domain::lifecycle::winning_team;
use crate::domain::mvp::select_mvp;
use crate::domain::pipeline::{finalize_delta, validate_defending_side};
use crate::domain::scoring::{resolve_throw, ScoringContext};
use crate::domain::state::{
    require_player, MatchId, MatchOutcome, MatchSettings, MatchState, MatchStatus, OutcomeKind,
    Player,
};
use crate::domain::stats::fold_event;
use crate::errors::domain::ReplayError;

/// Rebuild the state a log describes.
///
/// Returns an active match, or a completed one when the final event ended
/// it. Host-driven lifecycle moves (pause, explicit end, abandon) are not
/// part of the event log; callers reapply those on top of the result.
pub fn replay_match(
    match_id: MatchId,
    roster: Vec<Player>,
    settings: MatchSettings,
    events: Vec<PlayEvent>,
    config: &EngineConfig,
) -> Result<MatchState, ReplayError> {
    let mut state = MatchState::new(match_id, roster, settings)?;
    state.status = MatchStatus::Active;

    for event in events {
        if state.status != MatchStatus::Active {
            return Err(ReplayError::corrupted(format!(
                "event {} follows a completed match",
                event.id
            )));
        }

        let thrower = require_player(&state, event.thrower_id, "thrower")?;
        let thrower_team = thrower.team;
        if event.team != thrower_team {
            return Err(ReplayError::corrupted(format!(
                "event {} records team {} for a {} thrower",
                event.id, event.team, thrower_team
            )));
        }
        validate_defending_side(
            &state,
            event.defense.as_ref(),
            event.fifa.as_ref(),
            event.redemption.as_ref(),
            thrower_team.opponent(),
        )?;

        let resolution = resolve_throw(
            event.throw,
            event.defense.as_ref(),
            event.fifa.as_ref(),
            event.redemption.as_ref(),
            ScoringContext {
                thrower_team,
                scores: &state.scores,
                settings: &state.settings,
                config,
            },
        )?;
        let (point_delta, recipient_team) =
            finalize_delta(&resolution, thrower_team, &state.scores, config);
        if point_delta != event.point_delta || recipient_team != event.recipient_team {
            return Err(ReplayError::corrupted(format!(
                "event {} stored {:+} for {:?}, rules produce {:+} for {:?}",
                event.id, event.point_delta, event.recipient_team, point_delta, recipient_team
            )));
        }

        fold_event(&mut state.scores, &mut state.stats, &event)?;

        let completed = resolution.forces_loss
            || winning_team(&state.scores, &state.settings).is_some();
        if completed != event.ended_match {
            return Err(ReplayError::corrupted(format!(
                "event {} completion flag disagrees with the rules",
                event.id
            )));
        }
        if event.ended_match {
            state.status = MatchStatus::Completed;
            state.outcome = Some(if resolution.forces_loss {
                MatchOutcome {
                    winner: Some(thrower_team.opponent()),
                    kind: OutcomeKind::SelfSink,
                }
            } else {
                MatchOutcome {
                    winner: winning_team(&state.scores, &state.settings),
                    kind: OutcomeKind::ScoreLimit,
                }
            });
        }

        state.events.push(event);
    }

    state.mvp = select_mvp(&state.stats, &config.mvp);
    Ok(state)
}
