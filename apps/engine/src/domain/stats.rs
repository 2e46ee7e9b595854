//! Live per-player aggregates, derived strictly by folding the event log.
//!
//! [`fold_event`] applies one finalized event to the team scores and player
//! stats; [`unfold_event`] is its exact inverse. For any aggregate state `S`
//! and event `E`, `unfold(fold(S, E), E) == S`, streak history included. The
//! inverse is strict LIFO: unwinding anything but the most recently folded
//! event trips a counter underflow or a history mismatch and surfaces as
//! [`UndoError::Corrupted`].

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::domain::events::PlayEvent;
use crate::domain::play_types::{play_type, PlayKind};
use crate::domain::state::{PlayerId, TeamScores};
use crate::domain::streak::{apply_streak, unapply_streak};
use crate::errors::domain::{ConfigurationError, UndoError};

/// Rolling aggregates for one player.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct LivePlayerStats {
    /// Personal points: rule-5 points as thrower, the save point as kicker,
    /// the penalty as redemption target.
    pub score: i32,
    pub throws: u32,
    /// Scoring throws (HIT, GOAL, SINK).
    pub hits: u32,
    pub catches: u32,
    pub drops: u32,
    pub misses: u32,
    /// Plays flagged as blunders, in any role.
    pub blunders: u32,
    pub hit_streak: u32,
    /// Lifetime number of times the player went on fire.
    pub on_fire_count: u32,
    pub currently_on_fire: bool,
    pub fifa_attempts: u32,
    pub fifa_success: u32,
    /// One counter per play kind this player took part in, ordered by kind.
    pub by_kind: BTreeMap<PlayKind, u32>,
    /// Prior streak counters, pushed by every streak-affecting play. Fuel for
    /// exact undo; rebuilt by replay rather than carried on the wire.
    #[serde(default)]
    pub streak_history: Vec<u32>,
}

fn bump_kind(stats: &mut LivePlayerStats, kind: PlayKind) {
    *stats.by_kind.entry(kind).or_insert(0) += 1;
}

/// Decrement a per-kind counter, dropping the entry at zero so the map
/// returns to its pre-fold shape.
fn unbump_kind(stats: &mut LivePlayerStats, kind: PlayKind) -> Result<(), UndoError> {
    match stats.by_kind.get_mut(&kind) {
        Some(count) if *count > 1 => {
            *count -= 1;
            Ok(())
        }
        Some(_) => {
            stats.by_kind.remove(&kind);
            Ok(())
        }
        None => Err(UndoError::corrupted(format!(
            "no {kind} counter to unwind"
        ))),
    }
}

fn step_down(counter: &mut u32, what: &str) -> Result<(), UndoError> {
    *counter = counter
        .checked_sub(1)
        .ok_or_else(|| UndoError::corrupted(format!("{what} counter underflow")))?;
    Ok(())
}

fn stats_of(
    stats: &mut BTreeMap<PlayerId, LivePlayerStats>,
    id: PlayerId,
) -> Result<&mut LivePlayerStats, UndoError> {
    stats
        .get_mut(&id)
        .ok_or_else(|| UndoError::corrupted(format!("no stats entry for player {id}")))
}

/// Apply one finalized event to the aggregates.
pub fn fold_event(
    scores: &mut TeamScores,
    stats: &mut BTreeMap<PlayerId, LivePlayerStats>,
    event: &PlayEvent,
) -> Result<(), ConfigurationError> {
    if let Some(team) = event.recipient_team {
        *scores.get_mut(team) += event.point_delta;
    }

    let throw_def = play_type(PlayKind::from_throw(event.throw))?;
    let thrower = stats.entry(event.thrower_id).or_default();
    thrower.throws += 1;
    if throw_def.builds_streak {
        thrower.hits += 1;
    }
    if throw_def.is_blunder {
        thrower.blunders += 1;
    }
    bump_kind(thrower, throw_def.kind);
    apply_streak(thrower, throw_def);
    if event.recipient_team == Some(event.team) {
        thrower.score += event.point_delta;
    }

    if let Some(defense) = &event.defense {
        let defense_def = play_type(PlayKind::from_defense(defense.outcome))?;
        for defender_id in &defense.defender_ids {
            let defender = stats.entry(*defender_id).or_default();
            if defense.outcome.is_catch() {
                defender.catches += 1;
            } else if defense_def.kind == PlayKind::Drop {
                defender.drops += 1;
            } else if defense_def.kind == PlayKind::Miss {
                defender.misses += 1;
            }
            if defense_def.is_blunder {
                defender.blunders += 1;
            }
            bump_kind(defender, defense_def.kind);
            apply_streak(defender, defense_def);
        }
    }

    if let Some(fifa) = &event.fifa {
        let saved = event.is_fifa_save();
        let kicker = stats.entry(fifa.kicker_id).or_default();
        kicker.fifa_attempts += 1;
        bump_kind(kicker, PlayKind::FifaKick);
        if saved {
            kicker.fifa_success += 1;
            bump_kind(kicker, PlayKind::FifaSave);
            kicker.score += event.point_delta;
        }
    }

    if let Some(redemption) = &event.redemption {
        let target = stats.entry(redemption.target_player_id).or_default();
        bump_kind(target, PlayKind::Redemption);
        if redemption.success {
            target.score += event.point_delta;
        }
    }

    Ok(())
}

/// Exact inverse of [`fold_event`], in mirrored order.
pub fn unfold_event(
    scores: &mut TeamScores,
    stats: &mut BTreeMap<PlayerId, LivePlayerStats>,
    event: &PlayEvent,
) -> Result<(), UndoError> {
    if let Some(redemption) = &event.redemption {
        let target = stats_of(stats, redemption.target_player_id)?;
        if redemption.success {
            target.score -= event.point_delta;
        }
        unbump_kind(target, PlayKind::Redemption)?;
    }

    if let Some(fifa) = &event.fifa {
        let saved = event.is_fifa_save();
        let kicker = stats_of(stats, fifa.kicker_id)?;
        if saved {
            kicker.score -= event.point_delta;
            unbump_kind(kicker, PlayKind::FifaSave)?;
            step_down(&mut kicker.fifa_success, "fifa success")?;
        }
        unbump_kind(kicker, PlayKind::FifaKick)?;
        step_down(&mut kicker.fifa_attempts, "fifa attempt")?;
    }

    if let Some(defense) = &event.defense {
        let defense_def = play_type(PlayKind::from_defense(defense.outcome))
            .map_err(|err| UndoError::corrupted(err.to_string()))?;
        for defender_id in defense.defender_ids.iter().rev() {
            let defender = stats_of(stats, *defender_id)?;
            unapply_streak(defender, defense_def)?;
            unbump_kind(defender, defense_def.kind)?;
            if defense_def.is_blunder {
                step_down(&mut defender.blunders, "blunder")?;
            }
            if defense.outcome.is_catch() {
                step_down(&mut defender.catches, "catch")?;
            } else if defense_def.kind == PlayKind::Drop {
                step_down(&mut defender.drops, "drop")?;
            } else if defense_def.kind == PlayKind::Miss {
                step_down(&mut defender.misses, "miss")?;
            }
        }
    }

    let throw_def = play_type(PlayKind::from_throw(event.throw))
        .map_err(|err| UndoError::corrupted(err.to_string()))?;
    let thrower = stats_of(stats, event.thrower_id)?;
    if event.recipient_team == Some(event.team) {
        thrower.score -= event.point_delta;
    }
    unapply_streak(thrower, throw_def)?;
    unbump_kind(thrower, throw_def.kind)?;
    if throw_def.is_blunder {
        step_down(&mut thrower.blunders, "blunder")?;
    }
    if throw_def.builds_streak {
        step_down(&mut thrower.hits, "hit")?;
    }
    step_down(&mut thrower.throws, "throw")?;

    if let Some(team) = event.recipient_team {
        *scores.get_mut(team) -= event.point_delta;
    }

    Ok(())
}
