//! Consecutive-qualifying-throw tracking.
//!
//! Every throw either builds the thrower's streak or resets it; a defense
//! kind flagged `resets_streak` (DROP) resets the defender's. Because a reset
//! destroys the previous counter, each streak-affecting play pushes the prior
//! value onto a per-player history stack, making [`unapply_streak`] an exact
//! inverse of [`apply_streak`] across any number of undos.

use crate::domain::play_types::{PlayCategory, PlayTypeDefinition};
use crate::domain::rules::ON_FIRE_THRESHOLD;
use crate::domain::stats::LivePlayerStats;
use crate::errors::domain::UndoError;

/// Whether this play kind touches the acting player's streak at all.
/// Throws always do (build or reset); off-throw kinds only when flagged.
pub fn affects_streak(def: &PlayTypeDefinition) -> bool {
    def.builds_streak || def.resets_streak || def.category == PlayCategory::Throw
}

/// Advance the player's streak for one play.
pub fn apply_streak(stats: &mut LivePlayerStats, def: &PlayTypeDefinition) {
    if !affects_streak(def) {
        return;
    }
    stats.streak_history.push(stats.hit_streak);
    if def.builds_streak {
        stats.hit_streak += 1;
        // Counts each crossing into the on-fire state, not time spent there.
        if stats.hit_streak == ON_FIRE_THRESHOLD {
            stats.on_fire_count += 1;
        }
    } else {
        stats.hit_streak = 0;
    }
    stats.currently_on_fire = stats.hit_streak >= ON_FIRE_THRESHOLD;
}

/// Exact inverse of [`apply_streak`].
///
/// Pops the history stack to restore the prior counter. An empty stack for a
/// streak-affecting kind means the caller is unwinding out of order.
pub fn unapply_streak(
    stats: &mut LivePlayerStats,
    def: &PlayTypeDefinition,
) -> Result<(), UndoError> {
    if !affects_streak(def) {
        return Ok(());
    }
    let prior = stats
        .streak_history
        .pop()
        .ok_or_else(|| UndoError::corrupted("streak history empty on unapply"))?;
    if stats.hit_streak == ON_FIRE_THRESHOLD && prior == ON_FIRE_THRESHOLD - 1 {
        // This play was the crossing; take back the lifetime credit.
        stats.on_fire_count = stats
            .on_fire_count
            .checked_sub(1)
            .ok_or_else(|| UndoError::corrupted("on-fire count underflow on unapply"))?;
    }
    stats.hit_streak = prior;
    stats.currently_on_fire = stats.hit_streak >= ON_FIRE_THRESHOLD;
    Ok(())
}
