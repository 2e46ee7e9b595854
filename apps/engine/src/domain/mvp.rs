//! MVP selection over the live aggregates.
//!
//! Always a full recompute from current stats after a fold or unfold, never
//! an incremental adjustment, so undo needs no MVP bookkeeping of its own.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::domain::state::PlayerId;
use crate::domain::stats::LivePlayerStats;

/// Tunable weights for the composite MVP score.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct MvpWeights {
    /// Multiplier on hit rate (scoring throws over total throws).
    pub hit_rate_weight: f64,
    /// Flat bonus while the player is on fire.
    pub on_fire_bonus: f64,
}

impl Default for MvpWeights {
    fn default() -> Self {
        Self {
            hit_rate_weight: 5.0,
            on_fire_bonus: 2.0,
        }
    }
}

/// Composite ranking value for one player.
pub fn composite_score(stats: &LivePlayerStats, weights: &MvpWeights) -> f64 {
    let hit_rate = if stats.throws == 0 {
        0.0
    } else {
        f64::from(stats.hits) / f64::from(stats.throws)
    };
    let mut composite = f64::from(stats.score) + hit_rate * weights.hit_rate_weight;
    if stats.currently_on_fire {
        composite += weights.on_fire_bonus;
    }
    composite
}

/// Best composite score across the roster, ties broken by ascending player
/// id. `None` until at least one scoring throw has been recorded.
pub fn select_mvp(
    stats: &BTreeMap<PlayerId, LivePlayerStats>,
    weights: &MvpWeights,
) -> Option<PlayerId> {
    if stats.values().all(|s| s.hits == 0) {
        return None;
    }
    let mut best: Option<(PlayerId, f64)> = None;
    for (id, player_stats) in stats {
        let composite = composite_score(player_stats, weights);
        match &best {
            // Strictly-greater replacement keeps the lowest id on ties.
            Some((_, leader)) if composite <= *leader => {}
            _ => best = Some((*id, composite)),
        }
    }
    best.map(|(id, _)| id)
}
