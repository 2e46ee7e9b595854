//! Pure scoring calculator: one throw (plus its answers) in, one resolution out.
//!
//! `resolve_throw` is deterministic and side-effect free. The pipeline owns
//! everything stateful around it: clamping against live scores, event
//! finalization, and completion.

use crate::config::engine::EngineConfig;
use crate::domain::events::{DefensePlay, FifaAction, Redemption};
use crate::domain::lifecycle::at_match_point;
use crate::domain::play_types::{play_type, OutcomeClass, PlayKind, ThrowKind};
use crate::domain::state::{MatchSettings, TeamId, TeamScores};
use crate::errors::domain::ConfigurationError;

/// Which side, if any, the resolved points go to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PointRecipient {
    ThrowerTeam,
    OpponentTeam,
    None,
}

/// Outcome of resolving a single throw.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ThrowResolution {
    /// Raw delta before any clamp; applied to `recipient`.
    pub point_delta: i32,
    pub recipient: PointRecipient,
    /// Side channel, distinct from scoring: the thrower's team loses
    /// immediately (self sink).
    pub forces_loss: bool,
}

/// Everything `resolve_throw` needs beyond the play itself.
#[derive(Debug, Clone, Copy)]
pub struct ScoringContext<'a> {
    pub thrower_team: TeamId,
    pub scores: &'a TeamScores,
    pub settings: &'a MatchSettings,
    pub config: &'a EngineConfig,
}

/// FIFA-eligible throws: bad outcome class, excluding the terminal self sink.
pub fn fifa_eligible(throw: ThrowKind) -> Result<bool, ConfigurationError> {
    let def = play_type(PlayKind::from_throw(throw))?;
    Ok(def.class == OutcomeClass::Bad && throw != ThrowKind::SelfSink)
}

/// Resolve one throw against its recorded defense, kick, and redemption.
///
/// Rules are evaluated in order; the first match wins:
/// 1. successful redemption (negates the throw, penalizes the opponent),
/// 2. FIFA Save (bad throw + kick + named defender + catch),
/// 3. negating catch,
/// 4. self sink (scores nothing, forces the loss),
/// 5. base points from the registry, with SINK valued per settings.
pub fn resolve_throw(
    throw: ThrowKind,
    defense: Option<&DefensePlay>,
    fifa: Option<&FifaAction>,
    redemption: Option<&Redemption>,
    ctx: ScoringContext<'_>,
) -> Result<ThrowResolution, ConfigurationError> {
    let throw_def = play_type(PlayKind::from_throw(throw))?;

    // Rule 1: a successful redemption negates everything else.
    if redemption.map(|r| r.success).unwrap_or(false) {
        return Ok(ThrowResolution {
            point_delta: -1,
            recipient: PointRecipient::OpponentTeam,
            forces_loss: false,
        });
    }

    // Rule 2: FIFA Save. All four conditions must hold.
    let caught = defense.map(|d| d.outcome.is_catch()).unwrap_or(false);
    let defender_named = defense.map(|d| !d.defender_ids.is_empty()).unwrap_or(false);
    if fifa_eligible(throw)? && fifa.is_some() && defender_named && caught {
        let defending_team = ctx.thrower_team.opponent();
        let suppressed = !ctx.config.fifa_save_at_match_point
            && at_match_point(defending_team, ctx.scores, ctx.settings);
        if !suppressed {
            let save_def = play_type(PlayKind::FifaSave)?;
            return Ok(ThrowResolution {
                point_delta: save_def.base_points,
                recipient: PointRecipient::OpponentTeam,
                forces_loss: false,
            });
        }
        // Suppressed at match point: fall through to the plain catch below.
    }

    // Rule 3: a catch zeroes out the throw.
    if caught {
        return Ok(ThrowResolution {
            point_delta: 0,
            recipient: PointRecipient::None,
            forces_loss: false,
        });
    }

    // Rule 4: self sink scores nothing and ends the match.
    if throw == ThrowKind::SelfSink {
        return Ok(ThrowResolution {
            point_delta: 0,
            recipient: PointRecipient::None,
            forces_loss: true,
        });
    }

    // Rule 5: base points stand, credited to the thrower's team even when
    // the type is worth nothing. Non-negating defenses never zero a throw.
    let points = if throw == ThrowKind::Sink {
        ctx.settings.sink_points as i32
    } else {
        throw_def.base_points
    };
    Ok(ThrowResolution {
        point_delta: points,
        recipient: PointRecipient::ThrowerTeam,
        forces_loss: false,
    })
}
