//! Candidate plays and finalized events.
//!
//! A `CandidatePlay` is what a host hands to the pipeline; a `PlayEvent` is
//! what the pipeline appends to the log once validation and scoring have run.
//! Event serialization is lossless and order-preserving: replaying the log is
//! the only sanctioned way to reconstruct aggregates from history.

use std::fmt::{Display, Formatter, Result as FmtResult};

use serde::{Deserialize, Serialize};
use time::OffsetDateTime;
use ulid::Ulid;

use crate::domain::play_types::{DefenseKind, ThrowKind};
use crate::domain::state::{PlayerId, TeamId};

/// Event identifier (ULID), assigned when the pipeline finalizes a play.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct EventId(pub Ulid);

impl EventId {
    pub fn new() -> Self {
        Self(Ulid::new())
    }
}

impl Default for EventId {
    fn default() -> Self {
        Self::new()
    }
}

impl Display for EventId {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        write!(f, "{}", self.0)
    }
}

/// Defensive answer to a throw. Defenders may be left unnamed when the
/// scorekeeper logs only the outcome; a FIFA Save requires at least one
/// named defender.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DefensePlay {
    pub outcome: DefenseKind,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub defender_ids: Vec<PlayerId>,
}

/// FIFA kick attempt by a defending player.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct FifaAction {
    pub kicker_id: PlayerId,
}

/// Redemption attempt riding on the current throw. On success the throw is
/// negated and the targeted opponent is penalized one point.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Redemption {
    pub success: bool,
    pub target_player_id: PlayerId,
}

/// Host-submitted play, not yet validated or scored.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CandidatePlay {
    pub thrower_id: PlayerId,
    pub throw: ThrowKind,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub defense: Option<DefensePlay>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub fifa: Option<FifaAction>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub redemption: Option<Redemption>,
    /// Capture time supplied by the host; the pipeline stamps the current
    /// time when absent.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    #[serde(with = "time::serde::rfc3339::option")]
    pub timestamp: Option<OffsetDateTime>,
}

impl CandidatePlay {
    /// Bare throw with no defense, kick, or redemption attached.
    pub fn throw(thrower_id: PlayerId, throw: ThrowKind) -> Self {
        Self {
            thrower_id,
            throw,
            defense: None,
            fifa: None,
            redemption: None,
            timestamp: None,
        }
    }
}

/// Finalized, scored play as it lives in the append-only log.
///
/// `point_delta` is the effective applied delta (clamping already folded in)
/// and `ended_match` marks the event that completed the match, which is what
/// makes the completion undoable.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PlayEvent {
    pub id: EventId,
    #[serde(with = "time::serde::rfc3339")]
    pub timestamp: OffsetDateTime,
    pub thrower_id: PlayerId,
    /// Thrower's team at submission time.
    pub team: TeamId,
    pub throw: ThrowKind,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub defense: Option<DefensePlay>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub fifa: Option<FifaAction>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub redemption: Option<Redemption>,
    pub point_delta: i32,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub recipient_team: Option<TeamId>,
    #[serde(default)]
    pub ended_match: bool,
}

impl PlayEvent {
    /// True when the redemption attempt on this event succeeded.
    pub fn redemption_succeeded(&self) -> bool {
        self.redemption.map(|r| r.success).unwrap_or(false)
    }

    /// True when this event resolved as a FIFA Save: a kick was on, and the
    /// points went to the defending team. A successful redemption or a
    /// suppressed save never leaves a positive delta pointed at the
    /// defenders, so those cannot match.
    pub fn is_fifa_save(&self) -> bool {
        self.fifa.is_some()
            && self.point_delta > 0
            && self.recipient_team == Some(self.team.opponent())
    }
}
