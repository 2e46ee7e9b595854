use std::collections::BTreeMap;
use std::fmt::{Display, Formatter, Result as FmtResult};
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use ulid::Ulid;

use crate::domain::events::PlayEvent;
use crate::domain::rules::valid_sink_points;
use crate::domain::stats::LivePlayerStats;
use crate::errors::domain::{ValidationError, ValidationKind};

/// Match identifier (ULID).
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct MatchId(pub Ulid);

impl MatchId {
    pub fn new() -> Self {
        Self(Ulid::new())
    }

    pub const fn nil() -> Self {
        Self(Ulid::nil())
    }
}

impl Default for MatchId {
    fn default() -> Self {
        Self::new()
    }
}

impl Display for MatchId {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        write!(f, "{}", self.0)
    }
}

impl FromStr for MatchId {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        s.parse::<Ulid>().map(MatchId).map_err(|_| {
            ValidationError::new(ValidationKind::ParseId, format!("Parse match id: {s}"))
        })
    }
}

/// Player identifier (ULID). Ordering is the MVP tie-break order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct PlayerId(pub Ulid);

impl PlayerId {
    pub fn new() -> Self {
        Self(Ulid::new())
    }
}

impl Default for PlayerId {
    fn default() -> Self {
        Self::new()
    }
}

impl Display for PlayerId {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        write!(f, "{}", self.0)
    }
}

impl FromStr for PlayerId {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        s.parse::<Ulid>().map(PlayerId).map_err(|_| {
            ValidationError::new(ValidationKind::ParseId, format!("Parse player id: {s}"))
        })
    }
}

/// The two fixed sides of a match.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum TeamId {
    TeamOne,
    TeamTwo,
}

impl TeamId {
    pub const fn opponent(&self) -> TeamId {
        match self {
            TeamId::TeamOne => TeamId::TeamTwo,
            TeamId::TeamTwo => TeamId::TeamOne,
        }
    }

    pub const fn as_str(&self) -> &'static str {
        match self {
            TeamId::TeamOne => "TEAM_ONE",
            TeamId::TeamTwo => "TEAM_TWO",
        }
    }
}

impl Display for TeamId {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        write!(f, "{}", self.as_str())
    }
}

/// Whether a roster entry is an account holder or a walk-up guest.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RegistrationStatus {
    Registered,
    Guest,
}

/// One roster entry.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Player {
    pub id: PlayerId,
    pub team: TeamId,
    pub registration: RegistrationStatus,
    pub display_name: String,
}

/// Per-match scoring rules, fixed at creation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MatchSettings {
    /// Points required to win. Must be positive.
    pub score_limit: u32,
    /// When set, the winner must also lead by two.
    pub win_by_two: bool,
    /// Sink valuation: 3 (standard) or 5 (house rule).
    pub sink_points: u32,
    pub team_one_name: String,
    pub team_two_name: String,
}

impl MatchSettings {
    pub fn new(
        score_limit: u32,
        win_by_two: bool,
        sink_points: u32,
        team_one_name: impl Into<String>,
        team_two_name: impl Into<String>,
    ) -> Result<Self, ValidationError> {
        if score_limit == 0 {
            return Err(ValidationError::new(
                ValidationKind::InvalidSettings,
                "score_limit must be positive",
            ));
        }
        if !valid_sink_points(sink_points) {
            return Err(ValidationError::new(
                ValidationKind::InvalidSettings,
                format!("sink_points must be 3 or 5, got {sink_points}"),
            ));
        }
        Ok(Self {
            score_limit,
            win_by_two,
            sink_points,
            team_one_name: team_one_name.into(),
            team_two_name: team_two_name.into(),
        })
    }

    pub fn team_name(&self, team: TeamId) -> &str {
        match team {
            TeamId::TeamOne => &self.team_one_name,
            TeamId::TeamTwo => &self.team_two_name,
        }
    }
}

/// Match progression statuses.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MatchStatus {
    /// Scheduled but not started.
    Pending,
    /// Accepting play submissions.
    Active,
    /// Temporarily halted; no submissions, no undo.
    Paused,
    /// Finished (win condition, self sink, or explicit end).
    Completed,
    /// Called off; terminal.
    Abandoned,
}

impl MatchStatus {
    pub const fn as_str(&self) -> &'static str {
        match self {
            MatchStatus::Pending => "PENDING",
            MatchStatus::Active => "ACTIVE",
            MatchStatus::Paused => "PAUSED",
            MatchStatus::Completed => "COMPLETED",
            MatchStatus::Abandoned => "ABANDONED",
        }
    }
}

impl Display for MatchStatus {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        write!(f, "{}", self.as_str())
    }
}

/// Running team totals. Signed: the redemption penalty may drive a score
/// negative when the clamp is disabled.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct TeamScores {
    pub team_one: i32,
    pub team_two: i32,
}

impl TeamScores {
    pub const fn get(&self, team: TeamId) -> i32 {
        match team {
            TeamId::TeamOne => self.team_one,
            TeamId::TeamTwo => self.team_two,
        }
    }

    pub fn get_mut(&mut self, team: TeamId) -> &mut i32 {
        match team {
            TeamId::TeamOne => &mut self.team_one,
            TeamId::TeamTwo => &mut self.team_two,
        }
    }

    /// Team currently ahead, or None when tied.
    pub fn leader(&self) -> Option<TeamId> {
        match self.team_one.cmp(&self.team_two) {
            std::cmp::Ordering::Greater => Some(TeamId::TeamOne),
            std::cmp::Ordering::Less => Some(TeamId::TeamTwo),
            std::cmp::Ordering::Equal => None,
        }
    }
}

/// How a completed match ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutcomeKind {
    ScoreLimit,
    SelfSink,
    Explicit,
}

/// Recorded result of a completed match.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct MatchOutcome {
    /// None only for an explicit end with tied scores.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub winner: Option<TeamId>,
    pub kind: OutcomeKind,
}

/// Entire match container, sufficient for pure engine operations.
///
/// The event log is append-only; every other field is derived from it and the
/// roster/settings. Hosts must treat a completed or abandoned state as
/// immutable (undo of the completion-causing event is the one exception).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MatchState {
    pub match_id: MatchId,
    pub status: MatchStatus,
    pub settings: MatchSettings,
    pub roster: Vec<Player>,
    /// Append-only ordered history; the authoritative source of truth.
    pub events: Vec<PlayEvent>,
    pub scores: TeamScores,
    pub stats: BTreeMap<PlayerId, LivePlayerStats>,
    /// Recomputed from aggregates after every fold/unfold.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub mvp: Option<PlayerId>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub outcome: Option<MatchOutcome>,
}

impl MatchState {
    /// Schedule a new match (status `Pending`).
    ///
    /// The roster must field at least one player per team and contain no
    /// duplicate ids; roster sizes are otherwise unconstrained.
    pub fn new(
        match_id: MatchId,
        roster: Vec<Player>,
        settings: MatchSettings,
    ) -> Result<Self, ValidationError> {
        for team in [TeamId::TeamOne, TeamId::TeamTwo] {
            if !roster.iter().any(|p| p.team == team) {
                return Err(ValidationError::new(
                    ValidationKind::InvalidRoster,
                    format!("no players on {team}"),
                ));
            }
        }
        let mut seen = std::collections::BTreeSet::new();
        for player in &roster {
            if !seen.insert(player.id) {
                return Err(ValidationError::new(
                    ValidationKind::InvalidRoster,
                    format!("duplicate player id {}", player.id),
                ));
            }
        }

        let stats = roster
            .iter()
            .map(|p| (p.id, LivePlayerStats::default()))
            .collect();

        Ok(Self {
            match_id,
            status: MatchStatus::Pending,
            settings,
            roster,
            events: Vec::new(),
            scores: TeamScores::default(),
            stats,
            mvp: None,
            outcome: None,
        })
    }

    pub fn player(&self, id: PlayerId) -> Option<&Player> {
        self.roster.iter().find(|p| p.id == id)
    }

    pub fn team_of(&self, id: PlayerId) -> Option<TeamId> {
        self.player(id).map(|p| p.team)
    }

    pub fn last_event(&self) -> Option<&PlayEvent> {
        self.events.last()
    }
}

/// Look up a roster player, failing with context about the caller.
pub fn require_player<'a>(
    state: &'a MatchState,
    id: PlayerId,
    ctx: &str,
) -> Result<&'a Player, ValidationError> {
    state.player(id).ok_or_else(|| {
        ValidationError::new(
            ValidationKind::UnknownPlayer,
            format!("{ctx}: player {id} is not on the roster"),
        )
    })
}

/// Check that a referenced player belongs to the expected team.
pub fn require_on_team(
    player: &Player,
    team: TeamId,
    ctx: &str,
) -> Result<(), ValidationError> {
    if player.team != team {
        return Err(ValidationError::new(
            ValidationKind::WrongTeam,
            format!("{ctx}: player {} is not on {team}", player.id),
        ));
    }
    Ok(())
}
