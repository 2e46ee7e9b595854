//! Public snapshot API for observing match state without exposing internals.

use serde::{Deserialize, Serialize};

use crate::domain::events::PlayEvent;
use crate::domain::play_types::ThrowKind;
use crate::domain::state::{
    MatchId, MatchState, MatchStatus, OutcomeKind, PlayerId, RegistrationStatus, TeamId,
};
use crate::domain::stats::LivePlayerStats;

/// Public stat line for one player. Mirrors the live aggregates minus the
/// undo bookkeeping.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct PlayerStatLine {
    pub score: i32,
    pub throws: u32,
    pub hits: u32,
    pub catches: u32,
    pub drops: u32,
    pub misses: u32,
    pub blunders: u32,
    pub hit_streak: u32,
    pub currently_on_fire: bool,
    pub on_fire_count: u32,
    pub fifa_attempts: u32,
    pub fifa_success: u32,
}

impl PlayerStatLine {
    fn from_stats(stats: &LivePlayerStats) -> Self {
        Self {
            score: stats.score,
            throws: stats.throws,
            hits: stats.hits,
            catches: stats.catches,
            drops: stats.drops,
            misses: stats.misses,
            blunders: stats.blunders,
            hit_streak: stats.hit_streak,
            currently_on_fire: stats.currently_on_fire,
            on_fire_count: stats.on_fire_count,
            fifa_attempts: stats.fifa_attempts,
            fifa_success: stats.fifa_success,
        }
    }
}

/// Public info about a single rostered player.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct PlayerPublic {
    pub id: PlayerId,
    pub display_name: String,
    pub registration: RegistrationStatus,
    pub stats: PlayerStatLine,
}

/// One side of the scoreboard.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct TeamPublic {
    pub team: TeamId,
    pub name: String,
    pub score: i32,
    pub players: Vec<PlayerPublic>,
}

/// Compact view of the most recent event for tickers.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct LastPlayPublic {
    pub thrower_id: PlayerId,
    pub team: TeamId,
    pub throw: ThrowKind,
    pub point_delta: i32,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub recipient_team: Option<TeamId>,
    pub fifa_save: bool,
    pub redemption_success: bool,
}

impl LastPlayPublic {
    fn from_event(event: &PlayEvent) -> Self {
        Self {
            thrower_id: event.thrower_id,
            team: event.team,
            throw: event.throw,
            point_delta: event.point_delta,
            recipient_team: event.recipient_team,
            fifa_save: event.is_fifa_save(),
            redemption_success: event.redemption_succeeded(),
        }
    }
}

/// Match-level header present in all snapshots.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct MatchHeader {
    pub match_id: MatchId,
    pub score_limit: u32,
    pub win_by_two: bool,
    pub sink_points: u32,
    pub teams: [TeamPublic; 2],
    pub event_count: u32,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub mvp: Option<PlayerId>,
}

/// Top-level snapshot combining header and status-specific data.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct MatchSnapshot {
    pub header: MatchHeader,
    pub status: StatusSnapshot,
}

/// Adjacently tagged union of status-specific snapshots.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(tag = "status", content = "data")]
pub enum StatusSnapshot {
    Pending,
    Active(LiveSnapshot),
    Paused(LiveSnapshot),
    Completed(CompletedSnapshot),
    Abandoned,
}

/// In-play data shared by the active and paused views.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct LiveSnapshot {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub last_play: Option<LastPlayPublic>,
}

/// Completed-match view.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct CompletedSnapshot {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub winner: Option<TeamId>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub winner_name: Option<String>,
    pub kind: OutcomeKind,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub last_play: Option<LastPlayPublic>,
}

/// Entry point: produce a snapshot of the current match state.
/// Never panics; produces safe defaults for inconsistent states.
pub fn snapshot(state: &MatchState) -> MatchSnapshot {
    let header = MatchHeader {
        match_id: state.match_id,
        score_limit: state.settings.score_limit,
        win_by_two: state.settings.win_by_two,
        sink_points: state.settings.sink_points,
        teams: [
            build_team_public(state, TeamId::TeamOne),
            build_team_public(state, TeamId::TeamTwo),
        ],
        event_count: state.events.len() as u32,
        mvp: state.mvp,
    };

    let last_play = state.last_event().map(LastPlayPublic::from_event);
    let status = match state.status {
        MatchStatus::Pending => StatusSnapshot::Pending,
        MatchStatus::Active => StatusSnapshot::Active(LiveSnapshot { last_play }),
        MatchStatus::Paused => StatusSnapshot::Paused(LiveSnapshot { last_play }),
        MatchStatus::Completed => StatusSnapshot::Completed(build_completed(state, last_play)),
        MatchStatus::Abandoned => StatusSnapshot::Abandoned,
    };

    MatchSnapshot { header, status }
}

fn build_team_public(state: &MatchState, team: TeamId) -> TeamPublic {
    let players = state
        .roster
        .iter()
        .filter(|p| p.team == team)
        .map(|p| PlayerPublic {
            id: p.id,
            display_name: p.display_name.clone(),
            registration: p.registration,
            stats: state
                .stats
                .get(&p.id)
                .map(PlayerStatLine::from_stats)
                .unwrap_or_else(|| PlayerStatLine::from_stats(&LivePlayerStats::default())),
        })
        .collect();

    TeamPublic {
        team,
        name: state.settings.team_name(team).to_string(),
        score: state.scores.get(team),
        players,
    }
}

fn build_completed(state: &MatchState, last_play: Option<LastPlayPublic>) -> CompletedSnapshot {
    // A completed match without an outcome is inconsistent; fall back to the
    // scoreboard leader rather than panic.
    let (winner, kind) = match &state.outcome {
        Some(outcome) => (outcome.winner, outcome.kind),
        None => (state.scores.leader(), OutcomeKind::Explicit),
    };
    CompletedSnapshot {
        winner,
        winner_name: winner.map(|t| state.settings.team_name(t).to_string()),
        kind,
        last_play,
    }
}
