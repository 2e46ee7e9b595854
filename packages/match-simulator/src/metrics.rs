//! Metrics collection and output for simulated matches.

use engine::domain::state::OutcomeKind;
use engine::{MatchState, MatchStatus};
use serde::Serialize;

use crate::simulator::MatchRunResult;

/// Complete per-match metrics for output.
#[derive(Debug, Clone, Serialize)]
pub struct MatchMetrics {
    pub match_no: u32,
    pub seed: u64,
    pub timestamp: String,
    pub config: RunConfig,
    pub result: MatchResultMetrics,
    pub activity: ActivityMetrics,
    pub players: Vec<PlayerLine>,
}

#[derive(Debug, Clone, Serialize)]
pub struct RunConfig {
    pub score_limit: u32,
    pub win_by_two: bool,
    pub sink_points: u32,
    pub players_per_team: usize,
    pub total_matches: u32,
}

#[derive(Debug, Clone, Serialize)]
pub struct MatchResultMetrics {
    pub team_one_score: i32,
    pub team_two_score: i32,
    /// Winning team token, or None for an explicit end with tied scores.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub winner: Option<String>,
    pub margin: i32,
    pub outcome: String,
    pub duration_ms: f64,
}

#[derive(Debug, Clone, Serialize)]
pub struct ActivityMetrics {
    pub events: usize,
    pub undos: u32,
    pub fifa_saves: usize,
    pub redemptions: usize,
    pub on_fire_crossings: u32,
    pub self_sink: bool,
    pub sanity_checks: u64,
}

#[derive(Debug, Clone, Serialize)]
pub struct PlayerLine {
    pub player_id: String,
    pub team: String,
    pub score: i32,
    pub throws: u32,
    pub hits: u32,
    pub hit_rate: f64,
    pub catches: u32,
    pub blunders: u32,
    pub on_fire_count: u32,
    pub mvp: bool,
}

/// Build metrics from a finished match run.
pub fn build_match_metrics(
    match_no: u32,
    seed: u64,
    total_matches: u32,
    players_per_team: usize,
    result: &MatchRunResult,
    duration_ms: f64,
) -> MatchMetrics {
    let timestamp = time::OffsetDateTime::now_utc()
        .format(&time::format_description::well_known::Rfc3339)
        .unwrap_or_else(|_| String::from("unknown"));

    let state = &result.final_state;
    MatchMetrics {
        match_no,
        seed,
        timestamp,
        config: RunConfig {
            score_limit: state.settings.score_limit,
            win_by_two: state.settings.win_by_two,
            sink_points: state.settings.sink_points,
            players_per_team,
            total_matches,
        },
        result: build_result_metrics(state, duration_ms),
        activity: build_activity_metrics(result),
        players: build_player_lines(state),
    }
}

fn build_result_metrics(state: &MatchState, duration_ms: f64) -> MatchResultMetrics {
    let (winner, outcome) = match (&state.outcome, state.status) {
        (Some(outcome), _) => (outcome.winner, outcome_token(outcome.kind)),
        // Abandoned or still-open states carry no outcome record.
        (None, MatchStatus::Abandoned) => (None, "ABANDONED"),
        (None, _) => (None, "UNFINISHED"),
    };
    MatchResultMetrics {
        team_one_score: state.scores.team_one,
        team_two_score: state.scores.team_two,
        winner: winner.map(|t| t.as_str().to_string()),
        margin: (state.scores.team_one - state.scores.team_two).abs(),
        outcome: outcome.to_string(),
        duration_ms,
    }
}

fn outcome_token(kind: OutcomeKind) -> &'static str {
    match kind {
        OutcomeKind::ScoreLimit => "SCORE_LIMIT",
        OutcomeKind::SelfSink => "SELF_SINK",
        OutcomeKind::Explicit => "EXPLICIT",
    }
}

fn build_activity_metrics(result: &MatchRunResult) -> ActivityMetrics {
    let state = &result.final_state;
    let fifa_saves = state.events.iter().filter(|e| e.is_fifa_save()).count();
    let redemptions = state
        .events
        .iter()
        .filter(|e| e.redemption_succeeded())
        .count();
    let on_fire_crossings = state.stats.values().map(|s| s.on_fire_count).sum();
    let self_sink = state
        .outcome
        .map(|o| o.kind == OutcomeKind::SelfSink)
        .unwrap_or(false);

    ActivityMetrics {
        events: state.events.len(),
        undos: result.undos,
        fifa_saves,
        redemptions,
        on_fire_crossings,
        self_sink,
        sanity_checks: result.sanity_checks,
    }
}

fn build_player_lines(state: &MatchState) -> Vec<PlayerLine> {
    state
        .roster
        .iter()
        .map(|player| {
            let stats = state.stats.get(&player.id).cloned().unwrap_or_default();
            let hit_rate = if stats.throws > 0 {
                stats.hits as f64 / stats.throws as f64
            } else {
                0.0
            };
            PlayerLine {
                player_id: player.id.to_string(),
                team: player.team.as_str().to_string(),
                score: stats.score,
                throws: stats.throws,
                hits: stats.hits,
                hit_rate,
                catches: stats.catches,
                blunders: stats.blunders,
                on_fire_count: stats.on_fire_count,
                mvp: state.mvp == Some(player.id),
            }
        })
        .collect()
}

/// CSV summary row for quick analysis.
#[derive(Debug, Serialize)]
pub struct CsvSummaryRow {
    pub match_no: u32,
    pub seed: u64,
    pub winner: String,
    pub team_one_score: i32,
    pub team_two_score: i32,
    pub margin: i32,
    pub outcome: String,
    pub events: usize,
    pub undos: u32,
    pub fifa_saves: usize,
}

impl From<&MatchMetrics> for CsvSummaryRow {
    fn from(metrics: &MatchMetrics) -> Self {
        CsvSummaryRow {
            match_no: metrics.match_no,
            seed: metrics.seed,
            winner: metrics
                .result
                .winner
                .clone()
                .unwrap_or_else(|| String::from("NONE")),
            team_one_score: metrics.result.team_one_score,
            team_two_score: metrics.result.team_two_score,
            margin: metrics.result.margin,
            outcome: metrics.result.outcome.clone(),
            events: metrics.activity.events,
            undos: metrics.activity.undos,
            fifa_saves: metrics.activity.fifa_saves,
        }
    }
}
