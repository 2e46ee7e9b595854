//! Domain layer: pure match-scoring logic, no I/O and no locking.

pub mod events;
pub mod lifecycle;
pub mod mvp;
pub mod pipeline;
pub mod play_types;
pub mod plays_parsing;
pub mod plays_serde;
pub mod replay;
pub mod rules;
pub mod scoring;
pub mod snapshot;
pub mod state;
pub mod stats;
pub mod streak;

#[cfg(test)]
mod tests_pipeline;
#[cfg(test)]
mod tests_play_types;
#[cfg(test)]
mod tests_props_scoring;
#[cfg(test)]
mod tests_props_undo;
#[cfg(test)]
mod tests_stats;

// Re-exports for ergonomics
pub use events::{CandidatePlay, DefensePlay, EventId, FifaAction, PlayEvent, Redemption};
pub use mvp::{select_mvp, MvpWeights};
pub use pipeline::{submit_play, undo_last_play};
pub use play_types::{play_type, DefenseKind, PlayKind, PlayTypeDefinition, ThrowKind};
pub use replay::replay_match;
pub use snapshot::{snapshot, MatchSnapshot};
pub use state::{
    MatchId, MatchSettings, MatchState, MatchStatus, Player, PlayerId, TeamId, TeamScores,
};
pub use stats::LivePlayerStats;
