#![deny(clippy::wildcard_imports)]
#![cfg_attr(test, allow(clippy::wildcard_imports))]

pub mod config;
pub mod domain;
pub mod error;
pub mod errors;
pub mod services;

// Re-exports for public API
pub use config::engine::EngineConfig;
pub use domain::{
    replay_match, select_mvp, snapshot, submit_play, undo_last_play, CandidatePlay, DefensePlay,
    EventId, FifaAction, LivePlayerStats, MatchId, MatchSettings, MatchSnapshot, MatchState,
    MatchStatus, MvpWeights, PlayEvent, PlayKind, Player, PlayerId, Redemption, TeamId, ThrowKind,
};
pub use error::EngineError;
pub use errors::ErrorCode;
pub use services::{MatchFlowService, MatchRegistry, SnapshotHub, SnapshotListener};

// Prelude for host and test convenience
pub mod prelude {
    pub use super::config::engine::*;
    pub use super::domain::*;
    pub use super::error::*;
    pub use super::errors::*;
    pub use super::services::*;
}

// Auto-initialize logging for unit tests
#[cfg(test)]
#[ctor::ctor]
fn init_test_logging() {
    engine_test_support::logging::init();
}
