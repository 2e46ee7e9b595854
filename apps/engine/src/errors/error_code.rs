//! Error codes surfaced to embedding hosts.
//!
//! This module defines all error codes used throughout the engine.
//! Add new codes here; never pass ad-hoc strings as error codes.
//!
//! All error codes are SCREAMING_SNAKE_CASE and map 1:1 to the strings a
//! host sees when it serializes an `EngineError`.

use core::fmt;

/// Centralized error codes for the scoring engine.
///
/// This enum ensures type safety and prevents the use of ad-hoc error codes.
/// Each variant maps to a canonical SCREAMING_SNAKE_CASE string.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorCode {
    // Submission Validation
    /// Player not present on the match roster
    UnknownPlayer,
    /// Player referenced from the wrong team (defender/kicker/target)
    WrongTeam,
    /// Structurally invalid candidate play
    MalformedPlay,
    /// Match settings failed validation
    InvalidSettings,
    /// Roster failed validation
    InvalidRoster,
    /// Unparseable play kind token
    ParsePlayKind,
    /// Unparseable id token
    ParseId,
    /// General validation error
    ValidationError,
    /// Submissions require an active match
    MatchNotActive,

    // Lifecycle
    /// Illegal lifecycle transition
    InvalidTransition,

    // Undo
    /// Undo with an empty event log
    EmptyEventLog,
    /// Undo in a status that does not permit it
    MatchNotUndoable,

    // Replay
    /// Stored log rejected during replay
    ReplayRejected,

    // Resource Not Found
    /// Match not present in the registry
    MatchNotFound,

    // System Errors
    /// Play Type Registry miss (deployment mismatch)
    UnknownPlayType,
    /// Configuration error
    ConfigError,
    /// Aggregates diverged from the event log
    DataCorruption,
    /// Internal engine error
    Internal,
}

impl ErrorCode {
    /// Returns the canonical SCREAMING_SNAKE_CASE string for this error code.
    pub const fn as_str(&self) -> &'static str {
        match self {
            // Submission Validation
            Self::UnknownPlayer => "UNKNOWN_PLAYER",
            Self::WrongTeam => "WRONG_TEAM",
            Self::MalformedPlay => "MALFORMED_PLAY",
            Self::InvalidSettings => "INVALID_SETTINGS",
            Self::InvalidRoster => "INVALID_ROSTER",
            Self::ParsePlayKind => "PARSE_PLAY_KIND",
            Self::ParseId => "PARSE_ID",
            Self::ValidationError => "VALIDATION_ERROR",
            Self::MatchNotActive => "MATCH_NOT_ACTIVE",

            // Lifecycle
            Self::InvalidTransition => "INVALID_TRANSITION",

            // Undo
            Self::EmptyEventLog => "EMPTY_EVENT_LOG",
            Self::MatchNotUndoable => "MATCH_NOT_UNDOABLE",

            // Replay
            Self::ReplayRejected => "REPLAY_REJECTED",

            // Resource Not Found
            Self::MatchNotFound => "MATCH_NOT_FOUND",

            // System Errors
            Self::UnknownPlayType => "UNKNOWN_PLAY_TYPE",
            Self::ConfigError => "CONFIG_ERROR",
            Self::DataCorruption => "DATA_CORRUPTION",
            Self::Internal => "INTERNAL",
        }
    }
}

impl fmt::Display for ErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}
