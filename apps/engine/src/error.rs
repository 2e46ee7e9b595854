use thiserror::Error;

use crate::domain::state::MatchId;
use crate::errors::domain::{
    ConfigurationError, ReplayError, SubmissionError, TransitionError, UndoError, ValidationError,
    ValidationKind,
};
use crate::errors::ErrorCode;

/// Host-facing error type wrapping every domain rejection.
///
/// Service-layer methods return this; the domain layer keeps its narrow
/// per-operation error types.
#[derive(Error, Debug)]
pub enum EngineError {
    #[error("validation error: {0}")]
    Validation(#[from] ValidationError),
    #[error("submission rejected: {0}")]
    Submission(#[from] SubmissionError),
    #[error("undo rejected: {0}")]
    Undo(#[from] UndoError),
    #[error("illegal transition: {0}")]
    Transition(#[from] TransitionError),
    #[error("replay failed: {0}")]
    Replay(#[from] ReplayError),
    #[error("configuration error: {0}")]
    Config(#[from] ConfigurationError),
    #[error("match not found: {0}")]
    MatchNotFound(MatchId),
    #[error("internal error: {detail}")]
    Internal { detail: String },
}

impl EngineError {
    /// Stable code for this error, suitable for host protocols.
    pub fn code(&self) -> ErrorCode {
        match self {
            EngineError::Validation(e) => validation_code(&e.kind),
            EngineError::Submission(e) => match e {
                SubmissionError::NotActive(_) => ErrorCode::MatchNotActive,
                SubmissionError::Validation(v) => validation_code(&v.kind),
                SubmissionError::Config(c) => config_code(c),
            },
            EngineError::Undo(e) => match e {
                UndoError::EmptyEventLog => ErrorCode::EmptyEventLog,
                UndoError::NotUndoable(_) => ErrorCode::MatchNotUndoable,
                UndoError::Corrupted(_) => ErrorCode::DataCorruption,
            },
            EngineError::Transition(_) => ErrorCode::InvalidTransition,
            EngineError::Replay(e) => match e {
                ReplayError::Validation(v) => validation_code(&v.kind),
                ReplayError::Corrupted(_) => ErrorCode::ReplayRejected,
                ReplayError::Config(c) => config_code(c),
            },
            EngineError::Config(c) => config_code(c),
            EngineError::MatchNotFound(_) => ErrorCode::MatchNotFound,
            EngineError::Internal { .. } => ErrorCode::Internal,
        }
    }

    /// Human-readable detail for logs and host payloads.
    pub fn detail(&self) -> String {
        self.to_string()
    }

    pub fn match_not_found(match_id: MatchId) -> Self {
        Self::MatchNotFound(match_id)
    }

    pub fn internal(detail: impl Into<String>) -> Self {
        Self::Internal {
            detail: detail.into(),
        }
    }
}

fn validation_code(kind: &ValidationKind) -> ErrorCode {
    match kind {
        ValidationKind::UnknownPlayer => ErrorCode::UnknownPlayer,
        ValidationKind::WrongTeam => ErrorCode::WrongTeam,
        ValidationKind::MalformedPlay => ErrorCode::MalformedPlay,
        ValidationKind::InvalidSettings => ErrorCode::InvalidSettings,
        ValidationKind::InvalidRoster => ErrorCode::InvalidRoster,
        ValidationKind::ParsePlayKind => ErrorCode::ParsePlayKind,
        ValidationKind::ParseId => ErrorCode::ParseId,
        _ => ErrorCode::ValidationError,
    }
}

fn config_code(error: &ConfigurationError) -> ErrorCode {
    match error {
        ConfigurationError::UnknownPlayType(_) => ErrorCode::UnknownPlayType,
        ConfigurationError::InvalidValue { .. } => ErrorCode::ConfigError,
    }
}
