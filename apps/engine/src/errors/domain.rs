//! Domain-level error types used across the pipeline and services.
//!
//! These types are transport- and storage-agnostic. Hosts should convert them
//! into `crate::error::EngineError` (the provided `From` impls do this) before
//! surfacing them.

use std::error::Error;
use std::fmt::{Display, Formatter, Result as FmtResult};

use crate::domain::state::MatchStatus;

/// Validation kinds shared by submission, creation, replay, and parsing paths
#[derive(Debug, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum ValidationKind {
    UnknownPlayer,
    WrongTeam,
    MalformedPlay,
    InvalidSettings,
    InvalidRoster,
    ParsePlayKind,
    ParseId,
    Other(String),
}

/// Input or business-rule violation with a human-readable detail.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidationError {
    pub kind: ValidationKind,
    pub detail: String,
}

impl ValidationError {
    pub fn new(kind: ValidationKind, detail: impl Into<String>) -> Self {
        Self {
            kind,
            detail: detail.into(),
        }
    }
}

impl Display for ValidationError {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        write!(f, "validation {:?}: {}", self.kind, self.detail)
    }
}

impl Error for ValidationError {}

/// Fatal configuration problems: rule-table misses and bad engine settings.
///
/// Never downgraded to validation. A rule-table miss indicates a deployment
/// mismatch between the submitting client and this engine's catalog.
#[derive(Debug, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum ConfigurationError {
    /// A play kind token with no entry in the Play Type Registry.
    UnknownPlayType(String),
    /// An engine configuration value that failed to parse or validate.
    InvalidValue { name: String, detail: String },
}

impl ConfigurationError {
    pub fn unknown_play_type(token: impl Into<String>) -> Self {
        Self::UnknownPlayType(token.into())
    }
    pub fn invalid_value(name: impl Into<String>, detail: impl Into<String>) -> Self {
        Self::InvalidValue {
            name: name.into(),
            detail: detail.into(),
        }
    }
}

impl Display for ConfigurationError {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        match self {
            ConfigurationError::UnknownPlayType(token) => {
                write!(f, "unknown play type: {token}")
            }
            ConfigurationError::InvalidValue { name, detail } => {
                write!(f, "invalid configuration value {name}: {detail}")
            }
        }
    }
}

impl Error for ConfigurationError {}

/// Rejection of a play submission.
#[derive(Debug, Clone, PartialEq)]
pub enum SubmissionError {
    /// Submissions are accepted only while the match is active.
    NotActive(MatchStatus),
    /// The candidate referenced unknown players or was malformed.
    Validation(ValidationError),
    /// Rule-table miss or bad engine configuration (fatal).
    Config(ConfigurationError),
}

impl SubmissionError {
    pub fn validation(kind: ValidationKind, detail: impl Into<String>) -> Self {
        Self::Validation(ValidationError::new(kind, detail))
    }
}

impl Display for SubmissionError {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        match self {
            SubmissionError::NotActive(status) => {
                write!(f, "match is {status}, not active")
            }
            SubmissionError::Validation(e) => write!(f, "{e}"),
            SubmissionError::Config(e) => write!(f, "{e}"),
        }
    }
}

impl Error for SubmissionError {}

impl From<ValidationError> for SubmissionError {
    fn from(e: ValidationError) -> Self {
        Self::Validation(e)
    }
}

impl From<ConfigurationError> for SubmissionError {
    fn from(e: ConfigurationError) -> Self {
        Self::Config(e)
    }
}

/// Rejection of an undo request.
#[derive(Debug, Clone, PartialEq)]
pub enum UndoError {
    /// Nothing to undo.
    EmptyEventLog,
    /// Undo is permitted while active, or while completed when the last
    /// event caused the completion. Any other status is rejected.
    NotUndoable(MatchStatus),
    /// Unfolding would underflow a counter or pop an empty streak history.
    /// Aggregates are strict LIFO; this means the log and the aggregates
    /// have diverged.
    Corrupted(String),
}

impl UndoError {
    pub fn corrupted(detail: impl Into<String>) -> Self {
        Self::Corrupted(detail.into())
    }
}

impl Display for UndoError {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        match self {
            UndoError::EmptyEventLog => write!(f, "event log is empty"),
            UndoError::NotUndoable(status) => {
                write!(f, "match is {status} and the last event did not end it")
            }
            UndoError::Corrupted(detail) => write!(f, "aggregate corruption: {detail}"),
        }
    }
}

impl Error for UndoError {}

/// Lifecycle actions a host can request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LifecycleAction {
    Start,
    Pause,
    Resume,
    End,
    Abandon,
}

impl LifecycleAction {
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Start => "start",
            Self::Pause => "pause",
            Self::Resume => "resume",
            Self::End => "end",
            Self::Abandon => "abandon",
        }
    }
}

impl Display for LifecycleAction {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        write!(f, "{}", self.as_str())
    }
}

/// Rejected lifecycle transition.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TransitionError {
    pub action: LifecycleAction,
    pub from: MatchStatus,
}

impl Display for TransitionError {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        write!(f, "cannot {} a {} match", self.action, self.from)
    }
}

impl Error for TransitionError {}

/// Failure while re-running a stored event log.
#[derive(Debug, Clone, PartialEq)]
pub enum ReplayError {
    /// An event referenced unknown players or the roster/settings were bad.
    Validation(ValidationError),
    /// The log itself is inconsistent (events after completion, counters
    /// that cannot be reproduced).
    Corrupted(String),
    /// Rule-table miss while re-resolving (fatal).
    Config(ConfigurationError),
}

impl ReplayError {
    pub fn corrupted(detail: impl Into<String>) -> Self {
        Self::Corrupted(detail.into())
    }
}

impl Display for ReplayError {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        match self {
            ReplayError::Validation(e) => write!(f, "{e}"),
            ReplayError::Corrupted(detail) => write!(f, "log corruption: {detail}"),
            ReplayError::Config(e) => write!(f, "{e}"),
        }
    }
}

impl Error for ReplayError {}

impl From<ValidationError> for ReplayError {
    fn from(e: ValidationError) -> Self {
        Self::Validation(e)
    }
}

impl From<ConfigurationError> for ReplayError {
    fn from(e: ConfigurationError) -> Self {
        Self::Config(e)
    }
}
