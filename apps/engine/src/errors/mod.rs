//! Error handling for the scoring engine.

pub mod domain;
pub mod error_code;

pub use domain::{
    ConfigurationError, LifecycleAction, ReplayError, SubmissionError, TransitionError, UndoError,
    ValidationError, ValidationKind,
};
pub use error_code::ErrorCode;
