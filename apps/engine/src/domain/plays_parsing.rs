//! Play kind parsing from wire/CLI tokens (e.g., "GOAL", "CATCH_PLUS_AURA")

use std::str::FromStr;

use super::play_types::{DefenseKind, PlayKind, ThrowKind};
use crate::errors::domain::{ValidationError, ValidationKind};

impl FromStr for PlayKind {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        PlayKind::ALL
            .iter()
            .copied()
            .find(|kind| kind.as_str() == s)
            .ok_or_else(|| {
                ValidationError::new(ValidationKind::ParsePlayKind, format!("Parse play kind: {s}"))
            })
    }
}

impl FromStr for ThrowKind {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        ThrowKind::ALL
            .iter()
            .copied()
            .find(|kind| kind.as_str() == s)
            .ok_or_else(|| {
                ValidationError::new(
                    ValidationKind::ParsePlayKind,
                    format!("Parse throw kind: {s}"),
                )
            })
    }
}

impl FromStr for DefenseKind {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        DefenseKind::ALL
            .iter()
            .copied()
            .find(|kind| kind.as_str() == s)
            .ok_or_else(|| {
                ValidationError::new(
                    ValidationKind::ParsePlayKind,
                    format!("Parse defense kind: {s}"),
                )
            })
    }
}
