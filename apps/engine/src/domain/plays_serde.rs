//! Serialization and deserialization for play kinds, ids, and match enums.
//!
//! Everything here serializes as compact string tokens so that event logs
//! stay lossless, human-greppable, and stable across releases.

use serde::{Deserialize, Deserializer, Serialize, Serializer};

use super::play_types::{DefenseKind, PlayKind, ThrowKind};
use super::state::{MatchId, MatchStatus, OutcomeKind, PlayerId, RegistrationStatus, TeamId};
use crate::domain::events::EventId;

// PlayKind serde (SCREAMING_SNAKE tokens like "CATCH_PLUS_AURA")
impl Serialize for PlayKind {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_str(self.as_str())
    }
}

impl<'de> Deserialize<'de> for PlayKind {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        s.parse::<PlayKind>()
            .map_err(|_| serde::de::Error::custom(format!("Invalid play kind: {s}")))
    }
}

// ThrowKind serde
impl Serialize for ThrowKind {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_str(self.as_str())
    }
}

impl<'de> Deserialize<'de> for ThrowKind {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        s.parse::<ThrowKind>()
            .map_err(|_| serde::de::Error::custom(format!("Invalid throw kind: {s}")))
    }
}

// DefenseKind serde
impl Serialize for DefenseKind {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_str(self.as_str())
    }
}

impl<'de> Deserialize<'de> for DefenseKind {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        s.parse::<DefenseKind>()
            .map_err(|_| serde::de::Error::custom(format!("Invalid defense kind: {s}")))
    }
}

// TeamId serde
impl Serialize for TeamId {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_str(self.as_str())
    }
}

impl<'de> Deserialize<'de> for TeamId {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        match s.as_str() {
            "TEAM_ONE" => Ok(TeamId::TeamOne),
            "TEAM_TWO" => Ok(TeamId::TeamTwo),
            _ => Err(serde::de::Error::custom(format!("Invalid team: {s}"))),
        }
    }
}

// MatchStatus serde
impl Serialize for MatchStatus {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_str(self.as_str())
    }
}

impl<'de> Deserialize<'de> for MatchStatus {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        match s.as_str() {
            "PENDING" => Ok(MatchStatus::Pending),
            "ACTIVE" => Ok(MatchStatus::Active),
            "PAUSED" => Ok(MatchStatus::Paused),
            "COMPLETED" => Ok(MatchStatus::Completed),
            "ABANDONED" => Ok(MatchStatus::Abandoned),
            _ => Err(serde::de::Error::custom(format!("Invalid status: {s}"))),
        }
    }
}

// RegistrationStatus serde
impl Serialize for RegistrationStatus {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        let s = match self {
            RegistrationStatus::Registered => "REGISTERED",
            RegistrationStatus::Guest => "GUEST",
        };
        serializer.serialize_str(s)
    }
}

impl<'de> Deserialize<'de> for RegistrationStatus {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        match s.as_str() {
            "REGISTERED" => Ok(RegistrationStatus::Registered),
            "GUEST" => Ok(RegistrationStatus::Guest),
            _ => Err(serde::de::Error::custom(format!(
                "Invalid registration status: {s}"
            ))),
        }
    }
}

// OutcomeKind serde
impl Serialize for OutcomeKind {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        let s = match self {
            OutcomeKind::ScoreLimit => "SCORE_LIMIT",
            OutcomeKind::SelfSink => "SELF_SINK",
            OutcomeKind::Explicit => "EXPLICIT",
        };
        serializer.serialize_str(s)
    }
}

impl<'de> Deserialize<'de> for OutcomeKind {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        match s.as_str() {
            "SCORE_LIMIT" => Ok(OutcomeKind::ScoreLimit),
            "SELF_SINK" => Ok(OutcomeKind::SelfSink),
            "EXPLICIT" => Ok(OutcomeKind::Explicit),
            _ => Err(serde::de::Error::custom(format!(
                "Invalid outcome kind: {s}"
            ))),
        }
    }
}

// Id newtypes serialize as their ULID string form.
impl Serialize for MatchId {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_str(&self.0.to_string())
    }
}

impl<'de> Deserialize<'de> for MatchId {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        s.parse::<ulid::Ulid>()
            .map(MatchId)
            .map_err(|_| serde::de::Error::custom(format!("Invalid match id: {s}")))
    }
}

impl Serialize for PlayerId {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_str(&self.0.to_string())
    }
}

impl<'de> Deserialize<'de> for PlayerId {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        s.parse::<ulid::Ulid>()
            .map(PlayerId)
            .map_err(|_| serde::de::Error::custom(format!("Invalid player id: {s}")))
    }
}

impl Serialize for EventId {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_str(&self.0.to_string())
    }
}

impl<'de> Deserialize<'de> for EventId {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        s.parse::<ulid::Ulid>()
            .map(EventId)
            .map_err(|_| serde::de::Error::custom(format!("Invalid event id: {s}")))
    }
}
