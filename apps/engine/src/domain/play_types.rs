//! Play kinds and the static Play Type Registry.
//!
//! Every play a match can record is described by exactly one
//! `PlayTypeDefinition` in the catalog below. The registry is exhaustive over
//! every id a `PlayEvent` may reference; a lookup miss is a fatal
//! configuration error (deployment mismatch), never recoverable validation.

use std::collections::BTreeMap;
use std::fmt::{Display, Formatter, Result as FmtResult};

use once_cell::sync::Lazy;

use crate::errors::domain::ConfigurationError;

/// Throw outcomes a thrower can record.
// Ord is derived for stable map/sort ordering only; it carries no gameplay meaning.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum ThrowKind {
    Hit,
    Goal,
    Sink,
    Short,
    Long,
    Side,
    Low,
    SelfSink,
}

impl ThrowKind {
    pub const ALL: [ThrowKind; 8] = [
        ThrowKind::Hit,
        ThrowKind::Goal,
        ThrowKind::Sink,
        ThrowKind::Short,
        ThrowKind::Long,
        ThrowKind::Side,
        ThrowKind::Low,
        ThrowKind::SelfSink,
    ];

    pub const fn as_str(&self) -> &'static str {
        PlayKind::from_throw(*self).as_str()
    }
}

impl Display for ThrowKind {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        write!(f, "{}", self.as_str())
    }
}

/// Defense outcomes recorded for the defending team.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum DefenseKind {
    Catch,
    CatchPlusAura,
    Drop,
    Miss,
    TwoHands,
    Body,
}

impl DefenseKind {
    pub const ALL: [DefenseKind; 6] = [
        DefenseKind::Catch,
        DefenseKind::CatchPlusAura,
        DefenseKind::Drop,
        DefenseKind::Miss,
        DefenseKind::TwoHands,
        DefenseKind::Body,
    ];

    /// Catches (with or without aura) zero out the throw they answer.
    /// Drops, misses, two-hand grabs, and body touches never do.
    pub const fn is_catch(&self) -> bool {
        matches!(self, DefenseKind::Catch | DefenseKind::CatchPlusAura)
    }

    pub const fn as_str(&self) -> &'static str {
        PlayKind::from_defense(*self).as_str()
    }
}

impl Display for DefenseKind {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        write!(f, "{}", self.as_str())
    }
}

/// Flat id space over every play the engine knows about.
// Ord is derived for stable map/sort ordering only; it carries no gameplay meaning.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum PlayKind {
    Hit,
    Goal,
    Sink,
    Short,
    Long,
    Side,
    Low,
    SelfSink,
    Catch,
    CatchPlusAura,
    Drop,
    Miss,
    TwoHands,
    Body,
    FifaKick,
    FifaSave,
    Redemption,
}

impl PlayKind {
    pub const ALL: [PlayKind; 17] = [
        PlayKind::Hit,
        PlayKind::Goal,
        PlayKind::Sink,
        PlayKind::Short,
        PlayKind::Long,
        PlayKind::Side,
        PlayKind::Low,
        PlayKind::SelfSink,
        PlayKind::Catch,
        PlayKind::CatchPlusAura,
        PlayKind::Drop,
        PlayKind::Miss,
        PlayKind::TwoHands,
        PlayKind::Body,
        PlayKind::FifaKick,
        PlayKind::FifaSave,
        PlayKind::Redemption,
    ];

    pub const fn from_throw(kind: ThrowKind) -> Self {
        match kind {
            ThrowKind::Hit => PlayKind::Hit,
            ThrowKind::Goal => PlayKind::Goal,
            ThrowKind::Sink => PlayKind::Sink,
            ThrowKind::Short => PlayKind::Short,
            ThrowKind::Long => PlayKind::Long,
            ThrowKind::Side => PlayKind::Side,
            ThrowKind::Low => PlayKind::Low,
            ThrowKind::SelfSink => PlayKind::SelfSink,
        }
    }

    pub const fn from_defense(kind: DefenseKind) -> Self {
        match kind {
            DefenseKind::Catch => PlayKind::Catch,
            DefenseKind::CatchPlusAura => PlayKind::CatchPlusAura,
            DefenseKind::Drop => PlayKind::Drop,
            DefenseKind::Miss => PlayKind::Miss,
            DefenseKind::TwoHands => PlayKind::TwoHands,
            DefenseKind::Body => PlayKind::Body,
        }
    }

    /// Canonical wire/CLI token for this play kind.
    pub const fn as_str(&self) -> &'static str {
        match self {
            PlayKind::Hit => "HIT",
            PlayKind::Goal => "GOAL",
            PlayKind::Sink => "SINK",
            PlayKind::Short => "SHORT",
            PlayKind::Long => "LONG",
            PlayKind::Side => "SIDE",
            PlayKind::Low => "LOW",
            PlayKind::SelfSink => "SELF_SINK",
            PlayKind::Catch => "CATCH",
            PlayKind::CatchPlusAura => "CATCH_PLUS_AURA",
            PlayKind::Drop => "DROP",
            PlayKind::Miss => "MISS",
            PlayKind::TwoHands => "TWO_HANDS",
            PlayKind::Body => "BODY",
            PlayKind::FifaKick => "FIFA_KICK",
            PlayKind::FifaSave => "FIFA_SAVE",
            PlayKind::Redemption => "REDEMPTION",
        }
    }
}

impl Display for PlayKind {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        write!(f, "{}", self.as_str())
    }
}

impl From<ThrowKind> for PlayKind {
    fn from(kind: ThrowKind) -> Self {
        PlayKind::from_throw(kind)
    }
}

impl From<DefenseKind> for PlayKind {
    fn from(kind: DefenseKind) -> Self {
        PlayKind::from_defense(kind)
    }
}

/// Broad family a play kind belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PlayCategory {
    Throw,
    Defense,
    Fifa,
    Special,
}

/// Whether a kind is inherently good, inherently bad, or context-valued.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum OutcomeClass {
    Good,
    Bad,
    Variable,
}

/// One row of the Play Type Registry.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PlayTypeDefinition {
    pub kind: PlayKind,
    pub category: PlayCategory,
    pub class: OutcomeClass,
    /// Standard points; SINK's effective value comes from match settings.
    pub base_points: i32,
    pub builds_streak: bool,
    pub resets_streak: bool,
    pub is_blunder: bool,
    pub is_special: bool,
}

impl PlayTypeDefinition {
    const fn new(kind: PlayKind, category: PlayCategory, class: OutcomeClass, points: i32) -> Self {
        Self {
            kind,
            category,
            class,
            base_points: points,
            builds_streak: false,
            resets_streak: false,
            is_blunder: false,
            is_special: false,
        }
    }

    const fn builds_streak(mut self) -> Self {
        self.builds_streak = true;
        self
    }

    const fn resets_streak(mut self) -> Self {
        self.resets_streak = true;
        self
    }

    const fn blunder(mut self) -> Self {
        self.is_blunder = true;
        self
    }

    const fn special(mut self) -> Self {
        self.is_special = true;
        self
    }
}

/// The full catalog. Keep in sync with `PlayKind::ALL`; the registry test
/// asserts one definition per kind.
const CATALOG: [PlayTypeDefinition; 17] = [
    PlayTypeDefinition::new(PlayKind::Hit, PlayCategory::Throw, OutcomeClass::Good, 1)
        .builds_streak(),
    PlayTypeDefinition::new(PlayKind::Goal, PlayCategory::Throw, OutcomeClass::Good, 2)
        .builds_streak(),
    PlayTypeDefinition::new(PlayKind::Sink, PlayCategory::Throw, OutcomeClass::Variable, 3)
        .builds_streak()
        .special(),
    PlayTypeDefinition::new(PlayKind::Short, PlayCategory::Throw, OutcomeClass::Bad, 0)
        .resets_streak()
        .blunder(),
    PlayTypeDefinition::new(PlayKind::Long, PlayCategory::Throw, OutcomeClass::Bad, 0)
        .resets_streak()
        .blunder(),
    PlayTypeDefinition::new(PlayKind::Side, PlayCategory::Throw, OutcomeClass::Bad, 0)
        .resets_streak()
        .blunder(),
    PlayTypeDefinition::new(PlayKind::Low, PlayCategory::Throw, OutcomeClass::Bad, 0)
        .resets_streak()
        .blunder(),
    PlayTypeDefinition::new(PlayKind::SelfSink, PlayCategory::Throw, OutcomeClass::Bad, 0)
        .resets_streak()
        .blunder()
        .special(),
    PlayTypeDefinition::new(PlayKind::Catch, PlayCategory::Defense, OutcomeClass::Good, 0),
    PlayTypeDefinition::new(
        PlayKind::CatchPlusAura,
        PlayCategory::Defense,
        OutcomeClass::Good,
        0,
    )
    .special(),
    PlayTypeDefinition::new(PlayKind::Drop, PlayCategory::Defense, OutcomeClass::Bad, 0)
        .resets_streak()
        .blunder(),
    PlayTypeDefinition::new(PlayKind::Miss, PlayCategory::Defense, OutcomeClass::Bad, 0),
    PlayTypeDefinition::new(
        PlayKind::TwoHands,
        PlayCategory::Defense,
        OutcomeClass::Bad,
        0,
    )
    .blunder(),
    PlayTypeDefinition::new(PlayKind::Body, PlayCategory::Defense, OutcomeClass::Bad, 0).blunder(),
    PlayTypeDefinition::new(
        PlayKind::FifaKick,
        PlayCategory::Fifa,
        OutcomeClass::Variable,
        0,
    )
    .special(),
    PlayTypeDefinition::new(PlayKind::FifaSave, PlayCategory::Fifa, OutcomeClass::Good, 1)
        .special(),
    PlayTypeDefinition::new(
        PlayKind::Redemption,
        PlayCategory::Special,
        OutcomeClass::Variable,
        1,
    )
    .special(),
];

static REGISTRY: Lazy<BTreeMap<PlayKind, PlayTypeDefinition>> =
    Lazy::new(|| CATALOG.iter().map(|def| (def.kind, *def)).collect());

/// Look up the registry row for a play kind.
///
/// Misses are fatal (`ConfigurationError`): the compiled-in catalog covers
/// every `PlayKind`, so a miss means the catalog and the kind space have
/// diverged.
pub fn play_type(kind: PlayKind) -> Result<&'static PlayTypeDefinition, ConfigurationError> {
    REGISTRY
        .get(&kind)
        .ok_or_else(|| ConfigurationError::unknown_play_type(kind.as_str()))
}

/// Iterate the whole catalog in stable kind order.
pub fn all_play_types() -> impl Iterator<Item = &'static PlayTypeDefinition> {
    REGISTRY.values()
}
