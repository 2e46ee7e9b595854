use std::collections::BTreeSet;

use crate::domain::play_types::{
    all_play_types, play_type, DefenseKind, PlayCategory, PlayKind, ThrowKind,
};
use crate::domain::scoring::fifa_eligible;

#[test]
fn registry_has_one_definition_per_kind() {
    let mut seen = BTreeSet::new();
    for def in all_play_types() {
        assert!(seen.insert(def.kind), "duplicate definition for {}", def.kind);
    }
    assert_eq!(seen.len(), PlayKind::ALL.len());
    for kind in PlayKind::ALL {
        assert_eq!(play_type(kind).unwrap().kind, kind);
    }
}

#[test]
fn wire_tokens_round_trip() {
    for kind in PlayKind::ALL {
        let token = kind.as_str();
        assert!(
            token.chars().all(|c| c.is_ascii_uppercase() || c == '_'),
            "token {token} is not SCREAMING_SNAKE"
        );
        assert_eq!(token.parse::<PlayKind>().unwrap(), kind);
    }
    assert!("MOON_SHOT".parse::<PlayKind>().is_err());
    assert!("hit".parse::<PlayKind>().is_err());
}

#[test]
fn throw_and_defense_tokens_parse_to_their_own_kinds() {
    for throw in ThrowKind::ALL {
        assert_eq!(throw.as_str().parse::<ThrowKind>().unwrap(), throw);
    }
    for defense in DefenseKind::ALL {
        assert_eq!(defense.as_str().parse::<DefenseKind>().unwrap(), defense);
    }
    // A defense token is not a throw and vice versa.
    assert!("CATCH".parse::<ThrowKind>().is_err());
    assert!("GOAL".parse::<DefenseKind>().is_err());
}

#[test]
fn streak_flags_match_the_rules() {
    let builders: Vec<PlayKind> = all_play_types()
        .filter(|d| d.builds_streak)
        .map(|d| d.kind)
        .collect();
    assert_eq!(builders, vec![PlayKind::Hit, PlayKind::Goal, PlayKind::Sink]);

    let resetters: Vec<PlayKind> = all_play_types()
        .filter(|d| d.resets_streak)
        .map(|d| d.kind)
        .collect();
    assert_eq!(
        resetters,
        vec![
            PlayKind::Short,
            PlayKind::Long,
            PlayKind::Side,
            PlayKind::Low,
            PlayKind::SelfSink,
            PlayKind::Drop,
        ]
    );
}

#[test]
fn base_points_follow_the_catalog() {
    let expected: &[(PlayKind, i32)] = &[
        (PlayKind::Hit, 1),
        (PlayKind::Goal, 2),
        (PlayKind::Sink, 3),
        (PlayKind::FifaSave, 1),
        (PlayKind::Redemption, 1),
    ];
    for (kind, points) in expected {
        assert_eq!(play_type(*kind).unwrap().base_points, *points);
    }
    for def in all_play_types() {
        if !expected.iter().any(|(k, _)| k == &def.kind) {
            assert_eq!(def.base_points, 0, "{} should score nothing", def.kind);
        }
    }
}

#[test]
fn blunders_cover_bad_throws_and_bad_hands() {
    let blunders: BTreeSet<PlayKind> = all_play_types()
        .filter(|d| d.is_blunder)
        .map(|d| d.kind)
        .collect();
    let expected: BTreeSet<PlayKind> = [
        PlayKind::Short,
        PlayKind::Long,
        PlayKind::Side,
        PlayKind::Low,
        PlayKind::SelfSink,
        PlayKind::Drop,
        PlayKind::TwoHands,
        PlayKind::Body,
    ]
    .into_iter()
    .collect();
    assert_eq!(blunders, expected);
}

#[test]
fn fifa_eligible_is_the_bad_throw_set_minus_self_sink() {
    let eligible: Vec<ThrowKind> = ThrowKind::ALL
        .into_iter()
        .filter(|t| fifa_eligible(*t).unwrap())
        .collect();
    assert_eq!(
        eligible,
        vec![ThrowKind::Short, ThrowKind::Long, ThrowKind::Side, ThrowKind::Low]
    );
}

#[test]
fn categories_are_consistent_with_the_id_space() {
    for throw in ThrowKind::ALL {
        assert_eq!(
            play_type(PlayKind::from_throw(throw)).unwrap().category,
            PlayCategory::Throw
        );
    }
    for defense in DefenseKind::ALL {
        assert_eq!(
            play_type(PlayKind::from_defense(defense)).unwrap().category,
            PlayCategory::Defense
        );
    }
    assert_eq!(
        play_type(PlayKind::FifaKick).unwrap().category,
        PlayCategory::Fifa
    );
    assert_eq!(
        play_type(PlayKind::Redemption).unwrap().category,
        PlayCategory::Special
    );
}

#[test]
fn serde_uses_the_wire_tokens() {
    let json = serde_json::to_string(&PlayKind::CatchPlusAura).unwrap();
    assert_eq!(json, "\"CATCH_PLUS_AURA\"");
    let parsed: PlayKind = serde_json::from_str("\"FIFA_KICK\"").unwrap();
    assert_eq!(parsed, PlayKind::FifaKick);
    assert!(serde_json::from_str::<PlayKind>("\"LASER\"").is_err());

    let throw: ThrowKind = serde_json::from_str("\"SELF_SINK\"").unwrap();
    assert_eq!(throw, ThrowKind::SelfSink);
    assert!(serde_json::from_str::<ThrowKind>("\"CATCH\"").is_err());
}
