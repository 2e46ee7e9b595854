use std::collections::BTreeMap;

use time::OffsetDateTime;

use crate::domain::events::{DefensePlay, EventId, FifaAction, PlayEvent, Redemption};
use crate::domain::play_types::{DefenseKind, PlayKind, ThrowKind};
use crate::domain::state::{PlayerId, TeamId, TeamScores};
use crate::domain::stats::{fold_event, unfold_event, LivePlayerStats};
use crate::domain::test_state_helpers::pid;
use crate::errors::domain::UndoError;

fn event(thrower: u64, team: TeamId, throw: ThrowKind) -> PlayEvent {
    PlayEvent {
        id: EventId::new(),
        timestamp: OffsetDateTime::UNIX_EPOCH,
        thrower_id: pid(thrower),
        team,
        throw,
        defense: None,
        fifa: None,
        redemption: None,
        point_delta: 0,
        recipient_team: None,
        ended_match: false,
    }
}

fn scored(mut e: PlayEvent, delta: i32, recipient: TeamId) -> PlayEvent {
    e.point_delta = delta;
    e.recipient_team = Some(recipient);
    e
}

fn fresh_stats(ids: &[u64]) -> BTreeMap<PlayerId, LivePlayerStats> {
    ids.iter()
        .map(|n| (pid(*n), LivePlayerStats::default()))
        .collect()
}

#[test]
fn fold_credits_the_thrower_and_the_team() {
    let mut scores = TeamScores::default();
    let mut stats = fresh_stats(&[1, 101]);

    let e = scored(event(1, TeamId::TeamOne, ThrowKind::Goal), 2, TeamId::TeamOne);
    fold_event(&mut scores, &mut stats, &e).unwrap();

    assert_eq!(scores.team_one, 2);
    assert_eq!(scores.team_two, 0);
    let thrower = &stats[&pid(1)];
    assert_eq!(thrower.throws, 1);
    assert_eq!(thrower.hits, 1);
    assert_eq!(thrower.score, 2);
    assert_eq!(thrower.hit_streak, 1);
    assert_eq!(thrower.by_kind.get(&PlayKind::Goal), Some(&1));
}

#[test]
fn fold_credits_each_listed_defender() {
    let mut scores = TeamScores::default();
    let mut stats = fresh_stats(&[1, 101, 102]);

    // A caught sink: nobody scores, both defenders get the catch, the
    // thrower still logged a qualifying throw.
    let mut e = event(1, TeamId::TeamOne, ThrowKind::Sink);
    e.defense = Some(DefensePlay {
        outcome: DefenseKind::Catch,
        defender_ids: vec![pid(101), pid(102)],
    });
    fold_event(&mut scores, &mut stats, &e).unwrap();

    assert_eq!(scores, TeamScores::default());
    assert_eq!(stats[&pid(1)].hits, 1);
    assert_eq!(stats[&pid(1)].score, 0);
    for id in [pid(101), pid(102)] {
        assert_eq!(stats[&id].catches, 1, "{id}");
        assert_eq!(stats[&id].by_kind.get(&PlayKind::Catch), Some(&1));
        assert_eq!(stats[&id].blunders, 0);
    }

    // Drops are blunders, misses are not.
    let mut e = event(2, TeamId::TeamOne, ThrowKind::Hit);
    e.defense = Some(DefensePlay {
        outcome: DefenseKind::Drop,
        defender_ids: vec![pid(101)],
    });
    e = scored(e, 1, TeamId::TeamOne);
    fold_event(&mut scores, &mut stats, &e).unwrap();
    assert_eq!(stats[&pid(101)].drops, 1);
    assert_eq!(stats[&pid(101)].blunders, 1);

    let mut e = event(2, TeamId::TeamOne, ThrowKind::Goal);
    e.defense = Some(DefensePlay {
        outcome: DefenseKind::Miss,
        defender_ids: vec![pid(102)],
    });
    e = scored(e, 2, TeamId::TeamOne);
    fold_event(&mut scores, &mut stats, &e).unwrap();
    assert_eq!(stats[&pid(102)].misses, 1);
    assert_eq!(stats[&pid(102)].blunders, 0);
}

#[test]
fn fold_credits_the_kicker_on_a_save() {
    let mut scores = TeamScores::default();
    let mut stats = fresh_stats(&[1, 101, 102]);

    // Saved: the kick point lands on the defending side and on the kicker.
    let mut e = event(1, TeamId::TeamOne, ThrowKind::Short);
    e.defense = Some(DefensePlay {
        outcome: DefenseKind::Catch,
        defender_ids: vec![pid(101)],
    });
    e.fifa = Some(FifaAction {
        kicker_id: pid(102),
    });
    e = scored(e, 1, TeamId::TeamTwo);
    fold_event(&mut scores, &mut stats, &e).unwrap();

    let kicker = &stats[&pid(102)];
    assert_eq!(kicker.fifa_attempts, 1);
    assert_eq!(kicker.fifa_success, 1);
    assert_eq!(kicker.score, 1);
    assert_eq!(kicker.by_kind.get(&PlayKind::FifaKick), Some(&1));
    assert_eq!(kicker.by_kind.get(&PlayKind::FifaSave), Some(&1));
    assert_eq!(scores.team_two, 1);

    // A kick without the save is an attempt only.
    let mut e = event(1, TeamId::TeamOne, ThrowKind::Long);
    e.fifa = Some(FifaAction {
        kicker_id: pid(102),
    });
    fold_event(&mut scores, &mut stats, &e).unwrap();

    let kicker = &stats[&pid(102)];
    assert_eq!(kicker.fifa_attempts, 2);
    assert_eq!(kicker.fifa_success, 1);
    assert_eq!(kicker.by_kind.get(&PlayKind::FifaKick), Some(&2));
    assert_eq!(kicker.by_kind.get(&PlayKind::FifaSave), Some(&1));
}

#[test]
fn fold_charges_the_redemption_target() {
    let mut scores = TeamScores::default();
    let mut stats = fresh_stats(&[1, 101]);

    let mut e = event(1, TeamId::TeamOne, ThrowKind::Hit);
    e.redemption = Some(Redemption {
        success: true,
        target_player_id: pid(101),
    });
    e = scored(e, -1, TeamId::TeamTwo);
    fold_event(&mut scores, &mut stats, &e).unwrap();

    assert_eq!(scores.team_two, -1);
    let target = &stats[&pid(101)];
    assert_eq!(target.score, -1);
    assert_eq!(target.by_kind.get(&PlayKind::Redemption), Some(&1));

    // A failed attempt is still logged against the target, minus the penalty.
    let mut e = event(1, TeamId::TeamOne, ThrowKind::Hit);
    e.redemption = Some(Redemption {
        success: false,
        target_player_id: pid(101),
    });
    e = scored(e, 1, TeamId::TeamOne);
    fold_event(&mut scores, &mut stats, &e).unwrap();

    let target = &stats[&pid(101)];
    assert_eq!(target.score, -1);
    assert_eq!(target.by_kind.get(&PlayKind::Redemption), Some(&2));
}

#[test]
fn unfold_reverses_fold_exactly() {
    let mut scores = TeamScores::default();
    let mut stats = fresh_stats(&[1, 2, 101, 102]);

    let mut script = Vec::new();
    script.push(scored(
        event(1, TeamId::TeamOne, ThrowKind::Goal),
        2,
        TeamId::TeamOne,
    ));
    let mut caught = event(2, TeamId::TeamOne, ThrowKind::Sink);
    caught.defense = Some(DefensePlay {
        outcome: DefenseKind::CatchPlusAura,
        defender_ids: vec![pid(101), pid(102)],
    });
    script.push(caught);
    let mut save = event(1, TeamId::TeamOne, ThrowKind::Short);
    save.defense = Some(DefensePlay {
        outcome: DefenseKind::Catch,
        defender_ids: vec![pid(101)],
    });
    save.fifa = Some(FifaAction {
        kicker_id: pid(102),
    });
    script.push(scored(save, 1, TeamId::TeamTwo));
    script.push(scored(
        event(101, TeamId::TeamTwo, ThrowKind::Sink),
        3,
        TeamId::TeamTwo,
    ));
    let mut redeemed = event(2, TeamId::TeamOne, ThrowKind::Hit);
    redeemed.redemption = Some(Redemption {
        success: true,
        target_player_id: pid(102),
    });
    script.push(scored(redeemed, -1, TeamId::TeamTwo));
    script.push(event(102, TeamId::TeamTwo, ThrowKind::Low));

    let mut checkpoints = vec![(scores, stats.clone())];
    for e in &script {
        fold_event(&mut scores, &mut stats, e).unwrap();
        checkpoints.push((scores, stats.clone()));
    }

    for e in script.iter().rev() {
        checkpoints.pop();
        unfold_event(&mut scores, &mut stats, e).unwrap();
        let (want_scores, want_stats) = checkpoints.last().unwrap();
        assert_eq!(&scores, want_scores);
        assert_eq!(&stats, want_stats);
    }

    assert_eq!(stats, fresh_stats(&[1, 2, 101, 102]));
    assert_eq!(scores, TeamScores::default());
}

#[test]
fn by_kind_returns_to_its_exact_shape() {
    let mut scores = TeamScores::default();
    let mut stats = fresh_stats(&[1]);

    let e = scored(event(1, TeamId::TeamOne, ThrowKind::Goal), 2, TeamId::TeamOne);
    fold_event(&mut scores, &mut stats, &e).unwrap();
    assert_eq!(stats[&pid(1)].by_kind.len(), 1);

    unfold_event(&mut scores, &mut stats, &e).unwrap();
    assert!(stats[&pid(1)].by_kind.is_empty());
}

#[test]
fn out_of_order_unfold_reports_corruption() {
    let mut scores = TeamScores::default();
    let mut stats = fresh_stats(&[1]);

    let folded = scored(event(1, TeamId::TeamOne, ThrowKind::Goal), 2, TeamId::TeamOne);
    fold_event(&mut scores, &mut stats, &folded).unwrap();

    // Unwinding an event that was never folded trips the kind counter.
    let never_folded = scored(event(1, TeamId::TeamOne, ThrowKind::Sink), 3, TeamId::TeamOne);
    let err = unfold_event(&mut scores, &mut stats, &never_folded).unwrap_err();
    assert!(matches!(err, UndoError::Corrupted(_)));
}

#[test]
fn unfold_without_a_stats_entry_reports_corruption() {
    let mut scores = TeamScores::default();
    let mut stats = fresh_stats(&[1]);

    let e = scored(event(9, TeamId::TeamOne, ThrowKind::Hit), 1, TeamId::TeamOne);
    let err = unfold_event(&mut scores, &mut stats, &e).unwrap_err();
    assert!(matches!(err, UndoError::Corrupted(_)));
}
