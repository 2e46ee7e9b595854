use time::OffsetDateTime;

use crate::config::engine::EngineConfig;
use crate::domain::events::CandidatePlay;
use crate::domain::pipeline::{submit_play, undo_last_play};
use crate::domain::play_types::{DefenseKind, ThrowKind};
use crate::domain::state::{MatchStatus, OutcomeKind, TeamId};
use crate::domain::test_state_helpers::{
    defended, make_match_state, pid, with_fifa, with_redemption, MakeMatchStateArgs,
};
use crate::errors::domain::{SubmissionError, UndoError, ValidationKind};

fn validation_kind(err: SubmissionError) -> ValidationKind {
    match err {
        SubmissionError::Validation(e) => e.kind,
        other => panic!("expected a validation error, got {other}"),
    }
}

#[test]
fn submission_requires_an_active_match() {
    let config = EngineConfig::default();
    for status in [
        MatchStatus::Pending,
        MatchStatus::Paused,
        MatchStatus::Completed,
        MatchStatus::Abandoned,
    ] {
        let state = make_match_state(MakeMatchStateArgs {
            status,
            ..MakeMatchStateArgs::default()
        });
        let err = submit_play(&state, CandidatePlay::throw(pid(1), ThrowKind::Hit), &config)
            .unwrap_err();
        assert_eq!(err, SubmissionError::NotActive(status));
    }
}

#[test]
fn submission_rejects_unknown_and_misplaced_players() {
    let config = EngineConfig::default();
    let state = make_match_state(MakeMatchStateArgs::default());

    let err = submit_play(&state, CandidatePlay::throw(pid(999), ThrowKind::Hit), &config)
        .unwrap_err();
    assert_eq!(validation_kind(err), ValidationKind::UnknownPlayer);

    // Defender from the throwing side.
    let candidate = defended(
        CandidatePlay::throw(pid(1), ThrowKind::Hit),
        DefenseKind::Catch,
        &[pid(2)],
    );
    let err = submit_play(&state, candidate, &config).unwrap_err();
    assert_eq!(validation_kind(err), ValidationKind::WrongTeam);

    // Unknown defender.
    let candidate = defended(
        CandidatePlay::throw(pid(1), ThrowKind::Hit),
        DefenseKind::Catch,
        &[pid(999)],
    );
    let err = submit_play(&state, candidate, &config).unwrap_err();
    assert_eq!(validation_kind(err), ValidationKind::UnknownPlayer);

    // Duplicate defender listing.
    let candidate = defended(
        CandidatePlay::throw(pid(1), ThrowKind::Hit),
        DefenseKind::Catch,
        &[pid(101), pid(101)],
    );
    let err = submit_play(&state, candidate, &config).unwrap_err();
    assert_eq!(validation_kind(err), ValidationKind::MalformedPlay);

    // Kicker from the throwing side.
    let candidate = with_fifa(CandidatePlay::throw(pid(1), ThrowKind::Short), pid(2));
    let err = submit_play(&state, candidate, &config).unwrap_err();
    assert_eq!(validation_kind(err), ValidationKind::WrongTeam);

    // Redemption target from the throwing side.
    let candidate = with_redemption(CandidatePlay::throw(pid(1), ThrowKind::Hit), true, pid(2));
    let err = submit_play(&state, candidate, &config).unwrap_err();
    assert_eq!(validation_kind(err), ValidationKind::WrongTeam);
}

#[test]
fn a_goal_moves_the_score_and_the_log() {
    let config = EngineConfig::default();
    let state = make_match_state(MakeMatchStateArgs::default());

    let mut candidate = CandidatePlay::throw(pid(1), ThrowKind::Goal);
    candidate.timestamp = Some(OffsetDateTime::UNIX_EPOCH);
    let next = submit_play(&state, candidate, &config).unwrap();

    assert_eq!(next.scores.team_one, 2);
    assert_eq!(next.scores.team_two, 0);
    assert_eq!(next.events.len(), 1);
    let event = next.last_event().unwrap();
    assert_eq!(event.point_delta, 2);
    assert_eq!(event.recipient_team, Some(TeamId::TeamOne));
    assert!(!event.ended_match);
    // Host-supplied capture time is kept as-is.
    assert_eq!(event.timestamp, OffsetDateTime::UNIX_EPOCH);
    assert_eq!(next.stats[&pid(1)].throws, 1);

    // The input state is untouched.
    assert!(state.events.is_empty());
    assert_eq!(state.scores.team_one, 0);
}

#[test]
fn a_zero_point_throw_still_credits_the_thrower_team() {
    let config = EngineConfig::default();
    let state = make_match_state(MakeMatchStateArgs::default());

    let next = submit_play(&state, CandidatePlay::throw(pid(1), ThrowKind::Short), &config)
        .unwrap();
    let event = next.last_event().unwrap();
    assert_eq!(event.point_delta, 0);
    // Worthless throws still resolve to the thrower's side; only a
    // negated or clamped-away play carries no recipient.
    assert_eq!(event.recipient_team, Some(TeamId::TeamOne));
    assert_eq!(next.scores.team_one, 0);
    assert_eq!(next.scores.team_two, 0);
}

#[test]
fn the_clamp_floors_the_redemption_penalty_at_zero() {
    let strict = EngineConfig::default();
    let state = make_match_state(MakeMatchStateArgs::default());
    let candidate = with_redemption(CandidatePlay::throw(pid(1), ThrowKind::Goal), true, pid(101));

    // Opponent at zero: the penalty clamps away entirely.
    let next = submit_play(&state, candidate.clone(), &strict).unwrap();
    let event = next.last_event().unwrap();
    assert_eq!(event.point_delta, 0);
    assert_eq!(event.recipient_team, None);
    assert_eq!(next.scores.team_two, 0);

    // Clamp off: the score goes negative.
    let lax = EngineConfig {
        clamp_score_at_zero: false,
        ..EngineConfig::default()
    };
    let next = submit_play(&state, candidate.clone(), &lax).unwrap();
    let event = next.last_event().unwrap();
    assert_eq!(event.point_delta, -1);
    assert_eq!(event.recipient_team, Some(TeamId::TeamTwo));
    assert_eq!(next.scores.team_two, -1);

    // With a point on the board the penalty applies in full.
    let ahead = submit_play(&state, CandidatePlay::throw(pid(101), ThrowKind::Hit), &strict)
        .unwrap();
    let next = submit_play(&ahead, candidate, &strict).unwrap();
    let event = next.last_event().unwrap();
    assert_eq!(event.point_delta, -1);
    assert_eq!(event.recipient_team, Some(TeamId::TeamTwo));
    assert_eq!(next.scores.team_two, 0);
}

#[test]
fn the_win_condition_completes_the_match() {
    let config = EngineConfig::default();
    let state = make_match_state(MakeMatchStateArgs {
        score_limit: 3,
        win_by_two: false,
        ..MakeMatchStateArgs::default()
    });

    let next = submit_play(&state, CandidatePlay::throw(pid(1), ThrowKind::Sink), &config)
        .unwrap();
    assert_eq!(next.status, MatchStatus::Completed);
    let outcome = next.outcome.unwrap();
    assert_eq!(outcome.winner, Some(TeamId::TeamOne));
    assert_eq!(outcome.kind, OutcomeKind::ScoreLimit);
    assert!(next.last_event().unwrap().ended_match);

    // And no further plays are accepted.
    let err = submit_play(&next, CandidatePlay::throw(pid(101), ThrowKind::Hit), &config)
        .unwrap_err();
    assert_eq!(err, SubmissionError::NotActive(MatchStatus::Completed));
}

#[test]
fn win_by_two_keeps_the_match_open_past_the_limit() {
    let config = EngineConfig::default();
    let state = make_match_state(MakeMatchStateArgs {
        score_limit: 3,
        win_by_two: true,
        ..MakeMatchStateArgs::default()
    });

    // 0-2, then 3-2: at the limit but only one up, still live.
    let state = submit_play(&state, CandidatePlay::throw(pid(101), ThrowKind::Goal), &config)
        .unwrap();
    let state = submit_play(&state, CandidatePlay::throw(pid(1), ThrowKind::Sink), &config)
        .unwrap();
    assert_eq!((state.scores.team_one, state.scores.team_two), (3, 2));
    assert_eq!(state.status, MatchStatus::Active);

    // 4-2 closes it.
    let state = submit_play(&state, CandidatePlay::throw(pid(1), ThrowKind::Hit), &config)
        .unwrap();
    assert_eq!(state.status, MatchStatus::Completed);
    assert_eq!(state.outcome.unwrap().winner, Some(TeamId::TeamOne));
}

#[test]
fn self_sink_hands_the_match_to_the_other_side() {
    let config = EngineConfig::default();
    let state = make_match_state(MakeMatchStateArgs::default());

    let next = submit_play(&state, CandidatePlay::throw(pid(1), ThrowKind::SelfSink), &config)
        .unwrap();
    assert_eq!(next.status, MatchStatus::Completed);
    let outcome = next.outcome.unwrap();
    assert_eq!(outcome.winner, Some(TeamId::TeamTwo));
    assert_eq!(outcome.kind, OutcomeKind::SelfSink);
    let event = next.last_event().unwrap();
    assert!(event.ended_match);
    assert_eq!(event.point_delta, 0);
    assert_eq!(next.scores, state.scores);
}

#[test]
fn undo_reverses_a_submission_exactly() {
    let config = EngineConfig::default();
    let state = make_match_state(MakeMatchStateArgs::default());

    let candidate = defended(
        CandidatePlay::throw(pid(1), ThrowKind::Sink),
        DefenseKind::Drop,
        &[pid(101)],
    );
    let next = submit_play(&state, candidate, &config).unwrap();
    assert_eq!(next.scores.team_one, 3);

    let undone = undo_last_play(&next, &config).unwrap();
    assert_eq!(undone, state);
}

#[test]
fn undoing_the_completing_event_reopens_the_match() {
    let config = EngineConfig::default();
    let state = make_match_state(MakeMatchStateArgs {
        score_limit: 3,
        win_by_two: false,
        ..MakeMatchStateArgs::default()
    });

    let completed = submit_play(&state, CandidatePlay::throw(pid(1), ThrowKind::Sink), &config)
        .unwrap();
    assert_eq!(completed.status, MatchStatus::Completed);

    let undone = undo_last_play(&completed, &config).unwrap();
    assert_eq!(undone.status, MatchStatus::Active);
    assert_eq!(undone.outcome, None);
    assert_eq!(undone, state);
}

#[test]
fn undo_gates_on_status_and_log_contents() {
    let config = EngineConfig::default();

    // Nothing to undo.
    let state = make_match_state(MakeMatchStateArgs::default());
    let err = undo_last_play(&state, &config).unwrap_err();
    assert_eq!(err, UndoError::EmptyEventLog);

    // Paused matches hold their history.
    let mut paused = submit_play(&state, CandidatePlay::throw(pid(1), ThrowKind::Hit), &config)
        .unwrap();
    paused.status = MatchStatus::Paused;
    let err = undo_last_play(&paused, &config).unwrap_err();
    assert_eq!(err, UndoError::NotUndoable(MatchStatus::Paused));

    // An explicitly ended match is sealed: its last event did not end it.
    let mut ended = submit_play(&state, CandidatePlay::throw(pid(1), ThrowKind::Hit), &config)
        .unwrap();
    ended.status = MatchStatus::Completed;
    let err = undo_last_play(&ended, &config).unwrap_err();
    assert_eq!(err, UndoError::NotUndoable(MatchStatus::Completed));

    let mut abandoned = submit_play(&state, CandidatePlay::throw(pid(1), ThrowKind::Hit), &config)
        .unwrap();
    abandoned.status = MatchStatus::Abandoned;
    let err = undo_last_play(&abandoned, &config).unwrap_err();
    assert_eq!(err, UndoError::NotUndoable(MatchStatus::Abandoned));
}
