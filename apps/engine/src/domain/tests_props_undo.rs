//! Property tests for the submit/undo round trip (pure domain).
//!
//! Properties tested:
//! - N accepted submissions followed by N undos restore the initial state
//! - A single submission and a single undo cancel exactly
//! - Undoing a completing event reopens the match with no outcome

use proptest::prelude::*;

use crate::config::engine::EngineConfig;
use crate::domain::pipeline::{submit_play, undo_last_play};
use crate::domain::state::MatchStatus;
use crate::domain::test_gens::candidate_play;
use crate::domain::test_prelude;
use crate::domain::test_state_helpers::{make_match_state, MakeMatchStateArgs};

proptest! {
    #![proptest_config(test_prelude::proptest_config())]

    /// Property: any run of accepted plays unwinds to the starting state,
    /// streaks, MVP, and log included.
    #[test]
    fn prop_n_submissions_then_n_undos_restore_the_initial_state(
        plays in proptest::collection::vec(candidate_play(2), 1..20),
    ) {
        let config = EngineConfig::default();
        let initial = make_match_state(MakeMatchStateArgs::default());

        let mut state = initial.clone();
        let mut accepted = 0usize;
        for play in plays {
            // A self sink or the win condition can complete the match
            // mid-run; stop submitting there. The undo loop below reopens it.
            if state.status != MatchStatus::Active {
                break;
            }
            state = submit_play(&state, play, &config).unwrap();
            accepted += 1;
        }

        for _ in 0..accepted {
            state = undo_last_play(&state, &config).unwrap();
        }
        prop_assert_eq!(state, initial);
    }

    /// Property: one submission and one undo cancel exactly.
    #[test]
    fn prop_a_single_submission_round_trips(
        play in candidate_play(3),
    ) {
        let config = EngineConfig::default();
        let initial = make_match_state(MakeMatchStateArgs {
            players_per_team: 3,
            ..MakeMatchStateArgs::default()
        });

        let next = submit_play(&initial, play, &config).unwrap();
        prop_assert_eq!(next.events.len(), 1);

        let undone = undo_last_play(&next, &config).unwrap();
        prop_assert_eq!(undone, initial);
    }

    /// Property: whenever a run ends in a completion, undoing the final
    /// event reopens the match and erases the outcome.
    #[test]
    fn prop_undoing_a_completion_reopens_the_match(
        plays in proptest::collection::vec(candidate_play(2), 1..40),
    ) {
        let config = EngineConfig::default();
        let mut state = make_match_state(MakeMatchStateArgs {
            score_limit: 5,
            win_by_two: false,
            ..MakeMatchStateArgs::default()
        });

        for play in plays {
            if state.status != MatchStatus::Active {
                break;
            }
            state = submit_play(&state, play, &config).unwrap();
        }

        if state.status == MatchStatus::Completed {
            prop_assert!(state.last_event().unwrap().ended_match);
            let events_before = state.events.len();
            let reopened = undo_last_play(&state, &config).unwrap();
            prop_assert_eq!(reopened.status, MatchStatus::Active);
            prop_assert_eq!(reopened.outcome, None);
            prop_assert_eq!(reopened.events.len(), events_before - 1);
        }
    }
}
