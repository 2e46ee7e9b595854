//! Property tests for throw resolution through the full pipeline.
//!
//! Properties tested:
//! - Resolution is deterministic: the same play on the same state yields the
//!   same scores, stats, and event payload
//! - The FIFA save fires on exactly one of the sixteen condition combinations
//! - A successful redemption charges the opponent exactly one point, or
//!   clamps to their floor

use proptest::prelude::*;

use crate::config::engine::EngineConfig;
use crate::domain::events::{CandidatePlay, DefensePlay, FifaAction};
use crate::domain::pipeline::submit_play;
use crate::domain::play_types::ThrowKind;
use crate::domain::state::MatchStatus;
use crate::domain::test_gens::{bad_throw, candidate_play, defense_kind, throw_kind};
use crate::domain::test_prelude;
use crate::domain::test_state_helpers::{make_match_state, pid, with_redemption, MakeMatchStateArgs};

proptest! {
    #![proptest_config(test_prelude::proptest_config())]

    /// Property: resolution is a pure function of play and state.
    #[test]
    fn prop_resolution_is_deterministic(
        play in candidate_play(2),
    ) {
        let config = EngineConfig::default();
        let state = make_match_state(MakeMatchStateArgs::default());

        let a = submit_play(&state, play.clone(), &config).unwrap();
        let b = submit_play(&state, play, &config).unwrap();

        // Everything except the generated event id and stamp must agree.
        prop_assert_eq!(a.scores, b.scores);
        prop_assert_eq!(&a.stats, &b.stats);
        prop_assert_eq!(a.status, b.status);
        prop_assert_eq!(a.mvp, b.mvp);
        prop_assert_eq!(a.outcome, b.outcome);
        let ea = a.last_event().unwrap();
        let eb = b.last_event().unwrap();
        prop_assert_eq!(ea.point_delta, eb.point_delta);
        prop_assert_eq!(ea.recipient_team, eb.recipient_team);
        prop_assert_eq!(ea.ended_match, eb.ended_match);
    }

    /// Property: over every combination of kick, named defender, and defense
    /// outcome on an eligible bad throw, only the full set of save conditions
    /// moves the defending team's score.
    #[test]
    fn prop_the_save_needs_every_condition(
        throw in bad_throw(),
        kicked in any::<bool>(),
        named in any::<bool>(),
        outcome in defense_kind(),
    ) {
        let config = EngineConfig::default();
        let state = make_match_state(MakeMatchStateArgs::default());

        let mut candidate = CandidatePlay::throw(pid(1), throw);
        candidate.defense = Some(DefensePlay {
            outcome,
            defender_ids: if named { vec![pid(101)] } else { Vec::new() },
        });
        if kicked {
            candidate.fifa = Some(FifaAction { kicker_id: pid(102) });
        }

        let next = submit_play(&state, candidate, &config).unwrap();
        let saved = kicked && named && outcome.is_catch();

        prop_assert_eq!(next.scores.team_one, 0);
        prop_assert_eq!(next.scores.team_two, i32::from(saved));
        prop_assert_eq!(next.last_event().unwrap().is_fifa_save(), saved);
    }

    /// Property: a successful redemption is worth exactly minus one to the
    /// defending side, floored at zero under the default clamp.
    #[test]
    fn prop_redemption_charges_one_or_clamps(
        throw in throw_kind(),
        opponent_score in 0i32..4,
    ) {
        let config = EngineConfig::default();
        let mut state = make_match_state(MakeMatchStateArgs::default());
        for _ in 0..opponent_score {
            state = submit_play(
                &state,
                CandidatePlay::throw(pid(101), ThrowKind::Hit),
                &config,
            )
            .unwrap();
        }

        let candidate = with_redemption(CandidatePlay::throw(pid(1), throw), true, pid(101));
        let next = submit_play(&state, candidate, &config).unwrap();

        prop_assert_eq!(next.scores.team_two, (opponent_score - 1).max(0));
        prop_assert_eq!(next.scores.team_one, 0);
        // The redemption outranks the self sink, so no throw completes here.
        prop_assert_eq!(next.status, MatchStatus::Active);
    }
}
