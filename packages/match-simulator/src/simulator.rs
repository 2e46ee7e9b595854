//! In-memory match simulator for exercising the scoring engine.
//!
//! Drives whole matches through the pure pipeline with a seeded RNG,
//! generating legal plays according to a configurable mix. No registry or
//! snapshot fan-out is involved; this is the engine at full speed.

use engine::domain::lifecycle;
use engine::domain::play_types::{DefenseKind, ThrowKind};
use engine::{
    replay_match, submit_play, undo_last_play, CandidatePlay, DefensePlay, EngineConfig,
    FifaAction, MatchId, MatchSettings, MatchState, MatchStatus, PlayerId, Redemption, TeamId,
};
use engine::domain::state::RegistrationStatus;
use engine::domain::Player;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

/// Hard stop for pathological mixes that never reach the score limit.
const MAX_EVENTS: usize = 10_000;

/// Derive a per-match RNG seed from the base run seed.
///
/// Same base seed and match number always produce the same match; different
/// match numbers diverge. Multiplier chosen large enough that sequential
/// match numbers do not collide with nearby base seeds.
pub fn derive_match_seed(base_seed: u64, match_no: u32) -> u64 {
    base_seed
        .wrapping_add((match_no as u64).wrapping_mul(1_000_003))
        .wrapping_add(1)
}

/// Probabilities steering play generation. All values are in [0, 1].
#[derive(Debug, Clone, Copy)]
pub struct PlayMix {
    /// Chance a throw is a non-terminal bad throw (SHORT/LONG/SIDE/LOW).
    pub bad_throw_rate: f64,
    /// Chance a throw is a SELF_SINK.
    pub self_sink_rate: f64,
    /// Chance the defending team records any defense outcome.
    pub defense_rate: f64,
    /// Given a defense, chance it is a catch (vs. drop/miss/etc).
    pub catch_rate: f64,
    /// Given a bad throw, chance a FIFA kick is attempted.
    pub fifa_rate: f64,
    /// Given a bad throw, chance a redemption rides on it.
    pub redemption_rate: f64,
    /// Chance an accepted play is immediately undone (undo churn).
    pub undo_rate: f64,
}

impl PlayMix {
    pub fn validate(&self) -> Result<(), SimulatorError> {
        let rates = [
            ("bad-throw-rate", self.bad_throw_rate),
            ("self-sink-rate", self.self_sink_rate),
            ("defense-rate", self.defense_rate),
            ("catch-rate", self.catch_rate),
            ("fifa-rate", self.fifa_rate),
            ("redemption-rate", self.redemption_rate),
            ("undo-rate", self.undo_rate),
        ];
        for (name, rate) in rates {
            if !(0.0..=1.0).contains(&rate) {
                return Err(SimulatorError::InvalidMix(format!(
                    "{name} must be within [0, 1], got {rate}"
                )));
            }
        }
        Ok(())
    }
}

/// Build a two-team roster with sequential guest display names.
pub fn build_roster(players_per_team: usize) -> Vec<Player> {
    let mut roster = Vec::with_capacity(players_per_team * 2);
    for (team, prefix) in [(TeamId::TeamOne, "Blue"), (TeamId::TeamTwo, "Red")] {
        for n in 1..=players_per_team {
            roster.push(Player {
                id: PlayerId::new(),
                team,
                registration: RegistrationStatus::Guest,
                display_name: format!("{prefix} {n}"),
            });
        }
    }
    roster
}

/// Outcome of one simulated match.
#[derive(Debug, Clone)]
pub struct MatchRunResult {
    /// Final state, completed unless the event cap forced an explicit end.
    pub final_state: MatchState,
    /// Accepted plays that were then taken back.
    pub undos: u32,
    /// Sanity assertions that ran (zero unless sanity mode is on).
    pub sanity_checks: u64,
}

/// Seeded driver for a single match.
pub struct Simulator {
    state: MatchState,
    roster: Vec<Player>,
    config: EngineConfig,
    mix: PlayMix,
    rng: StdRng,
    sanity: bool,
}

impl Simulator {
    pub fn new(
        roster: Vec<Player>,
        settings: MatchSettings,
        config: EngineConfig,
        mix: PlayMix,
        seed: u64,
        sanity: bool,
    ) -> Result<Self, SimulatorError> {
        mix.validate()?;
        let state = MatchState::new(MatchId::new(), roster.clone(), settings)
            .map_err(|e| SimulatorError::Engine(format!("Create match: {e}")))?;
        Ok(Self {
            state,
            roster,
            config,
            mix,
            rng: StdRng::seed_from_u64(seed),
            sanity,
        })
    }

    /// Play one full match: start, submit generated plays until completion
    /// (or the event cap, then an explicit end), return the final state.
    pub fn run(mut self) -> Result<MatchRunResult, SimulatorError> {
        self.state = lifecycle::start_match(&self.state)
            .map_err(|e| SimulatorError::Engine(format!("Start match: {e}")))?;

        let mut undos = 0u32;
        let mut sanity_checks = 0u64;

        while self.state.status == MatchStatus::Active {
            if self.state.events.len() >= MAX_EVENTS {
                self.state = lifecycle::end_match(&self.state)
                    .map_err(|e| SimulatorError::Engine(format!("End match at cap: {e}")))?;
                break;
            }

            let candidate = self.generate_play();
            let next = submit_play(&self.state, candidate, &self.config)
                .map_err(|e| SimulatorError::Engine(format!("Submit play: {e}")))?;

            if self.sanity {
                self.check_undo_inverse(&next)?;
                sanity_checks += 1;
            }

            if self.rng.random_bool(self.mix.undo_rate) {
                // Churn: take the play straight back, including a completion
                // it may have caused.
                self.state = undo_last_play(&next, &self.config)
                    .map_err(|e| SimulatorError::Engine(format!("Undo play: {e}")))?;
                undos += 1;
            } else {
                self.state = next;
            }
        }

        if self.sanity {
            self.check_replay_equivalence()?;
            sanity_checks += 1;
        }

        Ok(MatchRunResult {
            final_state: self.state,
            undos,
            sanity_checks,
        })
    }

    /// Possession alternates with the kept-event count, which keeps it
    /// consistent across undos.
    fn throwing_team(&self) -> TeamId {
        if self.state.events.len() % 2 == 0 {
            TeamId::TeamOne
        } else {
            TeamId::TeamTwo
        }
    }

    fn random_player(&mut self, team: TeamId) -> PlayerId {
        let candidates: Vec<PlayerId> = self
            .roster
            .iter()
            .filter(|p| p.team == team)
            .map(|p| p.id)
            .collect();
        candidates[self.rng.random_range(0..candidates.len())]
    }

    fn generate_play(&mut self) -> CandidatePlay {
        let team = self.throwing_team();
        let defending = team.opponent();
        let thrower_id = self.random_player(team);
        let throw = self.pick_throw();
        let is_bad = matches!(
            throw,
            ThrowKind::Short | ThrowKind::Long | ThrowKind::Side | ThrowKind::Low
        );

        let defense = self.pick_defense(defending);
        let fifa = if is_bad && self.rng.random_bool(self.mix.fifa_rate) {
            let kicker_id = self.random_player(defending);
            Some(FifaAction { kicker_id })
        } else {
            None
        };
        let redemption = if is_bad && self.rng.random_bool(self.mix.redemption_rate) {
            let target_player_id = self.random_player(defending);
            Some(Redemption {
                success: self.rng.random_bool(0.5),
                target_player_id,
            })
        } else {
            None
        };

        CandidatePlay {
            thrower_id,
            throw,
            defense,
            fifa,
            redemption,
            timestamp: None,
        }
    }

    fn pick_throw(&mut self) -> ThrowKind {
        if self.rng.random_bool(self.mix.self_sink_rate) {
            return ThrowKind::SelfSink;
        }
        if self.rng.random_bool(self.mix.bad_throw_rate) {
            const BAD: [ThrowKind; 4] = [
                ThrowKind::Short,
                ThrowKind::Long,
                ThrowKind::Side,
                ThrowKind::Low,
            ];
            return BAD[self.rng.random_range(0..BAD.len())];
        }
        // Scoring throws, weighted toward plain hits.
        match self.rng.random_range(0..10u32) {
            0 => ThrowKind::Sink,
            1..=3 => ThrowKind::Goal,
            _ => ThrowKind::Hit,
        }
    }

    fn pick_defense(&mut self, defending: TeamId) -> Option<DefensePlay> {
        if !self.rng.random_bool(self.mix.defense_rate) {
            return None;
        }
        let outcome = if self.rng.random_bool(self.mix.catch_rate) {
            if self.rng.random_bool(0.2) {
                DefenseKind::CatchPlusAura
            } else {
                DefenseKind::Catch
            }
        } else {
            const MISSED: [DefenseKind; 4] = [
                DefenseKind::Drop,
                DefenseKind::Miss,
                DefenseKind::TwoHands,
                DefenseKind::Body,
            ];
            MISSED[self.rng.random_range(0..MISSED.len())]
        };
        let defender_id = self.random_player(defending);
        Some(DefensePlay {
            outcome,
            defender_ids: vec![defender_id],
        })
    }

    /// Undo must be the exact inverse of the submit that produced `next`.
    fn check_undo_inverse(&self, next: &MatchState) -> Result<(), SimulatorError> {
        let rewound = undo_last_play(next, &self.config)
            .map_err(|e| SimulatorError::Sanity(format!("Undo inverse rejected: {e}")))?;
        if rewound != self.state {
            return Err(SimulatorError::Sanity(format!(
                "Undo inverse mismatch after event {}",
                next.events.len()
            )));
        }
        Ok(())
    }

    /// Replaying the final event log must reproduce the live aggregates.
    fn check_replay_equivalence(&self) -> Result<(), SimulatorError> {
        let rebuilt = replay_match(
            self.state.match_id,
            self.roster.clone(),
            self.state.settings.clone(),
            self.state.events.clone(),
            &self.config,
        )
        .map_err(|e| SimulatorError::Sanity(format!("Replay rejected: {e}")))?;

        // Status may differ when the match was ended explicitly at the event
        // cap; the log-derived fields must match regardless.
        if rebuilt.events != self.state.events
            || rebuilt.scores != self.state.scores
            || rebuilt.stats != self.state.stats
            || rebuilt.mvp != self.state.mvp
        {
            return Err(SimulatorError::Sanity(format!(
                "Replay mismatch: rebuilt {}-{}, live {}-{}",
                rebuilt.scores.team_one,
                rebuilt.scores.team_two,
                self.state.scores.team_one,
                self.state.scores.team_two,
            )));
        }
        Ok(())
    }
}

/// Errors that can occur during simulation.
#[derive(Debug)]
pub enum SimulatorError {
    /// The engine rejected a generated play or transition; generation only
    /// produces legal input, so this is a simulator bug.
    Engine(String),
    /// A sanity-mode invariant check failed.
    Sanity(String),
    /// A play-mix rate was out of range.
    InvalidMix(String),
}

impl std::fmt::Display for SimulatorError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            SimulatorError::Engine(msg) => write!(f, "Engine error: {msg}"),
            SimulatorError::Sanity(msg) => write!(f, "Sanity check failed: {msg}"),
            SimulatorError::InvalidMix(msg) => write!(f, "Invalid play mix: {msg}"),
        }
    }
}

impl std::error::Error for SimulatorError {}
