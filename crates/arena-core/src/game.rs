//! Match execution engine

use serde::{Deserialize, Serialize};

use crate::config::MatchConfig;
use crate::strategy::{Move, Strategy};

/// Result of a single round
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct RoundResult {
    /// 1-based round number
    pub round: u32,
    pub move_a: Move,
    pub move_b: Move,
    pub score_a: u32,
    pub score_b: u32,
    pub cumulative_a: u32,
    pub cumulative_b: u32,
    /// Exploitation streak after this round
    pub streak: u32,
    /// Longest streak so far
    pub max_streak: u32,
}

/// Result of a complete match
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct MatchResult {
    pub score_a: u32,
    pub score_b: u32,
    /// Longest run of consecutive exploitation rounds
    pub max_streak: u32,
}

/// Round-by-round record of a match
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct MatchTranscript {
    pub rounds: Vec<RoundResult>,
    pub result: MatchResult,
}

/// The two seats of a match.
///
/// A strategy can sit in both seats (self-play): it is then asked for
/// seat A's move and then seat B's move each round, so its state advances
/// twice per round.
#[derive(Debug)]
pub enum Pairing<'a> {
    Distinct(&'a mut Strategy, &'a mut Strategy),
    SelfPlay(&'a mut Strategy),
}

impl<'a> Pairing<'a> {
    pub fn between(a: &'a mut Strategy, b: &'a mut Strategy) -> Self {
        Pairing::Distinct(a, b)
    }

    pub fn self_play(strategy: &'a mut Strategy) -> Self {
        Pairing::SelfPlay(strategy)
    }

    /// Borrow roster slots `a` and `b` (which may be equal)
    ///
    /// # Panics
    /// If either index is out of bounds.
    pub fn from_roster(roster: &'a mut [Strategy], a: usize, b: usize) -> Self {
        use std::cmp::Ordering;

        match a.cmp(&b) {
            Ordering::Equal => Pairing::SelfPlay(&mut roster[a]),
            Ordering::Less => {
                let (left, right) = roster.split_at_mut(b);
                Pairing::Distinct(&mut left[a], &mut right[0])
            }
            Ordering::Greater => {
                let (left, right) = roster.split_at_mut(a);
                Pairing::Distinct(&mut right[0], &mut left[b])
            }
        }
    }

    /// Either seat draws on a random source
    pub fn is_stochastic(&self) -> bool {
        match self {
            Pairing::Distinct(a, b) => a.is_stochastic() || b.is_stochastic(),
            Pairing::SelfPlay(s) => s.is_stochastic(),
        }
    }

    pub fn names(&self) -> (&'static str, &'static str) {
        match self {
            Pairing::Distinct(a, b) => (a.name(), b.name()),
            Pairing::SelfPlay(s) => (s.name(), s.name()),
        }
    }

    /// Both seats choose from the histories as they stood before the round
    fn choose(&mut self, history_a: &[Move], history_b: &[Move]) -> (Move, Move) {
        match self {
            Pairing::Distinct(a, b) => (
                a.next_move(history_a, history_b),
                b.next_move(history_b, history_a),
            ),
            Pairing::SelfPlay(s) => {
                let move_a = s.next_move(history_a, history_b);
                let move_b = s.next_move(history_b, history_a);
                (move_a, move_b)
            }
        }
    }
}

/// Running and longest exploitation streak
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct StreakTracker {
    current: u32,
    max: u32,
}

impl StreakTracker {
    pub fn record(&mut self, exploitation: bool) {
        if exploitation {
            self.current += 1;
            self.max = self.max.max(self.current);
        } else {
            self.current = 0;
        }
    }

    pub fn current(&self) -> u32 {
        self.current
    }

    pub fn max(&self) -> u32 {
        self.max
    }
}

/// Run a complete match
///
/// # Arguments
/// * `pairing` - The two seats
/// * `config` - Round count and payoff matrix
///
/// # Returns
/// Cumulative scores and the longest exploitation streak
pub fn run_match(pairing: &mut Pairing<'_>, config: &MatchConfig) -> MatchResult {
    play_rounds(pairing, config, |_| {})
}

/// Run a complete match and keep every round
pub fn replay_match(pairing: &mut Pairing<'_>, config: &MatchConfig) -> MatchTranscript {
    let mut rounds = Vec::with_capacity(config.rounds as usize);
    let result = play_rounds(pairing, config, |round| rounds.push(round));
    MatchTranscript { rounds, result }
}

fn play_rounds(
    pairing: &mut Pairing<'_>,
    config: &MatchConfig,
    mut on_round: impl FnMut(RoundResult),
) -> MatchResult {
    let capacity = config.rounds as usize;
    let mut history_a: Vec<Move> = Vec::with_capacity(capacity);
    let mut history_b: Vec<Move> = Vec::with_capacity(capacity);
    let mut streak = StreakTracker::default();
    let mut total_a = 0u32;
    let mut total_b = 0u32;

    for round in 1..=config.rounds {
        let (move_a, move_b) = pairing.choose(&history_a, &history_b);

        let (score_a, score_b) = config.payoff.payoff(move_a, move_b);
        total_a += score_a;
        total_b += score_b;
        streak.record(config.payoff.is_exploitation(score_a, score_b));

        on_round(RoundResult {
            round,
            move_a,
            move_b,
            score_a,
            score_b,
            cumulative_a: total_a,
            cumulative_b: total_b,
            streak: streak.current(),
            max_streak: streak.max(),
        });

        history_a.push(move_a);
        history_b.push(move_b);
    }

    MatchResult {
        score_a: total_a,
        score_b: total_b,
        max_streak: streak.max(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::random::SeededRng;
    use crate::strategy::StrategyKind;

    fn make(kind: StrategyKind) -> Strategy {
        Strategy::new(kind, SeededRng::new(42, 0))
    }

    fn play(a: StrategyKind, b: StrategyKind) -> MatchResult {
        let mut sa = make(a);
        let mut sb = make(b);
        run_match(&mut Pairing::between(&mut sa, &mut sb), &MatchConfig::default())
    }

    #[test]
    fn test_cooperate_vs_defect() {
        let result = play(StrategyKind::AlwaysCooperate, StrategyKind::AlwaysDefect);
        assert_eq!(result, MatchResult { score_a: 0, score_b: 1000, max_streak: 200 });
    }

    #[test]
    fn test_mirror_vs_mirror() {
        let result = play(StrategyKind::Mirror, StrategyKind::Mirror);
        assert_eq!(result, MatchResult { score_a: 600, score_b: 600, max_streak: 0 });
    }

    #[test]
    fn test_grim_trigger_vs_always_defect() {
        let result = play(StrategyKind::GrimTrigger, StrategyKind::AlwaysDefect);
        assert_eq!(result, MatchResult { score_a: 199, score_b: 204, max_streak: 1 });
    }

    #[test]
    fn test_anti_mirror_vs_always_cooperate() {
        // Round 1 cooperates, then inverts the opponent's cooperation forever
        let result = play(StrategyKind::AntiMirror, StrategyKind::AlwaysCooperate);
        assert_eq!(result, MatchResult { score_a: 3 + 199 * 5, score_b: 0, max_streak: 199 });
    }

    #[test]
    fn test_periodic_defector_vs_mirror() {
        // Defects on rounds 20, 40, ..; Mirror answers the round after
        let transcript = {
            let mut a = make(StrategyKind::PeriodicDefector);
            let mut b = make(StrategyKind::Mirror);
            replay_match(&mut Pairing::between(&mut a, &mut b), &MatchConfig::default())
        };
        assert_eq!(transcript.rounds[19].move_a, Move::Defect);
        assert_eq!(transcript.rounds[19].move_b, Move::Cooperate);
        assert_eq!(transcript.rounds[20].move_b, Move::Defect);
        assert_eq!(transcript.result.max_streak, 2);
    }

    #[test]
    fn test_match_determinism() {
        for a in StrategyKind::ALL.into_iter().filter(|k| !k.is_stochastic()) {
            for b in StrategyKind::ALL.into_iter().filter(|k| !k.is_stochastic()) {
                assert_eq!(play(a, b), play(a, b), "{} vs {}", a, b);
            }
        }
    }

    #[test]
    fn test_self_play_deterministic() {
        let mut s = make(StrategyKind::GrimTrigger);
        let result = run_match(&mut Pairing::self_play(&mut s), &MatchConfig::default());
        assert_eq!(result, MatchResult { score_a: 600, score_b: 600, max_streak: 0 });
    }

    #[test]
    fn test_self_play_shares_state() {
        // A shared stream gives seat B the draw after seat A's
        let mut shared = make(StrategyKind::CoinFlip);
        let transcript =
            replay_match(&mut Pairing::self_play(&mut shared), &MatchConfig::default());

        let mut reference = make(StrategyKind::CoinFlip);
        for round in &transcript.rounds {
            assert_eq!(round.move_a, reference.next_move(&[], &[]));
            assert_eq!(round.move_b, reference.next_move(&[], &[]));
        }
    }

    #[test]
    fn test_from_roster_orders_seats() {
        let mut roster = vec![
            make(StrategyKind::AlwaysCooperate),
            make(StrategyKind::AlwaysDefect),
            make(StrategyKind::CoinFlip),
        ];

        assert_eq!(
            Pairing::from_roster(&mut roster, 0, 1).names(),
            ("Always-Cooperate", "Always-Defect")
        );
        assert_eq!(
            Pairing::from_roster(&mut roster, 2, 0).names(),
            ("Coin-Flip", "Always-Cooperate")
        );
        assert!(matches!(Pairing::from_roster(&mut roster, 1, 1), Pairing::SelfPlay(_)));

        assert!(!Pairing::from_roster(&mut roster, 0, 1).is_stochastic());
        assert!(Pairing::from_roster(&mut roster, 2, 1).is_stochastic());
        assert!(Pairing::from_roster(&mut roster, 2, 2).is_stochastic());
    }

    #[test]
    fn test_reversed_seats_swap_scores() {
        let forward = play(StrategyKind::GrimTrigger, StrategyKind::AlwaysDefect);
        let backward = play(StrategyKind::AlwaysDefect, StrategyKind::GrimTrigger);
        assert_eq!(forward.score_a, backward.score_b);
        assert_eq!(forward.score_b, backward.score_a);
        assert_eq!(forward.max_streak, backward.max_streak);
    }

    #[test]
    fn test_cumulative_scores() {
        let mut a = make(StrategyKind::WindowedReactive);
        let mut b = make(StrategyKind::RareDefector);
        let transcript =
            replay_match(&mut Pairing::between(&mut a, &mut b), &MatchConfig::default());

        assert_eq!(transcript.rounds.len(), 200);

        let mut expected_a = 0u32;
        let mut expected_b = 0u32;
        for round in &transcript.rounds {
            expected_a += round.score_a;
            expected_b += round.score_b;
            assert_eq!(round.cumulative_a, expected_a);
            assert_eq!(round.cumulative_b, expected_b);
        }
        assert_eq!(transcript.result.score_a, expected_a);
        assert_eq!(transcript.result.score_b, expected_b);
    }

    #[test]
    fn test_custom_round_count() {
        let mut a = make(StrategyKind::AlwaysDefect);
        let mut b = make(StrategyKind::AlwaysDefect);
        let config = MatchConfig::default().with_rounds(20);
        let result = run_match(&mut Pairing::between(&mut a, &mut b), &config);
        assert_eq!(result, MatchResult { score_a: 20, score_b: 20, max_streak: 0 });
    }

    #[test]
    fn test_streak_tracker_resets() {
        let mut t = StreakTracker::default();
        for exploited in [true, true, false, true, true, true, false] {
            t.record(exploited);
        }
        assert_eq!(t.current(), 0);
        assert_eq!(t.max(), 3);
    }

    mod proptests {
        use proptest::prelude::*;

        use crate::config::MatchConfig;
        use crate::game::{replay_match, Pairing};
        use crate::random::SeededRng;
        use crate::strategy::{Strategy as Player, StrategyKind};

        fn any_kind() -> impl Strategy<Value = StrategyKind> {
            (0..StrategyKind::ALL.len()).prop_map(|i| StrategyKind::ALL[i])
        }

        proptest! {
            #![proptest_config(ProptestConfig::with_cases(64))]

            /// Property: round payoffs sum to 2, 5 or 6, and to 5 exactly when moves differ
            #[test]
            fn prop_payoff_conservation(a in any_kind(), b in any_kind(), seed in any::<u64>()) {
                let mut sa = Player::new(a, SeededRng::new(seed, 0));
                let mut sb = Player::new(b, SeededRng::new(seed, 1));
                let transcript = replay_match(&mut Pairing::between(&mut sa, &mut sb), &MatchConfig::default());

                for round in &transcript.rounds {
                    let sum = round.score_a + round.score_b;
                    prop_assert!(sum == 2 || sum == 5 || sum == 6);
                    prop_assert_eq!(sum == 5, round.move_a != round.move_b);
                }
            }

            /// Property: max streak never decreases and stays within the round count
            #[test]
            fn prop_streak_bounds(a in any_kind(), b in any_kind(), seed in any::<u64>(), rounds in 1u32..300) {
                let mut sa = Player::new(a, SeededRng::new(seed, 0));
                let mut sb = Player::new(b, SeededRng::new(seed, 1));
                let config = MatchConfig::default().with_rounds(rounds);
                let transcript = replay_match(&mut Pairing::between(&mut sa, &mut sb), &config);

                let mut previous = 0;
                for round in &transcript.rounds {
                    prop_assert!(round.max_streak >= previous);
                    prop_assert!(round.streak <= round.max_streak);
                    prop_assert!(round.max_streak <= round.round);
                    previous = round.max_streak;
                }
                prop_assert_eq!(transcript.result.max_streak, previous);
                prop_assert!(transcript.result.max_streak <= rounds);
            }
        }
    }
}
