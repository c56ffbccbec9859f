//! Strategy definitions and execution

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::{ArenaError, Result};
use crate::random::SeededRng;

/// Periodic-Defector defects on every 20th own move.
const PERIODIC_INTERVAL: usize = 20;
/// Windowed-Reactive mirrors until the opponent has this many moves.
const WINDOW_WARMUP: usize = 4;
const WINDOW_LEN: usize = 5;
const WINDOW_DEFECT_THRESHOLD: usize = 3;

const COIN_FLIP_DEFECT: f64 = 0.5;
const RARE_DEFECT: f64 = 0.1;
const RETALIATE: f64 = 0.75;
const MIRROR_NOISE: f64 = 0.25;

const FIXED_PERIOD_MAX: u32 = 50;
const PHASE_COUNTDOWN_MAX: u32 = 20;

const ADAPTIVE_BASE: f64 = 0.3;
const ADAPTIVE_SLOPE: f64 = 0.4;
const ADAPTIVE_LAST_DEFECT_BONUS: f64 = 0.1;

/// A move in the Prisoner's Dilemma
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Move {
    Cooperate,
    Defect,
}

impl Move {
    /// Binary encoding: 0 = cooperate, 1 = defect
    pub fn bit(self) -> u8 {
        match self {
            Move::Cooperate => 0,
            Move::Defect => 1,
        }
    }

    pub fn inverse(self) -> Move {
        match self {
            Move::Cooperate => Move::Defect,
            Move::Defect => Move::Cooperate,
        }
    }

    fn defect_if(defect: bool) -> Move {
        if defect {
            Move::Defect
        } else {
            Move::Cooperate
        }
    }
}

impl TryFrom<u8> for Move {
    type Error = ArenaError;

    fn try_from(bit: u8) -> Result<Self> {
        match bit {
            0 => Ok(Move::Cooperate),
            1 => Ok(Move::Defect),
            other => Err(ArenaError::InvalidMove(other.to_string())),
        }
    }
}

impl FromStr for Move {
    type Err = ArenaError;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim() {
            "0" => Ok(Move::Cooperate),
            "1" => Ok(Move::Defect),
            other => Err(ArenaError::InvalidMove(other.to_string())),
        }
    }
}

impl fmt::Display for Move {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(&self.bit(), f)
    }
}

/// Strategy catalog
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum StrategyKind {
    /// Always cooperate, never defect.
    AlwaysCooperate,
    /// Always defect, never cooperate.
    AlwaysDefect,
    /// Copy opponent's last move. Start with cooperate.
    Mirror,
    /// Invert opponent's last move. Start with cooperate.
    AntiMirror,
    /// Defect on every 20th own move.
    PeriodicDefector,
    /// Cooperate until opponent defects once, then always defect.
    GrimTrigger,
    /// Two-move lookback on own history combined with opponent's last move.
    TwoStepReactive,
    /// Mirror early, then retaliate on recent defection density.
    WindowedReactive,
    /// Fair coin each round.
    CoinFlip,
    /// Defect with 10% chance each round.
    RareDefector,
    /// Retaliate against defection three times out of four.
    ForgivingRetaliator,
    /// Mirror with a 25% chance of inverting.
    NoisyMirror,
    /// Defect on a period drawn once at creation.
    FixedPeriodDefector,
    /// Hold a move for a random number of rounds, then switch.
    RandomPhaseSwitcher,
    /// Defect with probability rising with opponent's defection rate.
    AdaptiveProbability,
}

impl StrategyKind {
    /// Every kind, in standard roster order
    pub const ALL: [StrategyKind; 15] = [
        StrategyKind::AlwaysCooperate,
        StrategyKind::AlwaysDefect,
        StrategyKind::Mirror,
        StrategyKind::AntiMirror,
        StrategyKind::PeriodicDefector,
        StrategyKind::GrimTrigger,
        StrategyKind::TwoStepReactive,
        StrategyKind::WindowedReactive,
        StrategyKind::CoinFlip,
        StrategyKind::RareDefector,
        StrategyKind::ForgivingRetaliator,
        StrategyKind::NoisyMirror,
        StrategyKind::FixedPeriodDefector,
        StrategyKind::RandomPhaseSwitcher,
        StrategyKind::AdaptiveProbability,
    ];

    pub fn name(self) -> &'static str {
        match self {
            StrategyKind::AlwaysCooperate => "Always-Cooperate",
            StrategyKind::AlwaysDefect => "Always-Defect",
            StrategyKind::Mirror => "Mirror",
            StrategyKind::AntiMirror => "Anti-Mirror",
            StrategyKind::PeriodicDefector => "Periodic-Defector",
            StrategyKind::GrimTrigger => "Grim-Trigger",
            StrategyKind::TwoStepReactive => "Two-Step-Reactive",
            StrategyKind::WindowedReactive => "Windowed-Reactive",
            StrategyKind::CoinFlip => "Coin-Flip",
            StrategyKind::RareDefector => "Rare-Defector",
            StrategyKind::ForgivingRetaliator => "Forgiving-Retaliator",
            StrategyKind::NoisyMirror => "Noisy-Mirror",
            StrategyKind::FixedPeriodDefector => "Fixed-Period-Defector",
            StrategyKind::RandomPhaseSwitcher => "Random-Phase-Switcher",
            StrategyKind::AdaptiveProbability => "Adaptive-Probability",
        }
    }

    /// Human-readable description of the rule
    pub fn description(self) -> &'static str {
        match self {
            StrategyKind::AlwaysCooperate => "Never defects. Always cooperates.",
            StrategyKind::AlwaysDefect => "Never cooperates. Always defects.",
            StrategyKind::Mirror => "Copies opponent's last move. Starts by cooperating.",
            StrategyKind::AntiMirror => "Plays the opposite of opponent's last move. Starts by cooperating.",
            StrategyKind::PeriodicDefector => "Cooperates, but defects on every 20th move.",
            StrategyKind::GrimTrigger => "Cooperates until betrayed, then always defects.",
            StrategyKind::TwoStepReactive => {
                "Defects after a defection, or after its own cooperate-then-defect; otherwise cooperates."
            }
            StrategyKind::WindowedReactive => {
                "Mirrors for the first rounds, then defects if the opponent defected last round or 3+ times in the last 5."
            }
            StrategyKind::CoinFlip => "Defects with 50% chance each round.",
            StrategyKind::RareDefector => "Defects with 10% chance each round.",
            StrategyKind::ForgivingRetaliator => {
                "Cooperates after cooperation; after a defection retaliates 75% of the time."
            }
            StrategyKind::NoisyMirror => "Copies opponent's last move, inverting it 25% of the time.",
            StrategyKind::FixedPeriodDefector => {
                "Picks a period from 1 to 50 once, then defects on every period-th move."
            }
            StrategyKind::RandomPhaseSwitcher => {
                "Holds one move for 0 to 20 rounds, then switches; a zero redraw freezes the move."
            }
            StrategyKind::AdaptiveProbability => {
                "Defects with probability 0.3 + 0.4 x opponent defection rate, +0.1 after a defection."
            }
        }
    }

    /// Whether behavior depends on an owned random source
    pub fn is_stochastic(self) -> bool {
        matches!(
            self,
            StrategyKind::CoinFlip
                | StrategyKind::RareDefector
                | StrategyKind::ForgivingRetaliator
                | StrategyKind::NoisyMirror
                | StrategyKind::FixedPeriodDefector
                | StrategyKind::RandomPhaseSwitcher
                | StrategyKind::AdaptiveProbability
        )
    }
}

impl fmt::Display for StrategyKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for StrategyKind {
    type Err = ArenaError;

    /// Accepts the display name, the kebab-case id or the variant name,
    /// ignoring case, spaces, dashes and underscores.
    fn from_str(s: &str) -> Result<Self> {
        let wanted = normalize_name(s);
        StrategyKind::ALL
            .iter()
            .copied()
            .find(|kind| normalize_name(kind.name()) == wanted)
            .ok_or_else(|| ArenaError::UnknownStrategy(s.trim().to_string()))
    }
}

fn normalize_name(s: &str) -> String {
    s.chars()
        .filter(|c| c.is_ascii_alphanumeric())
        .map(|c| c.to_ascii_lowercase())
        .collect()
}

/// A strategy instance with its private state.
///
/// State (random streams, countdowns, the chosen period) lives as long as the
/// instance: it is never reset between matches or Monte Carlo trials.
#[derive(Clone, Debug)]
pub enum Strategy {
    AlwaysCooperate,
    AlwaysDefect,
    Mirror,
    AntiMirror,
    PeriodicDefector,
    GrimTrigger,
    TwoStepReactive,
    WindowedReactive,
    CoinFlip(SeededRng),
    RareDefector(SeededRng),
    ForgivingRetaliator(SeededRng),
    NoisyMirror(SeededRng),
    FixedPeriodDefector {
        period: usize,
    },
    RandomPhaseSwitcher {
        rng: SeededRng,
        current: Move,
        /// Rounds until the next switch; `None` once a redraw came up zero,
        /// after which the current move is held for good.
        countdown: Option<u32>,
    },
    AdaptiveProbability(SeededRng),
}

impl Strategy {
    /// Build an instance of `kind`. Deterministic kinds ignore `rng`;
    /// construction-time draws (period, first countdown) happen here.
    pub fn new(kind: StrategyKind, mut rng: SeededRng) -> Self {
        match kind {
            StrategyKind::AlwaysCooperate => Strategy::AlwaysCooperate,
            StrategyKind::AlwaysDefect => Strategy::AlwaysDefect,
            StrategyKind::Mirror => Strategy::Mirror,
            StrategyKind::AntiMirror => Strategy::AntiMirror,
            StrategyKind::PeriodicDefector => Strategy::PeriodicDefector,
            StrategyKind::GrimTrigger => Strategy::GrimTrigger,
            StrategyKind::TwoStepReactive => Strategy::TwoStepReactive,
            StrategyKind::WindowedReactive => Strategy::WindowedReactive,
            StrategyKind::CoinFlip => Strategy::CoinFlip(rng),
            StrategyKind::RareDefector => Strategy::RareDefector(rng),
            StrategyKind::ForgivingRetaliator => Strategy::ForgivingRetaliator(rng),
            StrategyKind::NoisyMirror => Strategy::NoisyMirror(rng),
            StrategyKind::FixedPeriodDefector => Strategy::FixedPeriodDefector {
                period: rng.range_inclusive(1, FIXED_PERIOD_MAX) as usize,
            },
            StrategyKind::RandomPhaseSwitcher => {
                let countdown = Some(rng.range_inclusive(0, PHASE_COUNTDOWN_MAX));
                Strategy::RandomPhaseSwitcher {
                    rng,
                    current: Move::Cooperate,
                    countdown,
                }
            }
            StrategyKind::AdaptiveProbability => Strategy::AdaptiveProbability(rng),
        }
    }

    pub fn kind(&self) -> StrategyKind {
        match self {
            Strategy::AlwaysCooperate => StrategyKind::AlwaysCooperate,
            Strategy::AlwaysDefect => StrategyKind::AlwaysDefect,
            Strategy::Mirror => StrategyKind::Mirror,
            Strategy::AntiMirror => StrategyKind::AntiMirror,
            Strategy::PeriodicDefector => StrategyKind::PeriodicDefector,
            Strategy::GrimTrigger => StrategyKind::GrimTrigger,
            Strategy::TwoStepReactive => StrategyKind::TwoStepReactive,
            Strategy::WindowedReactive => StrategyKind::WindowedReactive,
            Strategy::CoinFlip(_) => StrategyKind::CoinFlip,
            Strategy::RareDefector(_) => StrategyKind::RareDefector,
            Strategy::ForgivingRetaliator(_) => StrategyKind::ForgivingRetaliator,
            Strategy::NoisyMirror(_) => StrategyKind::NoisyMirror,
            Strategy::FixedPeriodDefector { .. } => StrategyKind::FixedPeriodDefector,
            Strategy::RandomPhaseSwitcher { .. } => StrategyKind::RandomPhaseSwitcher,
            Strategy::AdaptiveProbability(_) => StrategyKind::AdaptiveProbability,
        }
    }

    pub fn name(&self) -> &'static str {
        self.kind().name()
    }

    pub fn is_stochastic(&self) -> bool {
        self.kind().is_stochastic()
    }

    /// Choose this round's move
    ///
    /// # Arguments
    /// * `own_history` - Our past moves
    /// * `opponent_history` - Opponent's past moves (not including this round)
    pub fn next_move(&mut self, own_history: &[Move], opponent_history: &[Move]) -> Move {
        let opponent_last = opponent_history.last().copied();

        match self {
            Strategy::AlwaysCooperate => Move::Cooperate,
            Strategy::AlwaysDefect => Move::Defect,
            Strategy::Mirror => opponent_last.unwrap_or(Move::Cooperate),
            Strategy::AntiMirror => opponent_last.map_or(Move::Cooperate, Move::inverse),
            Strategy::PeriodicDefector => match opponent_last {
                None => Move::Cooperate,
                Some(_) => Move::defect_if((own_history.len() + 1) % PERIODIC_INTERVAL == 0),
            },
            Strategy::GrimTrigger => Move::defect_if(opponent_history.contains(&Move::Defect)),
            Strategy::TwoStepReactive => two_step_reactive(own_history, opponent_history),
            Strategy::WindowedReactive => windowed_reactive(opponent_history),
            Strategy::CoinFlip(rng) => Move::defect_if(rng.chance(COIN_FLIP_DEFECT)),
            Strategy::RareDefector(rng) => Move::defect_if(rng.chance(RARE_DEFECT)),
            Strategy::ForgivingRetaliator(rng) => match opponent_last {
                None | Some(Move::Cooperate) => Move::Cooperate,
                Some(Move::Defect) => Move::defect_if(rng.chance(RETALIATE)),
            },
            Strategy::NoisyMirror(rng) => match opponent_last {
                None => Move::Cooperate,
                Some(last) => {
                    if rng.chance(MIRROR_NOISE) {
                        last.inverse()
                    } else {
                        last
                    }
                }
            },
            Strategy::FixedPeriodDefector { period } => {
                Move::defect_if(own_history.len() % *period == 0)
            }
            Strategy::RandomPhaseSwitcher { rng, current, countdown } => {
                *countdown = match *countdown {
                    Some(0) => {
                        *current = current.inverse();
                        // A zero redraw exhausts the countdown
                        rng.range_inclusive(0, PHASE_COUNTDOWN_MAX).checked_sub(1)
                    }
                    Some(n) => Some(n - 1),
                    None => None,
                };
                *current
            }
            Strategy::AdaptiveProbability(rng) => match opponent_last {
                None => Move::Cooperate,
                Some(last) => {
                    let p = adaptive_defect_probability(opponent_history, last);
                    Move::defect_if(rng.chance(p))
                }
            },
        }
    }
}

/// Two-Step Reactive: mirror until we have two own moves, then defect after
/// an opponent defection or after our own cooperate-then-defect.
fn two_step_reactive(own_history: &[Move], opponent_history: &[Move]) -> Move {
    let Some(&opponent_last) = opponent_history.last() else {
        return Move::Cooperate;
    };

    if own_history.len() < 2 {
        return opponent_last;
    }

    let own_last_two = &own_history[own_history.len() - 2..];
    let flipped_to_defect = own_last_two[0] == Move::Cooperate && own_last_two[1] == Move::Defect;

    Move::defect_if(opponent_last == Move::Defect || flipped_to_defect)
}

/// Windowed-Reactive: mirror during warmup, then count defections in the
/// trailing window.
fn windowed_reactive(opponent_history: &[Move]) -> Move {
    let Some(&opponent_last) = opponent_history.last() else {
        return Move::Cooperate;
    };

    if opponent_history.len() <= WINDOW_WARMUP {
        return opponent_last;
    }

    let window = &opponent_history[opponent_history.len().saturating_sub(WINDOW_LEN)..];
    let defections = window.iter().filter(|m| **m == Move::Defect).count();

    Move::defect_if(defections >= WINDOW_DEFECT_THRESHOLD || opponent_last == Move::Defect)
}

/// Defection probability for Adaptive-Probability, clamped to [0, 1]
fn adaptive_defect_probability(opponent_history: &[Move], opponent_last: Move) -> f64 {
    let defections = opponent_history
        .iter()
        .filter(|m| **m == Move::Defect)
        .count();
    let rate = defections as f64 / opponent_history.len() as f64;

    let mut p = ADAPTIVE_BASE + ADAPTIVE_SLOPE * rate;
    if opponent_last == Move::Defect {
        p += ADAPTIVE_LAST_DEFECT_BONUS;
    }
    p.clamp(0.0, 1.0)
}
