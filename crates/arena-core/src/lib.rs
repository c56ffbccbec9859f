//! Match Logic for Strategy Arena
//!
//! Core game logic for an Iterated Prisoner's Dilemma round-robin:
//! - a closed catalog of fifteen strategies
//! - a fixed-length match engine with exploitation-streak tracking
//! - Monte Carlo aggregation for pairings with a stochastic seat
//! - the round-robin tournament that composes them

mod config;
mod error;
mod game;
mod montecarlo;
mod random;
mod roster;
mod stats;
mod strategy;
mod tournament;

pub use config::{
    MatchConfig, MonteCarloConfig, PayoffMatrix, TournamentConfig, DEFAULT_ROUNDS,
    DEFAULT_TRIALS, MAX_ROUNDS,
};
pub use error::{ArenaError, Result};
pub use game::{
    replay_match, run_match, MatchResult, MatchTranscript, Pairing, RoundResult, StreakTracker,
};
pub use montecarlo::{run_monte_carlo, sample_trials, StochasticOutcome, TrialSamples};
pub use random::SeededRng;
pub use roster::Roster;
pub use stats::{mean, median, mode, variance, DistributionSummary};
pub use strategy::{Move, Strategy, StrategyKind};
pub use tournament::{
    play_pairing, run_tournament, PairingOutcome, Standing, StochasticEntry, StochasticRow,
    TournamentResult,
};
