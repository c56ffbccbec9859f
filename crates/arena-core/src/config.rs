//! Configuration types for match and tournament play

use serde::{Deserialize, Serialize};

use crate::error::{ArenaError, Result};
use crate::strategy::Move;

/// Rounds per match.
pub const DEFAULT_ROUNDS: u32 = 200;
/// Upper bound on rounds per match.
pub const MAX_ROUNDS: u32 = 100_000;
/// Monte Carlo trials per stochastic pairing.
pub const DEFAULT_TRIALS: u32 = 1000;

/// Payoff matrix for the Prisoner's Dilemma
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct PayoffMatrix {
    /// Both cooperate
    pub reward: u32,
    /// Cooperated against a defector
    pub sucker: u32,
    /// Defected against a cooperator
    pub temptation: u32,
    /// Both defect
    pub punishment: u32,
}

impl PayoffMatrix {
    /// The standard 3/0/5/1 table
    pub const STANDARD: PayoffMatrix = PayoffMatrix {
        reward: 3,
        sucker: 0,
        temptation: 5,
        punishment: 1,
    };

    /// Returns (score_a, score_b)
    pub fn payoff(&self, a: Move, b: Move) -> (u32, u32) {
        match (a, b) {
            (Move::Cooperate, Move::Cooperate) => (self.reward, self.reward),
            (Move::Cooperate, Move::Defect) => (self.sucker, self.temptation),
            (Move::Defect, Move::Cooperate) => (self.temptation, self.sucker),
            (Move::Defect, Move::Defect) => (self.punishment, self.punishment),
        }
    }

    /// One side took the temptation payoff while the other got the sucker's
    pub fn is_exploitation(&self, score_a: u32, score_b: u32) -> bool {
        (score_a == self.temptation && score_b == self.sucker)
            || (score_a == self.sucker && score_b == self.temptation)
    }
}

impl Default for PayoffMatrix {
    fn default() -> Self {
        Self::STANDARD
    }
}

/// Configuration for a single match
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct MatchConfig {
    pub rounds: u32,
    pub payoff: PayoffMatrix,
}

impl Default for MatchConfig {
    fn default() -> Self {
        Self {
            rounds: DEFAULT_ROUNDS,
            payoff: PayoffMatrix::STANDARD,
        }
    }
}

impl MatchConfig {
    pub fn with_rounds(mut self, rounds: u32) -> Self {
        self.rounds = rounds;
        self
    }

    pub fn validate(&self) -> Result<()> {
        if self.rounds == 0 || self.rounds > MAX_ROUNDS {
            return Err(ArenaError::InvalidRounds { rounds: self.rounds });
        }
        if self.payoff != PayoffMatrix::STANDARD {
            return Err(ArenaError::Config(
                "only the standard 3/0/5/1 payoff matrix is supported".to_string(),
            ));
        }
        Ok(())
    }
}

/// Configuration for Monte Carlo aggregation
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct MonteCarloConfig {
    pub trials: u32,
}

impl Default for MonteCarloConfig {
    fn default() -> Self {
        Self { trials: DEFAULT_TRIALS }
    }
}

impl MonteCarloConfig {
    pub fn validate(&self) -> Result<()> {
        if self.trials < 2 {
            return Err(ArenaError::InvalidTrials { trials: self.trials });
        }
        Ok(())
    }
}

/// Tournament configuration
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct TournamentConfig {
    #[serde(rename = "match")]
    pub match_config: MatchConfig,
    pub monte_carlo: MonteCarloConfig,
    /// Random seed for reproducibility (None = OS entropy)
    pub seed: Option<u64>,
}

impl TournamentConfig {
    /// Parse from JSON; missing fields take their defaults
    pub fn from_json(json: &str) -> Result<Self> {
        let config: TournamentConfig = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    pub fn with_rounds(mut self, rounds: u32) -> Self {
        self.match_config.rounds = rounds;
        self
    }

    pub fn with_trials(mut self, trials: u32) -> Self {
        self.monte_carlo.trials = trials;
        self
    }

    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    pub fn validate(&self) -> Result<()> {
        self.match_config.validate()?;
        self.monte_carlo.validate()
    }
}
