//! Monte Carlo aggregation for pairings with a stochastic seat
//!
//! Trials reuse the same two strategy instances, so random streams,
//! countdowns and chosen periods carry over from one trial to the next.

use serde::{Deserialize, Serialize};
use tracing::trace;

use crate::config::{MatchConfig, MonteCarloConfig};
use crate::error::Result;
use crate::game::{run_match, MatchResult, Pairing};
use crate::stats::{median, DistributionSummary};

/// Aggregated outcome of a stochastic pairing
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct StochasticOutcome {
    /// Median scores and mean streak, truncated to integers, used for
    /// tournament scoring
    pub representative: MatchResult,
    /// Distribution of the row seat's score
    pub summary: DistributionSummary,
}

/// Raw per-trial samples
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct TrialSamples {
    pub scores_a: Vec<u32>,
    pub scores_b: Vec<u32>,
    pub streaks: Vec<u32>,
}

impl TrialSamples {
    fn with_capacity(trials: usize) -> Self {
        Self {
            scores_a: Vec::with_capacity(trials),
            scores_b: Vec::with_capacity(trials),
            streaks: Vec::with_capacity(trials),
        }
    }

    fn push(&mut self, result: MatchResult) {
        self.scores_a.push(result.score_a);
        self.scores_b.push(result.score_b);
        self.streaks.push(result.max_streak);
    }
}

/// Play `trials` matches back to back and collect the samples
pub fn sample_trials(
    pairing: &mut Pairing<'_>,
    match_config: &MatchConfig,
    monte_carlo: &MonteCarloConfig,
) -> TrialSamples {
    let trials = monte_carlo.trials as usize;
    let mut samples = TrialSamples::with_capacity(trials);

    for trial in 0..trials {
        let result = run_match(pairing, match_config);
        if trial % 250 == 0 {
            trace!(trial, score_a = result.score_a, score_b = result.score_b, "monte carlo trial");
        }
        samples.push(result);
    }

    samples
}

/// Run the Monte Carlo trials for a pairing and reduce them
pub fn run_monte_carlo(
    pairing: &mut Pairing<'_>,
    match_config: &MatchConfig,
    monte_carlo: &MonteCarloConfig,
) -> Result<StochasticOutcome> {
    monte_carlo.validate()?;

    let samples = sample_trials(pairing, match_config, monte_carlo);
    let summary = DistributionSummary::from_samples(&samples.scores_a, &samples.streaks)?;

    let representative = MatchResult {
        score_a: summary.median as u32,
        score_b: median(&samples.scores_b) as u32,
        max_streak: summary.mean_streak as u32,
    };

    Ok(StochasticOutcome {
        representative,
        summary,
    })
}
