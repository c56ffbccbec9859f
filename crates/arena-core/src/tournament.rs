//! Round-robin tournament over ordered pairs, self-play included

use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use crate::config::TournamentConfig;
use crate::error::{ArenaError, Result};
use crate::game::{run_match, MatchResult, Pairing};
use crate::montecarlo::{run_monte_carlo, StochasticOutcome};
use crate::roster::Roster;
use crate::stats::DistributionSummary;

/// Outcome of one ordered pairing
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum PairingOutcome {
    Deterministic { result: MatchResult },
    Stochastic { outcome: StochasticOutcome },
}

impl PairingOutcome {
    /// The result used for scoring
    pub fn result(&self) -> MatchResult {
        match self {
            PairingOutcome::Deterministic { result } => *result,
            PairingOutcome::Stochastic { outcome } => outcome.representative,
        }
    }

    pub fn summary(&self) -> Option<&DistributionSummary> {
        match self {
            PairingOutcome::Deterministic { .. } => None,
            PairingOutcome::Stochastic { outcome } => Some(&outcome.summary),
        }
    }
}

/// Standing of a participant in the tournament
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Standing {
    /// Roster index
    pub index: usize,
    pub name: String,
    /// Sum of the row's scores
    pub total_score: u64,
}

/// Distribution rows for one stochastic strategy
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct StochasticRow {
    pub index: usize,
    pub name: String,
    pub against: Vec<StochasticEntry>,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct StochasticEntry {
    pub opponent_index: usize,
    pub opponent: String,
    pub summary: DistributionSummary,
}

/// Result of a tournament
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct TournamentResult {
    pub names: Vec<String>,
    pub stochastic: Vec<bool>,
    /// Indexed by [row][column]; row is seat A
    pub outcomes: Vec<Vec<PairingOutcome>>,
    pub totals: Vec<u64>,
}

impl TournamentResult {
    fn new(names: Vec<String>, stochastic: Vec<bool>, outcomes: Vec<Vec<PairingOutcome>>) -> Self {
        let totals = outcomes
            .iter()
            .map(|row| row.iter().map(|o| o.result().score_a as u64).sum::<u64>())
            .collect();

        Self {
            names,
            stochastic,
            outcomes,
            totals,
        }
    }

    pub fn size(&self) -> usize {
        self.names.len()
    }

    pub fn outcome(&self, row: usize, col: usize) -> Option<&PairingOutcome> {
        self.outcomes.get(row)?.get(col)
    }

    /// Row strategy's score against each column
    pub fn score_matrix(&self) -> Vec<Vec<u32>> {
        self.matrix(|r| r.score_a)
    }

    pub fn streak_matrix(&self) -> Vec<Vec<u32>> {
        self.matrix(|r| r.max_streak)
    }

    fn matrix(&self, field: impl Fn(MatchResult) -> u32) -> Vec<Vec<u32>> {
        self.outcomes
            .iter()
            .map(|row| row.iter().map(|o| field(o.result())).collect())
            .collect()
    }

    /// Highest total; the lowest roster index wins ties
    pub fn winner(&self) -> Option<Standing> {
        let mut best: Option<usize> = None;
        for (i, &total) in self.totals.iter().enumerate() {
            if best.map_or(true, |b| total > self.totals[b]) {
                best = Some(i);
            }
        }
        best.map(|i| self.standing(i))
    }

    /// All strategies by total descending, then roster index
    pub fn standings(&self) -> Vec<Standing> {
        let mut order: Vec<usize> = (0..self.size()).collect();
        order.sort_by(|&a, &b| self.totals[b].cmp(&self.totals[a]).then(a.cmp(&b)));
        order.into_iter().map(|i| self.standing(i)).collect()
    }

    fn standing(&self, index: usize) -> Standing {
        Standing {
            index,
            name: self.names[index].clone(),
            total_score: self.totals[index],
        }
    }

    /// Distribution summaries for every stochastic row strategy
    pub fn stochastic_rows(&self) -> Vec<StochasticRow> {
        (0..self.size())
            .filter(|&i| self.stochastic[i])
            .map(|i| StochasticRow {
                index: i,
                name: self.names[i].clone(),
                against: self.outcomes[i]
                    .iter()
                    .enumerate()
                    .filter_map(|(j, o)| {
                        o.summary().map(|summary| StochasticEntry {
                            opponent_index: j,
                            opponent: self.names[j].clone(),
                            summary: *summary,
                        })
                    })
                    .collect(),
            })
            .collect()
    }
}

// ============================================================================
// Orchestration
// ============================================================================

/// Run a full round-robin (Level 1 orchestration)
///
/// Every ordered pair (i, j) is played, i == j included. Pairings run in
/// row-major order and share the roster's mutable state.
pub fn run_tournament(roster: &mut Roster, config: &TournamentConfig) -> Result<TournamentResult> {
    if roster.is_empty() {
        return Err(ArenaError::EmptyRoster);
    }
    config.validate()?;

    let n = roster.len();
    info!(
        participants = n,
        pairings = n * n,
        rounds = config.match_config.rounds,
        trials = config.monte_carlo.trials,
        "starting round-robin"
    );

    let names: Vec<String> = roster.names().into_iter().map(String::from).collect();
    let stochastic: Vec<bool> = roster.strategies().iter().map(|s| s.is_stochastic()).collect();

    let mut outcomes = Vec::with_capacity(n);
    for i in 0..n {
        let mut row = Vec::with_capacity(n);
        for j in 0..n {
            row.push(play_pairing(roster, i, j, config)?);
        }
        outcomes.push(row);
    }

    let result = TournamentResult::new(names, stochastic, outcomes);
    if let Some(winner) = result.winner() {
        info!(winner = %winner.name, total = winner.total_score, "round-robin complete");
    }
    Ok(result)
}

/// Play one ordered pairing: a single match, or Monte Carlo if either seat
/// is stochastic
///
/// # Panics
/// If `row` or `col` is outside the roster.
pub fn play_pairing(
    roster: &mut Roster,
    row: usize,
    col: usize,
    config: &TournamentConfig,
) -> Result<PairingOutcome> {
    let mut pairing = Pairing::from_roster(roster.strategies_mut(), row, col);
    let (name_a, name_b) = pairing.names();

    let outcome = if pairing.is_stochastic() {
        let outcome = run_monte_carlo(&mut pairing, &config.match_config, &config.monte_carlo)?;
        PairingOutcome::Stochastic { outcome }
    } else {
        let result = run_match(&mut pairing, &config.match_config);
        PairingOutcome::Deterministic { result }
    };

    let result = outcome.result();
    debug!(
        row,
        col,
        a = name_a,
        b = name_b,
        score_a = result.score_a,
        score_b = result.score_b,
        max_streak = result.max_streak,
        stochastic = outcome.summary().is_some(),
        "pairing complete"
    );

    Ok(outcome)
}
