//! Tournament roster
//!
//! Built once before the tournament; the instances (and their random
//! streams) are reused for every pairing and every Monte Carlo trial.

use crate::error::{ArenaError, Result};
use crate::random::SeededRng;
use crate::strategy::{Strategy, StrategyKind};

#[derive(Clone, Debug)]
pub struct Roster {
    strategies: Vec<Strategy>,
}

impl Roster {
    /// All fifteen catalog strategies in catalog order
    pub fn standard(seed: Option<u64>) -> Self {
        Self::build(&StrategyKind::ALL, seed)
    }

    /// A roster of the given kinds; order defines the roster index
    pub fn from_kinds(kinds: &[StrategyKind], seed: Option<u64>) -> Result<Self> {
        if kinds.is_empty() {
            return Err(ArenaError::EmptyRoster);
        }
        Ok(Self::build(kinds, seed))
    }

    /// Parse a list of strategy names
    pub fn from_names<S: AsRef<str>>(names: &[S], seed: Option<u64>) -> Result<Self> {
        let kinds = names
            .iter()
            .map(|name| name.as_ref().parse::<StrategyKind>())
            .collect::<Result<Vec<_>>>()?;
        Self::from_kinds(&kinds, seed)
    }

    fn build(kinds: &[StrategyKind], seed: Option<u64>) -> Self {
        let strategies = kinds
            .iter()
            .enumerate()
            .map(|(slot, &kind)| Strategy::new(kind, SeededRng::for_slot(seed, slot)))
            .collect();
        Self { strategies }
    }

    pub fn len(&self) -> usize {
        self.strategies.len()
    }

    pub fn is_empty(&self) -> bool {
        self.strategies.is_empty()
    }

    pub fn names(&self) -> Vec<&'static str> {
        self.strategies.iter().map(Strategy::name).collect()
    }

    pub fn strategies(&self) -> &[Strategy] {
        &self.strategies
    }

    pub fn strategies_mut(&mut self) -> &mut [Strategy] {
        &mut self.strategies
    }

    /// Index of the first strategy of `kind`
    pub fn position(&self, kind: StrategyKind) -> Option<usize> {
        self.strategies.iter().position(|s| s.kind() == kind)
    }

    pub fn get_mut(&mut self, index: usize) -> Option<&mut Strategy> {
        self.strategies.get_mut(index)
    }
}
