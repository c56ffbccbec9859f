//! Summary statistics over Monte Carlo samples

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::error::{ArenaError, Result};

/// Distribution of a stochastic pairing's score for the row strategy
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct DistributionSummary {
    pub mean: f64,
    pub median: f64,
    /// Most frequent score; ties go to the smallest score
    pub mode: u32,
    /// Sample variance (n - 1 denominator)
    pub variance: f64,
    /// Mean of the per-trial max streaks
    pub mean_streak: f64,
    /// Number of samples
    pub trials: u32,
}

impl DistributionSummary {
    /// Summarise score and streak samples taken from the same trials
    pub fn from_samples(scores: &[u32], streaks: &[u32]) -> Result<Self> {
        if scores.len() < 2 {
            if scores.is_empty() {
                return Err(ArenaError::EmptySample);
            }
            return Err(ArenaError::InvalidTrials { trials: 1 });
        }
        if streaks.is_empty() {
            return Err(ArenaError::EmptySample);
        }

        Ok(Self {
            mean: mean(scores),
            median: median(scores),
            mode: mode(scores),
            variance: variance(scores),
            mean_streak: mean(streaks),
            trials: scores.len() as u32,
        })
    }

    pub fn std_dev(&self) -> f64 {
        self.variance.sqrt()
    }
}

/// Arithmetic mean; 0 for an empty sample
pub fn mean(samples: &[u32]) -> f64 {
    if samples.is_empty() {
        return 0.0;
    }
    let sum: u64 = samples.iter().map(|&x| x as u64).sum();
    sum as f64 / samples.len() as f64
}

/// Central value, or the mean of the two central values for even counts
pub fn median(samples: &[u32]) -> f64 {
    if samples.is_empty() {
        return 0.0;
    }
    let mut sorted = samples.to_vec();
    sorted.sort_unstable();

    let mid = sorted.len() / 2;
    if sorted.len() % 2 == 0 {
        (sorted[mid - 1] as f64 + sorted[mid] as f64) / 2.0
    } else {
        sorted[mid] as f64
    }
}

/// Most frequent value, smallest value on ties; 0 for an empty sample
pub fn mode(samples: &[u32]) -> u32 {
    let mut counts: BTreeMap<u32, usize> = BTreeMap::new();
    for &x in samples {
        *counts.entry(x).or_insert(0) += 1;
    }

    let mut best = (0u32, 0usize);
    // Ascending keys: only a strictly higher count replaces the leader
    for (value, count) in counts {
        if count > best.1 {
            best = (value, count);
        }
    }
    best.0
}

/// Sample variance with Bessel's correction; 0 for fewer than two samples
pub fn variance(samples: &[u32]) -> f64 {
    if samples.len() < 2 {
        return 0.0;
    }
    let m = mean(samples);
    let sum_sq: f64 = samples.iter().map(|&x| (x as f64 - m).powi(2)).sum();
    sum_sq / (samples.len() - 1) as f64
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_mean() {
        assert_eq!(mean(&[]), 0.0);
        assert_eq!(mean(&[4]), 4.0);
        assert_eq!(mean(&[1, 2, 3, 4]), 2.5);
    }

    #[test]
    fn test_median_odd_and_even() {
        assert_eq!(median(&[5, 1, 3]), 3.0);
        assert_eq!(median(&[4, 1, 3, 2]), 2.5);
        assert_eq!(median(&[600, 0]), 300.0);
        assert_eq!(median(&[7]), 7.0);
    }

    #[test]
    fn test_mode_tie_breaks_to_smallest() {
        assert_eq!(mode(&[3, 3, 1, 1, 2]), 1);
        assert_eq!(mode(&[9, 2, 9, 2]), 2);
        assert_eq!(mode(&[5, 4, 4, 5, 5]), 5);
        assert_eq!(mode(&[42]), 42);
        assert_eq!(mode(&[]), 0);
    }

    #[test]
    fn test_variance() {
        // Sample variance of 2,4,4,4,5,5,7,9 is 32/7
        let v = variance(&[2, 4, 4, 4, 5, 5, 7, 9]);
        assert!((v - 32.0 / 7.0).abs() < 1e-12);
        assert_eq!(variance(&[3, 3, 3]), 0.0);
        assert_eq!(variance(&[3]), 0.0);
    }

    #[test]
    fn test_summary_from_samples() {
        let summary = DistributionSummary::from_samples(&[3, 6, 6, 9], &[1, 2, 3, 2]).unwrap();
        assert_eq!(summary.mean, 6.0);
        assert_eq!(summary.median, 6.0);
        assert_eq!(summary.mode, 6);
        assert!((summary.variance - 6.0).abs() < 1e-12);
        assert!((summary.std_dev() - 6.0f64.sqrt()).abs() < 1e-12);
        assert_eq!(summary.mean_streak, 2.0);
        assert_eq!(summary.trials, 4);
    }

    #[test]
    fn test_summary_rejects_small_samples() {
        assert_eq!(
            DistributionSummary::from_samples(&[], &[]),
            Err(ArenaError::EmptySample)
        );
        assert_eq!(
            DistributionSummary::from_samples(&[1], &[0]),
            Err(ArenaError::InvalidTrials { trials: 1 })
        );
    }

    mod proptests {
        use super::*;
        use proptest::prelude::*;

        proptest! {
            /// Property: summary agrees with a direct recomputation over 1000 samples
            #[test]
            fn prop_summary_matches_direct(samples in prop::collection::vec(0u32..=1000, 1000)) {
                let summary = DistributionSummary::from_samples(&samples, &samples).unwrap();

                let n = samples.len() as f64;
                let direct_mean = samples.iter().map(|&x| x as f64).sum::<f64>() / n;
                let direct_var = samples
                    .iter()
                    .map(|&x| (x as f64 - direct_mean) * (x as f64 - direct_mean))
                    .sum::<f64>()
                    / (n - 1.0);
                let mut sorted = samples.clone();
                sorted.sort();
                let direct_median = (sorted[499] as f64 + sorted[500] as f64) / 2.0;

                prop_assert!((summary.mean - direct_mean).abs() < 1e-9);
                prop_assert!((summary.variance - direct_var).abs() < 1e-6);
                prop_assert!((summary.median - direct_median).abs() < 1e-12);
                prop_assert!(summary.variance >= 0.0);
                prop_assert!((summary.mean_streak - summary.mean).abs() < 1e-12);
            }

            /// Property: the mode is a most frequent value and no smaller value ties it
            #[test]
            fn prop_mode_is_smallest_most_frequent(samples in prop::collection::vec(0u32..20, 1..200)) {
                let m = mode(&samples);
                let count = |v: u32| samples.iter().filter(|&&x| x == v).count();
                let best = count(m);

                prop_assert!(best > 0);
                for &x in &samples {
                    prop_assert!(count(x) <= best);
                    if x < m {
                        prop_assert!(count(x) < best);
                    }
                }
            }
        }
    }
}
