//! Rank-weighted score tables.
//!
//! A table of length `k` maps the rank at which an expected word was found in
//! the closest-words list to the score it earns. Rank 0 earns the most; every
//! weight is strictly greater than the next and strictly below `max_score`.

use serde::{Deserialize, Serialize};

use crate::config::{
    BASE_SENSITIVITY_MAX, BASE_SENSITIVITY_MIN, CLOSEST_WORD_SIZE_MAX, CLOSEST_WORD_SIZE_MIN,
    DEFAULT_BASE_SENSITIVITY, DEFAULT_CLOSEST_WORD_SIZE,
};

/// Largest `3 * base^k` for which every sensitivity weight is an exact `f64`.
const EXACT_CEILING: u128 = 1 << 52;

/// How weights decay with rank.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ScoringPolicy {
    /// `max = 3 * base^k / 2`, `table[i] = max - base^(i+1)`.
    Sensitivity,
    /// `max = 2 * k^2`, `table[i] = max - (i+1)^2`.
    #[default]
    Proportional,
}

/// Scores indexed by rank (0 = best).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScoreTable {
    policy: ScoringPolicy,
    base: u32,
    max_score: f64,
    weights: Vec<f64>,
}

impl ScoreTable {
    /// Build a table for retrieval size `k`.
    ///
    /// Out-of-range `k` or `base` fall back to their defaults. A sensitivity
    /// base whose powers would exceed exact `f64` integers for this `k` also
    /// falls back; if even the default base cannot be represented, the table
    /// is built proportionally.
    pub fn prepare(policy: ScoringPolicy, base: u32, k: usize) -> Self {
        let k = if (CLOSEST_WORD_SIZE_MIN..=CLOSEST_WORD_SIZE_MAX).contains(&k) {
            k
        } else {
            tracing::warn!(k, default = DEFAULT_CLOSEST_WORD_SIZE, "closest word size out of range, using default");
            DEFAULT_CLOSEST_WORD_SIZE
        };

        match policy {
            ScoringPolicy::Proportional => Self::proportional(k),
            ScoringPolicy::Sensitivity => {
                let base = if (BASE_SENSITIVITY_MIN..=BASE_SENSITIVITY_MAX).contains(&base) {
                    base
                } else {
                    tracing::warn!(base, default = DEFAULT_BASE_SENSITIVITY, "base sensitivity out of range, using default");
                    DEFAULT_BASE_SENSITIVITY
                };
                if is_exact(base, k) {
                    Self::sensitivity(base, k)
                } else if is_exact(DEFAULT_BASE_SENSITIVITY, k) {
                    tracing::warn!(base, k, default = DEFAULT_BASE_SENSITIVITY, "base^k loses precision, using default base");
                    Self::sensitivity(DEFAULT_BASE_SENSITIVITY, k)
                } else {
                    tracing::warn!(base, k, "base^k loses precision, scoring proportionally");
                    Self::proportional(k)
                }
            }
        }
    }

    fn sensitivity(base: u32, k: usize) -> Self {
        let b = f64::from(base);
        let max_score = 3.0 * b.powi(k as i32) / 2.0;
        let weights = (0..k).map(|i| max_score - b.powi(i as i32 + 1)).collect();
        Self { policy: ScoringPolicy::Sensitivity, base, max_score, weights }
    }

    fn proportional(k: usize) -> Self {
        let max_score = 2.0 * (k * k) as f64;
        let weights = (0..k).map(|i| max_score - ((i + 1) * (i + 1)) as f64).collect();
        Self { policy: ScoringPolicy::Proportional, base: DEFAULT_BASE_SENSITIVITY, max_score, weights }
    }

    /// Score for a match at `rank`, if the rank is inside the table.
    pub fn weight(&self, rank: usize) -> Option<f64> {
        self.weights.get(rank).copied()
    }

    pub fn weights(&self) -> &[f64] {
        &self.weights
    }

    /// Theoretical ceiling of a single comparison.
    pub fn max_score(&self) -> f64 {
        self.max_score
    }

    pub fn policy(&self) -> ScoringPolicy {
        self.policy
    }

    /// Base in effect (only meaningful for `Sensitivity`).
    pub fn base(&self) -> u32 {
        self.base
    }

    /// Retrieval size `k`.
    pub fn len(&self) -> usize {
        self.weights.len()
    }

    pub fn is_empty(&self) -> bool {
        self.weights.is_empty()
    }
}

impl Default for ScoreTable {
    fn default() -> Self {
        Self::prepare(ScoringPolicy::default(), DEFAULT_BASE_SENSITIVITY, DEFAULT_CLOSEST_WORD_SIZE)
    }
}

fn is_exact(base: u32, k: usize) -> bool {
    u32::try_from(k)
        .ok()
        .and_then(|k| u128::from(base).checked_pow(k))
        .and_then(|p| p.checked_mul(3))
        .is_some_and(|p| p <= EXACT_CEILING)
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use proptest::prelude::*;

    #[test]
    fn test_sensitivity_base4_k5() {
        let table = ScoreTable::prepare(ScoringPolicy::Sensitivity, 4, 5);
        assert_eq!(table.max_score(), 1536.0);
        assert_eq!(table.weights(), &[1532.0, 1520.0, 1472.0, 1280.0, 512.0]);
    }

    #[test]
    fn test_proportional_k5() {
        let table = ScoreTable::prepare(ScoringPolicy::Proportional, 4, 5);
        assert_eq!(table.max_score(), 50.0);
        assert_eq!(table.weights(), &[49.0, 46.0, 41.0, 34.0, 25.0]);
    }

    #[test]
    fn test_out_of_range_base_falls_back() {
        let table = ScoreTable::prepare(ScoringPolicy::Sensitivity, 1, 5);
        assert_eq!(table.base(), DEFAULT_BASE_SENSITIVITY);
        let table = ScoreTable::prepare(ScoringPolicy::Sensitivity, 101, 5);
        assert_eq!(table.base(), DEFAULT_BASE_SENSITIVITY);
    }

    #[test]
    fn test_out_of_range_k_falls_back() {
        let table = ScoreTable::prepare(ScoringPolicy::Proportional, 4, 2);
        assert_eq!(table.len(), DEFAULT_CLOSEST_WORD_SIZE);
        let table = ScoreTable::prepare(ScoringPolicy::Proportional, 4, 101);
        assert_eq!(table.len(), DEFAULT_CLOSEST_WORD_SIZE);
    }

    #[test]
    fn test_imprecise_sensitivity_degrades() {
        let table = ScoreTable::prepare(ScoringPolicy::Sensitivity, 100, 10);
        assert_eq!(table.policy(), ScoringPolicy::Sensitivity);
        assert_eq!(table.base(), DEFAULT_BASE_SENSITIVITY);

        let table = ScoreTable::prepare(ScoringPolicy::Sensitivity, 4, 60);
        assert_eq!(table.policy(), ScoringPolicy::Proportional);
    }

    #[test]
    fn test_weight_outside_table() {
        let table = ScoreTable::prepare(ScoringPolicy::Proportional, 4, 3);
        assert_eq!(table.weight(2), Some(9.0));
        assert_eq!(table.weight(3), None);
    }

    proptest! {
        #[test]
        fn prop_weights_strictly_decreasing(
            k in CLOSEST_WORD_SIZE_MIN..=CLOSEST_WORD_SIZE_MAX,
            base in BASE_SENSITIVITY_MIN..=BASE_SENSITIVITY_MAX,
            sensitivity in any::<bool>(),
        ) {
            let policy = if sensitivity { ScoringPolicy::Sensitivity } else { ScoringPolicy::Proportional };
            let table = ScoreTable::prepare(policy, base, k);
            prop_assert_eq!(table.len(), k);
            for pair in table.weights().windows(2) {
                prop_assert!(pair[0] > pair[1], "{:?}", table.weights());
            }
            prop_assert!(table.weights()[0] < table.max_score());
            prop_assert!(*table.weights().last().unwrap() > 0.0);
        }
    }
}
