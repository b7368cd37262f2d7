//! Running score totals.

use serde::{Deserialize, Serialize};

use crate::model::lemmas_match;
use super::ScoreTable;

/// Returned by percentage getters when nothing has been counted yet.
pub const NO_SCORE: f64 = -1.0;

// ============================================================================
// RankedWords
// ============================================================================

/// Working copy of one closest-words result.
///
/// Each slot can be claimed by at most one expected word. Claimed slots keep
/// their position, so later matches are still scored at their original rank.
/// A fresh `RankedWords` is created for every triple; claims never carry over.
#[derive(Debug, Clone, PartialEq)]
pub struct RankedWords {
    words: Vec<String>,
    claimed: Vec<bool>,
}

impl RankedWords {
    pub fn new(words: Vec<String>) -> Self {
        let claimed = vec![false; words.len()];
        Self { words, claimed }
    }

    /// Claim the best-ranked unclaimed slot matching `word` case-insensitively.
    pub fn claim(&mut self, word: &str) -> Option<usize> {
        let rank = self
            .words
            .iter()
            .zip(&self.claimed)
            .position(|(candidate, claimed)| !claimed && lemmas_match(candidate, word))?;
        self.claimed[rank] = true;
        Some(rank)
    }

    pub fn words(&self) -> &[String] {
        &self.words
    }

    pub fn len(&self) -> usize {
        self.words.len()
    }

    pub fn is_empty(&self) -> bool {
        self.words.is_empty()
    }
}

impl From<Vec<String>> for RankedWords {
    fn from(words: Vec<String>) -> Self {
        Self::new(words)
    }
}

// ============================================================================
// ScoreState
// ============================================================================

/// Similarity and analogy totals for one session.
///
/// Created once, reset explicitly between runs. Workers can each fill a
/// [`ScoreState::partial`] and [`ScoreState::merge`] it back.
#[derive(Debug, Clone, PartialEq)]
pub struct ScoreState {
    table: ScoreTable,
    similarity_sum: f64,
    similarity_count: u64,
    analogy_sum: f64,
    /// Expected-word evaluations, matched or not.
    analogy_count: u64,
    match_count: u64,
    /// Closest-words queries issued.
    triple_count: u64,
}

impl ScoreState {
    pub fn new(table: ScoreTable) -> Self {
        Self {
            table,
            similarity_sum: 0.0,
            similarity_count: 0,
            analogy_sum: 0.0,
            analogy_count: 0,
            match_count: 0,
            triple_count: 0,
        }
    }

    /// Empty state sharing this state's table.
    pub fn partial(&self) -> Self {
        Self::new(self.table.clone())
    }

    pub fn table(&self) -> &ScoreTable {
        &self.table
    }

    /// Swap in a new table. Counters are left alone.
    pub fn set_table(&mut self, table: ScoreTable) {
        self.table = table;
    }

    /// Zero all counters. The table is kept.
    pub fn reset(&mut self) {
        *self = Self::new(self.table.clone());
    }

    // ========================================================================
    // Updates
    // ========================================================================

    pub fn update_similarity(&mut self, value: f64) {
        self.similarity_sum += value;
        self.similarity_count += 1;
    }

    /// Score one expected word against a triple's closest words.
    ///
    /// On a match the slot is claimed and `table[rank]` is added. The
    /// evaluation counts toward the denominator either way.
    pub fn update_analogy(&mut self, expected: &str, closest: &mut RankedWords) -> bool {
        self.analogy_count += 1;
        let Some(rank) = closest.claim(expected) else {
            return false;
        };
        match self.table.weight(rank) {
            Some(weight) => {
                tracing::debug!(expected, rank = rank + 1, "expected word found in closest words");
                self.analogy_sum += weight;
                self.match_count += 1;
                true
            }
            None => false,
        }
    }

    /// Score every expected word of one (root, pair, compared) triple.
    /// Returns the number of matches.
    pub fn score_triple<S: AsRef<str>>(&mut self, expected: &[S], closest: Vec<String>) -> usize {
        self.triple_count += 1;
        let mut ranked = RankedWords::new(closest);
        expected
            .iter()
            .filter(|e| self.update_analogy(e.as_ref(), &mut ranked))
            .count()
    }

    /// Fold another partial state into this one.
    pub fn merge(&mut self, other: &ScoreState) {
        if self.table != other.table {
            tracing::warn!("merging score states built with different tables");
        }
        self.similarity_sum += other.similarity_sum;
        self.similarity_count += other.similarity_count;
        self.analogy_sum += other.analogy_sum;
        self.analogy_count += other.analogy_count;
        self.match_count += other.match_count;
        self.triple_count += other.triple_count;
    }

    // ========================================================================
    // Read-back
    // ========================================================================

    /// `100 * sum / (count * max_score)`, or [`NO_SCORE`] when nothing was counted.
    pub fn analogy_percentage(&self) -> f64 {
        if self.analogy_count == 0 {
            return NO_SCORE;
        }
        100.0 * self.analogy_sum / (self.analogy_count as f64 * self.table.max_score())
    }

    /// `100 * sum / count`, or [`NO_SCORE`] when nothing was counted.
    pub fn similarity_percentage(&self) -> f64 {
        if self.similarity_count == 0 {
            return NO_SCORE;
        }
        100.0 * self.similarity_sum / self.similarity_count as f64
    }

    pub fn similarity_sum(&self) -> f64 {
        self.similarity_sum
    }

    pub fn similarity_count(&self) -> u64 {
        self.similarity_count
    }

    pub fn analogy_sum(&self) -> f64 {
        self.analogy_sum
    }

    pub fn analogy_count(&self) -> u64 {
        self.analogy_count
    }

    pub fn match_count(&self) -> u64 {
        self.match_count
    }

    pub fn triple_count(&self) -> u64 {
        self.triple_count
    }

    pub fn report(&self) -> ScoreReport {
        ScoreReport {
            similarity_sum: self.similarity_sum,
            similarity_count: self.similarity_count,
            similarity_percentage: self.similarity_percentage(),
            analogy_sum: self.analogy_sum,
            analogy_count: self.analogy_count,
            analogy_percentage: self.analogy_percentage(),
            match_count: self.match_count,
            triple_count: self.triple_count,
            max_score: self.table.max_score(),
        }
    }
}

impl Default for ScoreState {
    fn default() -> Self {
        Self::new(ScoreTable::default())
    }
}

// ============================================================================
// ScoreReport
// ============================================================================

/// Snapshot of a `ScoreState`, ready for a file writer.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScoreReport {
    pub similarity_sum: f64,
    pub similarity_count: u64,
    pub similarity_percentage: f64,
    pub analogy_sum: f64,
    pub analogy_count: u64,
    pub analogy_percentage: f64,
    pub match_count: u64,
    pub triple_count: u64,
    pub max_score: f64,
}

impl ScoreReport {
    /// Plain-text lines in insertion order.
    pub fn lines(&self) -> Vec<String> {
        vec![
            format!("similarity sum: {}", self.similarity_sum),
            format!("similarity count: {}", self.similarity_count),
            format!("similarity percentage: {}", self.similarity_percentage),
            format!("analogy sum: {}", self.analogy_sum),
            format!("analogy count: {}", self.analogy_count),
            format!("analogy percentage: {}", self.analogy_percentage),
            format!("analogy matches: {}", self.match_count),
            format!("analogy triples: {}", self.triple_count),
            format!("max score: {}", self.max_score),
        ]
    }
}

impl std::fmt::Display for ScoreReport {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "ScoreReport {{ similarity: {} / {} ({}%), analogy: {} / {} ({}%), matches: {}, max score: {} }}",
            self.similarity_sum, self.similarity_count, self.similarity_percentage,
            self.analogy_sum, self.analogy_count, self.analogy_percentage,
            self.match_count, self.max_score,
        )
    }
}

// ============================================================================
// Tests
// ============================================================================
