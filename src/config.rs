//! Evaluation settings.
//!
//! A flat settings struct with bounded fields. Out-of-range values never
//! fail an evaluation; [`Settings::sanitized`] replaces them with defaults
//! and logs a warning.

use serde::{Deserialize, Serialize};

use crate::scoring::{ScoreTable, ScoringPolicy};
use crate::traversal::ComparisonMode;
use crate::validator::WordValidator;
use crate::{Error, Result};

// ============================================================================
// Bounds and defaults
// ============================================================================

pub const DEFAULT_ITERATION_CAP_FOR_POINTER: usize = 10;
pub const ITERATION_CAP_MIN: usize = 3;
pub const ITERATION_CAP_MAX: usize = 200_000;
/// Caps above this are honoured but make a full run very slow.
pub const ITERATION_CAP_SOFT_CEILING: usize = 1_000;

pub const DEFAULT_CLOSEST_WORD_SIZE: usize = 10;
pub const CLOSEST_WORD_SIZE_MIN: usize = 3;
pub const CLOSEST_WORD_SIZE_MAX: usize = 100;

pub const DEFAULT_BASE_SENSITIVITY: u32 = 4;
pub const BASE_SENSITIVITY_MIN: u32 = 2;
pub const BASE_SENSITIVITY_MAX: u32 = 100;

/// Threshold used when the minimum-similarity filter is switched on.
pub const SUGGESTED_MIN_SIMILARITY: f64 = 0.65;

// ============================================================================
// Settings
// ============================================================================

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    /// Comparisons drawn from one relation bucket per (root, related) pair.
    pub iteration_cap_for_pointer: usize,
    /// `k` for closest-words queries; also the score table length.
    pub closest_word_size: usize,
    pub policy: ScoringPolicy,
    /// Only used by `ScoringPolicy::Sensitivity`.
    pub base_sensitivity: u32,
    pub exclude_phrases: bool,
    /// Skip compared words less similar than this to the root. Off when `None`.
    pub min_similarity_for_comparison: Option<f64>,
    pub comparison_mode: ComparisonMode,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            iteration_cap_for_pointer: DEFAULT_ITERATION_CAP_FOR_POINTER,
            closest_word_size: DEFAULT_CLOSEST_WORD_SIZE,
            policy: ScoringPolicy::default(),
            base_sensitivity: DEFAULT_BASE_SENSITIVITY,
            exclude_phrases: true,
            min_similarity_for_comparison: None,
            comparison_mode: ComparisonMode::default(),
        }
    }
}

impl Settings {
    /// Parse settings from JSON. Missing fields take their defaults.
    pub fn from_json(json: &str) -> Result<Self> {
        serde_json::from_str(json).map_err(|e| Error::Config(e.to_string()))
    }

    /// Copy with every out-of-range field replaced by its default.
    pub fn sanitized(&self) -> Self {
        let mut s = self.clone();

        if !(ITERATION_CAP_MIN..=ITERATION_CAP_MAX).contains(&s.iteration_cap_for_pointer) {
            tracing::warn!(
                cap = s.iteration_cap_for_pointer,
                default = DEFAULT_ITERATION_CAP_FOR_POINTER,
                "iteration cap out of range, using default"
            );
            s.iteration_cap_for_pointer = DEFAULT_ITERATION_CAP_FOR_POINTER;
        } else if s.iteration_cap_for_pointer > ITERATION_CAP_SOFT_CEILING {
            tracing::warn!(
                cap = s.iteration_cap_for_pointer,
                "iteration cap is very high, a full run may take a long time"
            );
        }

        if !(CLOSEST_WORD_SIZE_MIN..=CLOSEST_WORD_SIZE_MAX).contains(&s.closest_word_size) {
            tracing::warn!(
                k = s.closest_word_size,
                default = DEFAULT_CLOSEST_WORD_SIZE,
                "closest word size out of range, using default"
            );
            s.closest_word_size = DEFAULT_CLOSEST_WORD_SIZE;
        }

        if !(BASE_SENSITIVITY_MIN..=BASE_SENSITIVITY_MAX).contains(&s.base_sensitivity) {
            tracing::warn!(
                base = s.base_sensitivity,
                default = DEFAULT_BASE_SENSITIVITY,
                "base sensitivity out of range, using default"
            );
            s.base_sensitivity = DEFAULT_BASE_SENSITIVITY;
        }

        if let Some(min) = s.min_similarity_for_comparison {
            if !(-1.0..=1.0).contains(&min) {
                tracing::warn!(min, "minimum similarity outside [-1, 1], filter disabled");
                s.min_similarity_for_comparison = None;
            }
        }

        s
    }

    pub fn validator(&self) -> WordValidator {
        WordValidator::new(self.exclude_phrases)
    }

    pub fn score_table(&self) -> ScoreTable {
        ScoreTable::prepare(self.policy, self.base_sensitivity, self.closest_word_size)
    }
}
