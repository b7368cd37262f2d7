//! # Score Accumulator
//!
//! Rank-weighted scoring tables and the running totals they feed.
//!
//! ```text
//! closest words ──► RankedWords ──claim(expected)──► rank i ──► ScoreTable[i]
//!                                                                   │
//!                         ScoreState { sums, counts } ◄─────────────┘
//! ```

pub mod table;
pub mod state;

pub use table::{ScoreTable, ScoringPolicy};
pub use state::{ScoreState, ScoreReport, RankedWords, NO_SCORE};
