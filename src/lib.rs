//! # wat: Word Analogy Task
//!
//! Measures how well the geometry of a distributional embedding model agrees
//! with a curated lexical relation graph (WordNet-like).
//!
//! Two metrics are produced:
//!
//! - **similarity score**: average clipped cosine similarity between words the
//!   graph says are related (lexical relations and synset co-members).
//! - **analogy score**: rank-weighted accuracy of vector arithmetic queries
//!   (`root + pair - compared`) recovering the words the graph says should be
//!   recoverable.
//!
//! ## Design Principles
//!
//! 1. **Trait-first**: `Lexicon` and `EmbeddingModel` are the contracts to the
//!    two external collaborators; the scoring core never sees a concrete backend
//! 2. **Pure data model**: `Word`, `Synset`, `RelationType` are plain DTOs
//! 3. **Read-only index**: the `RelationIndex` is built once and shared
//! 4. **Explicit accumulator**: `ScoreState` is threaded through traversal and
//!    can be split into per-worker partial sums and merged
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use wat::{Evaluator, MemoryLexicon, PartOfSpeech, RelationType, Scope, Settings, TestKind};
//! use wat::embedding::VectorModel;
//!
//! # fn example() -> wat::Result<()> {
//! let mut lexicon = MemoryLexicon::new();
//! let dog = lexicon.add_synset(PartOfSpeech::Noun, "a domesticated canid");
//! let animal = lexicon.add_synset(PartOfSpeech::Noun, "a living organism");
//! lexicon.add_word("dog", dog)?;
//! lexicon.add_word("animal", animal)?;
//! lexicon.relate_synsets(dog, RelationType::Hypernym, animal)?;
//!
//! let model = VectorModel::from_entries("toy", vec![
//!     ("dog".to_string(), vec![1.0, 0.0]),
//!     ("animal".to_string(), vec![0.7, 0.7]),
//! ])?;
//!
//! let mut evaluator = Evaluator::new(&lexicon, Settings::default());
//! evaluator.run(&model, Scope::All, TestKind::Analogy);
//! println!("{}", evaluator.scores().report());
//! # Ok(())
//! # }
//! ```

// ============================================================================
// Modules
// ============================================================================

pub mod model;
pub mod lexicon;
pub mod embedding;
pub mod validator;
pub mod index;
pub mod scoring;
pub mod traversal;
pub mod config;
pub mod report;

// ============================================================================
// Re-exports: Model (the DTOs)
// ============================================================================

pub use model::{
    Word, WordId, Synset, SynsetId, PartOfSpeech,
    RelationType, RelationCategory, RelationMap,
};

// ============================================================================
// Re-exports: Collaborators
// ============================================================================

pub use lexicon::{Lexicon, MemoryLexicon};
pub use embedding::EmbeddingModel;

// ============================================================================
// Re-exports: Core
// ============================================================================

pub use validator::{WordValidator, is_eligible};
pub use index::RelationIndex;
pub use scoring::{ScoreState, ScoreTable, ScoringPolicy, ScoreReport, RankedWords, NO_SCORE};
pub use traversal::{Evaluator, Scope, TestKind, ComparisonMode};
pub use config::Settings;

// ============================================================================
// Error Types
// ============================================================================

#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("Model build error: {0}")]
    ModelBuild(String),

    #[error("Lexicon error: {0}")]
    Lexicon(String),

    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

pub type Result<T> = std::result::Result<T, Error>;
