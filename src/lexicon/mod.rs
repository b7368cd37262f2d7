//! # Lexicon Trait
//!
//! This is THE contract between the scoring core and the lexical relation
//! database it evaluates against (a WordNet-like resource).
//!
//! ## Implementations
//!
//! | Backend | Module | Description |
//! |---------|--------|-------------|
//! | `MemoryLexicon` | `memory` | Arena-backed, built in code or loaded from a JSON snapshot |
//!
//! Parsing raw lexical database files is left to the caller; anything that
//! can answer these lookups can back an evaluation.

pub mod memory;

use crate::model::*;

pub use memory::{MemoryLexicon, LexiconSnapshot};

// ============================================================================
// Lexicon Trait
// ============================================================================

/// Read-only access to a lexical relation graph.
///
/// Implementations must be immutable for the duration of an evaluation:
/// the relation index built from them is never refreshed.
pub trait Lexicon: Send + Sync {
    /// Look up a word sense by ID.
    fn word(&self, id: WordId) -> Option<&Word>;

    /// Look up a synset by ID.
    fn synset(&self, id: SynsetId) -> Option<&Synset>;

    /// All word senses of one part of speech, in stable order.
    fn words(&self, pos: PartOfSpeech) -> Box<dyn Iterator<Item = &Word> + '_>;

    /// Senses whose lemma matches case-insensitively.
    fn words_by_lemma(&self, lemma: &str, pos: PartOfSpeech) -> Vec<WordId>;

    /// Total number of word senses.
    fn word_count(&self) -> usize;

    /// Total number of synsets.
    fn synset_count(&self) -> usize;

    // ========================================================================
    // Provided helpers
    // ========================================================================

    fn lemma(&self, id: WordId) -> Option<&str> {
        self.word(id).map(|w| w.lemma.as_str())
    }

    /// The synset a word belongs to.
    fn synset_of(&self, word: &Word) -> Option<&Synset> {
        self.synset(word.synset)
    }

    /// Lemmas of a word's lexical targets under one relation type.
    fn lexical_targets(&self, word: &Word, relation: RelationType) -> Vec<&str> {
        word.relations
            .get(relation)
            .iter()
            .filter_map(|id| self.lemma(*id))
            .collect()
    }

    /// Lemmas of every member of every synset related to the word's synset
    /// under one relation type.
    fn semantic_targets(&self, word: &Word, relation: RelationType) -> Vec<&str> {
        let Some(synset) = self.synset_of(word) else {
            return Vec::new();
        };
        synset
            .relations
            .get(relation)
            .iter()
            .filter_map(|sid| self.synset(*sid))
            .flat_map(|s| s.members.iter())
            .filter_map(|id| self.lemma(*id))
            .collect()
    }
}
