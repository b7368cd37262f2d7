//! # Embedding Model Capability
//!
//! The contract between the scoring core and a trained word-vector model.
//! Skip-gram/CBOW and co-occurrence (GloVe-style) models expose the same four
//! queries, so the traversal is agnostic to which technique backs it.
//!
//! ## Implementations
//!
//! | Model | Module | Description |
//! |-------|--------|-------------|
//! | `VectorModel` | `vectors` | Dense in-memory vectors, cosine / 3CosAdd |
//!
//! Training and loading models from disk belong to the caller.

pub mod vectors;

pub use vectors::VectorModel;

/// Queries the traversal issues against an embedding space.
pub trait EmbeddingModel: Send + Sync {
    /// Human-readable model name (used in reports).
    fn name(&self) -> &str;

    /// Whether the lemma is in the model's vocabulary.
    fn has_word(&self, lemma: &str) -> bool;

    /// Cosine similarity, or `None` if either word is absent.
    fn similarity(&self, a: &str, b: &str) -> Option<f64>;

    /// Vector-arithmetic nearest-neighbour query: the `k` words closest to
    /// `sum(positive) - sum(negative)`, best first. Query words are excluded.
    fn closest_words(&self, positive: &[&str], negative: &[&str], k: usize) -> Vec<String>;

    /// The `k` words closest to `lemma`, best first, excluding `lemma`.
    fn nearest_words(&self, lemma: &str, k: usize) -> Vec<String>;

    /// Number of words in the vocabulary.
    fn vocabulary_size(&self) -> usize;
}

impl<M: EmbeddingModel + ?Sized> EmbeddingModel for &M {
    fn name(&self) -> &str {
        (**self).name()
    }

    fn has_word(&self, lemma: &str) -> bool {
        (**self).has_word(lemma)
    }

    fn similarity(&self, a: &str, b: &str) -> Option<f64> {
        (**self).similarity(a, b)
    }

    fn closest_words(&self, positive: &[&str], negative: &[&str], k: usize) -> Vec<String> {
        (**self).closest_words(positive, negative, k)
    }

    fn nearest_words(&self, lemma: &str, k: usize) -> Vec<String> {
        (**self).nearest_words(lemma, k)
    }

    fn vocabulary_size(&self) -> usize {
        (**self).vocabulary_size()
    }
}
