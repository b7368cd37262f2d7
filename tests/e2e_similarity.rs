//! End-to-end integration tests for similarity scoring.

use std::collections::HashMap;

use wat::{EmbeddingModel, Evaluator, Lexicon, MemoryLexicon, PartOfSpeech, RelationType, Scope, Settings, TestKind, NO_SCORE};

// ============================================================================
// Helpers
// ============================================================================

/// Embedding model that only knows the similarities it was given, in the
/// direction they were given.
struct PairwiseModel {
    vocabulary: Vec<&'static str>,
    similarities: HashMap<(&'static str, &'static str), f64>,
}

impl PairwiseModel {
    fn new(vocabulary: &[&'static str], pairs: &[(&'static str, &'static str, f64)]) -> Self {
        Self {
            vocabulary: vocabulary.to_vec(),
            similarities: pairs.iter().map(|(a, b, v)| ((*a, *b), *v)).collect(),
        }
    }
}

impl EmbeddingModel for PairwiseModel {
    fn name(&self) -> &str {
        "pairwise"
    }

    fn has_word(&self, lemma: &str) -> bool {
        self.vocabulary.iter().any(|w| *w == lemma)
    }

    fn similarity(&self, a: &str, b: &str) -> Option<f64> {
        self.similarities
            .iter()
            .find(|((x, y), _)| *x == a && *y == b)
            .map(|(_, v)| *v)
    }

    fn closest_words(&self, _positive: &[&str], _negative: &[&str], _k: usize) -> Vec<String> {
        Vec::new()
    }

    fn nearest_words(&self, _lemma: &str, _k: usize) -> Vec<String> {
        Vec::new()
    }

    fn vocabulary_size(&self) -> usize {
        self.vocabulary.len()
    }
}

/// dog and puppy share a synset; dog points at wolf lexically.
fn canids() -> MemoryLexicon {
    let mut lex = MemoryLexicon::new();
    let dog_s = lex.add_synset(PartOfSpeech::Noun, "a domesticated canid");
    let wolf_s = lex.add_synset(PartOfSpeech::Noun, "a wild canid");
    let dog = lex.add_word("dog", dog_s).unwrap();
    lex.add_word("puppy", dog_s).unwrap();
    let wolf = lex.add_word("wolf", wolf_s).unwrap();
    lex.relate_words(dog, RelationType::DerivationallyRelated, wolf).unwrap();
    lex
}

// ============================================================================
// 1. Accumulation
// ============================================================================

#[test]
fn test_negative_similarity_is_clipped() {
    let lex = canids();
    let model = PairwiseModel::new(&["dog", "puppy", "wolf"], &[("dog", "puppy", 0.8), ("dog", "wolf", -0.2)]);
    let mut evaluator = Evaluator::new(&lex, Settings::default());

    evaluator.run(&model, Scope::Only(PartOfSpeech::Noun), TestKind::Similarity);

    let scores = evaluator.scores();
    assert_eq!(scores.similarity_sum(), 0.8);
    assert_eq!(scores.similarity_count(), 2);
    assert!((scores.similarity_percentage() - 40.0).abs() < 1e-9);
}

#[test]
fn test_words_outside_vocabulary_are_skipped() {
    let lex = canids();
    let model = PairwiseModel::new(&["dog", "puppy"], &[("dog", "puppy", 0.8), ("dog", "wolf", 0.5)]);
    let mut evaluator = Evaluator::new(&lex, Settings::default());

    evaluator.score_similarity(&model, Scope::All);
    assert_eq!(evaluator.scores().similarity_count(), 1);
}

#[test]
fn test_no_comparisons_gives_sentinel() {
    let lex = canids();
    let model = PairwiseModel::new(&[], &[]);
    let mut evaluator = Evaluator::new(&lex, Settings::default());

    evaluator.score_similarity(&model, Scope::All);
    assert_eq!(evaluator.scores().similarity_percentage(), NO_SCORE);
}

// ============================================================================
// 2. Phrases
// ============================================================================

#[test]
fn test_phrase_toggle() {
    let mut lex = canids();
    let dog_s = lex.word(wat::WordId(0)).map(|w| w.synset).unwrap();
    lex.add_word("hot_dog", dog_s).unwrap();
    let model = PairwiseModel::new(&["dog", "puppy", "hot_dog"], &[("dog", "puppy", 0.5), ("dog", "hot_dog", 0.5)]);

    let mut strict = Evaluator::new(&lex, Settings::default());
    strict.score_similarity(&model, Scope::All);
    assert_eq!(strict.scores().similarity_count(), 1);

    let mut permissive = Evaluator::new(&lex, Settings { exclude_phrases: false, ..Settings::default() });
    permissive.score_similarity(&model, Scope::All);
    assert_eq!(permissive.scores().similarity_count(), 2);
}

// ============================================================================
// 3. Parallel
// ============================================================================

#[test]
fn test_parallel_similarity_matches_serial() {
    let lex = canids();
    let model = PairwiseModel::new(&["dog", "puppy", "wolf"], &[("dog", "puppy", 0.8), ("dog", "wolf", 0.3)]);

    let mut serial = Evaluator::new(&lex, Settings::default());
    serial.run(&model, Scope::All, TestKind::Similarity);
    let mut parallel = Evaluator::new(&lex, Settings::default());
    parallel.run_parallel(&model, TestKind::Similarity);

    assert_eq!(serial.scores().similarity_count(), parallel.scores().similarity_count());
    assert!((serial.scores().similarity_sum() - parallel.scores().similarity_sum()).abs() < 1e-12);
}
