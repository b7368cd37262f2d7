//! Relation index: relation type → words exhibiting it.
//!
//! One bucket per relation type, stored as a fixed array indexed by
//! `RelationType as usize`. Buckets hold `WordId`s into the lexicon arena in
//! ascending order, which keeps iteration (and therefore the iteration cap)
//! deterministic and makes the index cheap to share read-only across workers.
//!
//! Eligibility is decided once, at build time, by the `WordValidator`; the
//! index never consults an embedding model, so one index serves every model
//! evaluated against the same lexicon.

use std::array;

use crate::lexicon::Lexicon;
use crate::model::{PartOfSpeech, RelationType, Word, WordId};
use crate::validator::WordValidator;

/// Reverse index from analogy-eligible relation types to participating words.
#[derive(Debug, Clone, PartialEq)]
pub struct RelationIndex {
    buckets: [Vec<WordId>; RelationType::COUNT],
    /// Word senses visited while building.
    mapped_words: usize,
    validator: WordValidator,
}

impl RelationIndex {
    /// Scan every word once. O(total relation edges).
    ///
    /// A word lands in the bucket of every word-level analogy type in its own
    /// relation map and every synset-level analogy type in its synset's
    /// relation map, provided its lemma passes the validator.
    pub fn build<L: Lexicon + ?Sized>(lexicon: &L, validator: WordValidator) -> Self {
        let mut buckets: [Vec<WordId>; RelationType::COUNT] = array::from_fn(|_| Vec::new());
        let mut mapped_words = 0;

        for pos in PartOfSpeech::ALL {
            for word in lexicon.words(pos) {
                mapped_words += 1;
                if !validator.is_eligible(&word.lemma) {
                    tracing::debug!(lemma = %word.lemma, "not indexed: ineligible lemma");
                    continue;
                }
                for relation in word.relations.types().filter(|r| r.is_lexical_analogy()) {
                    add_to_bucket(&mut buckets, relation, word);
                }
                if let Some(synset) = lexicon.synset_of(word) {
                    for relation in synset.relations.types().filter(|r| r.is_semantic_analogy()) {
                        add_to_bucket(&mut buckets, relation, word);
                    }
                }
            }
        }

        for bucket in buckets.iter_mut() {
            bucket.sort_unstable();
            bucket.dedup();
        }

        tracing::info!(mapped_words, "words are mapped to relation types");
        Self { buckets, mapped_words, validator }
    }

    /// Words exhibiting `relation`, ascending by ID. Empty for ineligible types.
    pub fn bucket(&self, relation: RelationType) -> &[WordId] {
        &self.buckets[relation.index()]
    }

    /// Non-empty buckets with their sizes, in relation table order.
    pub fn bucket_sizes(&self) -> Vec<(RelationType, usize)> {
        RelationType::ALL
            .iter()
            .map(|r| (*r, self.buckets[r.index()].len()))
            .filter(|(_, n)| *n > 0)
            .collect()
    }

    pub fn mapped_words(&self) -> usize {
        self.mapped_words
    }

    /// The validator the index was built with.
    pub fn validator(&self) -> WordValidator {
        self.validator
    }

    pub fn is_empty(&self) -> bool {
        self.buckets.iter().all(Vec::is_empty)
    }
}

fn add_to_bucket(buckets: &mut [Vec<WordId>; RelationType::COUNT], relation: RelationType, word: &Word) {
    let bucket = &mut buckets[relation.index()];
    if bucket.last() != Some(&word.id) {
        bucket.push(word.id);
    }
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::lexicon::MemoryLexicon;
    use pretty_assertions::assert_eq;

    fn small_graph() -> (MemoryLexicon, WordId, WordId, WordId, WordId) {
        let mut lex = MemoryLexicon::new();
        let hot_s = lex.add_synset(PartOfSpeech::Adjective, "high temperature");
        let cold_s = lex.add_synset(PartOfSpeech::Adjective, "low temperature");
        let dog_s = lex.add_synset(PartOfSpeech::Noun, "a domesticated canid");
        let animal_s = lex.add_synset(PartOfSpeech::Noun, "a living organism");
        let hot = lex.add_word("hot", hot_s).unwrap();
        let cold = lex.add_word("cold", cold_s).unwrap();
        let dog = lex.add_word("dog", dog_s).unwrap();
        let phrase = lex.add_word("hot_dog", dog_s).unwrap();
        lex.add_word("animal", animal_s).unwrap();

        lex.relate_words(hot, RelationType::Antonym, cold).unwrap();
        lex.relate_words(cold, RelationType::Antonym, hot).unwrap();
        lex.relate_words(hot, RelationType::AlsoSee, cold).unwrap();
        lex.relate_synsets(dog_s, RelationType::Hypernym, animal_s).unwrap();
        lex.relate_synsets(animal_s, RelationType::Hyponym, dog_s).unwrap();
        (lex, hot, cold, dog, phrase)
    }

    #[test]
    fn test_buckets_by_relation() {
        let (lex, hot, cold, dog, _) = small_graph();
        let index = RelationIndex::build(&lex, WordValidator::default());

        assert_eq!(index.bucket(RelationType::Antonym), &[hot, cold]);
        assert_eq!(index.bucket(RelationType::Hypernym), &[dog]);
        assert_eq!(index.bucket(RelationType::Hyponym).len(), 1);
        assert_eq!(index.mapped_words(), 5);
    }

    #[test]
    fn test_ineligible_relations_not_indexed() {
        let (lex, ..) = small_graph();
        let index = RelationIndex::build(&lex, WordValidator::default());
        assert!(index.bucket(RelationType::AlsoSee).is_empty());
    }

    #[test]
    fn test_phrases_excluded_unless_allowed() {
        let (lex, _, _, dog, phrase) = small_graph();
        let strict = RelationIndex::build(&lex, WordValidator::default());
        assert!(!strict.bucket(RelationType::Hypernym).contains(&phrase));

        let permissive = RelationIndex::build(&lex, WordValidator::new(false));
        assert_eq!(permissive.bucket(RelationType::Hypernym), &[dog, phrase]);
    }

    #[test]
    fn test_build_is_deterministic() {
        let (lex, ..) = small_graph();
        let first = RelationIndex::build(&lex, WordValidator::default());
        let second = RelationIndex::build(&lex, WordValidator::default());
        assert_eq!(first, second);
        assert_eq!(first.bucket_sizes(), vec![
            (RelationType::Antonym, 2),
            (RelationType::Hypernym, 1),
            (RelationType::Hyponym, 1),
        ]);
    }
}
