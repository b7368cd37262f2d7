//! Word sense in the lexical graph.

use serde::{Deserialize, Serialize};
use super::{RelationMap, SynsetId};

/// Opaque word identifier. Indexes into the lexicon's word arena.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct WordId(pub u32);

impl WordId {
    pub fn index(self) -> usize {
        self.0 as usize
    }
}

impl std::fmt::Display for WordId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "w{}", self.0)
    }
}

/// Part of speech of a word sense.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PartOfSpeech {
    Noun,
    Verb,
    Adjective,
    Adverb,
}

impl PartOfSpeech {
    /// All parts of speech, in WordNet lookup order.
    pub const ALL: [PartOfSpeech; 4] = [
        PartOfSpeech::Noun,
        PartOfSpeech::Verb,
        PartOfSpeech::Adjective,
        PartOfSpeech::Adverb,
    ];

    pub fn index(self) -> usize {
        match self {
            PartOfSpeech::Noun => 0,
            PartOfSpeech::Verb => 1,
            PartOfSpeech::Adjective => 2,
            PartOfSpeech::Adverb => 3,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            PartOfSpeech::Noun => "noun",
            PartOfSpeech::Verb => "verb",
            PartOfSpeech::Adjective => "adjective",
            PartOfSpeech::Adverb => "adverb",
        }
    }
}

impl std::fmt::Display for PartOfSpeech {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A single sense of a lemma.
///
/// Every word belongs to exactly one synset. Its `relations` are the lexical
/// (word-to-word) pointers; semantic pointers live on the synset.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Word {
    pub id: WordId,
    pub lemma: String,
    pub pos: PartOfSpeech,
    /// 1-based sense number among words sharing this lemma and part of speech.
    pub sense: u32,
    pub synset: SynsetId,
    #[serde(default)]
    pub relations: RelationMap<WordId>,
}

impl Word {
    pub fn new(id: WordId, lemma: impl Into<String>, pos: PartOfSpeech, synset: SynsetId) -> Self {
        Self {
            id,
            lemma: lemma.into(),
            pos,
            sense: 1,
            synset,
            relations: RelationMap::new(),
        }
    }

    /// Case-insensitive lemma comparison.
    pub fn same_lemma(&self, other: &str) -> bool {
        lemmas_match(&self.lemma, other)
    }
}

/// Case-insensitive lemma equality without allocating.
pub fn lemmas_match(a: &str, b: &str) -> bool {
    a.chars().flat_map(char::to_lowercase).eq(b.chars().flat_map(char::to_lowercase))
}
