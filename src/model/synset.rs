//! Synset: a cluster of synonymous word senses.

use serde::{Deserialize, Serialize};
use super::{PartOfSpeech, RelationMap, WordId};

/// Opaque synset identifier. Indexes into the lexicon's synset arena.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct SynsetId(pub u32);

impl SynsetId {
    pub fn index(self) -> usize {
        self.0 as usize
    }
}

impl std::fmt::Display for SynsetId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "s{}", self.0)
    }
}

/// A sense cluster with its semantic (synset-to-synset) pointers.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Synset {
    pub id: SynsetId,
    pub pos: PartOfSpeech,
    pub gloss: String,
    /// Member senses, in insertion order.
    pub members: Vec<WordId>,
    #[serde(default)]
    pub relations: RelationMap<SynsetId>,
}

impl Synset {
    pub fn new(id: SynsetId, pos: PartOfSpeech, gloss: impl Into<String>) -> Self {
        Self {
            id,
            pos,
            gloss: gloss.into(),
            members: Vec::new(),
            relations: RelationMap::new(),
        }
    }

    pub fn contains(&self, word: WordId) -> bool {
        self.members.contains(&word)
    }
}
