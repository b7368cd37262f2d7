//! In-memory lexicon backend.
//!
//! This is the reference implementation of `Lexicon`.
//! Words and synsets live in two arenas addressed by `WordId` / `SynsetId`;
//! a lowercase lemma index and per-part-of-speech word lists are maintained
//! alongside.
//!
//! ## Limitations
//!
//! - **Append-only**: there is no removal. Relation indexes built from a
//!   lexicon assume it never changes afterwards.
//! - **Single writer**: building is `&mut self`; share it read-only once built.

use hashbrown::HashMap;
use serde::{Deserialize, Serialize};
use smallvec::SmallVec;

use crate::model::*;
use crate::{Error, Result};
use super::Lexicon;

// ============================================================================
// MemoryLexicon
// ============================================================================

/// Arena-backed lexical relation graph.
#[derive(Debug, Clone, Default)]
pub struct MemoryLexicon {
    words: Vec<Word>,
    synsets: Vec<Synset>,
    /// part of speech → word IDs in insertion order
    by_pos: [Vec<WordId>; 4],
    /// (part of speech, lowercase lemma) → senses
    lemma_index: HashMap<(PartOfSpeech, String), SmallVec<[WordId; 2]>>,
}

impl MemoryLexicon {
    pub fn new() -> Self {
        Self::default()
    }

    // ========================================================================
    // Building
    // ========================================================================

    /// Create an empty synset.
    pub fn add_synset(&mut self, pos: PartOfSpeech, gloss: impl Into<String>) -> SynsetId {
        let id = SynsetId(self.synsets.len() as u32);
        self.synsets.push(Synset::new(id, pos, gloss));
        id
    }

    /// Add a word sense as a member of an existing synset.
    ///
    /// The part of speech is taken from the synset; the sense number counts
    /// earlier senses of the same lemma.
    pub fn add_word(&mut self, lemma: impl Into<String>, synset: SynsetId) -> Result<WordId> {
        let lemma = lemma.into();
        let pos = self
            .synsets
            .get(synset.index())
            .map(|s| s.pos)
            .ok_or_else(|| Error::Lexicon(format!("Synset {synset} does not exist")))?;

        let id = WordId(self.words.len() as u32);
        let key = (pos, lemma.to_lowercase());
        let senses = self.lemma_index.entry(key).or_default();
        senses.push(id);

        let mut word = Word::new(id, lemma, pos, synset);
        word.sense = senses.len() as u32;

        self.words.push(word);
        self.synsets[synset.index()].members.push(id);
        self.by_pos[pos.index()].push(id);
        Ok(id)
    }

    /// Add a lexical (word-to-word) pointer.
    ///
    /// Synset-level relation types are rejected.
    pub fn relate_words(&mut self, src: WordId, relation: RelationType, dst: WordId) -> Result<()> {
        if !relation.links_words() {
            return Err(Error::Lexicon(format!("Relation {relation} links synsets, not words")));
        }
        if dst.index() >= self.words.len() {
            return Err(Error::Lexicon(format!("Target word {dst} does not exist")));
        }
        let word = self
            .words
            .get_mut(src.index())
            .ok_or_else(|| Error::Lexicon(format!("Source word {src} does not exist")))?;
        word.relations.insert(relation, dst);
        Ok(())
    }

    /// Add a semantic (synset-to-synset) pointer.
    ///
    /// Word-level relation types are rejected.
    pub fn relate_synsets(&mut self, src: SynsetId, relation: RelationType, dst: SynsetId) -> Result<()> {
        if !relation.links_synsets() {
            return Err(Error::Lexicon(format!("Relation {relation} links words, not synsets")));
        }
        if dst.index() >= self.synsets.len() {
            return Err(Error::Lexicon(format!("Target synset {dst} does not exist")));
        }
        let synset = self
            .synsets
            .get_mut(src.index())
            .ok_or_else(|| Error::Lexicon(format!("Source synset {src} does not exist")))?;
        synset.relations.insert(relation, dst);
        Ok(())
    }

    // ========================================================================
    // Snapshot import / export
    // ========================================================================

    /// Serialize the whole graph as a JSON snapshot.
    pub fn to_json(&self) -> Result<String> {
        let snapshot = LexiconSnapshot {
            synsets: self.synsets.clone(),
            words: self.words.clone(),
        };
        Ok(serde_json::to_string(&snapshot)?)
    }

    /// Load a graph from a JSON snapshot, validating every ID.
    pub fn from_json(json: &str) -> Result<Self> {
        let snapshot: LexiconSnapshot = serde_json::from_str(json)?;
        Self::from_snapshot(snapshot)
    }

    pub fn from_snapshot(snapshot: LexiconSnapshot) -> Result<Self> {
        let LexiconSnapshot { synsets, words } = snapshot;

        for (i, synset) in synsets.iter().enumerate() {
            if synset.id.index() != i {
                return Err(Error::Lexicon(format!("Synset at position {i} has id {}", synset.id)));
            }
            for (relation, targets) in synset.relations.iter() {
                if !relation.links_synsets() {
                    return Err(Error::Lexicon(format!("Synset {} has word-level relation {relation}", synset.id)));
                }
                if let Some(bad) = targets.iter().find(|t| t.index() >= synsets.len()) {
                    return Err(Error::Lexicon(format!("Synset {} points to missing synset {bad}", synset.id)));
                }
            }
            if let Some(bad) = synset.members.iter().find(|m| m.index() >= words.len()) {
                return Err(Error::Lexicon(format!("Synset {} lists missing word {bad}", synset.id)));
            }
        }

        let mut lexicon = Self {
            synsets,
            ..Self::default()
        };

        for (i, word) in words.into_iter().enumerate() {
            if word.id.index() != i {
                return Err(Error::Lexicon(format!("Word at position {i} has id {}", word.id)));
            }
            let synset = lexicon
                .synsets
                .get(word.synset.index())
                .ok_or_else(|| Error::Lexicon(format!("Word {} is in missing synset {}", word.id, word.synset)))?;
            if !synset.contains(word.id) {
                return Err(Error::Lexicon(format!(
                    "Word {} claims synset {} but is not a member", word.id, word.synset
                )));
            }
            lexicon.by_pos[word.pos.index()].push(word.id);
            lexicon
                .lemma_index
                .entry((word.pos, word.lemma.to_lowercase()))
                .or_default()
                .push(word.id);
            lexicon.words.push(word);
        }

        let word_count = lexicon.words.len();
        for word in &lexicon.words {
            for (relation, targets) in word.relations.iter() {
                if !relation.links_words() {
                    return Err(Error::Lexicon(format!("Word {} has synset-level relation {relation}", word.id)));
                }
                if let Some(bad) = targets.iter().find(|t| t.index() >= word_count) {
                    return Err(Error::Lexicon(format!("Word {} points to missing word {bad}", word.id)));
                }
            }
        }

        Ok(lexicon)
    }
}

/// Serializable form of a `MemoryLexicon`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LexiconSnapshot {
    pub synsets: Vec<Synset>,
    pub words: Vec<Word>,
}

// ============================================================================
// Lexicon impl
// ============================================================================

impl Lexicon for MemoryLexicon {
    fn word(&self, id: WordId) -> Option<&Word> {
        self.words.get(id.index())
    }

    fn synset(&self, id: SynsetId) -> Option<&Synset> {
        self.synsets.get(id.index())
    }

    fn words(&self, pos: PartOfSpeech) -> Box<dyn Iterator<Item = &Word> + '_> {
        Box::new(self.by_pos[pos.index()].iter().map(|id| &self.words[id.index()]))
    }

    fn words_by_lemma(&self, lemma: &str, pos: PartOfSpeech) -> Vec<WordId> {
        self.lemma_index
            .get(&(pos, lemma.to_lowercase()))
            .map(|ids| ids.to_vec())
            .unwrap_or_default()
    }

    fn word_count(&self) -> usize {
        self.words.len()
    }

    fn synset_count(&self) -> usize {
        self.synsets.len()
    }
}

// ============================================================================
// Tests
// ============================================================================
