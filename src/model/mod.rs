//! # Lexical Relation Model
//!
//! Clean DTOs for the curated relation graph: words (senses), synsets, and the
//! fixed set of relation types with their analogy metadata.
//!
//! Design rule: no embedding types, no traversal state here.
//! This module is pure data: no I/O, no logging, no model queries.

pub mod word;
pub mod synset;
pub mod relation;

pub use word::{Word, WordId, PartOfSpeech, lemmas_match};
pub use synset::{Synset, SynsetId};
pub use relation::{RelationType, RelationCategory, RelationInfo, RelationMap};
