//! Relation (pointer) types of the curated lexical graph.
//!
//! The set of relation types is fixed. Each tag carries static metadata
//! (its WordNet pointer symbol, whether it links words or synsets, and whether
//! it participates in analogy scoring), kept as data in [`RELATION_TABLE`]
//! rather than as branching logic in the traversal.

use serde::{Deserialize, Serialize};
use smallvec::SmallVec;

use super::PartOfSpeech;

// ============================================================================
// Category
// ============================================================================

/// Which level of the graph a relation type links.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum RelationCategory {
    /// Word-to-word pointer.
    Lexical,
    /// Synset-to-synset pointer.
    Semantic,
    /// Appears at both levels in the source database.
    Both,
}

// ============================================================================
// RelationType
// ============================================================================

/// A typed edge between two words or two synsets.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
#[repr(u8)]
pub enum RelationType {
    AlsoSee,
    Antonym,
    Attribute,
    Cause,
    DerivationallyRelated,
    DerivedFromAdjective,
    Domain,
    Entailment,
    Hypernym,
    HypernymInstance,
    Hyponym,
    HyponymInstance,
    HolonymMember,
    HolonymSubstance,
    HolonymPart,
    Member,
    MeronymMember,
    MeronymSubstance,
    MeronymPart,
    Participle,
    Pertainym,
    Region,
    RegionMember,
    SimilarTo,
    Topic,
    TopicMember,
    Usage,
    UsageMember,
    VerbGroup,
}

/// Static metadata for one relation type.
#[derive(Debug, Clone, Copy)]
pub struct RelationInfo {
    pub relation: RelationType,
    pub name: &'static str,
    pub symbol: &'static str,
    pub category: RelationCategory,
    pub analogy_eligible: bool,
}

const fn info(
    relation: RelationType,
    name: &'static str,
    symbol: &'static str,
    category: RelationCategory,
    analogy_eligible: bool,
) -> RelationInfo {
    RelationInfo { relation, name, symbol, category, analogy_eligible }
}

use RelationCategory::{Both, Lexical, Semantic};

/// Metadata for every relation type, indexed by `RelationType as usize`.
pub const RELATION_TABLE: [RelationInfo; RelationType::COUNT] = [
    info(RelationType::AlsoSee, "also see", "^", Both, false),
    info(RelationType::Antonym, "antonym", "!", Lexical, true),
    info(RelationType::Attribute, "attribute", "=", Semantic, true),
    info(RelationType::Cause, "cause", ">", Semantic, true),
    info(RelationType::DerivationallyRelated, "derivationally related", "+", Lexical, true),
    info(RelationType::DerivedFromAdjective, "derived from adjective", "\\", Lexical, true),
    info(RelationType::Domain, "domain", ";", Both, false),
    info(RelationType::Entailment, "entailment", "*", Semantic, true),
    info(RelationType::Hypernym, "hypernym", "@", Semantic, true),
    info(RelationType::HypernymInstance, "instance hypernym", "@i", Semantic, true),
    info(RelationType::Hyponym, "hyponym", "~", Semantic, true),
    info(RelationType::HyponymInstance, "instance hyponym", "~i", Semantic, true),
    info(RelationType::HolonymMember, "member holonym", "#m", Semantic, true),
    info(RelationType::HolonymSubstance, "substance holonym", "#s", Semantic, true),
    info(RelationType::HolonymPart, "part holonym", "#p", Semantic, true),
    info(RelationType::Member, "member", "-", Semantic, true),
    info(RelationType::MeronymMember, "member meronym", "%m", Semantic, true),
    info(RelationType::MeronymSubstance, "substance meronym", "%s", Semantic, true),
    info(RelationType::MeronymPart, "part meronym", "%p", Semantic, true),
    info(RelationType::Participle, "participle", "<", Lexical, true),
    info(RelationType::Pertainym, "pertainym", "\\", Lexical, true),
    info(RelationType::Region, "region", ";r", Both, false),
    info(RelationType::RegionMember, "region member", "-r", Both, false),
    info(RelationType::SimilarTo, "similar to", "&", Semantic, true),
    info(RelationType::Topic, "topic", ";c", Both, false),
    info(RelationType::TopicMember, "topic member", "-c", Both, false),
    info(RelationType::Usage, "usage", ";u", Both, false),
    info(RelationType::UsageMember, "usage member", "-u", Both, false),
    info(RelationType::VerbGroup, "verb group", "$", Both, false),
];

impl RelationType {
    pub const COUNT: usize = 29;

    /// Every relation type, in table order.
    pub const ALL: [RelationType; RelationType::COUNT] = [
        RelationType::AlsoSee,
        RelationType::Antonym,
        RelationType::Attribute,
        RelationType::Cause,
        RelationType::DerivationallyRelated,
        RelationType::DerivedFromAdjective,
        RelationType::Domain,
        RelationType::Entailment,
        RelationType::Hypernym,
        RelationType::HypernymInstance,
        RelationType::Hyponym,
        RelationType::HyponymInstance,
        RelationType::HolonymMember,
        RelationType::HolonymSubstance,
        RelationType::HolonymPart,
        RelationType::Member,
        RelationType::MeronymMember,
        RelationType::MeronymSubstance,
        RelationType::MeronymPart,
        RelationType::Participle,
        RelationType::Pertainym,
        RelationType::Region,
        RelationType::RegionMember,
        RelationType::SimilarTo,
        RelationType::Topic,
        RelationType::TopicMember,
        RelationType::Usage,
        RelationType::UsageMember,
        RelationType::VerbGroup,
    ];

    pub fn index(self) -> usize {
        self as usize
    }

    pub fn info(self) -> &'static RelationInfo {
        &RELATION_TABLE[self.index()]
    }

    pub fn name(self) -> &'static str {
        self.info().name
    }

    pub fn symbol(self) -> &'static str {
        self.info().symbol
    }

    pub fn category(self) -> RelationCategory {
        self.info().category
    }

    pub fn is_analogy_eligible(self) -> bool {
        self.info().analogy_eligible
    }

    /// May label a word-to-word pointer.
    pub fn links_words(self) -> bool {
        self.category() != RelationCategory::Semantic
    }

    /// May label a synset-to-synset pointer.
    pub fn links_synsets(self) -> bool {
        self.category() != RelationCategory::Lexical
    }

    /// Eligible for the word-level analogy walk.
    pub fn is_lexical_analogy(self) -> bool {
        self.is_analogy_eligible() && self.category() == RelationCategory::Lexical
    }

    /// Eligible for the synset-level analogy walk.
    pub fn is_semantic_analogy(self) -> bool {
        self.is_analogy_eligible() && self.category() == RelationCategory::Semantic
    }

    /// Resolve a WordNet pointer symbol.
    ///
    /// `\` is shared by pertainyms (adjectives) and derived-from-adjective
    /// pointers (adverbs), so the part of speech of the source disambiguates.
    pub fn from_symbol(symbol: &str, pos: PartOfSpeech) -> Option<RelationType> {
        if symbol == "\\" {
            return Some(match pos {
                PartOfSpeech::Adverb => RelationType::DerivedFromAdjective,
                _ => RelationType::Pertainym,
            });
        }
        RELATION_TABLE.iter().find(|i| i.symbol == symbol).map(|i| i.relation)
    }
}

impl std::fmt::Display for RelationType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

// ============================================================================
// RelationMap
// ============================================================================

/// Relation type → ordered list of targets, in insertion order.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct RelationMap<I> {
    entries: Vec<(RelationType, SmallVec<[I; 4]>)>,
}

impl<I> Default for RelationMap<I> {
    fn default() -> Self {
        Self { entries: Vec::new() }
    }
}

impl<I: Copy + PartialEq> RelationMap<I> {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a target. Duplicate (type, target) pairs are ignored.
    pub fn insert(&mut self, relation: RelationType, target: I) {
        match self.entries.iter_mut().find(|(r, _)| *r == relation) {
            Some((_, targets)) => {
                if !targets.contains(&target) {
                    targets.push(target);
                }
            }
            None => {
                let mut targets = SmallVec::new();
                targets.push(target);
                self.entries.push((relation, targets));
            }
        }
    }

    /// Targets for one relation type (empty if absent).
    pub fn get(&self, relation: RelationType) -> &[I] {
        self.entries
            .iter()
            .find(|(r, _)| *r == relation)
            .map(|(_, targets)| targets.as_slice())
            .unwrap_or(&[])
    }

    pub fn iter(&self) -> impl Iterator<Item = (RelationType, &[I])> + '_ {
        self.entries.iter().map(|(r, targets)| (*r, targets.as_slice()))
    }

    pub fn types(&self) -> impl Iterator<Item = RelationType> + '_ {
        self.entries.iter().map(|(r, _)| *r)
    }

    /// Number of distinct relation types.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_table_is_indexed_by_discriminant() {
        for (i, rel) in RelationType::ALL.iter().enumerate() {
            assert_eq!(rel.index(), i);
            assert_eq!(RELATION_TABLE[i].relation, *rel);
        }
    }

    #[test]
    fn test_curated_analogy_sets() {
        let lexical: Vec<_> = RelationType::ALL.iter().filter(|r| r.is_lexical_analogy()).collect();
        let semantic: Vec<_> = RelationType::ALL.iter().filter(|r| r.is_semantic_analogy()).collect();
        assert_eq!(lexical.len(), 5);
        assert_eq!(semantic.len(), 15);
        assert!(RelationType::Antonym.is_lexical_analogy());
        assert!(RelationType::Hypernym.is_semantic_analogy());
        assert!(!RelationType::VerbGroup.is_analogy_eligible());
        assert!(!RelationType::AlsoSee.is_analogy_eligible());
    }

    #[test]
    fn test_link_levels() {
        assert!(RelationType::Antonym.links_words());
        assert!(!RelationType::Antonym.links_synsets());
        assert!(RelationType::Hypernym.links_synsets());
        assert!(!RelationType::Hypernym.links_words());
        assert!(RelationType::VerbGroup.links_words() && RelationType::VerbGroup.links_synsets());
    }

    #[test]
    fn test_from_symbol() {
        assert_eq!(RelationType::from_symbol("@", PartOfSpeech::Noun), Some(RelationType::Hypernym));
        assert_eq!(RelationType::from_symbol("@i", PartOfSpeech::Noun), Some(RelationType::HypernymInstance));
        assert_eq!(RelationType::from_symbol("\\", PartOfSpeech::Adjective), Some(RelationType::Pertainym));
        assert_eq!(RelationType::from_symbol("\\", PartOfSpeech::Adverb), Some(RelationType::DerivedFromAdjective));
        assert_eq!(RelationType::from_symbol("??", PartOfSpeech::Noun), None);
    }

    #[test]
    fn test_relation_map_keeps_order_and_dedups() {
        let mut map: RelationMap<u32> = RelationMap::new();
        map.insert(RelationType::Hyponym, 3);
        map.insert(RelationType::Antonym, 1);
        map.insert(RelationType::Hyponym, 2);
        map.insert(RelationType::Hyponym, 3);

        assert_eq!(map.get(RelationType::Hyponym), &[3, 2]);
        assert_eq!(map.get(RelationType::Hypernym), &[] as &[u32]);
        assert_eq!(map.types().collect::<Vec<_>>(), vec![RelationType::Hyponym, RelationType::Antonym]);
    }
}
