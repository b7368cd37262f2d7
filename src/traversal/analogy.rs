//! Analogy traversal.
//!
//! For a root `R`, a pair word `P` related to it and a compared word `C`
//! drawn from the same relation, the model is asked for
//! `closest(R + P - C)` and scored on how high it ranks the words `C`
//! relates to in the same way.
//!
//! | Mode | Pair words `P` | Compared words `C` | Expected |
//! |------|----------------|--------------------|----------|
//! | relation-driven, lexical | `R`'s targets under `T` | index bucket `T` | `C`'s targets under `T` |
//! | relation-driven, semantic | members of synsets related to `R`'s synset under `T` | index bucket `T` | members of synsets related to `C`'s synset under `T` |
//! | synset-only | members of a synset `S'` related to `R`'s synset | other members of `S'` | other members of `R`'s synset |

use crate::embedding::EmbeddingModel;
use crate::index::RelationIndex;
use crate::lexicon::Lexicon;
use crate::model::{lemmas_match, RelationType, Word, WordId};
use crate::scoring::ScoreState;

use super::Pass;

/// Which level of the graph a relation-driven walk follows.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Level {
    Lexical,
    Semantic,
}

impl Level {
    fn expected<'a, L: Lexicon + ?Sized>(self, lexicon: &'a L, compared: &'a Word, relation: RelationType) -> Vec<&'a str> {
        match self {
            Level::Lexical => lexicon.lexical_targets(compared, relation),
            Level::Semantic => lexicon.semantic_targets(compared, relation),
        }
    }
}

// ============================================================================
// Relation-driven
// ============================================================================

pub(crate) fn relation_driven<L, M>(pass: &Pass<'_, L, M>, index: &RelationIndex, root: &Word, state: &mut ScoreState)
where
    L: Lexicon + ?Sized,
    M: EmbeddingModel + ?Sized,
{
    for (relation, targets) in root.relations.iter() {
        if !relation.is_lexical_analogy() {
            continue;
        }
        let pairs = distinct_lemmas(targets.iter().filter_map(|id| pass.lexicon.lemma(*id)));
        compare_bucket(pass, index, root, relation, Level::Lexical, &pairs, state);
    }

    let Some(synset) = pass.lexicon.synset_of(root) else {
        return;
    };
    for (relation, targets) in synset.relations.iter() {
        if !relation.is_semantic_analogy() {
            continue;
        }
        let pairs = distinct_lemmas(
            targets
                .iter()
                .filter_map(|id| pass.lexicon.synset(*id))
                .flat_map(|related| related.members.iter())
                .filter_map(|id| pass.lexicon.lemma(*id)),
        );
        compare_bucket(pass, index, root, relation, Level::Semantic, &pairs, state);
    }
}

/// First occurrence of each lemma, compared case-insensitively.
fn distinct_lemmas<'a>(lemmas: impl Iterator<Item = &'a str>) -> Vec<&'a str> {
    let mut distinct: Vec<&str> = Vec::new();
    for lemma in lemmas {
        if !distinct.iter().any(|seen| lemmas_match(seen, lemma)) {
            distinct.push(lemma);
        }
    }
    distinct
}

fn compare_bucket<L, M>(
    pass: &Pass<'_, L, M>,
    index: &RelationIndex,
    root: &Word,
    relation: RelationType,
    level: Level,
    pairs: &[&str],
    state: &mut ScoreState,
) where
    L: Lexicon + ?Sized,
    M: EmbeddingModel + ?Sized,
{
    let bucket = index.bucket(relation);
    for &pair in pairs {
        if root.same_lemma(pair) {
            tracing::debug!(root = %root.lemma, "pair word is the root");
            continue;
        }
        if !pass.usable(pair) {
            continue;
        }
        if compare_pair(pass, bucket, root, pair, relation, level, state) == 0 {
            tracing::error!(root = %root.lemma, pair, relation = %relation, "relation bucket yields no comparison candidates");
        }
    }
}

/// Score `root : pair` against every usable compared word in `bucket`, up to
/// the iteration cap. Returns the number of triples scored.
fn compare_pair<L, M>(
    pass: &Pass<'_, L, M>,
    bucket: &[WordId],
    root: &Word,
    pair: &str,
    relation: RelationType,
    level: Level,
    state: &mut ScoreState,
) -> usize
where
    L: Lexicon + ?Sized,
    M: EmbeddingModel + ?Sized,
{
    let cap = pass.settings.iteration_cap_for_pointer;
    let k = pass.settings.closest_word_size;

    let mut compared = 0;
    for candidate in bucket.iter().filter_map(|id| pass.lexicon.word(*id)) {
        if compared >= cap {
            break;
        }
        let c = candidate.lemma.as_str();
        if root.same_lemma(c) || candidate.same_lemma(pair) || !pass.model.has_word(c) {
            continue;
        }
        if !pass.close_enough(&root.lemma, c) {
            continue;
        }

        let expected = level.expected(pass.lexicon, candidate, relation);
        if expected.is_empty() {
            tracing::error!(compared = c, relation = %relation, "compared word has no related words");
            continue;
        }
        compared += 1;

        let closest = pass.model.closest_words(&[root.lemma.as_str(), pair], &[c], k);
        let matches = state.score_triple(&expected, closest);
        tracing::debug!(root = %root.lemma, pair, compared = c, relation = %relation, matches, "triple scored");
    }
    compared
}

// ============================================================================
// Synset-only
// ============================================================================

pub(crate) fn synset_only<L, M>(pass: &Pass<'_, L, M>, root: &Word, state: &mut ScoreState)
where
    L: Lexicon + ?Sized,
    M: EmbeddingModel + ?Sized,
{
    let Some(synset) = pass.lexicon.synset_of(root) else {
        return;
    };
    let expected: Vec<&str> = synset
        .members
        .iter()
        .filter(|id| **id != root.id)
        .filter_map(|id| pass.lexicon.lemma(*id))
        .filter(|lemma| !root.same_lemma(lemma))
        .collect();
    if expected.is_empty() {
        tracing::debug!(root = %root.lemma, "synset has no other members");
        return;
    }

    let cap = pass.settings.iteration_cap_for_pointer;
    let k = pass.settings.closest_word_size;

    for (relation, targets) in synset.relations.iter() {
        if !relation.is_semantic_analogy() {
            continue;
        }
        for related in targets.iter().filter_map(|id| pass.lexicon.synset(*id)) {
            let members: Vec<&str> = related
                .members
                .iter()
                .filter_map(|id| pass.lexicon.lemma(*id))
                .filter(|lemma| !root.same_lemma(lemma) && pass.usable(lemma))
                .collect();

            let mut compared = 0;
            'pairs: for &pair in &members {
                for &c in &members {
                    if compared >= cap {
                        break 'pairs;
                    }
                    if lemmas_match(pair, c) || !pass.close_enough(&root.lemma, c) {
                        continue;
                    }
                    compared += 1;
                    let closest = pass.model.closest_words(&[root.lemma.as_str(), pair], &[c], k);
                    state.score_triple(&expected, closest);
                }
            }
        }
    }
}

// ============================================================================
// Tests
// ============================================================================
