//! Similarity traversal.

use crate::embedding::EmbeddingModel;
use crate::lexicon::Lexicon;
use crate::model::{lemmas_match, Word};
use crate::scoring::ScoreState;

use super::Pass;

/// Add the root's similarity to each lexically related word and to each
/// synset co-member. Negative cosines are clipped to zero.
pub(crate) fn score_word<L, M>(pass: &Pass<'_, L, M>, root: &Word, state: &mut ScoreState)
where
    L: Lexicon + ?Sized,
    M: EmbeddingModel + ?Sized,
{
    for (_, targets) in root.relations.iter() {
        for lemma in targets.iter().filter_map(|id| pass.lexicon.lemma(*id)) {
            compare(pass, &root.lemma, lemma, state);
        }
    }

    let Some(synset) = pass.lexicon.synset_of(root) else {
        return;
    };
    for lemma in synset
        .members
        .iter()
        .filter(|id| **id != root.id)
        .filter_map(|id| pass.lexicon.lemma(*id))
    {
        compare(pass, &root.lemma, lemma, state);
    }
}

fn compare<L, M>(pass: &Pass<'_, L, M>, root: &str, other: &str, state: &mut ScoreState)
where
    L: Lexicon + ?Sized,
    M: EmbeddingModel + ?Sized,
{
    if lemmas_match(root, other) || !pass.usable(other) {
        return;
    }
    match pass.model.similarity(root, other) {
        Some(value) if !value.is_nan() => state.update_similarity(value.max(0.0)),
        _ => tracing::debug!(root, other, "similarity unavailable"),
    }
}
