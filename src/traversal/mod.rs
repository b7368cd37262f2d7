//! # Traversal
//!
//! Walks the lexical graph word by word and feeds the score accumulator.
//!
//! ```text
//! Evaluator::run(model, scope, kind)
//!     │
//!     ├─ Similarity ──► similarity::score_word   (lexical targets + synset co-members)
//!     │
//!     └─ Analogy
//!          ├─ RelationDriven ──► analogy::relation_driven  (needs RelationIndex)
//!          └─ SynsetOnly     ──► analogy::synset_only      (no index)
//! ```
//!
//! Every per-word function reads a shared [`Pass`] and writes only to the
//! `ScoreState` it is handed, so a run can be split across workers by part
//! of speech and the partial states merged afterwards.

pub mod analogy;
pub mod similarity;

use std::sync::Arc;

use parking_lot::RwLock;
use serde::{Deserialize, Serialize};

use crate::config::Settings;
use crate::embedding::EmbeddingModel;
use crate::index::RelationIndex;
use crate::lexicon::Lexicon;
use crate::model::{PartOfSpeech, RelationType, Word};
use crate::scoring::ScoreState;
use crate::validator::WordValidator;
use crate::{Error, Result};

// ============================================================================
// Selectors
// ============================================================================

/// Which parts of speech a run covers.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Scope {
    All,
    Only(PartOfSpeech),
}

impl Scope {
    pub fn parts(self) -> &'static [PartOfSpeech] {
        match self {
            Scope::All => &PartOfSpeech::ALL,
            Scope::Only(PartOfSpeech::Noun) => &[PartOfSpeech::Noun],
            Scope::Only(PartOfSpeech::Verb) => &[PartOfSpeech::Verb],
            Scope::Only(PartOfSpeech::Adjective) => &[PartOfSpeech::Adjective],
            Scope::Only(PartOfSpeech::Adverb) => &[PartOfSpeech::Adverb],
        }
    }
}

/// Which metric a run feeds.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TestKind {
    Similarity,
    Analogy,
}

/// Analogy traversal strategy.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ComparisonMode {
    /// Walk the root's relation maps and draw compared words from the index.
    #[default]
    RelationDriven,
    /// Compare only within the root's synset and its directly related synsets.
    SynsetOnly,
}

// ============================================================================
// Pass: read-only context shared by every per-word step
// ============================================================================

pub(crate) struct Pass<'a, L: ?Sized, M: ?Sized> {
    pub lexicon: &'a L,
    pub model: &'a M,
    pub settings: &'a Settings,
    pub validator: WordValidator,
}

impl<'a, L: Lexicon + ?Sized, M: EmbeddingModel + ?Sized> Pass<'a, L, M> {
    pub fn new(lexicon: &'a L, model: &'a M, settings: &'a Settings) -> Self {
        Self { lexicon, model, settings, validator: settings.validator() }
    }

    /// Passes the validator and is known to the model.
    pub fn usable(&self, lemma: &str) -> bool {
        self.validator.is_eligible(lemma) && self.model.has_word(lemma)
    }

    /// Minimum-similarity filter for compared words. Always true when off.
    pub fn close_enough(&self, root: &str, compared: &str) -> bool {
        let Some(min) = self.settings.min_similarity_for_comparison else {
            return true;
        };
        match self.model.similarity(root, compared) {
            Some(value) if value >= min => true,
            _ => {
                tracing::debug!(root, compared, min, "compared word below similarity threshold");
                false
            }
        }
    }

    fn accepts_root(&self, root: &Word) -> bool {
        if !self.validator.is_eligible(&root.lemma) {
            tracing::debug!(lemma = %root.lemma, "skipped: ineligible lemma");
            return false;
        }
        if !self.model.has_word(&root.lemma) {
            tracing::debug!(lemma = %root.lemma, "skipped: not in model vocabulary");
            return false;
        }
        true
    }
}

/// What one walk over the words computes.
enum Job {
    Similarity,
    RelationDriven(Arc<RelationIndex>),
    SynsetOnly,
}

impl Job {
    fn score_root<L, M>(&self, pass: &Pass<'_, L, M>, root: &Word, state: &mut ScoreState)
    where
        L: Lexicon + ?Sized,
        M: EmbeddingModel + ?Sized,
    {
        match self {
            Job::Similarity => similarity::score_word(pass, root, state),
            Job::RelationDriven(index) => analogy::relation_driven(pass, index, root, state),
            Job::SynsetOnly => analogy::synset_only(pass, root, state),
        }
    }

    fn score_part<L, M>(&self, pass: &Pass<'_, L, M>, pos: PartOfSpeech, state: &mut ScoreState)
    where
        L: Lexicon + ?Sized,
        M: EmbeddingModel + ?Sized,
    {
        for root in pass.lexicon.words(pos) {
            if pass.accepts_root(root) {
                self.score_root(pass, root, state);
            }
        }
    }

    fn name(&self) -> &'static str {
        match self {
            Job::Similarity => "similarity",
            Job::RelationDriven(_) => "relation-driven analogy",
            Job::SynsetOnly => "synset-only analogy",
        }
    }
}

// ============================================================================
// Evaluator
// ============================================================================

/// One evaluation session against a lexicon.
///
/// Holds the sanitized settings, the lazily built relation index and the
/// running [`ScoreState`]. The index depends only on the lexicon and the
/// validator, so the same session can score several models in turn;
/// call [`Evaluator::reset_scores`] between them.
pub struct Evaluator<'l, L: Lexicon + ?Sized> {
    lexicon: &'l L,
    settings: Settings,
    index: RwLock<Option<Arc<RelationIndex>>>,
    scores: ScoreState,
}

impl<'l, L: Lexicon + ?Sized> Evaluator<'l, L> {
    pub fn new(lexicon: &'l L, settings: Settings) -> Self {
        let settings = settings.sanitized();
        let scores = ScoreState::new(settings.score_table());
        Self { lexicon, settings, index: RwLock::new(None), scores }
    }

    pub fn lexicon(&self) -> &'l L {
        self.lexicon
    }

    pub fn settings(&self) -> &Settings {
        &self.settings
    }

    /// Replace the settings.
    ///
    /// A changed phrase toggle drops the index (rebuilt on next use). A
    /// changed score table resets the scores, since sums weighted by two
    /// tables cannot share one denominator.
    pub fn apply_settings(&mut self, settings: Settings) {
        let settings = settings.sanitized();
        if settings.exclude_phrases != self.settings.exclude_phrases {
            tracing::info!("phrase toggle changed, relation index dropped");
            *self.index.get_mut() = None;
        }
        let table = settings.score_table();
        if table != *self.scores.table() {
            tracing::info!(max_score = table.max_score(), "score table changed, scores reset");
            self.scores = ScoreState::new(table);
        }
        self.settings = settings;
    }

    pub fn scores(&self) -> &ScoreState {
        &self.scores
    }

    pub fn scores_mut(&mut self) -> &mut ScoreState {
        &mut self.scores
    }

    pub fn reset_scores(&mut self) {
        self.scores.reset();
    }

    // ========================================================================
    // Relation index
    // ========================================================================

    /// Build the relation index. A second call is a logged no-op.
    pub fn build_index(&self) -> Arc<RelationIndex> {
        if let Some(index) = self.index.read().as_ref() {
            tracing::info!("relation index already built");
            return Arc::clone(index);
        }
        self.ensure_index()
    }

    /// The index, if built.
    pub fn index(&self) -> Option<Arc<RelationIndex>> {
        self.index.read().clone()
    }

    fn ensure_index(&self) -> Arc<RelationIndex> {
        if let Some(index) = self.index.read().as_ref() {
            return Arc::clone(index);
        }
        let mut slot = self.index.write();
        if let Some(index) = slot.as_ref() {
            return Arc::clone(index);
        }
        let index = Arc::new(RelationIndex::build(self.lexicon, self.settings.validator()));
        *slot = Some(Arc::clone(&index));
        index
    }

    /// Bucket sizes of the (possibly freshly built) index, logged at info.
    pub fn index_summary(&self) -> Vec<(RelationType, usize)> {
        let index = self.ensure_index();
        let sizes = index.bucket_sizes();
        for (relation, size) in &sizes {
            tracing::info!(relation = %relation, size, "relation bucket");
        }
        sizes
    }

    // ========================================================================
    // Runs
    // ========================================================================

    /// Score every part of speech in `scope` serially.
    pub fn run<M: EmbeddingModel + ?Sized>(&mut self, model: &M, scope: Scope, kind: TestKind) {
        match kind {
            TestKind::Similarity => self.score_similarity(model, scope),
            TestKind::Analogy => self.score_analogy(model, scope),
        }
    }

    pub fn score_similarity<M: EmbeddingModel + ?Sized>(&mut self, model: &M, scope: Scope) {
        self.run_job(model, scope, &Job::Similarity);
    }

    /// Analogy traversal with the configured comparison mode.
    pub fn score_analogy<M: EmbeddingModel + ?Sized>(&mut self, model: &M, scope: Scope) {
        self.score_analogy_with_mode(model, scope, self.settings.comparison_mode);
    }

    pub fn score_analogy_with_mode<M: EmbeddingModel + ?Sized>(
        &mut self,
        model: &M,
        scope: Scope,
        mode: ComparisonMode,
    ) {
        let job = self.analogy_job(mode);
        self.run_job(model, scope, &job);
    }

    /// Analogy traversal for every sense of one lemma.
    ///
    /// Parts of speech are searched noun, verb, adjective, adverb; the first
    /// one that knows the lemma is used. Returns `Ok(false)` when the lemma
    /// is ineligible or no sense of it is known to the model.
    pub fn score_analogy_for_lemma<M: EmbeddingModel + ?Sized>(
        &mut self,
        model: &M,
        lemma: &str,
    ) -> Result<bool> {
        let validator = self.settings.validator();
        if !validator.is_eligible(lemma) {
            tracing::debug!(lemma, "skipped: ineligible lemma");
            return Ok(false);
        }
        let (pos, senses) = PartOfSpeech::ALL
            .iter()
            .find_map(|&pos| {
                let senses = self.lexicon.words_by_lemma(lemma, pos);
                (!senses.is_empty()).then_some((pos, senses))
            })
            .ok_or_else(|| Error::NotFound(format!("lemma '{lemma}'")))?;

        let job = self.analogy_job(self.settings.comparison_mode);
        let pass = Pass::new(self.lexicon, model, &self.settings);
        let mut scored = false;
        for root in senses.into_iter().filter_map(|id| self.lexicon.word(id)) {
            if pass.accepts_root(root) {
                job.score_root(&pass, root, &mut self.scores);
                scored = true;
            }
        }
        if !scored {
            return Ok(false);
        }
        tracing::info!(
            lemma,
            pos = %pos,
            percentage = self.scores.analogy_percentage(),
            "analogy score for lemma"
        );
        Ok(true)
    }

    /// Score all four parts of speech on scoped worker threads.
    ///
    /// Each worker fills its own partial state; partials are merged into
    /// the session in part-of-speech order.
    pub fn run_parallel<M: EmbeddingModel + ?Sized>(&mut self, model: &M, kind: TestKind) {
        let job = match kind {
            TestKind::Similarity => Job::Similarity,
            TestKind::Analogy => self.analogy_job(self.settings.comparison_mode),
        };
        let template = self.scores.partial();
        let pass = Pass::new(self.lexicon, model, &self.settings);

        let partials: Vec<ScoreState> = std::thread::scope(|s| {
            let handles: Vec<_> = PartOfSpeech::ALL
                .iter()
                .map(|&pos| {
                    let (pass, job) = (&pass, &job);
                    let mut partial = template.clone();
                    s.spawn(move || {
                        job.score_part(pass, pos, &mut partial);
                        partial
                    })
                })
                .collect();
            handles
                .into_iter()
                .map(|h| h.join().unwrap_or_else(|panic| std::panic::resume_unwind(panic)))
                .collect()
        });

        for partial in &partials {
            self.scores.merge(partial);
        }
        self.log_summary(model.name(), &job);
    }

    fn analogy_job(&self, mode: ComparisonMode) -> Job {
        match mode {
            ComparisonMode::RelationDriven => Job::RelationDriven(self.ensure_index()),
            ComparisonMode::SynsetOnly => Job::SynsetOnly,
        }
    }

    fn run_job<M: EmbeddingModel + ?Sized>(&mut self, model: &M, scope: Scope, job: &Job) {
        let pass = Pass::new(self.lexicon, model, &self.settings);
        for &pos in scope.parts() {
            job.score_part(&pass, pos, &mut self.scores);
            tracing::debug!(pos = %pos, job = job.name(), "part of speech finished");
        }
        self.log_summary(model.name(), job);
    }

    fn log_summary(&self, model: &str, job: &Job) {
        match job {
            Job::Similarity => tracing::info!(
                model,
                count = self.scores.similarity_count(),
                percentage = self.scores.similarity_percentage(),
                "similarity pass finished"
            ),
            _ => tracing::info!(
                model,
                job = job.name(),
                count = self.scores.analogy_count(),
                matches = self.scores.match_count(),
                percentage = self.scores.analogy_percentage(),
                "analogy pass finished"
            ),
        }
    }
}

// ============================================================================
// Tests
// ============================================================================
