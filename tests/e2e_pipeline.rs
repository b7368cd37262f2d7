//! End-to-end pipeline: JSON lexicon snapshot + dense vector model + report.

use chrono::NaiveDate;
use wat::embedding::VectorModel;
use wat::report::{report_file_name, write_report};
use wat::{EmbeddingModel, Evaluator, Lexicon, MemoryLexicon, PartOfSpeech, RelationType, Scope, Settings, TestKind};

// ============================================================================
// Helpers
// ============================================================================

fn royalty_lexicon() -> MemoryLexicon {
    let mut lex = MemoryLexicon::new();
    let king = lex.add_synset(PartOfSpeech::Noun, "a male sovereign");
    let queen = lex.add_synset(PartOfSpeech::Noun, "a female sovereign");
    let man = lex.add_synset(PartOfSpeech::Noun, "an adult male");
    let woman = lex.add_synset(PartOfSpeech::Noun, "an adult female");
    let w_king = lex.add_word("king", king).unwrap();
    let w_queen = lex.add_word("queen", queen).unwrap();
    let w_man = lex.add_word("man", man).unwrap();
    let w_woman = lex.add_word("woman", woman).unwrap();
    lex.add_word("monarch", king).unwrap();
    lex.relate_words(w_king, RelationType::Antonym, w_queen).unwrap();
    lex.relate_words(w_man, RelationType::Antonym, w_woman).unwrap();
    lex
}

fn royalty_model() -> VectorModel {
    let entry = |w: &str, v: [f32; 3]| (w.to_string(), v.to_vec());
    VectorModel::from_entries("royalty 3d", vec![
        entry("king", [1.0, 1.0, 0.0]),
        entry("monarch", [1.0, 1.2, -0.5]),
        entry("queen", [1.0, 0.0, 1.0]),
        entry("man", [0.0, 1.0, 0.0]),
        entry("woman", [0.0, 0.0, 1.0]),
        entry("apple", [-1.0, 0.1, 0.1]),
    ])
    .unwrap()
}

fn settings() -> Settings {
    Settings { closest_word_size: 3, ..Settings::default() }
}

// ============================================================================
// 1. Snapshot round-trip keeps scores
// ============================================================================

#[test]
fn test_snapshot_scores_identically() {
    let lex = royalty_lexicon();
    let restored = MemoryLexicon::from_json(&lex.to_json().unwrap()).unwrap();
    assert_eq!(restored.word_count(), lex.word_count());
    assert_eq!(restored.synset_count(), lex.synset_count());

    let model = royalty_model();
    let mut original = Evaluator::new(&lex, settings());
    original.run(&model, Scope::All, TestKind::Analogy);
    let mut reloaded = Evaluator::new(&restored, settings());
    reloaded.run(&model, Scope::All, TestKind::Analogy);

    assert_eq!(original.scores().report(), reloaded.scores().report());
}

// ============================================================================
// 2. Vector arithmetic recovers the antonym
// ============================================================================

#[test]
fn test_king_queen_man_woman() {
    let lex = royalty_lexicon();
    let model = royalty_model();
    let mut evaluator = Evaluator::new(&lex, settings());

    evaluator.score_analogy_for_lemma(&model, "king").unwrap();

    // king + queen - man ranks woman first.
    let scores = evaluator.scores();
    assert_eq!(scores.triple_count(), 1);
    assert_eq!(scores.match_count(), 1);
    assert_eq!(scores.analogy_sum(), scores.table().weights()[0]);
}

#[test]
fn test_similarity_with_vectors_stays_in_range() {
    let lex = royalty_lexicon();
    let model = royalty_model();
    let mut evaluator = Evaluator::new(&lex, settings());

    evaluator.run(&model, Scope::All, TestKind::Similarity);

    let percentage = evaluator.scores().similarity_percentage();
    assert!(evaluator.scores().similarity_count() > 0);
    assert!((0.0..=100.0).contains(&percentage), "{percentage}");
}

// ============================================================================
// 3. Report
// ============================================================================

#[test]
fn test_report_output() {
    let lex = royalty_lexicon();
    let model = royalty_model();
    let mut evaluator = Evaluator::new(&lex, settings());
    evaluator.run_parallel(&model, TestKind::Analogy);

    let mut out = Vec::new();
    write_report(&evaluator.scores().report(), &mut out).unwrap();
    let text = String::from_utf8(out).unwrap();
    assert!(text.starts_with("similarity sum: 0\n"));
    assert!(text.contains("analogy matches: "));
    assert!(text.ends_with("max score: 18\n"));

    let at = NaiveDate::from_ymd_opt(2025, 1, 31).unwrap().and_hms_opt(0, 0, 10).unwrap();
    assert_eq!(report_file_name(model.name(), at), "2025-01-31_10_royalty-3d_score.txt");
}
