//! Integration tests for training and testing over corpus directories

use spam_rs::config::{ClassifierConfig, CorpusLayout};
use spam_rs::spam::{
    ClassificationEngine, DirectorySource, DocumentClass, DocumentOutcome, EngineState,
};
use spam_rs::SpamError;
use std::fs;
use std::path::Path;
use tempfile::TempDir;

/// Helper to write a document below the corpus root
fn write_doc(root: &Path, rel: &str, content: &[u8]) {
    let path = root.join(rel);
    fs::create_dir_all(path.parent().unwrap()).unwrap();
    fs::write(path, content).unwrap();
}

/// Corpus with a clear vocabulary split between the classes
fn build_corpus() -> TempDir {
    let dir = TempDir::new().unwrap();
    let root = dir.path();

    write_doc(root, "train/ham/1", b"Meeting agenda for monday attached");
    write_doc(root, "train/ham/2", b"Lunch on friday with the project team");
    write_doc(root, "train/ham2/1", b"Please review the project agenda before the meeting");
    write_doc(root, "train/ham2/2", b"Notes from the team meeting");

    write_doc(root, "train/spam/1", b"WINNER!! claim your free prize now");
    write_doc(root, "train/spam/2", b"free money claim now winner");
    write_doc(root, "train/spam/3", b"cheap pills free shipping claim today");

    write_doc(root, "test/ham/a", b"agenda for the team meeting");
    write_doc(root, "test/ham/b", b"project lunch friday");
    write_doc(root, "test/spam/a", b"free prize winner claim now");
    write_doc(root, "test/spam/b", b"claim your free money");

    dir
}

fn trained_engine(root: &Path) -> (ClassificationEngine, DirectorySource) {
    let source = DirectorySource::new(root, CorpusLayout::default());
    let mut engine = ClassificationEngine::new(ClassifierConfig::default());
    engine.train(&source);
    (engine, source)
}

#[test]
fn test_train_merges_both_ham_collections() {
    let dir = build_corpus();
    let source = DirectorySource::new(dir.path(), CorpusLayout::default());
    let mut engine = ClassificationEngine::default();

    let summary = engine.train(&source);

    assert_eq!(engine.state(), EngineState::Trained);
    assert_eq!(summary.ham_documents, 4);
    assert_eq!(summary.spam_documents, 3);
    assert_eq!(summary.unreadable_documents, 0);

    let meeting = engine.model().lookup("meeting").unwrap();
    assert_eq!(meeting.ham_file_count, 3);
    assert_eq!(meeting.spam_file_count, 0);

    let free = engine.model().lookup("free").unwrap();
    assert_eq!(free.spam_file_count, 3);
    assert_eq!(free.spam_total, 3);
}

#[test]
fn test_punctuated_and_numeric_tokens_are_ignored() {
    let dir = build_corpus();
    let (engine, _) = trained_engine(dir.path());

    // "WINNER!!" is not a token, only the later lower-case "winner" is
    let winner = engine.model().lookup("winner").unwrap();
    assert_eq!(winner.spam_file_count, 1);
    assert!(engine.model().lookup("winner!!").is_none());
    assert!(engine.model().iter().all(|(token, _)| token.bytes().all(|b| b.is_ascii_lowercase())));
}

#[test]
fn test_end_to_end_classification() {
    let dir = build_corpus();
    let (engine, source) = trained_engine(dir.path());

    let report = engine.test(&source).unwrap();

    let summary: Vec<(&str, DocumentClass, DocumentClass)> = report
        .results
        .iter()
        .map(|r| (r.filename(), r.actual_class(), r.predicted_class()))
        .collect();
    assert_eq!(
        summary,
        vec![
            ("a", DocumentClass::Ham, DocumentClass::Ham),
            ("b", DocumentClass::Ham, DocumentClass::Ham),
            ("a", DocumentClass::Spam, DocumentClass::Spam),
            ("b", DocumentClass::Spam, DocumentClass::Spam),
        ]
    );
    assert_eq!(report.accuracy(), Some(1.0));
    assert_eq!(report.precision(), Some(1.0));

    for result in &report.results {
        assert!((0.0..=1.0).contains(&result.spam_probability()));
    }
}

#[test]
fn test_accuracy_matches_counters() {
    let dir = build_corpus();
    // Spam-looking ham and ham-looking spam
    write_doc(dir.path(), "test/ham/c", b"free prize claim");
    write_doc(dir.path(), "test/spam/c", b"team meeting agenda");
    let (engine, source) = trained_engine(dir.path());

    let report = engine.test(&source).unwrap();
    let counters = report.counters;

    let correct = report.results.iter().filter(|r| r.is_correct()).count() as u32;
    assert_eq!(counters.correct, correct);
    assert_eq!(counters.total, 6);

    let accuracy = report.accuracy().unwrap();
    assert!((0.0..=1.0).contains(&accuracy));
    assert_eq!(accuracy, f64::from(correct) / 6.0);
    assert_eq!(report.precision(), Some(2.0 / 3.0));
}

#[test]
fn test_training_is_deterministic() {
    let dir = build_corpus();
    let (first, _) = trained_engine(dir.path());
    let (second, _) = trained_engine(dir.path());

    assert_eq!(first.model(), second.model());
    assert_eq!(first.ham_file_total(), second.ham_file_total());
}

#[test]
fn test_scenario_a_single_shared_token() {
    let dir = TempDir::new().unwrap();
    write_doc(dir.path(), "train/ham/1", b"free");
    write_doc(dir.path(), "train/ham/2", b"free");
    write_doc(dir.path(), "train/spam/1", b"free free free");
    write_doc(dir.path(), "test/spam/1", b"free");

    let (engine, source) = trained_engine(dir.path());
    assert_eq!(engine.ham_file_total(), 2);
    assert_eq!(engine.spam_file_total(), 1);

    let report = engine.test(&source).unwrap();
    let result = &report.results[0];
    assert!((result.spam_probability() - 0.5714285714).abs() < 1e-9);
    assert_eq!(result.predicted_class(), DocumentClass::Ham);
}

#[test]
fn test_scenario_b_no_known_tokens() {
    let dir = build_corpus();
    write_doc(dir.path(), "test/ham/unknown", b"zebra xylophone 12345 ???");
    let (engine, source) = trained_engine(dir.path());

    let report = engine.test(&source).unwrap();
    let result = report
        .results
        .iter()
        .find(|r| r.filename() == "unknown")
        .unwrap();

    assert_eq!(result.spam_probability(), 0.5);
    assert_eq!(result.predicted_class(), DocumentClass::Ham);
    assert_eq!(result.outcome(), &DocumentOutcome::Scored);
}

#[test]
fn test_scenario_c_missing_spam_training_set() {
    let dir = TempDir::new().unwrap();
    write_doc(dir.path(), "train/ham/1", b"hello there");
    write_doc(dir.path(), "test/ham/1", b"hello");

    let (engine, source) = trained_engine(dir.path());
    assert_eq!(engine.spam_file_total(), 0);

    assert!(matches!(
        engine.test(&source),
        Err(SpamError::EmptyTrainingClass(DocumentClass::Spam))
    ));
    assert!(engine.score("hello").is_err());
}

#[test]
fn test_scenario_d_no_spam_predictions() {
    let dir = build_corpus();
    fs::remove_dir_all(dir.path().join("test/spam")).unwrap();
    let (engine, source) = trained_engine(dir.path());

    let report = engine.test(&source).unwrap();

    assert_eq!(report.counters.spam_predicted, 0);
    assert_eq!(report.precision(), None);
    assert_eq!(report.accuracy(), Some(1.0));
}

#[test]
fn test_unreadable_test_document_is_reported() {
    let dir = build_corpus();
    write_doc(dir.path(), "test/spam/binary", &[0xc3, 0x28, 0xff, 0xfe]);
    let (engine, source) = trained_engine(dir.path());

    let report = engine.test(&source).unwrap();
    let broken = report
        .results
        .iter()
        .find(|r| r.filename() == "binary")
        .unwrap();

    assert_eq!(broken.spam_probability(), 0.0);
    assert_eq!(broken.predicted_class(), DocumentClass::Ham);
    assert!(matches!(broken.outcome(), DocumentOutcome::Unreadable { .. }));
    assert_eq!(report.counters.total, 5);
}

#[test]
fn test_unreadable_training_document_is_skipped() {
    let dir = build_corpus();
    write_doc(dir.path(), "train/spam/binary", &[0xff, 0xff, 0xff]);
    let source = DirectorySource::new(dir.path(), CorpusLayout::default());
    let mut engine = ClassificationEngine::default();

    let summary = engine.train(&source);

    assert_eq!(summary.unreadable_documents, 1);
    assert_eq!(summary.spam_documents, 4);
    assert!(engine.test(&source).is_ok());
}

#[test]
fn test_higher_threshold_reduces_spam_predictions() {
    let dir = build_corpus();
    let source = DirectorySource::new(dir.path(), CorpusLayout::default());

    let mut strict = ClassificationEngine::new(ClassifierConfig {
        spam_threshold: 1.0,
        ..ClassifierConfig::default()
    });
    strict.train(&source);

    let report = strict.test(&source).unwrap();
    assert_eq!(report.counters.spam_predicted, 0);
    assert_eq!(report.accuracy(), Some(0.5));
}
