//! Classification engine
//!
//! Trains a [`WordFrequencyModel`] from labeled collections and scores
//! documents against it. Each distinct known token of a document adds its
//! log-odds against spam to an accumulator `eta`; the document's spam
//! probability is the logistic transform `1 / (1 + e^eta)`.

use std::collections::HashSet;
use tracing::{debug, info, warn};

use crate::config::ClassifierConfig;
use crate::error::{Result, SpamError};

use super::corpus::{DocumentRef, DocumentSource};
use super::model::WordFrequencyModel;
use super::tokenizer::tokens;
use super::types::*;

/// Training state of an engine
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EngineState {
    Untrained,
    Trained,
}

/// Bayesian spam classification engine
#[derive(Debug, Clone)]
pub struct ClassificationEngine {
    config: ClassifierConfig,
    model: WordFrequencyModel,
    ham_file_total: u32,
    spam_file_total: u32,
    state: EngineState,
}

impl ClassificationEngine {
    /// Create an untrained engine
    pub fn new(config: ClassifierConfig) -> Self {
        Self {
            config,
            model: WordFrequencyModel::new(),
            ham_file_total: 0,
            spam_file_total: 0,
            state: EngineState::Untrained,
        }
    }

    pub fn config(&self) -> &ClassifierConfig {
        &self.config
    }

    pub fn state(&self) -> EngineState {
        self.state
    }

    pub fn model(&self) -> &WordFrequencyModel {
        &self.model
    }

    /// Ham training documents seen in the last training run
    pub fn ham_file_total(&self) -> u32 {
        self.ham_file_total
    }

    /// Spam training documents seen in the last training run
    pub fn spam_file_total(&self) -> u32 {
        self.spam_file_total
    }

    /// Rebuild the model from the training collections of `source`
    ///
    /// Any previous model and counters are discarded first. Documents that
    /// cannot be read still count towards their class total but contribute
    /// no tokens.
    pub fn train<S: DocumentSource + ?Sized>(&mut self, source: &S) -> TrainingSummary {
        self.model.clear();
        self.ham_file_total = 0;
        self.spam_file_total = 0;

        let mut unreadable_documents = 0;
        for class in [DocumentClass::Ham, DocumentClass::Spam] {
            let documents = source.training_set(class);
            let count = u32::try_from(documents.len()).unwrap_or(u32::MAX);
            match class {
                DocumentClass::Ham => self.ham_file_total = count,
                DocumentClass::Spam => self.spam_file_total = count,
            }

            for document in &documents {
                match source.read(document) {
                    Ok(text) => self.learn_document(&text, class),
                    Err(e) => {
                        warn!("Skipping {} training document: {}", class, e);
                        unreadable_documents += 1;
                    }
                }
            }
        }

        self.state = EngineState::Trained;

        let summary = TrainingSummary {
            ham_documents: self.ham_file_total,
            spam_documents: self.spam_file_total,
            unreadable_documents,
            vocabulary: self.model.len(),
        };
        info!(
            "Training complete: {} ham, {} spam, {} unreadable, {} distinct tokens",
            summary.ham_documents,
            summary.spam_documents,
            summary.unreadable_documents,
            summary.vocabulary
        );

        summary
    }

    fn learn_document(&mut self, text: &str, class: DocumentClass) {
        let mut counted: HashSet<String> = HashSet::new();
        for token in tokens(text) {
            let first_in_document = !counted.contains(&token);
            self.model.record_occurrence(&token, class, first_in_document);
            if first_in_document {
                counted.insert(token);
            }
        }
    }

    /// Fail unless both classes have training documents
    fn ensure_trained(&self) -> Result<()> {
        if self.state == EngineState::Untrained {
            return Err(SpamError::UntrainedModel);
        }
        if self.spam_file_total == 0 {
            return Err(SpamError::EmptyTrainingClass(DocumentClass::Spam));
        }
        if self.ham_file_total == 0 {
            return Err(SpamError::EmptyTrainingClass(DocumentClass::Ham));
        }
        Ok(())
    }

    /// Smoothed `(P(word | spam), P(word | ham))`
    fn likelihoods(&self, record: &FrequencyRecord) -> (f64, f64) {
        let k = self.config.smoothing_constant;
        let p_word_spam = (f64::from(record.spam_file_count) + k) / f64::from(self.spam_file_total);
        let p_word_ham = (f64::from(record.ham_file_count) + k) / f64::from(self.ham_file_total);
        (p_word_spam, p_word_ham)
    }

    /// Spam probability of a document's text
    ///
    /// Tokens absent from the model carry no evidence, so a document with no
    /// known tokens scores exactly 0.5.
    pub fn score(&self, text: &str) -> Result<f64> {
        self.ensure_trained()?;

        let mut evaluated: HashSet<String> = HashSet::new();
        let mut eta = 0.0f64;

        for token in tokens(text) {
            if evaluated.contains(&token) {
                continue;
            }
            let Some(record) = self.model.lookup(&token) else {
                continue;
            };

            let (p_word_spam, p_word_ham) = self.likelihoods(record);
            let p_spam_word = p_word_spam / (p_word_spam + p_word_ham);
            eta += (1.0 - p_spam_word).ln() - p_spam_word.ln();

            evaluated.insert(token);
        }

        Ok(1.0 / (1.0 + eta.exp()))
    }

    /// Predicted class for a spam probability under this engine's threshold
    pub fn predict(&self, spam_probability: f64) -> DocumentClass {
        DocumentClass::from_probability(spam_probability, self.config.spam_threshold)
    }

    /// Classify in-memory text
    pub fn classify_text(
        &self,
        filename: &str,
        text: &str,
        actual_class: DocumentClass,
    ) -> Result<TestResult> {
        let probability = self.score(text)?;
        debug!("{} ({}): spam probability {:.5}", filename, actual_class, probability);
        Ok(TestResult::new(
            filename,
            probability,
            actual_class,
            self.config.spam_threshold,
        ))
    }

    /// Classify a document from `source`
    ///
    /// A document that cannot be read is reported with probability 0 and an
    /// [`DocumentOutcome::Unreadable`] outcome. An unusable model is an error.
    pub fn classify_document<S: DocumentSource + ?Sized>(
        &self,
        source: &S,
        document: &DocumentRef,
        actual_class: DocumentClass,
    ) -> Result<TestResult> {
        self.ensure_trained()?;

        match source.read(document) {
            Ok(text) => self.classify_text(&document.name, &text, actual_class),
            Err(e) => {
                warn!("Defaulting unreadable test document to probability 0: {}", e);
                Ok(TestResult::unreadable(
                    &document.name,
                    actual_class,
                    self.config.spam_threshold,
                    e.to_string(),
                ))
            }
        }
    }

    /// Classify every test document of `source`
    ///
    /// Results list the ham collection first, then the spam collection, each
    /// in the order the source enumerates them.
    pub fn test<S: DocumentSource + ?Sized>(&self, source: &S) -> Result<TestReport> {
        self.ensure_trained()?;

        let mut report = TestReport::default();
        for class in [DocumentClass::Ham, DocumentClass::Spam] {
            for document in source.test_set(class) {
                report.push(self.classify_document(source, &document, class)?);
            }
        }

        info!(
            "Tested {} documents: {} correct, {} predicted spam, {} correctly",
            report.counters.total,
            report.counters.correct,
            report.counters.spam_predicted,
            report.counters.correct_spam
        );

        Ok(report)
    }
}

impl Default for ClassificationEngine {
    fn default() -> Self {
        Self::new(ClassifierConfig::default())
    }
}
