//! Classifier types and data structures

use serde::{Deserialize, Serialize};
use std::fmt;

/// Document class
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum DocumentClass {
    /// Legitimate mail
    Ham,
    /// Unsolicited mail
    Spam,
}

impl DocumentClass {
    pub fn is_spam(self) -> bool {
        self == DocumentClass::Spam
    }

    /// Predicted class for a spam probability; spam only strictly above the threshold
    pub fn from_probability(spam_probability: f64, spam_threshold: f64) -> Self {
        if spam_probability > spam_threshold {
            DocumentClass::Spam
        } else {
            DocumentClass::Ham
        }
    }
}

impl fmt::Display for DocumentClass {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DocumentClass::Ham => write!(f, "Ham"),
            DocumentClass::Spam => write!(f, "Spam"),
        }
    }
}

/// Per-token occurrence statistics
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct FrequencyRecord {
    /// Ham documents containing the token at least once
    pub ham_file_count: u32,
    /// Occurrences across all ham documents
    pub ham_total: u32,
    /// Spam documents containing the token at least once
    pub spam_file_count: u32,
    /// Occurrences across all spam documents
    pub spam_total: u32,
}

impl FrequencyRecord {
    /// Number of documents of `class` containing the token
    pub fn file_count(&self, class: DocumentClass) -> u32 {
        match class {
            DocumentClass::Ham => self.ham_file_count,
            DocumentClass::Spam => self.spam_file_count,
        }
    }

    /// Occurrences of the token across documents of `class`
    pub fn total(&self, class: DocumentClass) -> u32 {
        match class {
            DocumentClass::Ham => self.ham_total,
            DocumentClass::Spam => self.spam_total,
        }
    }
}

/// How a tested document was handled
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum DocumentOutcome {
    /// Document was read and scored against the model
    Scored,
    /// Document could not be read; probability defaulted to 0
    Unreadable { reason: String },
}

/// Classification of a single test document
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TestResult {
    filename: String,
    spam_probability: f64,
    actual_class: DocumentClass,
    predicted_class: DocumentClass,
    outcome: DocumentOutcome,
}

impl TestResult {
    /// Build a scored result; the prediction is spam iff `spam_probability > spam_threshold`
    pub fn new(
        filename: impl Into<String>,
        spam_probability: f64,
        actual_class: DocumentClass,
        spam_threshold: f64,
    ) -> Self {
        Self::with_outcome(
            filename,
            spam_probability,
            actual_class,
            spam_threshold,
            DocumentOutcome::Scored,
        )
    }

    /// Build the result for a document that could not be read
    pub fn unreadable(
        filename: impl Into<String>,
        actual_class: DocumentClass,
        spam_threshold: f64,
        reason: impl Into<String>,
    ) -> Self {
        Self::with_outcome(
            filename,
            0.0,
            actual_class,
            spam_threshold,
            DocumentOutcome::Unreadable {
                reason: reason.into(),
            },
        )
    }

    fn with_outcome(
        filename: impl Into<String>,
        spam_probability: f64,
        actual_class: DocumentClass,
        spam_threshold: f64,
        outcome: DocumentOutcome,
    ) -> Self {
        Self {
            filename: filename.into(),
            spam_probability,
            actual_class,
            predicted_class: DocumentClass::from_probability(spam_probability, spam_threshold),
            outcome,
        }
    }

    pub fn filename(&self) -> &str {
        &self.filename
    }

    pub fn spam_probability(&self) -> f64 {
        self.spam_probability
    }

    pub fn actual_class(&self) -> DocumentClass {
        self.actual_class
    }

    pub fn predicted_class(&self) -> DocumentClass {
        self.predicted_class
    }

    pub fn outcome(&self) -> &DocumentOutcome {
        &self.outcome
    }

    pub fn is_correct(&self) -> bool {
        self.actual_class == self.predicted_class
    }
}

/// Running counters of a test run
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TestCounters {
    /// Documents tested
    pub total: u32,
    /// Documents whose predicted class matched the actual class
    pub correct: u32,
    /// Documents predicted spam, whatever their actual class
    pub spam_predicted: u32,
    /// Spam documents predicted spam
    pub correct_spam: u32,
}

impl TestCounters {
    /// Account for one classified document
    pub fn record(&mut self, result: &TestResult) {
        self.total += 1;

        let predicted_spam = result.predicted_class().is_spam();
        if predicted_spam {
            self.spam_predicted += 1;
        }
        if result.is_correct() {
            self.correct += 1;
            if predicted_spam {
                self.correct_spam += 1;
            }
        }
    }

    /// `correct / total`, undefined when nothing was tested
    pub fn accuracy(&self) -> Option<f64> {
        ratio(self.correct, self.total)
    }

    /// `correct_spam / spam_predicted`, undefined when nothing was predicted spam
    pub fn precision(&self) -> Option<f64> {
        ratio(self.correct_spam, self.spam_predicted)
    }
}

fn ratio(numerator: u32, denominator: u32) -> Option<f64> {
    if denominator == 0 {
        None
    } else {
        Some(f64::from(numerator) / f64::from(denominator))
    }
}

/// Outcome of a test run: ordered results plus the counters behind the summary statistics
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct TestReport {
    pub results: Vec<TestResult>,
    pub counters: TestCounters,
}

impl TestReport {
    pub fn push(&mut self, result: TestResult) {
        self.counters.record(&result);
        self.results.push(result);
    }

    pub fn accuracy(&self) -> Option<f64> {
        self.counters.accuracy()
    }

    pub fn precision(&self) -> Option<f64> {
        self.counters.precision()
    }

    /// Results whose document could not be read
    pub fn unreadable(&self) -> impl Iterator<Item = &TestResult> {
        self.results
            .iter()
            .filter(|r| matches!(r.outcome(), DocumentOutcome::Unreadable { .. }))
    }
}

/// Training run statistics
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TrainingSummary {
    /// Ham documents enumerated across all ham collections
    pub ham_documents: u32,
    /// Spam documents enumerated
    pub spam_documents: u32,
    /// Documents skipped because they could not be read
    pub unreadable_documents: u32,
    /// Distinct tokens in the model
    pub vocabulary: usize,
}
