//! Word frequency model
//!
//! Maps every token seen during training to its per-class occurrence
//! statistics. The model is owned by a single engine and rebuilt from
//! scratch on each training run.

use std::collections::HashMap;

use super::types::{DocumentClass, FrequencyRecord};

/// Token to frequency record mapping
#[derive(Debug, Clone, Default, PartialEq)]
pub struct WordFrequencyModel {
    records: HashMap<String, FrequencyRecord>,
}

impl WordFrequencyModel {
    /// Create an empty model
    pub fn new() -> Self {
        Self::default()
    }

    /// Discard all records
    pub fn clear(&mut self) {
        self.records.clear();
    }

    /// Record one occurrence of `token` in a document of `class`
    ///
    /// The class total always grows by one. The class file count grows only
    /// when `first_in_document` is set, so each document adds at most one
    /// to it.
    pub fn record_occurrence(&mut self, token: &str, class: DocumentClass, first_in_document: bool) {
        let record = self.records.entry(token.to_string()).or_default();

        let file_increment = u32::from(first_in_document);
        match class {
            DocumentClass::Ham => {
                record.ham_total += 1;
                record.ham_file_count += file_increment;
            }
            DocumentClass::Spam => {
                record.spam_total += 1;
                record.spam_file_count += file_increment;
            }
        }
    }

    /// Look up a token; `None` if it never appeared during training
    pub fn lookup(&self, token: &str) -> Option<&FrequencyRecord> {
        self.records.get(token)
    }

    /// Number of distinct tokens
    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Iterate over all tokens and their records, in no particular order
    pub fn iter(&self) -> impl Iterator<Item = (&str, &FrequencyRecord)> {
        self.records.iter().map(|(token, record)| (token.as_str(), record))
    }
}
