//! Document sources
//!
//! The engine never touches the filesystem directly: it asks a
//! [`DocumentSource`] for the training and test collections of each class and
//! for the text of each document. [`DirectorySource`] implements this over the
//! usual corpus layout:
//!
//! ```text
//! <root>/train/ham
//! <root>/train/ham2
//! <root>/train/spam
//! <root>/test/ham
//! <root>/test/spam
//! ```

use std::fs;
use std::path::{Path, PathBuf};
use tracing::{debug, warn};

use crate::config::CorpusLayout;
use crate::error::{Result, SpamError};

use super::types::DocumentClass;

/// A document within a collection
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DocumentRef {
    /// File name shown in reports
    pub name: String,
    /// Full path used to read the document
    pub path: PathBuf,
}

impl DocumentRef {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        let path = path.into();
        let name = path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_else(|| path.display().to_string());
        Self { name, path }
    }
}

/// Supplier of labeled document collections
#[cfg_attr(test, mockall::automock)]
pub trait DocumentSource {
    /// Training documents of a class, all ham collections merged
    fn training_set(&self, class: DocumentClass) -> Vec<DocumentRef>;

    /// Test documents of a class
    fn test_set(&self, class: DocumentClass) -> Vec<DocumentRef>;

    /// Read the full text of a document
    fn read(&self, document: &DocumentRef) -> Result<String>;
}

/// Document source backed by a corpus directory tree
#[derive(Debug, Clone)]
pub struct DirectorySource {
    root: PathBuf,
    layout: CorpusLayout,
}

impl DirectorySource {
    pub fn new(root: impl Into<PathBuf>, layout: CorpusLayout) -> Self {
        Self {
            root: root.into(),
            layout,
        }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Directories making up the training collection of a class
    pub fn training_dirs(&self, class: DocumentClass) -> Vec<PathBuf> {
        let train = self.root.join(&self.layout.train_dir);
        match class {
            DocumentClass::Ham => self
                .layout
                .train_ham_dirs
                .iter()
                .map(|dir| train.join(dir))
                .collect(),
            DocumentClass::Spam => vec![train.join(&self.layout.spam_dir)],
        }
    }

    /// Directory holding the test collection of a class
    pub fn test_dir(&self, class: DocumentClass) -> PathBuf {
        let test = self.root.join(&self.layout.test_dir);
        match class {
            DocumentClass::Ham => test.join(&self.layout.ham_dir),
            DocumentClass::Spam => test.join(&self.layout.spam_dir),
        }
    }

    /// List the regular files of a directory sorted by name.
    /// A missing or unlistable directory is an empty collection.
    fn list(dir: &Path) -> Vec<DocumentRef> {
        let entries = match fs::read_dir(dir) {
            Ok(entries) => entries,
            Err(e) => {
                warn!("Collection {} unavailable, treating as empty: {}", dir.display(), e);
                return Vec::new();
            }
        };

        let mut documents: Vec<DocumentRef> = entries
            .filter_map(|entry| match entry {
                Ok(entry) => Some(entry.path()),
                Err(e) => {
                    warn!("Skipping unreadable entry in {}: {}", dir.display(), e);
                    None
                }
            })
            .filter(|path| path.is_file())
            .map(DocumentRef::new)
            .collect();
        documents.sort_by(|a, b| a.name.cmp(&b.name));

        debug!("Found {} documents in {}", documents.len(), dir.display());
        documents
    }
}

impl DocumentSource for DirectorySource {
    fn training_set(&self, class: DocumentClass) -> Vec<DocumentRef> {
        self.training_dirs(class)
            .iter()
            .flat_map(|dir| Self::list(dir))
            .collect()
    }

    fn test_set(&self, class: DocumentClass) -> Vec<DocumentRef> {
        Self::list(&self.test_dir(class))
    }

    fn read(&self, document: &DocumentRef) -> Result<String> {
        fs::read_to_string(&document.path).map_err(|e| SpamError::UnreadableDocument {
            path: document.path.clone(),
            reason: e.to_string(),
        })
    }
}
