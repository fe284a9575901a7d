//! Error types for spam-rs

use std::path::PathBuf;

use thiserror::Error;

use crate::spam::DocumentClass;

/// Result type alias for classifier operations
pub type Result<T> = std::result::Result<T, SpamError>;

/// Classifier error types
#[derive(Error, Debug)]
pub enum SpamError {
    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(String),

    /// Classification attempted before any training run
    #[error("Model has not been trained")]
    UntrainedModel,

    /// A training class contributed no documents, so its probabilities are undefined
    #[error("No {0} documents were found during training")]
    EmptyTrainingClass(DocumentClass),

    /// A document could not be opened or decoded as text
    #[error("Unreadable document {}: {reason}", .path.display())]
    UnreadableDocument { path: PathBuf, reason: String },
}
