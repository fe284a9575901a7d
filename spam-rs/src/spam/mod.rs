//! Spam classification module
//!
//! Word-frequency Bayesian classification of mail corpora: a token model
//! built from labeled training collections and a log-odds scorer for test
//! documents.

pub mod corpus;
pub mod engine;
pub mod model;
pub mod tokenizer;
pub mod types;

pub use corpus::{DirectorySource, DocumentRef, DocumentSource};
pub use engine::{ClassificationEngine, EngineState};
pub use model::WordFrequencyModel;
pub use types::*;
