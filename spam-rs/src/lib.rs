//! spam-rs: Bayesian spam filter for mail corpora
//!
//! Trains a word-frequency model on labeled ham and spam collections, then
//! classifies unseen documents and reports accuracy and precision.
//!
//! # Example
//!
//! ```no_run
//! use spam_rs::config::Config;
//! use spam_rs::spam::{ClassificationEngine, DirectorySource};
//!
//! fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let config = Config::default();
//!     let source = DirectorySource::new("corpus", config.corpus.clone());
//!
//!     let mut engine = ClassificationEngine::new(config.classifier);
//!     engine.train(&source);
//!
//!     let report = engine.test(&source)?;
//!     println!("accuracy: {:?}", report.accuracy());
//!
//!     Ok(())
//! }
//! ```
//!
//! # Modules
//!
//! - [`config`]: Configuration management
//! - [`error`]: Error types and handling
//! - [`spam`]: Tokenizer, frequency model, corpus sources and the classification engine

pub mod config;
pub mod error;
pub mod spam;

// Re-export commonly used types
pub use config::Config;
pub use error::{Result, SpamError};
