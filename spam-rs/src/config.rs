//! Configuration for spam-rs

use serde::{Deserialize, Serialize};
use std::path::Path;

use crate::error::{Result, SpamError};

/// Prefix of environment variables overriding file settings,
/// e.g. `SPAM_RS__CLASSIFIER__SPAM_THRESHOLD=0.7`
pub const ENV_PREFIX: &str = "SPAM_RS";

/// Main configuration
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
#[serde(default)]
pub struct Config {
    /// Tunable classifier parameters
    pub classifier: ClassifierConfig,
    /// Directory names below the corpus root
    pub corpus: CorpusLayout,
    /// Logging output
    pub logging: LoggingConfig,
}

/// Classifier parameters
#[derive(Debug, Clone, Copy, PartialEq, Deserialize, Serialize)]
#[serde(default)]
pub struct ClassifierConfig {
    /// Added to a token's per-class file count before dividing by the class total
    pub smoothing_constant: f64,
    /// Probability a document must strictly exceed to be predicted spam
    pub spam_threshold: f64,
}

/// Corpus directory layout
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
#[serde(default)]
pub struct CorpusLayout {
    /// Directory holding the training collections
    pub train_dir: String,
    /// Directory holding the test collections
    pub test_dir: String,
    /// Ham training collections, merged in this order
    pub train_ham_dirs: Vec<String>,
    /// Ham collection name (test side)
    pub ham_dir: String,
    /// Spam collection name (both sides)
    pub spam_dir: String,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct LoggingConfig {
    pub level: String,
    pub format: String,
}

impl Default for ClassifierConfig {
    fn default() -> Self {
        Self {
            smoothing_constant: 1.0,
            spam_threshold: 0.6,
        }
    }
}

impl Default for CorpusLayout {
    fn default() -> Self {
        Self {
            train_dir: "train".to_string(),
            test_dir: "test".to_string(),
            train_ham_dirs: vec!["ham".to_string(), "ham2".to_string()],
            ham_dir: "ham".to_string(),
            spam_dir: "spam".to_string(),
        }
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
            format: "pretty".to_string(),
        }
    }
}

impl Config {
    /// Load configuration from a TOML file
    pub fn from_file(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .map_err(|e| SpamError::Config(format!("Failed to read config file: {}", e)))?;

        let config: Self = toml::from_str(&content)
            .map_err(|e| SpamError::Config(format!("Failed to parse config: {}", e)))?;
        config.validate()?;
        Ok(config)
    }

    /// Load configuration from an optional file layered under `SPAM_RS__*`
    /// environment overrides
    pub fn load(path: Option<&Path>) -> Result<Self> {
        let mut builder = ::config::Config::builder();
        if let Some(path) = path {
            builder = builder.add_source(::config::File::from(path));
        }

        let settings = builder
            .add_source(
                ::config::Environment::with_prefix(ENV_PREFIX)
                    .separator("__")
                    .try_parsing(true),
            )
            .build()
            .map_err(|e| SpamError::Config(format!("Failed to load config: {}", e)))?;

        let config: Self = settings
            .try_deserialize()
            .map_err(|e| SpamError::Config(format!("Failed to parse config: {}", e)))?;
        config.validate()?;
        Ok(config)
    }

    /// Validate configuration
    pub fn validate(&self) -> Result<()> {
        self.classifier.validate()?;

        if self.corpus.train_ham_dirs.is_empty() {
            return Err(SpamError::Config(
                "At least one ham training directory is required".to_string(),
            ));
        }

        match self.logging.format.as_str() {
            "pretty" | "json" => Ok(()),
            other => Err(SpamError::Config(format!(
                "Unknown logging format '{}' (expected 'pretty' or 'json')",
                other
            ))),
        }
    }
}

impl ClassifierConfig {
    /// Validate classifier parameters
    pub fn validate(&self) -> Result<()> {
        if !(0.0..=1.0).contains(&self.spam_threshold) {
            return Err(SpamError::Config(format!(
                "spam_threshold must be within [0, 1], got {}",
                self.spam_threshold
            )));
        }

        if !self.smoothing_constant.is_finite() || self.smoothing_constant <= 0.0 {
            return Err(SpamError::Config(format!(
                "smoothing_constant must be a positive number, got {}",
                self.smoothing_constant
            )));
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_default_config() {
        let config = Config::default();
        assert_eq!(config.classifier.smoothing_constant, 1.0);
        assert_eq!(config.classifier.spam_threshold, 0.6);
        assert_eq!(config.corpus.train_ham_dirs, vec!["ham", "ham2"]);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_parse_partial_config() {
        let toml = r#"
[classifier]
spam_threshold = 0.75

[corpus]
train_ham_dirs = ["easy_ham", "hard_ham"]
"#;
        let config: Config = toml::from_str(toml).unwrap();
        assert_eq!(config.classifier.spam_threshold, 0.75);
        assert_eq!(config.classifier.smoothing_constant, 1.0);
        assert_eq!(config.corpus.train_ham_dirs, vec!["easy_ham", "hard_ham"]);
        assert_eq!(config.corpus.spam_dir, "spam");
        assert_eq!(config.logging.level, "info");
    }

    #[test]
    fn test_rejects_out_of_range_threshold() {
        let mut config = Config::default();
        config.classifier.spam_threshold = 1.5;
        assert!(matches!(config.validate(), Err(SpamError::Config(_))));
    }

    #[test]
    fn test_rejects_non_positive_smoothing() {
        let mut config = Config::default();
        config.classifier.smoothing_constant = 0.0;
        assert!(config.validate().is_err());

        config.classifier.smoothing_constant = f64::NAN;
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_rejects_unknown_log_format() {
        let mut config = Config::default();
        config.logging.format = "xml".to_string();
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_from_file() {
        let mut file = tempfile::Builder::new().suffix(".toml").tempfile().unwrap();
        writeln!(file, "[classifier]\nsmoothing_constant = 0.5").unwrap();

        let config = Config::from_file(file.path()).unwrap();
        assert_eq!(config.classifier.smoothing_constant, 0.5);
        assert_eq!(config.classifier.spam_threshold, 0.6);
    }

    #[test]
    fn test_load_layers_file() {
        let mut file = tempfile::Builder::new().suffix(".toml").tempfile().unwrap();
        writeln!(file, "[logging]\nformat = \"json\"").unwrap();

        let config = Config::load(Some(file.path())).unwrap();
        assert_eq!(config.logging.format, "json");
        assert_eq!(config.corpus.test_dir, "test");
    }

    #[test]
    fn test_example_config_parses() {
        let config: Config = toml::from_str(include_str!("../config.example.toml")).unwrap();
        assert!(config.validate().is_ok());
        assert_eq!(config.classifier, ClassifierConfig::default());
        assert_eq!(config.corpus, CorpusLayout::default());
    }

    #[test]
    fn test_from_file_missing() {
        let result = Config::from_file(Path::new("/nonexistent/spam-rs.toml"));
        assert!(matches!(result, Err(SpamError::Config(_))));
    }
}
