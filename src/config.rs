//! Training settings, read from an optional TOML file.
//!
//! ```toml
//! dataset_path = "datasets/forex_scams_dataset_v1.json"
//! test_ratio = 0.25
//! seed = 40
//! max_features = 5000
//!
//! [boosting]
//! n_estimators = 100
//! learning_rate = 0.5
//! max_depth = 3
//! ```

use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};
use crate::model::BoostingParams;

/// Environment variable naming a config file to read instead of the default.
pub const CONFIG_ENV: &str = "SCAM_CLASSIFIER_CONFIG";
/// Config file picked up from the working directory when present.
pub const DEFAULT_CONFIG_FILE: &str = "scam_classifier.toml";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TrainConfig {
    pub dataset_path: PathBuf,
    pub model_path: PathBuf,
    pub vectorizer_path: PathBuf,
    pub test_ratio: f64,
    pub seed: u64,
    pub max_features: usize,
    pub boosting: BoostingParams,
}

impl Default for TrainConfig {
    fn default() -> Self {
        Self {
            dataset_path: PathBuf::from("datasets/forex_scams_dataset_v1.json"),
            model_path: PathBuf::from("gradient_boosting_scam_model.msgpack"),
            vectorizer_path: PathBuf::from("tfidf_vectorizer.msgpack"),
            test_ratio: 0.25,
            seed: 40,
            max_features: 5000,
            boosting: BoostingParams::default(),
        }
    }
}

impl TrainConfig {
    /// Resolves the config from `$SCAM_CLASSIFIER_CONFIG`, then
    /// `./scam_classifier.toml`, then the built-in defaults.
    pub fn load() -> Result<Self> {
        let config = match std::env::var_os(CONFIG_ENV) {
            Some(path) => Self::from_file(Path::new(&path))?,
            None if Path::new(DEFAULT_CONFIG_FILE).exists() => {
                Self::from_file(Path::new(DEFAULT_CONFIG_FILE))?
            }
            None => Self::default(),
        };
        config.validate()?;
        Ok(config)
    }

    pub fn from_file(path: &Path) -> Result<Self> {
        let raw = fs::read_to_string(path).map_err(|e| Error::io(path, e))?;
        toml::from_str(&raw).map_err(|source| Error::ConfigParse {
            path: path.to_path_buf(),
            source,
        })
    }

    pub fn validate(&self) -> Result<()> {
        if !(self.test_ratio > 0.0 && self.test_ratio < 1.0) {
            return Err(Error::InvalidConfig(format!(
                "test_ratio must be in (0, 1), got {}",
                self.test_ratio
            )));
        }
        if self.max_features == 0 {
            return Err(Error::InvalidConfig("max_features must be positive".into()));
        }
        self.boosting.validate()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn defaults_match_reference_pipeline() {
        let config = TrainConfig::default();
        assert_eq!(config.test_ratio, 0.25);
        assert_eq!(config.seed, 40);
        assert_eq!(config.max_features, 5000);
        assert_eq!(config.boosting.n_estimators, 100);
        assert_eq!(config.boosting.learning_rate, 0.5);
        assert_eq!(config.boosting.max_depth, 3);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn partial_file_keeps_other_defaults() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "seed = 7\n\n[boosting]\nn_estimators = 10").unwrap();

        let config = TrainConfig::from_file(file.path()).unwrap();
        assert_eq!(config.seed, 7);
        assert_eq!(config.boosting.n_estimators, 10);
        assert_eq!(config.boosting.max_depth, 3);
        assert_eq!(config.max_features, 5000);
    }

    #[test]
    fn rejects_out_of_range_ratio() {
        let config = TrainConfig {
            test_ratio: 1.0,
            ..TrainConfig::default()
        };
        assert!(matches!(config.validate(), Err(Error::InvalidConfig(_))));
    }

    #[test]
    fn bad_toml_reports_path() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "seed = \"forty\"").unwrap();

        let err = TrainConfig::from_file(file.path()).unwrap_err();
        assert!(matches!(err, Error::ConfigParse { .. }));
    }
}
