use std::fs::File;
use std::io::{BufReader, BufWriter};
use std::path::Path;

use gbdt::config::Config;
use gbdt::decision_tree::{Data, DataVec};
use gbdt::gradient_boost::GBDT;
use rmp_serde::{decode::from_read, encode::write_named};
use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};

const LABEL_SCAM: f32 = 1.0;
const LABEL_LEGIT: f32 = -1.0;

/// Probability at or above which a row is classified as a scam.
pub const DECISION_THRESHOLD: f32 = 0.5;

/// Ensemble hyperparameters.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct BoostingParams {
    pub n_estimators: usize,
    pub learning_rate: f32,
    pub max_depth: u32,
}

impl Default for BoostingParams {
    fn default() -> Self {
        Self {
            n_estimators: 100,
            learning_rate: 0.5,
            max_depth: 3,
        }
    }
}

impl BoostingParams {
    pub fn validate(&self) -> Result<()> {
        if self.n_estimators == 0 {
            return Err(Error::InvalidConfig("n_estimators must be positive".into()));
        }
        if self.max_depth == 0 {
            return Err(Error::InvalidConfig("max_depth must be positive".into()));
        }
        if !(self.learning_rate > 0.0) {
            return Err(Error::InvalidConfig(format!(
                "learning_rate must be positive, got {}",
                self.learning_rate
            )));
        }
        Ok(())
    }

    fn to_config(&self, n_features: usize) -> Config {
        let mut cfg = Config::new();
        cfg.set_feature_size(n_features);
        cfg.set_max_depth(self.max_depth);
        cfg.set_iterations(self.n_estimators);
        cfg.set_shrinkage(self.learning_rate);
        cfg.set_loss("LogLikelyhood");
        cfg.set_debug(false);
        // Full sampling keeps every fit deterministic.
        cfg.set_data_sample_ratio(1.0);
        cfg.set_feature_sample_ratio(1.0);
        cfg.set_training_optimization_level(2);
        cfg
    }
}

/// Gradient-boosted decision trees over dense feature rows.
#[derive(Serialize, Deserialize)]
pub struct BoostedClassifier {
    gbdt: GBDT,
    n_features: usize,
}

impl BoostedClassifier {
    /// Fits on `rows`; `labels[i]` is true when row `i` is a scam.
    pub fn fit(rows: &[Vec<f32>], labels: &[bool], params: &BoostingParams) -> Result<Self> {
        if rows.is_empty() {
            return Err(Error::EmptyTrainingSet);
        }
        if rows.len() != labels.len() {
            return Err(Error::Shape(format!(
                "{} rows but {} labels",
                rows.len(),
                labels.len()
            )));
        }
        let first = labels[0];
        if labels.iter().all(|&l| l == first) {
            return Err(Error::SingleClass(first));
        }
        let n_features = rows[0].len();
        check_width(rows, n_features)?;

        let mut train: DataVec = rows
            .iter()
            .zip(labels)
            .map(|(row, &scam)| {
                let label = if scam { LABEL_SCAM } else { LABEL_LEGIT };
                Data::new_training_data(row.clone(), 1.0, label, None)
            })
            .collect();

        tracing::info!(
            rows = rows.len(),
            features = n_features,
            trees = params.n_estimators,
            "Fitting gradient boosting model"
        );
        let mut gbdt = GBDT::new(&params.to_config(n_features));
        gbdt.fit(&mut train);

        Ok(Self { gbdt, n_features })
    }

    pub fn n_features(&self) -> usize {
        self.n_features
    }

    /// Scam probability per row.
    pub fn predict_proba(&self, rows: &[Vec<f32>]) -> Result<Vec<f32>> {
        if rows.is_empty() {
            return Ok(Vec::new());
        }
        check_width(rows, self.n_features)?;
        let test: DataVec = rows
            .iter()
            .map(|row| Data::new_test_data(row.clone(), None))
            .collect();
        Ok(self.gbdt.predict(&test))
    }

    pub fn predict(&self, rows: &[Vec<f32>]) -> Result<Vec<bool>> {
        Ok(self
            .predict_proba(rows)?
            .into_iter()
            .map(|p| p >= DECISION_THRESHOLD)
            .collect())
    }

    pub fn save_to_file(&self, path: &Path) -> Result<()> {
        let file = File::create(path).map_err(|e| Error::io(path, e))?;
        let mut writer = BufWriter::new(file);
        write_named(&mut writer, self)?;
        Ok(())
    }

    pub fn load_from_file(path: &Path) -> Result<Self> {
        let file = File::open(path).map_err(|e| Error::io(path, e))?;
        Ok(from_read(BufReader::new(file))?)
    }
}

fn check_width(rows: &[Vec<f32>], width: usize) -> Result<()> {
    match rows.iter().position(|r| r.len() != width) {
        Some(i) => Err(Error::Shape(format!(
            "row {i} has {} features, expected {width}",
            rows[i].len()
        ))),
        None => Ok(()),
    }
}
