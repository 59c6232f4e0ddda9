//! # scam-classifier
//!
//! Train a binary scam classifier from a labeled JSON text dataset.
//!
//! Text is turned into TF-IDF features with
//! [`linfa-preprocessing`](https://crates.io/crates/linfa-preprocessing) (English
//! stop words removed, vocabulary capped) and classified by a
//! [`gbdt`](https://crates.io/crates/gbdt) gradient-boosted tree ensemble.
//!
//! ## Features
//! - JSON dataset loading with missing-text rows dropped
//! - Seeded, reproducible train/test split
//! - Accuracy, confusion matrix and per-class precision/recall/F1 report
//! - Vectorizer and model persisted to two MessagePack files with `rmp-serde`
//!
//! ## Example
//! ```rust,no_run
//! use std::path::Path;
//! use scam_classifier::{ScamClassifier, TrainConfig, load_records, train_test_split};
//!
//! let config = TrainConfig::default();
//! let records = load_records(&config.dataset_path)?;
//! let split = train_test_split(&records, config.test_ratio, config.seed);
//! let model = ScamClassifier::train(&split.train, &config)?;
//! println!("{}", model.evaluate_on(&split.test)?);
//! model.save(Path::new("model.msgpack"), Path::new("tfidf.msgpack"))?;
//! # Ok::<(), scam_classifier::Error>(())
//! ```

pub mod config;
pub mod data;
pub mod error;
pub mod features;
pub mod logging;
pub mod metrics;
pub mod model;
mod stop_words;

use std::path::Path;

pub use config::TrainConfig;
pub use data::{DatasetSplit, ScamRecord, category_counts, load_records, parse_records, train_test_split};
pub use error::{Error, Result};
pub use features::TextVectorizer;
pub use metrics::{ClassificationReport, ConfusionMatrix, Evaluation};
pub use model::{BoostedClassifier, BoostingParams};
pub use stop_words::ENGLISH_STOP_WORDS;

/// A fitted vectorizer and the booster trained on its output.
pub struct ScamClassifier {
    vectorizer: TextVectorizer,
    model: BoostedClassifier,
}

/// A vocabulary term and its mean TF-IDF weight in each class.
#[derive(Debug, Clone, PartialEq)]
pub struct TermWeight {
    pub term: String,
    pub scam: f32,
    pub legit: f32,
}

impl ScamClassifier {
    /// Fits the vectorizer on the training text, then the booster on its features.
    pub fn train(records: &[ScamRecord], config: &TrainConfig) -> Result<Self> {
        if records.is_empty() {
            return Err(Error::EmptyTrainingSet);
        }
        let texts: Vec<&str> = records.iter().map(|r| r.text.as_str()).collect();
        let labels: Vec<bool> = records.iter().map(|r| r.scam).collect();

        let vectorizer = TextVectorizer::fit(&texts, config.max_features)?;
        let rows = vectorizer.transform(&texts)?;
        let model = BoostedClassifier::fit(&rows, &labels, &config.boosting)?;

        Ok(Self { vectorizer, model })
    }

    /// Pairs a previously fitted vectorizer and model.
    pub fn from_parts(vectorizer: TextVectorizer, model: BoostedClassifier) -> Result<Self> {
        if vectorizer.is_empty() {
            return Err(Error::EmptyVocabulary);
        }
        if vectorizer.len() != model.n_features() {
            return Err(Error::Shape(format!(
                "vectorizer has {} terms but model expects {} features",
                vectorizer.len(),
                model.n_features()
            )));
        }
        Ok(Self { vectorizer, model })
    }

    /// Returns whether `text` looks like a scam, and the scam probability.
    pub fn predict_with_proba(&self, text: &str) -> Result<(bool, f32)> {
        let rows = self.vectorizer.transform(&[text])?;
        let p = self.model.predict_proba(&rows)?[0];
        Ok((p >= model::DECISION_THRESHOLD, p))
    }

    pub fn predict<S: AsRef<str>>(&self, texts: &[S]) -> Result<Vec<bool>> {
        let rows = self.vectorizer.transform(texts)?;
        self.model.predict(&rows)
    }

    /// Scores the classifier against labeled records.
    pub fn evaluate_on(&self, records: &[ScamRecord]) -> Result<Evaluation> {
        let texts: Vec<&str> = records.iter().map(|r| r.text.as_str()).collect();
        let actual: Vec<bool> = records.iter().map(|r| r.scam).collect();
        let predicted = self.predict(&texts)?;
        Ok(Evaluation::new(&actual, &predicted))
    }

    /// Terms whose mean weight leans hardest towards the scam class.
    pub fn top_terms(&self, records: &[ScamRecord], n: usize) -> Result<Vec<TermWeight>> {
        let texts: Vec<&str> = records.iter().map(|r| r.text.as_str()).collect();
        let rows = self.vectorizer.transform(&texts)?;

        let width = self.vectorizer.len();
        let mut sums = [vec![0.0f32; width], vec![0.0f32; width]];
        let mut counts = [0usize; 2];
        for (row, r) in rows.iter().zip(records) {
            let class = r.scam as usize;
            counts[class] += 1;
            for (acc, v) in sums[class].iter_mut().zip(row) {
                *acc += v;
            }
        }
        let mean = |class: usize, i: usize| {
            if counts[class] == 0 {
                0.0
            } else {
                sums[class][i] / counts[class] as f32
            }
        };

        let mut terms: Vec<TermWeight> = self
            .vectorizer
            .vocabulary()
            .iter()
            .enumerate()
            .map(|(i, term)| TermWeight {
                term: term.clone(),
                scam: mean(1, i),
                legit: mean(0, i),
            })
            .collect();
        terms.sort_by(|a, b| (b.scam - b.legit).total_cmp(&(a.scam - a.legit)));
        terms.truncate(n);
        Ok(terms)
    }

    /// Displays the most scam-leaning terms.
    pub fn show_top_terms(&self, records: &[ScamRecord], n: usize) -> Result<()> {
        println!("Most scam-leaning terms (mean TF-IDF weight):");
        for t in self.top_terms(records, n)? {
            println!(
                "{:>25} | scam: {:.4}, legit: {:.4}",
                t.term, t.scam, t.legit
            );
        }
        Ok(())
    }

    /// Writes the model and the vectorizer to two separate files.
    pub fn save(&self, model_path: &Path, vectorizer_path: &Path) -> Result<()> {
        self.model.save_to_file(model_path)?;
        self.vectorizer.save_to_file(vectorizer_path)?;
        tracing::info!(
            model = %model_path.display(),
            vectorizer = %vectorizer_path.display(),
            "Saved artifacts"
        );
        Ok(())
    }

    pub fn load(model_path: &Path, vectorizer_path: &Path) -> Result<Self> {
        let model = BoostedClassifier::load_from_file(model_path)?;
        let vectorizer = TextVectorizer::load_from_file(vectorizer_path)?;
        Self::from_parts(vectorizer, model)
    }
}
