use std::path::PathBuf;

use thiserror::Error;

/// Errors raised while loading data, training or persisting the classifier.
#[derive(Debug, Error)]
pub enum Error {
    /// A file could not be opened, read or created.
    #[error("I/O error on {path}: {source}")]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },
    /// The dataset is not a valid JSON array of records.
    #[error("Malformed dataset JSON: {0}")]
    Json(#[from] serde_json::Error),
    /// A row carries a `scam` label that is missing or not a boolean.
    #[error("Row {index} has an invalid scam label: {message}")]
    InvalidLabel { index: usize, message: String },
    /// Nothing left to train on after splitting.
    #[error("Training set is empty")]
    EmptyTrainingSet,
    /// Both classes are needed to fit a binary classifier.
    #[error("Training labels contain a single class (scam = {0})")]
    SingleClass(bool),
    /// Feature rows and labels disagree in count or width.
    #[error("Shape mismatch: {0}")]
    Shape(String),
    /// The training text yielded no usable terms.
    #[error("Empty vocabulary; the documents may contain only stop words")]
    EmptyVocabulary,
    #[error("TF-IDF vectorizer error: {0}")]
    Vectorizer(#[from] linfa_preprocessing::PreprocessingError),
    #[error("Failed to serialize artifact to MessagePack: {0}")]
    Encode(#[from] rmp_serde::encode::Error),
    #[error("Failed to deserialize artifact from MessagePack: {0}")]
    Decode(#[from] rmp_serde::decode::Error),
    #[error("Invalid config file {path}: {source}")]
    ConfigParse {
        path: PathBuf,
        source: toml::de::Error,
    },
    #[error("Invalid config: {0}")]
    InvalidConfig(String),
}

pub type Result<T> = std::result::Result<T, Error>;

impl Error {
    pub(crate) fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Error::Io {
            path: path.into(),
            source,
        }
    }
}
