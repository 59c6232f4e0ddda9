//! TF-IDF text features.
//!
//! Term counting comes from the `linfa-preprocessing` count vectorizer. The
//! inverse document frequencies are learned once from the training text and
//! stored alongside it, so every later transform weights terms the same way
//! no matter which rows are batched together.

use std::fs::File;
use std::io::{BufReader, BufWriter};
use std::path::Path;

use linfa_preprocessing::CountVectorizer;
use linfa_preprocessing::tf_idf_vectorization::TfIdfMethod;
use ndarray::Array1;
use rmp_serde::{decode::from_read, encode::write_named};
use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};
use crate::stop_words::ENGLISH_STOP_WORDS;

/// A fitted vocabulary with its training-set IDF weights.
#[derive(Serialize, Deserialize)]
pub struct TextVectorizer {
    counts: CountVectorizer,
    idf: Vec<f64>,
}

impl TextVectorizer {
    /// Fits on `texts`, keeping at most `max_features` terms.
    pub fn fit<S: AsRef<str>>(texts: &[S], max_features: usize) -> Result<Self> {
        let docs = to_array(texts);
        let counts = CountVectorizer::params()
            .convert_to_lowercase(true)
            .stopwords(ENGLISH_STOP_WORDS)
            .max_features(Some(max_features))
            .fit(&docs)?;

        if counts.nentries() == 0 {
            return Err(Error::EmptyVocabulary);
        }

        let mut df = vec![0usize; counts.nentries()];
        for row in counts.transform(&docs)?.outer_iterator() {
            for (col, &count) in row.iter() {
                if count > 0 {
                    df[col] += 1;
                }
            }
        }
        let idf = df
            .into_iter()
            .map(|d| TfIdfMethod::Smooth.compute_idf(docs.len(), d))
            .collect();

        tracing::info!(terms = counts.nentries(), "Fitted TF-IDF vocabulary");
        Ok(Self { counts, idf })
    }

    /// Number of terms, which is also the width of every transformed row.
    pub fn len(&self) -> usize {
        self.idf.len()
    }

    /// True when no term survived fitting; such a vectorizer cannot feed a model.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Terms in column order.
    pub fn vocabulary(&self) -> &[String] {
        self.counts.vocabulary()
    }

    /// One L2-normalized dense row per text, weighted by the training IDF.
    pub fn transform<S: AsRef<str>>(&self, texts: &[S]) -> Result<Vec<Vec<f32>>> {
        let sparse = self.counts.transform(&to_array(texts))?;
        let width = self.len();

        let rows = sparse
            .outer_iterator()
            .map(|row| {
                let mut weights = vec![0.0f64; width];
                for (col, &count) in row.iter() {
                    weights[col] = count as f64 * self.idf[col];
                }
                let norm = weights.iter().map(|w| w * w).sum::<f64>().sqrt();
                weights
                    .into_iter()
                    .map(|w| if norm > 0.0 { (w / norm) as f32 } else { 0.0 })
                    .collect()
            })
            .collect();
        Ok(rows)
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

fn to_array<S: AsRef<str>>(texts: &[S]) -> Array1<String> {
    texts.iter().map(|t| t.as_ref().to_string()).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    const DOCS: [&str; 4] = [
        "Guaranteed profit with our forex robot",
        "Guaranteed returns, send bitcoin now",
        "The broker is regulated by the FCA",
        "Regulated broker with transparent fees",
    ];

    fn column(vectorizer: &TextVectorizer, term: &str) -> usize {
        vectorizer
            .vocabulary()
            .iter()
            .position(|t| t == term)
            .unwrap()
    }

    #[test]
    fn drops_stop_words_and_lowercases() {
        let vectorizer = TextVectorizer::fit(&DOCS, 5000).unwrap();
        assert!(!vectorizer.is_empty());
        let vocab = vectorizer.vocabulary();
        assert!(vocab.iter().any(|t| t == "guaranteed"));
        assert!(vocab.iter().any(|t| t == "fca"));
        assert!(!vocab.iter().any(|t| t == "the" || t == "with" || t == "our"));
    }

    #[test]
    fn caps_vocabulary_size() {
        let vectorizer = TextVectorizer::fit(&DOCS, 3).unwrap();
        assert_eq!(vectorizer.len(), 3);
        let rows = vectorizer.transform(&DOCS).unwrap();
        assert!(rows.iter().all(|r| r.len() == 3));
    }

    #[test]
    fn cap_keeps_most_frequent_term() {
        let docs = ["alpha bravo", "alpha charlie", "alpha delta"];
        let vectorizer = TextVectorizer::fit(&docs, 1).unwrap();
        assert_eq!(vectorizer.vocabulary(), ["alpha".to_string()]);
    }

    #[test]
    fn rows_are_unit_length_or_zero() {
        let vectorizer = TextVectorizer::fit(&DOCS, 5000).unwrap();
        let rows = vectorizer
            .transform(&["guaranteed forex profit", "nothing here at all"])
            .unwrap();

        let norm: f32 = rows[0].iter().map(|v| v * v).sum::<f32>().sqrt();
        assert!((norm - 1.0).abs() < 1e-5);
        assert!(rows[1].iter().all(|&v| v == 0.0));
    }

    #[test]
    fn row_does_not_depend_on_batch() {
        let vectorizer = TextVectorizer::fit(&DOCS, 5000).unwrap();
        let alone = vectorizer.transform(&["guaranteed broker fees"]).unwrap();
        let batch = vectorizer
            .transform(&[
                "guaranteed broker fees",
                "regulated broker fees",
                "send bitcoin broker",
            ])
            .unwrap();
        assert_eq!(alone[0], batch[0]);
    }

    #[test]
    fn weights_use_training_idf() {
        let vectorizer = TextVectorizer::fit(&DOCS, 5000).unwrap();
        let row = &vectorizer.transform(&["guaranteed broker fees"]).unwrap()[0];

        // n = 4 training docs; df(guaranteed) = 2, df(broker) = 2, df(fees) = 1.
        let idf = |df: f64| ((1.0 + 4.0) / (1.0 + df)).ln() + 1.0;
        let raw = [idf(2.0), idf(2.0), idf(1.0)];
        let norm = raw.iter().map(|w| w * w).sum::<f64>().sqrt();

        let expected = [
            ("guaranteed", raw[0] / norm),
            ("broker", raw[1] / norm),
            ("fees", raw[2] / norm),
        ];
        for (term, weight) in expected {
            let got = row[column(&vectorizer, term)] as f64;
            assert!((got - weight).abs() < 1e-5, "{term}: {got} vs {weight}");
        }
        let nonzero = row.iter().filter(|&&v| v != 0.0).count();
        assert_eq!(nonzero, 3);
    }

    #[test]
    fn stop_word_only_corpus_is_rejected() {
        let result = TextVectorizer::fit(&["the and of", "a to is"], 5000);
        assert!(matches!(
            result,
            Err(Error::EmptyVocabulary) | Err(Error::Vectorizer(_))
        ));
    }
}
