use std::collections::BTreeMap;
use std::fs::File;
use std::io::BufReader;
use std::path::Path;

use rand::SeedableRng;
use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::error::{Error, Result};

/// Category assigned to rows that carry none.
pub const UNKNOWN_CATEGORY: &str = "UNKNOWN";

/// A labeled text sample.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScamRecord {
    pub text: String,
    pub category: String,
    pub scam: bool,
}

impl ScamRecord {
    pub fn new(text: impl Into<String>, category: impl Into<String>, scam: bool) -> Self {
        Self {
            text: text.into(),
            category: category.into(),
            scam,
        }
    }
}

#[derive(Deserialize)]
struct RawRecord {
    #[serde(default)]
    text: Option<String>,
    #[serde(default)]
    category: Option<Value>,
    #[serde(default)]
    scam: Option<Value>,
}

/// Reads a JSON array of `{text, category, scam}` objects from disk.
pub fn load_records(path: &Path) -> Result<Vec<ScamRecord>> {
    let file = File::open(path).map_err(|e| Error::io(path, e))?;
    let raw: Vec<RawRecord> = serde_json::from_reader(BufReader::new(file))?;
    clean(raw)
}

/// Same as [`load_records`], from an in-memory JSON string.
pub fn parse_records(json: &str) -> Result<Vec<ScamRecord>> {
    let raw: Vec<RawRecord> = serde_json::from_str(json)?;
    clean(raw)
}

fn clean(raw: Vec<RawRecord>) -> Result<Vec<ScamRecord>> {
    let total = raw.len();
    let mut records = Vec::with_capacity(total);

    for (index, row) in raw.into_iter().enumerate() {
        let Some(text) = row.text else {
            continue;
        };
        let scam = parse_label(row.scam.as_ref())
            .map_err(|message| Error::InvalidLabel { index, message })?;
        let category = match row.category {
            None | Some(Value::Null) => UNKNOWN_CATEGORY.to_string(),
            Some(Value::String(s)) => s,
            Some(other) => other.to_string(),
        };
        records.push(ScamRecord {
            text,
            category,
            scam,
        });
    }

    let dropped = total - records.len();
    if dropped > 0 {
        tracing::warn!(dropped, "Dropped rows without text");
    }
    tracing::info!(rows = records.len(), "Loaded dataset");
    Ok(records)
}

fn parse_label(value: Option<&Value>) -> std::result::Result<bool, String> {
    match value {
        None | Some(Value::Null) => Err("missing".to_string()),
        Some(Value::Bool(b)) => Ok(*b),
        Some(Value::Number(n)) => match n.as_f64() {
            Some(v) if v == 0.0 => Ok(false),
            Some(v) if v == 1.0 => Ok(true),
            _ => Err(format!("expected 0 or 1, got {n}")),
        },
        Some(Value::String(s)) => match s.trim().to_ascii_lowercase().as_str() {
            "true" | "1" => Ok(true),
            "false" | "0" => Ok(false),
            other => Err(format!("expected a boolean, got {other:?}")),
        },
        Some(other) => Err(format!("expected a boolean, got {other}")),
    }
}

/// Row and scam counts per category, keyed by category name.
pub fn category_counts(records: &[ScamRecord]) -> BTreeMap<String, (usize, usize)> {
    let mut counts = BTreeMap::new();
    for r in records {
        let entry = counts.entry(r.category.clone()).or_insert((0, 0));
        entry.0 += 1;
        if r.scam {
            entry.1 += 1;
        }
    }
    counts
}

/// A helper type for holding train/test splits.
#[derive(Debug)]
pub struct DatasetSplit {
    pub train: Vec<ScamRecord>,
    pub test: Vec<ScamRecord>,
}

/// Shuffles with a seeded RNG and moves `ceil(n * test_ratio)` rows to the test set.
pub fn train_test_split(data: &[ScamRecord], test_ratio: f64, seed: u64) -> DatasetSplit {
    let mut rng = StdRng::seed_from_u64(seed);
    let mut data = data.to_vec();
    data.shuffle(&mut rng);

    let test_size = ((data.len() as f64) * test_ratio).ceil() as usize;
    let test_size = test_size.min(data.len());
    let train = data.split_off(test_size);

    tracing::debug!(train = train.len(), test = data.len(), "Split dataset");
    DatasetSplit { train, test: data }
}
