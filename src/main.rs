use anyhow::{Context, Result};
use scam_classifier::{
    ScamClassifier, TrainConfig, category_counts, load_records, logging, train_test_split,
};

fn main() -> Result<()> {
    logging::init();

    let config = TrainConfig::load().context("Failed to load training config")?;

    let records = load_records(&config.dataset_path).with_context(|| {
        format!("Failed to load dataset {}", config.dataset_path.display())
    })?;
    for (category, (rows, scams)) in category_counts(&records) {
        tracing::debug!(%category, rows, scams, "Category");
    }

    let split = train_test_split(&records, config.test_ratio, config.seed);
    tracing::info!(
        train = split.train.len(),
        test = split.test.len(),
        "🧠 Training new model"
    );
    let model = ScamClassifier::train(&split.train, &config).context("Training failed")?;

    let evaluation = model
        .evaluate_on(&split.test)
        .context("Evaluation failed")?;
    println!("{evaluation}");
    model.show_top_terms(&split.train, 10)?;

    println!("💾 Saving model...");
    model
        .save(&config.model_path, &config.vectorizer_path)
        .context("Failed to save artifacts")?;

    Ok(())
}
