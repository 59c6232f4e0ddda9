use criterion::{Criterion, criterion_group, criterion_main};
use scam_classifier::{BoostingParams, ScamClassifier, ScamRecord, TrainConfig};

fn trained_model() -> (ScamClassifier, Vec<String>) {
    let scams = [
        "guaranteed profit forex robot",
        "send bitcoin now for guaranteed returns",
        "double your deposit with secret signals",
    ];
    let legit = [
        "regulated broker with audited fees",
        "licensed dealer publishes monthly statements",
        "transparent spreads and segregated accounts",
    ];
    let records: Vec<ScamRecord> = (0..200)
        .map(|i| {
            let scam = i % 2 == 0;
            let base = if scam { scams[i % 3] } else { legit[i % 3] };
            ScamRecord::new(format!("{base} ref{}", i % 17), "forex", scam)
        })
        .collect();

    let config = TrainConfig {
        boosting: BoostingParams {
            n_estimators: 50,
            ..BoostingParams::default()
        },
        ..TrainConfig::default()
    };
    let model = ScamClassifier::train(&records, &config).expect("Training failed");
    let texts = records.into_iter().map(|r| r.text).collect();
    (model, texts)
}

fn bench_predict_single(c: &mut Criterion) {
    let (model, _) = trained_model();

    c.bench_function("predict single ad", |b| {
        b.iter(|| {
            let _ = model.predict_with_proba("guaranteed forex returns, send bitcoin");
        })
    });
}

fn bench_bulk_prediction(c: &mut Criterion) {
    let (model, texts) = trained_model();

    c.bench_function("bulk predict 200 ads", |b| {
        b.iter(|| {
            let _ = model.predict(&texts);
        });
    });
}

criterion_group!(benches, bench_predict_single, bench_bulk_prediction);
criterion_main!(benches);
