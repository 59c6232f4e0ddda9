//! Held-out evaluation: accuracy, confusion matrix and a per-class report.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Display names for class 0 (legit) and class 1 (scam).
pub const CLASS_NAMES: [&str; 2] = ["legit", "scam"];

/// 2x2 counts indexed `[actual][predicted]`, with class 1 meaning scam.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ConfusionMatrix {
    pub counts: [[usize; 2]; 2],
}

impl ConfusionMatrix {
    pub fn from_predictions(actual: &[bool], predicted: &[bool]) -> Self {
        let mut cm = Self::default();
        for (&a, &p) in actual.iter().zip(predicted) {
            cm.counts[a as usize][p as usize] += 1;
        }
        cm
    }

    pub fn get(&self, actual: bool, predicted: bool) -> usize {
        self.counts[actual as usize][predicted as usize]
    }

    pub fn total(&self) -> usize {
        self.counts.iter().flatten().sum()
    }

    pub fn accuracy(&self) -> f64 {
        ratio(self.counts[0][0] + self.counts[1][1], self.total())
    }

    /// Precision, recall, F1 and support for one class.
    pub fn class_metrics(&self, class: usize) -> ClassMetrics {
        let other = 1 - class;
        let tp = self.counts[class][class];
        let fp = self.counts[other][class];
        let fn_ = self.counts[class][other];

        let precision = ratio(tp, tp + fp);
        let recall = ratio(tp, tp + fn_);
        let f1 = if precision + recall > 0.0 {
            2.0 * precision * recall / (precision + recall)
        } else {
            0.0
        };
        ClassMetrics {
            precision,
            recall,
            f1,
            support: tp + fn_,
        }
    }
}

impl fmt::Display for ConfusionMatrix {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let width = self
            .counts
            .iter()
            .flatten()
            .map(|c| c.to_string().len())
            .max()
            .unwrap_or(1);
        writeln!(f, "[[{:>width$} {:>width$}]", self.counts[0][0], self.counts[0][1])?;
        write!(f, " [{:>width$} {:>width$}]]", self.counts[1][0], self.counts[1][1])
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ClassMetrics {
    pub precision: f64,
    pub recall: f64,
    pub f1: f64,
    pub support: usize,
}

/// Per-class metrics plus macro and support-weighted averages.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ClassificationReport {
    pub classes: [ClassMetrics; 2],
    pub accuracy: f64,
    pub macro_avg: ClassMetrics,
    pub weighted_avg: ClassMetrics,
}

impl ClassificationReport {
    pub fn from_confusion(cm: &ConfusionMatrix) -> Self {
        let classes = [cm.class_metrics(0), cm.class_metrics(1)];
        let total = cm.total();

        let macro_avg = ClassMetrics {
            precision: (classes[0].precision + classes[1].precision) / 2.0,
            recall: (classes[0].recall + classes[1].recall) / 2.0,
            f1: (classes[0].f1 + classes[1].f1) / 2.0,
            support: total,
        };

        let weighted = |pick: fn(&ClassMetrics) -> f64| {
            if total == 0 {
                return 0.0;
            }
            classes
                .iter()
                .map(|c| pick(c) * c.support as f64)
                .sum::<f64>()
                / total as f64
        };
        let weighted_avg = ClassMetrics {
            precision: weighted(|c: &ClassMetrics| c.precision),
            recall: weighted(|c: &ClassMetrics| c.recall),
            f1: weighted(|c: &ClassMetrics| c.f1),
            support: total,
        };

        Self {
            classes,
            accuracy: cm.accuracy(),
            macro_avg,
            weighted_avg,
        }
    }
}

impl fmt::Display for ClassificationReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(
            f,
            "{:>12} {:>10} {:>10} {:>10} {:>10}",
            "", "precision", "recall", "f1-score", "support"
        )?;
        writeln!(f)?;
        for (name, m) in CLASS_NAMES.iter().zip(&self.classes) {
            write_row(f, name, m)?;
        }
        writeln!(f)?;
        writeln!(
            f,
            "{:>12} {:>10} {:>10} {:>10.2} {:>10}",
            "accuracy", "", "", self.accuracy, self.macro_avg.support
        )?;
        write_row(f, "macro avg", &self.macro_avg)?;
        write_row(f, "weighted avg", &self.weighted_avg)
    }
}

fn write_row(f: &mut fmt::Formatter<'_>, name: &str, m: &ClassMetrics) -> fmt::Result {
    writeln!(
        f,
        "{:>12} {:>10.2} {:>10.2} {:>10.2} {:>10}",
        name, m.precision, m.recall, m.f1, m.support
    )
}

/// Result of scoring a model on held-out rows.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Evaluation {
    pub accuracy: f64,
    pub confusion: ConfusionMatrix,
    pub report: ClassificationReport,
}

impl Evaluation {
    pub fn new(actual: &[bool], predicted: &[bool]) -> Self {
        let confusion = ConfusionMatrix::from_predictions(actual, predicted);
        let report = ClassificationReport::from_confusion(&confusion);
        Self {
            accuracy: confusion.accuracy(),
            confusion,
            report,
        }
    }
}

impl fmt::Display for Evaluation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Accuracy:  {}", self.accuracy)?;
        writeln!(f, "Confusion Matrix: \n{}", self.confusion)?;
        write!(f, "Classification Report: \n{}", self.report)
    }
}

fn ratio(num: usize, den: usize) -> f64 {
    if den == 0 { 0.0 } else { num as f64 / den as f64 }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn counts_and_scores_binary_predictions() {
        let actual = [true, true, true, false, false, false, false, true];
        let predicted = [true, true, false, false, false, true, false, true];

        let eval = Evaluation::new(&actual, &predicted);
        assert_eq!(eval.confusion.get(true, true), 3);
        assert_eq!(eval.confusion.get(true, false), 1);
        assert_eq!(eval.confusion.get(false, true), 1);
        assert_eq!(eval.confusion.get(false, false), 3);
        assert!((eval.accuracy - 0.75).abs() < 1e-12);

        let scam = eval.report.classes[1];
        assert!((scam.precision - 0.75).abs() < 1e-12);
        assert!((scam.recall - 0.75).abs() < 1e-12);
        assert!((scam.f1 - 0.75).abs() < 1e-12);
        assert_eq!(scam.support, 4);
    }

    #[test]
    fn weighted_average_follows_support() {
        // 3 legit all correct, 1 scam predicted legit.
        let cm = ConfusionMatrix::from_predictions(
            &[false, false, false, true],
            &[false, false, false, false],
        );
        let report = ClassificationReport::from_confusion(&cm);

        assert_eq!(report.classes[1].precision, 0.0);
        assert_eq!(report.classes[1].recall, 0.0);
        assert!((report.classes[0].precision - 0.75).abs() < 1e-12);
        assert!((report.classes[0].recall - 1.0).abs() < 1e-12);
        assert!((report.weighted_avg.recall - 0.75).abs() < 1e-12);
        assert!((report.macro_avg.recall - 0.5).abs() < 1e-12);
    }

    #[test]
    fn empty_input_scores_zero() {
        let eval = Evaluation::new(&[], &[]);
        assert_eq!(eval.accuracy, 0.0);
        assert_eq!(eval.report.weighted_avg.f1, 0.0);
    }

    #[test]
    fn display_has_all_sections() {
        let eval = Evaluation::new(&[true, false], &[true, true]);
        let text = eval.to_string();
        assert!(text.contains("Accuracy:"));
        assert!(text.contains("Confusion Matrix:"));
        assert!(text.contains("[[0 1]"));
        assert!(text.contains("macro avg"));
        assert!(text.contains("scam"));
    }
}
