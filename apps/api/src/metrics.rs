//! Hold-out evaluation metrics: accuracy, per-class precision/recall/F1
//! and a confusion matrix, each with a text rendering for console reports.

use std::collections::BTreeSet;
use std::fmt;

/// Fraction of pairwise-equal labels. Slices are compared index by index.
pub fn accuracy(actual: &[impl AsRef<str>], predicted: &[impl AsRef<str>]) -> f64 {
    let n = actual.len().min(predicted.len());
    if n == 0 {
        return 0.0;
    }
    let hits = actual
        .iter()
        .zip(predicted)
        .filter(|(a, p)| a.as_ref() == p.as_ref())
        .count();
    hits as f64 / n as f64
}

#[derive(Debug, Clone, PartialEq)]
pub struct ClassMetrics {
    pub label: String,
    pub precision: f64,
    pub recall: f64,
    pub f1: f64,
    pub support: usize,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Averages {
    pub precision: f64,
    pub recall: f64,
    pub f1: f64,
}

/// Per-class metrics over the sorted union of actual and predicted labels.
#[derive(Debug, Clone, PartialEq)]
pub struct ClassificationReport {
    pub classes: Vec<ClassMetrics>,
    pub accuracy: f64,
    pub macro_avg: Averages,
    pub weighted_avg: Averages,
    pub total_support: usize,
}

pub fn classification_report(
    actual: &[impl AsRef<str>],
    predicted: &[impl AsRef<str>],
) -> ClassificationReport {
    let labels = label_union(actual, predicted);
    let index = |s: &str| labels.binary_search_by(|l| l.as_str().cmp(s));

    let k = labels.len();
    let mut true_pos = vec![0usize; k];
    let mut false_pos = vec![0usize; k];
    let mut false_neg = vec![0usize; k];
    let mut support = vec![0usize; k];

    for (a, p) in actual.iter().zip(predicted) {
        let (Ok(ai), Ok(pi)) = (index(a.as_ref()), index(p.as_ref())) else {
            continue;
        };
        support[ai] += 1;
        if ai == pi {
            true_pos[ai] += 1;
        } else {
            false_pos[pi] += 1;
            false_neg[ai] += 1;
        }
    }

    let classes: Vec<ClassMetrics> = labels
        .into_iter()
        .enumerate()
        .map(|(i, label)| {
            let tp = true_pos[i] as f64;
            let precision = safe_div(tp, tp + false_pos[i] as f64);
            let recall = safe_div(tp, tp + false_neg[i] as f64);
            ClassMetrics {
                label,
                precision,
                recall,
                f1: safe_div(2.0 * precision * recall, precision + recall),
                support: support[i],
            }
        })
        .collect();

    let total_support: usize = classes.iter().map(|c| c.support).sum();
    let macro_avg = Averages {
        precision: mean(classes.iter().map(|c| c.precision)),
        recall: mean(classes.iter().map(|c| c.recall)),
        f1: mean(classes.iter().map(|c| c.f1)),
    };
    let weighted_avg = Averages {
        precision: weighted_mean(&classes, total_support, |c| c.precision),
        recall: weighted_mean(&classes, total_support, |c| c.recall),
        f1: weighted_mean(&classes, total_support, |c| c.f1),
    };

    ClassificationReport {
        classes,
        accuracy: accuracy(actual, predicted),
        macro_avg,
        weighted_avg,
        total_support,
    }
}

/// Row = actual class, column = predicted class, over the sorted label union.
#[derive(Debug, Clone, PartialEq)]
pub struct ConfusionMatrix {
    pub labels: Vec<String>,
    pub counts: Vec<Vec<usize>>,
}

pub fn confusion_matrix(
    actual: &[impl AsRef<str>],
    predicted: &[impl AsRef<str>],
) -> ConfusionMatrix {
    let labels = label_union(actual, predicted);
    let index = |s: &str| labels.binary_search_by(|l| l.as_str().cmp(s));

    let k = labels.len();
    let mut counts = vec![vec![0usize; k]; k];
    for (a, p) in actual.iter().zip(predicted) {
        let (Ok(ai), Ok(pi)) = (index(a.as_ref()), index(p.as_ref())) else {
            continue;
        };
        counts[ai][pi] += 1;
    }
    ConfusionMatrix { labels, counts }
}

fn label_union(actual: &[impl AsRef<str>], predicted: &[impl AsRef<str>]) -> Vec<String> {
    actual
        .iter()
        .map(AsRef::as_ref)
        .chain(predicted.iter().map(AsRef::as_ref))
        .collect::<BTreeSet<_>>()
        .into_iter()
        .map(str::to_owned)
        .collect()
}

fn safe_div(numerator: f64, denominator: f64) -> f64 {
    if denominator == 0.0 {
        0.0
    } else {
        numerator / denominator
    }
}

fn mean(values: impl Iterator<Item = f64>) -> f64 {
    let mut sum = 0.0;
    let mut n = 0usize;
    for v in values {
        sum += v;
        n += 1;
    }
    safe_div(sum, n as f64)
}

fn weighted_mean(classes: &[ClassMetrics], total: usize, get: impl Fn(&ClassMetrics) -> f64) -> f64 {
    let sum: f64 = classes.iter().map(|c| get(c) * c.support as f64).sum();
    safe_div(sum, total as f64)
}

impl fmt::Display for ClassificationReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let width = self
            .classes
            .iter()
            .map(|c| c.label.len())
            .chain([12])
            .max()
            .unwrap_or(12);

        write!(
            f,
            "{:>width$}  precision  recall  f1-score  support",
            ""
        )?;
        writeln!(f)?;
        for c in &self.classes {
            writeln!(
                f,
                "{:>width$}  {:>9.2}  {:>6.2}  {:>8.2}  {:>7}",
                c.label, c.precision, c.recall, c.f1, c.support
            )?;
        }
        writeln!(f)?;
        writeln!(
            f,
            "{:>width$}  {:>9}  {:>6}  {:>8.2}  {:>7}",
            "accuracy", "", "", self.accuracy, self.total_support
        )?;
        writeln!(
            f,
            "{:>width$}  {:>9.2}  {:>6.2}  {:>8.2}  {:>7}",
            "macro avg",
            self.macro_avg.precision,
            self.macro_avg.recall,
            self.macro_avg.f1,
            self.total_support
        )?;
        write!(
            f,
            "{:>width$}  {:>9.2}  {:>6.2}  {:>8.2}  {:>7}",
            "weighted avg",
            self.weighted_avg.precision,
            self.weighted_avg.recall,
            self.weighted_avg.f1,
            self.total_support
        )
    }
}

impl fmt::Display for ConfusionMatrix {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:>4}", "")?;
        for i in 0..self.labels.len() {
            write!(f, "{i:>5}")?;
        }
        for (i, row) in self.counts.iter().enumerate() {
            writeln!(f)?;
            write!(f, "{i:>4}")?;
            for count in row {
                write!(f, "{count:>5}")?;
            }
            write!(f, "  {}", self.labels[i])?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const ACTUAL: [&str; 6] = ["a", "a", "a", "b", "b", "c"];
    const PREDICTED: [&str; 6] = ["a", "a", "b", "b", "b", "a"];

    fn close(a: f64, b: f64) -> bool {
        (a - b).abs() < 1e-9
    }

    #[test]
    fn test_accuracy_counts_pairwise_hits() {
        assert!(close(accuracy(&ACTUAL, &PREDICTED), 4.0 / 6.0));
        let empty: [&str; 0] = [];
        assert_eq!(accuracy(&empty, &empty), 0.0);
        assert_eq!(accuracy(&["x"], &["x"]), 1.0);
    }

    #[test]
    fn test_report_per_class_metrics() {
        let report = classification_report(&ACTUAL, &PREDICTED);
        assert_eq!(report.classes.len(), 3);
        assert_eq!(report.total_support, 6);

        let a = &report.classes[0];
        assert_eq!(a.label, "a");
        assert!(close(a.precision, 2.0 / 3.0));
        assert!(close(a.recall, 2.0 / 3.0));
        assert!(close(a.f1, 2.0 / 3.0));
        assert_eq!(a.support, 3);

        let b = &report.classes[1];
        assert!(close(b.precision, 2.0 / 3.0));
        assert!(close(b.recall, 1.0));
        assert!(close(b.f1, 0.8));
        assert_eq!(b.support, 2);

        // Never predicted, so zero-division falls back to 0.
        let c = &report.classes[2];
        assert_eq!(c.precision, 0.0);
        assert_eq!(c.recall, 0.0);
        assert_eq!(c.f1, 0.0);
        assert_eq!(c.support, 1);
    }

    #[test]
    fn test_report_averages() {
        let report = classification_report(&ACTUAL, &PREDICTED);
        assert!(close(report.macro_avg.precision, 4.0 / 9.0));
        assert!(close(report.macro_avg.recall, 5.0 / 9.0));
        assert!(close(report.macro_avg.f1, (2.0 / 3.0 + 0.8) / 3.0));
        assert!(close(report.weighted_avg.precision, 5.0 / 9.0));
        assert!(close(report.weighted_avg.recall, 2.0 / 3.0));
        assert!(close(report.weighted_avg.f1, 0.6));
    }

    #[test]
    fn test_report_includes_labels_only_seen_in_predictions() {
        let report = classification_report(&["a", "a"], &["a", "z"]);
        let z = report.classes.iter().find(|c| c.label == "z").unwrap();
        assert_eq!(z.support, 0);
        assert_eq!(z.precision, 0.0);
    }

    #[test]
    fn test_confusion_matrix_counts() {
        let matrix = confusion_matrix(&ACTUAL, &PREDICTED);
        assert_eq!(matrix.labels, vec!["a", "b", "c"]);
        assert_eq!(
            matrix.counts,
            vec![vec![2, 1, 0], vec![0, 2, 0], vec![1, 0, 0]]
        );
    }

    #[test]
    fn test_display_renders_every_class_row() {
        let report = classification_report(&ACTUAL, &PREDICTED);
        let text = report.to_string();
        assert!(text.contains("precision"));
        assert!(text.contains("macro avg"));
        assert!(text.contains("weighted avg"));
        for label in ["a", "b", "c"] {
            assert!(text.lines().any(|l| l.trim_start().starts_with(label)));
        }

        let matrix = confusion_matrix(&ACTUAL, &PREDICTED).to_string();
        assert!(matrix.contains("  a"));
        assert!(matrix.lines().count() >= 4);
    }
}
