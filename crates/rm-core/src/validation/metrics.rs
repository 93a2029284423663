use serde::{Deserialize, Serialize};

/// Aggregate accuracy metrics for one validation run.
///
/// Correlations are NaN when an input has zero variance; persistence skips
/// non-finite values, mirroring how the store treats them.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ValidationMetrics {
    pub mae: f64,
    pub rmse: f64,
    pub r2_score: f64,
    pub pearson_correlation: f64,
    pub spearman_correlation: f64,
    pub accuracy_10_percent: f64,
    pub accuracy_20_percent: f64,
    pub sample_size: usize,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub average_confidence: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub confidence_calibration: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub high_confidence_accuracy: Option<f64>,
}

impl ValidationMetrics {
    /// (name, value) pairs for persistence as performance-metric rows.
    pub fn rows(&self) -> Vec<(&'static str, f64)> {
        let mut rows = vec![
            ("mae", self.mae),
            ("rmse", self.rmse),
            ("r2_score", self.r2_score),
            ("pearson_correlation", self.pearson_correlation),
            ("spearman_correlation", self.spearman_correlation),
            ("accuracy_10_percent", self.accuracy_10_percent),
            ("accuracy_20_percent", self.accuracy_20_percent),
            ("sample_size", self.sample_size as f64),
        ];
        if let Some(value) = self.average_confidence {
            rows.push(("average_confidence", value));
        }
        if let Some(value) = self.confidence_calibration {
            rows.push(("confidence_calibration", value));
        }
        if let Some(value) = self.high_confidence_accuracy {
            rows.push(("high_confidence_accuracy", value));
        }
        rows
    }
}

/// Compute the full metric set over parallel prediction/ground-truth
/// slices, with the confidence block when confidences are supplied.
pub fn compute_metrics(
    predictions: &[f64],
    ground_truth: &[f64],
    confidence: Option<&[f64]>,
) -> ValidationMetrics {
    let n = predictions.len() as f64;
    let errors: Vec<f64> = predictions
        .iter()
        .zip(ground_truth)
        .map(|(p, t)| (p - t).abs())
        .collect();

    let mae = errors.iter().sum::<f64>() / n;
    let rmse = (errors.iter().map(|e| e * e).sum::<f64>() / n).sqrt();

    let truth_mean = mean(ground_truth);
    let ss_res: f64 = predictions
        .iter()
        .zip(ground_truth)
        .map(|(p, t)| (t - p).powi(2))
        .sum();
    let ss_tot: f64 = ground_truth.iter().map(|t| (t - truth_mean).powi(2)).sum();
    let r2_score = if ss_tot > 0.0 {
        1.0 - ss_res / ss_tot
    } else {
        f64::NAN
    };

    let accuracy_10_percent = errors.iter().filter(|e| **e <= 0.1).count() as f64 / n;
    let accuracy_20_percent = errors.iter().filter(|e| **e <= 0.2).count() as f64 / n;

    let mut metrics = ValidationMetrics {
        mae,
        rmse,
        r2_score,
        pearson_correlation: pearson(predictions, ground_truth),
        spearman_correlation: spearman(predictions, ground_truth),
        accuracy_10_percent,
        accuracy_20_percent,
        sample_size: predictions.len(),
        average_confidence: None,
        confidence_calibration: None,
        high_confidence_accuracy: None,
    };

    if let Some(confidence) = confidence {
        let accuracy_per_sample: Vec<f64> = errors.iter().map(|e| 1.0 - e).collect();
        metrics.average_confidence = Some(mean(confidence));
        metrics.confidence_calibration = Some(pearson(confidence, &accuracy_per_sample));

        let high: Vec<f64> = confidence
            .iter()
            .zip(&accuracy_per_sample)
            .filter(|(c, _)| **c > 0.7)
            .map(|(_, a)| *a)
            .collect();
        metrics.high_confidence_accuracy = Some(if high.is_empty() { 0.0 } else { mean(&high) });
    }

    metrics
}

fn mean(values: &[f64]) -> f64 {
    values.iter().sum::<f64>() / values.len() as f64
}

/// Pearson correlation; NaN when either side has zero variance.
pub fn pearson(a: &[f64], b: &[f64]) -> f64 {
    let n = a.len() as f64;
    let mean_a = mean(a);
    let mean_b = mean(b);

    let cov: f64 = a
        .iter()
        .zip(b)
        .map(|(x, y)| (x - mean_a) * (y - mean_b))
        .sum::<f64>()
        / n;
    let var_a = a.iter().map(|x| (x - mean_a).powi(2)).sum::<f64>() / n;
    let var_b = b.iter().map(|y| (y - mean_b).powi(2)).sum::<f64>() / n;

    cov / (var_a.sqrt() * var_b.sqrt())
}

/// Spearman rank correlation with average ranks for ties.
pub fn spearman(a: &[f64], b: &[f64]) -> f64 {
    pearson(&ranks(a), &ranks(b))
}

fn ranks(values: &[f64]) -> Vec<f64> {
    let mut order: Vec<usize> = (0..values.len()).collect();
    order.sort_by(|&i, &j| values[i].partial_cmp(&values[j]).unwrap_or(std::cmp::Ordering::Equal));

    let mut ranks = vec![0.0; values.len()];
    let mut i = 0;
    while i < order.len() {
        let mut j = i;
        while j + 1 < order.len() && values[order[j + 1]] == values[order[i]] {
            j += 1;
        }
        // Average rank across the tie group; ranks are 1-based.
        let rank = (i + j) as f64 / 2.0 + 1.0;
        for &idx in &order[i..=j] {
            ranks[idx] = rank;
        }
        i = j + 1;
    }
    ranks
}
