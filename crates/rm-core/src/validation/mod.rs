pub mod ground_truth;
pub mod metrics;
pub mod store;

use chrono::{DateTime, Utc};
use rand::seq::SliceRandom;
use rand::Rng;
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::{info, warn};

use crate::engine::MatchEngine;
use ground_truth::ground_truth_cases;
use metrics::{compute_metrics, ValidationMetrics};
use store::{FeedbackSample, StoreError, ValidationResultRow, ValidationStore};

#[derive(Debug, Error)]
pub enum ValidationError {
    #[error("insufficient data for cross-validation (minimum {minimum} samples, got {actual})")]
    InsufficientSamples { minimum: usize, actual: usize },
    #[error(transparent)]
    Store(#[from] StoreError),
}

impl ValidationError {
    /// The `{"error": <message>}` shape the service layer serves instead of
    /// propagating a failure into the scoring path.
    pub fn to_error_payload(&self) -> serde_json::Value {
        serde_json::json!({ "error": self.to_string() })
    }
}

/// Score every curated ground-truth pair, persist one result row per pair
/// and the aggregate metrics under `test_name`.
pub fn run_ground_truth_validation(
    engine: &mut MatchEngine,
    store: &mut ValidationStore,
    test_name: &str,
) -> Result<ValidationMetrics, ValidationError> {
    let cases = ground_truth_cases();

    let mut pair_ids = Vec::with_capacity(cases.len());
    for (i, case) in cases.iter().enumerate() {
        let job_id = format!("{}_job_{}", case.category, i);
        let resume_id = format!("{}_resume_{}", case.category, i);
        engine.ingest_job(&job_id, case.job_description);
        engine.ingest_resume(&resume_id, case.resume);
        pair_ids.push((job_id, resume_id));
    }

    let mut predictions = Vec::with_capacity(cases.len());
    let mut expectations = Vec::with_capacity(cases.len());
    let mut confidences = Vec::with_capacity(cases.len());

    for (case, (job_id, resume_id)) in cases.iter().zip(&pair_ids) {
        let (predicted, confidence) = engine.score_with_confidence(job_id, resume_id);
        store.insert_result(
            test_name,
            job_id,
            resume_id,
            predicted,
            case.expected_score,
            confidence,
        );

        info!(
            %job_id,
            predicted,
            expected = case.expected_score,
            confidence,
            "ground truth case scored"
        );

        predictions.push(predicted);
        expectations.push(case.expected_score);
        confidences.push(confidence);
    }

    let metrics = compute_metrics(&predictions, &expectations, Some(&confidences));
    store.insert_metrics(test_name, &metrics.rows());
    info!(test_name, mae = metrics.mae, "ground truth validation completed");

    Ok(metrics)
}

/// Five-fold evaluation of the engine against accumulated human feedback.
pub fn run_cross_validation(
    engine: &mut MatchEngine,
    samples: &[FeedbackSample],
) -> Result<ValidationMetrics, ValidationError> {
    let mut rng = rand::thread_rng();
    run_cross_validation_with_rng(engine, samples, &mut rng)
}

/// Deterministic variant for callers that seed the shuffle.
pub fn run_cross_validation_with_rng(
    engine: &mut MatchEngine,
    samples: &[FeedbackSample],
    rng: &mut impl Rng,
) -> Result<ValidationMetrics, ValidationError> {
    let minimum = engine.config().min_cross_validation_samples;
    if samples.len() < minimum {
        warn!(
            actual = samples.len(),
            minimum, "not enough feedback samples for cross-validation"
        );
        return Err(ValidationError::InsufficientSamples {
            minimum,
            actual: samples.len(),
        });
    }

    let mut shuffled: Vec<&FeedbackSample> = samples.iter().collect();
    shuffled.shuffle(rng);

    let folds = engine.config().cross_validation_folds;
    let fold_size = shuffled.len() / folds;

    let mut predictions = Vec::with_capacity(shuffled.len());
    let mut human_scores = Vec::with_capacity(shuffled.len());

    for fold in 0..folds {
        let start = fold * fold_size;
        let end = if fold + 1 == folds {
            shuffled.len()
        } else {
            start + fold_size
        };

        for sample in &shuffled[start..end] {
            predictions.push(engine.score(&sample.job_id, &sample.resume_id));
            human_scores.push(sample.human_score);
        }
    }

    let metrics = compute_metrics(&predictions, &human_scores, None);
    info!(
        sample_size = metrics.sample_size,
        mae = metrics.mae,
        "cross-validation completed"
    );
    Ok(metrics)
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ValidationReport {
    pub summary: ReportSummary,
    pub performance_metrics: std::collections::BTreeMap<String, f64>,
    pub error_distribution: ErrorDistribution,
    pub detailed_results: Vec<ValidationResultRow>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ReportSummary {
    pub test_name: String,
    pub total_samples: usize,
    pub average_error: f64,
    pub max_error: f64,
    pub min_error: f64,
    pub average_confidence: f64,
    pub timestamp: DateTime<Utc>,
}

/// Absolute-error histogram over the quality bands.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct ErrorDistribution {
    pub excellent_predictions: usize,
    pub good_predictions: usize,
    pub fair_predictions: usize,
    pub poor_predictions: usize,
}

/// Summarize one test run; defaults to the most recently recorded test.
pub fn generate_report(
    store: &ValidationStore,
    test_name: Option<&str>,
) -> Result<ValidationReport, ValidationError> {
    let test_name = match test_name {
        Some(name) => name.to_string(),
        None => store
            .latest_test_name()
            .ok_or(StoreError::Empty)?
            .to_string(),
    };

    let rows = store.results_for(&test_name);
    if rows.is_empty() {
        return Err(StoreError::UnknownTest(test_name).into());
    }

    let count = rows.len() as f64;
    let errors: Vec<f64> = rows.iter().map(|r| r.absolute_error).collect();
    let summary = ReportSummary {
        test_name: test_name.clone(),
        total_samples: rows.len(),
        average_error: errors.iter().sum::<f64>() / count,
        max_error: errors.iter().cloned().fold(f64::MIN, f64::max),
        min_error: errors.iter().cloned().fold(f64::MAX, f64::min),
        average_confidence: rows.iter().map(|r| r.confidence_score).sum::<f64>() / count,
        timestamp: rows[0].timestamp,
    };

    let error_distribution = ErrorDistribution {
        excellent_predictions: errors.iter().filter(|e| **e <= 0.05).count(),
        good_predictions: errors.iter().filter(|e| **e > 0.05 && **e <= 0.15).count(),
        fair_predictions: errors.iter().filter(|e| **e > 0.15 && **e <= 0.30).count(),
        poor_predictions: errors.iter().filter(|e| **e > 0.30).count(),
    };

    let performance_metrics = store
        .metrics_for(&test_name)
        .into_iter()
        .map(|m| (m.metric_name.clone(), m.metric_value))
        .collect();

    Ok(ValidationReport {
        summary,
        performance_metrics,
        error_distribution,
        detailed_results: rows.into_iter().cloned().collect(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::EngineConfig;
    use crate::validation::store::MatchQuality;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    fn engine() -> MatchEngine {
        MatchEngine::with_phrase_model(EngineConfig::default(), None)
    }

    #[test]
    fn ground_truth_run_persists_results_and_metrics() {
        let mut engine = engine();
        let mut store = ValidationStore::new();

        let metrics =
            run_ground_truth_validation(&mut engine, &mut store, "gt_run").expect("run succeeds");

        assert_eq!(metrics.sample_size, 4);
        assert_eq!(store.results_for("gt_run").len(), 4);
        assert!(metrics.average_confidence.is_some());
        assert!(store
            .metrics_for("gt_run")
            .iter()
            .any(|m| m.metric_name == "mae"));
        for row in store.results_for("gt_run") {
            assert!((0.0..=1.0).contains(&row.predicted_score));
        }
    }

    #[test]
    fn ground_truth_predictions_preserve_expected_rank_order() {
        let mut engine = engine();
        let mut store = ValidationStore::new();
        run_ground_truth_validation(&mut engine, &mut store, "rank").expect("run succeeds");

        let rows = store.results_for("rank");
        // Cases are recorded from excellent down to poor; predictions must
        // be monotonic in the expected scores even when absolute values
        // differ.
        for pair in rows.windows(2) {
            assert!(
                pair[0].predicted_score > pair[1].predicted_score,
                "rank order violated: {} ({:.3}) vs {} ({:.3})",
                pair[0].job_id,
                pair[0].predicted_score,
                pair[1].job_id,
                pair[1].predicted_score
            );
        }
    }

    #[test]
    fn cross_validation_requires_ten_samples() {
        let mut engine = engine();
        let samples = vec![
            FeedbackSample::new("j", "r", 0.5, "too few", MatchQuality::Fair);
            3
        ];

        let err = run_cross_validation(&mut engine, &samples).unwrap_err();
        assert!(matches!(
            err,
            ValidationError::InsufficientSamples { minimum: 10, actual: 3 }
        ));
        assert_eq!(err.to_error_payload()["error"].as_str().map(|s| s.contains("minimum 10")), Some(true));
    }

    #[test]
    fn cross_validation_covers_every_sample_once() {
        let mut engine = engine();
        engine.ingest_job("j1", "Senior Python developer, Django and AWS, 5 years experience");
        engine.ingest_resume("r1", "Python engineer with Django and AWS, 6 years experience");
        engine.ingest_resume("r2", "Graphic designer, Photoshop and Illustrator");

        let mut samples = Vec::new();
        for i in 0..11 {
            let resume_id = if i % 2 == 0 { "r1" } else { "r2" };
            let score = if i % 2 == 0 { 0.8 } else { 0.1 };
            samples.push(FeedbackSample::new(
                "j1",
                resume_id,
                score,
                "seeded",
                MatchQuality::Fair,
            ));
        }

        let mut rng = StdRng::seed_from_u64(7);
        let metrics = run_cross_validation_with_rng(&mut engine, &samples, &mut rng)
            .expect("enough samples");
        assert_eq!(metrics.sample_size, 11);
        assert!(metrics.mae.is_finite());
    }

    #[test]
    fn report_defaults_to_latest_test() {
        let mut engine = engine();
        let mut store = ValidationStore::new();
        run_ground_truth_validation(&mut engine, &mut store, "first").expect("run succeeds");
        run_ground_truth_validation(&mut engine, &mut store, "second").expect("run succeeds");

        let report = generate_report(&store, None).expect("results exist");
        assert_eq!(report.summary.test_name, "second");
        assert_eq!(report.summary.total_samples, 4);
        assert_eq!(report.detailed_results.len(), 4);
        let total_binned = report.error_distribution.excellent_predictions
            + report.error_distribution.good_predictions
            + report.error_distribution.fair_predictions
            + report.error_distribution.poor_predictions;
        assert_eq!(total_binned, 4);
    }

    #[test]
    fn report_errors_are_structured_payloads() {
        let store = ValidationStore::new();
        let err = generate_report(&store, None).unwrap_err();
        assert_eq!(
            err.to_error_payload(),
            serde_json::json!({ "error": "no validation results found" })
        );

        let err = generate_report(&store, Some("missing")).unwrap_err();
        assert!(err.to_string().contains("missing"));
    }
}
