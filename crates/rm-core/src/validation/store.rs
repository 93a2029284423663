use std::collections::BTreeMap;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::debug;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum StoreError {
    #[error("no validation results found")]
    Empty,
    #[error("no results found for test: {0}")]
    UnknownTest(String),
}

/// One scored ground-truth or feedback pair.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ValidationResultRow {
    pub id: u64,
    pub test_name: String,
    pub job_id: String,
    pub resume_id: String,
    pub predicted_score: f64,
    pub ground_truth_score: f64,
    pub confidence_score: f64,
    pub absolute_error: f64,
    pub timestamp: DateTime<Utc>,
}

/// One aggregate metric snapshot for a named test run.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PerformanceMetricRow {
    pub id: u64,
    pub test_name: String,
    pub metric_name: String,
    pub metric_value: f64,
    pub timestamp: DateTime<Utc>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, strum::AsRefStr)]
#[serde(rename_all = "snake_case")]
#[strum(serialize_all = "snake_case")]
pub enum MatchQuality {
    Excellent,
    Good,
    Fair,
    Poor,
}

/// A human judgement of one job/resume pair.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FeedbackSample {
    pub job_id: String,
    pub resume_id: String,
    pub human_score: f64,
    pub comment: String,
    pub quality: MatchQuality,
    pub submitted_at: DateTime<Utc>,
}

impl FeedbackSample {
    pub fn new(
        job_id: impl Into<String>,
        resume_id: impl Into<String>,
        human_score: f64,
        comment: impl Into<String>,
        quality: MatchQuality,
    ) -> Self {
        Self {
            job_id: job_id.into(),
            resume_id: resume_id.into(),
            human_score,
            comment: comment.into(),
            quality,
            submitted_at: Utc::now(),
        }
    }
}

/// Metric values over time, for trend analysis across repeated runs.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MetricTrend {
    pub values: Vec<f64>,
    pub timestamps: Vec<DateTime<Utc>>,
}

/// Append-only validation logs with auto-increment ids.
///
/// Stands in for the external collaborator's `validation_results` and
/// `performance_metrics` tables; rows are either fully visible or not yet
/// appended, so readers need no coordination with the single writer.
#[derive(Debug, Default)]
pub struct ValidationStore {
    results: Vec<ValidationResultRow>,
    metrics: Vec<PerformanceMetricRow>,
}

impl ValidationStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert_result(
        &mut self,
        test_name: &str,
        job_id: &str,
        resume_id: &str,
        predicted_score: f64,
        ground_truth_score: f64,
        confidence_score: f64,
    ) {
        let row = ValidationResultRow {
            id: self.results.len() as u64 + 1,
            test_name: test_name.to_string(),
            job_id: job_id.to_string(),
            resume_id: resume_id.to_string(),
            predicted_score,
            ground_truth_score,
            confidence_score,
            absolute_error: (predicted_score - ground_truth_score).abs(),
            timestamp: Utc::now(),
        };
        self.results.push(row);
    }

    /// Append metric rows, skipping non-finite values the way the metric
    /// math can produce them (zero-variance correlations).
    pub fn insert_metrics(&mut self, test_name: &str, rows: &[(&'static str, f64)]) {
        for (metric_name, metric_value) in rows {
            if !metric_value.is_finite() {
                debug!(test_name, metric_name, "skipping non-finite metric value");
                continue;
            }
            let row = PerformanceMetricRow {
                id: self.metrics.len() as u64 + 1,
                test_name: test_name.to_string(),
                metric_name: (*metric_name).to_string(),
                metric_value: *metric_value,
                timestamp: Utc::now(),
            };
            self.metrics.push(row);
        }
    }

    pub fn results_for(&self, test_name: &str) -> Vec<&ValidationResultRow> {
        self.results
            .iter()
            .filter(|r| r.test_name == test_name)
            .collect()
    }

    pub fn metrics_for(&self, test_name: &str) -> Vec<&PerformanceMetricRow> {
        self.metrics
            .iter()
            .filter(|m| m.test_name == test_name)
            .collect()
    }

    /// Name of the most recently recorded test, by result timestamp.
    pub fn latest_test_name(&self) -> Option<&str> {
        self.results
            .iter()
            .max_by_key(|r| r.timestamp)
            .map(|r| r.test_name.as_str())
    }

    /// Stored mae / rmse / pearson_correlation values in insertion order,
    /// grouped per metric for trend analysis.
    pub fn performance_trends(&self) -> BTreeMap<String, MetricTrend> {
        let mut trends: BTreeMap<String, MetricTrend> = BTreeMap::new();
        for row in &self.metrics {
            if !matches!(
                row.metric_name.as_str(),
                "mae" | "rmse" | "pearson_correlation"
            ) {
                continue;
            }
            let trend = trends.entry(row.metric_name.clone()).or_insert(MetricTrend {
                values: Vec::new(),
                timestamps: Vec::new(),
            });
            trend.values.push(row.metric_value);
            trend.timestamps.push(row.timestamp);
        }
        trends
    }

    pub fn is_empty(&self) -> bool {
        self.results.is_empty()
    }
}
