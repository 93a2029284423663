use std::collections::HashSet;

use crate::text::stopwords::is_stopword;

/// Cosine similarity clamped to [0, 1].
///
/// TF-IDF vectors are non-negative, so the clamp only guards floating-point
/// drift; a dimension mismatch or zero vector yields 0.0 instead of an error.
pub fn cosine_similarity(a: &[f64], b: &[f64]) -> f64 {
    if a.len() != b.len() {
        tracing::warn!(
            a_len = a.len(),
            b_len = b.len(),
            "vector dimension mismatch; returning zero similarity"
        );
        return 0.0;
    }

    let dot: f64 = a.iter().zip(b.iter()).map(|(x, y)| x * y).sum();
    let norm_a: f64 = a.iter().map(|x| x * x).sum::<f64>().sqrt();
    let norm_b: f64 = b.iter().map(|x| x * x).sum::<f64>().sqrt();

    if norm_a == 0.0 || norm_b == 0.0 {
        return 0.0;
    }

    (dot / (norm_a * norm_b)).clamp(0.0, 1.0)
}

/// Last-resort lexical similarity: Jaccard ratio of the stopword-filtered
/// token sets. Every vector-space computation degrades to this, so scoring
/// never raises on malformed or degenerate input.
pub fn lexical_overlap(text_a: &str, text_b: &str) -> f64 {
    let tokens_a = overlap_tokens(text_a);
    let tokens_b = overlap_tokens(text_b);

    if tokens_a.is_empty() || tokens_b.is_empty() {
        return 0.0;
    }

    let intersection = tokens_a.intersection(&tokens_b).count() as f64;
    let union = tokens_a.union(&tokens_b).count() as f64;
    intersection / union
}

fn overlap_tokens(text: &str) -> HashSet<String> {
    text.split_whitespace()
        .map(|t| t.to_lowercase())
        .filter(|t| t.chars().count() > 2 && !is_stopword(t))
        .collect()
}
