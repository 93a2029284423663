use super::fusion::ComponentScores;

/// Confidence reported when no estimate is computed (the interface contract
/// for callers that only use the plain score path).
pub const DEFAULT_CONFIDENCE: f64 = 0.5;

/// Normalized token count at which input length stops limiting confidence.
const ADEQUATE_TOKENS: usize = 100;

/// Estimate how trustworthy a similarity score is, in [0, 1].
///
/// Three signals: whether the shared corpus spaces were used (pairwise
/// fallback fits are noisier), how much the five components agree (their
/// standard deviation), and whether both documents carry enough text to
/// support the vocabulary-based components.
pub(crate) fn estimate_confidence(
    components: &ComponentScores,
    corpus_fitted: bool,
    job_tokens: usize,
    resume_tokens: usize,
) -> f64 {
    let values = components.as_array();
    let mean = values.iter().sum::<f64>() / values.len() as f64;
    let variance = values.iter().map(|v| (v - mean).powi(2)).sum::<f64>() / values.len() as f64;
    let spread = variance.sqrt();

    let agreement = 1.0 - (2.0 * spread).min(1.0);
    let shorter = job_tokens.min(resume_tokens) as f64;
    let length_factor = (shorter / ADEQUATE_TOKENS as f64).min(1.0);
    let fitted_bonus = if corpus_fitted { 1.0 } else { 0.0 };

    let confidence = 0.35 + 0.20 * fitted_bonus + 0.25 * agreement + 0.20 * length_factor;
    confidence.clamp(0.0, 1.0)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn uniform(value: f64) -> ComponentScores {
        ComponentScores {
            content_similarity: value,
            semantic_similarity: value,
            skill_similarity: value,
            keyword_similarity: value,
            context_similarity: value,
        }
    }

    #[test]
    fn confidence_is_bounded() {
        let spread = ComponentScores {
            content_similarity: 1.0,
            semantic_similarity: 0.0,
            skill_similarity: 1.0,
            keyword_similarity: 0.0,
            context_similarity: 0.5,
        };
        for (fitted, job, resume) in [(true, 0, 0), (false, 500, 500), (true, 500, 3)] {
            let c = estimate_confidence(&spread, fitted, job, resume);
            assert!((0.0..=1.0).contains(&c));
        }
    }

    #[test]
    fn agreement_raises_confidence() {
        let agreeing = estimate_confidence(&uniform(0.7), true, 200, 200);
        let disagreeing = estimate_confidence(
            &ComponentScores {
                content_similarity: 0.9,
                semantic_similarity: 0.1,
                skill_similarity: 0.8,
                keyword_similarity: 0.2,
                context_similarity: 0.5,
            },
            true,
            200,
            200,
        );
        assert!(agreeing > disagreeing);
    }

    #[test]
    fn fitted_corpus_raises_confidence() {
        let fitted = estimate_confidence(&uniform(0.5), true, 200, 200);
        let unfitted = estimate_confidence(&uniform(0.5), false, 200, 200);
        assert!(fitted > unfitted);
    }

    #[test]
    fn short_documents_lower_confidence() {
        let long = estimate_confidence(&uniform(0.5), true, 200, 200);
        let short = estimate_confidence(&uniform(0.5), true, 200, 10);
        assert!(long > short);
    }

    #[test]
    fn perfect_agreement_with_fit_and_length_is_maximal() {
        let c = estimate_confidence(&uniform(0.8), true, 150, 150);
        assert!((c - 1.0).abs() < 1e-12);
    }
}
