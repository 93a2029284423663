use std::str::FromStr;

/// Tuning knobs for the similarity engine.
///
/// Defaults match the values the scoring weights were tuned against; the
/// `RM_*` environment variables override individual fields for deployment
/// experiments without a rebuild.
#[derive(Debug, Clone)]
pub struct EngineConfig {
    /// Vocabulary bound for the content space (normalized text).
    pub content_max_features: usize,
    /// Terms present in more than this fraction of documents are dropped
    /// from the content space.
    pub content_max_df: f64,
    /// Vocabulary bound for the semantic space (raw text).
    pub semantic_max_features: usize,
    pub semantic_max_df: f64,
    /// Vocabulary bound for the throwaway per-pair semantic fit.
    pub pair_semantic_max_features: usize,
    /// Vocabulary bound for per-section similarity in the context component.
    pub section_max_features: usize,
    /// Below this content similarity the fusion shifts weight onto skills
    /// and keywords.
    pub low_content_threshold: f64,
    /// Minimum accumulated feedback samples before cross-validation runs.
    pub min_cross_validation_samples: usize,
    pub cross_validation_folds: usize,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            content_max_features: 5000,
            content_max_df: 0.9,
            semantic_max_features: 3000,
            semantic_max_df: 0.85,
            pair_semantic_max_features: 2000,
            section_max_features: 1000,
            low_content_threshold: 0.1,
            min_cross_validation_samples: 10,
            cross_validation_folds: 5,
        }
    }
}

impl EngineConfig {
    /// Defaults overlaid with any `RM_*` environment overrides.
    pub fn from_env() -> Self {
        let defaults = Self::default();
        Self {
            content_max_features: env_parse("RM_CONTENT_MAX_FEATURES")
                .unwrap_or(defaults.content_max_features),
            content_max_df: env_parse("RM_CONTENT_MAX_DF").unwrap_or(defaults.content_max_df),
            semantic_max_features: env_parse("RM_SEMANTIC_MAX_FEATURES")
                .unwrap_or(defaults.semantic_max_features),
            semantic_max_df: env_parse("RM_SEMANTIC_MAX_DF").unwrap_or(defaults.semantic_max_df),
            pair_semantic_max_features: env_parse("RM_PAIR_SEMANTIC_MAX_FEATURES")
                .unwrap_or(defaults.pair_semantic_max_features),
            section_max_features: env_parse("RM_SECTION_MAX_FEATURES")
                .unwrap_or(defaults.section_max_features),
            low_content_threshold: env_parse("RM_LOW_CONTENT_THRESHOLD")
                .unwrap_or(defaults.low_content_threshold),
            min_cross_validation_samples: env_parse("RM_MIN_CV_SAMPLES")
                .unwrap_or(defaults.min_cross_validation_samples),
            cross_validation_folds: defaults.cross_validation_folds,
        }
    }
}

fn env_parse<T: FromStr>(key: &str) -> Option<T> {
    std::env::var(key).ok().and_then(|raw| raw.parse().ok())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_are_sane() {
        let config = EngineConfig::default();
        assert_eq!(config.content_max_features, 5000);
        assert_eq!(config.semantic_max_features, 3000);
        assert!(config.content_max_df > config.low_content_threshold);
        assert_eq!(config.cross_validation_folds, 5);
    }

    #[test]
    fn from_env_falls_back_to_defaults() {
        let config = EngineConfig::from_env();
        assert_eq!(
            config.min_cross_validation_samples,
            EngineConfig::default().min_cross_validation_samples
        );
    }
}
