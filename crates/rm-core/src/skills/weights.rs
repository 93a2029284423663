use std::sync::LazyLock;

pub const HIGH_TIER_WEIGHT: f64 = 3.0;
pub const MEDIUM_TIER_WEIGHT: f64 = 2.0;
pub const DEFAULT_TIER_WEIGHT: f64 = 1.0;

/// Skills at or above this weight count as high priority in match details.
pub const HIGH_PRIORITY_THRESHOLD: f64 = 2.5;

/// Market-critical skills. Membership is by substring, so "mysql" inherits
/// the "sql" tier and "react native" the "react" tier.
static HIGH_VALUE_SKILLS: LazyLock<Vec<&'static str>> = LazyLock::new(|| {
    vec![
        "python",
        "java",
        "javascript",
        "react",
        "node.js",
        "aws",
        "docker",
        "kubernetes",
        "machine learning",
        "deep learning",
        "tensorflow",
        "pytorch",
        "sql",
        "mongodb",
        "microservices",
        "devops",
        "ci/cd",
        "agile",
        "scrum",
        "leadership",
        "architect",
    ]
});

static MEDIUM_VALUE_SKILLS: LazyLock<Vec<&'static str>> = LazyLock::new(|| {
    vec![
        "html",
        "css",
        "git",
        "linux",
        "testing",
        "debugging",
        "problem solving",
        "communication",
        "teamwork",
        "project management",
    ]
});

/// Tier weight for a single skill string.
pub fn skill_weight(skill: &str) -> f64 {
    let lower = skill.to_lowercase();
    if HIGH_VALUE_SKILLS.iter().any(|s| lower.contains(s)) {
        HIGH_TIER_WEIGHT
    } else if MEDIUM_VALUE_SKILLS.iter().any(|s| lower.contains(s)) {
        MEDIUM_TIER_WEIGHT
    } else {
        DEFAULT_TIER_WEIGHT
    }
}
