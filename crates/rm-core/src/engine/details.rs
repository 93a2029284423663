use std::collections::BTreeSet;

use chrono::{DateTime, Utc};
use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Serialize};
use strum::AsRefStr;

use super::fusion::ComponentScores;
use crate::skills::weights::{skill_weight, HIGH_PRIORITY_THRESHOLD};

/// "5 years of experience", "3+ yrs exp", etc. Group 1 is the year count.
static EXPERIENCE_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(\d+)[\s+-]*(?:years?|yrs?)[\s+-]*(?:of\s+)?(?:experience|exp)").unwrap()
});

/// Full per-pair match explanation, recomputed on every query.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MatchDetails {
    pub overall_score: f64,
    pub confidence: f64,
    pub component_scores: ComponentScores,
    pub skills_analysis: SkillAnalysis,
    pub experience_analysis: ExperienceAnalysis,
    pub match_strength: MatchStrength,
    pub recommendations: Vec<Recommendation>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SkillAnalysis {
    pub job_skills: Vec<String>,
    pub resume_skills: Vec<String>,
    pub matched_skills: Vec<String>,
    pub missing_skills: Vec<String>,
    pub extra_skills: Vec<String>,
    pub high_priority_matched: Vec<String>,
    pub high_priority_missing: Vec<String>,
    pub skill_match_ratio: f64,
    pub skill_coverage: f64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ExperienceAnalysis {
    pub status: ExperienceStatus,
    pub job_years: Option<u32>,
    pub resume_years: Option<u32>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, AsRefStr)]
#[serde(rename_all = "snake_case")]
#[strum(serialize_all = "snake_case")]
pub enum ExperienceStatus {
    MeetsRequirement,
    CloseMatch,
    BelowRequirement,
    Unknown,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, AsRefStr)]
#[serde(rename_all = "snake_case")]
#[strum(serialize_all = "snake_case")]
pub enum MatchStrength {
    Excellent,
    Good,
    Fair,
    Poor,
    VeryPoor,
}

impl MatchStrength {
    /// Five-band categorization, inclusive at the lower edge of each band.
    pub fn from_score(score: f64) -> Self {
        if score >= 0.8 {
            Self::Excellent
        } else if score >= 0.6 {
            Self::Good
        } else if score >= 0.4 {
            Self::Fair
        } else if score >= 0.2 {
            Self::Poor
        } else {
            Self::VeryPoor
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, AsRefStr)]
#[serde(rename_all = "snake_case")]
#[strum(serialize_all = "snake_case")]
pub enum RecommendationKind {
    CriticalSkills,
    SkillGap,
    Strengths,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, AsRefStr)]
#[serde(rename_all = "snake_case")]
#[strum(serialize_all = "snake_case")]
pub enum Priority {
    High,
    Medium,
    Positive,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Recommendation {
    pub kind: RecommendationKind,
    pub message: String,
    pub priority: Priority,
}

/// Flattened record the service layer persists and displays per match.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MatchRecord {
    pub job_id: String,
    pub resume_id: String,
    pub similarity_score: f64,
    pub confidence_score: f64,
    pub match_percentage: f64,
    pub confidence_percentage: f64,
    pub match_category: MatchStrength,
    pub details: MatchDetails,
    pub matched_at: DateTime<Utc>,
}

impl MatchRecord {
    pub fn from_details(
        job_id: impl Into<String>,
        resume_id: impl Into<String>,
        details: MatchDetails,
    ) -> Self {
        Self {
            job_id: job_id.into(),
            resume_id: resume_id.into(),
            similarity_score: details.overall_score,
            confidence_score: details.confidence,
            match_percentage: round2(details.overall_score * 100.0),
            confidence_percentage: round2(details.confidence * 100.0),
            match_category: details.match_strength,
            matched_at: Utc::now(),
            details,
        }
    }
}

fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}

/// Set arithmetic over extracted skills plus high-priority subsets and the
/// match/coverage ratios.
pub fn analyze_skills(
    job_skills: &BTreeSet<String>,
    resume_skills: &BTreeSet<String>,
) -> SkillAnalysis {
    let matched: Vec<String> = job_skills.intersection(resume_skills).cloned().collect();
    let missing: Vec<String> = job_skills.difference(resume_skills).cloned().collect();
    let extra: Vec<String> = resume_skills.difference(job_skills).cloned().collect();

    let high_priority = |skills: &[String]| -> Vec<String> {
        skills
            .iter()
            .filter(|s| skill_weight(s) >= HIGH_PRIORITY_THRESHOLD)
            .cloned()
            .collect()
    };

    let union_len = job_skills.union(resume_skills).count();
    let skill_match_ratio = if job_skills.is_empty() {
        0.0
    } else {
        matched.len() as f64 / job_skills.len() as f64
    };
    let skill_coverage = if union_len == 0 {
        0.0
    } else {
        matched.len() as f64 / union_len as f64
    };

    SkillAnalysis {
        job_skills: job_skills.iter().cloned().collect(),
        resume_skills: resume_skills.iter().cloned().collect(),
        high_priority_matched: high_priority(&matched),
        high_priority_missing: high_priority(&missing),
        matched_skills: matched,
        missing_skills: missing,
        extra_skills: extra,
        skill_match_ratio,
        skill_coverage,
    }
}

/// Compare the maximum years-of-experience figure found in each text.
pub fn experience_match(job_text: &str, resume_text: &str) -> ExperienceAnalysis {
    let job_years = extract_experience_years(job_text);
    let resume_years = extract_experience_years(resume_text);

    let status = match (job_years, resume_years) {
        (Some(job), Some(resume)) => {
            if resume >= job {
                ExperienceStatus::MeetsRequirement
            } else if resume as f64 >= job as f64 * 0.8 {
                ExperienceStatus::CloseMatch
            } else {
                ExperienceStatus::BelowRequirement
            }
        }
        _ => ExperienceStatus::Unknown,
    };

    ExperienceAnalysis {
        status,
        job_years,
        resume_years,
    }
}

fn extract_experience_years(text: &str) -> Option<u32> {
    let lowered = text.to_lowercase();
    EXPERIENCE_RE
        .captures_iter(&lowered)
        .filter_map(|caps| caps.get(1)?.as_str().parse::<u32>().ok())
        .max()
}

/// Up to three prioritized recommendations, worst problems first.
/// Named skills are ordered by tier weight, then alphabetically.
pub fn generate_recommendations(
    matched: &[String],
    missing: &[String],
    high_priority_missing: &[String],
) -> Vec<Recommendation> {
    let mut recommendations = Vec::new();

    if !high_priority_missing.is_empty() {
        recommendations.push(Recommendation {
            kind: RecommendationKind::CriticalSkills,
            message: format!(
                "Critical skills missing: {}",
                top_skills(high_priority_missing).join(", ")
            ),
            priority: Priority::High,
        });
    }

    if missing.len() > matched.len() {
        recommendations.push(Recommendation {
            kind: RecommendationKind::SkillGap,
            message: "Significant skill gap detected. Consider additional training or experience."
                .to_string(),
            priority: Priority::Medium,
        });
    }

    if !matched.is_empty() {
        recommendations.push(Recommendation {
            kind: RecommendationKind::Strengths,
            message: format!("Strong match in: {}", top_skills(matched).join(", ")),
            priority: Priority::Positive,
        });
    }

    recommendations
}

fn top_skills(skills: &[String]) -> Vec<String> {
    let mut ranked: Vec<&String> = skills.iter().collect();
    ranked.sort_by(|a, b| {
        skill_weight(b)
            .partial_cmp(&skill_weight(a))
            .unwrap_or(std::cmp::Ordering::Equal)
            .then_with(|| a.cmp(b))
    });
    ranked.into_iter().take(3).cloned().collect()
}
