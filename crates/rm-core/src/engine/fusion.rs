use std::collections::{BTreeSet, HashSet};

use serde::{Deserialize, Serialize};

use crate::skills::phrase_model::PhraseModel;
use crate::skills::weights::skill_weight;
use crate::skills::extract_skills_with_model;
use crate::text::sections::split_sections;
use crate::vector::similarity::cosine_similarity;
use crate::vector::tfidf::{TfidfParams, TfidfSpace};
use crate::vector::{CorpusVectorModel, SpaceKind};
use crate::Document;

/// Fusion weights over the five component scores.
#[derive(Debug, Clone, Copy)]
pub struct FusionWeights {
    pub content: f64,
    pub skills: f64,
    pub semantic: f64,
    pub keywords: f64,
    pub context: f64,
}

impl FusionWeights {
    pub fn sum(&self) -> f64 {
        self.content + self.skills + self.semantic + self.keywords + self.context
    }
}

/// Balanced weighting when lexical content overlap carries signal.
pub const STANDARD_WEIGHTS: FusionWeights = FusionWeights {
    content: 0.30,
    skills: 0.30,
    semantic: 0.20,
    keywords: 0.15,
    context: 0.05,
};

/// Weighting when content similarity is weak; skills and structural
/// keywords dominate so sparse-vocabulary pairs still separate.
pub const LOW_CONTENT_WEIGHTS: FusionWeights = FusionWeights {
    content: 0.15,
    skills: 0.40,
    semantic: 0.15,
    keywords: 0.25,
    context: 0.05,
};

/// Structural keywords compared across both raw texts by substring match.
const STRUCTURAL_KEYWORDS: [&str; 18] = [
    "experience",
    "years",
    "senior",
    "junior",
    "lead",
    "manager",
    "required",
    "preferred",
    "must",
    "should",
    "bachelor",
    "master",
    "degree",
    "certification",
    "remote",
    "onsite",
    "full-time",
    "part-time",
];

/// The five component scores feeding fusion, each in [0, 1].
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ComponentScores {
    pub content_similarity: f64,
    pub semantic_similarity: f64,
    pub skill_similarity: f64,
    pub keyword_similarity: f64,
    pub context_similarity: f64,
}

impl ComponentScores {
    pub fn as_array(&self) -> [f64; 5] {
        [
            self.content_similarity,
            self.semantic_similarity,
            self.skill_similarity,
            self.keyword_similarity,
            self.context_similarity,
        ]
    }
}

pub(crate) fn compute_components(
    model: &CorpusVectorModel,
    phrase_model: Option<&dyn PhraseModel>,
    job: &Document,
    resume: &Document,
    section_max_features: usize,
) -> ComponentScores {
    ComponentScores {
        content_similarity: model.similarity(
            SpaceKind::Content,
            &job.normalized_text,
            &resume.normalized_text,
        ),
        semantic_similarity: model.similarity(SpaceKind::Semantic, &job.raw_text, &resume.raw_text),
        skill_similarity: skill_similarity(phrase_model, &job.raw_text, &resume.raw_text),
        keyword_similarity: keyword_similarity(&job.raw_text, &resume.raw_text),
        context_similarity: context_similarity(&job.raw_text, &resume.raw_text, section_max_features),
    }
}

/// Weighted combination of the five components plus the piecewise boost.
pub(crate) fn fuse(components: &ComponentScores, low_content_threshold: f64) -> f64 {
    let weights = if components.content_similarity < low_content_threshold {
        LOW_CONTENT_WEIGHTS
    } else {
        STANDARD_WEIGHTS
    };

    let fused = weights.content * components.content_similarity
        + weights.skills * components.skill_similarity
        + weights.semantic * components.semantic_similarity
        + weights.keywords * components.keyword_similarity
        + weights.context * components.context_similarity;

    apply_score_boost(fused)
}

/// Monotonic piecewise boost: raw fused scores cluster low for weak
/// matches, and a mild lift below 0.5 improves separation between "no
/// match" and "weak match" without distorting strong matches.
pub fn apply_score_boost(score: f64) -> f64 {
    let boosted = if score < 0.1 {
        score * 1.2
    } else if score < 0.5 {
        score * 1.1
    } else if score < 0.8 {
        score
    } else {
        score * 1.05
    };
    boosted.clamp(0.0, 1.0)
}

/// Weighted skill overlap blended with the plain Jaccard ratio.
/// Returns 0 when the job text yields no skills.
pub(crate) fn skill_similarity(
    phrase_model: Option<&dyn PhraseModel>,
    job_text: &str,
    resume_text: &str,
) -> f64 {
    if job_text.is_empty() || resume_text.is_empty() {
        return 0.0;
    }
    let job_skills = extract_skills_with_model(job_text, phrase_model);
    if job_skills.is_empty() {
        return 0.0;
    }
    let resume_skills = extract_skills_with_model(resume_text, phrase_model);

    weighted_skill_overlap(&job_skills, &resume_skills)
}

pub(crate) fn weighted_skill_overlap(
    job_skills: &BTreeSet<String>,
    resume_skills: &BTreeSet<String>,
) -> f64 {
    if job_skills.is_empty() {
        return 0.0;
    }

    let total_weight: f64 = job_skills.iter().map(|s| skill_weight(s)).sum();
    let matched_weight: f64 = job_skills
        .iter()
        .filter(|s| resume_skills.contains(*s))
        .map(|s| skill_weight(s))
        .sum();
    let weighted_ratio = if total_weight > 0.0 {
        matched_weight / total_weight
    } else {
        0.0
    };

    let intersection = job_skills.intersection(resume_skills).count() as f64;
    let union = job_skills.union(resume_skills).count() as f64;
    let jaccard_ratio = if union > 0.0 { intersection / union } else { 0.0 };

    0.7 * weighted_ratio + 0.3 * jaccard_ratio
}

/// Jaccard ratio over the structural keywords present in each text.
/// Neutral 0.5 when the job text contains none of them.
pub(crate) fn keyword_similarity(job_text: &str, resume_text: &str) -> f64 {
    if job_text.is_empty() || resume_text.is_empty() {
        return 0.0;
    }
    let job_lower = job_text.to_lowercase();
    let resume_lower = resume_text.to_lowercase();

    let job_keywords: HashSet<&str> = STRUCTURAL_KEYWORDS
        .iter()
        .copied()
        .filter(|k| job_lower.contains(k))
        .collect();
    if job_keywords.is_empty() {
        return 0.5;
    }

    let resume_keywords: HashSet<&str> = STRUCTURAL_KEYWORDS
        .iter()
        .copied()
        .filter(|k| resume_lower.contains(k))
        .collect();

    let intersection = job_keywords.intersection(&resume_keywords).count() as f64;
    let union = job_keywords.union(&resume_keywords).count() as f64;
    if union > 0.0 {
        intersection / union
    } else {
        0.0
    }
}

/// Average per-section similarity over the sections the job text defines.
/// A section missing from the resume, or one whose one-off fit yields no
/// features, contributes 0.
pub(crate) fn context_similarity(
    job_text: &str,
    resume_text: &str,
    section_max_features: usize,
) -> f64 {
    if job_text.is_empty() || resume_text.is_empty() {
        return 0.0;
    }
    let job_sections = split_sections(job_text);
    if job_sections.is_empty() {
        return 0.0;
    }
    let resume_sections = split_sections(resume_text);

    let total_sections = job_sections.len() as f64;
    let mut accumulated = 0.0;

    for (name, job_body) in &job_sections {
        let Some(resume_body) = resume_sections.get(name) else {
            continue;
        };
        if job_body.is_empty() || resume_body.is_empty() {
            continue;
        }

        let space = TfidfSpace::fit(
            TfidfParams::new(section_max_features, 1.0, false),
            &[job_body.as_str(), resume_body.as_str()],
        );
        if space.is_empty() {
            continue;
        }
        let va = space.transform(job_body);
        let vb = space.transform(resume_body);
        accumulated += cosine_similarity(&va, &vb);
    }

    accumulated / total_sections
}
