pub mod patterns;
pub mod phrase_model;
pub mod weights;

use std::collections::BTreeSet;

use patterns::{symbolic_matches, CATEGORY_PATTERNS, CERT_PATTERNS};
use phrase_model::PhraseModel;

use crate::text::stopwords::is_stopword;

/// Technical markers that qualify a noun phrase as a skill candidate.
const TECH_MARKERS: [&str; 8] = ["dev", "script", "code", "data", "web", "api", "sql", "ml"];

const LEADING_ARTICLES: [&str; 5] = ["the ", "and ", "or ", "in ", "of "];

const MAX_SKILL_CHARS: usize = 50;

/// Pattern-based skill extraction over the curated category vocabulary.
///
/// Case-insensitive; results are lowercased, trimmed, and deduplicated.
pub fn extract_skills(text: &str) -> BTreeSet<String> {
    extract_skills_with_model(text, None)
}

/// Pattern extraction plus best-effort entity/phrase augmentation when a
/// model is available.
pub fn extract_skills_with_model(
    text: &str,
    model: Option<&dyn PhraseModel>,
) -> BTreeSet<String> {
    let text_lower = text.to_lowercase();
    let mut candidates: BTreeSet<String> = BTreeSet::new();

    for pattern in CATEGORY_PATTERNS.iter() {
        for m in pattern.find_iter(&text_lower) {
            let skill = m.as_str().trim();
            if !skill.is_empty() {
                candidates.insert(skill.to_string());
            }
        }
    }

    for skill in symbolic_matches(&text_lower) {
        candidates.insert(skill);
    }

    if let Some(model) = model {
        augment_from_model(model, text, &mut candidates);
    }

    for pattern in CERT_PATTERNS.iter() {
        for caps in pattern.captures_iter(&text_lower) {
            if let Some(m) = caps.get(1) {
                let skill: String = m.as_str().trim().chars().take(MAX_SKILL_CHARS).collect();
                if !skill.is_empty() {
                    candidates.insert(skill);
                }
            }
        }
    }

    candidates
        .into_iter()
        .filter(|skill| keep_skill(skill))
        .collect()
}

fn augment_from_model(model: &dyn PhraseModel, text: &str, out: &mut BTreeSet<String>) {
    for entity in model.entities(text) {
        let surface = entity.to_lowercase();
        let surface = surface.trim();
        let chars = surface.chars().count();
        if (3..=20).contains(&chars)
            && !surface.chars().any(|c| c.is_ascii_digit())
            && !is_stopword(surface)
        {
            out.insert(surface.to_string());
        }
    }

    for phrase in model.noun_phrases(text) {
        let phrase = phrase.trim();
        let words = phrase.split_whitespace().count();
        let chars = phrase.chars().count();
        if (1..=2).contains(&words)
            && (3..=25).contains(&chars)
            && TECH_MARKERS.iter().any(|m| phrase.contains(m))
        {
            out.insert(phrase.to_string());
        }
    }
}

fn keep_skill(skill: &str) -> bool {
    let chars = skill.chars().count();
    (2..=30).contains(&chars)
        && !skill.chars().all(|c| c.is_ascii_digit())
        && !is_stopword(skill)
        && !LEADING_ARTICLES.iter().any(|a| skill.starts_with(a))
        && skill.matches(' ').count() <= 4
}

#[cfg(test)]
mod tests {
    use super::*;
    use phrase_model::HeuristicPhraseModel;

    const JOB: &str = "Senior Python Developer. Requires Django, Flask, PostgreSQL, \
                       AWS (EC2, S3), Docker and Kubernetes. Agile team, Git workflow.";

    #[test]
    fn extracts_curated_vocabulary() {
        let skills = extract_skills(JOB);
        for expected in ["python", "django", "flask", "postgresql", "aws", "docker", "kubernetes", "agile", "git"] {
            assert!(skills.contains(expected), "missing {expected} in {skills:?}");
        }
    }

    #[test]
    fn extraction_is_case_insensitive() {
        let upper = extract_skills(&JOB.to_uppercase());
        assert_eq!(extract_skills(JOB), upper);
    }

    #[test]
    fn extracts_symbolic_language_names() {
        let skills = extract_skills("C++ and C# experience, some .NET Core");
        assert!(skills.contains("c++"));
        assert!(skills.contains("c#"));
        assert!(skills.contains(".net"));
    }

    #[test]
    fn extracts_certifications_and_degrees() {
        let skills = extract_skills("AWS Certified Developer. Holds a Computer Science degree.");
        assert!(skills.contains("aws certified developer"));
        assert!(skills.contains("computer science degree"));
    }

    #[test]
    fn overlong_certification_titles_are_dropped() {
        // The 30-char cap applies to certification matches as well.
        let skills = extract_skills("AWS Certified Solutions Architect Professional");
        assert!(!skills.iter().any(|s| s.starts_with("aws certified solutions")));
    }

    #[test]
    fn filters_degenerate_candidates() {
        let skills = extract_skills("12345 a the python");
        assert!(skills.contains("python"));
        assert!(!skills.contains("12345"));
        assert!(!skills.contains("a"));
        assert!(!skills.contains("the"));
    }

    #[test]
    fn model_augmentation_adds_marker_phrases() {
        let model = HeuristicPhraseModel;
        let skills = extract_skills_with_model(
            "Designed the data pipeline and the api gateway integration",
            Some(&model),
        );
        assert!(skills.contains("data pipeline"));
        assert!(skills.contains("api gateway"));
    }

    #[test]
    fn empty_text_extracts_nothing() {
        assert!(extract_skills("").is_empty());
    }
}
