pub mod confidence;
pub mod details;
pub mod fusion;

use std::collections::{BTreeSet, HashMap, HashSet};

use sha2::{Digest, Sha256};
use tracing::{debug, warn};

use crate::config::EngineConfig;
use crate::skills::extract_skills_with_model;
use crate::skills::phrase_model::{phrase_model_from_env, PhraseModel};
use crate::validation::store::{FeedbackSample, MatchQuality};
use crate::vector::CorpusVectorModel;
use crate::Document;

use confidence::{estimate_confidence, DEFAULT_CONFIDENCE};
use details::{
    analyze_skills, experience_match, generate_recommendations, MatchDetails, MatchStrength,
};

/// The similarity engine: owns the document stores, the shared corpus, and
/// the fitted vector model.
///
/// Every entry point that may (re)fit takes `&mut self`, so the shared
/// mutable fitted state is single-writer by construction; no lock is
/// needed in the synchronous, request-driven execution model.
pub struct MatchEngine {
    config: EngineConfig,
    jobs: HashMap<String, Document>,
    resumes: HashMap<String, Document>,
    normalized_corpus: Vec<String>,
    raw_corpus: Vec<String>,
    corpus_hashes: HashSet<String>,
    vector_model: CorpusVectorModel,
    phrase_model: Option<Box<dyn PhraseModel>>,
    feedback: Vec<FeedbackSample>,
}

impl MatchEngine {
    /// Engine with the phrase model selected from the environment.
    pub fn new(config: EngineConfig) -> Self {
        let phrase_model = phrase_model_from_env();
        Self::with_phrase_model(config, phrase_model)
    }

    /// Engine with an explicit (or absent) phrase model; `None` disables
    /// extraction augmentation without reducing pattern coverage.
    pub fn with_phrase_model(
        config: EngineConfig,
        phrase_model: Option<Box<dyn PhraseModel>>,
    ) -> Self {
        let vector_model = CorpusVectorModel::new(&config);
        Self {
            config,
            jobs: HashMap::new(),
            resumes: HashMap::new(),
            normalized_corpus: Vec::new(),
            raw_corpus: Vec::new(),
            corpus_hashes: HashSet::new(),
            vector_model,
            phrase_model,
            feedback: Vec::new(),
        }
    }

    /// Store a job posting: raw + normalized text, corpus membership with
    /// exact-text dedup, and fitted-state invalidation.
    pub fn ingest_job(&mut self, id: impl Into<String>, text: &str) {
        let id = id.into();
        let document = Document::new(text);
        self.add_to_corpus(&document);
        debug!(job_id = %id, chars = text.len(), "ingested job description");
        self.jobs.insert(id, document);
    }

    pub fn ingest_resume(&mut self, id: impl Into<String>, text: &str) {
        let id = id.into();
        let document = Document::new(text);
        self.add_to_corpus(&document);
        debug!(resume_id = %id, chars = text.len(), "ingested resume");
        self.resumes.insert(id, document);
    }

    fn add_to_corpus(&mut self, document: &Document) {
        let hash = text_hash(&document.normalized_text);
        if self.corpus_hashes.insert(hash) {
            self.normalized_corpus.push(document.normalized_text.clone());
            self.raw_corpus.push(document.raw_text.clone());
            self.vector_model.invalidate();
        }
    }

    /// Idempotent corpus refit: a no-op while the model is fitted or the
    /// corpus holds fewer than two documents.
    pub fn refit_if_needed(&mut self) {
        if !self.vector_model.is_fitted() && self.normalized_corpus.len() >= 2 {
            self.vector_model
                .fit(&self.normalized_corpus, &self.raw_corpus);
        }
    }

    /// Fused similarity in [0, 1]; 0.0 when either document is missing.
    pub fn score(&mut self, job_id: &str, resume_id: &str) -> f64 {
        self.score_with_confidence(job_id, resume_id).0
    }

    /// Fused similarity plus a confidence estimate, both in [0, 1].
    pub fn score_with_confidence(&mut self, job_id: &str, resume_id: &str) -> (f64, f64) {
        if !self.jobs.contains_key(job_id) || !self.resumes.contains_key(resume_id) {
            warn!(%job_id, %resume_id, "missing document for similarity query");
            return (0.0, DEFAULT_CONFIDENCE);
        }

        self.refit_if_needed();
        let job = &self.jobs[job_id];
        let resume = &self.resumes[resume_id];

        let components = fusion::compute_components(
            &self.vector_model,
            self.phrase_model.as_deref(),
            job,
            resume,
            self.config.section_max_features,
        );
        let score = fusion::fuse(&components, self.config.low_content_threshold);
        let confidence = estimate_confidence(
            &components,
            self.vector_model.is_fitted(),
            job.normalized_token_count(),
            resume.normalized_token_count(),
        );

        debug!(%job_id, %resume_id, score, confidence, "similarity computed");
        (score, confidence)
    }

    /// Full match explanation; `None` when either document is missing.
    pub fn details(&mut self, job_id: &str, resume_id: &str) -> Option<MatchDetails> {
        if !self.jobs.contains_key(job_id) || !self.resumes.contains_key(resume_id) {
            warn!(%job_id, %resume_id, "missing document for match details");
            return None;
        }

        self.refit_if_needed();
        let job = &self.jobs[job_id];
        let resume = &self.resumes[resume_id];

        let components = fusion::compute_components(
            &self.vector_model,
            self.phrase_model.as_deref(),
            job,
            resume,
            self.config.section_max_features,
        );
        let overall_score = fusion::fuse(&components, self.config.low_content_threshold);
        let confidence = estimate_confidence(
            &components,
            self.vector_model.is_fitted(),
            job.normalized_token_count(),
            resume.normalized_token_count(),
        );

        let job_skills = extract_skills_with_model(&job.raw_text, self.phrase_model.as_deref());
        let resume_skills =
            extract_skills_with_model(&resume.raw_text, self.phrase_model.as_deref());
        let skills_analysis = analyze_skills(&job_skills, &resume_skills);
        let recommendations = generate_recommendations(
            &skills_analysis.matched_skills,
            &skills_analysis.missing_skills,
            &skills_analysis.high_priority_missing,
        );

        Some(MatchDetails {
            overall_score,
            confidence,
            component_scores: components,
            experience_analysis: experience_match(&job.raw_text, &resume.raw_text),
            match_strength: MatchStrength::from_score(overall_score),
            skills_analysis,
            recommendations,
        })
    }

    /// Skill extraction with this engine's phrase model.
    pub fn extract_skills(&self, text: &str) -> BTreeSet<String> {
        extract_skills_with_model(text, self.phrase_model.as_deref())
    }

    /// Append a human judgement for later cross-validation.
    pub fn record_feedback(
        &mut self,
        job_id: impl Into<String>,
        resume_id: impl Into<String>,
        human_score: f64,
        comment: impl Into<String>,
        quality: MatchQuality,
    ) {
        let sample = FeedbackSample::new(job_id, resume_id, human_score, comment, quality);
        debug!(
            job_id = %sample.job_id,
            resume_id = %sample.resume_id,
            human_score,
            "feedback recorded"
        );
        self.feedback.push(sample);
    }

    pub fn feedback_samples(&self) -> &[FeedbackSample] {
        &self.feedback
    }

    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    pub fn job(&self, id: &str) -> Option<&Document> {
        self.jobs.get(id)
    }

    pub fn resume(&self, id: &str) -> Option<&Document> {
        self.resumes.get(id)
    }

    pub fn corpus_len(&self) -> usize {
        self.normalized_corpus.len()
    }

    pub fn is_fitted(&self) -> bool {
        self.vector_model.is_fitted()
    }
}

/// Truncated SHA-256 of a normalized text, for exact-match corpus dedup.
fn text_hash(text: &str) -> String {
    let mut hasher = Sha256::new();
    hasher.update(text.as_bytes());
    let bytes = hasher.finalize();
    let mut hex: String = bytes.iter().map(|b| format!("{:02x}", b)).collect();
    hex.truncate(16);
    hex
}
