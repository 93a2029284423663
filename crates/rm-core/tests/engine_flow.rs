use rm_core::validation::{generate_report, run_ground_truth_validation};
use rm_core::{EngineConfig, MatchEngine, MatchQuality, MatchRecord, ValidationStore};

const JOB: &str = "Senior Backend Engineer\n\nRequirements\nPython, Django, PostgreSQL, AWS, Docker\n5+ years of experience required\nBachelor degree preferred";

const STRONG_RESUME: &str = "Alex Rivera - Backend Engineer\n\nExperience\n7 years of experience building Django services on AWS\nPostgreSQL tuning, Docker deployments\n\nSkills\nPython, Django, PostgreSQL, AWS, Docker, Redis";

const WEAK_RESUME: &str = "Morgan Blake - Marketing Coordinator\n\nExperience\n4 years of experience running social campaigns\n\nSkills\nCopywriting, branding, analytics dashboards";

#[test]
fn ingest_score_details_round_trip() {
    let mut engine = MatchEngine::with_phrase_model(EngineConfig::default(), None);
    engine.ingest_job("job-1", JOB);
    engine.ingest_resume("resume-strong", STRONG_RESUME);
    engine.ingest_resume("resume-weak", WEAK_RESUME);

    let strong = engine.score("job-1", "resume-strong");
    let weak = engine.score("job-1", "resume-weak");
    assert!((0.0..=1.0).contains(&strong));
    assert!((0.0..=1.0).contains(&weak));
    assert!(strong > weak);

    let details = engine
        .details("job-1", "resume-strong")
        .expect("documents are ingested");
    assert!(details
        .skills_analysis
        .matched_skills
        .iter()
        .any(|s| s == "python"));
    assert!(details.skills_analysis.skill_match_ratio > 0.5);
    assert_eq!(details.experience_analysis.job_years, Some(5));
    assert_eq!(details.experience_analysis.resume_years, Some(7));

    // Role swap is a different query; it must stay bounded, and the skill
    // Jaccard term is permutation-invariant by construction.
    engine.ingest_job("job-as-resume", STRONG_RESUME);
    engine.ingest_resume("resume-as-job", JOB);
    let swapped = engine.score("job-as-resume", "resume-as-job");
    assert!((0.0..=1.0).contains(&swapped));
}

#[test]
fn match_record_carries_percentages_for_the_service_layer() {
    let mut engine = MatchEngine::with_phrase_model(EngineConfig::default(), None);
    engine.ingest_job("job-1", JOB);
    engine.ingest_resume("resume-1", STRONG_RESUME);

    let details = engine.details("job-1", "resume-1").expect("ingested");
    let record = MatchRecord::from_details("job-1", "resume-1", details);

    assert_eq!(record.job_id, "job-1");
    assert!((record.match_percentage - record.similarity_score * 100.0).abs() < 0.005);
    assert_eq!(record.match_category, record.details.match_strength);
}

#[test]
fn validation_flow_produces_report_and_trends() {
    let mut engine = MatchEngine::with_phrase_model(EngineConfig::default(), None);
    let mut store = ValidationStore::new();

    let metrics = run_ground_truth_validation(&mut engine, &mut store, "flow_test")
        .expect("validation runs");
    assert_eq!(metrics.sample_size, 4);
    assert!(metrics.mae.is_finite());

    let report = generate_report(&store, None).expect("results recorded");
    assert_eq!(report.summary.test_name, "flow_test");
    assert_eq!(report.detailed_results.len(), 4);
    assert!(report.performance_metrics.contains_key("mae"));

    // A second run appends fresh metric rows, visible as a trend.
    run_ground_truth_validation(&mut engine, &mut store, "flow_test_2").expect("second run");
    let trends = store.performance_trends();
    assert_eq!(trends["mae"].values.len(), 2);
}

#[test]
fn feedback_accumulates_for_cross_validation() {
    let mut engine = MatchEngine::with_phrase_model(EngineConfig::default(), None);
    engine.ingest_job("job-1", JOB);
    engine.ingest_resume("resume-1", STRONG_RESUME);

    engine.record_feedback("job-1", "resume-1", 0.85, "great fit", MatchQuality::Excellent);
    assert_eq!(engine.feedback_samples().len(), 1);
    assert_eq!(engine.feedback_samples()[0].human_score, 0.85);
}
