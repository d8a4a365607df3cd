//! End-to-end tests running the full parse -> match -> coverage -> ATS
//! pipeline over fixture files, plus library persistence round-trips.

use co_apply::library::{Achievement, AchievementCategory, AchievementLibrary, CandidateProfile};
use co_apply::processing::ats::AtsAnalyzer;
use co_apply::processing::job::{JobParser, JobRecord};
use co_apply::processing::matcher::AchievementMatcher;
use std::fs;
use std::path::Path;

fn load_fixture(name: &str) -> String {
    let path = Path::new("tests/fixtures").join(name);
    fs::read_to_string(&path).unwrap_or_else(|_| panic!("Missing fixture {}", path.display()))
}

fn parse_fixture_job() -> JobRecord {
    let text = load_fixture("sample_job.txt");
    let parser = JobParser::new().expect("parser construction");
    parser.parse(&text, "acme_backend", "Senior Backend Engineer", "Acme Corp")
}

fn achievement(
    id: &str,
    title: &str,
    description: &str,
    category: AchievementCategory,
    skills: &[&str],
    keywords: &[&str],
) -> Achievement {
    Achievement {
        id: id.to_string(),
        title: title.to_string(),
        description: description.to_string(),
        category,
        skills: skills.iter().map(|s| s.to_string()).collect(),
        keywords: keywords.iter().map(|s| s.to_string()).collect(),
        impact: None,
        metrics: None,
        date: None,
        context: None,
    }
}

#[test]
fn test_parse_fixture_job_sections() {
    let job = parse_fixture_job();

    assert_eq!(job.requirements.len(), 3);
    assert!(job.requirements[0].contains("Python and PostgreSQL"));
    assert_eq!(job.responsibilities.len(), 3);
    assert!(job.responsibilities[1].contains("Mentor engineers"));
}

#[test]
fn test_parse_fixture_job_skill_classification() {
    let job = parse_fixture_job();

    for skill in ["Python", "PostgreSQL", "Kubernetes"] {
        assert!(
            job.skills_required.iter().any(|s| s == skill),
            "{} should be required, got {:?}",
            skill,
            job.skills_required
        );
    }
    for skill in ["Docker", "AWS", "Terraform"] {
        assert!(
            job.skills_preferred.iter().any(|s| s == skill),
            "{} should be preferred, got {:?}",
            skill,
            job.skills_preferred
        );
    }
    // Buckets never overlap.
    for skill in &job.skills_required {
        assert!(!job.skills_preferred.contains(skill));
    }
}

#[test]
fn test_parse_fixture_job_metadata() {
    let job = parse_fixture_job();

    let experience = job.experience.expect("experience detected");
    assert!(experience.starts_with("5+"));
    let education = job.education.expect("education detected");
    assert!(education.contains("Computer Science"));
    let salary = job.salary_range.expect("salary detected");
    assert!(salary.contains("140,000"));
    assert_eq!(job.job_type.as_deref(), Some("full-time"));
    assert!(job.description.contains("payments platform"));
}

#[test]
fn test_job_record_save_and_load() {
    let dir = tempfile::tempdir().expect("temp dir");
    let path = dir.path().join("jobs").join("acme_backend.json");

    let job = parse_fixture_job();
    job.save(&path).expect("save job");

    let loaded = JobRecord::load(&path).expect("load job");
    assert_eq!(loaded, job);
}

#[test]
fn test_match_pipeline_orders_by_relevance() {
    let job = parse_fixture_job();
    let achievements = vec![
        achievement(
            "ach_1",
            "Payments API in Python",
            "Built a Python service on PostgreSQL handling settlement traffic",
            AchievementCategory::Technical,
            &["Python", "PostgreSQL", "Kubernetes"],
            &["payments", "settlement"],
        ),
        achievement(
            "ach_2",
            "Conference talk",
            "Spoke about team rituals",
            AchievementCategory::Leadership,
            &["public speaking"],
            &["speaking"],
        ),
    ];

    let matcher = AchievementMatcher::new();
    let matches = matcher.match_achievements(&achievements, &job, None);

    assert_eq!(matches.len(), 2);
    assert_eq!(matches[0].achievement.id, "ach_1");
    assert!(matches[0].relevance_score > matches[1].relevance_score);
    for result in &matches {
        assert!((0.0..=1.0).contains(&result.relevance_score));
    }
    assert!(matches[0].matched_skills.contains(&"python".to_string()));
}

#[test]
fn test_coverage_report_tracks_missing_skills() {
    let job = parse_fixture_job();
    let achievements = vec![achievement(
        "ach_1",
        "Payments API in Python",
        "Built a Python service on PostgreSQL",
        AchievementCategory::Technical,
        &["Python", "PostgreSQL"],
        &["payments"],
    )];

    let matcher = AchievementMatcher::new();
    let matches = matcher.match_achievements(&achievements, &job, None);
    let report = matcher.coverage_report(&matches, &job);

    assert!(report.required_skills_coverage > 0.0);
    assert!(report.required_skills_coverage < 100.0);
    assert!(report
        .missing_required_skills
        .iter()
        .any(|s| s == "kubernetes"));
    assert!(!report.recommendation.is_empty());
}

#[test]
fn test_ats_pipeline_against_fixture_document() {
    let job = parse_fixture_job();
    let document = load_fixture("sample_document.txt");

    let mut all_keywords = job.skills_required.clone();
    all_keywords.extend(job.skills_preferred.iter().cloned());

    let analyzer = AtsAnalyzer::new();
    let result = analyzer.analyze(&all_keywords, &document, Some(&job.skills_required));

    assert!(result.match_score > 0.0);
    assert!(result.match_score < 100.0);
    assert!(result.matched_keywords.iter().any(|k| k == "Python"));
    assert!(result.matched_keywords.iter().any(|k| k == "AWS"));
    assert!(result.missing_keywords.iter().any(|k| k == "Kubernetes"));
    assert_eq!(result.skill_coverage.get("Python"), Some(&true));
    assert_eq!(result.skill_coverage.get("Kubernetes"), Some(&false));
    assert!(!result.recommendations.is_empty());
}

#[test]
fn test_format_check_on_fixture_document() {
    let document = load_fixture("sample_document.txt");

    let analyzer = AtsAnalyzer::new();
    let check = analyzer.check_format(&document);

    // The letter names experience, education, skills, and summary in prose.
    assert!(check
        .found_standard_sections
        .iter()
        .any(|s| s == "experience"));
    assert!(check.found_standard_sections.iter().any(|s| s == "skills"));
}

#[test]
fn test_library_round_trip() {
    let dir = tempfile::tempdir().expect("temp dir");
    let path = dir.path().join("achievements.json");

    let mut library = AchievementLibrary::open(&path).expect("open empty library");
    library
        .set_profile(CandidateProfile {
            name: "Jane Doe".to_string(),
            email: "jane@example.com".to_string(),
            phone: "+31 6 00000000".to_string(),
            location: Some("Amsterdam".to_string()),
            linkedin: None,
            github: None,
            website: None,
            summary: None,
        })
        .expect("set profile");
    library
        .add_achievement(achievement(
            "ach_1",
            "Payments API in Python",
            "Built a Python service on PostgreSQL",
            AchievementCategory::Technical,
            &["Python", "PostgreSQL"],
            &["payments"],
        ))
        .expect("add achievement");

    let reopened = AchievementLibrary::open(&path).expect("reopen library");
    assert_eq!(reopened.achievements.len(), 1);
    assert_eq!(reopened.achievements[0].id, "ach_1");
    assert_eq!(
        reopened.profile.as_ref().map(|p| p.name.as_str()),
        Some("Jane Doe")
    );

    let hits = reopened.search_by_keywords(&["payments".to_string()]);
    assert_eq!(hits.len(), 1);
    let skills = reopened.all_skills();
    assert_eq!(skills, vec!["PostgreSQL".to_string(), "Python".to_string()]);
}

#[test]
fn test_full_pipeline_from_fixture_to_recommendations() {
    let job = parse_fixture_job();
    let achievements = vec![achievement(
        "ach_1",
        "Platform migration to Kubernetes",
        "Moved settlement services onto Kubernetes with Docker and Terraform",
        AchievementCategory::Project,
        &["Kubernetes", "Docker", "Terraform"],
        &["migration", "settlement"],
    )];

    let matcher = AchievementMatcher::new();
    let matches = matcher.match_achievements(&achievements, &job, Some(5));
    assert_eq!(matches.len(), 1);
    assert!(matches[0].relevance_score > 0.0);

    let report = matcher.coverage_report(&matches, &job);
    assert!(report.missing_required_skills.iter().any(|s| s == "python"));

    let document = load_fixture("sample_document.txt");
    let analyzer = AtsAnalyzer::new();
    let result = analyzer.analyze(&job.skills_required, &document, None);
    assert!(result.skill_coverage.is_empty());
    assert!(result
        .recommendations
        .iter()
        .any(|r| r.contains("Kubernetes")));
}
