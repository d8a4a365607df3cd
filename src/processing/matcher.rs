//! Achievement-to-job matching and scoring
//!
//! Additive weighted model over four components: required skills (40),
//! preferred skills (20), keyword overlap (30), and category-title
//! affinity (10). Denominators are recomputed per achievement and only
//! components the job actually supplies count toward the maximum.

use crate::library::{Achievement, AchievementCategory};
use crate::processing::job::JobRecord;
use crate::processing::keywords::KeywordExtractor;
use log::debug;
use serde::Serialize;
use std::collections::{HashMap, HashSet};

const REQUIRED_SKILL_WEIGHT: f64 = 40.0;
const PREFERRED_SKILL_WEIGHT: f64 = 20.0;
const KEYWORD_WEIGHT: f64 = 30.0;
const CATEGORY_WEIGHT: f64 = 10.0;

/// Result of matching one achievement against one job. Created fresh per
/// pair and never mutated; re-run matching to get updated results.
#[derive(Debug, Clone, Serialize)]
pub struct MatchResult<'a> {
    pub achievement: &'a Achievement,
    /// Normalized relevance in [0, 1]
    pub relevance_score: f64,
    pub matched_skills: Vec<String>,
    pub matched_keywords: Vec<String>,
    pub reasons: Vec<String>,
}

/// Aggregate view of how well a set of matches covers a job's skills.
#[derive(Debug, Clone, Serialize)]
pub struct CoverageReport {
    pub required_skills_coverage: f64,
    pub preferred_skills_coverage: f64,
    pub matched_skills_count: usize,
    pub matched_keywords_count: usize,
    pub missing_required_skills: Vec<String>,
    pub missing_preferred_skills: Vec<String>,
    pub recommendation: String,
}

pub struct AchievementMatcher {
    keywords: KeywordExtractor,
}

impl Default for AchievementMatcher {
    fn default() -> Self {
        Self::new()
    }
}

impl AchievementMatcher {
    pub fn new() -> Self {
        Self {
            keywords: KeywordExtractor::new(),
        }
    }

    /// Score every achievement against the job, stable-sorted by relevance
    /// descending (ties keep input order). `top_n` truncates the result.
    pub fn match_achievements<'a>(
        &self,
        achievements: &'a [Achievement],
        job: &JobRecord,
        top_n: Option<usize>,
    ) -> Vec<MatchResult<'a>> {
        let job_keywords = self.extract_job_keywords(job);
        debug!(
            "matching {} achievements against job '{}' ({} keywords)",
            achievements.len(),
            job.id,
            job_keywords.len()
        );

        let mut results: Vec<MatchResult<'a>> = achievements
            .iter()
            .map(|achievement| self.score_achievement(achievement, job, &job_keywords))
            .collect();

        results.sort_by(|a, b| b.relevance_score.total_cmp(&a.relevance_score));

        if let Some(n) = top_n {
            results.truncate(n);
        }
        results
    }

    /// Union of the job's skill lists with capitalized-phrase and acronym
    /// tokens from every requirement and responsibility, deduplicated
    /// case-insensitively (first form wins).
    pub fn extract_job_keywords(&self, job: &JobRecord) -> Vec<String> {
        let mut keywords: Vec<String> = Vec::new();
        keywords.extend(job.skills_required.iter().cloned());
        keywords.extend(job.skills_preferred.iter().cloned());

        for req in &job.requirements {
            keywords.extend(self.keywords.proper_noun_keywords(req));
        }
        for resp in &job.responsibilities {
            keywords.extend(self.keywords.proper_noun_keywords(resp));
        }

        let mut seen = HashSet::new();
        keywords.retain(|kw| seen.insert(kw.to_lowercase()));
        keywords
    }

    fn score_achievement<'a>(
        &self,
        achievement: &'a Achievement,
        job: &JobRecord,
        job_keywords: &[String],
    ) -> MatchResult<'a> {
        let mut score = 0.0;
        let mut max_score = 0.0;
        let mut matched_skills = Vec::new();
        let mut matched_keywords = Vec::new();
        let mut reasons = Vec::new();

        let achievement_skills: Vec<String> =
            achievement.skills.iter().map(|s| s.to_lowercase()).collect();

        // Required skills, full weight
        let required_lower: Vec<String> =
            job.skills_required.iter().map(|s| s.to_lowercase()).collect();
        if !required_lower.is_empty() {
            max_score += REQUIRED_SKILL_WEIGHT;
            for skill in &achievement_skills {
                if required_lower.contains(skill) {
                    matched_skills.push(skill.clone());
                    score += REQUIRED_SKILL_WEIGHT / required_lower.len() as f64;
                }
            }
            if !matched_skills.is_empty() {
                reasons.push(format!("Matches {} required skills", matched_skills.len()));
            }
        }

        // Preferred skills, half weight
        let preferred_lower: Vec<String> =
            job.skills_preferred.iter().map(|s| s.to_lowercase()).collect();
        if !preferred_lower.is_empty() {
            max_score += PREFERRED_SKILL_WEIGHT;
            let mut preferred_matches = 0;
            for skill in &achievement_skills {
                if preferred_lower.contains(skill) {
                    preferred_matches += 1;
                    score += PREFERRED_SKILL_WEIGHT / preferred_lower.len() as f64;
                }
            }
            if preferred_matches > 0 {
                reasons.push(format!("Matches {} preferred skills", preferred_matches));
            }
        }

        // Keyword overlap against the achievement's keywords plus its
        // title and description text
        let achievement_keywords: Vec<String> =
            achievement.keywords.iter().map(|k| k.to_lowercase()).collect();
        let achievement_text =
            format!("{} {}", achievement.title, achievement.description).to_lowercase();

        if !job_keywords.is_empty() {
            max_score += KEYWORD_WEIGHT;
            for keyword in job_keywords {
                let keyword_lower = keyword.to_lowercase();
                if achievement_keywords.contains(&keyword_lower)
                    || achievement_text.contains(&keyword_lower)
                {
                    matched_keywords.push(keyword_lower);
                }
            }
            let fraction = matched_keywords.len() as f64 / job_keywords.len() as f64;
            score += (fraction * KEYWORD_WEIGHT).min(KEYWORD_WEIGHT);

            if !matched_keywords.is_empty() {
                reasons.push(format!("Matches {} job keywords", matched_keywords.len()));
            }
        }

        // Category-title affinity
        max_score += CATEGORY_WEIGHT;
        if !job.title.is_empty() {
            let title_lower = job.title.to_lowercase();
            match achievement.category {
                AchievementCategory::Technical
                    if ["engineer", "developer", "programmer", "architect"]
                        .iter()
                        .any(|t| title_lower.contains(t)) =>
                {
                    score += CATEGORY_WEIGHT;
                    reasons.push("Technical achievement relevant to role".to_string());
                }
                AchievementCategory::Leadership
                    if ["lead", "manager", "director", "senior", "principal"]
                        .iter()
                        .any(|t| title_lower.contains(t)) =>
                {
                    score += CATEGORY_WEIGHT;
                    reasons.push("Leadership achievement relevant to role".to_string());
                }
                AchievementCategory::Project => {
                    score += CATEGORY_WEIGHT / 2.0;
                    reasons.push("Project experience".to_string());
                }
                _ => {}
            }
        }

        let relevance_score = if max_score > 0.0 {
            (score / max_score).min(1.0)
        } else {
            0.0
        };

        if reasons.is_empty() {
            reasons.push("Limited keyword match".to_string());
        }

        MatchResult {
            achievement,
            relevance_score,
            matched_skills,
            matched_keywords,
            reasons,
        }
    }

    /// Keep results whose relevance meets the cutoff.
    pub fn filter_by_threshold<'a>(
        &self,
        matches: Vec<MatchResult<'a>>,
        threshold: f64,
    ) -> Vec<MatchResult<'a>> {
        matches
            .into_iter()
            .filter(|m| m.relevance_score >= threshold)
            .collect()
    }

    /// Group matches by achievement category.
    pub fn group_by_category<'a>(
        &self,
        matches: Vec<MatchResult<'a>>,
    ) -> HashMap<AchievementCategory, Vec<MatchResult<'a>>> {
        let mut grouped: HashMap<AchievementCategory, Vec<MatchResult<'a>>> = HashMap::new();
        for m in matches {
            grouped.entry(m.achievement.category).or_default().push(m);
        }
        grouped
    }

    /// Aggregate required/preferred coverage across all results, with the
    /// skills still missing and a qualitative recommendation.
    pub fn coverage_report(&self, matches: &[MatchResult<'_>], job: &JobRecord) -> CoverageReport {
        let mut all_matched_skills: HashSet<String> = HashSet::new();
        let mut all_matched_keywords: HashSet<String> = HashSet::new();
        for m in matches {
            all_matched_skills.extend(m.matched_skills.iter().map(|s| s.to_lowercase()));
            all_matched_keywords.extend(m.matched_keywords.iter().map(|k| k.to_lowercase()));
        }

        let required: Vec<String> =
            job.skills_required.iter().map(|s| s.to_lowercase()).collect();
        let preferred: Vec<String> =
            job.skills_preferred.iter().map(|s| s.to_lowercase()).collect();

        let required_matched = required
            .iter()
            .filter(|s| all_matched_skills.contains(*s))
            .count();
        let preferred_matched = preferred
            .iter()
            .filter(|s| all_matched_skills.contains(*s))
            .count();

        let required_coverage = if required.is_empty() {
            0.0
        } else {
            required_matched as f64 / required.len() as f64
        };
        let preferred_coverage = if preferred.is_empty() {
            0.0
        } else {
            preferred_matched as f64 / preferred.len() as f64
        };

        // Job-declaration order keeps the missing lists deterministic
        let missing_required: Vec<String> = required
            .iter()
            .filter(|s| !all_matched_skills.contains(*s))
            .cloned()
            .collect();
        let missing_preferred: Vec<String> = preferred
            .iter()
            .filter(|s| !all_matched_skills.contains(*s))
            .cloned()
            .collect();

        let recommendation = Self::coverage_recommendation(required_coverage, &missing_required);

        CoverageReport {
            required_skills_coverage: round2(required_coverage * 100.0),
            preferred_skills_coverage: round2(preferred_coverage * 100.0),
            matched_skills_count: all_matched_skills.len(),
            matched_keywords_count: all_matched_keywords.len(),
            missing_required_skills: missing_required,
            missing_preferred_skills: missing_preferred,
            recommendation,
        }
    }

    fn coverage_recommendation(required_coverage: f64, missing_required: &[String]) -> String {
        if required_coverage >= 0.8 {
            "Excellent coverage! Your achievements align well with job requirements.".to_string()
        } else if required_coverage >= 0.6 {
            "Good coverage. Consider highlighting achievements that demonstrate missing skills."
                .to_string()
        } else if required_coverage >= 0.4 {
            "Moderate coverage. Focus on achievements that match the required skills.".to_string()
        } else {
            let top_missing: Vec<&str> = missing_required
                .iter()
                .take(3)
                .map(|s| s.as_str())
                .collect();
            format!("Low coverage. Missing critical skills: {}", top_missing.join(", "))
        }
    }
}

fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}
