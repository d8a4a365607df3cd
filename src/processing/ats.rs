//! ATS keyword-coverage analysis
//!
//! Compares a target keyword list against a document's text, producing a
//! match score, matched/missing keyword sets, and rule-based
//! recommendations, plus a format-hazard check for ATS-unfriendly text.

use crate::processing::keywords::KeywordExtractor;
use log::debug;
use regex::Regex;
use serde::Serialize;
use std::collections::BTreeMap;

/// Result of analyzing a document against job keywords.
#[derive(Debug, Clone, Serialize)]
pub struct AtsAnalysisResult {
    /// Percentage of target keywords found, rounded to 2 decimal places
    pub match_score: f64,
    pub matched_keywords: Vec<String>,
    pub missing_keywords: Vec<String>,
    /// Matched keyword -> case-insensitive occurrence count
    pub keyword_frequency: BTreeMap<String, usize>,
    pub recommendations: Vec<String>,
    /// Required skill -> whether the document mentions it
    pub skill_coverage: BTreeMap<String, bool>,
}

/// Outcome of the format-hazard check.
#[derive(Debug, Clone, Serialize)]
pub struct FormatCheck {
    pub is_ats_friendly: bool,
    pub issues: Vec<String>,
    pub found_standard_sections: Vec<String>,
    pub missing_standard_sections: Vec<String>,
}

/// Comparison of two document drafts against the same keyword list.
#[derive(Debug, Clone, Serialize)]
pub struct VersionComparison {
    pub original_score: f64,
    pub updated_score: f64,
    pub score_improvement: f64,
    pub new_keywords_added: Vec<String>,
    pub keywords_removed: Vec<String>,
    pub recommendation: String,
}

const STANDARD_SECTIONS: [&str; 4] = ["experience", "education", "skills", "summary"];

pub struct AtsAnalyzer {
    keywords: KeywordExtractor,
    special_char_re: Regex,
}

impl Default for AtsAnalyzer {
    fn default() -> Self {
        Self::new()
    }
}

impl AtsAnalyzer {
    pub fn new() -> Self {
        let special_char_re =
            Regex::new(r"[^a-zA-Z0-9\s.,;:\-()]").expect("Invalid special-char regex");
        Self {
            keywords: KeywordExtractor::new(),
            special_char_re,
        }
    }

    /// Analyze how well a document covers the job's keywords. Matched
    /// keywords keep their original casing; the score is
    /// matched/total * 100, or 0 for an empty keyword list.
    pub fn analyze(
        &self,
        job_keywords: &[String],
        document_text: &str,
        required_skills: Option<&[String]>,
    ) -> AtsAnalysisResult {
        let document_lower = document_text.to_lowercase();
        debug!(
            "analyzing document ({} chars) against {} keywords; {} candidate document keywords",
            document_text.len(),
            job_keywords.len(),
            self.document_keywords(document_text).len()
        );

        let mut matched = Vec::new();
        let mut missing = Vec::new();
        let mut keyword_frequency = BTreeMap::new();

        for keyword in job_keywords {
            let keyword_lower = keyword.to_lowercase();
            if document_lower.contains(&keyword_lower) {
                keyword_frequency
                    .insert(keyword.clone(), document_lower.matches(&keyword_lower).count());
                matched.push(keyword.clone());
            } else {
                missing.push(keyword.clone());
            }
        }

        let match_score = if job_keywords.is_empty() {
            0.0
        } else {
            round2(matched.len() as f64 / job_keywords.len() as f64 * 100.0)
        };

        let mut skill_coverage = BTreeMap::new();
        if let Some(skills) = required_skills {
            for skill in skills {
                skill_coverage.insert(skill.clone(), document_lower.contains(&skill.to_lowercase()));
            }
        }

        let recommendations = self.generate_recommendations(
            match_score,
            &missing,
            &keyword_frequency,
            &skill_coverage,
        );

        AtsAnalysisResult {
            match_score,
            matched_keywords: matched,
            missing_keywords: missing,
            keyword_frequency,
            recommendations,
            skill_coverage,
        }
    }

    /// Frequency-ranked candidate keywords of the document itself.
    pub fn document_keywords(&self, text: &str) -> Vec<String> {
        self.keywords.top_keywords(text, 100)
    }

    fn generate_recommendations(
        &self,
        score: f64,
        missing: &[String],
        frequency: &BTreeMap<String, usize>,
        skill_coverage: &BTreeMap<String, bool>,
    ) -> Vec<String> {
        let mut recommendations = Vec::new();

        if score < 50.0 {
            recommendations.push(
                "⚠️ Low match score. Consider adding more relevant keywords from the job description."
                    .to_string(),
            );
        } else if score < 70.0 {
            recommendations.push(
                "⚡ Moderate match. Adding missing keywords could improve your chances.".to_string(),
            );
        } else {
            recommendations.push(
                "✅ Good keyword match! Your document aligns well with the job requirements."
                    .to_string(),
            );
        }

        if !missing.is_empty() {
            let top_missing: Vec<&str> = missing.iter().take(5).map(|k| k.as_str()).collect();
            recommendations.push(format!(
                "📝 Missing important keywords: {}",
                top_missing.join(", ")
            ));
        }

        let single_mentions = frequency.values().filter(|&&count| count == 1).count();
        if single_mentions > 3 {
            recommendations.push(
                "💡 Consider mentioning matched keywords more than once to emphasize expertise."
                    .to_string(),
            );
        }

        let missing_skills: Vec<&str> = skill_coverage
            .iter()
            .filter(|(_, covered)| !**covered)
            .map(|(skill, _)| skill.as_str())
            .collect();
        if !missing_skills.is_empty() {
            let top: Vec<&str> = missing_skills.into_iter().take(3).collect();
            recommendations.push(format!("🎯 Missing required skills: {}", top.join(", ")));
        }

        recommendations.push(
            "📄 Use standard section headings (Experience, Education, Skills) for better ATS parsing."
                .to_string(),
        );
        recommendations.push(
            "🔤 Use standard fonts and avoid tables, text boxes, and images for ATS compatibility."
                .to_string(),
        );

        recommendations
    }

    /// Flag format hazards: non-ASCII characters, tabs, heavy non-standard
    /// punctuation, and absent canonical section headings.
    pub fn check_format(&self, text: &str) -> FormatCheck {
        let mut issues = Vec::new();

        if text.chars().any(|c| !c.is_ascii()) {
            issues.push(
                "Contains non-ASCII characters (consider using standard characters)".to_string(),
            );
        }

        let special_char_count = self.special_char_re.find_iter(text).count();
        if special_char_count > 50 {
            issues.push("High number of special characters detected".to_string());
        }

        if text.contains('\t') {
            issues.push("Contains tab characters (use spaces instead)".to_string());
        }

        let text_lower = text.to_lowercase();
        let found: Vec<String> = STANDARD_SECTIONS
            .iter()
            .filter(|s| text_lower.contains(*s))
            .map(|s| s.to_string())
            .collect();
        let missing: Vec<String> = STANDARD_SECTIONS
            .iter()
            .filter(|s| !text_lower.contains(*s))
            .map(|s| s.to_string())
            .collect();

        FormatCheck {
            is_ats_friendly: issues.is_empty(),
            issues,
            found_standard_sections: found,
            missing_standard_sections: missing,
        }
    }

    /// Suggest document sections for each missing keyword, keyed by
    /// keyword type.
    pub fn suggest_keyword_placement(
        &self,
        missing_keywords: &[String],
    ) -> BTreeMap<String, Vec<String>> {
        let tech_markers = ["python", "java", "sql", "aws", "docker"];
        let soft_markers = ["leadership", "communication", "team"];
        let education_markers = ["degree", "bachelor", "master", "certification"];

        let mut suggestions = BTreeMap::new();
        for keyword in missing_keywords {
            let keyword_lower = keyword.to_lowercase();
            let sections: Vec<String> = if tech_markers.iter().any(|m| keyword_lower.contains(m)) {
                vec!["Skills".to_string(), "Experience".to_string()]
            } else if soft_markers.iter().any(|m| keyword_lower.contains(m)) {
                vec!["Summary".to_string(), "Experience".to_string()]
            } else if education_markers.iter().any(|m| keyword_lower.contains(m)) {
                vec!["Education".to_string()]
            } else {
                vec!["Experience".to_string()]
            };
            suggestions.insert(keyword.clone(), sections);
        }
        suggestions
    }

    /// Compare two drafts of a document against the same keyword list.
    pub fn compare_versions(
        &self,
        original_text: &str,
        updated_text: &str,
        job_keywords: &[String],
    ) -> VersionComparison {
        let original = self.analyze(job_keywords, original_text, None);
        let updated = self.analyze(job_keywords, updated_text, None);

        let new_keywords_added: Vec<String> = updated
            .matched_keywords
            .iter()
            .filter(|k| !original.matched_keywords.contains(k))
            .cloned()
            .collect();
        let keywords_removed: Vec<String> = original
            .matched_keywords
            .iter()
            .filter(|k| !updated.matched_keywords.contains(k))
            .cloned()
            .collect();

        let score_improvement = round2(updated.match_score - original.match_score);
        let recommendation = if score_improvement > 0.0 {
            "Improved".to_string()
        } else {
            "Needs work".to_string()
        };

        VersionComparison {
            original_score: original.match_score,
            updated_score: updated.match_score,
            score_improvement,
            new_keywords_added,
            keywords_removed,
            recommendation,
        }
    }
}

fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}
