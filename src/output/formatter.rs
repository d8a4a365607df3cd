//! Console formatter with colored output and a plain fallback

use crate::library::{Achievement, CandidateProfile};
use crate::processing::ats::{AtsAnalysisResult, FormatCheck};
use crate::processing::job::JobRecord;
use crate::processing::matcher::{CoverageReport, MatchResult};
use colored::{Color, Colorize};
use unicode_segmentation::UnicodeSegmentation;

pub struct ConsoleFormatter {
    use_colors: bool,
}

impl ConsoleFormatter {
    pub fn new(use_colors: bool) -> Self {
        Self { use_colors }
    }

    pub fn format_job_summary(&self, job: &JobRecord) -> String {
        let mut output = String::new();
        output.push_str(&self.header(&format!("Job: {} @ {}", job.title, job.company)));

        if !job.description.is_empty() {
            output.push_str(&format!("{}\n\n", truncate(&job.description, 200)));
        }
        output.push_str(&format!(
            "Required skills:  {}\n",
            self.colorize(&job.skills_required.join(", "), Color::Green)
        ));
        output.push_str(&format!(
            "Preferred skills: {}\n",
            self.colorize(&job.skills_preferred.join(", "), Color::Yellow)
        ));
        if let Some(education) = &job.education {
            output.push_str(&format!("Education:  {}\n", education));
        }
        if let Some(experience) = &job.experience {
            output.push_str(&format!("Experience: {}\n", experience));
        }
        if let Some(salary) = &job.salary_range {
            output.push_str(&format!("Salary:     {}\n", salary));
        }
        if let Some(job_type) = &job.job_type {
            output.push_str(&format!("Type:       {}\n", job_type));
        }
        output.push_str(&format!(
            "Requirements: {} items | Responsibilities: {} items\n",
            job.requirements.len(),
            job.responsibilities.len()
        ));
        output
    }

    pub fn format_match_results(
        &self,
        matches: &[MatchResult<'_>],
        report: &CoverageReport,
        top: usize,
    ) -> String {
        let mut output = String::new();
        output.push_str(&self.header("Achievement Match Analysis"));

        if matches.is_empty() {
            output.push_str("No achievements in the library yet.\n");
            return output;
        }

        output.push_str(&format!(
            "{:<44} {:>7}  {}\n",
            "Achievement", "Score", "Matched Skills"
        ));
        for m in matches.iter().take(top) {
            let score = format!("{:.1}%", m.relevance_score * 100.0);
            let skills = m.matched_skills.join(", ");
            output.push_str(&format!(
                "{:<44} {:>7}  {}\n",
                truncate(&m.achievement.title, 42),
                self.score_color(&score, m.relevance_score),
                truncate(&skills, 40)
            ));
        }

        output.push_str(&self.header("Coverage Report"));
        output.push_str(&format!(
            "Required skills coverage:  {:.1}%\n",
            report.required_skills_coverage
        ));
        output.push_str(&format!(
            "Preferred skills coverage: {:.1}%\n",
            report.preferred_skills_coverage
        ));
        if !report.missing_required_skills.is_empty() {
            output.push_str(&format!(
                "Missing required: {}\n",
                self.colorize(&report.missing_required_skills.join(", "), Color::Red)
            ));
        }
        output.push_str(&format!("\n{}\n", report.recommendation));
        output
    }

    pub fn format_ats_result(&self, result: &AtsAnalysisResult) -> String {
        let mut output = String::new();
        let banner = format!("ATS Score: {:.1}%", result.match_score);
        let color = if result.match_score >= 70.0 {
            Color::Green
        } else if result.match_score >= 50.0 {
            Color::Yellow
        } else {
            Color::Red
        };
        output.push_str(&format!("{}\n\n", self.colorize(&banner, color)));

        output.push_str(&format!(
            "Matched keywords ({}): {}\n",
            result.matched_keywords.len(),
            truncate(&result.matched_keywords.join(", "), 200)
        ));
        if !result.missing_keywords.is_empty() {
            output.push_str(&format!(
                "Missing keywords ({}): {}\n",
                result.missing_keywords.len(),
                truncate(&result.missing_keywords.join(", "), 200)
            ));
        }

        output.push_str("\nRecommendations:\n");
        for recommendation in &result.recommendations {
            output.push_str(&format!("  • {}\n", recommendation));
        }
        output
    }

    pub fn format_format_check(&self, check: &FormatCheck) -> String {
        let mut output = String::new();
        if check.is_ats_friendly {
            output.push_str(&format!(
                "{}\n",
                self.colorize("No format hazards detected.", Color::Green)
            ));
        } else {
            output.push_str(&format!(
                "{}\n",
                self.colorize("Format hazards found:", Color::Red)
            ));
            for issue in &check.issues {
                output.push_str(&format!("  • {}\n", issue));
            }
        }
        output.push_str(&format!(
            "Found sections:   {}\n",
            check.found_standard_sections.join(", ")
        ));
        output.push_str(&format!(
            "Missing sections: {}\n",
            check.missing_standard_sections.join(", ")
        ));
        output
    }

    pub fn format_achievement_table(&self, achievements: &[Achievement]) -> String {
        let mut output = String::new();
        output.push_str(&self.header(&format!("Your Achievements ({})", achievements.len())));

        if achievements.is_empty() {
            output.push_str("No achievements found. Add some with 'co-apply achievement add'\n");
            return output;
        }

        output.push_str(&format!(
            "{:<18} {:<42} {:<14} {}\n",
            "ID", "Title", "Category", "Skills"
        ));
        for achievement in achievements {
            output.push_str(&format!(
                "{:<18} {:<42} {:<14} {}\n",
                truncate(&achievement.id, 16),
                truncate(&achievement.title, 40),
                achievement.category.to_string(),
                truncate(&achievement.skills.join(", "), 30)
            ));
        }
        output
    }

    pub fn format_profile(&self, profile: &CandidateProfile) -> String {
        let mut output = String::new();
        output.push_str(&self.header("Your Profile"));
        output.push_str(&format!("Name:     {}\n", profile.name));
        output.push_str(&format!("Email:    {}\n", profile.email));
        output.push_str(&format!("Phone:    {}\n", profile.phone));
        if let Some(location) = &profile.location {
            output.push_str(&format!("Location: {}\n", location));
        }
        if let Some(linkedin) = &profile.linkedin {
            output.push_str(&format!("LinkedIn: {}\n", linkedin));
        }
        if let Some(github) = &profile.github {
            output.push_str(&format!("GitHub:   {}\n", github));
        }
        output
    }

    fn header(&self, title: &str) -> String {
        if self.use_colors {
            format!("\n{}\n", title.blue().bold())
        } else {
            format!("\n{}\n", title)
        }
    }

    fn colorize(&self, text: &str, color: Color) -> String {
        if self.use_colors {
            text.color(color).to_string()
        } else {
            text.to_string()
        }
    }

    fn score_color(&self, text: &str, score: f64) -> String {
        let color = if score >= 0.7 {
            Color::Green
        } else if score >= 0.4 {
            Color::Yellow
        } else {
            Color::Red
        };
        self.colorize(text, color)
    }
}

/// Grapheme-safe truncation with an ellipsis marker.
pub fn truncate(text: &str, max_graphemes: usize) -> String {
    let graphemes: Vec<&str> = text.graphemes(true).collect();
    if graphemes.len() <= max_graphemes {
        text.to_string()
    } else {
        let mut truncated: String = graphemes[..max_graphemes].concat();
        truncated.push_str("...");
        truncated
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_truncate_short_text_unchanged() {
        assert_eq!(truncate("hello", 10), "hello");
    }

    #[test]
    fn test_truncate_long_text() {
        assert_eq!(truncate("hello world", 5), "hello...");
    }

    #[test]
    fn test_truncate_is_grapheme_safe() {
        // Slicing "Résumé" by bytes at 2 would split the é
        assert_eq!(truncate("Résumé", 2), "Ré...");
    }
}
