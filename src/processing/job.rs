//! Job posting parser
//!
//! Turns raw posting text into a structured [`JobRecord`]. Extraction is
//! heuristic and total: absent patterns degrade to empty or `None` values,
//! never to an error, and identical input always yields identical output.

use crate::error::{CoApplyError, Result};
use crate::processing::sections::{SectionExtractor, SectionKind};
use aho_corasick::AhoCorasick;
use log::debug;
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Structured representation of a job posting after extraction.
///
/// Invariant: `skills_required` and `skills_preferred` never share a member;
/// a skill is classified into exactly one bucket per parse.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct JobRecord {
    pub id: String,
    pub title: String,
    pub company: String,
    #[serde(default)]
    pub location: Option<String>,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub requirements: Vec<String>,
    #[serde(default)]
    pub responsibilities: Vec<String>,
    #[serde(default)]
    pub skills_required: Vec<String>,
    #[serde(default)]
    pub skills_preferred: Vec<String>,
    #[serde(default)]
    pub education: Option<String>,
    #[serde(default)]
    pub experience: Option<String>,
    #[serde(default)]
    pub salary_range: Option<String>,
    #[serde(default)]
    pub job_type: Option<String>,
    #[serde(default)]
    pub raw_text: String,
}

impl JobRecord {
    /// Persist the record as JSON.
    pub fn save(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        let content = serde_json::to_string_pretty(self)?;
        std::fs::write(path, content)?;
        Ok(())
    }

    /// Load a previously saved record.
    pub fn load(path: &Path) -> Result<Self> {
        if !path.exists() {
            return Err(CoApplyError::NotFound(format!(
                "Job file not found: {}",
                path.display()
            )));
        }
        let content = std::fs::read_to_string(path)?;
        let record = serde_json::from_str(&content)?;
        Ok(record)
    }
}

const JOB_TYPES: [&str; 7] = [
    "full-time",
    "part-time",
    "contract",
    "temporary",
    "internship",
    "remote",
    "hybrid",
];

/// Parses job descriptions and extracts structured information.
pub struct JobParser {
    sections: SectionExtractor,
    vocabulary: Vec<&'static str>,
    vocab_matcher: AhoCorasick,
    education_patterns: Vec<Regex>,
    experience_re: Regex,
    salary_patterns: Vec<Regex>,
}

impl JobParser {
    pub fn new() -> Result<Self> {
        let vocabulary = Self::skill_vocabulary();

        // Substring scan over the whole text; overlapping matches are
        // required so "Java" is still seen inside "JavaScript".
        let vocab_matcher = AhoCorasick::builder()
            .ascii_case_insensitive(true)
            .build(&vocabulary)
            .map_err(|e| {
                CoApplyError::Processing(format!("Failed to build skill matcher: {}", e))
            })?;

        let education_patterns = vec![
            Regex::new(
                r"(?i)(Bachelor'?s?|Master'?s?|PhD|Doctorate|Associate'?s?|MBA)(?:\s+degree)?\s+in\s+([A-Za-z\s,]+)",
            )
            .expect("Invalid education regex"),
            Regex::new(r"(?i)(Bachelor'?s?|Master'?s?|PhD|Doctorate|Associate'?s?|MBA)(?:\s+degree)?")
                .expect("Invalid education regex"),
        ];

        let experience_re = Regex::new(
            r"(?i)(\d+\+?)\s*(?:to|-|\s+)?\s*(\d+)?\s*(?:\+)?\s*years?(?:\s+of)?\s+(?:experience|exp\.?)?",
        )
        .expect("Invalid experience regex");

        let salary_patterns = vec![
            Regex::new(
                r"\$\s*(\d{1,3}(?:,\d{3})*(?:\.\d{2})?)\s*(?:to|-)\s*\$?\s*(\d{1,3}(?:,\d{3})*(?:\.\d{2})?)",
            )
            .expect("Invalid salary regex"),
            Regex::new(r"\$\s*(\d{1,3}(?:,\d{3})*(?:k|K)?)").expect("Invalid salary regex"),
        ];

        Ok(Self {
            sections: SectionExtractor::new(),
            vocabulary,
            vocab_matcher,
            education_patterns,
            experience_re,
            salary_patterns,
        })
    }

    /// Parse posting text into a structured record. Never fails on
    /// malformed input; every field defaults to an empty or absent value.
    pub fn parse(&self, text: &str, job_id: &str, title: &str, company: &str) -> JobRecord {
        let description = self.extract_description(text);
        let requirements = self.sections.extract(text, SectionKind::Requirements);
        let responsibilities = self.sections.extract(text, SectionKind::Responsibilities);

        let preferred_items = self.sections.extract(text, SectionKind::Preferred);
        let (skills_required, skills_preferred) = self.extract_skills(text, &preferred_items);

        debug!(
            "parsed job '{}': {} requirements, {} responsibilities, {} required / {} preferred skills",
            job_id,
            requirements.len(),
            responsibilities.len(),
            skills_required.len(),
            skills_preferred.len()
        );

        JobRecord {
            id: job_id.to_string(),
            title: title.to_string(),
            company: company.to_string(),
            location: None,
            description,
            requirements,
            responsibilities,
            skills_required,
            skills_preferred,
            education: self.extract_education(text),
            experience: self.extract_experience(text),
            salary_range: self.extract_salary(text),
            job_type: Self::extract_job_type(text),
            raw_text: text.to_string(),
        }
    }

    /// First three lines longer than 30 characters, scanning at most the
    /// first ten lines, joined with spaces.
    fn extract_description(&self, text: &str) -> String {
        let mut description = Vec::new();
        for line in text.lines().take(10) {
            let line = line.trim();
            if !line.is_empty() && line.chars().count() > 30 {
                description.push(line);
            }
            if description.len() >= 3 {
                break;
            }
        }
        description.join(" ")
    }

    /// Classify every vocabulary skill present in the text. A skill found
    /// inside the preferred-section items goes to the preferred bucket,
    /// everything else to required; first classification wins.
    fn extract_skills(
        &self,
        text: &str,
        preferred_items: &[String],
    ) -> (Vec<String>, Vec<String>) {
        let mut present = vec![false; self.vocabulary.len()];
        for mat in self.vocab_matcher.find_overlapping_iter(text) {
            present[mat.pattern().as_usize()] = true;
        }

        let preferred_lower: Vec<String> =
            preferred_items.iter().map(|p| p.to_lowercase()).collect();

        let mut required = Vec::new();
        let mut preferred = Vec::new();

        for (idx, &skill) in self.vocabulary.iter().enumerate() {
            if !present[idx] {
                continue;
            }
            let skill_lower = skill.to_lowercase();
            if preferred_lower.iter().any(|p| p.contains(&skill_lower)) {
                if !preferred.iter().any(|s: &String| s.eq_ignore_ascii_case(skill)) {
                    preferred.push(skill.to_string());
                }
            } else if !required.iter().any(|s: &String| s.eq_ignore_ascii_case(skill)) {
                required.push(skill.to_string());
            }
        }

        (required, preferred)
    }

    fn extract_education(&self, text: &str) -> Option<String> {
        for pattern in &self.education_patterns {
            if let Some(m) = pattern.find(text) {
                return Some(m.as_str().trim().to_string());
            }
        }
        None
    }

    fn extract_experience(&self, text: &str) -> Option<String> {
        self.experience_re
            .find(text)
            .map(|m| m.as_str().trim().to_string())
    }

    fn extract_salary(&self, text: &str) -> Option<String> {
        for pattern in &self.salary_patterns {
            if let Some(m) = pattern.find(text) {
                return Some(m.as_str().trim().to_string());
            }
        }
        None
    }

    fn extract_job_type(text: &str) -> Option<String> {
        let text_lower = text.to_lowercase();
        JOB_TYPES
            .iter()
            .find(|t| text_lower.contains(*t))
            .map(|t| t.to_string())
    }

    /// Reference vocabulary of common technical and soft skills.
    fn skill_vocabulary() -> Vec<&'static str> {
        vec![
            // Programming languages
            "Python", "Java", "JavaScript", "TypeScript", "C++", "C#", "Go", "Rust",
            "Ruby", "PHP", "Swift", "Kotlin", "Scala", "R", "MATLAB",
            // Frameworks
            "React", "Angular", "Vue.js", "Django", "Flask", "Spring", "Node.js",
            "Express", "FastAPI", "Rails", "Laravel", ".NET", "ASP.NET",
            // Databases
            "SQL", "PostgreSQL", "MySQL", "MongoDB", "Redis", "Cassandra",
            "Oracle", "DynamoDB", "Elasticsearch",
            // Cloud & DevOps
            "AWS", "Azure", "GCP", "Docker", "Kubernetes", "Jenkins", "GitLab",
            "GitHub Actions", "Terraform", "Ansible", "CI/CD",
            // Data science & ML
            "TensorFlow", "PyTorch", "Scikit-learn", "Pandas", "NumPy", "Spark",
            "Hadoop", "Machine Learning", "Deep Learning", "NLP", "Computer Vision",
            // Soft skills
            "Leadership", "Communication", "Teamwork", "Problem Solving",
            "Critical Thinking", "Agile", "Scrum", "Project Management",
        ]
    }

    pub fn vocabulary_size(&self) -> usize {
        self.vocabulary.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parser() -> JobParser {
        JobParser::new().unwrap()
    }

    const POSTING: &str = "\
We are looking for a senior engineer to join our payments platform group.
You will own critical services end to end, from design through operations.

Requirements:
- Strong knowledge of Python and PostgreSQL for service development
- Track record operating production systems under load

Preferred:
- Hands-on work with Docker and AWS deployments

5+ years of experience required. Bachelor's degree in Computer Science.
Salary: $120,000 - $150,000. This is a full-time position.
";

    #[test]
    fn test_skill_classification() {
        let job = parser().parse(POSTING, "job_1", "Senior Engineer", "Acme");

        assert!(job.skills_required.contains(&"Python".to_string()));
        assert!(job.skills_preferred.contains(&"Docker".to_string()));
        assert!(job.skills_preferred.contains(&"AWS".to_string()));
        assert!(!job.skills_required.contains(&"Docker".to_string()));
    }

    #[test]
    fn test_skill_buckets_are_disjoint() {
        let job = parser().parse(POSTING, "job_1", "Senior Engineer", "Acme");

        for skill in &job.skills_required {
            assert!(
                !job
                    .skills_preferred
                    .iter()
                    .any(|p| p.eq_ignore_ascii_case(skill)),
                "{} appears in both buckets",
                skill
            );
        }
    }

    #[test]
    fn test_extracts_description() {
        let job = parser().parse(POSTING, "job_1", "Senior Engineer", "Acme");
        assert!(job.description.contains("payments platform"));
    }

    #[test]
    fn test_extracts_scalar_fields() {
        let job = parser().parse(POSTING, "job_1", "Senior Engineer", "Acme");

        let experience = job.experience.expect("experience expected");
        assert!(experience.starts_with("5+"));

        let education = job.education.expect("education expected");
        assert!(education.to_lowercase().contains("bachelor"));

        let salary = job.salary_range.expect("salary expected");
        assert!(salary.starts_with('$'));

        assert_eq!(job.job_type.as_deref(), Some("full-time"));
    }

    #[test]
    fn test_parse_is_idempotent() {
        let p = parser();
        let first = p.parse(POSTING, "job_1", "Senior Engineer", "Acme");
        let second = p.parse(POSTING, "job_1", "Senior Engineer", "Acme");
        assert_eq!(first, second);
    }

    #[test]
    fn test_empty_text_defaults() {
        let job = parser().parse("", "job_2", "", "");

        assert!(job.description.is_empty());
        assert!(job.requirements.is_empty());
        assert!(job.skills_required.is_empty());
        assert!(job.education.is_none());
        assert!(job.experience.is_none());
        assert!(job.salary_range.is_none());
        assert!(job.job_type.is_none());
    }

    #[test]
    fn test_vocabulary_is_nonempty() {
        assert!(parser().vocabulary_size() > 50);
    }

    #[test]
    fn test_java_seen_inside_javascript() {
        let job = parser().parse(
            "We use JavaScript heavily across the stack.",
            "job_3",
            "Frontend Engineer",
            "Acme",
        );
        assert!(job.skills_required.contains(&"Java".to_string()));
        assert!(job.skills_required.contains(&"JavaScript".to_string()));
    }
}
