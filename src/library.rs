//! Achievement library: the candidate's profile and accomplishment records,
//! persisted as a single JSON file under the data directory.

use crate::error::{CoApplyError, Result};
use log::warn;
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use std::path::{Path, PathBuf};
use std::str::FromStr;

/// Fixed achievement categories.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AchievementCategory {
    Technical,
    Leadership,
    Project,
    Certification,
}

impl AchievementCategory {
    pub const ALL: [AchievementCategory; 4] = [
        AchievementCategory::Technical,
        AchievementCategory::Leadership,
        AchievementCategory::Project,
        AchievementCategory::Certification,
    ];
}

impl std::fmt::Display for AchievementCategory {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            AchievementCategory::Technical => "technical",
            AchievementCategory::Leadership => "leadership",
            AchievementCategory::Project => "project",
            AchievementCategory::Certification => "certification",
        };
        write!(f, "{}", name)
    }
}

impl FromStr for AchievementCategory {
    type Err = CoApplyError;

    fn from_str(s: &str) -> Result<Self> {
        match s.to_lowercase().as_str() {
            "technical" => Ok(AchievementCategory::Technical),
            "leadership" => Ok(AchievementCategory::Leadership),
            "project" => Ok(AchievementCategory::Project),
            "certification" => Ok(AchievementCategory::Certification),
            other => Err(CoApplyError::InvalidInput(format!(
                "Unknown category '{}'. Expected: technical, leadership, project, certification",
                other
            ))),
        }
    }
}

/// A single accomplishment record. Owned by the caller; the matcher only
/// reads it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Achievement {
    pub id: String,
    pub title: String,
    pub description: String,
    pub category: AchievementCategory,
    pub skills: Vec<String>,
    pub keywords: Vec<String>,
    #[serde(default)]
    pub impact: Option<String>,
    #[serde(default)]
    pub metrics: Option<String>,
    #[serde(default)]
    pub date: Option<String>,
    #[serde(default)]
    pub context: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CandidateProfile {
    pub name: String,
    pub email: String,
    pub phone: String,
    #[serde(default)]
    pub location: Option<String>,
    #[serde(default)]
    pub linkedin: Option<String>,
    #[serde(default)]
    pub github: Option<String>,
    #[serde(default)]
    pub website: Option<String>,
    #[serde(default)]
    pub summary: Option<String>,
}

#[derive(Debug, Default, Serialize, Deserialize)]
struct LibraryData {
    #[serde(default)]
    profile: Option<CandidateProfile>,
    #[serde(default)]
    achievements: Vec<Achievement>,
}

/// JSON-backed store for the candidate's profile and achievements.
pub struct AchievementLibrary {
    path: PathBuf,
    pub profile: Option<CandidateProfile>,
    pub achievements: Vec<Achievement>,
}

impl AchievementLibrary {
    /// Open the library at `path`, starting empty when the file is missing
    /// or unreadable as JSON.
    pub fn open(path: &Path) -> Result<Self> {
        let mut library = Self {
            path: path.to_path_buf(),
            profile: None,
            achievements: Vec::new(),
        };

        if path.exists() {
            let content = std::fs::read_to_string(path)?;
            if !content.trim().is_empty() {
                match serde_json::from_str::<LibraryData>(&content) {
                    Ok(data) => {
                        library.profile = data.profile;
                        library.achievements = data.achievements;
                    }
                    Err(e) => {
                        warn!("ignoring unreadable library file {}: {}", path.display(), e);
                    }
                }
            }
        }

        Ok(library)
    }

    pub fn save(&self) -> Result<()> {
        if let Some(parent) = self.path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        let data = LibraryData {
            profile: self.profile.clone(),
            achievements: self.achievements.clone(),
        };
        let content = serde_json::to_string_pretty(&data)?;
        std::fs::write(&self.path, content)?;
        Ok(())
    }

    pub fn add_achievement(&mut self, achievement: Achievement) -> Result<()> {
        self.achievements.push(achievement);
        self.save()
    }

    pub fn update_achievement(&mut self, achievement_id: &str, updated: Achievement) -> Result<bool> {
        for slot in self.achievements.iter_mut() {
            if slot.id == achievement_id {
                *slot = updated;
                self.save()?;
                return Ok(true);
            }
        }
        Ok(false)
    }

    pub fn delete_achievement(&mut self, achievement_id: &str) -> Result<bool> {
        let initial = self.achievements.len();
        self.achievements.retain(|a| a.id != achievement_id);
        if self.achievements.len() < initial {
            self.save()?;
            return Ok(true);
        }
        Ok(false)
    }

    pub fn get_achievement(&self, achievement_id: &str) -> Option<&Achievement> {
        self.achievements.iter().find(|a| a.id == achievement_id)
    }

    /// Achievements mentioning any of the given keywords in their keyword
    /// list, skill list, or title/description text.
    pub fn search_by_keywords(&self, keywords: &[String]) -> Vec<&Achievement> {
        let keywords_lower: Vec<String> = keywords.iter().map(|k| k.to_lowercase()).collect();

        self.achievements
            .iter()
            .filter(|achievement| {
                let achievement_keywords: Vec<String> =
                    achievement.keywords.iter().map(|k| k.to_lowercase()).collect();
                let achievement_skills: Vec<String> =
                    achievement.skills.iter().map(|s| s.to_lowercase()).collect();
                let text =
                    format!("{} {}", achievement.title, achievement.description).to_lowercase();

                keywords_lower.iter().any(|keyword| {
                    achievement_keywords.contains(keyword)
                        || achievement_skills.contains(keyword)
                        || text.contains(keyword)
                })
            })
            .collect()
    }

    pub fn search_by_category(&self, category: AchievementCategory) -> Vec<&Achievement> {
        self.achievements
            .iter()
            .filter(|a| a.category == category)
            .collect()
    }

    /// All unique skills across achievements, sorted.
    pub fn all_skills(&self) -> Vec<String> {
        let skills: BTreeSet<String> = self
            .achievements
            .iter()
            .flat_map(|a| a.skills.iter().cloned())
            .collect();
        skills.into_iter().collect()
    }

    pub fn set_profile(&mut self, profile: CandidateProfile) -> Result<()> {
        self.profile = Some(profile);
        self.save()
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_achievement(id: &str) -> Achievement {
        Achievement {
            id: id.to_string(),
            title: "Migrated billing to event-driven architecture".to_string(),
            description: "Replaced the nightly batch with a streaming pipeline".to_string(),
            category: AchievementCategory::Technical,
            skills: vec!["Python".to_string(), "Kafka".to_string()],
            keywords: vec!["streaming".to_string()],
            impact: Some("Cut settlement latency from hours to minutes".to_string()),
            metrics: None,
            date: None,
            context: None,
        }
    }

    #[test]
    fn test_open_missing_file_starts_empty() {
        let dir = tempfile::tempdir().unwrap();
        let library = AchievementLibrary::open(&dir.path().join("achievements.json")).unwrap();
        assert!(library.profile.is_none());
        assert!(library.achievements.is_empty());
    }

    #[test]
    fn test_round_trip() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("achievements.json");

        let mut library = AchievementLibrary::open(&path).unwrap();
        library.add_achievement(sample_achievement("ach_1")).unwrap();
        library
            .set_profile(CandidateProfile {
                name: "Jane Doe".to_string(),
                email: "jane@example.com".to_string(),
                phone: "555-0100".to_string(),
                location: None,
                linkedin: None,
                github: None,
                website: None,
                summary: None,
            })
            .unwrap();

        let reloaded = AchievementLibrary::open(&path).unwrap();
        assert_eq!(reloaded.achievements.len(), 1);
        assert_eq!(reloaded.achievements[0].id, "ach_1");
        assert_eq!(reloaded.profile.unwrap().name, "Jane Doe");
    }

    #[test]
    fn test_invalid_json_starts_empty() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("achievements.json");
        std::fs::write(&path, "{ not json").unwrap();

        let library = AchievementLibrary::open(&path).unwrap();
        assert!(library.achievements.is_empty());
    }

    #[test]
    fn test_delete_achievement() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("achievements.json");

        let mut library = AchievementLibrary::open(&path).unwrap();
        library.add_achievement(sample_achievement("ach_1")).unwrap();
        assert!(library.delete_achievement("ach_1").unwrap());
        assert!(!library.delete_achievement("ach_1").unwrap());
        assert!(library.achievements.is_empty());
    }

    #[test]
    fn test_search_by_keywords_checks_text() {
        let dir = tempfile::tempdir().unwrap();
        let mut library =
            AchievementLibrary::open(&dir.path().join("achievements.json")).unwrap();
        library.add_achievement(sample_achievement("ach_1")).unwrap();

        let hits = library.search_by_keywords(&["billing".to_string()]);
        assert_eq!(hits.len(), 1);

        let misses = library.search_by_keywords(&["kubernetes".to_string()]);
        assert!(misses.is_empty());
    }

    #[test]
    fn test_update_achievement() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("achievements.json");

        let mut library = AchievementLibrary::open(&path).unwrap();
        library.add_achievement(sample_achievement("ach_1")).unwrap();

        let mut updated = sample_achievement("ach_1");
        updated.title = "Rebuilt billing end to end".to_string();
        assert!(library.update_achievement("ach_1", updated).unwrap());
        assert_eq!(
            library.get_achievement("ach_1").unwrap().title,
            "Rebuilt billing end to end"
        );
        assert!(!library
            .update_achievement("ach_404", sample_achievement("ach_404"))
            .unwrap());
    }

    #[test]
    fn test_search_by_category() {
        let dir = tempfile::tempdir().unwrap();
        let mut library =
            AchievementLibrary::open(&dir.path().join("achievements.json")).unwrap();
        library.add_achievement(sample_achievement("ach_1")).unwrap();

        assert_eq!(
            library.search_by_category(AchievementCategory::Technical).len(),
            1
        );
        assert!(library
            .search_by_category(AchievementCategory::Leadership)
            .is_empty());
    }

    #[test]
    fn test_category_parse_round_trip() {
        for category in AchievementCategory::ALL {
            let parsed: AchievementCategory = category.to_string().parse().unwrap();
            assert_eq!(parsed, category);
        }
        assert!("managerial".parse::<AchievementCategory>().is_err());
    }

    #[test]
    fn test_all_skills_sorted_unique() {
        let dir = tempfile::tempdir().unwrap();
        let mut library =
            AchievementLibrary::open(&dir.path().join("achievements.json")).unwrap();
        library.add_achievement(sample_achievement("ach_1")).unwrap();
        library.add_achievement(sample_achievement("ach_2")).unwrap();

        assert_eq!(library.all_skills(), vec!["Kafka".to_string(), "Python".to_string()]);
    }
}
