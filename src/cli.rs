//! CLI interface for co-apply

use clap::{Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "co-apply")]
#[command(about = "Job application copilot")]
#[command(
    long_about = "Parse job postings into structured records, match your achievements against them, and check documents for ATS keyword coverage"
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Enable verbose logging
    #[arg(short, long, global = true)]
    pub verbose: bool,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Manage your candidate profile
    Profile {
        #[command(subcommand)]
        action: ProfileAction,
    },

    /// Manage your achievements
    Achievement {
        #[command(subcommand)]
        action: AchievementAction,
    },

    /// Parse and inspect job descriptions
    Job {
        #[command(subcommand)]
        action: JobAction,
    },

    /// Analyze job matches and ATS compatibility
    Analyze {
        #[command(subcommand)]
        action: AnalyzeAction,
    },

    /// Show or reset configuration
    Config {
        #[command(subcommand)]
        action: ConfigAction,
    },
}

#[derive(Subcommand)]
pub enum ProfileAction {
    /// Initialize your candidate profile
    Init {
        /// Your full name
        #[arg(long)]
        name: String,

        /// Your email address
        #[arg(long)]
        email: String,

        /// Your phone number
        #[arg(long)]
        phone: String,

        /// Your location
        #[arg(long)]
        location: Option<String>,
    },

    /// Display your current profile
    Show,
}

#[derive(Subcommand)]
pub enum AchievementAction {
    /// Add a new achievement to your library
    Add {
        /// Title of the achievement
        #[arg(long)]
        title: String,

        /// Detailed description
        #[arg(long)]
        description: String,

        /// Category: technical, leadership, project, certification
        #[arg(long)]
        category: String,

        /// Related skills (comma-separated)
        #[arg(long)]
        skills: String,

        /// Keywords for matching (comma-separated)
        #[arg(long)]
        keywords: String,

        /// Impact statement
        #[arg(long)]
        impact: Option<String>,

        /// Metrics backing the achievement
        #[arg(long)]
        metrics: Option<String>,

        /// Date or date range
        #[arg(long)]
        date: Option<String>,
    },

    /// List all achievements
    List,

    /// Remove an achievement by id
    Remove {
        /// Achievement id
        id: String,
    },
}

#[derive(Subcommand)]
pub enum JobAction {
    /// Parse a job description from a text file
    Parse {
        /// Path to the job posting text file
        file: PathBuf,

        /// Unique identifier for this job
        #[arg(long)]
        job_id: String,

        /// Job title
        #[arg(long, default_value = "")]
        title: String,

        /// Company name
        #[arg(long, default_value = "")]
        company: String,

        /// Print the parsed record as JSON
        #[arg(long)]
        json: bool,
    },

    /// Show a previously parsed job
    Show {
        /// Job identifier
        job_id: String,

        /// Print the record as JSON
        #[arg(long)]
        json: bool,
    },
}

#[derive(Subcommand)]
pub enum AnalyzeAction {
    /// Score your achievements against a parsed job
    Match {
        /// Job identifier
        job_id: String,

        /// Only keep matches at or above this relevance
        #[arg(long)]
        threshold: Option<f64>,

        /// Print results as JSON
        #[arg(long)]
        json: bool,
    },

    /// Check a document's keyword coverage for a parsed job
    Ats {
        /// Path to the CV or cover letter text file
        document: PathBuf,

        /// Job identifier
        job_id: String,

        /// Print the result as JSON
        #[arg(long)]
        json: bool,
    },

    /// Check a document for ATS format hazards
    Format {
        /// Path to the document text file
        document: PathBuf,
    },
}

#[derive(Subcommand)]
pub enum ConfigAction {
    /// Show current configuration
    Show,

    /// Reset configuration to defaults
    Reset,
}

/// Split a comma-separated argument into trimmed, non-empty items.
pub fn parse_list(raw: &str) -> Vec<String> {
    raw.split(',')
        .map(|item| item.trim().to_string())
        .filter(|item| !item.is_empty())
        .collect()
}
