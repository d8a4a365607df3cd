//! co-apply: job application copilot

use clap::Parser;
use co_apply::cli::{
    parse_list, AchievementAction, AnalyzeAction, Cli, Commands, ConfigAction, JobAction,
    ProfileAction,
};
use co_apply::config::Config;
use co_apply::error::{CoApplyError, Result};
use co_apply::library::{Achievement, AchievementCategory, AchievementLibrary, CandidateProfile};
use co_apply::output::formatter::ConsoleFormatter;
use co_apply::processing::ats::AtsAnalyzer;
use co_apply::processing::job::{JobParser, JobRecord};
use co_apply::processing::matcher::AchievementMatcher;
use log::{error, info};
use std::path::Path;
use std::process;

fn main() {
    let cli = Cli::parse();

    let log_level = if cli.verbose { "debug" } else { "info" };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(log_level)).init();

    let config = match Config::load() {
        Ok(config) => config,
        Err(e) => {
            error!("Failed to load configuration: {}", e);
            process::exit(1);
        }
    };

    if let Err(e) = run_command(cli.command, config) {
        error!("Command failed: {}", e);
        process::exit(1);
    }
}

fn run_command(command: Commands, config: Config) -> Result<()> {
    let formatter = ConsoleFormatter::new(config.output.color_output);

    match command {
        Commands::Profile { action } => run_profile(action, &config, &formatter),
        Commands::Achievement { action } => run_achievement(action, &config, &formatter),
        Commands::Job { action } => run_job(action, &config, &formatter),
        Commands::Analyze { action } => run_analyze(action, &config, &formatter),
        Commands::Config { action } => run_config(action, config),
    }
}

fn open_library(config: &Config) -> Result<AchievementLibrary> {
    config.ensure_data_dir()?;
    AchievementLibrary::open(&config.library_path())
}

fn run_profile(action: ProfileAction, config: &Config, formatter: &ConsoleFormatter) -> Result<()> {
    match action {
        ProfileAction::Init {
            name,
            email,
            phone,
            location,
        } => {
            let mut library = open_library(config)?;
            library.set_profile(CandidateProfile {
                name,
                email,
                phone,
                location,
                linkedin: None,
                github: None,
                website: None,
                summary: None,
            })?;
            println!("✓ Profile created successfully!");
            println!("Profile saved to: {}", library.path().display());
        }
        ProfileAction::Show => {
            let library = open_library(config)?;
            match &library.profile {
                Some(profile) => print!("{}", formatter.format_profile(profile)),
                None => println!("✗ No profile found. Run 'co-apply profile init' first."),
            }
        }
    }
    Ok(())
}

fn run_achievement(
    action: AchievementAction,
    config: &Config,
    formatter: &ConsoleFormatter,
) -> Result<()> {
    match action {
        AchievementAction::Add {
            title,
            description,
            category,
            skills,
            keywords,
            impact,
            metrics,
            date,
        } => {
            let category: AchievementCategory = category.parse()?;
            let mut library = open_library(config)?;

            let achievement = Achievement {
                id: format!("ach_{}", chrono::Local::now().format("%Y%m%d_%H%M%S")),
                title: title.clone(),
                description,
                category,
                skills: parse_list(&skills),
                keywords: parse_list(&keywords),
                impact,
                metrics,
                date,
                context: None,
            };
            library.add_achievement(achievement)?;
            println!("✓ Achievement added: {}", title);
        }
        AchievementAction::List => {
            let library = open_library(config)?;
            print!("{}", formatter.format_achievement_table(&library.achievements));
        }
        AchievementAction::Remove { id } => {
            let mut library = open_library(config)?;
            if library.delete_achievement(&id)? {
                println!("✓ Achievement removed: {}", id);
            } else {
                return Err(CoApplyError::NotFound(format!("Achievement '{}'", id)));
            }
        }
    }
    Ok(())
}

fn run_job(action: JobAction, config: &Config, formatter: &ConsoleFormatter) -> Result<()> {
    match action {
        JobAction::Parse {
            file,
            job_id,
            title,
            company,
            json,
        } => {
            let text = read_text_file(&file)?;
            info!("parsing job posting from {}", file.display());

            let parser = JobParser::new()?;
            let job = parser.parse(&text, &job_id, &title, &company);

            config.ensure_data_dir()?;
            let path = config.job_path(&job_id);
            job.save(&path)?;
            println!("✓ Job parsed and saved to: {}", path.display());

            if json {
                println!("{}", serde_json::to_string_pretty(&job)?);
            } else {
                print!("{}", formatter.format_job_summary(&job));
            }
        }
        JobAction::Show { job_id, json } => {
            let job = JobRecord::load(&config.job_path(&job_id))?;
            if json {
                println!("{}", serde_json::to_string_pretty(&job)?);
            } else {
                print!("{}", formatter.format_job_summary(&job));
            }
        }
    }
    Ok(())
}

fn run_analyze(action: AnalyzeAction, config: &Config, formatter: &ConsoleFormatter) -> Result<()> {
    match action {
        AnalyzeAction::Match {
            job_id,
            threshold,
            json,
        } => {
            let library = open_library(config)?;
            let job = JobRecord::load(&config.job_path(&job_id))?;

            let matcher = AchievementMatcher::new();
            let mut matches = matcher.match_achievements(&library.achievements, &job, None);
            if let Some(threshold) = threshold {
                matches = matcher.filter_by_threshold(matches, threshold);
            }

            let report = matcher.coverage_report(&matches, &job);
            if json {
                println!("{}", serde_json::to_string_pretty(&matches)?);
                println!("{}", serde_json::to_string_pretty(&report)?);
            } else {
                print!(
                    "{}",
                    formatter.format_match_results(&matches, &report, config.matching.top_matches)
                );
            }
        }
        AnalyzeAction::Ats {
            document,
            job_id,
            json,
        } => {
            let doc_text = read_text_file(&document)?;
            let job = JobRecord::load(&config.job_path(&job_id))?;

            let mut all_keywords = job.skills_required.clone();
            all_keywords.extend(job.skills_preferred.iter().cloned());

            let analyzer = AtsAnalyzer::new();
            let result = analyzer.analyze(&all_keywords, &doc_text, Some(&job.skills_required));

            if json {
                println!("{}", serde_json::to_string_pretty(&result)?);
            } else {
                print!("{}", formatter.format_ats_result(&result));
            }
        }
        AnalyzeAction::Format { document } => {
            let doc_text = read_text_file(&document)?;
            let analyzer = AtsAnalyzer::new();
            let check = analyzer.check_format(&doc_text);
            print!("{}", formatter.format_format_check(&check));
        }
    }
    Ok(())
}

fn run_config(action: ConfigAction, config: Config) -> Result<()> {
    match action {
        ConfigAction::Show => {
            let content = toml::to_string_pretty(&config).map_err(|e| {
                CoApplyError::Configuration(format!("Failed to serialize config: {}", e))
            })?;
            print!("{}", content);
        }
        ConfigAction::Reset => {
            let defaults = Config::default();
            defaults.save()?;
            println!("✓ Configuration reset to defaults");
        }
    }
    Ok(())
}

fn read_text_file(path: &Path) -> Result<String> {
    if !path.exists() {
        return Err(CoApplyError::NotFound(format!(
            "File not found: {}",
            path.display()
        )));
    }
    Ok(std::fs::read_to_string(path)?)
}
