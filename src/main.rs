//! Resume scanner: PDF résumé skill matching and ranking tool

use clap::Parser;
use log::{error, info, warn};
use resume_scanner::cli::{self, Cli, Commands, ConfigAction};
use resume_scanner::config::{Config, OutputFormat};
use resume_scanner::error::{Result, ScannerError};
use resume_scanner::input::InputManager;
use resume_scanner::output::report::{HistoryReport, RankingEntry, RankingReport, ScanReport};
use resume_scanner::output::formatter::save_report_to_file;
use resume_scanner::output::ReportGenerator;
use resume_scanner::processing::{ScanPipeline, SimilarityRanker, SkillExtractor, SkillVocabulary};
use resume_scanner::storage::{self, uploads, JsonFileStore, RecordStore};
use std::path::Path;
use std::process;
use std::sync::Arc;

#[tokio::main]
async fn main() {
    // Parse CLI arguments
    let cli = Cli::parse();

    // Initialize logging
    let log_level = if cli.verbose { "debug" } else { "info" };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(log_level)).init();

    // Load configuration
    let config_path = cli.config.clone().unwrap_or_else(Config::config_path);
    let config = match Config::load_from(&config_path) {
        Ok(config) => config,
        Err(e) => {
            error!("Failed to load configuration: {}", e);
            process::exit(1);
        }
    };

    // Execute command
    if let Err(e) = run_command(cli.command, config, &config_path).await {
        if e.is_unreadable_document() {
            eprintln!("Error: could not read file ({})", e);
        } else {
            error!("Command failed: {}", e);
        }
        process::exit(1);
    }
}

async fn run_command(command: Commands, config: Config, config_path: &Path) -> Result<()> {
    match command {
        Commands::Scan {
            resume,
            job,
            job_text,
            title,
            output,
            no_save,
            save,
        } => {
            let format = output_format(output.as_deref(), &config)?;
            let mut input_manager = InputManager::new(&config.input);

            let upload = input_manager.read_upload(&resume).await?;
            let (filename, stored_path) =
                uploads::accept_upload(&config.storage.uploads_dir, &upload.original_name, &upload.bytes, !no_save)
                    .await?;
            if let Some(stored_path) = stored_path {
                info!("Stored upload at {}", stored_path.display());
            }

            let job_description = match (job, job_text) {
                (Some(path), _) => input_manager.extract_text(&path).await?,
                (None, Some(text)) => text,
                (None, None) => {
                    warn!("No job description given; the match score will be 0");
                    String::new()
                }
            };

            let pipeline = ScanPipeline::new(skill_extractor(&config)?);
            let outcome = pipeline.scan_pdf_bytes(&upload.bytes, &job_description)?;

            let analysis_id = if no_save {
                None
            } else {
                config.ensure_dirs()?;
                let mut store = JsonFileStore::open(&config.records_path())?;
                let analysis = storage::save_scan(&mut store, &filename, title.as_deref(), &job_description, &outcome)?;
                Some(analysis.id)
            };

            let report = ScanReport {
                resume_file: filename,
                job_title: title,
                result: outcome.result,
                required_skills: outcome.required_skills,
                analysis_id,
                generated_at: chrono::Utc::now(),
            };

            let generator = ReportGenerator::from_config(&config.output);
            emit(&generator.formatter(format).format_scan(&report)?, save.as_deref())?;
        }

        Commands::History { limit, output } => {
            let format = output_format(output.as_deref(), &config)?;
            let store = JsonFileStore::open(&config.records_path())?;
            let entries = store.recent_analyses(limit.unwrap_or(config.storage.history_limit))?;

            let generator = ReportGenerator::from_config(&config.output);
            println!("{}", generator.formatter(format).format_history(&HistoryReport { entries })?);
        }

        Commands::Rank {
            job,
            resumes,
            top,
            output,
            save,
        } => {
            let format = output_format(output.as_deref(), &config)?;
            let mut input_manager = InputManager::new(&config.input);

            let job_description = input_manager.extract_text(&job).await?;
            let mut texts = Vec::with_capacity(resumes.len());
            for path in &resumes {
                texts.push(input_manager.extract_text(path).await?);
            }

            let ranked = SimilarityRanker::new().rank_top(
                &job_description,
                &texts,
                top.unwrap_or(config.ranking.top_n),
            )?;

            let report = RankingReport {
                job_file: job.display().to_string(),
                entries: ranked
                    .into_iter()
                    .enumerate()
                    .map(|(position, ranked)| RankingEntry {
                        rank: position + 1,
                        resume_file: resumes[ranked.index].display().to_string(),
                        similarity: ranked.score,
                    })
                    .collect(),
                generated_at: chrono::Utc::now(),
            };

            let generator = ReportGenerator::from_config(&config.output);
            emit(&generator.formatter(format).format_ranking(&report)?, save.as_deref())?;
        }

        Commands::Skills { text, file } => {
            let extractor = skill_extractor(&config)?;
            let source_text = match (text, file) {
                (Some(text), _) => Some(text),
                (None, Some(path)) => Some(InputManager::new(&config.input).extract_text(&path).await?),
                (None, None) => None,
            };

            match source_text {
                Some(text) => {
                    let skills = extractor.extract(&text);
                    println!("🔎 Found {} skills", skills.len());
                    for skill in skills.iter() {
                        println!("  • {}", skill);
                    }
                }
                None => {
                    println!("📚 Skill vocabulary ({} entries)", extractor.vocabulary().len());
                    for skill in extractor.vocabulary().entries() {
                        println!("  • {}", skill);
                    }
                }
            }
        }

        Commands::Config { action } => match action {
            Some(ConfigAction::Show) | None => {
                println!("⚙️  Current Configuration ({})\n", config_path.display());
                let rendered = toml::to_string_pretty(&config)
                    .map_err(|e| ScannerError::Configuration(format!("Failed to serialize config: {}", e)))?;
                println!("{}", rendered);
            }

            Some(ConfigAction::Reset) => {
                println!("🔄 Resetting configuration to defaults...");
                Config::default().save_to(config_path)?;
                println!("✅ Configuration reset successfully!");
            }

            Some(ConfigAction::Path) => {
                println!("{}", config_path.display());
            }
        },
    }

    Ok(())
}

/// Extractor over the built-in vocabulary plus configured additions
fn skill_extractor(config: &Config) -> Result<SkillExtractor> {
    if config.skills.additional.is_empty() {
        return SkillExtractor::builtin();
    }
    let vocabulary = SkillVocabulary::with_additional(config.skills.additional.iter())?;
    SkillExtractor::new(Arc::new(vocabulary))
}

fn output_format(flag: Option<&str>, config: &Config) -> Result<OutputFormat> {
    match flag {
        Some(format) => cli::parse_output_format(format).map_err(ScannerError::InvalidInput),
        None => Ok(config.output.format),
    }
}

/// Print the rendered report, or write it to `save` when given
fn emit(rendered: &str, save: Option<&Path>) -> Result<()> {
    match save {
        Some(path) => {
            save_report_to_file(rendered, path)?;
            println!("💾 Report saved to {}", path.display());
        }
        None => println!("{}", rendered),
    }
    Ok(())
}
