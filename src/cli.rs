//! CLI interface for the resume scanner

use crate::config::OutputFormat;
use clap::{Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "resume-scanner")]
#[command(about = "Match the skills in a PDF résumé against a job description")]
#[command(long_about = "Extract text from PDF résumés, find known skills, score them against a job description and rank résumés by TF-IDF similarity")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Enable verbose logging
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Configuration file path
    #[arg(short, long, global = true)]
    pub config: Option<PathBuf>,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Scan a PDF résumé against a job description
    Scan {
        /// Path to the résumé (PDF)
        #[arg(short, long)]
        resume: PathBuf,

        /// Job description file (TXT, MD or PDF)
        #[arg(short, long, conflicts_with = "job_text")]
        job: Option<PathBuf>,

        /// Job description given inline
        #[arg(long)]
        job_text: Option<String>,

        /// Job title stored with the analysis
        #[arg(short, long)]
        title: Option<String>,

        /// Output format: console, json
        #[arg(short, long)]
        output: Option<String>,

        /// Do not persist the analysis
        #[arg(long)]
        no_save: bool,

        /// Save output to file
        #[arg(short, long)]
        save: Option<PathBuf>,
    },

    /// Show the most recent analyses
    History {
        /// Number of analyses to show
        #[arg(short, long)]
        limit: Option<usize>,

        /// Output format: console, json
        #[arg(short, long)]
        output: Option<String>,
    },

    /// Rank résumés by TF-IDF similarity to a job description
    Rank {
        /// Job description file (TXT, MD or PDF)
        #[arg(short, long)]
        job: PathBuf,

        /// Résumé files (PDF, TXT or MD)
        #[arg(required = true)]
        resumes: Vec<PathBuf>,

        /// Show at most this many résumés
        #[arg(short = 'n', long)]
        top: Option<usize>,

        /// Output format: console, json
        #[arg(short, long)]
        output: Option<String>,

        /// Save output to file
        #[arg(short, long)]
        save: Option<PathBuf>,
    },

    /// List the skill vocabulary, or the skills found in a text
    Skills {
        /// Text to scan for skills
        text: Option<String>,

        /// File to scan for skills (TXT, MD or PDF)
        #[arg(short, long, conflicts_with = "text")]
        file: Option<PathBuf>,
    },

    /// Show configuration
    Config {
        #[command(subcommand)]
        action: Option<ConfigAction>,
    },
}

#[derive(Subcommand)]
pub enum ConfigAction {
    /// Show current configuration
    Show,

    /// Reset configuration to defaults
    Reset,

    /// Print the configuration file path
    Path,
}

/// Parse and validate output format
pub fn parse_output_format(format: &str) -> Result<OutputFormat, String> {
    match format.to_lowercase().as_str() {
        "console" => Ok(OutputFormat::Console),
        "json" => Ok(OutputFormat::Json),
        _ => Err(format!("Invalid output format: {}. Supported: console, json", format)),
    }
}
