//! Configuration management for the resume scanner

use crate::error::{Result, ScannerError};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    pub storage: StorageConfig,
    pub input: InputConfig,
    pub skills: SkillsConfig,
    pub ranking: RankingConfig,
    pub output: OutputConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StorageConfig {
    pub data_dir: PathBuf,
    pub uploads_dir: PathBuf,
    pub history_limit: usize,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct InputConfig {
    pub max_upload_bytes: u64,
    pub allowed_extensions: Vec<String>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SkillsConfig {
    /// Extra vocabulary entries appended to the built-in skill list
    #[serde(default)]
    pub additional: Vec<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RankingConfig {
    pub top_n: usize,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OutputConfig {
    pub format: OutputFormat,
    pub color_output: bool,
    pub pretty_json: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum OutputFormat {
    Console,
    Json,
}

pub const DEFAULT_MAX_UPLOAD_BYTES: u64 = 16 * 1024 * 1024;
pub const DEFAULT_HISTORY_LIMIT: usize = 10;

impl Default for Config {
    fn default() -> Self {
        let data_dir = dirs::data_dir()
            .unwrap_or_else(|| dirs::home_dir().unwrap_or_else(|| PathBuf::from(".")))
            .join("resume-scanner");

        Self {
            storage: StorageConfig {
                uploads_dir: data_dir.join("uploads"),
                data_dir,
                history_limit: DEFAULT_HISTORY_LIMIT,
            },
            input: InputConfig {
                max_upload_bytes: DEFAULT_MAX_UPLOAD_BYTES,
                allowed_extensions: vec!["pdf".to_string()],
            },
            skills: SkillsConfig::default(),
            ranking: RankingConfig { top_n: 10 },
            output: OutputConfig {
                format: OutputFormat::Console,
                color_output: true,
                pretty_json: true,
            },
        }
    }
}

impl Config {
    /// Load from `config_path`, writing defaults there on first run.
    pub fn load_from(config_path: &Path) -> Result<Self> {
        if config_path.exists() {
            let content = std::fs::read_to_string(config_path)?;
            let config: Config = toml::from_str(&content)
                .map_err(|e| ScannerError::Configuration(format!("Failed to parse config: {}", e)))?;
            config.validate()?;
            Ok(config)
        } else {
            let config = Self::default();
            config.save_to(config_path)?;
            Ok(config)
        }
    }

    pub fn save_to(&self, config_path: &Path) -> Result<()> {
        if let Some(parent) = config_path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        let content = toml::to_string_pretty(self)
            .map_err(|e| ScannerError::Configuration(format!("Failed to serialize config: {}", e)))?;

        std::fs::write(config_path, content)?;
        Ok(())
    }

    pub fn config_path() -> PathBuf {
        dirs::config_dir()
            .unwrap_or_else(|| dirs::home_dir().unwrap_or_else(|| PathBuf::from(".")))
            .join("resume-scanner")
            .join("config.toml")
    }

    fn validate(&self) -> Result<()> {
        if self.input.max_upload_bytes == 0 {
            return Err(ScannerError::Configuration(
                "input.max_upload_bytes must be greater than zero".to_string(),
            ));
        }
        if self.input.allowed_extensions.is_empty() {
            return Err(ScannerError::Configuration(
                "input.allowed_extensions must not be empty".to_string(),
            ));
        }
        if self.skills.additional.iter().any(|s| s.trim().is_empty()) {
            return Err(ScannerError::Configuration(
                "skills.additional must not contain blank entries".to_string(),
            ));
        }
        Ok(())
    }

    /// Path of the JSON record store
    pub fn records_path(&self) -> PathBuf {
        self.storage.data_dir.join("records.json")
    }

    pub fn ensure_dirs(&self) -> Result<()> {
        std::fs::create_dir_all(&self.storage.data_dir)?;
        std::fs::create_dir_all(&self.storage.uploads_dir)?;
        Ok(())
    }
}
