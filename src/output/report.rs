//! Report structures handed to the formatters

use crate::processing::analyzer::ScanResult;
use crate::processing::vocabulary::SkillSet;
use crate::storage::HistoryEntry;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScanReport {
    pub resume_file: String,
    pub job_title: Option<String>,
    #[serde(flatten)]
    pub result: ScanResult,
    pub required_skills: SkillSet,
    pub analysis_id: Option<u64>,
    pub generated_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HistoryReport {
    pub entries: Vec<HistoryEntry>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RankingEntry {
    pub rank: usize,
    pub resume_file: String,
    /// Cosine similarity in [0, 1]
    pub similarity: f32,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RankingReport {
    pub job_file: String,
    pub entries: Vec<RankingEntry>,
    pub generated_at: DateTime<Utc>,
}

/// Verdict label for a percentage score
pub fn score_label(score: f64) -> &'static str {
    match score {
        s if s >= 80.0 => "STRONG MATCH",
        s if s >= 60.0 => "GOOD MATCH",
        s if s >= 40.0 => "PARTIAL MATCH",
        _ => "WEAK MATCH",
    }
}
