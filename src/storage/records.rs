//! Persisted record types and their validation

use crate::error::{Result, ScannerError};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

pub type RecordId = u64;

pub const DEFAULT_JOB_TITLE: &str = "Job Position";
const TIMESTAMP_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ResumeRecord {
    pub id: RecordId,
    pub filename: String,
    pub content: String,
    pub upload_date: DateTime<Utc>,
    pub extracted_skills: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct JobDescriptionRecord {
    pub id: RecordId,
    pub title: String,
    pub description: String,
    pub required_skills: Vec<String>,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AnalysisRecord {
    pub id: RecordId,
    pub resume_id: RecordId,
    pub job_description_id: RecordId,
    /// Fraction in [0, 1]
    pub match_score: f64,
    pub skill_matches: Vec<String>,
    pub missing_skills: Vec<String>,
    pub analysis_date: DateTime<Utc>,
}

#[derive(Debug, Clone)]
pub struct NewResume {
    pub filename: String,
    pub content: String,
    pub extracted_skills: Vec<String>,
}

#[derive(Debug, Clone)]
pub struct NewJobDescription {
    pub title: String,
    pub description: String,
    pub required_skills: Vec<String>,
}

#[derive(Debug, Clone)]
pub struct NewAnalysis {
    pub resume_id: RecordId,
    pub job_description_id: RecordId,
    pub match_score: f64,
    pub skill_matches: Vec<String>,
    pub missing_skills: Vec<String>,
}

/// One row of the analysis history view
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HistoryEntry {
    pub resume_name: String,
    /// Percentage, two decimals
    pub match_score: f64,
    pub analysis_date: String,
    pub skills_matched: Vec<String>,
}

impl HistoryEntry {
    pub fn from_analysis(analysis: &AnalysisRecord, resume: &ResumeRecord) -> Self {
        Self {
            resume_name: resume.filename.clone(),
            match_score: crate::processing::matcher::round_to_hundredths(analysis.match_score * 100.0),
            analysis_date: analysis.analysis_date.format(TIMESTAMP_FORMAT).to_string(),
            skills_matched: analysis.skill_matches.clone(),
        }
    }
}

/// Skill lists must hold trimmed, lowercase, non-empty, unique names
pub fn validate_skills(field: &str, skills: &[String]) -> Result<()> {
    for (position, skill) in skills.iter().enumerate() {
        if skill.is_empty() || skill.trim() != skill {
            return Err(ScannerError::RecordValidation(format!(
                "{}[{}] is blank or padded: {:?}",
                field, position, skill
            )));
        }
        if skill.to_lowercase() != *skill {
            return Err(ScannerError::RecordValidation(format!(
                "{}[{}] is not lowercase: {:?}",
                field, position, skill
            )));
        }
        if skills[..position].contains(skill) {
            return Err(ScannerError::RecordValidation(format!(
                "{} lists {:?} twice",
                field, skill
            )));
        }
    }
    Ok(())
}

impl NewResume {
    pub fn validate(&self) -> Result<()> {
        if self.filename.trim().is_empty() {
            return Err(ScannerError::RecordValidation("resume filename is empty".to_string()));
        }
        if self.filename.len() > 255 {
            return Err(ScannerError::RecordValidation(
                "resume filename exceeds 255 bytes".to_string(),
            ));
        }
        validate_skills("extracted_skills", &self.extracted_skills)
    }
}

impl NewJobDescription {
    pub fn validate(&self) -> Result<()> {
        if self.title.trim().is_empty() {
            return Err(ScannerError::RecordValidation("job title is empty".to_string()));
        }
        if self.title.len() > 255 {
            return Err(ScannerError::RecordValidation("job title exceeds 255 bytes".to_string()));
        }
        validate_skills("required_skills", &self.required_skills)
    }
}

impl NewAnalysis {
    pub fn validate(&self) -> Result<()> {
        if !self.match_score.is_finite() || !(0.0..=1.0).contains(&self.match_score) {
            return Err(ScannerError::RecordValidation(format!(
                "match_score must be a fraction in [0, 1], got {}",
                self.match_score
            )));
        }
        validate_skills("skill_matches", &self.skill_matches)?;
        validate_skills("missing_skills", &self.missing_skills)?;
        if let Some(both) = self.skill_matches.iter().find(|s| self.missing_skills.contains(s)) {
            return Err(ScannerError::RecordValidation(format!(
                "{:?} is both matched and missing",
                both
            )));
        }
        Ok(())
    }
}
