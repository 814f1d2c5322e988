//! Persistence of résumés, job descriptions and analyses

pub mod records;
pub mod store;
pub mod uploads;

pub use records::{AnalysisRecord, HistoryEntry, JobDescriptionRecord, ResumeRecord};
pub use store::{JsonFileStore, RecordStore};

use crate::error::Result;
use crate::processing::analyzer::ScanOutcome;
use records::{NewAnalysis, NewJobDescription, NewResume, DEFAULT_JOB_TITLE};

/// Persist one scan as a résumé, a job description and the analysis that
/// links them, then commit. Nothing is committed if any record is invalid.
pub fn save_scan(
    store: &mut impl RecordStore,
    filename: &str,
    job_title: Option<&str>,
    job_description: &str,
    outcome: &ScanOutcome,
) -> Result<AnalysisRecord> {
    let resume = store.create_resume(NewResume {
        filename: filename.to_string(),
        content: outcome.resume_text.clone(),
        extracted_skills: outcome.result.skills.to_vec(),
    })?;

    let job = store.create_job_description(NewJobDescription {
        title: job_title
            .map(str::trim)
            .filter(|t| !t.is_empty())
            .unwrap_or(DEFAULT_JOB_TITLE)
            .to_string(),
        description: job_description.to_string(),
        required_skills: outcome.required_skills.to_vec(),
    })?;

    let result = outcome.match_result();
    let analysis = store.create_analysis(NewAnalysis {
        resume_id: resume.id,
        job_description_id: job.id,
        match_score: result.score_fraction(),
        skill_matches: result.matched.to_vec(),
        missing_skills: result.missing.to_vec(),
    })?;

    store.commit()?;
    Ok(analysis)
}
