//! Scan pipeline: text extraction, skill extraction, matching

use crate::error::Result;
use crate::input::text_extractor::{DocumentSource, PdfExtractor};
use crate::processing::matcher::{match_skills, MatchResult};
use crate::processing::skill_extractor::SkillExtractor;
use crate::processing::vocabulary::SkillSet;
use log::info;
use serde::{Deserialize, Serialize};

/// What a scan returns to its caller
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScanResult {
    /// Skills found in the résumé
    pub skills: SkillSet,
    pub matched_skills: SkillSet,
    pub missing_skills: SkillSet,
    /// Percentage in [0, 100], two decimals
    pub score: f64,
}

/// A scan plus the intermediate data callers may want to persist
#[derive(Debug, Clone)]
pub struct ScanOutcome {
    pub resume_text: String,
    pub required_skills: SkillSet,
    pub result: ScanResult,
}

impl ScanOutcome {
    pub fn match_result(&self) -> MatchResult {
        MatchResult {
            matched: self.result.matched_skills.clone(),
            missing: self.result.missing_skills.clone(),
            score: self.result.score,
        }
    }
}

pub struct ScanPipeline {
    extractor: SkillExtractor,
}

impl ScanPipeline {
    pub fn new(extractor: SkillExtractor) -> Self {
        Self { extractor }
    }

    /// Score already-extracted résumé text against a job description.
    /// An empty job description yields a zero score.
    pub fn scan_text(&self, resume_text: &str, job_description: &str) -> ScanOutcome {
        let resume_skills = self.extractor.extract(resume_text);
        let required_skills = self.extractor.extract(job_description);
        let MatchResult {
            matched,
            missing,
            score,
        } = match_skills(&resume_skills, &required_skills);

        info!(
            "Scan: {} résumé skills, {}/{} required matched, score {:.2}%",
            resume_skills.len(),
            matched.len(),
            required_skills.len(),
            score
        );

        ScanOutcome {
            resume_text: resume_text.to_string(),
            required_skills,
            result: ScanResult {
                skills: resume_skills,
                matched_skills: matched,
                missing_skills: missing,
                score,
            },
        }
    }

    /// Scan an in-memory PDF. Unreadable PDFs are errors; PDFs without a
    /// text layer scan as empty text.
    pub fn scan_pdf_bytes(&self, pdf: &[u8], job_description: &str) -> Result<ScanOutcome> {
        let resume_text = PdfExtractor::extract_bytes(pdf)?;
        Ok(self.scan_text(&resume_text, job_description))
    }

    pub async fn scan_source(&self, source: &DocumentSource, job_description: &str) -> Result<ScanOutcome> {
        let bytes = source.read_bytes().await?;
        self.scan_pdf_bytes(&bytes, job_description)
    }
}
