//! Record store backed by a single JSON file

use crate::error::{Result, ScannerError};
use crate::storage::records::*;
use chrono::Utc;
use log::{debug, info};
use serde::{Deserialize, Serialize};
use std::io::Write;
use std::path::{Path, PathBuf};

/// Create and query operations over résumés, job descriptions and analyses.
/// Records are immutable once created.
pub trait RecordStore {
    fn create_resume(&mut self, resume: NewResume) -> Result<ResumeRecord>;
    fn create_job_description(&mut self, job: NewJobDescription) -> Result<JobDescriptionRecord>;
    fn create_analysis(&mut self, analysis: NewAnalysis) -> Result<AnalysisRecord>;

    fn resume(&self, id: RecordId) -> Option<&ResumeRecord>;
    fn job_description(&self, id: RecordId) -> Option<&JobDescriptionRecord>;

    /// Most recent analyses first, at most `limit`
    fn recent_analyses(&self, limit: usize) -> Result<Vec<HistoryEntry>>;

    /// Make everything created so far durable
    fn commit(&mut self) -> Result<()>;
}

#[derive(Debug, Default, Serialize, Deserialize)]
struct StoreState {
    next_id: RecordId,
    resumes: Vec<ResumeRecord>,
    job_descriptions: Vec<JobDescriptionRecord>,
    analyses: Vec<AnalysisRecord>,
}

impl StoreState {
    fn allocate_id(&mut self) -> RecordId {
        self.next_id += 1;
        self.next_id
    }
}

pub struct JsonFileStore {
    path: Option<PathBuf>,
    state: StoreState,
    dirty: bool,
}

impl JsonFileStore {
    /// Open the store at `path`, starting empty if the file does not exist
    pub fn open(path: &Path) -> Result<Self> {
        let state = if path.exists() {
            let content = std::fs::read_to_string(path)?;
            let state: StoreState = serde_json::from_str(&content).map_err(|e| {
                ScannerError::Storage(format!("Corrupt record store {}: {}", path.display(), e))
            })?;
            debug!(
                "Loaded {} résumés, {} job descriptions, {} analyses from {}",
                state.resumes.len(),
                state.job_descriptions.len(),
                state.analyses.len(),
                path.display()
            );
            state
        } else {
            info!("Creating new record store at {}", path.display());
            StoreState::default()
        };

        Ok(Self {
            path: Some(path.to_path_buf()),
            state,
            dirty: false,
        })
    }

    /// A store that never touches disk; `commit` is a no-op
    pub fn in_memory() -> Self {
        Self {
            path: None,
            state: StoreState::default(),
            dirty: false,
        }
    }

    pub fn analysis_count(&self) -> usize {
        self.state.analyses.len()
    }

    fn write_atomically(path: &Path, state: &StoreState) -> Result<()> {
        let parent = path.parent().filter(|p| !p.as_os_str().is_empty()).unwrap_or(Path::new("."));
        std::fs::create_dir_all(parent)?;

        let mut temp = tempfile::NamedTempFile::new_in(parent)?;
        serde_json::to_writer_pretty(&mut temp, state)?;
        temp.flush()?;
        temp.persist(path)
            .map_err(|e| ScannerError::Storage(format!("Failed to write {}: {}", path.display(), e)))?;
        Ok(())
    }
}

impl RecordStore for JsonFileStore {
    fn create_resume(&mut self, resume: NewResume) -> Result<ResumeRecord> {
        resume.validate()?;
        let record = ResumeRecord {
            id: self.state.allocate_id(),
            filename: resume.filename,
            content: resume.content,
            upload_date: Utc::now(),
            extracted_skills: resume.extracted_skills,
        };
        self.state.resumes.push(record.clone());
        self.dirty = true;
        Ok(record)
    }

    fn create_job_description(&mut self, job: NewJobDescription) -> Result<JobDescriptionRecord> {
        job.validate()?;
        let record = JobDescriptionRecord {
            id: self.state.allocate_id(),
            title: job.title,
            description: job.description,
            required_skills: job.required_skills,
            created_at: Utc::now(),
        };
        self.state.job_descriptions.push(record.clone());
        self.dirty = true;
        Ok(record)
    }

    fn create_analysis(&mut self, analysis: NewAnalysis) -> Result<AnalysisRecord> {
        analysis.validate()?;
        if self.resume(analysis.resume_id).is_none() {
            return Err(ScannerError::RecordValidation(format!(
                "analysis references unknown résumé {}",
                analysis.resume_id
            )));
        }
        if self.job_description(analysis.job_description_id).is_none() {
            return Err(ScannerError::RecordValidation(format!(
                "analysis references unknown job description {}",
                analysis.job_description_id
            )));
        }

        let record = AnalysisRecord {
            id: self.state.allocate_id(),
            resume_id: analysis.resume_id,
            job_description_id: analysis.job_description_id,
            match_score: analysis.match_score,
            skill_matches: analysis.skill_matches,
            missing_skills: analysis.missing_skills,
            analysis_date: Utc::now(),
        };
        self.state.analyses.push(record.clone());
        self.dirty = true;
        Ok(record)
    }

    fn resume(&self, id: RecordId) -> Option<&ResumeRecord> {
        self.state.resumes.iter().find(|r| r.id == id)
    }

    fn job_description(&self, id: RecordId) -> Option<&JobDescriptionRecord> {
        self.state.job_descriptions.iter().find(|j| j.id == id)
    }

    fn recent_analyses(&self, limit: usize) -> Result<Vec<HistoryEntry>> {
        let mut analyses: Vec<&AnalysisRecord> = self.state.analyses.iter().collect();
        // ids grow monotonically, so they break timestamp ties
        analyses.sort_by(|a, b| {
            b.analysis_date
                .cmp(&a.analysis_date)
                .then_with(|| b.id.cmp(&a.id))
        });

        analyses
            .into_iter()
            .take(limit)
            .map(|analysis| {
                let resume = self.resume(analysis.resume_id).ok_or_else(|| {
                    ScannerError::Storage(format!(
                        "analysis {} references missing résumé {}",
                        analysis.id, analysis.resume_id
                    ))
                })?;
                Ok(HistoryEntry::from_analysis(analysis, resume))
            })
            .collect()
    }

    fn commit(&mut self) -> Result<()> {
        if !self.dirty {
            return Ok(());
        }
        if let Some(path) = &self.path {
            Self::write_atomically(path, &self.state)?;
            debug!("Committed record store to {}", path.display());
        }
        self.dirty = false;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn seed(store: &mut impl RecordStore, filename: &str, score: f64) -> AnalysisRecord {
        let resume = store
            .create_resume(NewResume {
                filename: filename.to_string(),
                content: "python".to_string(),
                extracted_skills: vec!["python".to_string()],
            })
            .unwrap();
        let job = store
            .create_job_description(NewJobDescription {
                title: DEFAULT_JOB_TITLE.to_string(),
                description: "python and aws".to_string(),
                required_skills: vec!["aws".to_string(), "python".to_string()],
            })
            .unwrap();
        store
            .create_analysis(NewAnalysis {
                resume_id: resume.id,
                job_description_id: job.id,
                match_score: score,
                skill_matches: vec!["python".to_string()],
                missing_skills: vec!["aws".to_string()],
            })
            .unwrap()
    }

    #[test]
    fn test_history_is_newest_first_and_limited() {
        let mut store = JsonFileStore::in_memory();
        for i in 0..5 {
            seed(&mut store, &format!("resume_{}.pdf", i), 0.5);
        }

        let history = store.recent_analyses(3).unwrap();
        let names: Vec<&str> = history.iter().map(|h| h.resume_name.as_str()).collect();
        assert_eq!(names, vec!["resume_4.pdf", "resume_3.pdf", "resume_2.pdf"]);
        assert_eq!(history[0].match_score, 50.0);
    }

    #[test]
    fn test_analysis_requires_existing_references() {
        let mut store = JsonFileStore::in_memory();
        let result = store.create_analysis(NewAnalysis {
            resume_id: 42,
            job_description_id: 43,
            match_score: 0.0,
            skill_matches: vec![],
            missing_skills: vec![],
        });
        assert!(matches!(result, Err(ScannerError::RecordValidation(_))));
    }

    #[test]
    fn test_invalid_skills_rejected_at_boundary() {
        let mut store = JsonFileStore::in_memory();
        let result = store.create_resume(NewResume {
            filename: "a.pdf".to_string(),
            content: String::new(),
            extracted_skills: vec!["Python".to_string()],
        });
        assert!(result.is_err());
        assert_eq!(store.recent_analyses(10).unwrap().len(), 0);
    }

    #[test]
    fn test_commit_and_reopen() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("data").join("records.json");

        let mut store = JsonFileStore::open(&path).unwrap();
        let first = seed(&mut store, "first.pdf", 0.6667);
        store.commit().unwrap();
        assert!(path.exists());

        let mut reopened = JsonFileStore::open(&path).unwrap();
        assert_eq!(reopened.analysis_count(), 1);
        let second = seed(&mut reopened, "second.pdf", 1.0);
        assert!(second.id > first.id);

        let history = reopened.recent_analyses(10).unwrap();
        assert_eq!(history[0].resume_name, "second.pdf");
        assert_eq!(history[1].match_score, 66.67);
    }

    #[test]
    fn test_corrupt_file_is_a_storage_error() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("records.json");
        std::fs::write(&path, "{ not json").unwrap();

        assert!(matches!(JsonFileStore::open(&path), Err(ScannerError::Storage(_))));
    }
}
