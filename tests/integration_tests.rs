//! Integration tests for the resume scanner

use resume_scanner::config::InputConfig;
use resume_scanner::input::{DocumentSource, InputManager};
use resume_scanner::processing::{ScanPipeline, SimilarityRanker, SkillExtractor, SkillSet};
use resume_scanner::storage::{self, uploads, JsonFileStore, RecordStore};
use resume_scanner::ScannerError;
use std::path::Path;
use tempfile::TempDir;

/// PDF with one page per entry, each holding one line of Helvetica text.
/// A `None` page has no content stream at all.
fn pdf_with_pages(pages: &[Option<&str>]) -> Vec<u8> {
    // 1 catalog, 2 page tree, 3 font, then each page followed by its content
    let mut page_ids = Vec::with_capacity(pages.len());
    let mut next_id = 4;
    for text in pages {
        page_ids.push(next_id);
        next_id += if text.is_some() { 2 } else { 1 };
    }
    let kids = page_ids
        .iter()
        .map(|id| format!("{} 0 R", id))
        .collect::<Vec<_>>()
        .join(" ");

    let mut objects = vec![
        "<< /Type /Catalog /Pages 2 0 R >>".to_string(),
        format!("<< /Type /Pages /Kids [{}] /Count {} >>", kids, pages.len()),
        "<< /Type /Font /Subtype /Type1 /BaseFont /Helvetica /Encoding /WinAnsiEncoding >>".to_string(),
    ];
    let page_dict = "<< /Type /Page /Parent 2 0 R /MediaBox [0 0 612 792] /Resources << /Font << /F1 3 0 R >> >>";
    for (text, page_id) in pages.iter().zip(&page_ids) {
        match text {
            Some(text) => {
                let content = format!(
                    "BT /F1 12 Tf 72 712 Td ({}) Tj ET",
                    text.replace('\\', "\\\\").replace('(', "\\(").replace(')', "\\)")
                );
                objects.push(format!("{} /Contents {} 0 R >>", page_dict, page_id + 1));
                objects.push(format!("<< /Length {} >>\nstream\n{}\nendstream", content.len(), content));
            }
            None => objects.push(format!("{} >>", page_dict)),
        }
    }

    let mut pdf = b"%PDF-1.4\n".to_vec();
    let mut offsets = Vec::with_capacity(objects.len());
    for (i, body) in objects.iter().enumerate() {
        offsets.push(pdf.len());
        pdf.extend_from_slice(format!("{} 0 obj\n{}\nendobj\n", i + 1, body).as_bytes());
    }

    let xref_offset = pdf.len();
    pdf.extend_from_slice(format!("xref\n0 {}\n0000000000 65535 f \n", objects.len() + 1).as_bytes());
    for offset in offsets {
        pdf.extend_from_slice(format!("{:010} 00000 n \n", offset).as_bytes());
    }
    pdf.extend_from_slice(
        format!(
            "trailer\n<< /Size {} /Root 1 0 R >>\nstartxref\n{}\n%%EOF\n",
            objects.len() + 1,
            xref_offset
        )
        .as_bytes(),
    );
    pdf
}

/// Single-page PDF with one line of text, or a page with nothing on it
fn minimal_pdf(text: Option<&str>) -> Vec<u8> {
    pdf_with_pages(&[text])
}

fn pipeline() -> ScanPipeline {
    ScanPipeline::new(SkillExtractor::builtin().unwrap())
}

fn input_config(max_upload_bytes: u64) -> InputConfig {
    InputConfig {
        max_upload_bytes,
        allowed_extensions: vec!["pdf".to_string()],
    }
}

fn skills(names: &[&str]) -> SkillSet {
    names.iter().copied().collect()
}

#[tokio::test]
async fn test_scan_pdf_against_job_description() {
    let pdf = minimal_pdf(Some("I have 5 years of Python and Django experience"));

    let outcome = pipeline()
        .scan_source(&DocumentSource::Bytes(pdf), "Looking for Python, Django, and AWS skills")
        .await
        .unwrap();

    assert!(outcome.resume_text.contains("Python"));
    assert_eq!(outcome.result.skills, skills(&["python", "django"]));
    assert_eq!(outcome.required_skills, skills(&["python", "django", "aws"]));
    assert_eq!(outcome.result.matched_skills, skills(&["python", "django"]));
    assert_eq!(outcome.result.missing_skills, skills(&["aws"]));
    assert_eq!(outcome.result.score, 66.67);
}

#[tokio::test]
async fn test_scan_with_empty_job_description() {
    let pdf = minimal_pdf(Some("Python, SQL and Docker"));

    let outcome = pipeline().scan_source(&DocumentSource::Bytes(pdf), "").await.unwrap();

    assert!(outcome.required_skills.is_empty());
    assert!(outcome.result.missing_skills.is_empty());
    assert_eq!(outcome.result.score, 0.0);
}

#[tokio::test]
async fn test_pdf_without_text_is_not_an_error() {
    let pdf = minimal_pdf(None);

    let outcome = pipeline()
        .scan_source(&DocumentSource::Bytes(pdf), "python")
        .await
        .unwrap();

    assert!(outcome.resume_text.trim().is_empty());
    assert!(outcome.result.skills.is_empty());
    assert_eq!(outcome.result.missing_skills, skills(&["python"]));
    assert_eq!(outcome.result.score, 0.0);
}

#[tokio::test]
async fn test_multi_page_pdf_joins_pages_in_order() {
    let pdf = pdf_with_pages(&[Some("Python skills"), None, Some("Docker skills")]);

    let outcome = pipeline()
        .scan_source(&DocumentSource::Bytes(pdf), "python and docker")
        .await
        .unwrap();

    let python = outcome.resume_text.find("Python skills").unwrap();
    let docker = outcome.resume_text.find("Docker skills").unwrap();
    assert!(python < docker);
    assert_eq!(outcome.result.skills, skills(&["python", "docker"]));
    assert_eq!(outcome.result.missing_skills, SkillSet::default());
    assert_eq!(outcome.result.score, 100.0);
}

#[tokio::test]
async fn test_unreadable_pdf_reports_could_not_read() {
    let temp_dir = TempDir::new().unwrap();
    let path = temp_dir.path().join("broken.pdf");
    std::fs::write(&path, b"this is not a pdf").unwrap();

    let err = pipeline()
        .scan_source(&DocumentSource::from(path.as_path()), "python")
        .await
        .unwrap_err();
    assert!(err.is_unreadable_document());

    let missing = pipeline()
        .scan_source(&DocumentSource::from(Path::new("/no/such/cv.pdf")), "python")
        .await
        .unwrap_err();
    assert!(matches!(missing, ScannerError::SourceNotFound(_)));
}

#[tokio::test]
async fn test_upload_validation() {
    let temp_dir = TempDir::new().unwrap();
    let manager = InputManager::new(&input_config(64));

    let text_file = temp_dir.path().join("resume.txt");
    std::fs::write(&text_file, "python").unwrap();
    assert!(matches!(
        manager.read_upload(&text_file).await,
        Err(ScannerError::UnsupportedFormat(_))
    ));

    let large_pdf = temp_dir.path().join("large.pdf");
    std::fs::write(&large_pdf, vec![b'x'; 65]).unwrap();
    assert!(matches!(
        manager.read_upload(&large_pdf).await,
        Err(ScannerError::UploadTooLarge { size: 65, limit: 64 })
    ));

    let missing = temp_dir.path().join("missing.pdf");
    assert!(matches!(
        manager.read_upload(&missing).await,
        Err(ScannerError::SourceNotFound(_))
    ));

    let disguised = temp_dir.path().join("disguised.pdf");
    std::fs::write(&disguised, "python and docker").unwrap();
    match manager.read_upload(&disguised).await {
        Err(ScannerError::UnsupportedFormat(message)) => assert!(message.contains("disguised.pdf")),
        other => panic!("expected UnsupportedFormat, got {:?}", other.map(|u| u.original_name)),
    }

    let small_pdf = temp_dir.path().join("Small CV.PDF");
    std::fs::write(&small_pdf, b"%PDF-1.4").unwrap();
    let upload = manager.read_upload(&small_pdf).await.unwrap();
    assert_eq!(upload.original_name, "Small CV.PDF");
    assert_eq!(upload.bytes, b"%PDF-1.4");
}

#[tokio::test]
async fn test_scan_persist_and_history() {
    let temp_dir = TempDir::new().unwrap();
    let resume_path = temp_dir.path().join("Jane Doe CV.pdf");
    std::fs::write(&resume_path, minimal_pdf(Some("Python and Django developer"))).unwrap();
    let records_path = temp_dir.path().join("data").join("records.json");

    let manager = InputManager::new(&input_config(16 * 1024 * 1024));
    let upload = manager.read_upload(&resume_path).await.unwrap();
    let (filename, stored) = uploads::store_upload(&temp_dir.path().join("uploads"), &upload.original_name, &upload.bytes)
        .await
        .unwrap();
    assert_eq!(filename, "Jane_Doe_CV.pdf");
    assert!(stored.exists());

    let job = "Looking for Python, Django, and AWS skills";
    let outcome = pipeline().scan_pdf_bytes(&upload.bytes, job).unwrap();

    {
        let mut store = JsonFileStore::open(&records_path).unwrap();
        storage::save_scan(&mut store, &filename, Some("Backend Engineer"), job, &outcome).unwrap();
    }

    let reopened = JsonFileStore::open(&records_path).unwrap();
    let history = reopened.recent_analyses(10).unwrap();
    assert_eq!(history.len(), 1);
    assert_eq!(history[0].resume_name, "Jane_Doe_CV.pdf");
    assert_eq!(history[0].match_score, 66.67);
    assert_eq!(history[0].skills_matched, vec!["django".to_string(), "python".to_string()]);
    assert_eq!(history[0].analysis_date.len(), "2024-01-01 00:00:00".len());
}

#[tokio::test]
async fn test_rank_fixture_resumes() {
    let mut manager = InputManager::new(&input_config(16 * 1024 * 1024));
    let job = manager
        .extract_text(Path::new("tests/fixtures/job_description.md"))
        .await
        .unwrap();
    let resumes = vec![
        manager
            .extract_text(Path::new("tests/fixtures/resume_cooking.txt"))
            .await
            .unwrap(),
        manager
            .extract_text(Path::new("tests/fixtures/resume_python.txt"))
            .await
            .unwrap(),
    ];

    let ranked = SimilarityRanker::new().rank_top(&job, &resumes, 10).unwrap();

    assert_eq!(ranked.len(), 2);
    assert_eq!(ranked[0].index, 1);
    assert!(ranked[0].score > ranked[1].score);
    assert_eq!(ranked[1].score, 0.0);
}

#[tokio::test]
async fn test_job_description_from_files() {
    let mut manager = InputManager::new(&input_config(16 * 1024 * 1024));
    let extractor = SkillExtractor::builtin().unwrap();

    let markdown = manager
        .extract_text(Path::new("tests/fixtures/job_description.md"))
        .await
        .unwrap();
    assert!(!markdown.contains("**"));
    assert!(!markdown.contains('#'));
    let required = extractor.extract(&markdown);
    for skill in ["python", "django", "aws", "docker", "rest api"] {
        assert!(required.contains(skill), "missing {}", skill);
    }

    let text = manager
        .extract_text(Path::new("tests/fixtures/job_description.txt"))
        .await
        .unwrap();
    assert_eq!(extractor.extract(&text), skills(&["python", "django", "aws"]));

    // second read is served from the cache
    manager
        .extract_text(Path::new("tests/fixtures/job_description.txt"))
        .await
        .unwrap();
    assert_eq!(manager.cache_size(), 2);
}
