//! TF-IDF cosine-similarity ranking of résumés against a job description

use crate::error::{Result, ScannerError};
use crate::processing::text_processor::TextProcessor;
use log::debug;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// One résumé's similarity to the job description
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RankedResume {
    /// Position of the résumé in the input
    pub index: usize,
    pub score: f32,
}

/// TF-IDF model fitted on a small corpus: raw term counts, smoothed idf
/// `ln((1 + n) / (1 + df)) + 1`, L2-normalised rows.
#[derive(Debug, Clone)]
pub struct TfIdfModel {
    terms: BTreeMap<String, usize>,
    idf: Vec<f32>,
}

impl TfIdfModel {
    /// Terms shorter than two characters are not indexed.
    pub fn fit(documents: &[Vec<String>]) -> Result<Self> {
        let mut document_frequency: BTreeMap<String, usize> = BTreeMap::new();
        for document in documents {
            let mut seen: Vec<&str> = document
                .iter()
                .map(String::as_str)
                .filter(|t| t.chars().count() >= 2)
                .collect();
            seen.sort_unstable();
            seen.dedup();
            for term in seen {
                *document_frequency.entry(term.to_string()).or_insert(0) += 1;
            }
        }

        if document_frequency.is_empty() {
            return Err(ScannerError::RankerDegenerate(
                "empty vocabulary; documents contain only stop words or no words".to_string(),
            ));
        }

        let n = documents.len() as f32;
        let mut terms = BTreeMap::new();
        let mut idf = Vec::with_capacity(document_frequency.len());
        for (column, (term, df)) in document_frequency.into_iter().enumerate() {
            idf.push(((1.0 + n) / (1.0 + df as f32)).ln() + 1.0);
            terms.insert(term, column);
        }

        Ok(Self { terms, idf })
    }

    pub fn vocabulary_size(&self) -> usize {
        self.idf.len()
    }

    /// Dense, L2-normalised TF-IDF vector. All zeros when no term is known.
    pub fn transform(&self, document: &[String]) -> Vec<f32> {
        let mut vector = vec![0.0f32; self.idf.len()];
        for token in document {
            if let Some(&column) = self.terms.get(token) {
                vector[column] += 1.0;
            }
        }
        for (value, idf) in vector.iter_mut().zip(&self.idf) {
            *value *= idf;
        }

        let norm = vector.iter().map(|x| x * x).sum::<f32>().sqrt();
        if norm > 0.0 {
            for value in vector.iter_mut() {
                *value /= norm;
            }
        }
        vector
    }
}

/// Cosine similarity; zero when either vector has no magnitude
pub fn cosine_similarity(a: &[f32], b: &[f32]) -> f32 {
    let dot_product: f32 = a.iter().zip(b.iter()).map(|(x, y)| x * y).sum();
    let norm_a: f32 = a.iter().map(|x| x * x).sum::<f32>().sqrt();
    let norm_b: f32 = b.iter().map(|x| x * x).sum::<f32>().sqrt();

    if norm_a == 0.0 || norm_b == 0.0 {
        0.0
    } else {
        (dot_product / (norm_a * norm_b)).clamp(0.0, 1.0)
    }
}

#[derive(Debug, Clone, Default)]
pub struct SimilarityRanker {
    processor: TextProcessor,
}

impl SimilarityRanker {
    pub fn new() -> Self {
        Self::default()
    }

    /// Similarity of each résumé to the job description, parallel to
    /// `resumes`. The corpus is the job description followed by the
    /// résumés in order. Fails with `RankerDegenerate` when nothing in the
    /// corpus survives preprocessing.
    pub fn rank<S: AsRef<str>>(&self, job_description: &str, resumes: &[S]) -> Result<Vec<f32>> {
        let corpus: Vec<Vec<String>> = std::iter::once(job_description)
            .chain(resumes.iter().map(|resume| resume.as_ref()))
            .map(|text| self.processor.content_tokens(text))
            .collect();

        let model = TfIdfModel::fit(&corpus)?;
        debug!(
            "Fitted TF-IDF over {} documents, {} terms",
            corpus.len(),
            model.vocabulary_size()
        );

        let job_vector = model.transform(&corpus[0]);
        Ok(corpus[1..]
            .iter()
            .map(|document| cosine_similarity(&job_vector, &model.transform(document)))
            .collect())
    }

    /// Up to `limit` résumés, best first. Ties keep input order.
    pub fn rank_top<S: AsRef<str>>(
        &self,
        job_description: &str,
        resumes: &[S],
        limit: usize,
    ) -> Result<Vec<RankedResume>> {
        let mut ranked: Vec<RankedResume> = self
            .rank(job_description, resumes)?
            .into_iter()
            .enumerate()
            .map(|(index, score)| RankedResume { index, score })
            .collect();

        ranked.sort_by(|a, b| b.score.total_cmp(&a.score));
        ranked.truncate(limit);
        Ok(ranked)
    }
}
