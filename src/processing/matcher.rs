//! Set-based skill matching and scoring

use crate::processing::vocabulary::SkillSet;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MatchResult {
    /// Required skills the résumé has
    pub matched: SkillSet,
    /// Required skills the résumé lacks
    pub missing: SkillSet,
    /// Percentage in [0, 100], two decimals
    pub score: f64,
}

impl MatchResult {
    /// Score as a fraction in [0, 1], the form kept in analysis records
    pub fn score_fraction(&self) -> f64 {
        self.score / 100.0
    }
}

/// Compare résumé skills with required skills. Never fails: no required
/// skills means a zero score.
pub fn match_skills(resume: &SkillSet, required: &SkillSet) -> MatchResult {
    let matched = resume.intersection(required);
    let missing = required.difference(resume);

    let score = if required.is_empty() {
        0.0
    } else {
        round_to_hundredths(100.0 * matched.len() as f64 / required.len() as f64)
    };

    MatchResult {
        matched,
        missing,
        score,
    }
}

pub fn round_to_hundredths(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}

#[cfg(test)]
mod tests {
    use super::*;

    fn set(items: &[&str]) -> SkillSet {
        items.iter().copied().collect()
    }

    #[test]
    fn test_partial_match() {
        let result = match_skills(&set(&["python", "django"]), &set(&["python", "django", "aws"]));

        assert_eq!(result.matched, set(&["python", "django"]));
        assert_eq!(result.missing, set(&["aws"]));
        assert_eq!(result.score, 66.67);
    }

    #[test]
    fn test_no_required_skills_scores_zero() {
        let result = match_skills(&set(&["python", "sql"]), &SkillSet::new());

        assert!(result.matched.is_empty());
        assert!(result.missing.is_empty());
        assert_eq!(result.score, 0.0);
    }

    #[test]
    fn test_superset_resume_scores_full() {
        let result = match_skills(&set(&["python", "aws", "git"]), &set(&["aws", "git"]));
        assert_eq!(result.score, 100.0);
        assert!(result.missing.is_empty());
    }

    #[test]
    fn test_matched_and_missing_are_disjoint_and_cover_required() {
        let resume = set(&["java", "spring", "docker"]);
        let required = set(&["java", "kubernetes", "docker", "aws"]);
        let result = match_skills(&resume, &required);

        assert!(result.matched.intersection(&result.missing).is_empty());
        assert_eq!(result.matched, resume.intersection(&required));
        assert_eq!(result.missing, required.difference(&resume));
        assert_eq!(result.matched.len() + result.missing.len(), required.len());
        assert_eq!(result.score, 50.0);
    }

    #[test]
    fn test_empty_resume() {
        let result = match_skills(&SkillSet::new(), &set(&["sql"]));
        assert_eq!(result.score, 0.0);
        assert_eq!(result.missing, set(&["sql"]));
        assert_eq!(result.score_fraction(), 0.0);
    }

    #[test]
    fn test_rounding() {
        assert_eq!(round_to_hundredths(100.0 / 3.0), 33.33);
        assert_eq!(round_to_hundredths(200.0 / 3.0), 66.67);
    }
}
