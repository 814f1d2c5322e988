//! Skill vocabulary and skill sets

use crate::error::{Result, ScannerError};
use serde::{Deserialize, Serialize};
use std::collections::{BTreeSet, HashSet};
use std::sync::{Arc, OnceLock};

/// Built-in skill catalogue. Entries are lowercase and matched literally,
/// punctuation and inner spaces included.
pub const BUILTIN_SKILLS: &[&str] = &[
    "python", "java", "javascript", "html", "css", "sql", "react", "angular", "vue",
    "node.js", "express", "django", "flask", "spring", "docker", "kubernetes",
    "aws", "azure", "gcp", "machine learning", "data science", "ai", "devops",
    "ci/cd", "git", "agile", "scrum", "rest api", "graphql", "microservices",
];

/// Ordered, de-duplicated set of lowercase skill names. Immutable once built.
#[derive(Debug, Clone)]
pub struct SkillVocabulary {
    entries: Vec<String>,
    lookup: HashSet<String>,
}

impl SkillVocabulary {
    /// Shared instance of the built-in list, built on first use
    pub fn builtin() -> Arc<SkillVocabulary> {
        static BUILTIN: OnceLock<Arc<SkillVocabulary>> = OnceLock::new();
        BUILTIN
            .get_or_init(|| Arc::new(Self::from_normalized(BUILTIN_SKILLS.iter().map(|s| s.to_string()))))
            .clone()
    }

    /// Built-in list followed by `additional`, lowercased and trimmed.
    /// Order is preserved and later duplicates are dropped.
    pub fn with_additional<I, S>(additional: I) -> Result<Self>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut entries: Vec<String> = BUILTIN_SKILLS.iter().map(|s| s.to_string()).collect();
        for skill in additional {
            let normalized = skill.as_ref().trim().to_lowercase();
            if normalized.is_empty() {
                return Err(ScannerError::Configuration(
                    "Skill vocabulary entries must not be blank".to_string(),
                ));
            }
            entries.push(normalized);
        }
        Ok(Self::from_normalized(entries))
    }

    fn from_normalized(entries: impl IntoIterator<Item = String>) -> Self {
        let mut lookup = HashSet::new();
        let entries = entries
            .into_iter()
            .filter(|e| lookup.insert(e.clone()))
            .collect();
        Self { entries, lookup }
    }

    pub fn entries(&self) -> &[String] {
        &self.entries
    }

    pub fn contains(&self, skill: &str) -> bool {
        self.lookup.contains(skill)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

/// Set of recognised skills. Sorted iteration keeps output stable; the
/// order itself means nothing.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SkillSet(BTreeSet<String>);

impl SkillSet {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, skill: impl Into<String>) -> bool {
        self.0.insert(skill.into())
    }

    pub fn contains(&self, skill: &str) -> bool {
        self.0.contains(skill)
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.0.iter().map(String::as_str)
    }

    pub fn intersection(&self, other: &SkillSet) -> SkillSet {
        self.0.intersection(&other.0).cloned().collect()
    }

    pub fn difference(&self, other: &SkillSet) -> SkillSet {
        self.0.difference(&other.0).cloned().collect()
    }

    pub fn to_vec(&self) -> Vec<String> {
        self.0.iter().cloned().collect()
    }
}

impl FromIterator<String> for SkillSet {
    fn from_iter<T: IntoIterator<Item = String>>(iter: T) -> Self {
        SkillSet(iter.into_iter().collect())
    }
}

impl<'a> FromIterator<&'a str> for SkillSet {
    fn from_iter<T: IntoIterator<Item = &'a str>>(iter: T) -> Self {
        SkillSet(iter.into_iter().map(str::to_string).collect())
    }
}

impl Extend<String> for SkillSet {
    fn extend<T: IntoIterator<Item = String>>(&mut self, iter: T) {
        self.0.extend(iter)
    }
}
