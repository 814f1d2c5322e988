//! Skill extraction, matching and similarity ranking

pub mod analyzer;
pub mod matcher;
pub mod phrase_segmenter;
pub mod ranker;
pub mod skill_extractor;
pub mod text_processor;
pub mod vocabulary;

pub use analyzer::{ScanOutcome, ScanPipeline, ScanResult};
pub use matcher::{match_skills, MatchResult};
pub use ranker::{RankedResume, SimilarityRanker};
pub use skill_extractor::SkillExtractor;
pub use vocabulary::{SkillSet, SkillVocabulary};
