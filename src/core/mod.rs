//! Core resume types shared by storage, extraction and search

pub mod matching;
pub mod record;
pub mod vocabulary;

pub use matching::{MatchResult, StructuredRequirement, round2};
pub use record::{NewResume, Record, RecordId, normalize_skill, normalize_skills, validate_years};
pub use vocabulary::SkillVocabulary;
