//! Resume records as seen by the search core

use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};

use crate::error::{Result, ScoutError};

/// Stable external identifier assigned by the record store.
pub type RecordId = i64;

/// Read-only snapshot of a stored resume.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Record {
    pub id: RecordId,
    pub candidate_name: String,
    pub raw_text: String,
    /// Lower-case, deduplicated skill tokens
    pub skills: BTreeSet<String>,
    pub title: Option<String>,
    /// Years of experience; `None` means unknown
    pub years_experience: Option<f64>,
    pub location: Option<String>,
}

impl Record {
    /// Minimal record with only the fields the index needs.
    pub fn new(id: RecordId, raw_text: impl Into<String>) -> Self {
        Self {
            id,
            candidate_name: String::new(),
            raw_text: raw_text.into(),
            skills: BTreeSet::new(),
            title: None,
            years_experience: None,
            location: None,
        }
    }

    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.candidate_name = name.into();
        self
    }

    pub fn with_skills<I, S>(mut self, skills: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        self.skills = normalize_skills(skills);
        self
    }

    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.title = Some(title.into());
        self
    }

    pub fn with_years(mut self, years: f64) -> Self {
        self.years_experience = Some(years);
        self
    }

    pub fn with_location(mut self, location: impl Into<String>) -> Self {
        self.location = Some(location.into());
        self
    }

    pub fn has_skill(&self, skill: &str) -> bool {
        self.skills.contains(skill)
    }
}

/// Resume fields accepted by the record store before an id is assigned.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct NewResume {
    pub candidate_name: String,
    pub raw_text: String,
    pub skills: Vec<String>,
    pub title: Option<String>,
    pub years_experience: Option<f64>,
    pub location: Option<String>,
}

/// Trim and lower-case a skill token. Blank input yields `None`.
pub fn normalize_skill(raw: &str) -> Option<String> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        None
    } else {
        Some(trimmed.to_lowercase())
    }
}

/// Normalize and deduplicate a collection of skill tokens.
pub fn normalize_skills<I, S>(skills: I) -> BTreeSet<String>
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    skills
        .into_iter()
        .filter_map(|s| normalize_skill(s.as_ref()))
        .collect()
}

/// Reject negative or non-finite years of experience. `None` is allowed.
pub fn validate_years(years: Option<f64>) -> Result<()> {
    match years {
        Some(value) if !value.is_finite() || value < 0.0 => Err(ScoutError::InvalidRecord(
            format!("years of experience must be a non-negative number, got {value}"),
        )),
        _ => Ok(()),
    }
}
