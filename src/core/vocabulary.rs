//! Versioned keyword vocabulary
//!
//! Keyword lists drive both query interpretation and resume field
//! extraction. They are configuration data (see `[vocabulary]` in
//! config.toml), so changing them bumps `version` rather than code.

use serde::{Deserialize, Serialize};

pub const VOCABULARY_VERSION: u32 = 1;

const QUERY_SKILLS: [&str; 7] = ["python", "flask", "fastapi", "react", "node", "aws", "docker"];

const RESUME_SKILLS: [&str; 21] = [
    "python",
    "flask",
    "fastapi",
    "docker",
    "aws",
    "postgresql",
    "api",
    "microservices",
    "rest",
    "sql",
    "react",
    "node",
    "mongodb",
    "html",
    "css",
    "tailwind",
    "bootstrap",
    "svelte",
    "typescript",
    "angular",
    "vue",
];

const TITLE_KEYWORDS: [&str; 9] = [
    "engineer",
    "developer",
    "scientist",
    "analyst",
    "manager",
    "designer",
    "architect",
    "lead",
    "specialist",
];

const LOCATIONS: [&str; 9] = [
    "bangalore",
    "mumbai",
    "delhi",
    "pune",
    "hyderabad",
    "chennai",
    "kolkata",
    "remote",
    "india",
];

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SkillVocabulary {
    #[serde(default)]
    pub version: u32,
    /// Skills recognised in recruiter queries
    #[serde(default)]
    pub query_skills: Vec<String>,
    /// Skills recognised in resume text
    #[serde(default)]
    pub resume_skills: Vec<String>,
    #[serde(default)]
    pub title_keywords: Vec<String>,
    #[serde(default)]
    pub locations: Vec<String>,
}

impl Default for SkillVocabulary {
    fn default() -> Self {
        Self {
            version: VOCABULARY_VERSION,
            query_skills: owned(&QUERY_SKILLS),
            resume_skills: owned(&RESUME_SKILLS),
            title_keywords: owned(&TITLE_KEYWORDS),
            locations: owned(&LOCATIONS),
        }
    }
}

impl SkillVocabulary {
    /// Copy with every keyword lower-cased, trimmed and deduplicated
    /// (first occurrence wins, so list order is preserved).
    #[must_use]
    pub fn normalized(&self) -> Self {
        Self {
            version: self.version,
            query_skills: dedup_lower(&self.query_skills),
            resume_skills: dedup_lower(&self.resume_skills),
            title_keywords: dedup_lower(&self.title_keywords),
            locations: dedup_lower(&self.locations),
        }
    }
}

fn owned(words: &[&str]) -> Vec<String> {
    words.iter().map(|w| (*w).to_string()).collect()
}

fn dedup_lower(words: &[String]) -> Vec<String> {
    let mut out: Vec<String> = Vec::with_capacity(words.len());
    for word in words {
        let word = word.trim().to_lowercase();
        if !word.is_empty() && !out.contains(&word) {
            out.push(word);
        }
    }
    out
}
