//! Resume field extraction
//!
//! Line- and regex-based heuristics that pull a candidate name, title,
//! years of experience, location and skills out of plain resume text.
//! Everything here is a pure function of the text and a
//! [`SkillVocabulary`], so it can be tested without the search core.

use std::path::Path;
use std::sync::LazyLock;

use regex::Regex;
use serde::{Deserialize, Serialize};

use crate::core::{NewResume, SkillVocabulary};

/// Placeholder used when no name can be found.
pub const UNKNOWN_CANDIDATE: &str = "Resume Candidate";

const HEADER_WORDS: [&str; 4] = ["resume", "curriculum vitae", "cv", "profile"];

/// Experience phrasings, tried in order. Group 1 is the number of years.
static EXPERIENCE_PATTERNS: LazyLock<Vec<Regex>> = LazyLock::new(|| {
    [
        r"(?i)(\d+(?:\.\d+)?)\s*\+?\s*years?[^\n]*experience",
        r"(?i)experience[^\d]*(\d+(?:\.\d+)?)\s*\+?\s*years?",
        r"(?i)over\s+(\d+(?:\.\d+)?)\s*\+?\s*years?",
        r"(?i)(\d+)\s*years?[^.]*at",
        r"(?i)(\d+(?:\.\d+)?)\s*\+?\s*yrs?[^\n]*exp",
    ]
    .iter()
    .map(|pattern| Regex::new(pattern).unwrap())
    .collect()
});

static NUMBER_REGEX: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"\d+(?:\.\d+)?").unwrap());

static TITLE_LABEL_REGEX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)title:\s*(.*)").unwrap());

static LOCATION_LABEL_REGEX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)location:\s*([^\n]+)").unwrap());

/// Fields recovered from resume text
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ExtractedResume {
    pub candidate_name: String,
    pub title: Option<String>,
    pub years_experience: Option<f64>,
    pub location: Option<String>,
    /// Vocabulary skills in order of first appearance
    pub skills: Vec<String>,
}

impl ExtractedResume {
    /// Whether the name fell back to the placeholder
    pub fn has_unknown_name(&self) -> bool {
        self.candidate_name.is_empty() || self.candidate_name == UNKNOWN_CANDIDATE
    }

    pub fn into_new_resume(self, raw_text: impl Into<String>) -> NewResume {
        NewResume {
            candidate_name: self.candidate_name,
            raw_text: raw_text.into(),
            skills: self.skills,
            title: self.title,
            years_experience: self.years_experience,
            location: self.location,
        }
    }
}

/// Extract every field from `raw_text`.
pub fn extract_resume_info(raw_text: &str, vocabulary: &SkillVocabulary) -> ExtractedResume {
    let vocabulary = vocabulary.normalized();
    let lines: Vec<&str> = raw_text
        .lines()
        .map(str::trim)
        .filter(|line| !line.is_empty())
        .collect();

    ExtractedResume {
        candidate_name: extract_name(&lines),
        title: extract_title(raw_text, &lines, &vocabulary.title_keywords),
        years_experience: extract_years(raw_text, &lines),
        location: extract_location(raw_text, &vocabulary.locations),
        skills: extract_skills(raw_text, &vocabulary.resume_skills),
    }
}

/// First short line (2-4 words, containing a letter) among the first six.
fn extract_name(lines: &[&str]) -> String {
    let name = lines
        .iter()
        .take(6)
        .find(|line| {
            let words = line.split_whitespace().count();
            line.chars().any(char::is_alphabetic) && (2..=4).contains(&words)
        })
        .map_or_else(|| UNKNOWN_CANDIDATE.to_string(), |line| (*line).to_string());

    if HEADER_WORDS.contains(&name.to_lowercase().as_str()) {
        return lines
            .get(1)
            .map_or_else(|| UNKNOWN_CANDIDATE.to_string(), |line| (*line).to_string());
    }
    name
}

fn extract_title(raw_text: &str, lines: &[&str], keywords: &[String]) -> Option<String> {
    let from_lines = lines.iter().take(10).find(|line| {
        let lower = line.to_lowercase();
        keywords.iter().any(|kw| lower.contains(kw.as_str()))
            && !lower.contains("experience")
            && !lower.contains("skill")
            && line.chars().count() < 60
    });
    if let Some(line) = from_lines {
        return Some((*line).to_string());
    }

    TITLE_LABEL_REGEX
        .captures(raw_text)
        .and_then(|caps| caps.get(1))
        .map(|m| m.as_str().trim().to_string())
        .filter(|title| !title.is_empty())
}

fn extract_years(raw_text: &str, lines: &[&str]) -> Option<f64> {
    let labelled = EXPERIENCE_PATTERNS.iter().find_map(|pattern| {
        pattern
            .captures(raw_text)
            .and_then(|caps| caps.get(1))
            .and_then(|m| m.as_str().parse::<f64>().ok())
            .filter(|years| *years > 0.0)
    });
    if labelled.is_some() {
        return labelled;
    }

    lines
        .iter()
        .take(15)
        .filter(|line| line.to_lowercase().contains("year"))
        .flat_map(|line| NUMBER_REGEX.find_iter(line))
        .filter_map(|m| m.as_str().parse::<f64>().ok())
        .find(|years| *years > 0.0 && *years < 50.0)
}

fn extract_location(raw_text: &str, locations: &[String]) -> Option<String> {
    if let Some(location) = LOCATION_LABEL_REGEX
        .captures(raw_text)
        .and_then(|caps| caps.get(1))
        .map(|m| m.as_str().trim().to_string())
        .filter(|location| !location.is_empty())
    {
        return Some(location);
    }

    let lower = raw_text.to_lowercase();
    locations
        .iter()
        .find(|place| lower.contains(place.as_str()))
        .map(|place| title_case(place))
}

/// Vocabulary skills present as whole words, ordered by first appearance.
fn extract_skills(raw_text: &str, skills: &[String]) -> Vec<String> {
    let lower = raw_text.to_lowercase();
    let mut found: Vec<(usize, String)> = skills
        .iter()
        .filter_map(|skill| {
            let pattern = format!(r"\b{}\b", regex::escape(skill));
            let regex = Regex::new(&pattern).ok()?;
            regex.find(&lower).map(|m| (m.start(), skill.clone()))
        })
        .collect();
    found.sort_by_key(|(pos, _)| *pos);
    found.into_iter().map(|(_, skill)| skill).collect()
}

/// Candidate name derived from an upload's file name: extension dropped,
/// separators turned into spaces, words title-cased.
pub fn name_from_filename(path: &Path) -> Option<String> {
    let stem = path.file_stem()?.to_string_lossy();
    let spaced = stem.replace(['_', '-'], " ");
    let name = spaced
        .split_whitespace()
        .map(title_case)
        .collect::<Vec<_>>()
        .join(" ");
    if name.is_empty() { None } else { Some(name) }
}

fn title_case(word: &str) -> String {
    word.split(' ')
        .map(|part| {
            let mut chars = part.chars();
            chars.next().map_or_else(String::new, |first| {
                first.to_uppercase().chain(chars.flat_map(char::to_lowercase)).collect()
            })
        })
        .collect::<Vec<_>>()
        .join(" ")
}
