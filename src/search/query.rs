//! Recruiter query interpretation
//!
//! A deliberately coarse keyword heuristic: tracked skills are matched as
//! substrings of the lower-cased query and "N year(s)" phrases set the
//! experience floor. Parsing is total; any input yields a requirement.

use std::ops::RangeInclusive;
use std::sync::LazyLock;

use regex::Regex;

use crate::core::{SkillVocabulary, StructuredRequirement};

/// Years values outside this range are ignored.
pub const YEARS_RANGE: RangeInclusive<u32> = 1..=15;

static YEARS_PATTERN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(\d+)\+?\s*years?").expect("years pattern is valid")
});

/// Turns free-text queries into [`StructuredRequirement`]s.
#[derive(Debug, Clone)]
pub struct QueryInterpreter {
    skills: Vec<String>,
}

impl Default for QueryInterpreter {
    fn default() -> Self {
        Self::new(&SkillVocabulary::default())
    }
}

impl QueryInterpreter {
    pub fn new(vocabulary: &SkillVocabulary) -> Self {
        Self {
            skills: vocabulary.normalized().query_skills,
        }
    }

    /// Skills this interpreter can recognise
    pub fn tracked_skills(&self) -> &[String] {
        &self.skills
    }

    pub fn parse(&self, message: &str) -> StructuredRequirement {
        let text = message.to_lowercase();

        let must_have = self
            .skills
            .iter()
            .filter(|skill| text.contains(skill.as_str()));

        StructuredRequirement::new(must_have, parse_min_years(&text))
    }
}

/// Largest in-range "N year"/"N years" value, or zero.
fn parse_min_years(text: &str) -> u32 {
    YEARS_PATTERN
        .captures_iter(text)
        .filter_map(|caps| caps.get(1)?.as_str().parse::<u32>().ok())
        .filter(|years| YEARS_RANGE.contains(years))
        .max()
        .unwrap_or(0)
}
