//! Query requirements and ranked match results

use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};

use super::record::{RecordId, normalize_skill};

/// Structured form of a free-text recruiter query.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct StructuredRequirement {
    /// Required skill tokens (lower-case, deduplicated)
    pub must_have: BTreeSet<String>,
    /// Minimum years of experience; zero disables the filter
    pub min_years: u32,
    /// `must_have` in the order the skills were first given
    #[serde(skip)]
    skill_order: Vec<String>,
}

impl StructuredRequirement {
    pub fn new<I, S>(must_have: I, min_years: u32) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut set = BTreeSet::new();
        let mut skill_order = Vec::new();
        for skill in must_have.into_iter().filter_map(|s| normalize_skill(s.as_ref())) {
            if set.insert(skill.clone()) {
                skill_order.push(skill);
            }
        }
        Self {
            must_have: set,
            min_years,
            skill_order,
        }
    }

    /// True when the requirement neither demands skills nor filters by years.
    pub fn is_empty(&self) -> bool {
        self.must_have.is_empty() && self.min_years == 0
    }

    /// Required skills in the order they were given. Requirements built
    /// without an order (deserialized, or `must_have` edited in place) fall
    /// back to alphabetical order.
    pub fn skills_in_order(&self) -> Vec<&str> {
        let in_sync = self.skill_order.len() == self.must_have.len()
            && self.skill_order.iter().all(|s| self.must_have.contains(s));
        if in_sync {
            self.skill_order.iter().map(String::as_str).collect()
        } else {
            self.must_have.iter().map(String::as_str).collect()
        }
    }
}

impl PartialEq for StructuredRequirement {
    fn eq(&self, other: &Self) -> bool {
        self.must_have == other.must_have && self.min_years == other.min_years
    }
}

impl Eq for StructuredRequirement {}

/// A single reranked candidate. Scores are kept at full precision; use the
/// `*_pct` helpers for display.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MatchResult {
    pub id: RecordId,
    /// Cosine similarity from the vector index, in [-1, 1]
    pub similarity: f32,
    /// Fraction of required skills present, in [0, 1]
    pub skill_match: f64,
    /// Blended ranking score
    pub score: f64,
    pub matched: Vec<String>,
    pub missing: Vec<String>,
    pub explanation: String,
}

impl MatchResult {
    /// Final score scaled to a percentage, rounded to two decimals.
    pub fn match_score_pct(&self) -> f64 {
        round2(self.score * 100.0)
    }

    /// Skill match scaled to a percentage, rounded to two decimals.
    pub fn skill_match_pct(&self) -> f64 {
        round2(self.skill_match * 100.0)
    }
}

/// Round to two decimal places.
pub fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}

#[cfg(test)]
mod tests {
    use super::*;

    fn result(score: f64, skill_match: f64) -> MatchResult {
        MatchResult {
            id: 1,
            similarity: 0.5,
            skill_match,
            score,
            matched: Vec::new(),
            missing: Vec::new(),
            explanation: String::new(),
        }
    }

    #[test]
    fn requirement_normalizes_skills() {
        let req = StructuredRequirement::new(["Python", "python", "Docker"], 3);
        assert_eq!(req.must_have.len(), 2);
        assert!(req.must_have.contains("docker"));
        assert_eq!(req.min_years, 3);
    }

    #[test]
    fn requirement_keeps_first_seen_order() {
        let req = StructuredRequirement::new(["Python", "flask", "AWS", "python"], 0);
        assert_eq!(req.skills_in_order(), vec!["python", "flask", "aws"]);
        assert_eq!(req, StructuredRequirement::new(["aws", "flask", "python"], 0));
    }

    #[test]
    fn deserialized_requirement_orders_alphabetically() {
        let req: StructuredRequirement =
            serde_json::from_str(r#"{"must_have":["react","aws"],"min_years":2}"#).unwrap();
        assert_eq!(req.skills_in_order(), vec!["aws", "react"]);

        let mut edited = StructuredRequirement::new(["react", "node"], 0);
        edited.must_have.insert("aws".to_string());
        assert_eq!(edited.skills_in_order(), vec!["aws", "node", "react"]);
    }

    #[test]
    fn default_requirement_is_empty() {
        assert!(StructuredRequirement::default().is_empty());
        assert!(!StructuredRequirement::new(["aws"], 0).is_empty());
        assert!(!StructuredRequirement::new(Vec::<String>::new(), 2).is_empty());
    }

    #[test]
    fn percentages_are_scaled_and_rounded() {
        let r = result(0.834_567, 0.5);
        assert!((r.match_score_pct() - 83.46).abs() < 1e-9);
        assert!((r.skill_match_pct() - 50.0).abs() < 1e-9);
    }

    #[test]
    fn round2_handles_negative_values() {
        assert!((round2(-0.126) - -0.13).abs() < 1e-9);
        assert!((round2(1.0) - 1.0).abs() < f64::EPSILON);
    }
}
