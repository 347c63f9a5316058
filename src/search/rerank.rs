//! Skill-aware reranking of semantic candidates
//!
//! Each candidate passes through:
//! 1. a hard experience filter (known years below the requirement removes it)
//! 2. a skill match ratio (required skills present / required skills)
//! 3. a blended score
//!
//! ```text
//! score = semantic_weight * similarity + skill_weight * skill_match
//! ```
//!
//! Results are sorted by score (descending), ties by ascending id.

use std::cmp::Ordering;

use crate::core::{MatchResult, Record, StructuredRequirement};

/// Separator between explanation clauses
pub const EXPLANATION_DELIMITER: &str = " | ";

/// A record retrieved for ranking with its semantic score, if any.
#[derive(Debug, Clone)]
pub struct Candidate {
    pub record: Record,
    /// Cosine similarity from the vector index; `None` scores as 0.0
    pub similarity: Option<f32>,
}

impl Candidate {
    pub fn new(record: Record, similarity: f32) -> Self {
        Self {
            record,
            similarity: Some(similarity),
        }
    }
}

/// Blend weights for the final score
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Reranker {
    pub semantic_weight: f64,
    pub skill_weight: f64,
}

impl Default for Reranker {
    fn default() -> Self {
        Self {
            semantic_weight: 0.6,
            skill_weight: 0.4,
        }
    }
}

impl Reranker {
    pub fn with_weights(semantic_weight: f64, skill_weight: f64) -> Self {
        Self {
            semantic_weight,
            skill_weight,
        }
    }

    /// Filter, score, explain and sort `candidates`, keeping at most `top_k`.
    pub fn rank(
        &self,
        requirement: &StructuredRequirement,
        candidates: &[Candidate],
        top_k: usize,
    ) -> Vec<MatchResult> {
        let mut results: Vec<MatchResult> = candidates
            .iter()
            .filter(|c| passes_experience_filter(requirement, &c.record))
            .map(|c| self.score(requirement, c))
            .collect();

        results.sort_by(|a, b| {
            b.score
                .partial_cmp(&a.score)
                .unwrap_or(Ordering::Equal)
                .then_with(|| a.id.cmp(&b.id))
        });
        results.truncate(top_k);
        results
    }

    /// Score a single candidate without applying the experience filter.
    pub fn score(&self, requirement: &StructuredRequirement, candidate: &Candidate) -> MatchResult {
        let record = &candidate.record;
        let similarity = candidate.similarity.unwrap_or(0.0);
        let skill_match = skill_match_ratio(requirement, record);
        let score =
            self.semantic_weight * f64::from(similarity) + self.skill_weight * skill_match;

        let (matched, missing): (Vec<String>, Vec<String>) = requirement
            .skills_in_order()
            .into_iter()
            .map(str::to_string)
            .partition(|skill| record.has_skill(skill));
        let explanation = build_explanation(&matched, &missing, similarity, skill_match);

        MatchResult {
            id: record.id,
            similarity,
            skill_match,
            score,
            matched,
            missing,
            explanation,
        }
    }
}

/// False only when the requirement sets a floor and the record's known
/// experience is strictly below it. Unknown experience always passes.
pub fn passes_experience_filter(requirement: &StructuredRequirement, record: &Record) -> bool {
    if requirement.min_years == 0 {
        return true;
    }
    match record.years_experience {
        Some(years) => years >= f64::from(requirement.min_years),
        None => true,
    }
}

/// Fraction of required skills the record has; 1.0 when nothing is required.
pub fn skill_match_ratio(requirement: &StructuredRequirement, record: &Record) -> f64 {
    if requirement.must_have.is_empty() {
        return 1.0;
    }
    let overlap = requirement
        .must_have
        .iter()
        .filter(|skill| record.has_skill(skill))
        .count();
    overlap as f64 / requirement.must_have.len() as f64
}

/// "Matches: a, b | Missing: c | Similarity 0.83, skill match 0.67"
pub fn build_explanation(
    matched: &[String],
    missing: &[String],
    similarity: f32,
    skill_match: f64,
) -> String {
    let mut parts = Vec::with_capacity(3);
    if !matched.is_empty() {
        parts.push(format!("Matches: {}", matched.join(", ")));
    }
    if !missing.is_empty() {
        parts.push(format!("Missing: {}", missing.join(", ")));
    }
    parts.push(format!(
        "Similarity {similarity:.2}, skill match {skill_match:.2}"
    ));
    parts.join(EXPLANATION_DELIMITER)
}
