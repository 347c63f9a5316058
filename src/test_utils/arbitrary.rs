use proptest::prelude::*;

use crate::core::{Record, StructuredRequirement};
use crate::search::rerank::Candidate;

const SKILL_POOL: [&str; 10] = [
    "python", "flask", "fastapi", "react", "node", "aws", "docker", "sql", "vue", "rust",
];

fn arb_skills() -> impl Strategy<Value = Vec<&'static str>> {
    prop::sample::subsequence(SKILL_POOL.to_vec(), 0..=SKILL_POOL.len())
}

pub fn arb_record(id: i64) -> impl Strategy<Value = Record> {
    (
        "[a-z]{3,10}( [a-z]{3,10}){0,12}",
        arb_skills(),
        prop::option::of(0.0f64..30.0),
    )
        .prop_map(move |(text, skills, years)| {
            let record = Record::new(id, text).with_skills(skills);
            match years {
                Some(years) => record.with_years(years),
                None => record,
            }
        })
}

pub fn arb_requirement() -> impl Strategy<Value = StructuredRequirement> {
    (arb_skills(), 0u32..=15).prop_map(|(skills, years)| StructuredRequirement::new(skills, years))
}

/// Candidates with distinct ids `1..=n` and similarities in [-1, 1].
pub fn arb_candidates(max: usize) -> impl Strategy<Value = Vec<Candidate>> {
    prop::collection::vec((arb_record(0), prop::option::of(-1.0f32..=1.0)), 0..max).prop_map(
        |pairs| {
            pairs
                .into_iter()
                .enumerate()
                .map(|(idx, (mut record, similarity))| {
                    record.id = idx as i64 + 1;
                    Candidate { record, similarity }
                })
                .collect()
        },
    )
}
