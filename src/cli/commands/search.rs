//! scout search - Find the best matching resumes
//!
//! Semantic retrieval over the resume index followed by skill and
//! experience aware reranking.

use clap::Args;
use colored::Colorize;

use crate::app::AppContext;
use crate::error::Result;
use crate::search::SearchReport;

use super::truncate_str;

#[derive(Args, Debug)]
pub struct SearchArgs {
    /// Recruiter query, e.g. "python developer with 5 years of experience"
    pub query: String,

    /// Maximum number of results (default: search.default_top_k)
    #[arg(long, short = 'k')]
    pub top_k: Option<usize>,
}

pub fn run(ctx: &AppContext, args: &SearchArgs) -> Result<()> {
    let top_k = args
        .top_k
        .unwrap_or(ctx.config.search.default_top_k as usize);
    let service = ctx.search_service()?;
    let report = service.search(&args.query, top_k)?;

    if ctx.robot_mode {
        display_robot(&report, top_k)
    } else {
        display_human(&report);
        Ok(())
    }
}

fn display_robot(report: &SearchReport, top_k: usize) -> Result<()> {
    let results: Vec<serde_json::Value> = report
        .matches
        .iter()
        .map(|m| {
            serde_json::json!({
                "id": m.record.id,
                "candidate_name": m.record.candidate_name,
                "title": m.record.title,
                "years_experience": m.record.years_experience,
                "location": m.record.location,
                "skills": m.record.skills,
                "match_score": m.result.match_score_pct(),
                "skill_match_score": m.result.skill_match_pct(),
                "similarity": m.result.similarity,
                "explanation": m.result.explanation,
            })
        })
        .collect();

    let output = serde_json::json!({
        "status": "ok",
        "query": report.query,
        "requirement": report.requirement,
        "top_k": top_k,
        "candidates_considered": report.candidates_considered,
        "count": results.len(),
        "results": results,
    });
    println!("{}", serde_json::to_string(&output)?);
    Ok(())
}

fn display_human(report: &SearchReport) {
    if report.matches.is_empty() {
        println!(
            "{} No matching resumes for '{}'",
            "!".yellow(),
            report.query.cyan()
        );
        println!();
        println!("Try:");
        println!("  - Lowering the years of experience in the query");
        println!("  - Adding resumes: scout add <FILE>");
        println!("  - Rebuilding the index: scout reindex");
        return;
    }

    let skills = report.requirement.skills_in_order();
    println!(
        "{} results for '{}'",
        report.matches.len().to_string().bold(),
        report.query.cyan()
    );
    println!(
        "     {} skills: {}, min years: {}",
        "requirement".dimmed(),
        if skills.is_empty() {
            "-".to_string()
        } else {
            skills.join(", ")
        },
        report.requirement.min_years
    );
    println!();

    for (i, m) in report.matches.iter().enumerate() {
        let rank = format!("{}.", i + 1);
        let score = m.result.match_score_pct();
        let score_colored = if score >= 70.0 {
            format!("{score:.2}").green()
        } else if score >= 40.0 {
            format!("{score:.2}").yellow()
        } else {
            format!("{score:.2}").normal()
        };

        println!(
            "{:4} {} {} (score: {}, skills: {:.2})",
            rank.dimmed(),
            m.record.candidate_name.bold(),
            format!("#{}", m.record.id).dimmed(),
            score_colored,
            m.result.skill_match_pct()
        );
        if let Some(title) = &m.record.title {
            let years = m
                .record
                .years_experience
                .map_or_else(String::new, |y| format!(", {y} yrs"));
            println!("     {}{}", truncate_str(title, 60), years);
        }
        println!("     {}", m.result.explanation.dimmed());
        println!();
    }
}
