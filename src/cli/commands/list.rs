//! scout list - List stored resumes

use clap::Args;
use colored::Colorize;

use crate::app::AppContext;
use crate::core::Record;
use crate::error::Result;
use crate::storage::sqlite::SkillRow;

use super::truncate_str;

#[derive(Args, Debug)]
pub struct ListArgs {
    /// Only resumes with this skill
    #[arg(long, short)]
    pub skill: Option<String>,

    /// Maximum number of resumes to show
    #[arg(long, short = 'n', default_value = "50")]
    pub limit: usize,

    /// Offset for pagination
    #[arg(long, default_value = "0")]
    pub offset: usize,

    /// List known skills with resume counts instead of resumes
    #[arg(long, conflicts_with = "skill")]
    pub skills: bool,
}

pub fn run(ctx: &AppContext, args: &ListArgs) -> Result<()> {
    if args.skills {
        let skills = ctx.db.list_skills()?;
        if ctx.robot_mode {
            println!(
                "{}",
                serde_json::json!({
                    "status": "ok",
                    "count": skills.len(),
                    "skills": skills,
                })
            );
        } else {
            skills_human(&skills);
        }
        return Ok(());
    }

    let wanted = args.skill.as_deref().map(str::to_lowercase);
    let records: Vec<Record> = ctx
        .db
        .list_resumes()?
        .into_iter()
        .filter(|r| wanted.as_deref().is_none_or(|skill| r.has_skill(skill)))
        .skip(args.offset)
        .take(args.limit)
        .collect();

    if ctx.robot_mode {
        list_robot(&records)
    } else {
        list_human(&records, args)
    }
}

fn list_human(records: &[Record], args: &ListArgs) -> Result<()> {
    if records.is_empty() {
        println!("{}", "No resumes found".dimmed());
        println!();
        println!("Add one with: scout add <FILE>   (or load demo data: scout seed)");
        return Ok(());
    }

    println!(
        "{:6} {:24} {:28} {:6} {}",
        "ID".bold(),
        "NAME".bold(),
        "TITLE".bold(),
        "YEARS".bold(),
        "SKILLS".bold()
    );
    println!("{}", "─".repeat(90).dimmed());

    for record in records {
        let years = record
            .years_experience
            .map_or_else(|| "-".to_string(), |y| format!("{y}"));
        let skills: Vec<&str> = record.skills.iter().map(String::as_str).collect();
        println!(
            "{:6} {:24} {:28} {:6} {}",
            record.id,
            truncate_str(&record.candidate_name, 24),
            truncate_str(record.title.as_deref().unwrap_or("-"), 28),
            years,
            skills.join(", ").dimmed()
        );
    }

    println!();
    println!(
        "{} {} resumes (limit: {}, offset: {})",
        "Total:".dimmed(),
        records.len(),
        args.limit,
        args.offset
    );
    Ok(())
}

fn skills_human(skills: &[SkillRow]) {
    if skills.is_empty() {
        println!("{}", "No skills recorded yet".dimmed());
        return;
    }

    println!("{:24} {}", "SKILL".bold(), "RESUMES".bold());
    println!("{}", "─".repeat(34).dimmed());
    for skill in skills {
        let count = skill.resumes.to_string();
        println!(
            "{:24} {}",
            truncate_str(&skill.name, 24),
            if skill.resumes == 0 { count.dimmed() } else { count.normal() }
        );
    }
}

fn list_robot(records: &[Record]) -> Result<()> {
    let output: Vec<serde_json::Value> = records
        .iter()
        .map(|r| {
            serde_json::json!({
                "id": r.id,
                "candidate_name": r.candidate_name,
                "title": r.title,
                "years_experience": r.years_experience,
                "location": r.location,
                "skills": r.skills,
            })
        })
        .collect();

    println!(
        "{}",
        serde_json::json!({
            "status": "ok",
            "count": records.len(),
            "resumes": output
        })
    );
    Ok(())
}
