//! scout show - Show resume details

use clap::Args;
use colored::Colorize;

use crate::app::AppContext;
use crate::core::{Record, RecordId};
use crate::error::{Result, ScoutError};

#[derive(Args, Debug)]
pub struct ShowArgs {
    /// Resume ID
    pub id: RecordId,

    /// Print the full resume text
    #[arg(long)]
    pub full: bool,
}

/// Lines of resume text shown without --full
const PREVIEW_LINES: usize = 12;

pub fn run(ctx: &AppContext, args: &ShowArgs) -> Result<()> {
    let record = ctx
        .db
        .get_resume(args.id)?
        .ok_or(ScoutError::RecordNotFound(args.id))?;
    let embedding_dim = ctx.db.embedding_dim(record.id)?;

    if ctx.robot_mode {
        println!(
            "{}",
            serde_json::json!({
                "status": "ok",
                "resume": record,
                "embedding_dim": embedding_dim,
            })
        );
        return Ok(());
    }

    show_human(&record, embedding_dim, args);
    Ok(())
}

fn show_human(record: &Record, embedding_dim: Option<usize>, args: &ShowArgs) {
    let name = if record.candidate_name.is_empty() {
        "(unnamed)"
    } else {
        record.candidate_name.as_str()
    };
    println!("{}", name.bold());
    println!("{}", "═".repeat(name.chars().count()));
    println!();

    println!("{}: {}", "ID".dimmed(), record.id);
    println!("{}: {}", "Title".dimmed(), record.title.as_deref().unwrap_or("-"));
    match record.years_experience {
        Some(years) => println!("{}: {years}", "Experience".dimmed()),
        None => println!("{}: unknown", "Experience".dimmed()),
    }
    println!(
        "{}: {}",
        "Location".dimmed(),
        record.location.as_deref().unwrap_or("-")
    );
    let skills: Vec<&str> = record.skills.iter().map(String::as_str).collect();
    println!("{}: {}", "Skills".dimmed(), skills.join(", ").green());
    match embedding_dim {
        Some(dim) => println!("{}: {dim} dims", "Indexed".dimmed()),
        None => println!("{}: {}", "Indexed".dimmed(), "not yet".yellow()),
    }

    println!();
    let wrapped = textwrap::fill(&record.raw_text, 80);
    let lines: Vec<&str> = wrapped.lines().collect();
    let shown = if args.full {
        lines.len()
    } else {
        lines.len().min(PREVIEW_LINES)
    };
    for line in &lines[..shown] {
        println!("  {line}");
    }
    if shown < lines.len() {
        println!(
            "  {}",
            format!("... {} more lines (use --full)", lines.len() - shown).dimmed()
        );
    }
}
