//! scout add - Store a plain-text resume

use std::path::{Path, PathBuf};

use clap::Args;
use colored::Colorize;
use tracing::warn;

use crate::app::AppContext;
use crate::core::{NewResume, validate_years};
use crate::error::{Result, ScoutError};
use crate::extract::{extract_resume_info, name_from_filename};

/// Shorter texts are rejected as not being a resume
pub const MIN_RESUME_CHARS: usize = 30;

#[derive(Args, Debug)]
pub struct AddArgs {
    /// Resume file (.txt)
    pub file: PathBuf,

    /// Candidate name (default: extracted, then file name)
    #[arg(long)]
    pub name: Option<String>,

    /// Job title
    #[arg(long)]
    pub title: Option<String>,

    /// Years of experience
    #[arg(long, value_parser = parse_years, allow_negative_numbers = true)]
    pub years: Option<f64>,

    /// Location
    #[arg(long)]
    pub location: Option<String>,

    /// Skills (comma-separated); replaces extracted skills
    #[arg(long, value_delimiter = ',')]
    pub skills: Vec<String>,
}

pub fn run(ctx: &AppContext, args: &AddArgs) -> Result<()> {
    let raw_text = read_resume_text(&args.file)?;
    let resume = build_resume(ctx, args, raw_text);

    let id = ctx.db.add_resume(&resume)?;
    let stats = super::rebuild_index(ctx)?;

    if ctx.robot_mode {
        println!(
            "{}",
            serde_json::json!({
                "status": "ok",
                "id": id,
                "candidate_name": resume.candidate_name,
                "title": resume.title,
                "years_experience": resume.years_experience,
                "location": resume.location,
                "skills": resume.skills,
                "indexed": stats.records,
            })
        );
    } else {
        println!(
            "{} Added resume {} for {}",
            "✓".green(),
            id.to_string().bold(),
            resume.candidate_name.cyan()
        );
        if !resume.skills.is_empty() {
            println!("  {}: {}", "Skills".dimmed(), resume.skills.join(", "));
        }
        super::print_index_stats(&stats);
    }
    Ok(())
}

/// `--years` accepts finite, non-negative numbers only.
fn parse_years(raw: &str) -> std::result::Result<f64, String> {
    let years: f64 = raw
        .trim()
        .parse()
        .map_err(|_| format!("`{raw}` is not a number"))?;
    validate_years(Some(years))
        .map(|()| years)
        .map_err(|_| format!("`{raw}` must be a non-negative number of years"))
}

/// Read a `.txt` resume and check it has enough text to index.
pub fn read_resume_text(path: &Path) -> Result<String> {
    let extension = path
        .extension()
        .map(|ext| ext.to_string_lossy().to_lowercase())
        .unwrap_or_default();
    match extension.as_str() {
        "txt" => {}
        "pdf" => {
            return Err(ScoutError::UnsupportedFile(format!(
                "{}: PDF text extraction is not built in, convert it to .txt first",
                path.display()
            )));
        }
        _ => {
            return Err(ScoutError::UnsupportedFile(format!(
                "{}: only .txt resumes are supported",
                path.display()
            )));
        }
    }

    let raw = std::fs::read_to_string(path)?;
    let text = raw.trim();
    if text.is_empty() {
        return Err(ScoutError::InvalidRecord(format!(
            "{} contains no text",
            path.display()
        )));
    }
    if text.chars().count() < MIN_RESUME_CHARS {
        return Err(ScoutError::InvalidRecord(format!(
            "{} is too short to be a resume ({} chars, need {MIN_RESUME_CHARS})",
            path.display(),
            text.chars().count()
        )));
    }
    Ok(text.to_string())
}

fn build_resume(ctx: &AppContext, args: &AddArgs, raw_text: String) -> NewResume {
    let extracted = extract_resume_info(&raw_text, &ctx.config.vocabulary);

    let candidate_name = match &args.name {
        Some(name) => name.clone(),
        None if extracted.has_unknown_name() => {
            warn!(file = %args.file.display(), "no name found in resume, using file name");
            name_from_filename(&args.file).unwrap_or_else(|| extracted.candidate_name.clone())
        }
        None => extracted.candidate_name.clone(),
    };

    let mut resume = extracted.into_new_resume(raw_text);
    resume.candidate_name = candidate_name;
    if let Some(title) = &args.title {
        resume.title = Some(title.clone());
    }
    if let Some(years) = args.years {
        resume.years_experience = Some(years);
    }
    if let Some(location) = &args.location {
        resume.location = Some(location.clone());
    }
    if !args.skills.is_empty() {
        resume.skills = args
            .skills
            .iter()
            .map(|s| s.trim().to_lowercase())
            .filter(|s| !s.is_empty())
            .collect();
    }
    resume
}
