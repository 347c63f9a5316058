//! scout seed - Load demo resumes

use clap::Args;
use colored::Colorize;

use crate::app::AppContext;
use crate::core::NewResume;
use crate::error::Result;

#[derive(Args, Debug)]
pub struct SeedArgs {}

/// The two demo candidates
pub fn demo_resumes() -> Vec<NewResume> {
    vec![
        NewResume {
            candidate_name: "Alice Johnson".to_string(),
            raw_text: "Python backend engineer with Flask, FastAPI, Docker and AWS experience."
                .to_string(),
            skills: ["python", "flask", "fastapi", "docker", "aws"]
                .map(String::from)
                .to_vec(),
            title: Some("Senior Backend Engineer".to_string()),
            years_experience: Some(5.0),
            location: Some("Remote".to_string()),
        },
        NewResume {
            candidate_name: "Bob Smith".to_string(),
            raw_text: "React and Node developer with some AWS knowledge.".to_string(),
            skills: ["react", "node", "aws"].map(String::from).to_vec(),
            title: Some("Frontend Developer".to_string()),
            years_experience: Some(3.0),
            location: Some("Bangalore".to_string()),
        },
    ]
}

pub fn run(ctx: &AppContext, _args: &SeedArgs) -> Result<()> {
    let mut ids = Vec::new();
    for resume in demo_resumes() {
        ids.push(ctx.db.add_resume(&resume)?);
    }
    let stats = super::rebuild_index(ctx)?;

    if ctx.robot_mode {
        println!(
            "{}",
            serde_json::json!({
                "status": "seeded",
                "ids": ids,
                "indexed": stats.records,
            })
        );
    } else {
        println!("{} Seeded {} demo resumes", "✓".green(), ids.len());
        super::print_index_stats(&stats);
    }
    Ok(())
}
