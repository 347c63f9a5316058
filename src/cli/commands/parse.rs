//! scout parse - Show how a query is interpreted

use clap::Args;
use colored::Colorize;

use crate::app::AppContext;
use crate::error::Result;
use crate::search::QueryInterpreter;

#[derive(Args, Debug)]
pub struct ParseArgs {
    /// Recruiter query
    pub query: String,
}

pub fn run(ctx: &AppContext, args: &ParseArgs) -> Result<()> {
    let interpreter = QueryInterpreter::new(&ctx.config.vocabulary);
    let requirement = interpreter.parse(&args.query);

    if ctx.robot_mode {
        println!(
            "{}",
            serde_json::json!({
                "status": "ok",
                "query": args.query,
                "requirement": requirement,
            })
        );
        return Ok(());
    }

    let skills = requirement.skills_in_order();
    println!("{}: {}", "Query".dimmed(), args.query.cyan());
    if skills.is_empty() {
        println!("{}: {}", "Skills".dimmed(), "none".dimmed());
    } else {
        println!("{}: {}", "Skills".dimmed(), skills.join(", ").green());
    }
    if requirement.min_years == 0 {
        println!("{}: {}", "Min years".dimmed(), "any".dimmed());
    } else {
        println!("{}: {}", "Min years".dimmed(), requirement.min_years);
    }
    Ok(())
}
