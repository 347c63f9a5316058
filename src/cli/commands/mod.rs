//! CLI command implementations
//!
//! Each subcommand has its own module with:
//! - Args struct for command-line arguments
//! - `run()` function to execute the command

use colored::Colorize;

use crate::app::AppContext;
use crate::cli::Commands;
use crate::error::Result;
use crate::search::IndexStats;

pub mod add;
pub mod delete;
pub mod list;
pub mod parse;
pub mod reindex;
pub mod search;
pub mod seed;
pub mod show;

/// Dispatch a command to its handler
pub fn run(ctx: &AppContext, command: &Commands) -> Result<()> {
    match command {
        Commands::Add(args) => add::run(ctx, args),
        Commands::List(args) => list::run(ctx, args),
        Commands::Show(args) => show::run(ctx, args),
        Commands::Delete(args) => delete::run(ctx, args),
        Commands::Reindex(args) => reindex::run(ctx, args),
        Commands::Search(args) => search::run(ctx, args),
        Commands::Parse(args) => parse::run(ctx, args),
        Commands::Seed(args) => seed::run(ctx, args),
    }
}

/// Rebuild the index after a write so stored embedding metadata stays current.
pub(crate) fn rebuild_index(ctx: &AppContext) -> Result<IndexStats> {
    ctx.search_service()?.rebuild_index()
}

pub(crate) fn print_index_stats(stats: &IndexStats) {
    println!(
        "{} Indexed {} resumes ({} dims)",
        "✓".green(),
        stats.records.to_string().bold(),
        stats.dims
    );
}

/// Truncate to at most `max` chars without splitting a UTF-8 sequence.
pub(crate) fn truncate_str(s: &str, max: usize) -> String {
    if s.chars().count() <= max {
        return s.to_string();
    }
    let mut out: String = s.chars().take(max.saturating_sub(1)).collect();
    out.push('…');
    out
}
