//! CLI module - Command-line interface definitions and handlers
//!
//! Uses clap v4 with derive macros for argument parsing.

use std::path::PathBuf;

use clap::{Parser, Subcommand};

pub mod commands;

/// Scout - semantic resume search with skill-aware reranking
#[derive(Parser, Debug)]
#[command(name = "scout")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Enable JSON output for machine consumption
    #[arg(long, global = true)]
    pub robot: bool,

    /// Increase verbosity (-v, -vv, -vvv)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Suppress all output except errors
    #[arg(short, long, global = true)]
    pub quiet: bool,

    /// Config file path (default: ~/.config/scout/config.toml)
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Commands,
}

/// Available commands
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Add a plain-text resume
    Add(commands::add::AddArgs),

    /// List stored resumes
    List(commands::list::ListArgs),

    /// Show one resume
    Show(commands::show::ShowArgs),

    /// Delete a resume
    Delete(commands::delete::DeleteArgs),

    /// Rebuild the search index
    Reindex(commands::reindex::ReindexArgs),

    /// Find the best matching resumes for a query
    Search(commands::search::SearchArgs),

    /// Show how a query is interpreted
    Parse(commands::parse::ParseArgs),

    /// Load demo resumes
    Seed(commands::seed::SeedArgs),
}
