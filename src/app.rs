//! Shared state for CLI commands

use std::path::PathBuf;

use tracing::debug;

use crate::cli::Cli;
use crate::config::Config;
use crate::error::{Result, ScoutError};
use crate::search::SearchService;
use crate::storage::Database;

/// Everything a command needs: resolved root, config and an open database.
#[derive(Debug)]
pub struct AppContext {
    pub scout_root: PathBuf,
    pub config: Config,
    pub db: Database,
    pub robot_mode: bool,
}

impl AppContext {
    pub fn from_cli(cli: &Cli) -> Result<Self> {
        let scout_root = resolve_scout_root()?;
        let config = Config::load(cli.config.as_deref(), &scout_root)?;
        let db_path = config.storage.database_path(&scout_root);
        debug!(root = %scout_root.display(), db = %db_path.display(), "opening scout root");
        let db = Database::open(&db_path)?;
        let robot_mode = cli.robot || config.robot.is_json();

        Ok(Self {
            scout_root,
            config,
            db,
            robot_mode,
        })
    }

    /// Search service over this context's database.
    pub fn search_service(&self) -> Result<SearchService<&Database>> {
        SearchService::from_config(&self.db, &self.config)
    }
}

/// `SCOUT_ROOT` if set, otherwise `<data_dir>/scout`.
fn resolve_scout_root() -> Result<PathBuf> {
    if let Ok(root) = std::env::var("SCOUT_ROOT") {
        if !root.trim().is_empty() {
            return Ok(PathBuf::from(root));
        }
    }
    dirs::data_dir()
        .map(|dir| dir.join("scout"))
        .ok_or_else(|| {
            ScoutError::MissingConfig(
                "no data directory found; set SCOUT_ROOT".to_string(),
            )
        })
}
