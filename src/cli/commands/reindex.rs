//! scout reindex - Rebuild the search index from stored resumes

use clap::Args;

use crate::app::AppContext;
use crate::error::Result;

#[derive(Args, Debug)]
pub struct ReindexArgs {}

pub fn run(ctx: &AppContext, _args: &ReindexArgs) -> Result<()> {
    let stats = super::rebuild_index(ctx)?;

    if ctx.robot_mode {
        println!(
            "{}",
            serde_json::json!({
                "status": "ok",
                "records": stats.records,
                "dims": stats.dims,
                "embedder": ctx.config.search.embedding_backend,
                "version": crate::VERSION,
            })
        );
    } else {
        super::print_index_stats(&stats);
    }
    Ok(())
}
