//! scout delete - Delete a resume

use clap::Args;
use colored::Colorize;

use crate::app::AppContext;
use crate::core::RecordId;
use crate::error::{Result, ScoutError};

#[derive(Args, Debug)]
pub struct DeleteArgs {
    /// Resume ID
    pub id: RecordId,
}

pub fn run(ctx: &AppContext, args: &DeleteArgs) -> Result<()> {
    if !ctx.db.delete_resume(args.id)? {
        return Err(ScoutError::RecordNotFound(args.id));
    }
    let stats = super::rebuild_index(ctx)?;

    if ctx.robot_mode {
        println!(
            "{}",
            serde_json::json!({
                "status": "ok",
                "deleted": args.id,
                "indexed": stats.records,
            })
        );
    } else {
        println!("{} Deleted resume {}", "✓".green(), args.id.to_string().bold());
        super::print_index_stats(&stats);
    }
    Ok(())
}
