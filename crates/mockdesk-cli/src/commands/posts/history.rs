//! Search history command implementation.

use anyhow::Result;
use clap::Args;
use colored::Colorize;

use mockdesk_core::Route;

use crate::context::AppContext;
use crate::output;

#[derive(Args, Debug)]
pub struct HistoryArgs {
    /// Output as JSON
    #[arg(long)]
    pub json: bool,
}

pub fn run(args: HistoryArgs, ctx: &AppContext) -> Result<()> {
    ctx.require_route(Route::Dashboard)?;

    // Reads the stored history only; nothing is fetched.
    let posts = ctx.posts()?;
    let history = posts.search_history();

    if args.json {
        return output::json(&history);
    }

    if history.is_empty() {
        eprintln!("{}", "No searches yet.".dimmed());
        return Ok(());
    }

    for (index, text) in history.iter().enumerate().rev() {
        println!("{:>4}. {}", index + 1, text);
    }
    Ok(())
}
