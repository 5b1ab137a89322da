//! List users command implementation.

use anyhow::{Context, Result};
use clap::Args;
use colored::Colorize;

use mockdesk_core::User;

use super::row_line;
use crate::commands::{ViewArgs, apply_view, load};
use crate::context::AppContext;
use crate::output;

#[derive(Args, Debug)]
pub struct ListArgs {
    #[command(flatten)]
    pub view: ViewArgs,
}

pub async fn run(args: ListArgs, ctx: &AppContext) -> Result<()> {
    let mut users = ctx.users()?;
    load(&mut users, args.view.reload)
        .await
        .context("Failed to load users")?;
    apply_view(&mut users, &args.view)?;

    let page = users.visible_page();
    if page.is_empty() {
        eprintln!("{}", "No users found.".dimmed());
        return Ok(());
    }

    for (row, record) in page.rows() {
        if args.view.json {
            output::json(record)?;
        } else {
            let user = User::try_from(record).context("Malformed user")?;
            println!("{}", row_line(row, &user));
        }
    }

    output::page_footer(&page);
    Ok(())
}
