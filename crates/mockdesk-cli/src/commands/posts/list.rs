//! List posts command implementation.

use anyhow::{Context, Result};
use clap::Args;
use colored::Colorize;

use mockdesk_core::{Post, Route};

use crate::commands::{ViewArgs, apply_view, load};
use crate::context::AppContext;
use crate::output;

#[derive(Args, Debug)]
pub struct ListArgs {
    #[command(flatten)]
    pub view: ViewArgs,
}

pub async fn run(args: ListArgs, ctx: &AppContext) -> Result<()> {
    ctx.require_route(Route::Dashboard)?;

    let mut posts = ctx.posts()?;
    load(&mut posts, args.view.reload)
        .await
        .context("Failed to load posts")?;
    apply_view(&mut posts, &args.view)?;

    let page = posts.visible_page();
    if page.is_empty() {
        eprintln!("{}", "No posts found.".dimmed());
        return Ok(());
    }

    for (row, record) in page.rows() {
        if args.view.json {
            output::json(record)?;
            continue;
        }
        let post = Post::try_from(record).context("Malformed post")?;
        println!("{:>4}. {}", row, post.title);
    }

    output::page_footer(&page);
    Ok(())
}
