//! Dashboard post subcommands.

mod history;
mod list;

use anyhow::Result;
use clap::{Args, Subcommand};

use crate::context::AppContext;

#[derive(Args, Debug)]
pub struct PostsCommand {
    #[command(subcommand)]
    pub command: PostsSubcommand,
}

#[derive(Subcommand, Debug)]
pub enum PostsSubcommand {
    /// Show one page of posts
    List(list::ListArgs),

    /// Show submitted searches, newest first
    History(history::HistoryArgs),
}

pub async fn handle(cmd: PostsCommand, ctx: &AppContext) -> Result<()> {
    match cmd.command {
        PostsSubcommand::List(args) => list::run(args, ctx).await,
        PostsSubcommand::History(args) => history::run(args, ctx),
    }
}
