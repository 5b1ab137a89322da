//! Route table subcommands.

use anyhow::Result;
use clap::{Args, Subcommand};
use colored::Colorize;

use mockdesk_core::routes::{Navigation, drawer, resolve};

use crate::context::AppContext;
use crate::output;

#[derive(Args, Debug)]
pub struct NavCommand {
    #[command(subcommand)]
    pub command: NavSubcommand,
}

#[derive(Subcommand, Debug)]
pub enum NavSubcommand {
    /// Show what a path resolves to for this session
    Route(RouteArgs),

    /// List the side drawer entries
    Drawer(DrawerArgs),
}

#[derive(Args, Debug)]
pub struct RouteArgs {
    /// Path to resolve, e.g. /dashboard
    pub path: String,

    /// Resolve as if logged in (or out) instead of using the stored flag
    #[arg(long)]
    pub authenticated: Option<bool>,
}

#[derive(Args, Debug)]
pub struct DrawerArgs {
    /// Output as JSON
    #[arg(long)]
    pub json: bool,
}

pub fn handle(cmd: NavCommand, ctx: &AppContext) -> Result<()> {
    match cmd.command {
        NavSubcommand::Route(args) => route(args, ctx),
        NavSubcommand::Drawer(args) => show_drawer(args),
    }
}

fn route(args: RouteArgs, ctx: &AppContext) -> Result<()> {
    let authenticated = match args.authenticated {
        Some(flag) => flag,
        None => ctx.authenticator()?.is_authenticated(),
    };

    match resolve(&args.path, authenticated) {
        Navigation::Render(route) => {
            println!("{} {} ({})", "render".green(), route.path(), route.title());
        }
        Navigation::Redirect(route) => {
            println!("{} {} ({})", "redirect".yellow(), route.path(), route.title());
        }
    }
    Ok(())
}

fn show_drawer(args: DrawerArgs) -> Result<()> {
    let entries = drawer();

    if args.json {
        let entries: Vec<_> = entries
            .iter()
            .map(|r| serde_json::json!({"title": r.title(), "path": r.path()}))
            .collect();
        return output::json(&entries);
    }

    for route in entries {
        output::field(route.title(), route.path());
    }
    Ok(())
}
