//! Create user command implementation.

use anyhow::{Context, Result};
use clap::Args;

use mockdesk_core::{Company, User};

use super::print_user;
use crate::commands::{load, report};
use crate::context::AppContext;
use crate::output;

#[derive(Args, Debug)]
pub struct CreateArgs {
    /// Full name
    #[arg(long)]
    pub name: String,

    /// Username (alphanumeric)
    #[arg(long)]
    pub username: String,

    /// Email address
    #[arg(long)]
    pub email: String,

    /// Company name
    #[arg(long)]
    pub company: String,
}

pub async fn run(args: CreateArgs, ctx: &AppContext) -> Result<()> {
    let mut users = ctx.users()?;
    load(&mut users, false)
        .await
        .context("Failed to load users")?;

    let input = User {
        id: None,
        name: args.name,
        username: args.username,
        email: args.email,
        company: Company { name: args.company },
    }
    .into_record()?;

    let created = users
        .create(input)
        .await
        .map_err(|e| report(e, "Failed to create user"))?;
    let user = User::try_from(&created)?;

    match created.id() {
        Some(id) => output::success(&format!("Created user #{}", id)),
        None => output::success("Created user"),
    }
    println!();
    print_user(&user);
    Ok(())
}
