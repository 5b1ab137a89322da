//! Update user command implementation.

use anyhow::{Context, Result};
use clap::Args;

use mockdesk_core::{Error, RecordId, User};

use super::print_user;
use crate::commands::{load, report};
use crate::context::AppContext;
use crate::output;

#[derive(Args, Debug)]
pub struct UpdateArgs {
    /// Identifier of the user to change
    pub id: RecordId,

    /// New full name
    #[arg(long)]
    pub name: Option<String>,

    /// New username
    #[arg(long)]
    pub username: Option<String>,

    /// New email address
    #[arg(long)]
    pub email: Option<String>,

    /// New company name
    #[arg(long)]
    pub company: Option<String>,
}

pub async fn run(args: UpdateArgs, ctx: &AppContext) -> Result<()> {
    let mut users = ctx.users()?;
    load(&mut users, false)
        .await
        .context("Failed to load users")?;

    let current = users
        .snapshot()
        .iter()
        .find(|r| r.id() == Some(args.id))
        .ok_or(Error::NotFoundLocal { id: args.id })
        .map_err(|e| report(e, "Failed to update user"))?;

    // Unspecified fields keep their current values.
    let mut user = User::try_from(current).context("Malformed user")?;
    if let Some(name) = args.name {
        user.name = name;
    }
    if let Some(username) = args.username {
        user.username = username;
    }
    if let Some(email) = args.email {
        user.email = email;
    }
    if let Some(company) = args.company {
        user.company.name = company;
    }

    let updated = users
        .update(args.id, user.into_record()?)
        .await
        .map_err(|e| report(e, "Failed to update user"))?;

    output::success(&format!("Updated user #{}", args.id));
    println!();
    print_user(&User::try_from(&updated)?);
    Ok(())
}
