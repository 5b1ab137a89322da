//! Delete user command implementation.

use anyhow::{Context, Result};
use clap::Args;

use mockdesk_core::RecordId;

use crate::commands::{load, report};
use crate::context::AppContext;
use crate::output;

#[derive(Args, Debug)]
pub struct DeleteArgs {
    /// Identifier of the user to remove
    pub id: RecordId,
}

pub async fn run(args: DeleteArgs, ctx: &AppContext) -> Result<()> {
    let mut users = ctx.users()?;
    load(&mut users, false)
        .await
        .context("Failed to load users")?;

    users
        .delete(args.id)
        .await
        .map_err(|e| report(e, "Failed to delete user"))?;

    output::success(&format!("Deleted user #{}", args.id));
    Ok(())
}
