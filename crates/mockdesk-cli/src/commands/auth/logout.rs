//! Logout command implementation.

use anyhow::{Context, Result};
use clap::Args;

use crate::context::AppContext;
use crate::output;

#[derive(Args, Debug)]
pub struct LogoutArgs {}

pub fn run(_args: LogoutArgs, ctx: &AppContext) -> Result<()> {
    let mut auth = ctx.authenticator()?;
    let was_authenticated = auth.is_authenticated();

    auth.logout().context("Failed to clear login state")?;

    if was_authenticated {
        output::success("Logged out");
    } else {
        output::success("Not logged in");
    }
    Ok(())
}
