//! Login command implementation.

use anyhow::Result;
use clap::Args;
use colored::Colorize;

use mockdesk_core::error::AuthError;
use mockdesk_core::{Credentials, Error, LoginOutcome, Route};

use crate::commands::report;
use crate::context::AppContext;
use crate::output;

#[derive(Args, Debug)]
pub struct LoginArgs {
    /// Username to check
    #[arg(long)]
    pub username: String,

    /// Password to check
    #[arg(long)]
    pub password: String,
}

pub async fn run(args: LoginArgs, ctx: &AppContext) -> Result<()> {
    let mut auth = ctx.authenticator()?;
    let credentials = Credentials::new(&args.username, &args.password);

    eprintln!("{}", "Logging in...".dimmed());

    match auth.login(&credentials).await {
        Ok(LoginOutcome::Authenticated) => output::success("Logged in successfully"),
        Ok(LoginOutcome::AlreadyAuthenticated) => output::success("Already logged in"),
        Err(err) => {
            if matches!(err, Error::Auth(AuthError::InvalidCredentials))
                && ctx.settings.uses_demo_auth()
            {
                output::hint("Demo account: username 'emilys', password 'emilyspass'");
            }
            return Err(report(err, "Failed to login"));
        }
    }

    println!();
    output::field("Landing", Route::Dashboard.path());
    Ok(())
}
