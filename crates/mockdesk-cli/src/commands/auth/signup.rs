//! Signup command implementation.

use anyhow::Result;
use clap::Args;
use colored::Colorize;

use mockdesk_core::{LoginOutcome, Route, SignupForm};

use crate::commands::report;
use crate::context::AppContext;
use crate::output;

#[derive(Args, Debug)]
pub struct SignupArgs {
    /// Username for the new account
    #[arg(long)]
    pub username: String,

    /// Password for the new account
    #[arg(long)]
    pub password: String,

    /// Password again
    #[arg(long)]
    pub confirm_password: String,
}

pub async fn run(args: SignupArgs, ctx: &AppContext) -> Result<()> {
    let mut auth = ctx.authenticator()?;
    let form = SignupForm::new(args.username, args.password, args.confirm_password);

    eprintln!("{}", "Signing up...".dimmed());

    let outcome = auth
        .signup(&form)
        .await
        .map_err(|e| report(e, "Failed to sign up"))?;

    match outcome {
        LoginOutcome::Authenticated => output::success("Account created, logged in"),
        LoginOutcome::AlreadyAuthenticated => output::success("Already logged in"),
    }

    println!();
    output::field("Username", &form.username);
    output::field("Landing", Route::Dashboard.path());
    Ok(())
}
