//! Authentication subcommands.

mod login;
mod logout;
mod signup;
mod status;

use anyhow::Result;
use clap::{Args, Subcommand};

use crate::context::AppContext;

#[derive(Args, Debug)]
pub struct AuthCommand {
    #[command(subcommand)]
    pub command: AuthSubcommand,
}

#[derive(Subcommand, Debug)]
pub enum AuthSubcommand {
    /// Check a username/password against the credential API
    Login(login::LoginArgs),

    /// Register a new account and log in
    Signup(signup::SignupArgs),

    /// Clear the login flag
    Logout(logout::LogoutArgs),

    /// Show whether this session is logged in
    Status(status::StatusArgs),
}

pub async fn handle(cmd: AuthCommand, ctx: &AppContext) -> Result<()> {
    match cmd.command {
        AuthSubcommand::Login(args) => login::run(args, ctx).await,
        AuthSubcommand::Signup(args) => signup::run(args, ctx).await,
        AuthSubcommand::Logout(args) => logout::run(args, ctx),
        AuthSubcommand::Status(args) => status::run(args, ctx),
    }
}
