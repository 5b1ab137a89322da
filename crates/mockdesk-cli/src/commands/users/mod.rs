//! User record subcommands.

mod create;
mod delete;
mod list;
mod update;

use anyhow::Result;
use clap::{Args, Subcommand};

use mockdesk_core::{Route, User};

use crate::context::AppContext;

#[derive(Args, Debug)]
pub struct UsersCommand {
    #[command(subcommand)]
    pub command: UsersSubcommand,
}

#[derive(Subcommand, Debug)]
pub enum UsersSubcommand {
    /// Show one page of users
    List(list::ListArgs),

    /// Add a user
    Create(create::CreateArgs),

    /// Change fields of a user
    Update(update::UpdateArgs),

    /// Remove a user
    Delete(delete::DeleteArgs),
}

pub async fn handle(cmd: UsersCommand, ctx: &AppContext) -> Result<()> {
    ctx.require_route(Route::Users)?;

    match cmd.command {
        UsersSubcommand::List(args) => list::run(args, ctx).await,
        UsersSubcommand::Create(args) => create::run(args, ctx).await,
        UsersSubcommand::Update(args) => update::run(args, ctx).await,
        UsersSubcommand::Delete(args) => delete::run(args, ctx).await,
    }
}

/// One table row: `  4. #4 Name (username) <email> Company`.
fn row_line(row: usize, user: &User) -> String {
    let id = user.id.map(|id| format!("#{}", id)).unwrap_or_default();
    format!(
        "{:>4}. {} {} ({}) <{}> {}",
        row, id, user.name, user.username, user.email, user.company.name
    )
}

fn print_user(user: &User) {
    use crate::output::field;

    if let Some(id) = user.id {
        field("ID", &id.to_string());
    }
    field("Name", &user.name);
    field("Username", &user.username);
    field("Email", &user.email);
    field("Company", &user.company.name);
}
