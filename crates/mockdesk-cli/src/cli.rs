//! CLI argument definitions.

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};

use crate::commands::auth::AuthCommand;
use crate::commands::cache::CacheCommand;
use crate::commands::nav::NavCommand;
use crate::commands::posts::PostsCommand;
use crate::commands::users::UsersCommand;

/// Admin console for a mock REST API: posts dashboard, user table,
/// client-side login.
#[derive(Parser, Debug)]
#[command(name = "mockdesk")]
#[command(author, version = env!("MOCKDESK_VERSION"), about, long_about = None)]
pub struct Cli {
    /// Increase verbosity (-v, -vv, -vvv)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Output logs as JSON
    #[arg(long, global = true)]
    pub json_logs: bool,

    #[command(flatten)]
    pub global: GlobalArgs,

    #[command(subcommand)]
    pub command: Commands,
}

/// Where to find configuration, the APIs and the local cache.
#[derive(Args, Debug, Clone, Default)]
pub struct GlobalArgs {
    /// Config file (defaults to the platform config directory)
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,

    /// Collections API root (https://, http://localhost or file://)
    #[arg(long, env = "MOCKDESK_API_URL", global = true)]
    pub api_url: Option<String>,

    /// Credential API root
    #[arg(long, env = "MOCKDESK_AUTH_URL", global = true)]
    pub auth_url: Option<String>,

    /// Directory for cached snapshots and the login flag
    #[arg(long, env = "MOCKDESK_DATA_DIR", global = true)]
    pub data_dir: Option<PathBuf>,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Log in, sign up, log out
    Auth(AuthCommand),

    /// Dashboard posts
    Posts(PostsCommand),

    /// User records
    Users(UsersCommand),

    /// Route table and side drawer
    Nav(NavCommand),

    /// Local cache
    Cache(CacheCommand),
}
