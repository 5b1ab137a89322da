//! Subcommand implementations.

pub mod auth;
pub mod cache;
pub mod nav;
pub mod posts;
pub mod users;

use anyhow::{Context, Result, bail};
use clap::Args;

use mockdesk_core::Error;

use crate::context::CliController;
use crate::output;

/// Search and paging flags shared by the list commands.
#[derive(Args, Debug, Clone)]
pub struct ViewArgs {
    /// Case-insensitive substring filter
    #[arg(long)]
    pub search: Option<String>,

    /// Page to show, starting at 1
    #[arg(long, default_value_t = 1, value_parser = clap::value_parser!(u32).range(1..))]
    pub page: u32,

    /// Rows per page
    #[arg(long)]
    pub page_size: Option<usize>,

    /// Fetch again instead of using the cached snapshot
    #[arg(long)]
    pub reload: bool,

    /// Print each row as a JSON line
    #[arg(long)]
    pub json: bool,
}

/// Load (or reload) the snapshot, turning a recorded failure into an error.
pub async fn load(controller: &mut CliController, reload: bool) -> Result<()> {
    let state = if reload {
        controller.reload().await
    } else {
        controller.load().await
    };

    if let Some(message) = state.error() {
        bail!("{}", message);
    }
    Ok(())
}

/// Apply page size, search and page, in that order.
pub fn apply_view(controller: &mut CliController, args: &ViewArgs) -> Result<()> {
    if let Some(page_size) = args.page_size {
        controller
            .set_page_size(page_size)
            .context("Invalid page size")?;
    }
    if let Some(search) = &args.search {
        controller.submit_search(search.clone());
    }
    controller.set_page(args.page as usize - 1);
    Ok(())
}

/// Print per-field messages for validation failures and wrap the error.
pub fn report(err: Error, action: &'static str) -> anyhow::Error {
    if let Error::Validation(errors) = &err {
        output::validation(errors);
    }
    anyhow::Error::new(err).context(action)
}
