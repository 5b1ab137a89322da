//! Status command implementation.

use anyhow::Result;
use clap::Args;

use mockdesk_core::Route;

use crate::context::AppContext;
use crate::output;

#[derive(Args, Debug)]
pub struct StatusArgs {
    /// Output as JSON
    #[arg(long)]
    pub json: bool,
}

pub fn run(args: StatusArgs, ctx: &AppContext) -> Result<()> {
    let auth = ctx.authenticator()?;
    let authenticated = auth.is_authenticated();
    let landing = Route::landing(authenticated);

    if args.json {
        return output::json(&serde_json::json!({
            "authenticated": authenticated,
            "landing": landing.path(),
            "api_url": ctx.settings.api_url.as_str(),
            "auth_url": ctx.settings.auth_url.as_str(),
        }));
    }

    output::field("Authenticated", if authenticated { "yes" } else { "no" });
    output::field("Landing", landing.path());
    output::field("API", ctx.settings.api_url.as_str());
    output::field("Auth API", ctx.settings.auth_url.as_str());
    output::field("Data", &ctx.data_dir().display().to_string());
    Ok(())
}
