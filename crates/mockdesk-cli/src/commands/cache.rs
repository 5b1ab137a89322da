//! Local cache subcommands.

use anyhow::{Context, Result};
use chrono::{DateTime, Utc};
use clap::{Args, Subcommand};
use colored::Colorize;

use mockdesk_core::KeyValueStore;
use mockdesk_core::auth::AUTH_KEY;

use crate::context::AppContext;
use crate::output;

#[derive(Args, Debug)]
pub struct CacheCommand {
    #[command(subcommand)]
    pub command: CacheSubcommand,
}

#[derive(Subcommand, Debug)]
pub enum CacheSubcommand {
    /// List cached entries
    Status(StatusArgs),

    /// Drop cached snapshots
    Clear(ClearArgs),
}

#[derive(Args, Debug)]
pub struct StatusArgs {
    /// Output as JSON
    #[arg(long)]
    pub json: bool,
}

#[derive(Args, Debug)]
pub struct ClearArgs {
    /// Only this key (posts, users, auth)
    pub key: Option<String>,

    /// Also drop the login flag
    #[arg(long, conflicts_with = "key")]
    pub all: bool,
}

pub fn handle(cmd: CacheCommand, ctx: &AppContext) -> Result<()> {
    match cmd.command {
        CacheSubcommand::Status(args) => status(args, ctx),
        CacheSubcommand::Clear(args) => clear(args, ctx),
    }
}

fn status(args: StatusArgs, ctx: &AppContext) -> Result<()> {
    let entries = ctx
        .store()
        .entries()
        .context("Failed to read cache directory")?;

    if args.json {
        let entries: Vec<_> = entries
            .iter()
            .map(|e| {
                serde_json::json!({
                    "key": e.key,
                    "size": e.size,
                    "modified": e.modified.map(|t| t.to_rfc3339()),
                })
            })
            .collect();
        return output::json(&entries);
    }

    output::field("Directory", &ctx.data_dir().display().to_string());
    if entries.is_empty() {
        eprintln!("{}", "Cache is empty.".dimmed());
        return Ok(());
    }

    for entry in entries {
        let modified = entry
            .modified
            .map(|t| describe_age(t, Utc::now()))
            .unwrap_or_else(|| "unknown".to_string());
        println!("{:<8} {:>8} bytes  {}", entry.key, entry.size, modified.dimmed());
    }
    Ok(())
}

/// `12s ago`, `5m ago`, `3h ago`, then the date.
fn describe_age(modified: DateTime<Utc>, now: DateTime<Utc>) -> String {
    let age = now.signed_duration_since(modified);
    if age.num_seconds() < 60 {
        format!("{}s ago", age.num_seconds().max(0))
    } else if age.num_minutes() < 60 {
        format!("{}m ago", age.num_minutes())
    } else if age.num_hours() < 24 {
        format!("{}h ago", age.num_hours())
    } else {
        modified.format("%Y-%m-%d").to_string()
    }
}

fn clear(args: ClearArgs, ctx: &AppContext) -> Result<()> {
    let store = ctx.store();

    if let Some(key) = args.key {
        store
            .remove(&key)
            .with_context(|| format!("Failed to remove '{}'", key))?;
        output::success(&format!("Removed '{}'", key));
        return Ok(());
    }

    let removed = if args.all {
        store.clear().context("Failed to clear cache")?
    } else {
        let mut removed = Vec::new();
        for entry in store.entries().context("Failed to read cache directory")? {
            if entry.key == AUTH_KEY {
                continue;
            }
            store
                .remove(&entry.key)
                .with_context(|| format!("Failed to remove '{}'", entry.key))?;
            removed.push(entry.key);
        }
        removed
    };

    if removed.is_empty() {
        output::success("Nothing to clear");
    } else {
        output::success(&format!("Removed {}", removed.join(", ")));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Duration, TimeZone};

    #[test]
    fn age_buckets() {
        let now = Utc.with_ymd_and_hms(2024, 3, 10, 12, 0, 0).unwrap();
        assert_eq!(describe_age(now - Duration::seconds(5), now), "5s ago");
        assert_eq!(describe_age(now - Duration::minutes(7), now), "7m ago");
        assert_eq!(describe_age(now - Duration::hours(2), now), "2h ago");
        assert_eq!(describe_age(now - Duration::days(3), now), "2024-03-07");
        // Clock skew never shows a negative age.
        assert_eq!(describe_age(now + Duration::seconds(30), now), "0s ago");
    }
}
