//! Refresh command implementation.

use anyhow::{Context, Result};
use clap::Args;
use colored::Colorize;

use crate::output;
use crate::session::{CliContext, CliSession};

#[derive(Args, Debug)]
pub struct RefreshArgs {}

pub async fn run(_args: RefreshArgs, ctx: &CliContext) -> Result<()> {
    let session = CliSession::open(ctx)?;

    eprintln!("{}", "Refreshing session...".dimmed());

    session
        .manager
        .refresh()
        .await
        .context("Failed to refresh session")?;

    // Save the renewed cookie
    session.save()?;

    output::success("Session refreshed successfully");
    Ok(())
}
