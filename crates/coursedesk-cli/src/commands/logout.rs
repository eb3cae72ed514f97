//! Logout command implementation.

use anyhow::{Context, Result};
use clap::Args;

use crate::output;
use crate::session::{CliContext, CliSession};

#[derive(Args, Debug)]
pub struct LogoutArgs {}

pub async fn run(_args: LogoutArgs, ctx: &CliContext) -> Result<()> {
    let session = CliSession::open(ctx)?;

    session
        .manager
        .logout()
        .await
        .context("Failed to log out")?;

    // The session file is gone; nothing is written back.
    output::success("Logged out");
    Ok(())
}
