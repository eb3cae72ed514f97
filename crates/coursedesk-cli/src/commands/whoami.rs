//! Whoami command implementation.

use anyhow::{Context, Result};
use clap::Args;

use coursedesk_core::Error;
use coursedesk_core::error::AuthError;

use crate::output;
use crate::session::{CliContext, CliSession};

#[derive(Args, Debug)]
pub struct WhoamiArgs {
    /// Print the profile as JSON
    #[arg(long)]
    pub json: bool,
}

pub async fn run(args: WhoamiArgs, ctx: &CliContext) -> Result<()> {
    let session = CliSession::open_restored(ctx)
        .await
        .context("Failed to load session")?;
    session.save()?;

    let profile = session
        .manager
        .user()
        .await
        .ok_or_else(|| Error::from(AuthError::not_logged_in()))
        .context("No active session")?;

    if args.json {
        return output::json_pretty(&profile);
    }

    output::field("Name", &profile.display_name());
    output::field("Email", &profile.email);
    if !profile.phone.is_empty() {
        output::field("Phone", &profile.phone);
    }
    if let Some(role) = &profile.role {
        output::field("Role", role);
    }
    if let Some(saved_at) = session.store().saved_at()? {
        output::field("Saved", &saved_at.to_rfc3339());
    }

    Ok(())
}
