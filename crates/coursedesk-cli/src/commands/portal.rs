//! Billing portal command implementation.

use anyhow::{Context, Result};
use clap::Args;

use crate::output;
use crate::session::{CliContext, CliSession};

#[derive(Args, Debug)]
pub struct PortalArgs {
    /// Checkout session id from the payment provider
    pub session_id: String,
}

pub async fn run(args: PortalArgs, ctx: &CliContext) -> Result<()> {
    let session = CliSession::open_restored(ctx)
        .await
        .context("Failed to load session")?;

    let redirect = session
        .manager
        .billing_portal(&args.session_id)
        .await
        .context("Failed to open billing portal")?;
    session.save()?;

    output::field("Manage at", redirect.as_str());
    Ok(())
}
