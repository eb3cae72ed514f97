//! Login command implementation.

use anyhow::{Context, Result};
use clap::Args;
use colored::Colorize;

use coursedesk_core::Credentials;

use crate::output;
use crate::session::{CliContext, CliSession};

#[derive(Args, Debug)]
pub struct LoginArgs {
    /// Account email address
    #[arg(long)]
    pub email: String,

    /// Account password
    #[arg(long, env = "COURSEDESK_PASSWORD", hide_env_values = true)]
    pub password: String,
}

pub async fn run(args: LoginArgs, ctx: &CliContext) -> Result<()> {
    let credentials = Credentials::parse(&args.email, &args.password)?;

    eprintln!("{}", "Logging in...".dimmed());

    let session = CliSession::open(ctx)?;
    let profile = session
        .manager
        .login(&credentials)
        .await
        .context("Failed to login")?;

    session.save()?;

    // Print success
    output::success("Logged in successfully");
    println!();
    output::field("Name", &profile.display_name());
    output::field("Email", &profile.email);
    output::field("API", ctx.api.as_str());

    Ok(())
}
