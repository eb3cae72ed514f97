//! Password-reset command implementations.

use anyhow::{Context, Result};
use clap::Args;

use coursedesk_core::Email;
use coursedesk_core::account::PasswordReset;

use crate::output;
use crate::session::{CliContext, CliSession};

#[derive(Args, Debug)]
pub struct ForgotPasswordArgs {
    /// Email address of the account
    #[arg(long)]
    pub email: String,
}

#[derive(Args, Debug)]
pub struct ResetPasswordArgs {
    /// Email address of the account
    #[arg(long)]
    pub email: String,

    /// Token from the reset link
    #[arg(long)]
    pub token: String,

    /// New password
    #[arg(long, env = "COURSEDESK_NEW_PASSWORD", hide_env_values = true)]
    pub new_password: String,

    /// New password confirmation (defaults to the new password)
    #[arg(long)]
    pub confirm_password: Option<String>,
}

pub async fn forgot(args: ForgotPasswordArgs, ctx: &CliContext) -> Result<()> {
    let email = Email::new(&args.email)?;

    let session = CliSession::open(ctx)?;
    let message = session
        .manager
        .request_password_reset(&email)
        .await
        .context("Failed to request password reset")?;

    output::success("Password reset requested");
    if !message.is_empty() {
        println!("{}", message);
    }
    Ok(())
}

pub async fn reset(args: ResetPasswordArgs, ctx: &CliContext) -> Result<()> {
    let confirm_new_password = args
        .confirm_password
        .unwrap_or_else(|| args.new_password.clone());
    let reset = PasswordReset {
        email: args.email,
        token: args.token,
        new_password: args.new_password,
        confirm_new_password,
    };

    let session = CliSession::open(ctx)?;
    let message = session
        .manager
        .reset_password(&reset)
        .await
        .context("Failed to reset password")?;

    output::success("Password changed");
    if !message.is_empty() {
        println!("{}", message);
    }
    Ok(())
}
