//! Register command implementation.

use anyhow::{Context, Result};
use clap::Args;

use coursedesk_core::account::Registration;

use crate::output;
use crate::session::{CliContext, CliSession};

#[derive(Args, Debug)]
pub struct RegisterArgs {
    /// First name
    #[arg(long)]
    pub name: String,

    /// Last name
    #[arg(long)]
    pub last_name: String,

    /// Email address, used to log in
    #[arg(long)]
    pub email: String,

    /// Phone number
    #[arg(long, default_value = "")]
    pub phone: String,

    /// Password
    #[arg(long, env = "COURSEDESK_PASSWORD", hide_env_values = true)]
    pub password: String,

    /// Password confirmation (defaults to the password)
    #[arg(long)]
    pub confirm_password: Option<String>,
}

pub async fn run(args: RegisterArgs, ctx: &CliContext) -> Result<()> {
    let confirm_password = args
        .confirm_password
        .unwrap_or_else(|| args.password.clone());
    let registration = Registration {
        user_name: args.name,
        user_last_name: args.last_name,
        user_email: args.email,
        user_phone: args.phone,
        password: args.password,
        confirm_password,
    };

    let session = CliSession::open(ctx)?;
    let message = session
        .manager
        .register(&registration)
        .await
        .context("Failed to register")?;

    output::success("Account created");
    if !message.is_empty() {
        println!("{}", message);
    }
    output::field("Email", &registration.user_email);

    Ok(())
}
