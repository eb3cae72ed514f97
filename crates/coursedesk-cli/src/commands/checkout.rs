//! Checkout command implementations.

use anyhow::{Context, Result};
use clap::{Args, Subcommand, ValueEnum};
use colored::Colorize;

use coursedesk_core::Email;
use coursedesk_core::catalog::CourseId;
use coursedesk_core::checkout::{CheckoutMode, CheckoutRequest};

use crate::output;
use crate::session::{CliContext, CliSession};

#[derive(Args, Debug)]
pub struct CheckoutCommand {
    /// Print the redirect as JSON
    #[arg(long, global = true)]
    pub json: bool,

    #[command(subcommand)]
    pub command: CheckoutSubcommand,
}

#[derive(Subcommand, Debug)]
pub enum CheckoutSubcommand {
    /// Buy a course (requires login)
    Course {
        /// Course id
        id: i64,
    },

    /// Buy a template; without a login, --email buys as a guest
    Template {
        /// Template id
        id: i64,

        /// Receipt address for a guest purchase
        #[arg(long)]
        email: Option<String>,
    },

    /// Start the subscription (requires login)
    Subscription,

    /// Buy a provider price by lookup key
    Price {
        /// Price lookup key
        lookup_key: String,

        #[arg(long, value_enum, default_value_t = ModeArg::Payment)]
        mode: ModeArg,
    },
}

#[derive(Debug, Clone, Copy, ValueEnum)]
pub enum ModeArg {
    Payment,
    Subscription,
}

impl From<ModeArg> for CheckoutMode {
    fn from(arg: ModeArg) -> Self {
        match arg {
            ModeArg::Payment => CheckoutMode::Payment,
            ModeArg::Subscription => CheckoutMode::Subscription,
        }
    }
}

pub async fn handle(cmd: CheckoutCommand, ctx: &CliContext) -> Result<()> {
    let session = CliSession::open_restored(ctx)
        .await
        .context("Failed to load session")?;
    let authenticated = session.manager.is_authenticated().await;

    let request = match cmd.command {
        CheckoutSubcommand::Course { id } => CheckoutRequest::Course { id: CourseId(id) },
        CheckoutSubcommand::Template { id, email } => {
            let email = email.as_deref().map(Email::new).transpose()?;
            CheckoutRequest::template(id, email, authenticated)?
        }
        CheckoutSubcommand::Subscription => CheckoutRequest::Subscription,
        CheckoutSubcommand::Price { lookup_key, mode } => CheckoutRequest::Generic {
            lookup_key,
            mode: mode.into(),
        },
    };

    eprintln!("{}", "Creating checkout session...".dimmed());

    let checkout = session
        .manager
        .checkout(&request)
        .await
        .context("Failed to start checkout")?;
    session.save()?;

    if cmd.json {
        return output::json_pretty(&checkout);
    }

    output::success("Checkout session created");
    output::field("Pay at", checkout.redirect.as_str());
    if let Some(id) = checkout.guest_purchase_id {
        output::field("Guest purchase", &id.to_string());
    }

    Ok(())
}
