//! coursedesk - command-line client for the course storefront.
//!
//! A thin wrapper over `coursedesk-http`: each command opens the saved
//! session, performs one operation and saves the session again.

mod cli;
mod commands;
mod output;
mod session;

use std::process::ExitCode;

use clap::Parser;
use tracing::debug;
use tracing_subscriber::{EnvFilter, fmt, prelude::*};

use coursedesk_core::{Locale, Surface, user_message};

use cli::Cli;
use session::CliContext;

#[tokio::main]
async fn main() -> ExitCode {
    let cli = Cli::parse();

    // Initialize logging
    init_logging(cli.verbose, cli.json_logs);

    let ctx = CliContext {
        api: cli.api,
        locale: cli.locale,
    };
    let surface = cli.command.surface();

    match commands::handle(cli.command, &ctx).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            report(&err, surface, ctx.locale);
            ExitCode::FAILURE
        }
    }
}

/// Print a failure: the localized message for API errors, the context
/// chain for everything else.
fn report(err: &anyhow::Error, surface: Surface, locale: Locale) {
    debug!(error = format!("{:#}", err), "Command failed");

    let api_error = err
        .chain()
        .find_map(|cause| cause.downcast_ref::<coursedesk_core::Error>());

    match api_error {
        Some(api_error) => {
            output::error(&user_message(api_error, surface, locale));
            if let Some(navigation) = api_error.navigation() {
                output::navigation_hint(navigation, locale);
            }
        }
        None => output::error(&format!("{:#}", err)),
    }
}

fn init_logging(verbosity: u8, json: bool) {
    let filter = match verbosity {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    };

    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(filter));

    if json {
        tracing_subscriber::registry()
            .with(filter)
            .with(fmt::layer().json().with_writer(std::io::stderr))
            .init();
    } else {
        tracing_subscriber::registry()
            .with(filter)
            .with(fmt::layer().with_target(false).with_writer(std::io::stderr))
            .init();
    }
}
