//! Purchases command implementation.

use anyhow::{Context, Result};
use clap::Args;
use colored::Colorize;

use crate::output;
use crate::session::{CliContext, CliSession};

#[derive(Args, Debug)]
pub struct PurchasesArgs {
    /// Output one JSON object per purchase
    #[arg(long)]
    pub json: bool,
}

pub async fn run(args: PurchasesArgs, ctx: &CliContext) -> Result<()> {
    let session = CliSession::open(ctx)?;
    let purchases = session
        .manager
        .purchases()
        .await
        .context("Failed to list purchases")?;
    session.save()?;

    if purchases.is_empty() {
        eprintln!("{}", "No purchases found.".dimmed());
        return Ok(());
    }

    for purchase in &purchases {
        if args.json {
            output::json(purchase)?;
            continue;
        }

        println!(
            "{} {}  {}",
            format!("#{}", purchase.purchase_id).bold(),
            purchase.purchase_date.dimmed(),
            output::price(purchase.price)
        );
        for item in &purchase.items {
            println!("    {}", item.product_name);
        }
    }

    Ok(())
}
