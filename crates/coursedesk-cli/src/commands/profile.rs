//! Profile command implementations.

use anyhow::{Context, Result};
use clap::{Args, Subcommand};

use coursedesk_core::account::ProfileUpdate;

use crate::output;
use crate::session::{CliContext, CliSession};

#[derive(Args, Debug)]
pub struct ProfileCommand {
    #[command(subcommand)]
    pub command: ProfileSubcommand,
}

#[derive(Subcommand, Debug)]
pub enum ProfileSubcommand {
    /// Show the profile
    Show(ShowArgs),

    /// Change profile fields; omitted fields keep their value
    Update(UpdateArgs),
}

#[derive(Args, Debug)]
pub struct ShowArgs {
    /// Print the profile as JSON
    #[arg(long)]
    pub json: bool,
}

#[derive(Args, Debug)]
pub struct UpdateArgs {
    #[arg(long)]
    pub name: Option<String>,

    #[arg(long)]
    pub last_name: Option<String>,

    #[arg(long)]
    pub email: Option<String>,

    #[arg(long)]
    pub phone: Option<String>,
}

pub async fn handle(cmd: ProfileCommand, ctx: &CliContext) -> Result<()> {
    let session = CliSession::open(ctx)?;
    let profile = session
        .manager
        .profile()
        .await
        .context("Failed to load profile")?;

    let profile = match cmd.command {
        ProfileSubcommand::Show(args) if args.json => {
            session.save()?;
            return output::json_pretty(&profile);
        }
        ProfileSubcommand::Show(_) => profile,
        ProfileSubcommand::Update(args) => {
            let mut update = ProfileUpdate::from(&profile);
            if let Some(name) = args.name {
                update.name = name;
            }
            if let Some(last_name) = args.last_name {
                update.last_name = last_name;
            }
            if let Some(email) = args.email {
                update.email = email;
            }
            if let Some(phone) = args.phone {
                update.phone = phone;
            }

            let updated = session
                .manager
                .update_profile(&update)
                .await
                .context("Failed to update profile")?;
            output::success("Profile updated");
            updated
        }
    };
    session.save()?;

    output::field("Name", &profile.name);
    output::field("Last name", &profile.last_name);
    output::field("Email", &profile.email);
    output::field("Phone", &profile.phone);

    Ok(())
}
