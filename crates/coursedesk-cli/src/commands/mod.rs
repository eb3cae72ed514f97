//! Subcommand implementations.

pub mod checkout;
pub mod courses;
pub mod login;
pub mod logout;
pub mod password;
pub mod portal;
pub mod profile;
pub mod purchases;
pub mod refresh;
pub mod register;
pub mod whoami;

use anyhow::Result;

use crate::cli::Commands;
use crate::session::CliContext;

pub async fn handle(command: Commands, ctx: &CliContext) -> Result<()> {
    match command {
        Commands::Login(args) => login::run(args, ctx).await,
        Commands::Logout(args) => logout::run(args, ctx).await,
        Commands::Whoami(args) => whoami::run(args, ctx).await,
        Commands::Refresh(args) => refresh::run(args, ctx).await,
        Commands::Register(args) => register::run(args, ctx).await,
        Commands::ForgotPassword(args) => password::forgot(args, ctx).await,
        Commands::ResetPassword(args) => password::reset(args, ctx).await,
        Commands::Profile(cmd) => profile::handle(cmd, ctx).await,
        Commands::Purchases(args) => purchases::run(args, ctx).await,
        Commands::Courses(cmd) => courses::handle(cmd, ctx).await,
        Commands::Checkout(cmd) => checkout::handle(cmd, ctx).await,
        Commands::Portal(args) => portal::run(args, ctx).await,
    }
}
