//! CLI argument definitions.

use clap::{Parser, Subcommand};

use coursedesk_core::{ApiUrl, Locale, Surface};

use crate::commands::{
    checkout::CheckoutCommand, courses::CoursesCommand, login::LoginArgs, logout::LogoutArgs,
    password::{ForgotPasswordArgs, ResetPasswordArgs},
    portal::PortalArgs, profile::ProfileCommand, purchases::PurchasesArgs, refresh::RefreshArgs,
    register::RegisterArgs, whoami::WhoamiArgs,
};

/// Backend used when neither `--api` nor `COURSEDESK_API` is given.
pub const DEFAULT_API: &str = "https://localhost:7234";

/// Course storefront client.
#[derive(Parser, Debug)]
#[command(name = "coursedesk")]
#[command(author, version = env!("COURSEDESK_VERSION"), about, long_about = None)]
pub struct Cli {
    /// Backend base URL
    #[arg(long, env = "COURSEDESK_API", default_value = DEFAULT_API, global = true)]
    pub api: ApiUrl,

    /// Language of error messages (sv, en)
    #[arg(long, env = "COURSEDESK_LOCALE", default_value = "sv", global = true)]
    pub locale: Locale,

    /// Increase verbosity (-v, -vv, -vvv)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Output logs as JSON
    #[arg(long, global = true)]
    pub json_logs: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Log in and save the session
    Login(LoginArgs),

    /// Log out and forget the saved session
    Logout(LogoutArgs),

    /// Display the logged-in user
    Whoami(WhoamiArgs),

    /// Refresh the session with the saved refresh token
    Refresh(RefreshArgs),

    /// Create an account
    Register(RegisterArgs),

    /// Request a password-reset link
    ForgotPassword(ForgotPasswordArgs),

    /// Set a new password with a reset token
    ResetPassword(ResetPasswordArgs),

    /// Show or edit the profile
    Profile(ProfileCommand),

    /// List past purchases
    Purchases(PurchasesArgs),

    /// Browse and search courses
    Courses(CoursesCommand),

    /// Start a checkout and print the payment link
    Checkout(CheckoutCommand),

    /// Open the billing portal for a subscription
    Portal(PortalArgs),
}

impl Commands {
    /// Surface whose messages are used when this command fails.
    pub fn surface(&self) -> Surface {
        match self {
            Commands::Login(_) | Commands::Logout(_) | Commands::Refresh(_) => Surface::Login,
            Commands::Whoami(_) | Commands::Profile(_) => Surface::Profile,
            Commands::Register(_) => Surface::Register,
            Commands::ForgotPassword(_) | Commands::ResetPassword(_) => Surface::PasswordReset,
            Commands::Purchases(_) => Surface::Purchases,
            Commands::Courses(cmd) => cmd.surface(),
            Commands::Checkout(_) => Surface::Checkout,
            Commands::Portal(_) => Surface::Portal,
        }
    }
}
