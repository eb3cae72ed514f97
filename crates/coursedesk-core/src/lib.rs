//! coursedesk-core - Core types and traits for the coursedesk storefront client.

pub mod account;
pub mod catalog;
pub mod checkout;
pub mod credentials;
pub mod error;
pub mod messages;
pub mod tokens;
pub mod traits;
pub mod types;

pub use credentials::Credentials;
pub use error::{Error, ErrorCategory, Navigation};
pub use messages::{Locale, Surface, user_message};
pub use tokens::{RefreshToken, StoredCredentials, UserId};
pub use traits::{CredentialStore, PageStream};
pub use types::{ApiUrl, Email, Redirect};

/// Result type alias using the crate's Error type.
pub type Result<T> = std::result::Result<T, Error>;
