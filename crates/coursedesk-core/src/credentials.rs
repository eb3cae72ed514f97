//! Login credentials type.

use std::fmt;

use crate::types::Email;

/// Email and password for a login request.
///
/// # Security
///
/// The password is never exposed in Debug output to prevent accidental logging.
///
/// # Example
///
/// ```
/// use coursedesk_core::{Credentials, Email};
///
/// let email = Email::new("anna@example.se").unwrap();
/// let creds = Credentials::new(email, "hunter22");
/// assert_eq!(creds.email().as_str(), "anna@example.se");
/// ```
#[derive(Clone)]
pub struct Credentials {
    email: Email,
    password: String,
}

impl Credentials {
    /// Create new credentials.
    pub fn new(email: Email, password: impl Into<String>) -> Self {
        Self {
            email,
            password: password.into(),
        }
    }

    /// Parse credentials from raw form input.
    ///
    /// Both fields are required; the email must be well-formed.
    pub fn parse(email: &str, password: &str) -> crate::Result<Self> {
        if email.trim().is_empty() {
            return Err(crate::error::InvalidInputError::MissingField { field: "email" }.into());
        }
        if password.is_empty() {
            return Err(crate::error::InvalidInputError::MissingField { field: "password" }.into());
        }
        Ok(Self::new(Email::new(email)?, password))
    }

    /// Returns the email address.
    pub fn email(&self) -> &Email {
        &self.email
    }

    /// Returns the password.
    ///
    /// # Security
    ///
    /// Use this only when constructing the login request body.
    pub fn password(&self) -> &str {
        &self.password
    }
}

impl fmt::Debug for Credentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Credentials")
            .field("email", &self.email)
            .field("password", &"[REDACTED]")
            .finish()
    }
}
