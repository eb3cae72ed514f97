//! Account form bodies and their client-side validation.

use serde::Serialize;

use crate::Result;
use crate::error::InvalidInputError;
use crate::types::Email;

use super::UserProfile;

/// Minimum accepted password length.
pub const MIN_PASSWORD_LEN: usize = 8;

fn require(value: &str, field: &'static str) -> Result<()> {
    if value.trim().is_empty() {
        Err(InvalidInputError::MissingField { field }.into())
    } else {
        Ok(())
    }
}

fn check_password(password: &str, confirmation: &str) -> Result<()> {
    if password != confirmation {
        return Err(InvalidInputError::PasswordMismatch.into());
    }
    if password.chars().count() < MIN_PASSWORD_LEN {
        return Err(InvalidInputError::PasswordTooShort {
            min: MIN_PASSWORD_LEN,
        }
        .into());
    }
    Ok(())
}

/// Body of the registration request.
#[derive(Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Registration {
    pub user_name: String,
    pub user_last_name: String,
    pub user_email: String,
    pub user_phone: String,
    pub password: String,
    /// Only checked locally, never sent.
    #[serde(skip)]
    pub confirm_password: String,
}

impl Registration {
    /// Check required fields, email shape, and password rules.
    pub fn validate(&self) -> Result<()> {
        require(&self.user_name, "userName")?;
        require(&self.user_last_name, "userLastName")?;
        require(&self.user_email, "userEmail")?;
        require(&self.password, "password")?;
        check_password(&self.password, &self.confirm_password)?;
        Email::new(&self.user_email)?;
        Ok(())
    }
}

impl std::fmt::Debug for Registration {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Registration")
            .field("user_name", &self.user_name)
            .field("user_last_name", &self.user_last_name)
            .field("user_email", &self.user_email)
            .field("user_phone", &self.user_phone)
            .field("password", &"[REDACTED]")
            .finish()
    }
}

/// Body of the profile update request.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ProfileUpdate {
    pub name: String,
    pub last_name: String,
    pub email: String,
    pub phone: String,
}

impl ProfileUpdate {
    /// Name, last name and email are required; phone may be empty.
    pub fn validate(&self) -> Result<()> {
        require(&self.name, "name")?;
        require(&self.last_name, "lastName")?;
        require(&self.email, "email")?;
        Email::new(&self.email)?;
        Ok(())
    }

    /// Merge into an existing projection, keeping its role.
    pub fn apply_to(&self, profile: &mut UserProfile) {
        profile.name = self.name.clone();
        profile.last_name = self.last_name.clone();
        profile.email = self.email.clone();
        profile.phone = self.phone.clone();
    }
}

impl From<&UserProfile> for ProfileUpdate {
    fn from(profile: &UserProfile) -> Self {
        Self {
            name: profile.name.clone(),
            last_name: profile.last_name.clone(),
            email: profile.email.clone(),
            phone: profile.phone.clone(),
        }
    }
}

/// Body of the password-reset confirmation.
#[derive(Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PasswordReset {
    pub email: String,
    pub token: String,
    pub new_password: String,
    pub confirm_new_password: String,
}

impl PasswordReset {
    pub fn validate(&self) -> Result<()> {
        require(&self.email, "email")?;
        require(&self.token, "token")?;
        require(&self.new_password, "newPassword")?;
        check_password(&self.new_password, &self.confirm_new_password)?;
        Email::new(&self.email)?;
        Ok(())
    }
}

impl std::fmt::Debug for PasswordReset {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PasswordReset")
            .field("email", &self.email)
            .field("token", &"[REDACTED]")
            .field("new_password", &"[REDACTED]")
            .finish()
    }
}
