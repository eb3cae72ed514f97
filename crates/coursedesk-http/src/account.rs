//! Account operations: registration, password reset, profile and purchases.

use tracing::{debug, info, instrument};

use coursedesk_core::Result;
use coursedesk_core::account::{PasswordReset, ProfileUpdate, Purchase, Registration, UserProfile};
use coursedesk_core::types::Email;

use crate::api::ApiCall;
use crate::api::endpoints::{
    FORGOT_PASSWORD, ForgotPasswordRequest, PROFILE, PURCHASES, REGISTER, RESET_PASSWORD,
};
use crate::session::SessionManager;

impl SessionManager {
    /// Create an account.
    ///
    /// Validation runs first; an invalid form never reaches the backend.
    /// Returns the backend's confirmation text, if any.
    #[instrument(skip(self, registration), fields(email = %registration.user_email))]
    pub async fn register(&self, registration: &Registration) -> Result<String> {
        registration.validate()?;
        info!("Registering account");

        let call = ApiCall::post(REGISTER).json(registration)?.without_refresh();
        let response = self.execute(&call).await?;
        Ok(response.message())
    }

    /// Ask the backend to send a password-reset link.
    #[instrument(skip(self), fields(email = %email))]
    pub async fn request_password_reset(&self, email: &Email) -> Result<String> {
        let call = ApiCall::post(FORGOT_PASSWORD)
            .json(&ForgotPasswordRequest {
                email: email.as_str(),
            })?
            .without_refresh();
        let response = self.execute(&call).await?;
        debug!("Password reset requested");
        Ok(response.message())
    }

    /// Set a new password with the token from the reset link.
    #[instrument(skip(self, reset), fields(email = %reset.email))]
    pub async fn reset_password(&self, reset: &PasswordReset) -> Result<String> {
        reset.validate()?;

        let call = ApiCall::post(RESET_PASSWORD).json(reset)?.without_refresh();
        let response = self.execute(&call).await?;
        info!("Password reset");
        Ok(response.message())
    }

    /// Fetch the profile and refresh the session projection with it.
    #[instrument(skip(self))]
    pub async fn profile(&self) -> Result<UserProfile> {
        let profile = self.fetch_profile().await?;
        self.set_user(Some(profile.clone())).await;
        Ok(profile)
    }

    /// Save profile changes and merge them into the projection.
    ///
    /// The role is kept from the existing projection.
    #[instrument(skip(self, update))]
    pub async fn update_profile(&self, update: &ProfileUpdate) -> Result<UserProfile> {
        update.validate()?;

        let call = ApiCall::put(PROFILE).json(update)?;
        self.execute(&call).await?;

        let merged = self
            .update_user(|user| {
                let profile = user.get_or_insert_with(|| UserProfile {
                    name: String::new(),
                    last_name: String::new(),
                    email: String::new(),
                    phone: String::new(),
                    role: None,
                });
                update.apply_to(profile);
                profile.clone()
            })
            .await;

        info!("Profile updated");
        Ok(merged)
    }

    /// Purchase history of the logged-in user.
    #[instrument(skip(self))]
    pub async fn purchases(&self) -> Result<Vec<Purchase>> {
        let purchases: Vec<Purchase> = self.execute(&ApiCall::get(PURCHASES)).await?.json()?;
        debug!(count = purchases.len(), "Fetched purchases");
        Ok(purchases)
    }
}
