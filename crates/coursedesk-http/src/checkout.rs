//! Checkout and billing-portal operations.

use tracing::{info, instrument};

use coursedesk_core::checkout::{
    CheckoutMode, CheckoutRedirect, CheckoutRequest, CheckoutResponse, CheckoutSessionBody,
    GuestPurchaseBody, PortalBody,
};
use coursedesk_core::error::AuthError;
use coursedesk_core::{Redirect, Result};

use crate::api::ApiCall;
use crate::api::endpoints::{
    CREATE_CHECKOUT_SESSION, CREATE_PORTAL_SESSION, GUEST_PURCHASE, PURCHASE_COURSE, SUBSCRIBE,
};
use crate::session::SessionManager;

impl SessionManager {
    /// Start a checkout and return the payment provider redirect.
    ///
    /// Courses, subscriptions and logged-in template purchases are refused
    /// locally without a session; nothing is sent in that case.
    #[instrument(skip(self, request), fields(kind = request.kind()))]
    pub async fn checkout(&self, request: &CheckoutRequest) -> Result<CheckoutRedirect> {
        request.check_session(self.is_authenticated().await)?;

        let empty = serde_json::json!({});
        let (endpoint, call) = match request {
            CheckoutRequest::Course { id } => (
                PURCHASE_COURSE,
                ApiCall::post(PURCHASE_COURSE)
                    .query(&serde_json::json!({ "courseId": id.0 }))?
                    .json(&empty)?,
            ),
            CheckoutRequest::Template { lookup_key, .. } => (
                CREATE_CHECKOUT_SESSION,
                ApiCall::post(CREATE_CHECKOUT_SESSION).json(&CheckoutSessionBody {
                    lookup_key,
                    mode: CheckoutMode::Payment,
                })?,
            ),
            CheckoutRequest::GuestTemplate { id, email } => (
                GUEST_PURCHASE,
                ApiCall::post(GUEST_PURCHASE).json(&GuestPurchaseBody {
                    guest_email: email.as_str(),
                    template_id: *id,
                })?,
            ),
            CheckoutRequest::Subscription => {
                (SUBSCRIBE, ApiCall::post(SUBSCRIBE).json(&empty)?)
            }
            CheckoutRequest::Generic { lookup_key, mode } => (
                CREATE_CHECKOUT_SESSION,
                ApiCall::post(CREATE_CHECKOUT_SESSION).json(&CheckoutSessionBody {
                    lookup_key,
                    mode: *mode,
                })?,
            ),
        };

        let response: CheckoutResponse = self.execute(&call).await?.json()?;
        let redirect = response.redirect(endpoint)?;
        info!(redirect = %redirect, "Checkout session created");

        Ok(CheckoutRedirect {
            redirect,
            guest_purchase_id: response.guest_purchase_id,
        })
    }

    /// Open the billing portal for a completed checkout session.
    #[instrument(skip(self, session_id))]
    pub async fn billing_portal(&self, session_id: &str) -> Result<Redirect> {
        if !self.is_authenticated().await {
            return Err(AuthError::not_logged_in().into());
        }

        let call = ApiCall::post(CREATE_PORTAL_SESSION).json(&PortalBody { session_id })?;
        let response: CheckoutResponse = self.execute(&call).await?.json()?;
        response.redirect(CREATE_PORTAL_SESSION)
    }
}
