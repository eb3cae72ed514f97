//! Checkout request and response types.

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::Result;
use crate::catalog::CourseId;
use crate::error::{AuthError, InvalidInputError, ProtocolError};
use crate::types::{Email, Redirect};

/// Payment mode of a generic checkout session.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CheckoutMode {
    Payment,
    Subscription,
}

impl fmt::Display for CheckoutMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CheckoutMode::Payment => f.write_str("payment"),
            CheckoutMode::Subscription => f.write_str("subscription"),
        }
    }
}

/// What is being bought.
#[derive(Debug, Clone, PartialEq)]
pub enum CheckoutRequest {
    /// A course; requires a logged-in user.
    Course { id: CourseId },
    /// A template bought by a logged-in user.
    Template { id: i64, lookup_key: String },
    /// A template bought without an account.
    GuestTemplate { id: i64, email: Email },
    /// The subscription plan; requires a logged-in user.
    Subscription,
    /// A provider price looked up by key.
    Generic {
        lookup_key: String,
        mode: CheckoutMode,
    },
}

impl CheckoutRequest {
    /// Product kinds that cannot be bought anonymously.
    pub fn requires_login(&self) -> bool {
        matches!(
            self,
            CheckoutRequest::Course { .. }
                | CheckoutRequest::Subscription
                | CheckoutRequest::Template { .. }
        )
    }

    /// Fail locally when the request needs a session the caller lacks.
    pub fn check_session(&self, authenticated: bool) -> Result<()> {
        if self.requires_login() && !authenticated {
            return Err(AuthError::not_logged_in().into());
        }
        Ok(())
    }

    /// Pick the template checkout for the current session.
    ///
    /// Logged-in users buy through the checkout-session endpoint; anonymous
    /// buyers must supply an email.
    pub fn template(id: i64, guest_email: Option<Email>, authenticated: bool) -> Result<Self> {
        if authenticated {
            return Ok(CheckoutRequest::Template {
                id,
                lookup_key: Self::template_lookup_key(id),
            });
        }
        match guest_email {
            Some(email) => Ok(CheckoutRequest::GuestTemplate { id, email }),
            None => Err(InvalidInputError::MissingField { field: "email" }.into()),
        }
    }

    /// Lookup key used by the template cards (`template_{id}`).
    pub fn template_lookup_key(id: i64) -> String {
        format!("template_{}", id)
    }

    /// Short name for logs.
    pub fn kind(&self) -> &'static str {
        match self {
            CheckoutRequest::Course { .. } => "course",
            CheckoutRequest::Template { .. } => "template",
            CheckoutRequest::GuestTemplate { .. } => "guest-template",
            CheckoutRequest::Subscription => "subscription",
            CheckoutRequest::Generic { .. } => "generic",
        }
    }
}

/// Body of the generic checkout-session endpoint.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CheckoutSessionBody<'a> {
    pub lookup_key: &'a str,
    pub mode: CheckoutMode,
}

/// Body of the guest template purchase endpoint.
#[derive(Debug, Serialize)]
pub struct GuestPurchaseBody<'a> {
    #[serde(rename = "guestEmail")]
    pub guest_email: &'a str,
    #[serde(rename = "templateId_Fk")]
    pub template_id: i64,
}

/// Body of the billing-portal endpoint.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PortalBody<'a> {
    pub session_id: &'a str,
}

/// Response of the checkout endpoints.
///
/// The redirect arrives under one of several keys depending on the endpoint.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct CheckoutResponse {
    #[serde(default)]
    pub url: Option<String>,
    #[serde(default, rename = "checkoutUrl")]
    pub checkout_url: Option<String>,
    #[serde(default, rename = "CheckoutUrl")]
    pub checkout_url_pascal: Option<String>,
    #[serde(default, rename = "guestPurchaseId")]
    pub guest_purchase_id: Option<i64>,
}

impl CheckoutResponse {
    /// First non-empty redirect among `url`, `checkoutUrl`, `CheckoutUrl`.
    pub fn redirect(&self, endpoint: &str) -> Result<Redirect> {
        let raw = [&self.url, &self.checkout_url, &self.checkout_url_pascal]
            .into_iter()
            .flatten()
            .find(|s| !s.is_empty())
            .ok_or_else(|| ProtocolError::MissingRedirect {
                endpoint: endpoint.to_string(),
            })?;
        Redirect::new(raw)
    }
}

/// Result of a checkout: where to send the user.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CheckoutRedirect {
    pub redirect: Redirect,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub guest_purchase_id: Option<i64>,
}
