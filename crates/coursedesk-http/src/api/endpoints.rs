//! Backend endpoint paths and the bodies private to this crate.

use serde::{Deserialize, Serialize};

// ============================================================================
// Session
// ============================================================================

/// Session probe; 200 when the session cookie is valid.
pub const SESSION_PROBE: &str = "/Auth";

pub const LOGIN: &str = "/login";

pub const LOGOUT: &str = "/logout";

/// Exchanges the stored user id and refresh token for a renewed cookie.
pub const REFRESH: &str = "/api/auth/refresh";

// ============================================================================
// Account
// ============================================================================

pub const REGISTER: &str = "/register";

pub const FORGOT_PASSWORD: &str = "/api/forgot-password";

pub const RESET_PASSWORD: &str = "/api/reset-password";

pub const PROFILE: &str = "/api/user/profile";

pub const PURCHASES: &str = "/api/user/purchases";

// ============================================================================
// Catalog
// ============================================================================

pub const COURSES: &str = "/api/courses";

pub const SEARCH_COURSES: &str = "/api/search/courses";

pub fn course(id: i64) -> String {
    format!("{}/{}", COURSES, id)
}

// ============================================================================
// Checkout
// ============================================================================

/// Takes `courseId` as a query parameter.
pub const PURCHASE_COURSE: &str = "/api/purchase/course";

pub const SUBSCRIBE: &str = "/api/subscribe";

pub const GUEST_PURCHASE: &str = "/api/guestpurchase/payment";

pub const CREATE_CHECKOUT_SESSION: &str = "/api/payments/create-checkout-session";

pub const CREATE_PORTAL_SESSION: &str = "/api/payments/create-portal-session";

// ============================================================================
// Request/Response Types
// ============================================================================

/// Request body for login.
#[derive(Debug, Serialize)]
pub struct LoginRequest<'a> {
    pub email: &'a str,
    pub password: &'a str,
}

/// Optional body of a login or refresh response.
///
/// Cookie-only backends send nothing; others hand out the refresh pair.
#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TokenPairResponse {
    #[serde(default)]
    pub user_id: Option<String>,
    #[serde(default)]
    pub refresh_token: Option<String>,
}

/// Request body for refresh.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RefreshRequest<'a> {
    pub user_id: &'a str,
    pub refresh_token: &'a str,
}

/// Request body for the password-reset request.
#[derive(Debug, Serialize)]
pub struct ForgotPasswordRequest<'a> {
    pub email: &'a str,
}

/// Error body shapes: `{ message }`, `{ error }` or problem details `{ title }`.
#[derive(Debug, Deserialize)]
pub struct ErrorResponse {
    #[serde(default)]
    pub message: Option<String>,
    #[serde(default)]
    pub error: Option<String>,
    #[serde(default)]
    pub title: Option<String>,
}

impl ErrorResponse {
    pub fn into_message(self) -> Option<String> {
        self.message
            .or(self.error)
            .or(self.title)
            .filter(|m| !m.trim().is_empty())
    }
}
