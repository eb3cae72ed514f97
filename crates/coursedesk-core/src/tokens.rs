//! Refresh credentials kept between requests.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Identifier of the user a refresh token belongs to.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct UserId(String);

impl UserId {
    /// Create a user identifier.
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    /// Returns the identifier as a string.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for UserId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// A long-lived token exchanged for a renewed session cookie.
///
/// # Security
///
/// - Never logged or displayed in Debug output
/// - Treat as opaque; do not parse or inspect
#[derive(Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct RefreshToken(String);

impl RefreshToken {
    /// Create a new refresh token.
    pub fn new(token: impl Into<String>) -> Self {
        Self(token.into())
    }

    /// Returns the token value for use in refresh requests.
    ///
    /// # Security
    ///
    /// Use only when constructing token refresh requests or persisting state.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Debug for RefreshToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("RefreshToken").field(&"[REDACTED]").finish()
    }
}

/// The user identifier and refresh token pair used by the refresh endpoint.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StoredCredentials {
    pub user_id: UserId,
    pub refresh_token: RefreshToken,
}

impl StoredCredentials {
    pub fn new(user_id: UserId, refresh_token: RefreshToken) -> Self {
        Self {
            user_id,
            refresh_token,
        }
    }

    /// Build a pair from optional response fields; both must be present.
    pub fn from_parts(user_id: Option<String>, refresh_token: Option<String>) -> Option<Self> {
        match (user_id, refresh_token) {
            (Some(user_id), Some(token)) if !user_id.is_empty() && !token.is_empty() => {
                Some(Self::new(UserId::new(user_id), RefreshToken::new(token)))
            }
            _ => None,
        }
    }
}
