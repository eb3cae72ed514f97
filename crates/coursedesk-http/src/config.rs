//! Client configuration.

use coursedesk_core::ApiUrl;

/// Default `User-Agent` sent with every request.
pub const DEFAULT_USER_AGENT: &str = concat!("coursedesk/", env!("CARGO_PKG_VERSION"));

/// Settings for [`ApiClient`](crate::ApiClient) construction.
///
/// No request timeout is configured; calls run to completion or transport
/// failure.
#[derive(Debug, Clone)]
pub struct ClientConfig {
    /// Backend base URL.
    pub api: ApiUrl,
    /// `User-Agent` header value.
    pub user_agent: String,
}

impl ClientConfig {
    pub fn new(api: ApiUrl) -> Self {
        Self {
            api,
            user_agent: DEFAULT_USER_AGENT.to_string(),
        }
    }

    pub fn with_user_agent(mut self, user_agent: impl Into<String>) -> Self {
        self.user_agent = user_agent.into();
        self
    }
}
