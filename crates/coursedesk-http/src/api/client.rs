//! HTTP client for the backend API.

use std::sync::Arc;

use reqwest::Method;
use reqwest::cookie::{CookieStore, Jar};
use serde::Serialize;
use serde::de::DeserializeOwned;
use tracing::{debug, instrument, trace};

use coursedesk_core::error::{Error, InvalidInputError, ProtocolError, TransportError};
use coursedesk_core::types::ApiUrl;
use coursedesk_core::Result;

use super::endpoints::ErrorResponse;
use crate::config::ClientConfig;

/// Longest error text kept from a non-JSON error body.
const MAX_ERROR_TEXT: usize = 500;

/// Whether a 401 on this call may be recovered by a refresh.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RefreshPolicy {
    /// Refresh and re-issue once.
    Retry,
    /// Credential-establishing calls; a 401 is a plain rejection.
    Never,
}

/// A fully prepared request that can be sent more than once.
#[derive(Debug, Clone)]
pub struct ApiCall {
    method: Method,
    path: String,
    query: Vec<(String, String)>,
    body: Option<serde_json::Value>,
    refresh: RefreshPolicy,
}

impl ApiCall {
    pub fn new(method: Method, path: impl Into<String>) -> Self {
        Self {
            method,
            path: path.into(),
            query: Vec::new(),
            body: None,
            refresh: RefreshPolicy::Retry,
        }
    }

    pub fn get(path: impl Into<String>) -> Self {
        Self::new(Method::GET, path)
    }

    pub fn post(path: impl Into<String>) -> Self {
        Self::new(Method::POST, path)
    }

    pub fn put(path: impl Into<String>) -> Self {
        Self::new(Method::PUT, path)
    }

    /// Attach a JSON body.
    pub fn json<B: Serialize + ?Sized>(mut self, body: &B) -> Result<Self> {
        let value = serde_json::to_value(body).map_err(|e| InvalidInputError::Other {
            message: format!("request body: {}", e),
        })?;
        self.body = Some(value);
        Ok(self)
    }

    /// Attach query parameters from any struct or map; `null` fields are skipped.
    pub fn query<Q: Serialize + ?Sized>(mut self, params: &Q) -> Result<Self> {
        let value = serde_json::to_value(params).map_err(|e| InvalidInputError::Other {
            message: format!("query parameters: {}", e),
        })?;
        if let serde_json::Value::Object(map) = value {
            for (key, value) in map {
                let text = match value {
                    serde_json::Value::Null => continue,
                    serde_json::Value::String(s) => s,
                    other => other.to_string(),
                };
                self.query.push((key, text));
            }
        }
        Ok(self)
    }

    /// Skip the refresh-and-retry path for this call.
    pub fn without_refresh(mut self) -> Self {
        self.refresh = RefreshPolicy::Never;
        self
    }

    pub fn method(&self) -> &Method {
        &self.method
    }

    pub fn path(&self) -> &str {
        &self.path
    }

    pub fn refresh_policy(&self) -> RefreshPolicy {
        self.refresh
    }
}

/// A successful (2xx) response.
#[derive(Debug, Clone)]
pub struct ApiResponse {
    pub status: u16,
    pub body: Vec<u8>,
}

impl ApiResponse {
    /// Decode the body as JSON; an empty body decodes as `null`.
    pub fn json<R: DeserializeOwned>(&self) -> Result<R> {
        let bytes: &[u8] = if self.body.iter().all(u8::is_ascii_whitespace) {
            b"null"
        } else {
            &self.body
        };
        serde_json::from_slice(bytes).map_err(|e| {
            ProtocolError::Decode {
                message: e.to_string(),
            }
            .into()
        })
    }

    /// Text for message-style responses: `{ message }`, a JSON string, or plain text.
    pub fn message(&self) -> String {
        error_message(&self.body).unwrap_or_default()
    }
}

/// HTTP client for the backend API.
///
/// Holds the cookie jar carrying the ambient session cookie. Clones share
/// the same connection pool and jar.
#[derive(Debug, Clone)]
pub struct ApiClient {
    client: reqwest::Client,
    api: ApiUrl,
    cookies: Arc<Jar>,
}

impl ApiClient {
    /// Create a client for the configured backend.
    pub fn new(config: &ClientConfig) -> Result<Self> {
        let cookies = Arc::new(Jar::default());
        let client = reqwest::Client::builder()
            .user_agent(config.user_agent.as_str())
            .cookie_provider(Arc::clone(&cookies))
            .build()
            .map_err(transport_error)?;

        Ok(Self {
            client,
            api: config.api.clone(),
            cookies,
        })
    }

    /// Returns the API URL this client is configured for.
    pub fn api(&self) -> &ApiUrl {
        &self.api
    }

    /// Export the session cookies as a `Cookie` header value.
    pub fn export_cookies(&self) -> Option<String> {
        self.cookies
            .cookies(self.api.as_url())
            .and_then(|value| value.to_str().ok().map(str::to_string))
    }

    /// Restore cookies previously returned by [`export_cookies`](Self::export_cookies).
    pub fn restore_cookies(&self, header: &str) {
        for pair in header.split(';').map(str::trim).filter(|p| !p.is_empty()) {
            self.cookies.add_cookie_str(pair, self.api.as_url());
        }
    }

    /// Send a call once and classify the outcome.
    #[instrument(skip(self, call), fields(api = %self.api, method = %call.method, path = %call.path))]
    pub async fn send(&self, call: &ApiCall) -> Result<ApiResponse> {
        let url = self.api.endpoint(&call.path);
        debug!("API request");
        trace!(query = ?call.query, "query parameters");

        let mut request = self.client.request(call.method.clone(), &url);
        if !call.query.is_empty() {
            request = request.query(&call.query);
        }
        if let Some(body) = &call.body {
            request = request.json(body);
        }

        let response = request.send().await.map_err(transport_error)?;
        self.handle_response(response).await
    }

    /// Read the body and map non-2xx statuses to categorized errors.
    async fn handle_response(&self, response: reqwest::Response) -> Result<ApiResponse> {
        let status = response.status();
        trace!(status = %status, "API response");

        let body = response.bytes().await.map_err(transport_error)?.to_vec();

        if status.is_success() {
            Ok(ApiResponse {
                status: status.as_u16(),
                body,
            })
        } else {
            let err = Error::from_status(status.as_u16(), error_message(&body));
            debug!(status = status.as_u16(), category = %err.category(), "API error response");
            Err(err)
        }
    }
}

/// Map a reqwest failure onto the transport taxonomy.
pub(crate) fn transport_error(err: reqwest::Error) -> Error {
    let transport = if err.is_timeout() {
        TransportError::Timeout
    } else if err.is_connect() {
        TransportError::Connection {
            message: err.to_string(),
        }
    } else {
        TransportError::Http {
            message: err.to_string(),
        }
    };
    transport.into()
}

/// Extract a human-readable message from an error body.
fn error_message(body: &[u8]) -> Option<String> {
    if let Ok(parsed) = serde_json::from_slice::<ErrorResponse>(body) {
        return parsed.into_message();
    }
    if let Ok(text) = serde_json::from_slice::<String>(body) {
        return Some(text).filter(|t| !t.trim().is_empty());
    }
    let text = String::from_utf8_lossy(body);
    let text = text.trim();
    if text.is_empty() {
        None
    } else {
        Some(text.chars().take(MAX_ERROR_TEXT).collect())
    }
}
