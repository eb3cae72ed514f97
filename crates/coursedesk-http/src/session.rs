//! Session manager: authenticated requests with refresh-and-retry.

use std::fmt;
use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering};

use reqwest::Method;
use serde::Serialize;
use serde::de::DeserializeOwned;
use tokio::sync::{Mutex, RwLock};
use tracing::{debug, info, instrument, warn};

use coursedesk_core::account::UserProfile;
use coursedesk_core::error::{AuthError, Error, ErrorCategory};
use coursedesk_core::{Credentials, CredentialStore, Navigation, Result, StoredCredentials};

use crate::api::endpoints::{
    LOGIN, LOGOUT, LoginRequest, PROFILE, REFRESH, RefreshRequest, SESSION_PROBE,
    TokenPairResponse,
};
use crate::api::{ApiCall, ApiClient, ApiResponse, RefreshPolicy};
use crate::config::ClientConfig;

/// Request-scoped retry counter.
///
/// Each call owns its own counter, so concurrent requests each get their
/// own single retry. The refresh itself is shared: a call whose 401 predates
/// a refresh finished by another call retries without refreshing again.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Attempt(u8);

impl Attempt {
    /// Refresh-and-retry cycles allowed per call.
    pub const MAX_RETRIES: u8 = 1;

    pub fn first() -> Self {
        Self(0)
    }

    /// True once the call has been re-issued after a refresh.
    pub fn is_retry(&self) -> bool {
        self.0 > 0
    }

    pub fn may_refresh(&self) -> bool {
        self.0 < Self::MAX_RETRIES
    }

    pub fn next(self) -> Self {
        Self(self.0 + 1)
    }
}

impl fmt::Display for Attempt {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0 + 1)
    }
}

/// The client's authenticated context.
///
/// Constructed on start-up with [`SessionManager::start`] and torn down with
/// [`SessionManager::logout`]. Every backend call goes through
/// [`SessionManager::request`] or one of the typed operations built on it.
///
/// # Thread Safety
///
/// Cheap to clone (internal `Arc`) and safe to share across tasks.
#[derive(Clone)]
pub struct SessionManager {
    inner: Arc<SessionInner>,
}

struct SessionInner {
    client: ApiClient,
    store: Arc<dyn CredentialStore>,
    user: RwLock<Option<UserProfile>>,
    /// Held while the refresh endpoint is called.
    refresh_lock: Mutex<()>,
    /// Successful refreshes so far.
    refreshes: AtomicU64,
}

impl SessionManager {
    /// Create an anonymous manager without contacting the backend.
    pub fn new(client: ApiClient, store: Arc<dyn CredentialStore>) -> Self {
        Self {
            inner: Arc::new(SessionInner {
                client,
                store,
                user: RwLock::new(None),
                refresh_lock: Mutex::new(()),
                refreshes: AtomicU64::new(0),
            }),
        }
    }

    /// Build a client from `config` and restore any existing session.
    ///
    /// # Errors
    ///
    /// Authorization failures yield an anonymous manager; transport and
    /// server failures are returned.
    #[instrument(skip(config, store), fields(api = %config.api))]
    pub async fn start(config: &ClientConfig, store: Arc<dyn CredentialStore>) -> Result<Self> {
        let manager = Self::new(ApiClient::new(config)?, store);
        manager.restore().await?;
        Ok(manager)
    }

    /// Probe the session cookie and load the profile on success.
    ///
    /// Returns whether a session is now present.
    #[instrument(skip(self))]
    pub async fn restore(&self) -> Result<bool> {
        debug!("Probing session");
        let probe = self.execute(&ApiCall::get(SESSION_PROBE)).await;
        let profile = match probe {
            Ok(_) => self.fetch_profile().await,
            Err(err) => Err(err),
        };

        match profile {
            Ok(profile) => {
                info!(email = %profile.email, "Session restored");
                *self.inner.user.write().await = Some(profile);
                Ok(true)
            }
            Err(err) if is_auth_failure(&err) => {
                debug!(error = %err, "No active session");
                *self.inner.user.write().await = None;
                Ok(false)
            }
            Err(err) => Err(err),
        }
    }

    /// Returns the API client used by this manager.
    pub fn client(&self) -> &ApiClient {
        &self.inner.client
    }

    /// Returns the credential store used by this manager.
    pub fn store(&self) -> &Arc<dyn CredentialStore> {
        &self.inner.store
    }

    /// Returns a snapshot of the authenticated-user projection.
    pub async fn user(&self) -> Option<UserProfile> {
        self.inner.user.read().await.clone()
    }

    /// True exactly when a user projection is present.
    pub async fn is_authenticated(&self) -> bool {
        self.inner.user.read().await.is_some()
    }

    pub(crate) async fn set_user(&self, user: Option<UserProfile>) {
        *self.inner.user.write().await = user;
    }

    pub(crate) async fn update_user<F, R>(&self, f: F) -> R
    where
        F: FnOnce(&mut Option<UserProfile>) -> R,
    {
        let mut user = self.inner.user.write().await;
        f(&mut user)
    }

    // ========================================================================
    // Lifecycle
    // ========================================================================

    /// Log in and load the profile into the session.
    ///
    /// A refresh pair in the response body is persisted; cookie-only
    /// backends leave the store untouched.
    ///
    /// # Errors
    ///
    /// Rejected credentials yield [`ErrorCategory::Unauthenticated`] and
    /// leave the session absent.
    #[instrument(skip(self, credentials), fields(email = %credentials.email()))]
    pub async fn login(&self, credentials: &Credentials) -> Result<UserProfile> {
        info!("Logging in");

        let call = ApiCall::post(LOGIN)
            .json(&LoginRequest {
                email: credentials.email().as_str(),
                password: credentials.password(),
            })?
            .without_refresh();

        let response = self.execute(&call).await?;
        let tokens: Option<TokenPairResponse> = response.json().unwrap_or_default();
        if let Some(pair) = tokens
            .and_then(|t| StoredCredentials::from_parts(t.user_id, t.refresh_token))
        {
            self.inner.store.save(&pair).await?;
            debug!(user_id = %pair.user_id, "Stored refresh credentials");
        }

        let profile = self.fetch_profile().await?;
        self.set_user(Some(profile.clone())).await;

        info!("Logged in");
        Ok(profile)
    }

    /// Log out, clear the session and stored credentials.
    ///
    /// A 401 means the backend already considers the session gone; local
    /// state is cleared in that case too.
    #[instrument(skip(self))]
    pub async fn logout(&self) -> Result<Navigation> {
        info!("Logging out");

        let call = ApiCall::post(LOGOUT).without_refresh();
        match self.execute(&call).await {
            Ok(_) => {}
            Err(err) if err.is_unauthorized() => {
                debug!("Session already expired on the backend");
            }
            Err(err) => return Err(err),
        }

        self.set_user(None).await;
        self.inner.store.clear().await?;
        Ok(Navigation::Login)
    }

    /// Refresh explicitly using the stored pair.
    ///
    /// # Errors
    ///
    /// Returns [`ErrorCategory::Unauthenticated`] when no pair is stored.
    #[instrument(skip(self))]
    pub async fn refresh(&self) -> Result<()> {
        let _guard = self.inner.refresh_lock.lock().await;
        if self.refresh_stored().await? {
            Ok(())
        } else {
            Err(AuthError::Unauthenticated {
                message: Some("no stored refresh credentials".to_string()),
            }
            .into())
        }
    }

    // ========================================================================
    // Requests
    // ========================================================================

    /// Issue an authenticated request and decode its JSON response.
    ///
    /// A 401 is recovered once by refreshing with the stored credentials;
    /// see [`execute`](Self::execute).
    pub async fn request<B, R>(&self, method: Method, path: &str, body: Option<&B>) -> Result<R>
    where
        B: Serialize + ?Sized,
        R: DeserializeOwned,
    {
        let mut call = ApiCall::new(method, path);
        if let Some(body) = body {
            call = call.json(body)?;
        }
        self.execute(&call).await?.json()
    }

    /// Send a call, refreshing and re-issuing it once on a 401.
    ///
    /// - 401 on the first attempt: refresh with the stored pair, then send
    ///   again. Without a pair, or if the refresh fails, the original 401 is
    ///   returned and the session projection is cleared.
    /// - 401 on the retry: returned as is; no second refresh.
    /// - 403 and all other failures: returned unchanged.
    ///
    /// A credential store failure is returned as is and leaves the session
    /// projection alone. If the refresh call itself succeeded before the
    /// store failed, the request is still re-issued.
    #[instrument(skip(self, call), fields(method = %call.method(), path = %call.path()))]
    pub async fn execute(&self, call: &ApiCall) -> Result<ApiResponse> {
        let mut attempt = Attempt::first();
        loop {
            let seen = self.inner.refreshes.load(Ordering::Acquire);
            let err = match self.inner.client.send(call).await {
                Ok(response) => {
                    if attempt.is_retry() {
                        debug!(%attempt, "Request succeeded after refresh");
                    }
                    return Ok(response);
                }
                Err(err) => err,
            };

            let refreshable = call.refresh_policy() == RefreshPolicy::Retry;
            if !(err.is_unauthorized() && refreshable) {
                return Err(err);
            }

            if !attempt.may_refresh() {
                debug!(%attempt, "Unauthorized after refresh");
                self.set_user(None).await;
                return Err(err);
            }

            attempt = attempt.next();
            match self.refresh_after(seen).await {
                Ok(true) => {
                    debug!(%attempt, "Re-issuing request after refresh");
                }
                Ok(false) => {
                    debug!("Unauthorized and no stored credentials");
                    self.set_user(None).await;
                    return Err(err);
                }
                Err(store_err) if store_err.category() == ErrorCategory::Storage => {
                    warn!(error = %store_err, "Credential store failed during refresh");
                    if self.inner.refreshes.load(Ordering::Acquire) == seen {
                        return Err(store_err);
                    }
                }
                Err(refresh_err) => {
                    warn!(error = %refresh_err, "Session refresh failed");
                    self.set_user(None).await;
                    return Err(err);
                }
            }
        }
    }

    /// Refresh unless another call already did so after `seen` was read.
    ///
    /// Refreshes are serialized, so a rotated single-use refresh token is
    /// sent once.
    async fn refresh_after(&self, seen: u64) -> Result<bool> {
        let _guard = self.inner.refresh_lock.lock().await;
        if self.inner.refreshes.load(Ordering::Acquire) != seen {
            debug!("Session already refreshed by a concurrent request");
            return Ok(true);
        }
        self.refresh_stored().await
    }

    /// Call the refresh endpoint with the stored pair.
    ///
    /// Returns `Ok(false)` when nothing is stored. The stored pair is only
    /// replaced after a successful response that carries a new one.
    /// Callers hold `refresh_lock`.
    async fn refresh_stored(&self) -> Result<bool> {
        let Some(stored) = self.inner.store.load().await? else {
            return Ok(false);
        };

        info!(user_id = %stored.user_id, "Refreshing session");

        let call = ApiCall::post(REFRESH)
            .json(&RefreshRequest {
                user_id: stored.user_id.as_str(),
                refresh_token: stored.refresh_token.as_str(),
            })?
            .without_refresh();
        let response = self.inner.client.send(&call).await?;
        self.inner.refreshes.fetch_add(1, Ordering::AcqRel);

        let renewed: Option<TokenPairResponse> = response.json().unwrap_or_default();
        if let Some(pair) =
            renewed.and_then(|t| StoredCredentials::from_parts(t.user_id, t.refresh_token))
        {
            self.inner.store.save(&pair).await?;
        }

        debug!("Session refreshed successfully");
        Ok(true)
    }

    pub(crate) async fn fetch_profile(&self) -> Result<UserProfile> {
        self.execute(&ApiCall::get(PROFILE)).await?.json()
    }
}

fn is_auth_failure(err: &Error) -> bool {
    matches!(
        err.category(),
        ErrorCategory::Unauthenticated | ErrorCategory::Forbidden
    )
}

impl fmt::Debug for SessionManager {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SessionManager")
            .field("api", self.inner.client.api())
            .field("store", &"[REDACTED]")
            .finish()
    }
}
