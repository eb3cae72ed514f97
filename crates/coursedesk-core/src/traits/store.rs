//! Credential store trait.

use async_trait::async_trait;

use crate::{Result, StoredCredentials};

/// Persistence for the user identifier and refresh token pair.
///
/// Implementations are shared by every in-flight request. Reads happen on
/// each refresh attempt; writes happen only after login, a successful
/// refresh, or logout.
#[async_trait]
pub trait CredentialStore: Send + Sync {
    /// Returns the stored pair, if any.
    async fn load(&self) -> Result<Option<StoredCredentials>>;

    /// Replace the stored pair.
    async fn save(&self, credentials: &StoredCredentials) -> Result<()>;

    /// Remove the stored pair.
    async fn clear(&self) -> Result<()>;
}
