//! In-memory credential store.

use async_trait::async_trait;
use tokio::sync::RwLock;

use coursedesk_core::{CredentialStore, Result, StoredCredentials};

/// Process-wide credential store with no persistence.
#[derive(Debug, Default)]
pub struct MemoryCredentialStore {
    credentials: RwLock<Option<StoredCredentials>>,
}

impl MemoryCredentialStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// A store pre-populated with a pair.
    pub fn with_credentials(credentials: StoredCredentials) -> Self {
        Self {
            credentials: RwLock::new(Some(credentials)),
        }
    }
}

#[async_trait]
impl CredentialStore for MemoryCredentialStore {
    async fn load(&self) -> Result<Option<StoredCredentials>> {
        Ok(self.credentials.read().await.clone())
    }

    async fn save(&self, credentials: &StoredCredentials) -> Result<()> {
        *self.credentials.write().await = Some(credentials.clone());
        Ok(())
    }

    async fn clear(&self) -> Result<()> {
        *self.credentials.write().await = None;
        Ok(())
    }
}
