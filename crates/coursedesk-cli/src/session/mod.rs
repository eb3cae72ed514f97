//! Opening and saving the CLI's session between invocations.

pub mod storage;

use std::sync::Arc;

use anyhow::{Context, Result};

use coursedesk_core::{ApiUrl, CredentialStore, Locale};
use coursedesk_http::{ApiClient, ClientConfig, SessionManager};

use storage::FileCredentialStore;

/// Settings shared by every command.
#[derive(Debug, Clone)]
pub struct CliContext {
    pub api: ApiUrl,
    pub locale: Locale,
}

/// A session manager together with the file it persists to.
pub struct CliSession {
    pub manager: SessionManager,
    store: Arc<FileCredentialStore>,
}

impl CliSession {
    /// Build a manager over the saved cookies and credentials, without
    /// contacting the backend.
    pub fn open(ctx: &CliContext) -> Result<Self> {
        let store = Arc::new(FileCredentialStore::new(
            storage::session_path()?,
            &ctx.api,
        ));

        let client = ApiClient::new(&ClientConfig::new(ctx.api.clone()))
            .context("Failed to create HTTP client")?;
        if let Some(cookies) = store.load_cookies().context("Failed to read session file")? {
            client.restore_cookies(&cookies);
        }

        let credentials: Arc<dyn CredentialStore> = store.clone();
        let manager = SessionManager::new(client, credentials);
        Ok(Self { manager, store })
    }

    /// Like [`open`](Self::open), then probe the session so the user
    /// projection is loaded.
    pub async fn open_restored(ctx: &CliContext) -> Result<Self> {
        let session = Self::open(ctx)?;
        session.manager.restore().await?;
        Ok(session)
    }

    pub fn store(&self) -> &FileCredentialStore {
        &self.store
    }

    /// Write the current cookies back to disk.
    pub fn save(&self) -> Result<()> {
        self.store
            .save_cookies(self.manager.client().export_cookies())
            .context("Failed to save session")
    }
}
