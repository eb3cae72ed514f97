//! Session storage for persisting login state between invocations.

use std::fs;
use std::path::{Path, PathBuf};

use anyhow::Context;
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use directories::ProjectDirs;
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use coursedesk_core::error::{Error, StorageError};
use coursedesk_core::{ApiUrl, CredentialStore, Result, StoredCredentials};

#[cfg(unix)]
use std::os::unix::fs::PermissionsExt;

fn map_io(err: std::io::Error) -> Error {
    Error::Storage(StorageError::Io {
        message: err.to_string(),
    })
}

/// Stored session data.
#[derive(Debug, Serialize, Deserialize)]
struct StoredSession {
    api: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    credentials: Option<StoredCredentials>,
    /// `Cookie` header value for the API host.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    cookies: Option<String>,
    saved_at: DateTime<Utc>,
}

/// Get the session file path.
pub fn session_path() -> anyhow::Result<PathBuf> {
    let dirs =
        ProjectDirs::from("", "", "coursedesk").context("Could not determine data directory")?;

    let data_dir = dirs.data_dir();
    fs::create_dir_all(data_dir).context("Failed to create data directory")?;

    Ok(data_dir.join("session.json"))
}

/// Credential store backed by `session.json`.
///
/// The file also carries the session cookies. State saved for a different
/// API URL is ignored.
#[derive(Debug, Clone)]
pub struct FileCredentialStore {
    path: PathBuf,
    api: String,
}

impl FileCredentialStore {
    pub fn new(path: impl Into<PathBuf>, api: &ApiUrl) -> Self {
        Self {
            path: path.into(),
            api: api.as_str().to_string(),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn read(&self) -> Result<Option<StoredSession>> {
        if !self.path.exists() {
            return Ok(None);
        }

        let json = fs::read_to_string(&self.path).map_err(map_io)?;
        let stored: StoredSession = match serde_json::from_str(&json) {
            Ok(stored) => stored,
            Err(e) => {
                warn!(path = %self.path.display(), error = %e, "Ignoring unreadable session file");
                return Ok(None);
            }
        };

        if stored.api != self.api {
            debug!(stored = %stored.api, current = %self.api, "Session belongs to another API");
            return Ok(None);
        }

        Ok(Some(stored))
    }

    fn write(&self, stored: &StoredSession) -> Result<()> {
        let json = serde_json::to_string_pretty(stored).map_err(|e| {
            Error::Storage(StorageError::Encoding {
                message: e.to_string(),
            })
        })?;

        fs::write(&self.path, &json).map_err(map_io)?;

        // Set restrictive permissions (Unix only)
        #[cfg(unix)]
        {
            let mut perms = fs::metadata(&self.path).map_err(map_io)?.permissions();
            perms.set_mode(0o600);
            fs::set_permissions(&self.path, perms).map_err(map_io)?;
        }

        Ok(())
    }

    fn update<F>(&self, f: F) -> Result<()>
    where
        F: FnOnce(&mut StoredSession),
    {
        let mut stored = self.read()?.unwrap_or_else(|| StoredSession {
            api: self.api.clone(),
            credentials: None,
            cookies: None,
            saved_at: Utc::now(),
        });
        f(&mut stored);
        stored.saved_at = Utc::now();

        if stored.credentials.is_none() && stored.cookies.is_none() {
            return self.remove();
        }
        self.write(&stored)
    }

    fn remove(&self) -> Result<()> {
        if self.path.exists() {
            fs::remove_file(&self.path).map_err(map_io)?;
        }
        Ok(())
    }

    /// Cookies saved by the previous invocation.
    pub fn load_cookies(&self) -> Result<Option<String>> {
        Ok(self.read()?.and_then(|s| s.cookies))
    }

    /// Replace the saved cookies; `None` drops them.
    pub fn save_cookies(&self, cookies: Option<String>) -> Result<()> {
        self.update(|stored| stored.cookies = cookies)
    }

    /// When the session file was last written.
    pub fn saved_at(&self) -> Result<Option<DateTime<Utc>>> {
        Ok(self.read()?.map(|s| s.saved_at))
    }
}

#[async_trait]
impl CredentialStore for FileCredentialStore {
    async fn load(&self) -> Result<Option<StoredCredentials>> {
        Ok(self.read()?.and_then(|s| s.credentials))
    }

    async fn save(&self, credentials: &StoredCredentials) -> Result<()> {
        self.update(|stored| stored.credentials = Some(credentials.clone()))
    }

    async fn clear(&self) -> Result<()> {
        self.remove()
    }
}
