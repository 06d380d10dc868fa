//! Session token storage and retrieval.
//!
//! Stores the backend session token in `${MQDASH_HOME}/session.json` with
//! restricted permissions (0600). The token is opaque to the client and is
//! never logged or displayed in full.

use std::fs::{self, OpenOptions};
use std::io::Write;
use std::path::{Path, PathBuf};
use std::sync::Mutex;

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

use crate::config::paths;

/// Persisted shape of the session file: one opaque token under one key.
#[derive(Debug, Default, Serialize, Deserialize)]
struct StoredSession {
    token: String,
}

/// Durable store for the current session token.
///
/// Writers are the login flow and the authorization-failure recovery path;
/// everything else only reads. Hydrates once from disk at open, so a token
/// from a previous run survives a restart until explicitly cleared.
pub struct SessionStore {
    path: PathBuf,
    token: Mutex<Option<String>>,
}

impl SessionStore {
    /// Opens the store at the default session path.
    pub fn open() -> Self {
        Self::at(paths::session_path())
    }

    /// Opens the store at a specific path.
    ///
    /// A missing or unreadable file is an empty store, never a fault.
    pub fn at(path: PathBuf) -> Self {
        let token = read_token(&path);
        Self {
            path,
            token: Mutex::new(token),
        }
    }

    /// Returns the current token, if any.
    pub fn get(&self) -> Option<String> {
        self.token.lock().expect("session lock poisoned").clone()
    }

    /// Returns true if a token is present.
    pub fn is_authenticated(&self) -> bool {
        self.get().is_some()
    }

    /// Stores a new token, replacing any previous one.
    ///
    /// Persists to disk first so the in-memory view never claims a token
    /// that was lost on the way to storage.
    ///
    /// # Errors
    /// Returns an error if the session file cannot be written.
    pub fn set(&self, token: &str) -> Result<()> {
        let stored = StoredSession {
            token: token.to_string(),
        };
        let contents =
            serde_json::to_string_pretty(&stored).context("Failed to serialize session")?;
        write_restricted(&self.path, &contents)?;

        *self.token.lock().expect("session lock poisoned") = Some(token.to_string());
        Ok(())
    }

    /// Removes the token from memory and disk.
    ///
    /// Clearing an already-empty store is a no-op.
    ///
    /// # Errors
    /// Returns an error if the session file exists but cannot be removed.
    pub fn clear(&self) -> Result<()> {
        *self.token.lock().expect("session lock poisoned") = None;

        if self.path.exists() {
            fs::remove_file(&self.path)
                .with_context(|| format!("Failed to remove {}", self.path.display()))?;
        }
        Ok(())
    }

    /// Returns the path of the backing session file.
    pub fn path(&self) -> &Path {
        &self.path
    }
}

fn read_token(path: &Path) -> Option<String> {
    let contents = fs::read_to_string(path).ok()?;
    let stored: StoredSession = serde_json::from_str(&contents).ok()?;
    if stored.token.is_empty() {
        None
    } else {
        Some(stored.token)
    }
}

/// Writes the session file with restricted permissions (0600).
fn write_restricted(path: &Path, contents: &str) -> Result<()> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)
            .with_context(|| format!("Failed to create directory {}", parent.display()))?;
    }

    #[cfg(unix)]
    {
        use std::os::unix::fs::OpenOptionsExt;
        let mut file = OpenOptions::new()
            .write(true)
            .create(true)
            .truncate(true)
            .mode(0o600)
            .open(path)
            .with_context(|| format!("Failed to open {} for writing", path.display()))?;
        file.write_all(contents.as_bytes())
            .with_context(|| format!("Failed to write to {}", path.display()))?;
    }

    #[cfg(not(unix))]
    {
        fs::write(path, contents)
            .with_context(|| format!("Failed to write to {}", path.display()))?;
    }

    Ok(())
}

/// Returns a masked version of a token for display (first 8 chars + ...).
pub fn mask_token(token: &str) -> String {
    if token.len() <= 12 {
        return "***".to_string();
    }
    format!("{}...", &token[..8])
}
