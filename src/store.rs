//! Durable single-slot storage for the session token.
//!
//! SYSTEM CONTEXT
//! ==============
//! The store holds at most one opaque token string and nothing else. Only the
//! session manager writes to it; it never inspects the token.
//!
//! Backends:
//! - [`MemoryStore`]: process-local slot.
//! - [`FileStore`]: one file containing the raw token (native front ends).
//! - `LocalStorageStore`: browser `localStorage` (`hydrate` feature).

#[cfg(test)]
#[path = "store_test.rs"]
mod store_test;

use std::io;
use std::path::{Path, PathBuf};
use std::sync::{Mutex, PoisonError};

/// Key of the durable slot in browser storage.
pub const TOKEN_KEY: &str = "token";

/// Errors produced by durable token storage.
#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    /// Reading or writing the token file failed.
    #[error("token file {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    /// The backing storage is not reachable in this environment.
    #[error("token storage unavailable: {0}")]
    Unavailable(String),
}

/// Get/set/clear over one durable token slot.
///
/// `read` is infallible by contract: an unreadable slot is reported as
/// absent so startup degrades to signed-out.
pub trait CredentialStore: Send + Sync {
    /// Stored token, or `None` when no session was persisted.
    fn read(&self) -> Option<String>;

    /// Replace the stored token.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError`] if the backend rejects the write.
    fn write(&self, token: &str) -> Result<(), StoreError>;

    /// Remove the stored token. Clearing an empty slot succeeds.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError`] if the backend rejects the removal.
    fn clear(&self) -> Result<(), StoreError>;
}

// =============================================================================
// MEMORY
// =============================================================================

#[derive(Debug, Default)]
pub struct MemoryStore {
    slot: Mutex<Option<String>>,
}

impl MemoryStore {
    /// Store pre-seeded with `token`, as if persisted by an earlier run.
    #[must_use]
    pub fn with_token(token: &str) -> Self {
        Self { slot: Mutex::new(Some(token.to_owned())) }
    }
}

impl CredentialStore for MemoryStore {
    fn read(&self) -> Option<String> {
        self.slot.lock().unwrap_or_else(PoisonError::into_inner).clone()
    }

    fn write(&self, token: &str) -> Result<(), StoreError> {
        *self.slot.lock().unwrap_or_else(PoisonError::into_inner) = Some(token.to_owned());
        Ok(())
    }

    fn clear(&self) -> Result<(), StoreError> {
        *self.slot.lock().unwrap_or_else(PoisonError::into_inner) = None;
        Ok(())
    }
}

// =============================================================================
// FILE
// =============================================================================

/// Token persisted as the entire contents of one file.
#[derive(Debug, Clone)]
pub struct FileStore {
    path: PathBuf,
}

impl FileStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }

    fn io_error(&self, source: io::Error) -> StoreError {
        StoreError::Io { path: self.path.clone(), source }
    }
}

impl CredentialStore for FileStore {
    fn read(&self) -> Option<String> {
        match std::fs::read_to_string(&self.path) {
            Ok(raw) if raw.is_empty() => None,
            Ok(raw) => Some(raw),
            Err(e) if e.kind() == io::ErrorKind::NotFound => None,
            Err(e) => {
                tracing::warn!(path = %self.path.display(), error = %e, "token file unreadable; treating as signed out");
                None
            }
        }
    }

    fn write(&self, token: &str) -> Result<(), StoreError> {
        if let Some(parent) = self.path.parent()
            && !parent.as_os_str().is_empty()
        {
            std::fs::create_dir_all(parent).map_err(|e| self.io_error(e))?;
        }
        std::fs::write(&self.path, token).map_err(|e| self.io_error(e))
    }

    fn clear(&self) -> Result<(), StoreError> {
        match std::fs::remove_file(&self.path) {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(()),
            Err(e) => Err(self.io_error(e)),
        }
    }
}

// =============================================================================
// BROWSER
// =============================================================================

/// Token persisted in `window.localStorage` under [`TOKEN_KEY`].
#[cfg(feature = "hydrate")]
#[derive(Debug, Clone, Default)]
pub struct LocalStorageStore;

#[cfg(feature = "hydrate")]
impl LocalStorageStore {
    fn storage() -> Result<web_sys::Storage, StoreError> {
        web_sys::window()
            .and_then(|w| w.local_storage().ok().flatten())
            .ok_or_else(|| StoreError::Unavailable("window.localStorage".to_owned()))
    }
}

#[cfg(feature = "hydrate")]
impl CredentialStore for LocalStorageStore {
    fn read(&self) -> Option<String> {
        let storage = Self::storage().ok()?;
        storage.get_item(TOKEN_KEY).ok().flatten().filter(|raw| !raw.is_empty())
    }

    fn write(&self, token: &str) -> Result<(), StoreError> {
        Self::storage()?
            .set_item(TOKEN_KEY, token)
            .map_err(|_| StoreError::Unavailable("localStorage.setItem rejected".to_owned()))
    }

    fn clear(&self) -> Result<(), StoreError> {
        Self::storage()?
            .remove_item(TOKEN_KEY)
            .map_err(|_| StoreError::Unavailable("localStorage.removeItem rejected".to_owned()))
    }
}
