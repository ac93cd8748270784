//! Bearer-token request decoration.
//!
//! ARCHITECTURE
//! ============
//! One token slot is shared by a single writer and any number of readers.
//! `TokenInstaller` is the writer and is not `Clone`; the session manager owns
//! it. `RequestAuthenticator` is the read side injected into every call site
//! that talks to the remote service.
//!
//! The slot sits behind a `RwLock`, so installation is mutually exclusive with
//! request decoration even on a multi-threaded runtime. A request built after
//! `install`/`clear` returns always sees the new value.

#[cfg(test)]
#[path = "bearer_test.rs"]
mod bearer_test;

use std::sync::{Arc, PoisonError, RwLock};

type Slot = Arc<RwLock<Option<String>>>;

/// Create a connected writer/reader pair over an empty token slot.
#[must_use]
pub fn pair() -> (TokenInstaller, RequestAuthenticator) {
    let slot: Slot = Arc::new(RwLock::new(None));
    (TokenInstaller { slot: Arc::clone(&slot) }, RequestAuthenticator { slot })
}

/// Exclusive write handle for the active token.
#[derive(Debug)]
pub struct TokenInstaller {
    slot: Slot,
}

impl TokenInstaller {
    /// Make `token` the credential attached to subsequent requests.
    pub fn install(&self, token: &str) {
        *self.slot.write().unwrap_or_else(PoisonError::into_inner) = Some(token.to_owned());
    }

    /// Stop attaching any credential.
    pub fn clear(&self) {
        *self.slot.write().unwrap_or_else(PoisonError::into_inner) = None;
    }

    /// Read-side handle over the same slot.
    #[must_use]
    pub fn authenticator(&self) -> RequestAuthenticator {
        RequestAuthenticator { slot: Arc::clone(&self.slot) }
    }
}

/// Read-only view of the active token, used to decorate outbound requests.
#[derive(Clone, Debug)]
pub struct RequestAuthenticator {
    slot: Slot,
}

impl RequestAuthenticator {
    /// Currently installed token, if any.
    #[must_use]
    pub fn token(&self) -> Option<String> {
        self.slot.read().unwrap_or_else(PoisonError::into_inner).clone()
    }

    /// Value of the `Authorization` header, or `None` when signed out.
    #[must_use]
    pub fn authorization(&self) -> Option<String> {
        self.token().map(|token| format!("Bearer {token}"))
    }

    /// Attach `Authorization: Bearer <token>` when a token is installed.
    #[must_use]
    pub fn authorize(&self, builder: reqwest::RequestBuilder) -> reqwest::RequestBuilder {
        match self.token() {
            Some(token) => builder.bearer_auth(token),
            None => builder,
        }
    }
}
