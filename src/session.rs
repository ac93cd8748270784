//! Session manager: the auth state machine.
//!
//! ARCHITECTURE
//! ============
//! The manager owns three things that must always agree: the in-memory
//! [`SessionState`], the durable [`CredentialStore`] slot, and the
//! [`TokenInstaller`] that feeds the bearer header. Every transition updates
//! all three inside one critical section.
//!
//! ```text
//!   INITIALIZING --startup ok--------> AUTHENTICATED
//!        |                                |    ^
//!        +--no token / rejected--+        |    | login
//!                                v        v    |
//!                           UNAUTHENTICATED <--+ logout (from any state)
//! ```
//!
//! CONCURRENCY
//! ===========
//! Network calls are the only suspension points. A generation counter is
//! bumped by every login commit and logout; startup only observes it. A startup check or login
//! that resumes under an older generation is discarded: the most recent
//! explicit user action wins, and a late grant never resurrects a session
//! that was logged out while it was in flight.
//!
//! ERROR HANDLING
//! ==============
//! Startup failures are absorbed silently. Login and registration failures
//! raise an error toast (server detail when available) and are returned to
//! the caller so form views can reset their own pending flag.

#[cfg(test)]
#[path = "session_test.rs"]
mod session_test;

use std::sync::{Mutex, MutexGuard, PoisonError};

use tokio::sync::watch;

use crate::net::api::AuthApi;
use crate::net::bearer::TokenInstaller;
use crate::net::types::{ApiError, Registration, TokenGrant, User};
use crate::routes::Route;
use crate::state::auth::SessionState;
use crate::store::{CredentialStore, StoreError};
use crate::ui::{Toast, UiBridge};

pub const LOGIN_SUCCESS: &str = "Welcome back!";
pub const LOGIN_FAILED: &str = "Login failed";
pub const REGISTER_SUCCESS: &str = "Account created! Please log in.";
pub const REGISTER_FAILED: &str = "Registration failed";
pub const LOGOUT_SUCCESS: &str = "Logged out successfully";

/// Errors returned by user-initiated session transitions.
#[derive(Debug, thiserror::Error)]
pub enum SessionError {
    /// The service rejected the call or could not be reached.
    #[error(transparent)]
    Api(#[from] ApiError),

    /// The service answered 2xx but issued no usable token.
    #[error("service issued an empty session token")]
    EmptyToken,

    /// The issued token could not be persisted; nothing was committed.
    #[error("failed to persist session: {0}")]
    Store(#[from] StoreError),

    /// A logout or newer login happened while this call was in flight; its
    /// grant was dropped.
    #[error("login superseded by a later session change")]
    Superseded,
}

impl SessionError {
    /// Message to show the user, preferring the server detail.
    #[must_use]
    pub fn user_message(&self, fallback: &str) -> String {
        match self {
            Self::Api(e) => e.user_message(fallback),
            Self::EmptyToken | Self::Store(_) | Self::Superseded => fallback.to_owned(),
        }
    }
}

/// Owns the session and keeps store, authenticator and state consistent.
pub struct SessionManager<A, S, U> {
    api: A,
    store: S,
    ui: U,
    installer: TokenInstaller,
    state: watch::Sender<SessionState>,
    generation: Mutex<u64>,
}

impl<A, S, U> SessionManager<A, S, U>
where
    A: AuthApi,
    S: CredentialStore,
    U: UiBridge,
{
    /// Create a manager in the `Initializing` state. Call [`Self::startup`]
    /// once to resolve any persisted session.
    pub fn new(api: A, store: S, ui: U, installer: TokenInstaller) -> Self {
        let (state, _) = watch::channel(SessionState::Initializing);
        Self { api, store, ui, installer, state, generation: Mutex::new(0) }
    }

    /// Snapshot of the current session.
    #[must_use]
    pub fn state(&self) -> SessionState {
        self.state.borrow().clone()
    }

    /// Receiver that observes every published session change.
    #[must_use]
    pub fn subscribe(&self) -> watch::Receiver<SessionState> {
        self.state.subscribe()
    }

    pub fn api(&self) -> &A {
        &self.api
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    pub fn ui(&self) -> &U {
        &self.ui
    }

    /// Resolve the persisted token, if any, into a session.
    ///
    /// Without a stored token the service is not contacted. A rejected or
    /// unreachable check erases the stored token without notifying the user.
    pub async fn startup(&self) -> SessionState {
        let (token, generation) = {
            let generation = self.lock_generation();
            let Some(token) = self.store.read() else {
                self.installer.clear();
                self.publish(SessionState::Unauthenticated);
                tracing::debug!("no stored session token");
                return self.state();
            };
            self.installer.install(&token);
            (token, *generation)
        };

        let result = self.api.current_user().await;

        {
            let generation_now = self.lock_generation();
            if *generation_now != generation {
                tracing::debug!("discarding stale startup identity check");
                return self.state();
            }
            match result {
                Ok(user) => {
                    tracing::info!(user_id = user.id, tier = %user.subscription_tier, "session restored");
                    self.publish(SessionState::authenticated(token, user));
                }
                Err(e) => {
                    tracing::debug!(error = %e, "stored session rejected; signing out");
                    self.clear_credentials();
                    self.publish(SessionState::Unauthenticated);
                }
            }
        }
        self.state()
    }

    /// Exchange credentials for a session and land on the dashboard.
    ///
    /// # Errors
    ///
    /// Returns [`SessionError`] when the service rejects the credentials, is
    /// unreachable, issues a malformed grant, or the token cannot be
    /// persisted. Returns [`SessionError::Superseded`], without notifying
    /// the user, when a logout or another login completed first. The session
    /// state is left untouched in every failure case.
    pub async fn login(&self, username: &str, password: &str) -> Result<User, SessionError> {
        let generation = *self.lock_generation();
        let grant = match self.api.login(username, password).await {
            Ok(grant) if grant.access_token.is_empty() => Err(SessionError::EmptyToken),
            Ok(grant) => Ok(grant),
            Err(e) => Err(SessionError::Api(e)),
        };
        let grant = grant.map_err(|e| self.surface(e, LOGIN_FAILED))?;

        let user = grant.user.clone();
        match self.commit(grant, generation) {
            Ok(()) => {}
            Err(SessionError::Superseded) => {
                tracing::debug!("discarding login grant that arrived after a session change");
                return Err(SessionError::Superseded);
            }
            Err(e) => return Err(self.surface(e, LOGIN_FAILED)),
        }

        tracing::info!(user_id = user.id, "signed in");
        self.ui.notify(Toast::Success(LOGIN_SUCCESS.to_owned()));
        self.ui.navigate(Route::DASHBOARD);
        Ok(user)
    }

    /// Create an account, then send the user to the login view.
    ///
    /// # Errors
    ///
    /// Returns [`SessionError::Api`] on conflicts, validation failures, or
    /// transport errors. No session is created either way.
    pub async fn register(&self, email: &str, username: &str, password: &str) -> Result<(), SessionError> {
        let registration = Registration {
            email: email.to_owned(),
            username: username.to_owned(),
            password: password.to_owned(),
        };
        self.api
            .register(&registration)
            .await
            .map_err(|e| self.surface(e.into(), REGISTER_FAILED))?;

        tracing::info!(username, "account registered");
        self.ui.notify(Toast::Success(REGISTER_SUCCESS.to_owned()));
        self.ui.navigate(Route::Login);
        Ok(())
    }

    /// Tear down the session unconditionally and return to the landing view.
    pub fn logout(&self) {
        {
            let mut generation = self.lock_generation();
            *generation += 1;
            self.clear_credentials();
            self.publish(SessionState::Unauthenticated);
        }
        tracing::info!("signed out");
        self.ui.navigate(Route::Landing);
        self.ui.notify(Toast::Success(LOGOUT_SUCCESS.to_owned()));
    }

    fn commit(&self, grant: TokenGrant, expected: u64) -> Result<(), SessionError> {
        let mut generation = self.lock_generation();
        if *generation != expected {
            return Err(SessionError::Superseded);
        }
        self.store.write(&grant.access_token)?;
        self.installer.install(&grant.access_token);
        *generation += 1;
        self.publish(SessionState::authenticated(grant.access_token, grant.user));
        Ok(())
    }

    fn clear_credentials(&self) {
        if let Err(e) = self.store.clear() {
            tracing::warn!(error = %e, "failed to erase stored session token");
        }
        self.installer.clear();
    }

    fn surface(&self, error: SessionError, fallback: &str) -> SessionError {
        tracing::warn!(error = %error, "session request failed");
        self.ui.notify(Toast::Error(error.user_message(fallback)));
        error
    }

    fn publish(&self, next: SessionState) {
        self.state.send_replace(next);
    }

    fn lock_generation(&self) -> MutexGuard<'_, u64> {
        self.generation.lock().unwrap_or_else(PoisonError::into_inner)
    }
}
