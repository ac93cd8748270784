//! Auth-session state for the current user.
//!
//! SYSTEM CONTEXT
//! ==============
//! Read by route guards and identity-aware views; written only by the session
//! manager. The enum shape makes "identity without token" and "token without
//! identity" unrepresentable.

#[cfg(test)]
#[path = "auth_test.rs"]
mod auth_test;

use std::fmt;

use crate::net::types::User;

/// Lifecycle phase of the session, without its payload.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Phase {
    Initializing,
    Authenticated,
    Unauthenticated,
}

impl fmt::Display for Phase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Initializing => "initializing",
            Self::Authenticated => "authenticated",
            Self::Unauthenticated => "unauthenticated",
        })
    }
}

/// A confirmed session: the token and the identity it resolved to.
#[derive(Clone, PartialEq, Eq)]
pub struct Session {
    pub token: String,
    pub user: User,
}

impl fmt::Debug for Session {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Session")
            .field("token", &"<redacted>")
            .field("user", &self.user)
            .finish()
    }
}

/// In-memory session state owned by the session manager.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub enum SessionState {
    /// Startup resolution has not completed yet.
    #[default]
    Initializing,
    /// No valid token is held.
    Unauthenticated,
    Authenticated(Session),
}

impl SessionState {
    #[must_use]
    pub fn authenticated(token: impl Into<String>, user: User) -> Self {
        Self::Authenticated(Session { token: token.into(), user })
    }

    #[must_use]
    pub fn phase(&self) -> Phase {
        match self {
            Self::Initializing => Phase::Initializing,
            Self::Unauthenticated => Phase::Unauthenticated,
            Self::Authenticated(_) => Phase::Authenticated,
        }
    }

    /// True until the first resolution attempt has finished.
    #[must_use]
    pub fn is_loading(&self) -> bool {
        matches!(self, Self::Initializing)
    }

    #[must_use]
    pub fn is_authenticated(&self) -> bool {
        matches!(self, Self::Authenticated(_))
    }

    #[must_use]
    pub fn token(&self) -> Option<&str> {
        match self {
            Self::Authenticated(session) => Some(&session.token),
            _ => None,
        }
    }

    #[must_use]
    pub fn user(&self) -> Option<&User> {
        match self {
            Self::Authenticated(session) => Some(&session.user),
            _ => None,
        }
    }
}
