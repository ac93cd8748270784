//! Shared wire DTOs for the client/service boundary.
//!
//! DESIGN
//! ======
//! These types mirror the auth endpoint payloads of the remote service.
//! Business payloads (predictions, portfolios, alerts) are not modelled here;
//! they travel as opaque `serde_json::Value`.

#[cfg(test)]
#[path = "types_test.rs"]
mod types_test;

use std::fmt;

use serde::{Deserialize, Serialize};

// =============================================================================
// ERROR
// =============================================================================

/// Errors produced by calls to the remote service.
///
/// Transport failures and server rejections are distinct variants so they can
/// be logged precisely, but the session layer treats them identically.
#[derive(Debug, thiserror::Error)]
pub enum ApiError {
    /// The HTTP request could not be sent or its body could not be read.
    #[error("request failed: {0}")]
    Request(String),

    /// The service answered with a non-success status.
    #[error("service rejected request: status {status}")]
    Rejected { status: u16, detail: Option<String> },

    /// The response body did not match the expected schema.
    #[error("response parse failed: {0}")]
    Parse(String),

    /// The underlying HTTP client could not be constructed.
    #[error("HTTP client build failed: {0}")]
    HttpClientBuild(String),
}

impl ApiError {
    /// Server-supplied human-readable detail, when the rejection carried one.
    #[must_use]
    pub fn detail(&self) -> Option<&str> {
        match self {
            Self::Rejected { detail, .. } => detail.as_deref(),
            _ => None,
        }
    }

    /// Message to surface to the user: the server detail, else `fallback`.
    #[must_use]
    pub fn user_message(&self, fallback: &str) -> String {
        self.detail().unwrap_or(fallback).to_owned()
    }
}

/// Extract a displayable `detail` string from a non-2xx response body.
///
/// Only string details are used; structured validation payloads and
/// non-JSON bodies yield `None`.
pub(crate) fn parse_error_detail(body: &str) -> Option<String> {
    #[derive(Deserialize)]
    struct ErrorBody {
        detail: Option<serde_json::Value>,
    }

    let parsed: ErrorBody = serde_json::from_str(body).ok()?;
    match parsed.detail? {
        serde_json::Value::String(detail) if !detail.trim().is_empty() => Some(detail),
        _ => None,
    }
}

// =============================================================================
// IDENTITY
// =============================================================================

/// Subscription plan attached to a user account.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum SubscriptionTier {
    Free,
    Pro,
    Elite,
    /// A tier this client does not know about yet.
    Other(String),
}

impl SubscriptionTier {
    #[must_use]
    pub fn as_str(&self) -> &str {
        match self {
            Self::Free => "free",
            Self::Pro => "pro",
            Self::Elite => "elite",
            Self::Other(raw) => raw,
        }
    }
}

impl From<String> for SubscriptionTier {
    fn from(raw: String) -> Self {
        match raw.as_str() {
            "free" => Self::Free,
            "pro" => Self::Pro,
            "elite" => Self::Elite,
            _ => Self::Other(raw),
        }
    }
}

impl From<SubscriptionTier> for String {
    fn from(tier: SubscriptionTier) -> Self {
        match tier {
            SubscriptionTier::Other(raw) => raw,
            known => known.as_str().to_owned(),
        }
    }
}

impl fmt::Display for SubscriptionTier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// An authenticated user as returned by `GET /api/auth/me`.
///
/// Read-only projection of the account; replaced wholesale on every
/// successful resolution.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct User {
    /// Numeric account identifier.
    pub id: i64,
    /// Login name.
    pub username: String,
    /// Account email address.
    pub email: String,
    /// Current subscription plan.
    pub subscription_tier: SubscriptionTier,
}

// =============================================================================
// AUTH PAYLOADS
// =============================================================================

/// Successful response of `POST /api/auth/token`.
#[derive(Clone, Debug, PartialEq, Eq, Deserialize)]
pub struct TokenGrant {
    /// Opaque session token to attach as a bearer credential.
    pub access_token: String,
    /// Identity the token resolves to.
    pub user: User,
}

/// JSON body of `POST /api/auth/register`.
#[derive(Clone, PartialEq, Eq, Serialize)]
pub struct Registration {
    pub email: String,
    pub username: String,
    pub password: String,
}

impl fmt::Debug for Registration {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Registration")
            .field("email", &self.email)
            .field("username", &self.username)
            .field("password", &"<redacted>")
            .finish()
    }
}
