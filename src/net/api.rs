//! REST client for the remote subscription service.
//!
//! Every request leaves through [`ServiceClient::request`], which asks the
//! injected [`RequestAuthenticator`] to attach the bearer token. The auth
//! calls the session manager needs are exposed through the [`AuthApi`] trait
//! so the state machine can be driven by a mock in tests.
//!
//! ERROR HANDLING
//! ==============
//! Non-2xx responses become [`ApiError::Rejected`] with the server's `detail`
//! string when one is present. Transport and decode failures keep their own
//! variants but callers handle all of them as the endpoint's failure path.

#[cfg(test)]
#[path = "api_test.rs"]
mod api_test;

#[cfg(not(target_arch = "wasm32"))]
use std::time::Duration;

use serde::de::DeserializeOwned;

use super::bearer::RequestAuthenticator;
use super::types::{ApiError, Registration, TokenGrant, User, parse_error_detail};

pub const ME_PATH: &str = "/api/auth/me";
pub const TOKEN_PATH: &str = "/api/auth/token";
pub const REGISTER_PATH: &str = "/api/auth/register";

pub const DEFAULT_REQUEST_TIMEOUT_SECS: u64 = 30;
pub const DEFAULT_CONNECT_TIMEOUT_SECS: u64 = 10;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Timeouts {
    pub request_secs: u64,
    pub connect_secs: u64,
}

impl Default for Timeouts {
    fn default() -> Self {
        Self { request_secs: DEFAULT_REQUEST_TIMEOUT_SECS, connect_secs: DEFAULT_CONNECT_TIMEOUT_SECS }
    }
}

// =============================================================================
// AUTH SEAM
// =============================================================================

/// Auth endpoints consumed by the session manager. Enables mocking in tests.
#[cfg_attr(target_arch = "wasm32", async_trait::async_trait(?Send))]
#[cfg_attr(not(target_arch = "wasm32"), async_trait::async_trait)]
pub trait AuthApi: Send + Sync {
    /// Resolve the identity behind the currently installed token.
    ///
    /// # Errors
    ///
    /// Any non-2xx status or transport failure means the session is invalid.
    async fn current_user(&self) -> Result<User, ApiError>;

    /// Exchange credentials for a token grant.
    ///
    /// # Errors
    ///
    /// Returns [`ApiError::Rejected`] with the server detail on bad credentials.
    async fn login(&self, username: &str, password: &str) -> Result<TokenGrant, ApiError>;

    /// Create an account. Does not sign in.
    ///
    /// # Errors
    ///
    /// Returns [`ApiError::Rejected`] on conflicts or validation failures.
    async fn register(&self, registration: &Registration) -> Result<(), ApiError>;
}

// =============================================================================
// CLIENT
// =============================================================================

/// HTTP client bound to one service base URL and one token slot.
#[derive(Clone, Debug)]
pub struct ServiceClient {
    http: reqwest::Client,
    base_url: String,
    auth: RequestAuthenticator,
}

impl ServiceClient {
    /// Build a client for `base_url` that decorates requests through `auth`.
    ///
    /// # Errors
    ///
    /// Returns [`ApiError::HttpClientBuild`] if the HTTP client fails to build.
    pub fn new(base_url: &str, timeouts: Timeouts, auth: RequestAuthenticator) -> Result<Self, ApiError> {
        #[cfg(not(target_arch = "wasm32"))]
        let builder = reqwest::Client::builder()
            .timeout(Duration::from_secs(timeouts.request_secs))
            .connect_timeout(Duration::from_secs(timeouts.connect_secs));
        #[cfg(target_arch = "wasm32")]
        let builder = {
            let _ = timeouts;
            reqwest::Client::builder()
        };
        let http = builder
            .build()
            .map_err(|e| ApiError::HttpClientBuild(e.to_string()))?;
        Ok(Self { http, base_url: base_url.trim_end_matches('/').to_owned(), auth })
    }

    #[must_use]
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Start a request to `path`, already carrying the bearer token if any.
    #[must_use]
    pub fn request(&self, method: reqwest::Method, path: &str) -> reqwest::RequestBuilder {
        let url = endpoint_url(&self.base_url, path);
        self.auth.authorize(self.http.request(method, url))
    }

    /// `GET` an arbitrary service path and return the body untouched.
    ///
    /// # Errors
    ///
    /// Returns an error on transport failure, non-2xx status, or non-JSON body.
    pub async fn get_json(&self, path: &str) -> Result<serde_json::Value, ApiError> {
        let response = self.request(reqwest::Method::GET, path).send().await;
        decode(response).await
    }
}

#[cfg_attr(target_arch = "wasm32", async_trait::async_trait(?Send))]
#[cfg_attr(not(target_arch = "wasm32"), async_trait::async_trait)]
impl AuthApi for ServiceClient {
    async fn current_user(&self) -> Result<User, ApiError> {
        let response = self.request(reqwest::Method::GET, ME_PATH).send().await;
        decode(response).await
    }

    async fn login(&self, username: &str, password: &str) -> Result<TokenGrant, ApiError> {
        let response = self
            .request(reqwest::Method::POST, TOKEN_PATH)
            .form(&[("username", username), ("password", password)])
            .send()
            .await;
        decode(response).await
    }

    async fn register(&self, registration: &Registration) -> Result<(), ApiError> {
        let response = self
            .request(reqwest::Method::POST, REGISTER_PATH)
            .json(registration)
            .send()
            .await;
        let response = response.map_err(|e| ApiError::Request(e.to_string()))?;
        let status = response.status().as_u16();
        let body = response
            .text()
            .await
            .map_err(|e| ApiError::Request(e.to_string()))?;
        check_status(status, body).map(|_| ())
    }
}

// =============================================================================
// HELPERS
// =============================================================================

fn endpoint_url(base_url: &str, path: &str) -> String {
    format!("{}/{}", base_url.trim_end_matches('/'), path.trim_start_matches('/'))
}

/// Map a response status + body to the body on 2xx, or a rejection.
fn check_status(status: u16, body: String) -> Result<String, ApiError> {
    if (200..300).contains(&status) {
        Ok(body)
    } else {
        Err(ApiError::Rejected { status, detail: parse_error_detail(&body) })
    }
}

fn parse_body<T: DeserializeOwned>(body: &str) -> Result<T, ApiError> {
    serde_json::from_str(body).map_err(|e| ApiError::Parse(e.to_string()))
}

async fn decode<T: DeserializeOwned>(response: Result<reqwest::Response, reqwest::Error>) -> Result<T, ApiError> {
    let response = response.map_err(|e| ApiError::Request(e.to_string()))?;
    let status = response.status().as_u16();
    let body = response
        .text()
        .await
        .map_err(|e| ApiError::Request(e.to_string()))?;
    let body = check_status(status, body)?;
    parse_body(&body)
}
